pub mod menu_bar;
pub mod status;
pub mod viewport;
pub(crate) mod viewport_input;
