pub mod config;
pub mod consts;
pub mod debounce;
pub mod error;
pub mod gateway;
pub mod geometry;
pub mod interaction;
pub mod observe;
pub mod reveal;
pub mod surface;
pub mod transform;
pub mod viewer;
