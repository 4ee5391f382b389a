mod cache;
mod dispatch;
mod io;
mod process;

pub(crate) use cache::SourceCache;
pub use dispatch::spawn_worker;
pub(crate) use dispatch::{send, send_error, send_log};
