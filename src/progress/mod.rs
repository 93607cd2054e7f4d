//! Progress reporting for extraction operations

mod bar;
mod handler;
mod logging;

pub use bar::SpinnerHandler;
pub use handler::{NoOpHandler, ProgressEvent, ProgressHandler};
pub use logging::LoggingHandler;
