pub mod config;
pub mod grading;
pub mod logging;
pub mod output;
pub mod stderr_buffer;
pub mod store;
pub mod tui;
