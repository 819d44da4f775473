pub mod cell;
pub mod storage;

pub use cell::ConfigCell;
pub use storage::{get_state_path, load_grading_config, save_grading_config, STORAGE_KEY};
