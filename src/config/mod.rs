pub mod config;
pub mod load_error;
pub mod save_error;
