pub mod args;
pub mod demo_error;
pub mod load_config;
pub mod logger_setup;
pub mod run_demo;
