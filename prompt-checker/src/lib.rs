pub mod cli;
pub mod download;
pub mod load_config;
pub mod report;

pub use cli::{run, Cli, Commands};
