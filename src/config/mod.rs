pub mod args;
mod r#impl;
mod structs;

pub use args::Cli;
pub use r#impl::{DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILE, ENV_PREFIX};
pub use structs::*;
