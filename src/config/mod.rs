//! Configuration management.

mod loader;
mod structs;


pub use loader::{get_config_dir, get_config_path, load_config, load_config_from};
pub use structs::*;
