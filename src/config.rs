mod loader;
mod types;

pub use loader::{ConfigResult, config_path, load_config, load_config_from_path, parse_config};
pub use types::{Config, DefaultsConfig, SchedulerConfig};
