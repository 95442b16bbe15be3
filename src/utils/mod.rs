pub mod config;
pub mod go_env;
pub(crate) mod gostatus_toml;
pub mod logger;

pub use config::*;
pub use go_env::GoEnv;
pub use logger::setup_logging;
