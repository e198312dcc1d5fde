#[path = "env_config.rs"]
pub mod env_config;

pub use env_config::BotConfig;
