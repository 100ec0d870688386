pub mod config;
pub mod error;
pub mod feeds;
pub mod gateway;
pub mod markdown;
mod overrides;
pub mod site;
pub mod templates;

pub use config::Config;
pub use error::ConfigError;
pub use feeds::FeedsConfig;
pub use gateway::GatewayConfig;
pub use markdown::MarkdownConfig;
pub use site::SiteConfig;
