pub mod cli;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod geometry;
pub mod models;
pub mod panel;
pub mod query;
pub mod render;
pub mod traits;

pub use cli::Cli;
pub use config::Config;
pub use endpoints::PanelServer;
pub use query::QueryOrchestrator;
