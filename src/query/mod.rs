pub mod builder;
pub mod classify;
pub mod orchestrator;
pub mod relay;

pub use builder::{RequestBuilder, WmsSource};
pub use classify::classify;
pub use orchestrator::{ClickOutcome, QueryOrchestrator, QueryState};
pub use relay::HttpRelayClient;
