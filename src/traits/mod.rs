pub mod panel;
pub mod relay;
pub mod source;

pub use panel::Panel;
pub use relay::RelayClient;
pub use source::FeatureInfoSource;
