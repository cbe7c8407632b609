pub mod click;
pub mod geometry;
pub mod payload;
pub mod request;

pub use click::{ClickEvent, Coordinate};
pub use payload::{Feature, ProxyPayload, RelayResponse};
pub use request::FeatureInfoRequest;
