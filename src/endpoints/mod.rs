pub mod handlers;
pub mod server;

pub use server::{AppState, PanelServer, router};
