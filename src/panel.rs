use crate::traits::Panel;
use std::sync::{Arc, RwLock};

/// In-memory panel shared between the orchestrator and whoever displays it.
#[derive(Debug, Clone, Default)]
pub struct SharedPanel {
    html: Arc<RwLock<String>>,
}

impl SharedPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// The live fragment.
    pub fn html(&self) -> String {
        match self.html.read() {
            Ok(html) => html.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Panel for SharedPanel {
    fn replace(&self, html: String) {
        match self.html.write() {
            Ok(mut current) => *current = html,
            Err(poisoned) => *poisoned.into_inner() = html,
        }
    }
}
