pub mod gemini;
use std::sync::Arc;

use crate::domain::models::BackendBox;

pub struct BackendManager {}

impl BackendManager {
    /// Backend pointed at the configured Gemini URL.
    pub fn get() -> BackendBox {
        return Arc::new(gemini::Gemini::default());
    }
}
