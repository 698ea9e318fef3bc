//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::services::AnswerService;

/// Application state shared across request handlers
#[derive(Clone)]
pub struct AppState {
    pub answer_service: Arc<AnswerService>,
}

impl AppState {
    pub fn new(answer_service: Arc<AnswerService>) -> Self {
        Self { answer_service }
    }
}
