//! FAQ entries shown on the contact page

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Faq {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub display_order: i32,
    pub is_active: bool,
}

/// Admin create/edit payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqInput {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl FaqInput {
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.question.trim().is_empty() {
            return Err(SharedError::validation("question", "Question is required"));
        }
        if self.answer.trim().is_empty() {
            return Err(SharedError::validation("answer", "Answer is required"));
        }
        Ok(())
    }
}
