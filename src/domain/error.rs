use thiserror::Error;

use crate::domain::entities::EntityKind;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{} not found", .entity.as_str())]
    NotFound { entity: EntityKind },
    #[error("{} with this title already exists", .entity.as_str())]
    DuplicateTitle { entity: EntityKind },
    #[error("domain validation failed: {message}")]
    Validation { message: String },
}

impl DomainError {
    pub fn not_found(entity: EntityKind) -> Self {
        Self::NotFound { entity }
    }

    pub fn duplicate_title(entity: EntityKind) -> Self {
        Self::DuplicateTitle { entity }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
