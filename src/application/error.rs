use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::{
    application::repos::RepoError,
    domain::{entities::EntityKind, error::DomainError},
    infra::error::InfraError,
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("export task not found")]
    ExportTaskNotFound,
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// Translate a repository error raised while operating on `entity`.
    ///
    /// A storage-level duplicate is a conflict race the domain pre-check did
    /// not catch; it surfaces exactly like the domain conflict. Persistence
    /// detail never leaks to the caller.
    pub fn from_repo(entity: EntityKind, err: RepoError) -> Self {
        match err {
            RepoError::NotFound => DomainError::not_found(entity).into(),
            RepoError::Duplicate { .. } => DomainError::duplicate_title(entity).into(),
            other => InfraError::database(other.to_string()).into(),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Domain(DomainError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Domain(DomainError::DuplicateTitle { .. }) => StatusCode::CONFLICT,
            AppError::Domain(DomainError::Validation { .. }) => StatusCode::BAD_REQUEST,
            AppError::ExportTaskNotFound => StatusCode::NOT_FOUND,
            AppError::Infra(InfraError::Database { .. }) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Infra(_) | AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            AppError::Domain(DomainError::NotFound { entity }) => {
                format!("{} not found", entity.as_str())
            }
            AppError::Domain(DomainError::DuplicateTitle { entity }) => {
                format!("failed to add {}", entity.as_str())
            }
            AppError::Domain(DomainError::Validation { message }) => message.clone(),
            AppError::ExportTaskNotFound => "export task not found".to_string(),
            AppError::Infra(InfraError::Database { .. }) => {
                "service temporarily unavailable".to_string()
            }
            AppError::Infra(_) | AppError::Unexpected(_) => "unexpected error".to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            detail: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_not_found_maps_to_domain_not_found() {
        let err = AppError::from_repo(EntityKind::Menu, RepoError::NotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.public_message(), "menu not found");
    }

    #[test]
    fn storage_duplicate_surfaces_as_conflict() {
        let err = AppError::from_repo(
            EntityKind::Dish,
            RepoError::Duplicate {
                constraint: "dish_title_key".to_string(),
            },
        );
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn persistence_detail_does_not_leak() {
        let err = AppError::from_repo(
            EntityKind::Menu,
            RepoError::Persistence("connection refused to 10.0.0.3:5432".to_string()),
        );
        assert!(!err.public_message().contains("10.0.0.3"));
    }
}
