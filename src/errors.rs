use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::errors::{DomainError, RepositoryError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Validation failed")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    Unprocessable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Repository(e @ RepositoryError::NotFound(_)) => {
                AppError::NotFound(e.to_string())
            }
            DomainError::Repository(e @ RepositoryError::AlreadyExists(_)) => {
                AppError::Conflict(e.to_string())
            }
            DomainError::Repository(e) => AppError::Internal(e.to_string()),
            DomainError::InvalidInput(msg) => AppError::BadRequest(msg),
            DomainError::InvalidTransition(msg) => AppError::Unprocessable(msg),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Validation(errors) => serde_json::json!({ "errors": errors }),
            AppError::Internal(msg) => {
                log::error!("request failed: {}", msg);
                serde_json::json!({ "error": "Internal server error" })
            }
            _ => serde_json::json!({ "error": self.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn not_found_returns_404() {
        let resp = AppError::NotFound("order 1 not found".to_string()).error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_error_returns_500() {
        let err = AppError::Internal("something went wrong".to_string());
        assert_eq!(
            err.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_error_display() {
        assert_eq!(
            AppError::Internal("msg".to_string()).to_string(),
            "Internal error: msg"
        );
    }

    #[test]
    fn repository_not_found_maps_to_404() {
        let app_err: AppError = DomainError::from(RepositoryError::NotFound(7)).into();
        assert!(matches!(app_err, AppError::NotFound(ref m) if m == "order 7 not found"));
    }

    #[test]
    fn already_exists_maps_to_conflict() {
        let app_err: AppError = DomainError::from(RepositoryError::AlreadyExists(7)).into();
        assert_eq!(app_err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn store_faults_map_to_internal() {
        for err in [
            RepositoryError::StoreUnavailable("connection refused".to_string()),
            RepositoryError::Decoding("bad json".to_string()),
            RepositoryError::Encoding("bad value".to_string()),
        ] {
            let app_err: AppError = DomainError::from(err).into();
            assert!(matches!(app_err, AppError::Internal(_)));
        }
    }

    #[test]
    fn invalid_transition_maps_to_422() {
        let app_err: AppError =
            DomainError::InvalidTransition("order is already shipped".to_string()).into();
        assert_eq!(app_err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn invalid_input_maps_to_400() {
        let app_err: AppError = DomainError::InvalidInput("bad value".to_string()).into();
        assert_eq!(app_err.status_code(), StatusCode::BAD_REQUEST);
    }
}
