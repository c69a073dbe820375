use thiserror::Error;

/// Failure taxonomy shared by every port and usecase.
///
/// Each invocation step returns one of these; nothing on a request path
/// escapes as a panic. The HTTP layer is the only place they are turned
/// into the external response shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("invalid input: {message}")]
    Validation { message: String },
    #[error("{service} failure: {message}")]
    ExternalService { service: String, message: String },
    #[error("persistence failure: {message}")]
    Persistence { message: String },
    #[error("not found: {message}")]
    NotFound { message: String },
    #[error("configuration error: {message}")]
    Configuration { message: String },
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn invalid_input(message: &str) -> Self {
        Self::Validation {
            message: message.to_string(),
        }
    }

    pub fn external_service_error(service: &str, message: &str) -> Self {
        Self::ExternalService {
            service: service.to_string(),
            message: message.to_string(),
        }
    }

    pub fn persistence_error(message: &str) -> Self {
        Self::Persistence {
            message: message.to_string(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::NotFound {
            message: message.to_string(),
        }
    }

    pub fn configuration_error(message: &str) -> Self {
        Self::Configuration {
            message: message.to_string(),
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self::Internal {
            message: message.to_string(),
        }
    }
}
