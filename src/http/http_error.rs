use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use core::fmt;
use log::error;
use std::error::Error;

#[derive(Debug)]
pub enum HttpError {
    GenericError(StatusCode),
}

// HttpError essentially wraps a StatusCode
impl HttpError {
    pub fn from_status_code(status_code: StatusCode) -> Self {
        Self::GenericError(status_code)
    }

    fn reason(&self) -> String {
        match self {
            Self::GenericError(status_code) => status_code
                .canonical_reason()
                .unwrap_or("unknown")
                .to_owned(),
        }
    }
}

// Internal errors are logged and hidden from the client
impl From<anyhow::Error> for HttpError {
    fn from(err: anyhow::Error) -> Self {
        error!("{err:?}");
        Self::from_status_code(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<askama::Error> for HttpError {
    fn from(err: askama::Error) -> Self {
        error!("Failed to render template\n{err:?}");
        Self::from_status_code(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::GenericError(status_code) => {
                write!(f, "{}: {}", status_code.as_str(), self.reason())
            }
        }
    }
}

impl Error for HttpError {}

impl ResponseError for HttpError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).body(self.reason())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::GenericError(status_code) => *status_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_display() {
        assert_eq!(
            HttpError::from_status_code(StatusCode::NOT_FOUND).to_string(),
            "404: Not Found"
        );
    }

    #[test]
    fn test_from_anyhow() {
        let err = HttpError::from(anyhow!("database is locked"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.reason(), "Internal Server Error");
    }
}
