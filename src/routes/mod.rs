// Route exports
pub mod schools;

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};

use crate::core::LookupError;
use crate::models::ErrorResponse;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(schools::configure),
    );
}

/// Lookup failures are user errors, reported as JSON with a 4xx status
impl ResponseError for LookupError {
    fn status_code(&self) -> StatusCode {
        match self {
            LookupError::InvalidQuery(_) | LookupError::ComparisonLimitExceeded { .. } => {
                StatusCode::BAD_REQUEST
            }
            LookupError::LocationNotFound(_) | LookupError::SchoolNotFound(_) => {
                StatusCode::NOT_FOUND
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}
