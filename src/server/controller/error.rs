use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{error, web, HttpRequest, HttpResponse};
use log::warn;
use serde::Serialize;
use crate::server::service::error::OrderError;

#[derive(Debug, Serialize)]
pub(crate) struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl error::ResponseError for OrderError {
    fn status_code(&self) -> StatusCode {
        match *self {
            OrderError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            OrderError::NotFound(_) => StatusCode::NOT_FOUND,
            OrderError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            OrderError::Internal(e) => Some(format!("{:#}", e)),
            _ => None,
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            message: self.to_string(),
            error,
        })
    }
}

/// Body extraction config: a body that does not fit the request type is a 400 with a message.
pub(crate) fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!("rejected body for {} {}, {}", req.method(), req.path(), err);
    let message = match &err {
        JsonPayloadError::Deserialize(e) => format!("Invalid request body: {}", e),
        other => other.to_string(),
    };
    error::InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(ErrorResponse { message, error: None }),
    )
    .into()
}
