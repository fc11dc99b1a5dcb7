use actix_web::{
    HttpResponse, ResponseError,
    http::{
        StatusCode,
        header::{self, ContentType},
    },
};

use super::codec::{DecodeError, EncodeError};

/// Every way a `/process` request can fail. Each one ends the request.
#[derive(Debug, derive_more::Display)]
pub enum HttpError {
    #[display("wrong http method")]
    MethodNotAllowed,
    #[display("not supported proto")]
    UnsupportedFormat,
    #[display("nothing to do")]
    EmptyBody,
    /// I/O detail stays in the logs.
    #[display("read req body err")]
    ReadBody,
    #[display("{_0}")]
    Decode(DecodeError),
    #[display("{_0}")]
    Encode(EncodeError),
}

impl std::error::Error for HttpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HttpError::Decode(err) => Some(err),
            HttpError::Encode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DecodeError> for HttpError {
    fn from(err: DecodeError) -> Self {
        HttpError::Decode(err)
    }
}

impl From<EncodeError> for HttpError {
    fn from(err: EncodeError) -> Self {
        HttpError::Encode(err)
    }
}

impl ResponseError for HttpError {
    fn status_code(&self) -> StatusCode {
        match self {
            HttpError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::plaintext())
            .insert_header((header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
            .body(format!("{self}\n"))
    }
}
