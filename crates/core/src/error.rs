/// Failure taxonomy shared by every vox endpoint.
///
/// Each variant maps to exactly one HTTP status. Messages of the first five
/// variants are meant for the caller; [`Error::Internal`] text is only ever
/// logged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Malformed, missing, or duplicate input.
    #[error("{0}")]
    Validation(String),
    /// Missing, invalid, or expired credentials; inactive account.
    #[error("{0}")]
    Auth(String),
    /// Caller is authenticated but does not own the resource.
    #[error("{0}")]
    Permission(String),
    /// Out-of-order registration transition.
    #[error("{0}")]
    State(String),
    /// Unknown identifier.
    #[error("{0}")]
    NotFound(String),
    /// Anything the caller cannot fix.
    #[error("{0}")]
    Internal(String),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }
    pub fn permission(msg: impl Into<String>) -> Self {
        Self::Permission(msg.into())
    }
    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
    pub fn internal(msg: impl ToString) -> Self {
        Self::Internal(msg.to_string())
    }
    /// HTTP status code of this failure.
    pub fn status(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::State(_) => 400,
            Self::Auth(_) => 401,
            Self::Permission(_) => 403,
            Self::NotFound(_) => 404,
            Self::Internal(_) => 500,
        }
    }
    /// Message safe to hand back to the caller.
    pub fn detail(&self) -> &str {
        match self {
            Self::Internal(_) => "internal server error",
            Self::Validation(m)
            | Self::Auth(m)
            | Self::Permission(m)
            | Self::State(m)
            | Self::NotFound(m) => m,
        }
    }
}

#[cfg(feature = "database")]
impl From<tokio_postgres::Error> for Error {
    fn from(e: tokio_postgres::Error) -> Self {
        Self::internal(e)
    }
}

#[cfg(feature = "server")]
impl actix_web::ResponseError for Error {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::from_u16(self.status())
            .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR)
    }
    fn error_response(&self) -> actix_web::HttpResponse {
        if let Self::Internal(e) = self {
            log::error!("internal error: {}", e);
        }
        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "detail": self.detail() }))
    }
}
