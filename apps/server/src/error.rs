use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nbp_fx_core::errors::Error as CoreError;
use nbp_fx_core::fx::FxError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
    // Surface the underlying error message to help debugging during development
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

impl From<FxError> for ApiError {
    fn from(err: FxError) -> Self {
        ApiError::Core(CoreError::Fx(err))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(CoreError::Fx(e)) => match e {
                FxError::RateUnavailable { .. } => StatusCode::NOT_FOUND,
                FxError::DataNotYetLoaded(_) => StatusCode::SERVICE_UNAVAILABLE,
                FxError::InvalidCurrencyCode(_) => StatusCode::BAD_REQUEST,
                FxError::ArithmeticOverflow(_) => StatusCode::UNPROCESSABLE_ENTITY,
            },
            ApiError::Core(CoreError::MarketData(_)) => StatusCode::BAD_GATEWAY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
