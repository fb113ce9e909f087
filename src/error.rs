use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use crate::models::{CouponRejectedResponse, ErrorMessageResponse, ForbiddenResponse};

pub type AppResult<T> = Result<T, AppError>;

/// 对外统一的 500 提示，不泄露内部细节
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error while creating coupon.";

pub const INVALID_ORIGIN_MESSAGE: &str = "Forbidden: Invalid origin";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Forbidden: invalid origin")]
    InvalidOrigin,

    #[error("Coupon rejected by WooCommerce (HTTP {status}): {body}")]
    CouponRejected {
        status: u16,
        body: serde_json::Value,
    },

    #[error("External API error: {0}")]
    ExternalApiError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidOrigin => StatusCode::FORBIDDEN,
            AppError::CouponRejected { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::InvalidOrigin => {
                log::warn!("Rejected request with invalid origin");
                HttpResponse::Forbidden().json(ForbiddenResponse {
                    error: INVALID_ORIGIN_MESSAGE.to_string(),
                })
            }
            AppError::CouponRejected { status, body } => {
                log::warn!("WooCommerce rejected coupon with HTTP {status}: {body}");
                HttpResponse::BadRequest().json(CouponRejectedResponse {
                    success: false,
                    error: body.clone(),
                })
            }
            _ => {
                log::error!("Error creating coupon: {self}");
                HttpResponse::InternalServerError().json(ErrorMessageResponse {
                    success: false,
                    message: INTERNAL_ERROR_MESSAGE.to_string(),
                })
            }
        }
    }
}
