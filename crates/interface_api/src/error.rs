//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use core_kernel::{MoneyError, PortError, TemporalError};
use domain_settlement::SettlementError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String, Vec<String>),

    /// Stored ledger data the engine refuses to count
    #[error("Unprocessable ledger data: {0}")]
    InvalidLedgerData(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Validation(msg, details) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                msg,
                Some(details),
            ),
            ApiError::InvalidLedgerData(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "invalid_ledger_data",
                msg,
                None,
            ),
            ApiError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                msg,
                None,
            ),
            ApiError::Internal(msg) => {
                error!(error = %msg, "Internal error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            ref e if e.is_transient() => ApiError::ServiceUnavailable(err.to_string()),
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<TemporalError> for ApiError {
    fn from(err: TemporalError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<SettlementError> for ApiError {
    fn from(err: SettlementError) -> Self {
        match err {
            SettlementError::Ledger(port) => port.into(),
            SettlementError::Period(period) => period.into(),
            e @ SettlementError::InvalidAmount { .. } => ApiError::InvalidLedgerData(e.to_string()),
            e @ SettlementError::Money(MoneyError::Overflow) => {
                ApiError::InvalidLedgerData(e.to_string())
            }
            e @ SettlementError::Money(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => format!("{field}: {message}"),
                    None => format!("{field}: {}", e.code),
                })
            })
            .collect();
        ApiError::Validation("Invalid query parameters".to_string(), details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{ExpenseId, RoomId};
    use domain_settlement::AmountField;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_settlement_errors_map_to_status_codes() {
        let missing = SettlementError::Ledger(PortError::not_found("Room", RoomId::new()));
        assert_eq!(status_of(missing.into()), StatusCode::NOT_FOUND);

        let down = SettlementError::Ledger(PortError::ServiceUnavailable {
            service: "postgres".into(),
        });
        assert_eq!(status_of(down.into()), StatusCode::SERVICE_UNAVAILABLE);

        let bad_amount = SettlementError::InvalidAmount {
            expense_id: ExpenseId::new(),
            member_id: None,
            field: AmountField::OwedAmount,
            value: None,
        };
        assert_eq!(status_of(bad_amount.into()), StatusCode::UNPROCESSABLE_ENTITY);

        let overflow = SettlementError::Money(MoneyError::Overflow);
        assert_eq!(status_of(overflow.into()), StatusCode::UNPROCESSABLE_ENTITY);

        let broken = SettlementError::Ledger(PortError::transformation("bad category"));
        assert_eq!(status_of(broken.into()), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_invalid_month_is_bad_request() {
        let err: ApiError = TemporalError::InvalidMonth { year: 2024, month: 13 }.into();
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }
}
