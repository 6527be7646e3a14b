//! HTTP API Layer
//!
//! This crate provides the REST API for the room ledger using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Balance, analytics and health endpoints
//! - **Middleware**: Request tracing and audit logging
//! - **DTOs**: Query parameters and camelCase responses with rounded amounts
//! - **Error Handling**: Consistent `{error, message}` error bodies
//!
//! The ledger store is injected as an `Arc<dyn LedgerPort>`, so the same
//! router runs against PostgreSQL in production and an in-memory ledger in
//! tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::new(ledger, config)?;
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{middleware as axum_middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use core_kernel::CoreError;
use domain_expense::LedgerPort;
use domain_settlement::SettlementService;

use crate::config::ApiConfig;
use crate::handlers::{analytics, balances, health};
use crate::middleware::audit_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<dyn LedgerPort>,
    pub service: SettlementService,
    pub config: ApiConfig,
}

impl AppState {
    /// Builds the state, validating the configuration
    pub fn new(ledger: Arc<dyn LedgerPort>, config: ApiConfig) -> Result<Self, CoreError> {
        config.validate()?;
        let service = SettlementService::new(ledger.clone(), config.timezone()?);
        Ok(Self {
            ledger,
            service,
            config,
        })
    }
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Room routes
    let room_routes = Router::new()
        .route("/:room_id/balances", get(balances::get_balances))
        .route("/:room_id/analytics/monthly", get(analytics::monthly_summary))
        .route("/:room_id/analytics/categories", get(analytics::category_summary))
        .route("/:room_id/analytics/trends", get(analytics::trends))
        .route("/:room_id/analytics/dashboard", get(analytics::dashboard));

    let api_routes = Router::new()
        .nest("/rooms", room_routes)
        .layer(axum_middleware::from_fn(audit_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
