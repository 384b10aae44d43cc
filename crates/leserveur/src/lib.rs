//! leserveur - HTTP Surface
//!
//! *Le Serveur* (The Server) - Axum front door for the LeGuide
//! recommendation engine: `POST /recommendations`, `GET /weather`, and a
//! health endpoint, with provider adapters resolved from configuration at
//! startup.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// Server configuration from environment
pub mod config;

/// API error types
pub mod error;

/// HTTP handlers for REST endpoints
pub mod handlers;

/// Provider resolution from configuration
pub mod providers;

/// Server instance management
pub mod server;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use server::LeGuideServer;
