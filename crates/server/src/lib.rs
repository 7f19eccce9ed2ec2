//! Brandscan Server - HTTP REST API for brand-mention checks
//!
//! Thin I/O glue around the `brandscan` pipeline: request validation, an
//! optional model provider for requests that carry no response, health
//! probes, and the usual middleware stack.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! ## Public Endpoints (No Authentication)
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//!
//! ## Protected Endpoints (API Key Required When Keys Are Configured)
//!
//! - `POST /api/v1/check` - Check a response for a brand mention
//!
//! # Configuration
//!
//! `ServerConfig::load` reads `.env`, an optional `server.{toml,yaml,json}`
//! file, then `BRANDSCAN_SERVER__*` variables, e.g.
//! `BRANDSCAN_SERVER__PROVIDER_URL=http://localhost:9000/generate`.

pub mod config;
pub mod error;
pub mod middleware;
pub mod provider;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use provider::{HttpProvider, ModelProvider, ProviderError};
pub use server::{build_router, start_server};
pub use state::ServerState;
