//! PrankWeb Artifact Server - HTTP access to precomputed pocket predictions
//!
//! This crate serves the artifacts resolved and assembled by the `artifacts`
//! crate over a small read-only REST API. Targets are addressed either by a
//! published accession (`id`) or by an upload identifier (`upload`).
//!
//! # Features
//!
//! - **Middleware**: Compression, CORS, request ID tracking, structured logging
//! - **Configuration**: Environment variable and file-based configuration
//! - **Error Handling**: Typed JSON error responses with a distinct status per error kind
//! - **Graceful Shutdown**: Proper signal handling for production deployments
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
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe (503 while an artifact directory is missing)
//! - `GET /api/{mode}/pdb/{id}` - Decompressed structure file (`text/plain`)
//! - `GET /api/{mode}/seq/{id}` - First-chain sequence with conservation scores (JSON)
//! - `GET /api/{mode}/mmcif/{id}` - Legacy mmCIF conversion (`text/plain`, deprecated)
//! - `GET /api/{mode}/csv/{id}` - Predicted pockets (JSON)
//!
//! # Error Responses
//!
//! | Status | Code | Cause |
//! |--------|------|-------|
//! | 400 | `INVALID_IDENTIFIER` | identifier is not a plain file name |
//! | 404 | `NOT_FOUND` | structure or prediction table does not exist |
//! | 404 | `UNKNOWN_MODE` | mode is neither `id` nor `upload` |
//! | 409 | `DATA_MISMATCH` | conservation scores do not match the chain |
//! | 422 | `PARSE_FAILURE` | structure or table content is malformed |
//! | 500 | `IO_FAILURE` | reading or decompressing failed |

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
