//! # relay-server
//!
//! Webhook server that relays fall-detection alerts to LINE users.
//!
//! The server answers LINE webhook callbacks (administrator commands and
//! user ID lookups) and broadcasts alerts posted by the detector to every
//! registered recipient. Built on the axum HTTP framework.
//!
//! ## Example
//!
//! ```rust,no_run
//! use relay_contacts::RecipientId;
//! use relay_server::{RelayConfig, RelayServer};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = RelayConfig::new("channel-secret", "access-token", RecipientId::new("U_admin"));
//!     let server = RelayServer::from_config(&config).unwrap();
//!     // server.serve(config.bind_addr).await.unwrap();
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/` | GET | Liveness text |
//! | `/callback` | POST | LINE webhook (requires `X-Line-Signature`) |
//! | `/alert` | POST | Broadcast a fall alert to all recipients |

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod command;
pub mod config;
pub mod error;
pub mod fanout;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types
pub use command::{Command, CommandRouter};
pub use config::{Cli, RecipientConfig, RecipientMode, RelayConfig};
pub use error::{RelayError, RelayResult};
pub use fanout::{AlertPayload, FanoutReport};
pub use server::RelayServer;
pub use state::AppState;
