//! # waypoint-server
//!
//! TCP game server for waypoint.
//!
//! This crate provides:
//! - TCP connection handling with async I/O
//! - Packet framing and dispatch by message kind
//! - Per-connection sessions holding character state
//! - Diagnostics for unhandled actions through `tracing`
//! - YAML and environment configuration

pub mod config;
pub mod error;
pub mod handler;
pub mod server;
pub mod session;

pub use config::{Config, ConfigError, NetworkConfig, SpawnConfig};
pub use error::ServerError;
pub use handler::{PacketHandler, TracingSink};
pub use server::{Server, ServerConfig, ServerStats};
pub use session::{Character, Session};
