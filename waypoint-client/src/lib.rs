//! # waypoint-client
//!
//! Async client for the waypoint game server.
//!
//! # Example
//!
//! ```no_run
//! use waypoint_client::{Client, ConnectionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConnectionConfig::new("127.0.0.1:5816".parse()?);
//!     let mut client = Client::connect(config).await?;
//!
//!     let location = client.location().await?;
//!     println!("map {} at ({}, {})", location.map_id, location.x, location.y);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod connection;
pub mod error;

pub use client::{Client, Location};
pub use connection::{Connection, ConnectionConfig};
pub use error::ClientError;
