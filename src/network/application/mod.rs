//! # Application Layer Network Protocols
//!
//! This module contains the application layer (OSI Layer 7) protocols that run on
//! top of the firmware stack traits in [`crate::network`].
//!
//! ## Available Protocols
//!
//! - **[`http`]**: a single-exchange HTTP GET engine driven by a cooperative poll loop
//!
//! ## Design Principles
//!
//! - **Stack Agnostic**: Work with any type implementing the [`crate::network`] traits
//! - **No-std Compatible**: No heap allocation outside the stack's own memory pool
//! - **Resource Conscious**: Fixed-size buffers and exactly one outstanding operation
//! - **Error Handling**: One discriminated error per failed exchange
//!
//! ## Usage Pattern
//!
//! 1. Implement the stack traits for your firmware (or use a fake in tests)
//! 2. Hand the service binding, pool and clock to the protocol client
//! 3. Discover a controller and run the exchange
//!
//! ```rust,ignore
//! use efifetch::network::application::http::{Client, Request};
//!
//! let mut client = Client::new(binding, pool, clock);
//! let response = client.fetch(&mut discovery, &Request::binary_golf()?)?;
//! ```

/// HTTP exchange engine.
///
/// Drives one GET request and its response through a firmware HTTP protocol,
/// with bounded waits and guaranteed cleanup.
pub mod http;
