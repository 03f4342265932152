//! HTTP exchange engine for firmware network stacks.
//!
//! This module drives exactly one HTTP request/response exchange through a
//! firmware HTTP protocol object. There is no scheduler, no threads and no
//! blocking socket: the engine issues each operation, then spins on the
//! stack's progress pump until the operation's completion signal fires or a
//! whole-second deadline runs out.
//!
//! # Exchange
//!
//! ```text
//! Idle -> HandleAcquired -> Configured -> RequestIssued -> RequestWaiting
//!      -> RequestSent -> ResponseBufferAllocated -> ResponseIssued
//!      -> ResponseWaiting -> ResponseReceived -> Done
//! ```
//!
//! Any failure ends the exchange. Resources are released in reverse order of
//! acquisition: response buffer, then the child connection object.
//!
//! # Features
//!
//! - Bounded waits counted in whole-second clock ticks
//! - Best-effort cancellation of timed-out operations
//! - Success gated on the stack's status sentinel, not on a numeric code
//! - Fixed-capacity response body ([`BODY_CAPACITY`] bytes)
//!
//! # Usage
//!
//! ```rust,ignore
//! use efifetch::network::application::http::{Client, Request};
//!
//! let mut client = Client::new(binding, pool, clock);
//! let response = client.exchange(controller, &Request::binary_golf()?)?;
//! assert_eq!(response.status, efifetch::network::application::http::StatusCode::SUCCESS);
//! ```

/// Response buffer ownership and an inline memory pool.
pub mod buffer;

/// The exchange orchestrator and the request/response types.
pub mod client;

/// Connection configuration and client options.
pub mod config;

/// Exchange error taxonomy.
pub mod error;

/// Acquisition and release of child connection objects.
pub mod handle;

/// The stack's HTTP status enumeration.
pub mod status;

/// Operation tokens and their completion signals.
pub mod token;

/// The poll-driven waiter and its deadline clock.
pub mod wait;

pub use buffer::{InlinePool, PoolBuffer};
pub use client::{
    BODY_CAPACITY, Client, ExchangeState, Header, MAX_HEADERS, Method, Request, Response,
};
pub use config::{AccessPoint, ExchangeConfig, HttpVersion, Ipv4AccessPoint, Ipv6AccessPoint, Options};
pub use error::Error;
pub use handle::ChildHandle;
pub use status::StatusCode;
pub use token::{CompletionSignal, Message, OperationKind, OperationToken, ResponseMessage};
pub use wait::{DeadlineClock, WaitOutcome, wait_for};
#[cfg(feature = "std")]
pub use wait::SystemClock;
