//! # efifetch - HTTP GET over firmware network stacks
//!
//! A `no_std` engine that performs one HTTP GET exchange on top of a firmware
//! networking stack (UEFI style service bindings and HTTP protocol objects)
//! instead of an operating system socket API. There are no threads and no
//! blocking I/O: every asynchronous operation is driven to completion by a
//! cooperative poll loop with a whole-second deadline.
//!
//! ## Features
//!
//! - **Handle lifecycle**: child connection objects are created per exchange
//!   and always destroyed, on every exit path
//! - **Poll-driven completion**: one-shot completion signals owned by each
//!   operation token, observed by pumping the stack
//! - **Bounded waits**: tick-counted deadlines with best-effort cancellation
//! - **Fixed-size response**: a single 4 KiB body buffer from the stack's pool
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! efifetch = "0.1.0"
//! ```
//!
//! ### Fetching a document
//!
//! ```rust,ignore
//! use efifetch::network::application::http::{Client, Request};
//!
//! // `binding`, `pool`, `clock` and `discovery` wrap the firmware services.
//! let mut client = Client::new(binding, pool, clock);
//! let response = client.fetch(&mut discovery, &Request::binary_golf()?)?;
//! print_ascii(response.body());
//! ```
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support and a host `SystemClock`
//! - `defmt`: Enable defmt formatting of status and error types

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

/// Firmware network abstraction layer and the HTTP exchange engine.
///
/// The stack-facing traits live at the top of this module; the exchange
/// engine lives in [`network::application::http`].
pub mod network;
