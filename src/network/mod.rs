//! A firmware network abstraction layer
//!
//! This module provides the traits an HTTP exchange drives when it runs on top of a
//! firmware networking stack instead of an operating system socket API. The stack is
//! split into the services firmware actually exposes: controller discovery, a service
//! binding that creates per-connection children, the HTTP protocol of such a child, a
//! memory pool and a coarse wall clock.
//!

#![allow(missing_docs)]
#![deny(unsafe_code)]

use crate::network::application::http::{ExchangeConfig, OperationToken};
use crate::network::error::{AcquireError, Status};

/// Common status types for network operations
pub mod error;

/// Protocol-specific client implementations
pub mod application;

/// Maximum number of controllers a discovery pass reports.
pub const MAX_CONTROLLERS: usize = 8;

/// Ordered list of controllers returned by discovery.
pub type Controllers<C> = heapless::Vec<C, MAX_CONTROLLERS>;

/// Re-exports of common traits
pub mod prelude {
    pub use super::{Clock, Discover, Http, Pool, ServiceBinding};
}

/// Enumerates network controllers that expose an HTTP capable binding.
pub trait Discover {
    /// Opaque controller identifier
    type Controller: Copy + core::fmt::Debug;
    /// List the controllers, in firmware order.
    fn controllers(&mut self) -> Result<Controllers<Self::Controller>, Status>;
}

/// The connection factory of a network controller.
pub trait ServiceBinding {
    /// Opaque controller identifier
    type Controller: Copy + core::fmt::Debug;
    /// The child connection object handed out by the factory
    type Child: Http;
    /// Create a new child connection object bound to `controller`.
    fn create_child(&mut self, controller: Self::Controller) -> Result<Self::Child, AcquireError>;
    /// Destroy a child previously returned by [`create_child`](Self::create_child).
    fn destroy_child(&mut self, child: Self::Child) -> Result<(), Status>;
}

/// The HTTP protocol surface of one child connection object.
///
/// `request` and `response` only issue the operation. The stack fulfils an issued
/// token while it is lent to `poll`, by calling [`OperationToken::complete`].
pub trait Http {
    /// Apply connection level settings; must precede any request.
    fn configure(&mut self, config: &ExchangeConfig) -> Result<(), Status>;
    /// Issue a non-blocking send of the request carried by `token`.
    fn request(&mut self, token: &mut OperationToken<'_>) -> Result<(), Status>;
    /// Issue a non-blocking receive into the buffer carried by `token`.
    fn response(&mut self, token: &mut OperationToken<'_>) -> Result<(), Status>;
    /// Abandon an outstanding operation.
    fn cancel(&mut self, token: &mut OperationToken<'_>) -> Result<(), Status>;
    /// Let the stack advance pending work for `token`. Never blocks.
    fn poll(&mut self, token: &mut OperationToken<'_>) -> Result<(), Status>;
}

/// Firmware memory pool
pub trait Pool {
    /// An allocation handed out by the pool
    type Buffer: AsRef<[u8]> + AsMut<[u8]>;
    /// Allocate `size` bytes.
    fn allocate(&mut self, size: usize) -> Result<Self::Buffer, Status>;
    /// Return an allocation to the pool.
    fn free(&mut self, buffer: Self::Buffer);
}

/// Wall clock time as reported by firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// A coarse wall clock.
pub trait Clock {
    /// Sample the current time.
    fn now(&mut self) -> Result<Time, Status>;
}
