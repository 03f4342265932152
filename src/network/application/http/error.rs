//! Exchange error taxonomy.
//!
//! Every error ends the exchange it came from. By the time a caller sees one,
//! everything the exchange acquired has already been released.

use core::fmt;

use super::status::StatusCode;
use crate::network::error::{AcquireError, Status};

/// Why an exchange failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// No usable network controller, or the lookup itself failed.
    DiscoveryFailed,
    /// The child connection object could not be created.
    HandleAcquireFailed(AcquireError),
    /// The stack refused the connection configuration.
    ConfigRejected(Status),
    /// The stack refused to issue the send.
    RequestRejected(Status),
    /// The send completed with a failure status.
    RequestFailed(Status),
    /// The send did not complete in time; it was cancelled.
    RequestTimeout,
    /// The response buffer could not be allocated.
    OutOfResources,
    /// The stack refused to issue the receive.
    ResponseRejected(Status),
    /// The receive completed with a failure status.
    ResponseFailed(Status),
    /// The receive did not complete in time; it was cancelled.
    ResponseTimeout,
    /// The response completed with a status other than the success sentinel.
    BadStatus(StatusCode),
    /// The stack claimed to write more body bytes than the buffer holds.
    BodyOverrun { claimed: usize, capacity: usize },
    /// The clock could not be sampled when a wait started.
    ClockUnavailable(Status),
    /// The request could not be built.
    InvalidRequest,
    /// The options could not be parsed.
    InvalidOptions,
}

impl Error {
    /// Firmware status an entry point can return for this error.
    pub fn status(&self) -> Status {
        match *self {
            Error::DiscoveryFailed => Status::NotFound,
            Error::HandleAcquireFailed(AcquireError::NoBindingFound) => Status::Unsupported,
            Error::HandleAcquireFailed(AcquireError::CreateFailed(status)) => status,
            Error::ConfigRejected(status)
            | Error::RequestRejected(status)
            | Error::RequestFailed(status)
            | Error::ResponseRejected(status)
            | Error::ResponseFailed(status)
            | Error::ClockUnavailable(status) => status,
            Error::RequestTimeout | Error::ResponseTimeout => Status::Timeout,
            Error::OutOfResources => Status::OutOfResources,
            Error::BadStatus(_) => Status::Aborted,
            Error::BodyOverrun { .. } => Status::ProtocolError,
            Error::InvalidRequest | Error::InvalidOptions => Status::InvalidParameter,
        }
    }

    /// Whether the error came from an expired wait.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::RequestTimeout | Error::ResponseTimeout)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DiscoveryFailed => write!(f, "no network controller found"),
            Error::HandleAcquireFailed(AcquireError::NoBindingFound) => {
                write!(f, "controller has no HTTP service binding")
            }
            Error::HandleAcquireFailed(AcquireError::CreateFailed(status)) => {
                write!(f, "creating HTTP child failed: {status}")
            }
            Error::ConfigRejected(status) => write!(f, "configure failed: {status}"),
            Error::RequestRejected(status) => write!(f, "request failed: {status}"),
            Error::RequestFailed(status) => write!(f, "request completed with: {status}"),
            Error::RequestTimeout => write!(f, "request not sent in time"),
            Error::OutOfResources => write!(f, "response buffer allocation failed"),
            Error::ResponseRejected(status) => write!(f, "response failed: {status}"),
            Error::ResponseFailed(status) => write!(f, "response completed with: {status}"),
            Error::ResponseTimeout => write!(f, "response not received in time"),
            Error::BadStatus(code) => match code.wire_code() {
                Some(wire) => write!(f, "bad response status: {wire}"),
                None => write!(f, "bad response status: unsupported ({})", code.ordinal()),
            },
            Error::BodyOverrun { claimed, capacity } => {
                write!(f, "response body of {claimed} bytes exceeds {capacity} byte buffer")
            }
            Error::ClockUnavailable(status) => write!(f, "reading the clock failed: {status}"),
            Error::InvalidRequest => write!(f, "request does not fit"),
            Error::InvalidOptions => write!(f, "options are malformed"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::DiscoveryFailed => defmt::write!(f, "DiscoveryFailed"),
            Error::HandleAcquireFailed(e) => defmt::write!(f, "HandleAcquireFailed({})", e),
            Error::ConfigRejected(s) => defmt::write!(f, "ConfigRejected({})", s),
            Error::RequestRejected(s) => defmt::write!(f, "RequestRejected({})", s),
            Error::RequestFailed(s) => defmt::write!(f, "RequestFailed({})", s),
            Error::RequestTimeout => defmt::write!(f, "RequestTimeout"),
            Error::OutOfResources => defmt::write!(f, "OutOfResources"),
            Error::ResponseRejected(s) => defmt::write!(f, "ResponseRejected({})", s),
            Error::ResponseFailed(s) => defmt::write!(f, "ResponseFailed({})", s),
            Error::ResponseTimeout => defmt::write!(f, "ResponseTimeout"),
            Error::BadStatus(code) => defmt::write!(f, "BadStatus({})", code),
            Error::BodyOverrun { claimed, capacity } => {
                defmt::write!(f, "BodyOverrun({=usize} > {=usize})", claimed, capacity)
            }
            Error::ClockUnavailable(s) => defmt::write!(f, "ClockUnavailable({})", s),
            Error::InvalidRequest => defmt::write!(f, "InvalidRequest"),
            Error::InvalidOptions => defmt::write!(f, "InvalidOptions"),
        }
    }
}
