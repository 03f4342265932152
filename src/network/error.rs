//! Common status types for firmware network operations

/// A firmware status code reported by the network stack.
///
/// This enum covers the failure statuses a firmware HTTP stack can report
/// from its service binding, protocol and memory services. Success is not a
/// variant: stack operations return `Result<_, Status>`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Status {
    /// A parameter was incorrect.
    InvalidParameter,
    /// The operation is not supported.
    Unsupported,
    /// There is no data pending or the device is not ready.
    NotReady,
    /// The physical device reported an error.
    DeviceError,
    /// A resource has run out.
    OutOfResources,
    /// The item was not found.
    NotFound,
    /// Access was denied.
    AccessDenied,
    /// A mapping to a device does not exist (e.g. no address yet).
    NoMapping,
    /// The timeout time expired.
    Timeout,
    /// The protocol has not been started or configured.
    NotStarted,
    /// The protocol has already been started or configured.
    AlreadyStarted,
    /// The operation was aborted.
    Aborted,
    /// A protocol error occurred.
    ProtocolError,
    /// An HTTP error occurred during the network operation.
    HttpError,
}

/// Why a child connection object could not be acquired from a controller.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AcquireError {
    /// The controller exposes no HTTP service binding.
    NoBindingFound,
    /// The service binding refused to create a child.
    CreateFailed(Status),
}

impl core::fmt::Display for Status {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let text = match self {
            Status::InvalidParameter => "invalid parameter",
            Status::Unsupported => "unsupported",
            Status::NotReady => "not ready",
            Status::DeviceError => "device error",
            Status::OutOfResources => "out of resources",
            Status::NotFound => "not found",
            Status::AccessDenied => "access denied",
            Status::NoMapping => "no mapping",
            Status::Timeout => "time out",
            Status::NotStarted => "not started",
            Status::AlreadyStarted => "already started",
            Status::Aborted => "aborted",
            Status::ProtocolError => "protocol error",
            Status::HttpError => "HTTP error",
        };
        f.write_str(text)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Status {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Status::InvalidParameter => defmt::write!(f, "InvalidParameter"),
            Status::Unsupported => defmt::write!(f, "Unsupported"),
            Status::NotReady => defmt::write!(f, "NotReady"),
            Status::DeviceError => defmt::write!(f, "DeviceError"),
            Status::OutOfResources => defmt::write!(f, "OutOfResources"),
            Status::NotFound => defmt::write!(f, "NotFound"),
            Status::AccessDenied => defmt::write!(f, "AccessDenied"),
            Status::NoMapping => defmt::write!(f, "NoMapping"),
            Status::Timeout => defmt::write!(f, "Timeout"),
            Status::NotStarted => defmt::write!(f, "NotStarted"),
            Status::AlreadyStarted => defmt::write!(f, "AlreadyStarted"),
            Status::Aborted => defmt::write!(f, "Aborted"),
            Status::ProtocolError => defmt::write!(f, "ProtocolError"),
            Status::HttpError => defmt::write!(f, "HttpError"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for AcquireError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            AcquireError::NoBindingFound => defmt::write!(f, "NoBindingFound"),
            AcquireError::CreateFailed(status) => defmt::write!(f, "CreateFailed({})", status),
        }
    }
}
