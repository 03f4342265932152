//! HTTP status codes as the firmware stack reports them.
//!
//! The stack does not hand back the numeric code from the status line. It
//! reports an ordinal from its own enumeration, where `Ok` is `3`. Success is
//! therefore checked against [`StatusCode::SUCCESS`], never against `200`.

/// Ordinal HTTP status reported on a completed response token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum StatusCode {
    /// The stack could not map the status line to a known code.
    #[default]
    Unsupported = 0,
    Continue,
    SwitchingProtocols,
    Ok,
    Created,
    Accepted,
    NonAuthoritativeInformation,
    NoContent,
    ResetContent,
    PartialContent,
    MultipleChoices,
    MovedPermanently,
    Found,
    SeeOther,
    NotModified,
    UseProxy,
    TemporaryRedirect,
    BadRequest,
    Unauthorized,
    PaymentRequired,
    Forbidden,
    NotFound,
    MethodNotAllowed,
    NotAcceptable,
    ProxyAuthenticationRequired,
    RequestTimeOut,
    Conflict,
    Gone,
    LengthRequired,
    PreconditionFailed,
    RequestEntityTooLarge,
    RequestUriTooLarge,
    UnsupportedMediaType,
    RequestedRangeNotSatisfied,
    ExpectationFailed,
    InternalServerError,
    NotImplemented,
    BadGateway,
    ServiceUnavailable,
    GatewayTimeOut,
    HttpVersionNotSupported,
    PermanentRedirect,
}

const ORDERED: [StatusCode; 42] = [
    StatusCode::Unsupported,
    StatusCode::Continue,
    StatusCode::SwitchingProtocols,
    StatusCode::Ok,
    StatusCode::Created,
    StatusCode::Accepted,
    StatusCode::NonAuthoritativeInformation,
    StatusCode::NoContent,
    StatusCode::ResetContent,
    StatusCode::PartialContent,
    StatusCode::MultipleChoices,
    StatusCode::MovedPermanently,
    StatusCode::Found,
    StatusCode::SeeOther,
    StatusCode::NotModified,
    StatusCode::UseProxy,
    StatusCode::TemporaryRedirect,
    StatusCode::BadRequest,
    StatusCode::Unauthorized,
    StatusCode::PaymentRequired,
    StatusCode::Forbidden,
    StatusCode::NotFound,
    StatusCode::MethodNotAllowed,
    StatusCode::NotAcceptable,
    StatusCode::ProxyAuthenticationRequired,
    StatusCode::RequestTimeOut,
    StatusCode::Conflict,
    StatusCode::Gone,
    StatusCode::LengthRequired,
    StatusCode::PreconditionFailed,
    StatusCode::RequestEntityTooLarge,
    StatusCode::RequestUriTooLarge,
    StatusCode::UnsupportedMediaType,
    StatusCode::RequestedRangeNotSatisfied,
    StatusCode::ExpectationFailed,
    StatusCode::InternalServerError,
    StatusCode::NotImplemented,
    StatusCode::BadGateway,
    StatusCode::ServiceUnavailable,
    StatusCode::GatewayTimeOut,
    StatusCode::HttpVersionNotSupported,
    StatusCode::PermanentRedirect,
];

impl StatusCode {
    /// The sentinel a successful response carries.
    pub const SUCCESS: StatusCode = StatusCode::Ok;

    /// Decode a raw ordinal from the stack. Unknown ordinals map to `Unsupported`.
    pub fn from_ordinal(ordinal: u32) -> Self {
        ORDERED
            .get(ordinal as usize)
            .copied()
            .unwrap_or(StatusCode::Unsupported)
    }

    /// The raw ordinal as the stack encodes it.
    pub fn ordinal(self) -> u32 {
        self as u32
    }

    /// Whether this is the success sentinel.
    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }

    /// The HTTP/1.1 status line code this ordinal stands for, for display only.
    pub fn wire_code(self) -> Option<u16> {
        let code = match self {
            StatusCode::Unsupported => return None,
            StatusCode::Continue => 100,
            StatusCode::SwitchingProtocols => 101,
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::Accepted => 202,
            StatusCode::NonAuthoritativeInformation => 203,
            StatusCode::NoContent => 204,
            StatusCode::ResetContent => 205,
            StatusCode::PartialContent => 206,
            StatusCode::MultipleChoices => 300,
            StatusCode::MovedPermanently => 301,
            StatusCode::Found => 302,
            StatusCode::SeeOther => 303,
            StatusCode::NotModified => 304,
            StatusCode::UseProxy => 305,
            StatusCode::TemporaryRedirect => 307,
            StatusCode::BadRequest => 400,
            StatusCode::Unauthorized => 401,
            StatusCode::PaymentRequired => 402,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::NotAcceptable => 406,
            StatusCode::ProxyAuthenticationRequired => 407,
            StatusCode::RequestTimeOut => 408,
            StatusCode::Conflict => 409,
            StatusCode::Gone => 410,
            StatusCode::LengthRequired => 411,
            StatusCode::PreconditionFailed => 412,
            StatusCode::RequestEntityTooLarge => 413,
            StatusCode::RequestUriTooLarge => 414,
            StatusCode::UnsupportedMediaType => 415,
            StatusCode::RequestedRangeNotSatisfied => 416,
            StatusCode::ExpectationFailed => 417,
            StatusCode::InternalServerError => 500,
            StatusCode::NotImplemented => 501,
            StatusCode::BadGateway => 502,
            StatusCode::ServiceUnavailable => 503,
            StatusCode::GatewayTimeOut => 504,
            StatusCode::HttpVersionNotSupported => 505,
            StatusCode::PermanentRedirect => 308,
        };
        Some(code)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusCode {
    fn format(&self, f: defmt::Formatter) {
        match self.wire_code() {
            Some(code) => defmt::write!(f, "StatusCode({})", code),
            None => defmt::write!(f, "StatusCode(unsupported)"),
        }
    }
}
