//! Connection configuration and client options.
//!
//! [`ExchangeConfig`] is what the configuration stage applies to a child
//! connection object before any request is issued. [`Options`] adds the wait
//! budgets of the exchange and can be loaded from JSON with `serde-json-core`.

use serde::Deserialize;

use super::error::Error;

/// Default send-phase wait, in clock ticks.
pub const REQUEST_WAIT_TICKS: u32 = 5;
/// Default receive-phase wait, in clock ticks.
pub const RESPONSE_WAIT_TICKS: u32 = 5;

/// HTTP protocol version used on the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HttpVersion {
    Http10,
    #[default]
    Http11,
}

/// IPv4 local endpoint policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4AccessPoint {
    /// Use the address the stack already has (e.g. from DHCP).
    pub use_default_address: bool,
    /// Explicit local address, ignored with `use_default_address`.
    pub local_address: [u8; 4],
    /// Explicit local port, `0` lets the stack choose.
    pub local_port: u16,
}

impl Default for Ipv4AccessPoint {
    fn default() -> Self {
        Self {
            use_default_address: true,
            local_address: [0; 4],
            local_port: 0,
        }
    }
}

/// IPv6 local endpoint policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ipv6AccessPoint {
    pub local_address: [u8; 16],
    pub local_port: u16,
}

/// Local address selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPoint {
    V4(Ipv4AccessPoint),
    V6(Ipv6AccessPoint),
}

impl Default for AccessPoint {
    fn default() -> Self {
        AccessPoint::V4(Ipv4AccessPoint::default())
    }
}

/// Connection level settings applied once per child, before any request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExchangeConfig {
    pub version: HttpVersion,
    pub access_point: AccessPoint,
}

impl ExchangeConfig {
    /// Whether the local stack is IPv6.
    pub fn local_address_is_ipv6(&self) -> bool {
        matches!(self.access_point, AccessPoint::V6(_))
    }
}

/// Client options: the connection configuration plus the wait budgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub config: ExchangeConfig,
    /// Ticks to wait for the request to be sent.
    pub request_wait_ticks: u32,
    /// Ticks to wait for the response to arrive.
    pub response_wait_ticks: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            config: ExchangeConfig::default(),
            request_wait_ticks: REQUEST_WAIT_TICKS,
            response_wait_ticks: RESPONSE_WAIT_TICKS,
        }
    }
}

// Flat on-disk form; serde-json-core has no support for data-carrying enums.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawOptions {
    http_version: HttpVersion,
    ipv6: bool,
    use_default_address: bool,
    local_address_v4: [u8; 4],
    local_address_v6: [u8; 16],
    local_port: u16,
    request_wait_ticks: u32,
    response_wait_ticks: u32,
}

impl Default for RawOptions {
    fn default() -> Self {
        Self {
            http_version: HttpVersion::default(),
            ipv6: false,
            use_default_address: true,
            local_address_v4: [0; 4],
            local_address_v6: [0; 16],
            local_port: 0,
            request_wait_ticks: REQUEST_WAIT_TICKS,
            response_wait_ticks: RESPONSE_WAIT_TICKS,
        }
    }
}

impl From<RawOptions> for Options {
    fn from(raw: RawOptions) -> Self {
        let access_point = if raw.ipv6 {
            AccessPoint::V6(Ipv6AccessPoint {
                local_address: raw.local_address_v6,
                local_port: raw.local_port,
            })
        } else {
            AccessPoint::V4(Ipv4AccessPoint {
                use_default_address: raw.use_default_address,
                local_address: raw.local_address_v4,
                local_port: raw.local_port,
            })
        };
        Self {
            config: ExchangeConfig {
                version: raw.http_version,
                access_point,
            },
            request_wait_ticks: raw.request_wait_ticks,
            response_wait_ticks: raw.response_wait_ticks,
        }
    }
}

impl Options {
    /// Parse options from a JSON object. Missing fields keep their defaults.
    ///
    /// ```rust
    /// use efifetch::network::application::http::Options;
    ///
    /// let options = Options::from_json(br#"{"request_wait_ticks": 10}"#).unwrap();
    /// assert_eq!(options.request_wait_ticks, 10);
    /// assert_eq!(options.response_wait_ticks, 5);
    /// assert!(!options.config.local_address_is_ipv6());
    /// ```
    pub fn from_json(json: &[u8]) -> Result<Self, Error> {
        let (raw, _) =
            serde_json_core::from_slice::<RawOptions>(json).map_err(|_| Error::InvalidOptions)?;
        Ok(raw.into())
    }
}
