use heapless::{String, Vec};
use log::{debug, warn};

use super::buffer::PoolBuffer;
use super::config::Options;
use super::error::Error;
use super::handle::ChildHandle;
use super::status::StatusCode;
use super::token::OperationToken;
use super::wait::{WaitOutcome, wait_for};
use crate::network::error::Status;
use crate::network::{Clock, Discover, Http, Pool, ServiceBinding};

pub const MAX_HEADERS: usize = 16;
const MAX_HEADER_NAME_LEN: usize = 64;
const MAX_HEADER_VALUE_LEN: usize = 256;

/// Capacity of the response body buffer.
pub const BODY_CAPACITY: usize = 4096;

/// Target of the fixed compatibility request.
pub const BINARY_GOLF_URL: &str = "https://binary.golf/5/5";

const MAX_TRACE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String<MAX_HEADER_NAME_LEN>,
    pub value: String<MAX_HEADER_VALUE_LEN>,
}

impl Header {
    pub fn new(name: &str, value: &str) -> Result<Self, Error> {
        Ok(Self {
            name: String::try_from(name).map_err(|_| Error::InvalidRequest)?,
            value: String::try_from(value).map_err(|_| Error::InvalidRequest)?,
        })
    }
}

/// A bodyless request. Headers keep their insertion order.
#[derive(Debug, Clone)]
pub struct Request<'a> {
    pub method: Method,
    pub url: &'a str,
    pub headers: Vec<Header, MAX_HEADERS>,
}

impl<'a> Request<'a> {
    pub fn get(url: &'a str) -> Self {
        Self {
            method: Method::Get,
            url,
            headers: Vec::new(),
        }
    }

    /// Append a header.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self, Error> {
        self.headers
            .push(Header::new(name, value)?)
            .map_err(|_| Error::InvalidRequest)?;
        Ok(self)
    }

    /// `GET https://binary.golf/5/5` with `Host: binary.golf`.
    pub fn binary_golf() -> Result<Request<'static>, Error> {
        Request::get(BINARY_GOLF_URL).header("Host", "binary.golf")
    }
}

/// A successful response: the status sentinel, headers and the body bytes
/// actually written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    pub headers: Vec<Header, MAX_HEADERS>,
    pub body: Vec<u8, BODY_CAPACITY>,
}

impl Response {
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Exchange progress. States only move forward, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExchangeState {
    Idle,
    HandleAcquired,
    Configured,
    RequestIssued,
    RequestWaiting,
    RequestSent,
    RequestTimedOut,
    ResponseBufferAllocated,
    ResponseIssued,
    ResponseWaiting,
    ResponseReceived,
    ResponseTimedOut,
    Done,
}

/// HTTP client over a firmware service binding.
///
/// Each exchange creates its own child connection object, response buffer and
/// operation tokens, and releases all of them before returning.
pub struct Client<B, P, K>
where
    B: ServiceBinding,
    P: Pool,
    K: Clock,
{
    binding: B,
    pool: P,
    clock: K,
    options: Options,
    trace: Vec<ExchangeState, MAX_TRACE>,
}

impl<B, P, K> Client<B, P, K>
where
    B: ServiceBinding,
    P: Pool,
    K: Clock,
{
    pub fn new(binding: B, pool: P, clock: K) -> Self {
        Self::with_options(binding, pool, clock, Options::default())
    }

    pub fn with_options(binding: B, pool: P, clock: K, options: Options) -> Self {
        Self {
            binding,
            pool,
            clock,
            options,
            trace: Vec::new(),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn pool(&self) -> &P {
        &self.pool
    }

    /// States visited by the last exchange, in order.
    pub fn trace(&self) -> &[ExchangeState] {
        &self.trace
    }

    /// The state the last exchange ended in.
    pub fn state(&self) -> ExchangeState {
        self.trace.last().copied().unwrap_or(ExchangeState::Idle)
    }

    /// Discover controllers and run one exchange on the first.
    pub fn fetch<D>(&mut self, discovery: &mut D, request: &Request<'_>) -> Result<Response, Error>
    where
        D: Discover<Controller = B::Controller>,
    {
        let controllers = discovery.controllers().map_err(|status| {
            warn!("locating controllers failed: {}", status);
            Error::DiscoveryFailed
        })?;

        let Some(&controller) = controllers.first() else {
            warn!("no network controllers found");
            return Err(Error::DiscoveryFailed);
        };

        if controllers.len() > 1 {
            warn!(
                "{} network controllers found, using the first one",
                controllers.len()
            );
        }

        self.exchange(controller, request)
    }

    /// Run one exchange on `controller`.
    pub fn exchange(
        &mut self,
        controller: B::Controller,
        request: &Request<'_>,
    ) -> Result<Response, Error> {
        let Self {
            binding,
            pool,
            clock,
            options,
            trace,
        } = self;

        trace.clear();
        enter(trace, ExchangeState::Idle);

        // Dropped in reverse order: response buffer first, then the child.
        let mut child = ChildHandle::acquire(binding, controller).map_err(|e| {
            warn!("acquiring HTTP child failed: {:?}", e);
            Error::HandleAcquireFailed(e)
        })?;
        enter(trace, ExchangeState::HandleAcquired);

        child.configure(&options.config).map_err(|status| {
            warn!("configure failed: {}", status);
            Error::ConfigRejected(status)
        })?;
        enter(trace, ExchangeState::Configured);

        let mut request_token = OperationToken::request(request);
        child.request(&mut request_token).map_err(|status| {
            warn!("request failed: {}", status);
            Error::RequestRejected(status)
        })?;
        enter(trace, ExchangeState::RequestIssued);

        enter(trace, ExchangeState::RequestWaiting);
        match wait_for(&mut *child, &mut request_token, clock, options.request_wait_ticks) {
            Ok(WaitOutcome::Fired) => enter(trace, ExchangeState::RequestSent),
            Ok(WaitOutcome::TimedOut) => {
                enter(trace, ExchangeState::RequestTimedOut);
                warn!("request not sent in time, cancelling");
                cancel(&mut *child, &mut request_token);
                return Err(Error::RequestTimeout);
            }
            Err(status) => {
                cancel(&mut *child, &mut request_token);
                return Err(Error::ClockUnavailable(status));
            }
        }
        request_token.status().map_err(|status| {
            warn!("request completed with {}", status);
            Error::RequestFailed(status)
        })?;

        let mut buffer = PoolBuffer::allocate(pool, BODY_CAPACITY).map_err(|status| {
            warn!("allocating response buffer failed: {}", status);
            Error::OutOfResources
        })?;
        enter(trace, ExchangeState::ResponseBufferAllocated);

        let mut response_token = OperationToken::response(buffer.as_mut_slice());
        child.response(&mut response_token).map_err(|status| {
            warn!("response failed: {}", status);
            Error::ResponseRejected(status)
        })?;
        enter(trace, ExchangeState::ResponseIssued);

        enter(trace, ExchangeState::ResponseWaiting);
        match wait_for(&mut *child, &mut response_token, clock, options.response_wait_ticks) {
            Ok(WaitOutcome::Fired) => enter(trace, ExchangeState::ResponseReceived),
            Ok(WaitOutcome::TimedOut) => {
                enter(trace, ExchangeState::ResponseTimedOut);
                warn!("response not received in time, cancelling");
                cancel(&mut *child, &mut response_token);
                return Err(Error::ResponseTimeout);
            }
            Err(status) => {
                cancel(&mut *child, &mut response_token);
                return Err(Error::ClockUnavailable(status));
            }
        }
        response_token.status().map_err(|status| {
            warn!("response completed with {}", status);
            Error::ResponseFailed(status)
        })?;

        let Some(message) = response_token.response_message() else {
            warn!("receive token came back without a response message");
            return Err(Error::ResponseFailed(Status::ProtocolError));
        };

        if !message.status_code.is_success() {
            warn!("bad response status: {:?}", message.status_code);
            return Err(Error::BadStatus(message.status_code));
        }

        let overrun = Error::BodyOverrun {
            claimed: message.body_length(),
            capacity: message.capacity(),
        };
        let body = message
            .body()
            .and_then(|bytes| Vec::from_slice(bytes).ok())
            .ok_or(overrun)?;

        let response = Response {
            status: message.status_code,
            headers: message.headers.clone(),
            body,
        };
        enter(trace, ExchangeState::Done);
        Ok(response)
    }
}

impl<B, P, K> core::fmt::Debug for Client<B, P, K>
where
    B: ServiceBinding,
    P: Pool,
    K: Clock,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Client")
            .field("options", &self.options)
            .field("state", &self.state())
            .finish()
    }
}

fn enter(trace: &mut Vec<ExchangeState, MAX_TRACE>, state: ExchangeState) {
    debug!("exchange -> {:?}", state);
    trace.push(state).ok();
}

// Best-effort: a failed cancel is logged and the timeout still stands.
fn cancel<H: Http + ?Sized>(http: &mut H, token: &mut OperationToken<'_>) {
    match http.cancel(token) {
        Ok(()) => debug!("{:?} cancelled", token.kind()),
        Err(status) => warn!("cancelling {:?} failed: {}", token.kind(), status),
    }
}
