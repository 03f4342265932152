//! Operation tokens.
//!
//! Every asynchronous operation (one send, one receive) is described by an
//! [`OperationToken`]: what kind of operation it is, the message it carries,
//! the completion status the stack reports, and the one-shot
//! [`CompletionSignal`] that fires when the stack is done with it.
//!
//! The signal is owned by the token. There is no process-wide completion flag,
//! so two exchanges never observe each other's completions.

use core::sync::atomic::{AtomicBool, Ordering};

use heapless::Vec;

use super::client::{Header, MAX_HEADERS, Request};
use super::status::StatusCode;
use crate::network::error::Status;

/// One-shot completion notification.
///
/// Transitions from pending to fired at most once. Reading it has no side
/// effects. An atomic lets a firmware event callback fire it through a shared
/// reference.
#[derive(Debug, Default)]
pub struct CompletionSignal {
    fired: AtomicBool,
}

impl CompletionSignal {
    /// A pending signal.
    pub const fn new() -> Self {
        Self {
            fired: AtomicBool::new(false),
        }
    }

    /// Fire the signal. Returns `false` if it had already fired.
    pub fn fire(&self) -> bool {
        !self.fired.swap(true, Ordering::AcqRel)
    }

    /// Whether the signal has fired.
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }
}

/// Direction of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Sending the request.
    Request,
    /// Receiving the response.
    Response,
}

/// The receive side of an exchange: where the stack writes the response.
#[derive(Debug)]
pub struct ResponseMessage<'a> {
    /// Status ordinal reported by the stack. `Unsupported` until completion.
    pub status_code: StatusCode,
    /// Response headers reported by the stack.
    pub headers: Vec<Header, MAX_HEADERS>,
    body: &'a mut [u8],
    body_length: usize,
}

impl<'a> ResponseMessage<'a> {
    /// A receive message over `body`. The declared capacity is `body.len()`.
    pub fn new(body: &'a mut [u8]) -> Self {
        let body_length = body.len();
        Self {
            status_code: StatusCode::Unsupported,
            headers: Vec::new(),
            body,
            body_length,
        }
    }

    /// Declared capacity of the body buffer.
    pub fn capacity(&self) -> usize {
        self.body.len()
    }

    /// The body buffer, for the stack to write into.
    pub fn body_mut(&mut self) -> &mut [u8] {
        self.body
    }

    /// Number of body bytes the stack claims to have written.
    ///
    /// Equals [`capacity`](Self::capacity) until the stack reports otherwise.
    pub fn body_length(&self) -> usize {
        self.body_length
    }

    /// Report how many body bytes were written.
    pub fn set_body_length(&mut self, length: usize) {
        self.body_length = length;
    }

    /// The written part of the body, or `None` if the claimed length exceeds
    /// the capacity.
    pub fn body(&self) -> Option<&[u8]> {
        self.body.get(..self.body_length)
    }
}

/// The message attached to a token.
#[derive(Debug)]
pub enum Message<'a> {
    /// A request to send.
    Request(&'a Request<'a>),
    /// A buffer to receive into.
    Response(ResponseMessage<'a>),
}

/// Bookkeeping for one asynchronous send or receive.
#[derive(Debug)]
pub struct OperationToken<'a> {
    message: Message<'a>,
    status: Result<(), Status>,
    signal: CompletionSignal,
}

impl<'a> OperationToken<'a> {
    /// A send token carrying `request`.
    pub fn request(request: &'a Request<'a>) -> Self {
        Self::with_message(Message::Request(request))
    }

    /// A receive token writing into `body`.
    pub fn response(body: &'a mut [u8]) -> Self {
        Self::with_message(Message::Response(ResponseMessage::new(body)))
    }

    fn with_message(message: Message<'a>) -> Self {
        Self {
            message,
            status: Ok(()),
            signal: CompletionSignal::new(),
        }
    }

    pub fn kind(&self) -> OperationKind {
        match self.message {
            Message::Request(_) => OperationKind::Request,
            Message::Response(_) => OperationKind::Response,
        }
    }

    pub fn message(&self) -> &Message<'a> {
        &self.message
    }

    #[cfg(test)]
    pub(crate) fn message_mut(&mut self) -> &mut Message<'a> {
        &mut self.message
    }

    /// The request, if this is a send token.
    pub fn request_message(&self) -> Option<&Request<'a>> {
        match &self.message {
            Message::Request(request) => Some(*request),
            Message::Response(_) => None,
        }
    }

    /// The receive message, if this is a receive token.
    pub fn response_message(&self) -> Option<&ResponseMessage<'a>> {
        match &self.message {
            Message::Response(response) => Some(response),
            Message::Request(_) => None,
        }
    }

    /// The receive message, if this is a receive token.
    pub fn response_message_mut(&mut self) -> Option<&mut ResponseMessage<'a>> {
        match &mut self.message {
            Message::Response(response) => Some(response),
            Message::Request(_) => None,
        }
    }

    /// Record the completion status and fire the signal.
    ///
    /// Only the first completion counts; later calls are ignored and return `false`.
    pub fn complete(&mut self, status: Result<(), Status>) -> bool {
        if self.signal.has_fired() {
            return false;
        }
        self.status = status;
        self.signal.fire()
    }

    /// Completion status reported by the stack.
    pub fn status(&self) -> Result<(), Status> {
        self.status
    }

    pub fn signal(&self) -> &CompletionSignal {
        &self.signal
    }
}
