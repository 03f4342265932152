//! Scripted fake firmware stack shared by the integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use efifetch::network::application::http::{
    Client, ExchangeConfig, Header, OperationKind, OperationToken, StatusCode,
};
use efifetch::network::error::{AcquireError, Status};
use efifetch::network::{Clock, Controllers, Discover, Http, Pool, ServiceBinding, Time};

/// Calls observed by the fake stack, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    CreateChild(u32),
    DestroyChild,
    Configure,
    Request,
    Response,
    Cancel(OperationKind),
    Poll(OperationKind),
    Allocate(usize),
    Free,
}

/// Resource accounting across one or more exchanges.
#[derive(Debug, Default)]
pub struct Ledger {
    pub acquired: usize,
    pub released: usize,
    pub allocated: usize,
    pub freed: usize,
    pub calls: Vec<Call>,
    /// Receive capacities declared on issued response tokens.
    pub capacities: Vec<usize>,
    /// Sizes of the buffers the pool actually handed out.
    pub allocation_sizes: Vec<usize>,
}

impl Ledger {
    pub fn balanced(&self) -> bool {
        self.acquired == self.released && self.allocated == self.freed
    }

    pub fn cancels(&self) -> Vec<OperationKind> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Cancel(kind) => Some(*kind),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: Call) -> usize {
        self.calls.iter().filter(|call| **call == wanted).count()
    }
}

/// What the fake stack does at each step.
#[derive(Debug, Clone)]
pub struct Script {
    pub create_child: Result<(), AcquireError>,
    pub destroy_child: Result<(), Status>,
    pub configure: Result<(), Status>,
    pub request: Result<(), Status>,
    /// Poll on which the send completes; `None` never completes it.
    pub request_fires_on_poll: Option<u32>,
    pub request_status: Result<(), Status>,
    pub allocate: Result<(), Status>,
    /// Extra bytes the pool adds to every allocation.
    pub pool_slack: usize,
    pub response: Result<(), Status>,
    pub response_fires_on_poll: Option<u32>,
    pub response_status: Result<(), Status>,
    pub status_code: StatusCode,
    pub body: Vec<u8>,
    /// Body length the stack reports instead of the bytes it wrote.
    pub claimed_length: Option<usize>,
    pub headers: Vec<(&'static str, &'static str)>,
    pub cancel: Result<(), Status>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            create_child: Ok(()),
            destroy_child: Ok(()),
            configure: Ok(()),
            request: Ok(()),
            request_fires_on_poll: Some(1),
            request_status: Ok(()),
            allocate: Ok(()),
            pool_slack: 0,
            response: Ok(()),
            response_fires_on_poll: Some(1),
            response_status: Ok(()),
            status_code: StatusCode::SUCCESS,
            body: b"hello".to_vec(),
            claimed_length: None,
            headers: Vec::new(),
            cancel: Ok(()),
        }
    }
}

pub type Shared = Rc<RefCell<Ledger>>;

#[derive(Debug)]
pub struct FakeBinding {
    ledger: Shared,
    script: Rc<Script>,
}

impl ServiceBinding for FakeBinding {
    type Controller = u32;
    type Child = FakeHttp;

    fn create_child(&mut self, controller: u32) -> Result<FakeHttp, AcquireError> {
        let mut ledger = self.ledger.borrow_mut();
        ledger.calls.push(Call::CreateChild(controller));
        self.script.create_child?;
        ledger.acquired += 1;
        Ok(FakeHttp {
            ledger: self.ledger.clone(),
            script: self.script.clone(),
            polls: 0,
        })
    }

    fn destroy_child(&mut self, _child: FakeHttp) -> Result<(), Status> {
        let mut ledger = self.ledger.borrow_mut();
        ledger.calls.push(Call::DestroyChild);
        ledger.released += 1;
        self.script.destroy_child
    }
}

#[derive(Debug)]
pub struct FakeHttp {
    ledger: Shared,
    script: Rc<Script>,
    polls: u32,
}

impl FakeHttp {
    fn fill_response(&self, token: &mut OperationToken<'_>) {
        let script = &self.script;
        if let Some(message) = token.response_message_mut() {
            let written = script.body.len().min(message.capacity());
            message.body_mut()[..written].copy_from_slice(&script.body[..written]);
            message.set_body_length(script.claimed_length.unwrap_or(written));
            message.status_code = script.status_code;
            for (name, value) in &script.headers {
                let header = Header::new(name, value).expect("header fits");
                message.headers.push(header).expect("header table has room");
            }
        }
    }
}

impl Http for FakeHttp {
    fn configure(&mut self, _config: &ExchangeConfig) -> Result<(), Status> {
        self.ledger.borrow_mut().calls.push(Call::Configure);
        self.script.configure
    }

    fn request(&mut self, _token: &mut OperationToken<'_>) -> Result<(), Status> {
        self.ledger.borrow_mut().calls.push(Call::Request);
        self.polls = 0;
        self.script.request
    }

    fn response(&mut self, token: &mut OperationToken<'_>) -> Result<(), Status> {
        let mut ledger = self.ledger.borrow_mut();
        ledger.calls.push(Call::Response);
        if let Some(message) = token.response_message() {
            ledger.capacities.push(message.capacity());
        }
        self.polls = 0;
        self.script.response
    }

    fn cancel(&mut self, token: &mut OperationToken<'_>) -> Result<(), Status> {
        self.ledger
            .borrow_mut()
            .calls
            .push(Call::Cancel(token.kind()));
        self.script.cancel
    }

    fn poll(&mut self, token: &mut OperationToken<'_>) -> Result<(), Status> {
        let kind = token.kind();
        self.ledger.borrow_mut().calls.push(Call::Poll(kind));
        self.polls += 1;

        let (fires_on, status) = match kind {
            OperationKind::Request => (self.script.request_fires_on_poll, self.script.request_status),
            OperationKind::Response => {
                (self.script.response_fires_on_poll, self.script.response_status)
            }
        };
        if fires_on.is_some_and(|poll| self.polls >= poll) && !token.signal().has_fired() {
            if kind == OperationKind::Response {
                self.fill_response(token);
            }
            token.complete(status);
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct FakePool {
    ledger: Shared,
    script: Rc<Script>,
}

impl Pool for FakePool {
    type Buffer = Vec<u8>;

    fn allocate(&mut self, size: usize) -> Result<Vec<u8>, Status> {
        let mut ledger = self.ledger.borrow_mut();
        ledger.calls.push(Call::Allocate(size));
        self.script.allocate?;
        ledger.allocated += 1;
        let actual = size + self.script.pool_slack;
        ledger.allocation_sizes.push(actual);
        Ok(vec![0xAA; actual])
    }

    fn free(&mut self, _buffer: Vec<u8>) {
        let mut ledger = self.ledger.borrow_mut();
        ledger.calls.push(Call::Free);
        ledger.freed += 1;
    }
}

/// A clock whose seconds field advances every `calls_per_second` samples.
#[derive(Debug)]
pub struct TickingClock {
    calls: u32,
    calls_per_second: u32,
    second: u8,
    /// Samples that fail instead of returning a time: every `fail_every`th call.
    fail_every: Option<u32>,
    /// Times the returned seconds field differed from the previous sample.
    pub crossings: Rc<RefCell<u32>>,
    last_returned: Option<u8>,
}

impl TickingClock {
    pub fn new(calls_per_second: u32) -> Self {
        Self {
            calls: 0,
            calls_per_second: calls_per_second.max(1),
            second: 0,
            fail_every: None,
            crossings: Rc::new(RefCell::new(0)),
            last_returned: None,
        }
    }

    pub fn failing_every(mut self, calls: u32) -> Self {
        self.fail_every = Some(calls);
        self
    }
}

impl Clock for TickingClock {
    fn now(&mut self) -> Result<Time, Status> {
        self.calls += 1;
        if self.calls % self.calls_per_second == 0 {
            self.second = (self.second + 1) % 60;
        }
        if self.fail_every.is_some_and(|n| self.calls % n == 0) {
            return Err(Status::DeviceError);
        }
        if self.last_returned.is_some_and(|last| last != self.second) {
            *self.crossings.borrow_mut() += 1;
        }
        self.last_returned = Some(self.second);
        Ok(Time {
            second: self.second,
            ..Time::default()
        })
    }
}

/// A clock that cannot be read.
#[derive(Debug)]
pub struct BrokenClock;

impl Clock for BrokenClock {
    fn now(&mut self) -> Result<Time, Status> {
        Err(Status::DeviceError)
    }
}

#[derive(Debug)]
pub struct FakeDiscovery {
    pub controllers: Vec<u32>,
    pub error: Option<Status>,
}

impl FakeDiscovery {
    pub fn with(controllers: &[u32]) -> Self {
        Self {
            controllers: controllers.to_vec(),
            error: None,
        }
    }
}

impl Discover for FakeDiscovery {
    type Controller = u32;

    fn controllers(&mut self) -> Result<Controllers<u32>, Status> {
        if let Some(status) = self.error {
            return Err(status);
        }
        Ok(Controllers::from_slice(&self.controllers).expect("controller list fits"))
    }
}

pub type FakeClient<K = TickingClock> = Client<FakeBinding, FakePool, K>;

/// A client over a fake stack running `script`, and the ledger it reports to.
pub fn client(script: Script) -> (FakeClient, Shared) {
    client_with_clock(script, TickingClock::new(3))
}

pub fn client_with_clock<K: Clock>(script: Script, clock: K) -> (FakeClient<K>, Shared) {
    let (binding, ledger) = binding(script);
    let pool = FakePool {
        ledger: ledger.clone(),
        script: binding.script.clone(),
    };
    (Client::new(binding, pool, clock), ledger)
}

/// A fake service binding alone, for clients built over another pool.
pub fn binding(script: Script) -> (FakeBinding, Shared) {
    let ledger: Shared = Rc::new(RefCell::new(Ledger::default()));
    let binding = FakeBinding {
        ledger: ledger.clone(),
        script: Rc::new(script),
    };
    (binding, ledger)
}
