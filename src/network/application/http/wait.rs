//! The poll-driven waiter.
//!
//! Firmware offers no blocking wait for an HTTP operation, so the waiter spins:
//! pump the stack once, check the token's signal, sample the clock. Time is
//! counted in ticks, one per change of the clock's seconds field. A budget of
//! `N` ticks therefore lasts somewhere between just over `N - 1` and `N`
//! seconds, depending on where in the current second the wait starts.

use log::trace;

use super::token::OperationToken;
use crate::network::error::Status;
use crate::network::{Clock, Http, Time};

/// How a wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The token's signal fired.
    Fired,
    /// The tick budget ran out first.
    TimedOut,
}

/// Whole-second tick counter with a fixed budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineClock {
    last_second: u8,
    ticks: u32,
    max_ticks: u32,
}

impl DeadlineClock {
    /// Sample `clock` and start counting.
    pub fn start<K: Clock + ?Sized>(clock: &mut K, max_ticks: u32) -> Result<Self, Status> {
        let now = clock.now()?;
        Ok(Self::starting_at(now, max_ticks))
    }

    /// Start counting from an already sampled time.
    pub fn starting_at(time: Time, max_ticks: u32) -> Self {
        Self {
            last_second: time.second,
            ticks: 0,
            max_ticks,
        }
    }

    /// Feed a new sample. Returns `true` if it counted a tick.
    pub fn observe(&mut self, time: Time) -> bool {
        if time.second == self.last_second {
            return false;
        }
        self.last_second = time.second;
        self.ticks = self.ticks.saturating_add(1);
        true
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn max_ticks(&self) -> u32 {
        self.max_ticks
    }

    pub fn expired(&self) -> bool {
        self.ticks >= self.max_ticks
    }
}

/// Pump `http` until `token` completes or `max_ticks` ticks pass.
///
/// Fails only if the clock cannot be sampled at the start. Later clock
/// failures skip that sample, and poll failures are ignored: the pump is
/// best-effort and the deadline still bounds the wait.
pub fn wait_for<H, K>(
    http: &mut H,
    token: &mut OperationToken<'_>,
    clock: &mut K,
    max_ticks: u32,
) -> Result<WaitOutcome, Status>
where
    H: Http + ?Sized,
    K: Clock + ?Sized,
{
    let mut deadline = DeadlineClock::start(clock, max_ticks)?;

    while !deadline.expired() {
        if let Err(status) = http.poll(token) {
            trace!("poll reported {}", status);
        }

        if token.signal().has_fired() {
            return Ok(WaitOutcome::Fired);
        }

        if let Ok(now) = clock.now() {
            deadline.observe(now);
        }
    }

    Ok(WaitOutcome::TimedOut)
}

/// Host clock for targets with `std`.
#[cfg(feature = "std")]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn now(&mut self) -> Result<Time, Status> {
        let elapsed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_err(|_| Status::DeviceError)?
            .as_secs();
        Ok(Time {
            hour: ((elapsed / 3600) % 24) as u8,
            minute: ((elapsed / 60) % 60) as u8,
            second: (elapsed % 60) as u8,
        })
    }
}
