//! Periodic tick abstraction.
//!
//! Cycle tasks never sleep directly; they await a [`Tick`] obtained from a
//! [`Clock`].  [`ReactorClock`] maps a period to real wall time through the
//! `embassy-time` std driver.  [`InstantClock`] only yields, so a full cycle
//! runs as fast as the CPU allows (tests, batch simulation).

use core::time::Duration;

use futures_lite::future;

/// A source of periodic wake-ups.
pub trait Tick {
    /// Resolve at the next period boundary.
    fn next(&mut self) -> impl Future<Output = ()>;
}

/// Factory for [`Tick`]s.  Cloned into every cycle worker.
pub trait Clock: Clone + Send + 'static {
    type Tick: Tick;

    fn ticker(&self, period: Duration) -> Self::Tick;
}

// ───────────────────────────────────────────────────────────────
// Real time
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct ReactorClock;

pub struct ReactorTick(embassy_time::Ticker);

impl Tick for ReactorTick {
    fn next(&mut self) -> impl Future<Output = ()> {
        self.0.next()
    }
}

impl Clock for ReactorClock {
    type Tick = ReactorTick;

    fn ticker(&self, period: Duration) -> ReactorTick {
        let micros = u64::try_from(period.as_micros()).unwrap_or(u64::MAX);
        ReactorTick(embassy_time::Ticker::every(
            embassy_time::Duration::from_micros(micros.max(1)),
        ))
    }
}

// ───────────────────────────────────────────────────────────────
// Simulated time
// ───────────────────────────────────────────────────────────────

/// Ignores the period: every tick is a single cooperative yield.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantClock;

pub struct InstantTick;

impl Tick for InstantTick {
    fn next(&mut self) -> impl Future<Output = ()> {
        future::yield_now()
    }
}

impl Clock for InstantClock {
    type Tick = InstantTick;

    fn ticker(&self, _period: Duration) -> InstantTick {
        InstantTick
    }
}
