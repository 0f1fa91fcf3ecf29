//! Background execution of a control cycle.
//!
//! One cycle is an [`ActuatorTask`](actuator::ActuatorTask) and a
//! [`PollerTask`](poller::PollerTask) running side by side on a dedicated
//! worker thread.  They communicate only through the latest-value cells
//! and signals in [`channels`]:
//!
//! ```text
//!                 reading (temp, status, energy)
//! ┌──────────┐ ───────────────────────────────▶ ┌──────────┐ ── zones ──▶ snapshot
//! │ Actuator │                                  │  Poller  │             accessors
//! └──────────┘ ───────────── stop ────────────▶ └──────────┘
//!      ▲
//!      └── cancel (from the controller)
//! ```

pub mod actuator;
pub mod channels;
pub mod cycle;
pub mod poller;
pub mod tick;
