//! Application core: the controller and its hexagonal boundary.
//!
//! [`service::ControllerCore`] turns control requests into cycles and
//! answers snapshot queries.  Outdoor data and event delivery reach it
//! through the **port traits** in [`ports`], so the whole controller is
//! testable with in-memory adapters.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
pub mod views;
