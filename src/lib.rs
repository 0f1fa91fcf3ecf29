//! ZoneHVAC simulation and control core.
//!
//! Decides a heating/cooling mode from a setpoint and an hourly outdoor
//! reading, drives a furnace or air conditioner through a discrete-time
//! thermal model on a background worker, and republishes the result to
//! nine zones.  A presentation layer polls the snapshot views on
//! [`app::service::ControllerCore`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod outdoor;
pub mod tasks;
pub mod zones;
