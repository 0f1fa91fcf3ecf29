//! Pure control logic: mode decision, fan selection and the thermal step.
//!
//! Nothing in here touches time, threads or shared state.  The background
//! tasks in [`crate::tasks`] compose these pieces into a running cycle.

pub mod fan;
pub mod mode;
pub mod thermal;
