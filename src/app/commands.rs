//! Inbound commands to the controller.
//!
//! These represent user actions forwarded by the presentation layer that
//! [`ControllerCore::handle_command`](super::service::ControllerCore::handle_command)
//! interprets and acts upon.

/// Commands the presentation layer can send into the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Full control request: setpoint plus the date and time to simulate.
    StartCycle {
        setpoint: f64,
        date: String,
        time: String,
    },

    /// New setpoint at the currently selected date and time.
    Retarget(f64),

    /// Change the selected date and time without running a cycle.
    SetDateTime { date: String, time: String },

    /// Abandon the running cycle, if any.
    CancelCycle,
}
