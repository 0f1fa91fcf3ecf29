//! Zone fan-out task.
//!
//! `Active -> Stopped`.  Each tick copies the latest published temperature
//! into every zone.  The poller has no exit condition of its own: it stops
//! when the actuator raises the stop signal, after one last fan-out so the
//! zones show the final temperature.

use futures_lite::future;
use log::info;

use super::channels::{CycleSignals, PlantChannels};
use super::tick::Tick;

enum Wake {
    Tick,
    Stop,
}

pub struct PollerTask;

impl PollerTask {
    /// Run until stopped.  Returns the number of fan-outs performed.
    pub async fn run<T: Tick>(mut tick: T, plant: &PlantChannels, signals: &CycleSignals) -> u32 {
        info!("Poller: Active");
        let mut polls: u32 = 0;
        loop {
            plant.fan_out();
            polls = polls.saturating_add(1);

            let wake = future::or(
                async {
                    tick.next().await;
                    Wake::Tick
                },
                async {
                    signals.stop.wait().await;
                    Wake::Stop
                },
            )
            .await;
            if matches!(wake, Wake::Stop) {
                break;
            }
        }
        let last = plant.fan_out();
        info!("Poller: Active -> Stopped after {} polls ({:.2})", polls, last);
        polls
    }
}
