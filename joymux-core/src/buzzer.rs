//! Buzzer task body: one tone per trigger token.

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::output::Actuator;
use crate::pipeline::Pipeline;

/// Sounds the actuator for every [`BuzzerTrigger`](crate::types::BuzzerTrigger).
///
/// Tones never overlap; triggers that arrive while one plays wait in the
/// buzzer queue.
pub struct Buzzer<'a, M: RawMutex, A> {
    pipeline: &'a Pipeline<M>,
    actuator: A,
}

impl<'a, M: RawMutex, A: Actuator> Buzzer<'a, M, A> {
    pub fn new(pipeline: &'a Pipeline<M>, actuator: A) -> Self {
        Self { pipeline, actuator }
    }

    /// Wait for a trigger and play one tone.
    pub async fn process_one(&mut self) {
        self.pipeline.next_buzzer().await;
        self.actuator.sound().await;
    }

    pub async fn run(&mut self) -> ! {
        loop {
            self.process_one().await;
        }
    }
}
