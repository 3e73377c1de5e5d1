//! Shared context owning every queue, the toggle signal and the run status.
//!
//! Built once at startup (in a `StaticCell` on the device) and handed to
//! every task by reference. Producers only use the non-blocking `post_*`
//! calls and [`Pipeline::request_toggle`], so they are safe from edge
//! handlers running on a higher-priority executor.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use embassy_sync::watch::Watch;

use crate::config::{ANALOG_QUEUE_DEPTH, BUTTON_QUEUE_DEPTH, BUZZER_QUEUE_DEPTH};
use crate::power::{GateHandle, PowerStatus};
use crate::types::{AnalogEvent, BuzzerTrigger, CapturedEdge, Enqueue};

/// Tasks that follow the run status: three samplers, two dispatchers and
/// the button edge handler.
pub const GATE_SUBSCRIBERS: usize = 6;

pub struct Pipeline<M: RawMutex> {
    analog: Channel<M, AnalogEvent, ANALOG_QUEUE_DEPTH>,
    buttons: Channel<M, CapturedEdge, BUTTON_QUEUE_DEPTH>,
    buzzer: Channel<M, BuzzerTrigger, BUZZER_QUEUE_DEPTH>,
    toggle: Signal<M, u64>,
    status: Watch<M, PowerStatus, GATE_SUBSCRIBERS>,
}

impl<M: RawMutex> Default for Pipeline<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> Pipeline<M> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            analog: Channel::new(),
            buttons: Channel::new(),
            buzzer: Channel::new(),
            toggle: Signal::new(),
            status: Watch::new(),
        }
    }

    pub fn post_analog(&self, event: AnalogEvent) -> Enqueue {
        enqueue(self.analog.try_send(event).is_ok())
    }

    pub fn post_edge(&self, edge: CapturedEdge) -> Enqueue {
        enqueue(self.buttons.try_send(edge).is_ok())
    }

    pub fn post_buzzer(&self) -> Enqueue {
        enqueue(self.buzzer.try_send(BuzzerTrigger).is_ok())
    }

    /// Signal a power toggle captured at `at_ms`. An unread toggle is
    /// replaced by the newer one.
    pub fn request_toggle(&self, at_ms: u64) {
        self.toggle.signal(at_ms);
    }

    pub async fn next_analog(&self) -> AnalogEvent {
        self.analog.receive().await
    }

    pub async fn next_edge(&self) -> CapturedEdge {
        self.buttons.receive().await
    }

    pub async fn next_buzzer(&self) -> BuzzerTrigger {
        self.buzzer.receive().await
    }

    /// Wait for a toggle request and return its capture time.
    pub async fn next_toggle(&self) -> u64 {
        self.toggle.wait().await
    }

    /// Drop everything still queued.
    pub fn clear_queues(&self) {
        self.analog.clear();
        self.buttons.clear();
        self.buzzer.clear();
    }

    #[must_use]
    pub fn analog_len(&self) -> usize {
        self.analog.len()
    }

    #[must_use]
    pub fn button_len(&self) -> usize {
        self.buttons.len()
    }

    #[must_use]
    pub fn buzzer_len(&self) -> usize {
        self.buzzer.len()
    }

    /// Publish a new run status. Only the power controller calls this.
    pub fn publish(&self, status: PowerStatus) {
        self.status.sender().send(status);
    }

    /// Last published status, `None` before the controller started.
    #[must_use]
    pub fn status(&self) -> Option<PowerStatus> {
        self.status.try_get()
    }

    /// A handle for a gated task. `None` once [`GATE_SUBSCRIBERS`] handles exist.
    pub fn subscribe(&self) -> Option<GateHandle<'_, M>> {
        self.status.receiver().map(GateHandle::new)
    }
}

fn enqueue(sent: bool) -> Enqueue {
    if sent {
        Enqueue::Queued
    } else {
        Enqueue::Dropped
    }
}
