//! Power lifecycle: dwell-guarded toggle, run status publication and the
//! gate every sampling and dispatch task waits on.
//!
//! The device starts disabled. A toggle is honored only when enough time has
//! passed since the last honored one; the first toggle is always honored.
//! Enabling clears stale queue contents and starts a new session, so tasks
//! re-prime their windows and forget debounce history.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::watch::Receiver;
use embedded_hal::digital::OutputPin;
use embedded_hal_async::digital::Wait;

use crate::input::Clock;
use crate::pipeline::{Pipeline, GATE_SUBSCRIBERS};

/// Minimum time to stay in a state before leaving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DwellPolicy {
    /// Dwell required before enabling.
    pub enable_ms: u64,
    /// Dwell required before disabling.
    pub disable_ms: u64,
}

impl DwellPolicy {
    #[must_use]
    pub const fn symmetric(ms: u64) -> Self {
        Self {
            enable_ms: ms,
            disable_ms: ms,
        }
    }

    const fn required(&self, enabling: bool) -> u64 {
        if enabling {
            self.enable_ms
        } else {
            self.disable_ms
        }
    }
}

/// Result of a toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ToggleOutcome {
    Enabled,
    Disabled,
    /// Inside the dwell window; nothing changed.
    Ignored,
}

/// Enabled flag plus the time of the last honored transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerState {
    enabled: bool,
    last_transition: Option<u64>,
}

impl PowerState {
    /// Disabled, no transition yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            enabled: false,
            last_transition: None,
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub const fn last_transition(&self) -> Option<u64> {
        self.last_transition
    }

    /// Apply a toggle captured at `now_ms` under `policy`.
    pub fn toggle(&mut self, now_ms: u64, policy: &DwellPolicy) -> ToggleOutcome {
        let enabling = !self.enabled;
        if let Some(last) = self.last_transition {
            if now_ms.saturating_sub(last) < policy.required(enabling) {
                return ToggleOutcome::Ignored;
            }
        }
        self.enabled = enabling;
        self.last_transition = Some(now_ms);
        if enabling {
            ToggleOutcome::Enabled
        } else {
            ToggleOutcome::Disabled
        }
    }
}

/// What the controller publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerStatus {
    pub enabled: bool,
    /// Incremented on every enable.
    pub session: u32,
}

impl PowerStatus {
    pub const DISABLED: Self = Self {
        enabled: false,
        session: 0,
    };
}

/// Run status as seen by one gated task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GateState {
    Disabled,
    /// `new_session` is set the first time a task observes a session.
    Enabled { new_session: bool },
}

/// A gated task's view of the run status.
pub struct GateHandle<'a, M: RawMutex> {
    rx: Receiver<'a, M, PowerStatus, GATE_SUBSCRIBERS>,
    session: Option<u32>,
}

impl<'a, M: RawMutex> GateHandle<'a, M> {
    pub(crate) fn new(rx: Receiver<'a, M, PowerStatus, GATE_SUBSCRIBERS>) -> Self {
        Self { rx, session: None }
    }

    /// Park until the device is enabled.
    ///
    /// Returns `true` when this is the first look at the current session,
    /// meaning per-session state must be reset.
    pub async fn wait_enabled(&mut self) -> bool {
        let status = self.rx.get_and(|s| s.enabled).await;
        self.observe(status) == GateState::Enabled { new_session: true }
    }

    /// Current status without waiting.
    pub fn poll(&mut self) -> GateState {
        match self.rx.try_get() {
            Some(status) => self.observe(status),
            None => GateState::Disabled,
        }
    }

    fn observe(&mut self, status: PowerStatus) -> GateState {
        if !status.enabled {
            return GateState::Disabled;
        }
        let new_session = self.session != Some(status.session);
        self.session = Some(status.session);
        GateState::Enabled { new_session }
    }
}

/// Owns the power state and the indicator; the only publisher of run status.
pub struct PowerController<'a, M: RawMutex, L> {
    pipeline: &'a Pipeline<M>,
    indicator: L,
    policy: DwellPolicy,
    state: PowerState,
    session: u32,
}

impl<'a, M: RawMutex, L: OutputPin> PowerController<'a, M, L> {
    /// Publish the disabled status and turn the indicator off.
    pub fn new(pipeline: &'a Pipeline<M>, mut indicator: L, policy: DwellPolicy) -> Self {
        pipeline.publish(PowerStatus::DISABLED);
        let _ = indicator.set_low();
        Self {
            pipeline,
            indicator,
            policy,
            state: PowerState::new(),
            session: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> PowerState {
        self.state
    }

    #[must_use]
    pub fn session(&self) -> u32 {
        self.session
    }

    /// Apply a toggle captured at `at_ms`.
    pub fn handle_toggle(&mut self, at_ms: u64) -> ToggleOutcome {
        let outcome = self.state.toggle(at_ms, &self.policy);
        match outcome {
            ToggleOutcome::Enabled => {
                self.pipeline.clear_queues();
                self.session = self.session.wrapping_add(1);
                self.pipeline.publish(PowerStatus {
                    enabled: true,
                    session: self.session,
                });
                let _ = self.indicator.set_high();
            }
            ToggleOutcome::Disabled => {
                self.pipeline.publish(PowerStatus {
                    enabled: false,
                    session: self.session,
                });
                let _ = self.indicator.set_low();
                self.pipeline.clear_queues();
            }
            ToggleOutcome::Ignored => {}
        }
        outcome
    }

    /// Wait for the next toggle request and apply it.
    pub async fn process_one(&mut self) -> (u64, ToggleOutcome) {
        let at_ms = self.pipeline.next_toggle().await;
        (at_ms, self.handle_toggle(at_ms))
    }
}

/// Edge handler of the power button: signals a toggle on every falling edge.
pub struct PowerButton<'a, M: RawMutex, P, C> {
    pipeline: &'a Pipeline<M>,
    pin: P,
    clock: C,
}

impl<'a, M: RawMutex, P: Wait, C: Clock> PowerButton<'a, M, P, C> {
    pub fn new(pipeline: &'a Pipeline<M>, pin: P, clock: C) -> Self {
        Self {
            pipeline,
            pin,
            clock,
        }
    }

    /// Wait for one press and signal it. Returns the capture time.
    pub async fn process_one(&mut self) -> Result<u64, P::Error> {
        self.pin.wait_for_falling_edge().await?;
        let at_ms = self.clock.now_ms();
        self.pipeline.request_toggle(at_ms);
        Ok(at_ms)
    }
}
