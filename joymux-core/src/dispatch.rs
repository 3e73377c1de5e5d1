//! Dispatchers: drain the event queues into the framed output.
//!
//! Each dispatcher is gated by the run status. Items that come out of a
//! queue after the device was disabled are dropped instead of written, and a
//! new session resets the per-session state before the item is judged.

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::config::{ACTION_BUTTON, BUTTON_MAP, DEBOUNCE_MS};
use crate::debounce::{slots_for, Debounce, DebouncePolicy, Debouncer};
use crate::output::{FrameSink, OutputError};
use crate::pipeline::Pipeline;
use crate::power::{GateHandle, GateState};
use crate::types::{CapturedEdge, Enqueue, Frame};

/// Debounce slots: one per code and edge.
const DEBOUNCE_SLOTS: usize = slots_for(BUTTON_MAP.len());

/// Error type for dispatch operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError {
    /// Error from the output sink. The frame is lost.
    Output(OutputError),
}

impl From<OutputError> for DispatchError {
    fn from(err: OutputError) -> Self {
        DispatchError::Output(err)
    }
}

/// What a dispatcher did with one dequeued item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dispatch {
    /// Frame written to the output.
    Sent(Frame),
    /// Dequeued after the device was disabled.
    Stale,
    /// Rejected by debounce.
    Bounced(CapturedEdge),
}

/// Forwards analog events (pointer samples and directional commands).
pub struct AnalogDispatcher<'a, M: RawMutex, O> {
    pipeline: &'a Pipeline<M>,
    gate: GateHandle<'a, M>,
    output: O,
}

impl<'a, M: RawMutex, O: FrameSink> AnalogDispatcher<'a, M, O> {
    pub fn new(pipeline: &'a Pipeline<M>, gate: GateHandle<'a, M>, output: O) -> Self {
        Self {
            pipeline,
            gate,
            output,
        }
    }

    /// Wait until enabled, take one event and write its frame.
    pub async fn process_one(&mut self) -> Result<Dispatch, DispatchError> {
        self.gate.wait_enabled().await;
        let event = self.pipeline.next_analog().await;
        if self.gate.poll() == GateState::Disabled {
            return Ok(Dispatch::Stale);
        }
        let frame = Frame::from(event);
        self.output.send(&frame).await?;
        Ok(Dispatch::Sent(frame))
    }
}

/// Outcome of a button dispatch plus whether the buzzer was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonDispatch {
    pub dispatch: Dispatch,
    /// `Some` when the item was an accepted press of the action button.
    pub buzzer: Option<Enqueue>,
}

/// Debounces button edges, forwards survivors and triggers the buzzer on
/// accepted presses of [`ACTION_BUTTON`].
pub struct ButtonDispatcher<'a, M: RawMutex, O> {
    pipeline: &'a Pipeline<M>,
    gate: GateHandle<'a, M>,
    output: O,
    debouncer: Debouncer<DEBOUNCE_SLOTS>,
}

impl<'a, M: RawMutex, O: FrameSink> ButtonDispatcher<'a, M, O> {
    pub fn new(
        pipeline: &'a Pipeline<M>,
        gate: GateHandle<'a, M>,
        output: O,
        policy: DebouncePolicy,
    ) -> Self {
        Self {
            pipeline,
            gate,
            output,
            debouncer: Debouncer::new(policy, DEBOUNCE_MS),
        }
    }

    /// Wait until enabled, take one edge, debounce it and write its frame.
    pub async fn process_one(&mut self) -> Result<ButtonDispatch, DispatchError> {
        if self.gate.wait_enabled().await {
            self.debouncer.reset();
        }
        let edge = self.pipeline.next_edge().await;
        debug_assert!(
            BUTTON_MAP.iter().any(|b| b.code == edge.event.code),
            "edge for unmapped button code"
        );
        match self.gate.poll() {
            GateState::Disabled => {
                return Ok(ButtonDispatch {
                    dispatch: Dispatch::Stale,
                    buzzer: None,
                })
            }
            GateState::Enabled { new_session: true } => self.debouncer.reset(),
            GateState::Enabled { new_session: false } => {}
        }

        if self.debouncer.check(&edge) == Debounce::Rejected {
            return Ok(ButtonDispatch {
                dispatch: Dispatch::Bounced(edge),
                buzzer: None,
            });
        }

        let buzzer = (edge.event.pressed && edge.event.code == ACTION_BUTTON)
            .then(|| self.pipeline.post_buzzer());
        let frame = Frame::Button(edge.event);
        self.output.send(&frame).await?;
        Ok(ButtonDispatch {
            dispatch: Dispatch::Sent(frame),
            buzzer,
        })
    }
}
