//! Button edge capture.
//!
//! Watches every mapped input for the edge opposite to its last reported
//! state (falling while released, rising while pressed; inputs are active
//! low), stamps the edge and queues it without blocking. Runs on the
//! high-priority executor on the device.

use embassy_futures::select::select_array;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::digital::Wait;

use crate::config::BUTTON_MAP;
use crate::input::Clock;
use crate::pipeline::Pipeline;
use crate::power::{GateHandle, GateState};
use crate::types::{ButtonCode, ButtonEvent, CapturedEdge, Enqueue};

/// Logical code wired to `gpio`, if any.
#[must_use]
pub fn code_for_gpio(gpio: u8) -> Option<ButtonCode> {
    BUTTON_MAP
        .iter()
        .find(|binding| binding.gpio == gpio)
        .map(|binding| binding.code)
}

/// What happened to one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Capture {
    Queued(CapturedEdge),
    /// Button queue full.
    Dropped(CapturedEdge),
    /// Device disabled; edge ignored.
    Disabled,
    /// Waiting on a pin failed.
    PinError,
}

/// An input pin, the code it reports and its last reported state.
///
/// Inputs start released (pulled up).
pub struct ButtonInput<P> {
    code: ButtonCode,
    pin: P,
    pressed: bool,
}

impl<P> ButtonInput<P> {
    pub fn new(code: ButtonCode, pin: P) -> Self {
        Self {
            code,
            pin,
            pressed: false,
        }
    }
}

impl<P: Wait> ButtonInput<P> {
    /// Wait for the edge that leaves the current state.
    async fn next_edge(&mut self) -> Result<(), P::Error> {
        if self.pressed {
            self.pin.wait_for_rising_edge().await
        } else {
            self.pin.wait_for_falling_edge().await
        }
    }
}

/// Edge handler for a set of `N` button inputs.
pub struct EdgeCapture<'a, M: RawMutex, P, C, const N: usize> {
    pipeline: &'a Pipeline<M>,
    gate: GateHandle<'a, M>,
    inputs: [ButtonInput<P>; N],
    clock: C,
}

impl<'a, M, P, C, const N: usize> EdgeCapture<'a, M, P, C, N>
where
    M: RawMutex,
    P: Wait,
    C: Clock,
{
    pub fn new(
        pipeline: &'a Pipeline<M>,
        gate: GateHandle<'a, M>,
        inputs: [ButtonInput<P>; N],
        clock: C,
    ) -> Self {
        Self {
            pipeline,
            gate,
            inputs,
            clock,
        }
    }

    /// Wait for an edge on any input and handle it.
    pub async fn process_one(&mut self) -> Capture {
        let (result, index) =
            select_array(self.inputs.each_mut().map(|input| input.next_edge())).await;
        if result.is_err() {
            return Capture::PinError;
        }
        self.on_edge(index)
    }

    /// Handle the awaited edge on input `index` and queue the event.
    ///
    /// The event follows the edge, not the level after it. State is tracked
    /// while disabled so the next enabled edge is classified correctly.
    pub fn on_edge(&mut self, index: usize) -> Capture {
        let input = &mut self.inputs[index];
        input.pressed = !input.pressed;
        let event = ButtonEvent::new(input.code, input.pressed);
        if self.gate.poll() == GateState::Disabled {
            return Capture::Disabled;
        }
        let edge = CapturedEdge::new(event, self.clock.now_ms());
        match self.pipeline.post_edge(edge) {
            Enqueue::Queued => Capture::Queued(edge),
            Enqueue::Dropped => Capture::Dropped(edge),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BUTTON_QUEUE_DEPTH, DEFAULT_DWELL};
    use crate::power::PowerController;
    use crate::testutil::{block_on, Edge, FixedClock, MockIndicator, MockPin};
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    fn enabled(pipeline: &Pipeline<NoopRawMutex>) -> PowerController<'_, NoopRawMutex, MockIndicator> {
        let mut controller = PowerController::new(pipeline, MockIndicator::new(), DEFAULT_DWELL);
        controller.handle_toggle(0);
        controller
    }

    #[test]
    fn test_code_lookup() {
        assert_eq!(code_for_gpio(16), Some(ButtonCode::JUMP));
        assert_eq!(code_for_gpio(18), Some(ButtonCode::FIRE));
        assert_eq!(code_for_gpio(20), Some(ButtonCode::INTERACT));
        assert_eq!(code_for_gpio(14), None);
    }

    #[test]
    fn test_disabled_device_ignores_edges() {
        let pipeline = Pipeline::<NoopRawMutex>::new();
        let _controller = PowerController::new(&pipeline, MockIndicator::new(), DEFAULT_DWELL);
        let gate = pipeline.subscribe().unwrap();
        let inputs = [ButtonInput::new(ButtonCode::FIRE, MockPin::new())];
        let mut capture = EdgeCapture::new(&pipeline, gate, inputs, FixedClock::new(10));

        assert_eq!(block_on(capture.process_one()), Capture::Disabled);
        assert_eq!(pipeline.button_len(), 0);
    }

    #[test]
    fn test_waits_for_opposite_edge_and_alternates() {
        let pipeline = Pipeline::<NoopRawMutex>::new();
        let _controller = enabled(&pipeline);
        let pin = MockPin::new();
        let waits = pin.waits();
        let inputs = [ButtonInput::new(ButtonCode::JUMP, pin)];
        let mut capture =
            EdgeCapture::new(&pipeline, pipeline.subscribe().unwrap(), inputs, FixedClock::new(42));

        let events: [Capture; 3] = core::array::from_fn(|_| block_on(capture.process_one()));
        assert_eq!(
            events,
            [
                Capture::Queued(CapturedEdge::new(ButtonEvent::press(ButtonCode::JUMP), 42)),
                Capture::Queued(CapturedEdge::new(ButtonEvent::release(ButtonCode::JUMP), 42)),
                Capture::Queued(CapturedEdge::new(ButtonEvent::press(ButtonCode::JUMP), 42)),
            ]
        );
        assert_eq!(*waits.borrow(), [Edge::Falling, Edge::Rising, Edge::Falling]);
    }

    #[test]
    fn test_inputs_track_state_independently() {
        let pipeline = Pipeline::<NoopRawMutex>::new();
        let _controller = enabled(&pipeline);
        let inputs = [
            ButtonInput::new(ButtonCode::JUMP, MockPin::new()),
            ButtonInput::new(ButtonCode::RELOAD, MockPin::new()),
        ];
        let mut capture =
            EdgeCapture::new(&pipeline, pipeline.subscribe().unwrap(), inputs, FixedClock::new(7));

        assert_eq!(
            capture.on_edge(0),
            Capture::Queued(CapturedEdge::new(ButtonEvent::press(ButtonCode::JUMP), 7))
        );
        assert_eq!(
            capture.on_edge(1),
            Capture::Queued(CapturedEdge::new(ButtonEvent::press(ButtonCode::RELOAD), 7))
        );
        assert_eq!(
            capture.on_edge(0),
            Capture::Queued(CapturedEdge::new(ButtonEvent::release(ButtonCode::JUMP), 7))
        );
    }

    #[test]
    fn test_state_tracked_while_disabled() {
        let pipeline = Pipeline::<NoopRawMutex>::new();
        let mut controller = PowerController::new(&pipeline, MockIndicator::new(), DEFAULT_DWELL);
        let inputs = [ButtonInput::new(ButtonCode::SPRINT, MockPin::new())];
        let mut capture =
            EdgeCapture::new(&pipeline, pipeline.subscribe().unwrap(), inputs, FixedClock::new(0));

        // Held down before the device was enabled
        assert_eq!(capture.on_edge(0), Capture::Disabled);
        controller.handle_toggle(0);
        assert_eq!(
            capture.on_edge(0),
            Capture::Queued(CapturedEdge::new(ButtonEvent::release(ButtonCode::SPRINT), 0))
        );
    }

    #[test]
    fn test_full_queue_drops_edge() {
        let pipeline = Pipeline::<NoopRawMutex>::new();
        let _controller = enabled(&pipeline);
        let gate = pipeline.subscribe().unwrap();
        let inputs = [ButtonInput::new(ButtonCode::SPRINT, MockPin::new())];
        let mut capture = EdgeCapture::new(&pipeline, gate, inputs, FixedClock::new(0));

        for _ in 0..BUTTON_QUEUE_DEPTH {
            assert!(matches!(capture.on_edge(0), Capture::Queued(_)));
        }
        assert!(matches!(capture.on_edge(0), Capture::Dropped(_)));
    }
}
