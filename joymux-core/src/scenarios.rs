//! End-to-end runs through sampler, edge capture, power control and
//! dispatch with mock collaborators.

extern crate std;

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use joymux_proto::{AxisId, ButtonCode, Frame, FrameDecoder};
use std::vec::Vec;

use crate::button::{ButtonInput, EdgeCapture};
use crate::config::{DEFAULT_DWELL, POINTER_X};
use crate::debounce::DebouncePolicy;
use crate::dispatch::{AnalogDispatcher, ButtonDispatcher};
use crate::input::InputError;
use crate::pipeline::Pipeline;
use crate::power::{PowerButton, PowerController, ToggleOutcome};
use crate::sampler::AxisSampler;
use crate::testutil::{block_on, FixedClock, MockIndicator, MockPin, RecordingSink, ScriptedSource};

fn decode(bytes: &[u8]) -> Vec<Frame> {
    let mut decoder = FrameDecoder::new();
    let mut frames = Vec::new();
    decoder.push_slice(bytes, |f| frames.push(f));
    frames
}

/// Sample `readings` on X, queue what is emitted and drain the queue.
fn run_pointer_x(readings: &[u16]) -> Vec<Frame> {
    let pipeline = Pipeline::<NoopRawMutex>::new();
    let mut controller = PowerController::new(&pipeline, MockIndicator::new(), DEFAULT_DWELL);
    controller.handle_toggle(0);
    let sink = RecordingSink::new();
    let mut dispatcher =
        AnalogDispatcher::new(&pipeline, pipeline.subscribe().unwrap(), sink.clone());

    let results: Vec<Result<u16, InputError>> = readings.iter().map(|&r| Ok(r)).collect();
    let mut source = ScriptedSource::new(&results);
    let mut sampler = AxisSampler::new(&POINTER_X);
    for _ in readings {
        if let Some(event) = block_on(sampler.sample(&mut source)).unwrap() {
            pipeline.post_analog(event);
        }
        while pipeline.analog_len() > 0 {
            block_on(dispatcher.process_one()).unwrap();
        }
    }
    decode(&sink.bytes())
}

#[test]
fn test_centered_stick_sends_nothing() {
    assert!(run_pointer_x(&[2048; 10]).is_empty());
}

#[test]
fn test_ramp_reports_growing_deflection() {
    let mut readings: Vec<u16> = (0..=18).map(|i| 2048 + i * 64).collect();
    readings.extend_from_slice(&[3200; 3]);
    let frames = run_pointer_x(&readings);

    let magnitudes: Vec<i16> = frames
        .iter()
        .map(|f| match f {
            Frame::Axis(s) => {
                assert_eq!(s.axis, AxisId::X);
                s.magnitude
            }
            other => panic!("unexpected frame {other:?}"),
        })
        .collect();
    assert!(!magnitudes.is_empty());
    assert_ne!(magnitudes[0], 0);
    assert!(magnitudes.windows(2).all(|w| w[0] <= w[1]));
    assert!(magnitudes.iter().all(|m| (1..=50).contains(m)));
}

/// Feed FIRE edges at `edge_times` through capture, debounce and dispatch.
/// Returns the bytes written and the number of queued buzzer triggers.
fn run_fire_edges(edge_times: &[u64]) -> (Vec<u8>, usize) {
    let pipeline = Pipeline::<NoopRawMutex>::new();
    let mut controller = PowerController::new(&pipeline, MockIndicator::new(), DEFAULT_DWELL);
    controller.handle_toggle(0);

    let clock = FixedClock::new(0);
    let mut capture = EdgeCapture::new(
        &pipeline,
        pipeline.subscribe().unwrap(),
        [ButtonInput::new(ButtonCode::FIRE, MockPin::new())],
        &clock,
    );
    let sink = RecordingSink::new();
    let mut dispatcher = ButtonDispatcher::new(
        &pipeline,
        pipeline.subscribe().unwrap(),
        sink.clone(),
        DebouncePolicy::SharedPerCode,
    );

    for &at_ms in edge_times {
        clock.set(at_ms);
        block_on(capture.process_one());
    }
    for _ in edge_times {
        block_on(dispatcher.process_one()).unwrap();
    }
    (sink.bytes(), pipeline.buzzer_len())
}

#[test]
fn test_bouncing_fire_button() {
    // Press at 100, contact bounce at 110 and 120, release at 200
    let (bytes, buzzes) = run_fire_edges(&[100, 110, 120, 200]);
    assert_eq!(bytes, [0xB0, 0x01, 0x01, 0xFE, 0xB0, 0x01, 0x00, 0xFE].to_vec());
    assert_eq!(buzzes, 1);
}

#[test]
fn test_fire_press_survives_immediate_bounce() {
    // The contact springs back 1 ms after the falling edge
    let (bytes, buzzes) = run_fire_edges(&[100, 101]);
    assert_eq!(bytes, [0xB0, 0x01, 0x01, 0xFE].to_vec());
    assert_eq!(buzzes, 1);
}

#[test]
fn test_power_toggles_inside_and_outside_dwell() {
    let pipeline = Pipeline::<NoopRawMutex>::new();
    let led = MockIndicator::new();
    let mut controller = PowerController::new(&pipeline, led.clone(), DEFAULT_DWELL);
    let clock = FixedClock::new(0);
    let mut button = PowerButton::new(&pipeline, MockPin::new(), &clock);

    let mut outcomes = Vec::new();
    for at_ms in [0, 3_000, 6_000] {
        clock.set(at_ms);
        block_on(button.process_one()).unwrap();
        let (_, outcome) = block_on(controller.process_one());
        outcomes.push(outcome);
        if at_ms == 3_000 {
            assert!(led.is_on());
        }
    }

    assert_eq!(
        outcomes,
        [
            ToggleOutcome::Enabled,
            ToggleOutcome::Ignored,
            ToggleOutcome::Disabled
        ]
        .to_vec()
    );
    assert!(!led.is_on());
    assert_eq!(pipeline.status().map(|s| s.enabled), Some(false));
}
