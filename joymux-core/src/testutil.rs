//! Mocks and a minimal executor shared by the unit tests.

extern crate std;

use core::convert::Infallible;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal_async::digital::Wait;
use joymux_proto::{Frame, Serialize, MAX_FRAME_LEN};

use crate::input::{AnalogSource, Clock, InputError};
use crate::mux::MuxChannel;
use crate::output::{Actuator, FrameSink, OutputError};

fn noop_waker() -> Waker {
    fn noop_raw_waker() -> RawWaker {
        fn noop(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            noop_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
        RawWaker::new(core::ptr::null(), &VTABLE)
    }

    unsafe { Waker::from_raw(noop_raw_waker()) }
}

/// Poll a future once.
pub fn poll_once<F: Future>(f: Pin<&mut F>) -> Poll<F::Output> {
    let waker = noop_waker();
    let mut cx = Context::from_waker(&waker);
    f.poll(&mut cx)
}

/// Run a future that must complete without waiting.
pub fn block_on<F: Future>(f: F) -> F::Output {
    let mut f = core::pin::pin!(f);
    match poll_once(f.as_mut()) {
        Poll::Ready(result) => result,
        Poll::Pending => panic!("Mock future returned Pending unexpectedly"),
    }
}

/// Analog source returning scripted results and recording the channels read.
pub struct ScriptedSource {
    results: Vec<Result<u16, InputError>>,
    index: usize,
    channels: Vec<MuxChannel>,
}

impl ScriptedSource {
    pub fn new(results: &[Result<u16, InputError>]) -> Self {
        Self {
            results: results.to_vec(),
            index: 0,
            channels: Vec::new(),
        }
    }

    pub fn channels(&self) -> &[MuxChannel] {
        &self.channels
    }
}

impl AnalogSource for ScriptedSource {
    fn read(&mut self, channel: MuxChannel) -> impl Future<Output = Result<u16, InputError>> {
        self.channels.push(channel);
        let result = self
            .results
            .get(self.index)
            .copied()
            .unwrap_or(Err(InputError::Disconnected));
        self.index += 1;
        core::future::ready(result)
    }
}

/// Sink that appends every frame's bytes to a shared buffer.
#[derive(Clone, Default)]
pub struct RecordingSink {
    bytes: Rc<RefCell<Vec<u8>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.borrow().clone()
    }
}

impl FrameSink for RecordingSink {
    fn send(&mut self, frame: &Frame) -> impl Future<Output = Result<(), OutputError>> {
        let result = frame.serialize_to_vec::<MAX_FRAME_LEN>().map(|bytes| {
            self.bytes.borrow_mut().extend_from_slice(&bytes);
        });
        core::future::ready(result.map_err(OutputError::from))
    }
}

/// Sink whose every write fails.
pub struct FailingSink;

impl FrameSink for FailingSink {
    fn send(&mut self, _frame: &Frame) -> impl Future<Output = Result<(), OutputError>> {
        core::future::ready(Err(OutputError::Io))
    }
}

/// Clock stuck at one instant.
pub struct FixedClock(Cell<u64>);

impl FixedClock {
    pub fn new(now_ms: u64) -> Self {
        Self(Cell::new(now_ms))
    }

    pub fn set(&self, now_ms: u64) {
        self.0.set(now_ms);
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

/// Edge a [`MockPin`] was asked to wait for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Rising,
    Falling,
    Any,
}

/// Input whose edges are always ready. Records every edge awaited.
#[derive(Default)]
pub struct MockPin {
    waits: Rc<RefCell<Vec<Edge>>>,
}

impl MockPin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared log of awaited edges.
    pub fn waits(&self) -> Rc<RefCell<Vec<Edge>>> {
        self.waits.clone()
    }

    fn record(&self, edge: Edge) -> Result<(), Infallible> {
        self.waits.borrow_mut().push(edge);
        Ok(())
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl Wait for MockPin {
    async fn wait_for_high(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    async fn wait_for_low(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), Infallible> {
        self.record(Edge::Rising)
    }

    async fn wait_for_falling_edge(&mut self) -> Result<(), Infallible> {
        self.record(Edge::Falling)
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), Infallible> {
        self.record(Edge::Any)
    }
}

/// Indicator LED whose state can be inspected through a clone.
#[derive(Clone, Default)]
pub struct MockIndicator {
    on: Rc<Cell<bool>>,
}

impl MockIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self) -> bool {
        self.on.get()
    }
}

impl ErrorType for MockIndicator {
    type Error = Infallible;
}

impl OutputPin for MockIndicator {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.on.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.on.set(true);
        Ok(())
    }
}

/// Actuator counting how often it sounded.
#[derive(Clone, Default)]
pub struct CountingActuator {
    count: Rc<Cell<u32>>,
}

impl CountingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u32 {
        self.count.get()
    }
}

impl Actuator for CountingActuator {
    fn sound(&mut self) -> impl Future<Output = ()> {
        self.count.set(self.count.get() + 1);
        core::future::ready(())
    }
}
