#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::{debug, error, info, trace, unwrap, warn};
use defmt_rtt as _;
use embassy_executor::{Executor, InterruptExecutor};
use embassy_rp::adc::{self, Adc};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::uart::{Config as UartConfig, UartTx};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Ticker};
use joymux::config::{
    AxisConfig, BUZZER_DURATION_MS, BUZZER_FREQ_HZ, DEFAULT_DEBOUNCE_POLICY, DEFAULT_DWELL,
    DIRECTIONAL_H, DIRECTIONAL_PERIOD_MS, DIRECTIONAL_V, MUX_SETTLE_US, POINTER_X, POINTER_Y,
};
use joymux::{
    code_for_gpio, AnalogDispatcher, AnalogEvent, AxisSampler, ButtonDispatcher, ButtonInput,
    Buzzer, Capture, Dispatch, EdgeCapture, Enqueue, MuxedAdc, PinBuzzer, Pipeline, PowerButton,
    PowerController, ToggleOutcome, UartFrameSink, UptimeClock,
};
use portable_atomic::{AtomicU32, Ordering};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => adc::InterruptHandler;
});

type Shared<T> = Mutex<CriticalSectionRawMutex, T>;
type SharedAdc = Shared<MuxedAdc<'static>>;
type SharedSink = Shared<UartFrameSink<'static>>;
type Queues = Pipeline<CriticalSectionRawMutex>;

static PIPELINE: StaticCell<Queues> = StaticCell::new();
static ADC: StaticCell<SharedAdc> = StaticCell::new();
static SINK: StaticCell<SharedSink> = StaticCell::new();

static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_LOW: StaticCell<Executor> = StaticCell::new();

/// Analog events lost to a full queue.
static ANALOG_DROPPED: AtomicU32 = AtomicU32::new(0);

/// Button edges lost to a full queue.
static EDGES_DROPPED: AtomicU32 = AtomicU32::new(0);

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

#[entry]
fn main() -> ! {
    info!("joymux starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    let pipeline: &'static Queues = PIPELINE.init(Pipeline::new());

    // --- Analog front end ---
    let mux_lines = [
        Output::new(p.PIN_11, Level::Low),
        Output::new(p.PIN_12, Level::Low),
        Output::new(p.PIN_13, Level::Low),
    ];
    let adc = Adc::new(p.ADC, Irqs, adc::Config::default());
    let common = adc::Channel::new_pin(p.PIN_28, Pull::None);
    let adc: &'static SharedAdc =
        ADC.init(Mutex::new(MuxedAdc::new(mux_lines, MUX_SETTLE_US, adc, common)));

    // --- UART output ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = 115_200;
    let tx = UartTx::new(p.UART0, p.PIN_0, p.DMA_CH0, uart_config);
    let sink: &'static SharedSink = SINK.init(Mutex::new(UartFrameSink::new(tx)));

    // --- Buttons ---
    let buttons = [
        ButtonInput::new(unwrap!(code_for_gpio(16)), Input::new(p.PIN_16, Pull::Up)),
        ButtonInput::new(unwrap!(code_for_gpio(17)), Input::new(p.PIN_17, Pull::Up)),
        ButtonInput::new(unwrap!(code_for_gpio(18)), Input::new(p.PIN_18, Pull::Up)),
        ButtonInput::new(unwrap!(code_for_gpio(19)), Input::new(p.PIN_19, Pull::Up)),
        ButtonInput::new(unwrap!(code_for_gpio(20)), Input::new(p.PIN_20, Pull::Up)),
    ];
    let power_button = Input::new(p.PIN_14, Pull::Up);

    let led = Output::new(p.PIN_2, Level::Low);
    let buzzer = PinBuzzer::new(
        Output::new(p.PIN_15, Level::Low),
        BUZZER_FREQ_HZ,
        BUZZER_DURATION_MS,
    );

    // High priority: edge handlers preempt sampling and dispatch
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let spawner = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    spawner.spawn(button_edge_task(pipeline, buttons).unwrap());
    spawner.spawn(power_button_task(pipeline, power_button).unwrap());

    let executor = EXECUTOR_LOW.init(Executor::new());
    executor.run(|spawner| {
        spawner.spawn(power_task(pipeline, led).unwrap());
        spawner.spawn(pointer_task(pipeline, adc, POINTER_X).unwrap());
        spawner.spawn(pointer_task(pipeline, adc, POINTER_Y).unwrap());
        spawner.spawn(directional_task(pipeline, adc).unwrap());
        spawner.spawn(analog_dispatch_task(pipeline, sink).unwrap());
        spawner.spawn(button_dispatch_task(pipeline, sink).unwrap());
        spawner.spawn(buzzer_task(pipeline, buzzer).unwrap());
        info!("joymux initialized, press the power button to start");
    })
}

fn post(pipeline: &Queues, event: AnalogEvent) {
    if pipeline.post_analog(event) == Enqueue::Dropped {
        let dropped = ANALOG_DROPPED.fetch_add(1, Ordering::Relaxed) + 1;
        debug!("Analog queue full, dropped {:?} ({} total)", event, dropped);
    }
}

/// Button edge task - stamps edges and queues them. Never blocks on the queue.
#[embassy_executor::task]
async fn button_edge_task(pipeline: &'static Queues, inputs: [ButtonInput<Input<'static>>; 5]) {
    let gate = unwrap!(pipeline.subscribe());
    let mut capture = EdgeCapture::new(pipeline, gate, inputs, UptimeClock);
    loop {
        match capture.process_one().await {
            Capture::Queued(edge) => trace!("Edge {:?}", edge),
            Capture::Dropped(edge) => {
                let dropped = EDGES_DROPPED.fetch_add(1, Ordering::Relaxed) + 1;
                debug!("Button queue full, dropped {:?} ({} total)", edge, dropped);
            }
            Capture::Disabled => {}
            Capture::PinError => warn!("Button pin error"),
        }
    }
}

/// Power button task - signals a toggle with the edge timestamp.
#[embassy_executor::task]
async fn power_button_task(pipeline: &'static Queues, pin: Input<'static>) {
    let mut button = PowerButton::new(pipeline, pin, UptimeClock);
    loop {
        if let Ok(at_ms) = button.process_one().await {
            trace!("Power button at {} ms", at_ms);
        }
    }
}

/// Power task - applies toggles, publishes run status, drives the LED.
#[embassy_executor::task]
async fn power_task(pipeline: &'static Queues, led: Output<'static>) {
    let mut controller = PowerController::new(pipeline, led, DEFAULT_DWELL);
    loop {
        match controller.process_one().await {
            (at_ms, ToggleOutcome::Enabled) => {
                info!("Enabled at {} ms (session {})", at_ms, controller.session())
            }
            (at_ms, ToggleOutcome::Disabled) => info!("Disabled at {} ms", at_ms),
            (at_ms, ToggleOutcome::Ignored) => debug!("Toggle at {} ms ignored (dwell)", at_ms),
        }
    }
}

/// Pointer task - samples one pointer axis every period.
#[embassy_executor::task(pool_size = 2)]
async fn pointer_task(pipeline: &'static Queues, mut adc: &'static SharedAdc, config: AxisConfig) {
    let mut gate = unwrap!(pipeline.subscribe());
    let mut sampler = AxisSampler::new(&config);
    let mut ticker = Ticker::every(Duration::from_millis(config.period_ms));
    loop {
        if gate.wait_enabled().await {
            sampler.reset();
            ticker.reset();
        }
        match sampler.sample(&mut adc).await {
            Ok(Some(event)) => post(pipeline, event),
            Ok(None) => {}
            Err(e) => warn!("{:?} read failed: {:?}", config.axis, e),
        }
        ticker.next().await;
    }
}

/// Directional task - samples the horizontal and vertical pair every period.
#[embassy_executor::task]
async fn directional_task(pipeline: &'static Queues, mut adc: &'static SharedAdc) {
    let mut gate = unwrap!(pipeline.subscribe());
    let mut samplers = [AxisSampler::new(&DIRECTIONAL_H), AxisSampler::new(&DIRECTIONAL_V)];
    let mut ticker = Ticker::every(Duration::from_millis(DIRECTIONAL_PERIOD_MS));
    loop {
        if gate.wait_enabled().await {
            samplers.iter_mut().for_each(AxisSampler::reset);
            ticker.reset();
        }
        for sampler in &mut samplers {
            match sampler.sample(&mut adc).await {
                Ok(Some(event)) => post(pipeline, event),
                Ok(None) => {}
                Err(e) => warn!("{:?} read failed: {:?}", sampler.axis(), e),
            }
        }
        ticker.next().await;
    }
}

/// Analog dispatch task - writes axis and directional frames.
#[embassy_executor::task]
async fn analog_dispatch_task(pipeline: &'static Queues, sink: &'static SharedSink) {
    let gate = unwrap!(pipeline.subscribe());
    let mut dispatcher = AnalogDispatcher::new(pipeline, gate, sink);
    loop {
        match dispatcher.process_one().await {
            Ok(Dispatch::Sent(frame)) => trace!("Sent {:?}", frame),
            Ok(Dispatch::Stale) => debug!("Dropped analog event dequeued while disabled"),
            Ok(Dispatch::Bounced(_)) => {}
            Err(e) => error!("Output error: {:?}", e),
        }
    }
}

/// Button dispatch task - debounces, writes button frames, triggers the buzzer.
#[embassy_executor::task]
async fn button_dispatch_task(pipeline: &'static Queues, sink: &'static SharedSink) {
    let gate = unwrap!(pipeline.subscribe());
    let mut dispatcher = ButtonDispatcher::new(pipeline, gate, sink, DEFAULT_DEBOUNCE_POLICY);
    loop {
        match dispatcher.process_one().await {
            Ok(out) => {
                match out.dispatch {
                    Dispatch::Sent(frame) => trace!("Sent {:?}", frame),
                    Dispatch::Stale => debug!("Dropped button edge dequeued while disabled"),
                    Dispatch::Bounced(edge) => trace!("Debounced {:?}", edge),
                }
                if out.buzzer == Some(Enqueue::Dropped) {
                    debug!("Buzzer queue full");
                }
            }
            Err(e) => error!("Output error: {:?}", e),
        }
    }
}

/// Buzzer task - one tone per trigger.
#[embassy_executor::task]
async fn buzzer_task(pipeline: &'static Queues, buzzer: PinBuzzer<'static>) {
    Buzzer::new(pipeline, buzzer).run().await
}
