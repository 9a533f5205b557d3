//! Clock superloop task
//!
//! Samples the RTC, buttons and PIR every tick, runs the controller, and
//! applies its outputs to the tubes, LEDs, display power and RTC.

use defmt::*;
use embassy_rp::gpio::{Input, Output};
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Delay, Duration, Instant, Ticker};
use heapless::Vec;

use nixie_core::config::ClockConfig;
use nixie_core::controller::{ClockController, ClockInputs, ClockOutputs, Notice};
use nixie_core::debounce::{Level, MAX_BUTTONS};
use nixie_core::health::{HealthChange, ReadHealth};
use nixie_core::time::{ClockTime, DateTime};
use nixie_core::traits::{TimeSource, TubeDisplay};
use nixie_drivers::shift_register::ShiftRegisterDisplay;
use nixie_drivers::Ds3231;
use nixie_hal::compat::{EhDelay, EhI2c, EhInput, EhOutput};
use nixie_hal::{InputPin, OutputPin};

/// Tick interval in milliseconds
pub const TICK_INTERVAL_MS: u64 = 5;

/// Date used when committing before the RTC was ever read
const FALLBACK_DATE: DateTime = DateTime::new(2000, 1, 1, ClockTime::MIDNIGHT);

type Pin = EhOutput<Output<'static>>;
type Button = EhInput<Input<'static>>;

pub type TubeBank = ShiftRegisterDisplay<Pin, Pin, Pin, Pin, EhDelay<Delay>>;
pub type Rtc = Ds3231<EhI2c<I2c<'static, I2C0, Blocking>>>;

/// PIR input and the display power switch it gates
pub struct MotionHardware {
    pub sensor: Button,
    pub power: Pin,
}

/// Everything the clock task drives
pub struct ClockHardware {
    pub display: TubeBank,
    pub rtc: Rtc,
    /// Mode, increment, then decrement when fitted
    pub buttons: Vec<Button, MAX_BUTTONS>,
    pub hour_led: Pin,
    pub minute_led: Pin,
    pub motion: Option<MotionHardware>,
}

impl ClockHardware {
    fn sample_buttons(&mut self) -> [Level; MAX_BUTTONS] {
        let mut levels = [Level::High; MAX_BUTTONS];
        for (level, button) in levels.iter_mut().zip(self.buttons.iter_mut()) {
            *level = Level::from_high(button.is_high());
        }
        levels
    }

    fn sample_motion(&mut self) -> Option<bool> {
        self.motion.as_mut().map(|m| m.sensor.is_high())
    }

    fn apply(&mut self, out: &ClockOutputs, last_read: Option<DateTime>) {
        if let Some(frame) = &out.frame {
            self.display.render(frame);
        }

        self.hour_led.set_state(out.hour_indicator);
        self.minute_led.set_state(out.minute_indicator);

        if let (Some(on), Some(motion)) = (out.display_power, self.motion.as_mut()) {
            motion.power.set_state(on);
        }

        if let Some(time) = out.commit {
            let datetime = last_read.unwrap_or(FALLBACK_DATE).with_time(time);
            if let Err(e) = self.rtc.adjust(&datetime) {
                warn!("RTC write failed: {}", e);
            }
        }
    }
}

fn log_notice(notice: &Notice) {
    match notice {
        Notice::Tick(t) => {
            let (h1, h2) = t.hour_digits();
            let (m1, m2) = t.minute_digits();
            let (s1, s2) = (t.second() / 10, t.second() % 10);
            debug!("{}{}:{}{}:{}{}", h1, h2, m1, m2, s1, s2)
        }
        Notice::ConditioningStarted { duration_ms } => {
            info!("Cathode conditioning for {} ms", duration_ms)
        }
        Notice::ConditioningFinished => info!("Cathode conditioning done"),
        Notice::MenuPage(mode) => info!("Setup menu page {} ({})", mode.page(), mode),
        Notice::TimeCommitted(t) => {
            let (h1, h2) = t.hour_digits();
            let (m1, m2) = t.minute_digits();
            info!("Time set to {}{}:{}{}", h1, h2, m1, m2)
        }
        Notice::DisplayPower(on) => info!("Display power {}", if *on { "on" } else { "off" }),
    }
}

/// Clock task - one controller poll per tick
#[embassy_executor::task]
pub async fn clock_task(mut hw: ClockHardware, config: ClockConfig) {
    info!("Clock task started");

    let mut controller = ClockController::new(config);
    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));
    let start = Instant::now();
    let mut last_read: Option<DateTime> = None;
    let mut rtc_health = ReadHealth::new();

    loop {
        ticker.next().await;

        // Milliseconds since start; wraps after ~49 days
        let now_ms = start.elapsed().as_millis() as u32;

        let time = match hw.rtc.now() {
            Ok(datetime) => {
                if let Some(HealthChange::Recovered { failed_polls }) = rtc_health.record(true) {
                    info!("RTC reads recovered after {} failed polls", failed_polls);
                }
                last_read = Some(datetime);
                Some(datetime.time)
            }
            Err(e) => {
                if rtc_health.record(false) == Some(HealthChange::Failed) {
                    warn!("RTC read failed: {}", e);
                }
                None
            }
        };

        let inputs = ClockInputs {
            now_ms,
            time,
            buttons: hw.sample_buttons(),
            motion: hw.sample_motion(),
        };

        let out = controller.poll(&inputs);
        hw.apply(&out, last_read);

        for notice in out.notices.iter() {
            log_notice(notice);
        }
    }
}
