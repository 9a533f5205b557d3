//! Polled clock controller
//!
//! One [`ClockController::poll`] call is one iteration of the clock's
//! superloop. The controller owns every piece of clock state and never
//! touches hardware: the caller samples the inputs, and applies the
//! returned [`ClockOutputs`] (frame, RTC write, indicator and power levels).
//!
//! ```text
//!  ClockInputs ──► conditioning ──► time/minute ──► menu ──► motion ──► ClockOutputs
//! ```

use heapless::Vec;

use crate::blink::Blinker;
use crate::conditioning::{CathodeConditioner, SweepStep};
use crate::config::ClockConfig;
use crate::debounce::{Button, ButtonBank, Level, MAX_BUTTONS};
use crate::display::{BlankMask, DigitPosition, Frame, TubeDigits};
use crate::menu::{Field, MenuEvent, SetupMenu, SetupMode};
use crate::motion::MotionGate;
use crate::time::ClockTime;

/// Maximum notices produced by one poll
pub const MAX_NOTICES: usize = 8;

/// Things worth logging that happened during a poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Notice {
    /// The RTC second changed
    Tick(ClockTime),
    ConditioningStarted { duration_ms: u32 },
    ConditioningFinished,
    /// Mode button moved the menu to a new page
    MenuPage(SetupMode),
    TimeCommitted(ClockTime),
    DisplayPower(bool),
}

/// Samples taken by the caller before a poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockInputs {
    /// Monotonic milliseconds, may wrap
    pub now_ms: u32,
    /// Current RTC time, `None` when the read failed
    pub time: Option<ClockTime>,
    /// Raw button levels by bank index (mode, increment, decrement)
    pub buttons: [Level; MAX_BUTTONS],
    /// PIR level, `None` without a sensor
    pub motion: Option<bool>,
}

impl ClockInputs {
    /// Inputs with no buttons held and no motion sensor
    pub const fn idle(now_ms: u32, time: Option<ClockTime>) -> Self {
        Self {
            now_ms,
            time,
            buttons: [Level::High; MAX_BUTTONS],
            motion: None,
        }
    }
}

/// What the caller must apply after a poll
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockOutputs {
    /// Frame to shift out to the tubes
    pub frame: Option<Frame>,
    /// Time to write to the RTC (keep the date)
    pub commit: Option<ClockTime>,
    /// Hour LED, lit while editing hours
    pub hour_indicator: bool,
    /// Minute LED, lit while editing minutes
    pub minute_indicator: bool,
    /// New display power level, when it changed
    pub display_power: Option<bool>,
    pub notices: Vec<Notice, MAX_NOTICES>,
}

impl ClockOutputs {
    fn notify(&mut self, notice: Notice) {
        // Capacity covers the worst case of one poll
        let _ = self.notices.push(notice);
    }
}

/// Frame showing `hour:minute`, optionally dark on a leading hour zero
pub const fn time_frame(hour: u8, minute: u8, blank_leading_zero: bool) -> Frame {
    let blank = if blank_leading_zero && hour < 10 {
        BlankMask::single(DigitPosition::HourTens)
    } else {
        BlankMask::NONE
    };
    Frame::new(TubeDigits::from_hour_minute(hour, minute), blank)
}

/// The clock's application state
#[derive(Debug, Clone)]
pub struct ClockController {
    config: ClockConfig,
    buttons: ButtonBank,
    menu: SetupMenu,
    conditioner: CathodeConditioner,
    motion: Option<MotionGate>,
    blinker: Option<Blinker>,
    started: bool,
    /// Last time read from the RTC
    last_time: Option<ClockTime>,
    /// Minute currently counted as displayed
    shown_minute: Option<(u8, u8)>,
    /// Re-render the time even if the minute is unchanged
    dirty: bool,
    minutes_since_sweep: u16,
}

impl ClockController {
    /// Create a controller; the configuration is assumed validated
    pub fn new(config: ClockConfig) -> Self {
        Self {
            config,
            buttons: ButtonBank::new(config.buttons.button_count(), config.debounce_ms),
            menu: SetupMenu::new(),
            conditioner: CathodeConditioner::new(),
            motion: config.motion.map(|m| MotionGate::from_minutes(m.timeout_minutes)),
            blinker: config.blink_period_ms.map(Blinker::new),
            started: false,
            last_time: None,
            shown_minute: None,
            dirty: false,
            minutes_since_sweep: 0,
        }
    }

    pub fn menu_mode(&self) -> SetupMode {
        self.menu.mode()
    }

    pub fn is_conditioning(&self) -> bool {
        self.conditioner.is_running()
    }

    /// Displayed minutes counted towards the next periodic sweep
    pub fn minutes_since_sweep(&self) -> u16 {
        self.minutes_since_sweep
    }

    pub fn display_on(&self) -> bool {
        self.motion.as_ref().map_or(true, MotionGate::display_on)
    }

    /// Run one loop iteration
    pub fn poll(&mut self, inputs: &ClockInputs) -> ClockOutputs {
        let now = inputs.now_ms;
        let mut out = ClockOutputs::default();

        if !self.started {
            self.started = true;
            self.start_sweep(now, self.config.conditioning.startup_ms, &mut out);
        }

        // Debouncers run every poll so edges are not stale later
        let mode = self.buttons.poll_button(Button::Mode, inputs.buttons[0], now);
        let inc = self.buttons.poll_button(Button::Increment, inputs.buttons[1], now);
        let dec = self.buttons.poll_button(Button::Decrement, inputs.buttons[2], now);

        match self.conditioner.poll(now) {
            SweepStep::Show(digit) => out.frame = Some(Frame::unblanked(TubeDigits::uniform(digit))),
            SweepStep::Done => {
                out.notify(Notice::ConditioningFinished);
                self.dirty = true;
            }
            SweepStep::Hold | SweepStep::Idle => {}
        }

        if let Some(time) = inputs.time {
            if self.last_time.map(|t| t.second()) != Some(time.second()) {
                out.notify(Notice::Tick(time));
            }
            self.last_time = Some(time);
        }

        if !self.conditioner.is_running() && !self.menu.mode().is_open() {
            if let Some(time) = inputs.time {
                self.show_time(time, now, &mut out);
            }
        }

        // A sweep started by this minute change also swallows the edges
        if !self.conditioner.is_running() {
            self.run_menu(mode, inc, dec, now, &mut out);
        }

        if let (Some(gate), Some(motion)) = (self.motion.as_mut(), inputs.motion) {
            if let Some(on) = gate.poll(motion, now) {
                out.display_power = Some(on);
                out.notify(Notice::DisplayPower(on));
            }
        }

        out
    }

    fn start_sweep(&mut self, now: u32, duration_ms: u32, out: &mut ClockOutputs) {
        self.conditioner
            .start(now, duration_ms, self.config.conditioning.digit_delay_ms);
        out.notify(Notice::ConditioningStarted { duration_ms });
    }

    /// Render the time when the minute changes, and schedule periodic sweeps
    fn show_time(&mut self, time: ClockTime, now: u32, out: &mut ClockOutputs) {
        let minute = (time.hour(), time.minute());
        let changed = self.shown_minute != Some(minute);
        if !changed && !self.dirty {
            return;
        }

        if changed && self.shown_minute.is_some() {
            self.minutes_since_sweep += 1;
        }
        self.shown_minute = Some(minute);
        self.dirty = false;
        out.frame = Some(time_frame(
            time.hour(),
            time.minute(),
            self.config.blank_leading_zero,
        ));

        if self.minutes_since_sweep >= self.config.conditioning.period_minutes {
            self.minutes_since_sweep = 0;
            self.start_sweep(now, self.config.conditioning.periodic_ms, out);
        }
    }

    fn run_menu(&mut self, mode: bool, inc: bool, dec: bool, now: u32, out: &mut ClockOutputs) {
        let current = self.last_time.unwrap_or(ClockTime::MIDNIGHT);

        if mode {
            self.menu.handle(MenuEvent::ModePressed, current);
            out.notify(Notice::MenuPage(self.menu.mode()));
            self.restart_blink(now);
        }

        if let Some(time) = self.menu.take_commit() {
            out.commit = Some(time);
            out.notify(Notice::TimeCommitted(time));
            // Fresh baseline: the jump to the new time is not a counted minute
            self.shown_minute = None;
            self.last_time = Some(time);
            self.show_time(time, now, out);
            return;
        }

        let Some(field) = self.menu.editing() else {
            return;
        };

        if inc {
            self.menu.handle(MenuEvent::IncrementPressed, current);
            self.restart_blink(now);
        }
        if dec {
            self.menu.handle(MenuEvent::DecrementPressed, current);
            self.restart_blink(now);
        }

        let pending = self.menu.pending();
        let mut frame = time_frame(
            pending.hour(),
            pending.minute(),
            self.config.blank_leading_zero,
        );
        let blinked_out = self.blinker.as_ref().is_some_and(|b| !b.visible(now));
        if blinked_out {
            let mask = match field {
                Field::Hour => BlankMask::HOURS,
                Field::Minute => BlankMask::MINUTES,
            };
            frame.blank = frame.blank.with(mask);
        }
        out.frame = Some(frame);
        out.hour_indicator = field == Field::Hour;
        out.minute_indicator = field == Field::Minute;
    }

    fn restart_blink(&mut self, now: u32) {
        if let Some(blinker) = self.blinker.as_mut() {
            blinker.restart(now);
        }
    }
}
