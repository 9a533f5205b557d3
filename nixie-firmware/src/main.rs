//! Nixie Clock - Four-tube nixie clock firmware
//!
//! Main firmware binary for an RP2040 driving four nixie tubes through a
//! TPIC6B595 shift-register chain, with a DS3231 keeping time.
//!
//! # Pin map
//!
//! | GPIO | Function                     |
//! |------|------------------------------|
//! | 2    | shift data                   |
//! | 3    | shift clock                  |
//! | 4    | shift latch                  |
//! | 5    | shift master reset           |
//! | 6    | hour indicator LED           |
//! | 7    | minute indicator LED         |
//! | 10   | mode button                  |
//! | 11   | increment button             |
//! | 12   | decrement button (optional)  |
//! | 13   | PIR sensor (optional)        |
//! | 14   | display power (optional)     |
//! | 16   | I2C0 SDA (DS3231)            |
//! | 17   | I2C0 SCL (DS3231)            |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_time::{Delay, Timer};
use heapless::Vec;
use {defmt_rtt as _, panic_probe as _};

use nixie_core::config::ClockConfig;
use nixie_drivers::shift_register::{ShiftRegisterConfig, ShiftRegisterDisplay};
use nixie_drivers::Ds3231;
use nixie_hal::compat::{EhDelay, EhI2c, EhInput, EhOutput};
use nixie_hal::i2c::I2cConfig;

use crate::config::CLOCK_CONFIG;
use crate::tasks::{ClockHardware, MotionHardware};

mod config;
mod tasks;

/// Delay between RTC probes at boot
const RTC_RETRY_MS: u64 = 100;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Nixie clock firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = match CLOCK_CONFIG.validate() {
        Ok(()) => CLOCK_CONFIG,
        Err(e) => {
            error!("Invalid clock configuration ({}), using defaults", e);
            ClockConfig::default()
        }
    };
    info!(
        "Config: {} buttons, leading-zero blank={}, sweep every {} min",
        config.buttons.button_count(),
        config.blank_leading_zero,
        config.conditioning.period_minutes
    );

    // Shift-register chain
    let mut display = ShiftRegisterDisplay::new(
        EhOutput::new(Output::new(p.PIN_2, Level::Low), false),
        EhOutput::new(Output::new(p.PIN_3, Level::Low), false),
        EhOutput::new(Output::new(p.PIN_4, Level::High), true),
        EhOutput::new(Output::new(p.PIN_5, Level::High), true),
        EhDelay::new(Delay),
        ShiftRegisterConfig::default(),
    );
    display.reset();
    info!("Shift registers reset");

    // RTC on I2C0
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2cConfig::FAST.frequency;
    let bus = I2c::new_blocking(p.I2C0, p.PIN_17, p.PIN_16, i2c_config);
    let mut rtc = Ds3231::new(EhI2c::new(bus));

    let mut attempts: u32 = 0;
    while let Err(e) = rtc.probe() {
        attempts += 1;
        warn!("RTC not responding (attempt {}): {}", attempts, e);
        Timer::after_millis(RTC_RETRY_MS).await;
    }
    match rtc.lost_power() {
        Ok(true) => warn!("RTC oscillator stopped, time needs setting"),
        Ok(false) => {}
        Err(e) => warn!("RTC status read failed: {}", e),
    }
    info!("RTC found");

    // Buttons: active-low with pull-ups
    let mut buttons = Vec::new();
    let _ = buttons.push(EhInput::new(Input::new(p.PIN_10, Pull::Up)));
    let _ = buttons.push(EhInput::new(Input::new(p.PIN_11, Pull::Up)));
    if config.buttons.button_count() > 2 {
        let _ = buttons.push(EhInput::new(Input::new(p.PIN_12, Pull::Up)));
    }

    let motion = config.motion.map(|_| MotionHardware {
        sensor: EhInput::new(Input::new(p.PIN_13, Pull::None)),
        power: EhOutput::new(Output::new(p.PIN_14, Level::High), true),
    });

    let hardware = ClockHardware {
        display,
        rtc,
        buttons,
        hour_led: EhOutput::new(Output::new(p.PIN_6, Level::Low), false),
        minute_led: EhOutput::new(Output::new(p.PIN_7, Level::Low), false),
        motion,
    };

    unwrap!(spawner.spawn(tasks::clock_task(hardware, config)));
    info!("Clock task spawned");
}
