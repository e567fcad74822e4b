//! Kleis - Keypad Door Lock Firmware
//!
//! Main firmware binary for RP2040-based door locks: a 4x4 matrix keypad,
//! a hobby servo throwing the bolt and a 128x128 ST7735S panel.
//!
//! Startup throws the bolt, runs the boot animation and hands the hardware
//! to two tasks: keypad input at 10 ms and entry indicator refresh at
//! 100 ms.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::Pwm;
use embassy_rp::spi::{Config as SpiConfig, Spi};
use embassy_sync::mutex::Mutex;
use embassy_time::{Delay, Timer};
use embedded_hal_bus::spi::ExclusiveDevice;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use kleis_core::config::LockConfig;
use kleis_core::display::{boot_sequence, render_boot_step};
use kleis_core::state::Lock;
use kleis_core::traits::{BoltPosition, KeyScanner, LockDisplay};
use kleis_drivers::actuator::{Servo, ServoConfig};
use kleis_drivers::display::{GraphicsDisplay, St7735};
use kleis_drivers::keypad::MatrixKeypad;

use crate::board::{Keypad, Panel};
use crate::channels::SharedPanel;

mod board;
mod channels;
mod config;
mod tasks;

// Static cells for shared state (must live forever for task references)
static LOCK_CONFIG: StaticCell<LockConfig> = StaticCell::new();
static PANEL: StaticCell<SharedPanel> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Kleis firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config: &'static LockConfig = LOCK_CONFIG.init(config::load());

    // Throw the bolt before anything else
    let pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, board::servo_pwm_config());
    let (servo_out, _) = pwm.split();
    let servo_out = unwrap!(servo_out);
    let mut lock = Lock::new(Servo::new(servo_out, ServoConfig::default()));
    match lock.drive(BoltPosition::Locked) {
        Ok(()) => info!("Bolt locked"),
        Err(e) => warn!("Initial lock failed: {:?}, input task will retry", e),
    }
    Timer::after_millis(config.timing.settle_ms as u64).await;

    // Panel on SPI1, transmit only
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = board::PANEL_SPI_HZ;
    let spi = Spi::new_blocking_txonly(p.SPI1, p.PIN_10, p.PIN_11, spi_config);
    let cs = Output::new(p.PIN_13, Level::High);
    let spi_dev = unwrap!(ExclusiveDevice::new(spi, cs, Delay));

    let mut st7735 = St7735::new(
        spi_dev,
        Output::new(p.PIN_14, Level::Low),
        Output::new(p.PIN_15, Level::High),
        Output::new(p.PIN_12, Level::Low),
    );
    let mut panel: Panel = match st7735.init(&mut Delay) {
        Ok(()) => {
            info!("Panel initialized");
            GraphicsDisplay::new(st7735)
        }
        Err(e) => {
            warn!("Panel init failed: {:?}, running without a display", e);
            GraphicsDisplay::unavailable(st7735)
        }
    };

    boot_animation(&mut panel, config).await;

    // Keypad: rows driven low one at a time, columns pulled up
    let rows = [
        Output::new(p.PIN_2, Level::High),
        Output::new(p.PIN_3, Level::High),
        Output::new(p.PIN_4, Level::High),
        Output::new(p.PIN_5, Level::High),
    ];
    let cols = [
        Input::new(p.PIN_6, Pull::Up),
        Input::new(p.PIN_7, Pull::Up),
        Input::new(p.PIN_8, Pull::Up),
        Input::new(p.PIN_9, Pull::Up),
    ];
    let mut keypad: Keypad = unwrap!(MatrixKeypad::new(rows, cols, Delay));
    if let Ok(code) = keypad.read_key() {
        if code != 0 {
            warn!("Key {} held at startup", code);
        }
    }
    info!("Keypad initialized");

    let panel: &'static SharedPanel = PANEL.init(Mutex::new(panel));

    // Spawn tasks
    spawner.spawn(unwrap!(tasks::input_task(keypad, lock, panel, config)));
    spawner.spawn(unwrap!(tasks::display_refresh_task(panel, config)));

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Progress bar, logo, then the idle prompt
async fn boot_animation(panel: &mut Panel, config: &LockConfig) {
    if !panel.is_ready() {
        warn!("Panel not ready, boot animation may be incomplete");
    }

    let mut failures = 0u32;
    for step in boot_sequence(&config.layout, &config.timing) {
        match render_boot_step(panel, step, &config.layout) {
            Ok(Some(ms)) => Timer::after_millis(ms as u64).await,
            Ok(None) => {}
            Err(e) => {
                failures += 1;
                trace!("Boot step {:?} failed: {:?}", step, e);
            }
        }
    }

    if failures > 0 {
        warn!("Boot animation finished with {} failed draws", failures);
    } else {
        info!("Boot animation complete");
    }
}
