//! Board wiring
//!
//! Pin assignment for the reference RP2040 board:
//!
//! | Function            | Pins           |
//! |---------------------|----------------|
//! | Keypad rows (out)   | GPIO2-GPIO5    |
//! | Keypad cols (in)    | GPIO6-GPIO9    |
//! | Panel SCK / MOSI    | GPIO10, GPIO11 |
//! | Panel BLK           | GPIO12         |
//! | Panel CS / DC / RST | GPIO13-GPIO15  |
//! | Servo PWM           | GPIO16 (PWM0A) |

use embassy_rp::gpio::{Input, Output};
use embassy_rp::peripherals::SPI1;
use embassy_rp::pwm::{Config as PwmConfig, PwmOutput};
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;

use kleis_drivers::actuator::Servo;
use kleis_drivers::display::{GraphicsDisplay, St7735};
use kleis_drivers::keypad::MatrixKeypad;

/// Panel SPI clock
pub const PANEL_SPI_HZ: u32 = 15_000_000;

/// PWM clock divider: 125 MHz / 64 = 1.953 MHz
const SERVO_PWM_DIVIDER: u8 = 64;

/// PWM counter top for a 20 ms period at the divided clock
const SERVO_PWM_TOP: u16 = 39_062;

pub type Keypad = MatrixKeypad<Output<'static>, Input<'static>, Delay>;

pub type BoltServo = Servo<PwmOutput<'static>>;

pub type PanelSpi = ExclusiveDevice<Spi<'static, SPI1, Blocking>, Output<'static>, Delay>;

pub type Panel = GraphicsDisplay<St7735<PanelSpi, Output<'static>, Output<'static>, Output<'static>>>;

/// PWM slice configuration for a 50 Hz servo signal
pub fn servo_pwm_config() -> PwmConfig {
    let mut config = PwmConfig::default();
    config.divider = SERVO_PWM_DIVIDER.into();
    config.top = SERVO_PWM_TOP;
    config.compare_a = 0;
    config
}
