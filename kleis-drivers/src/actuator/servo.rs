//! Hobby servo bolt actuator
//!
//! The servo expects a 50 Hz pulse train; pulse width sets the horn angle.
//! The PWM channel must already be configured for a 20 ms period, this
//! driver only sets the duty cycle as a fraction of that period.
//!
//! The servo attaches lazily: the first drive (or the first drive after a
//! PWM failure) checks the channel before commanding a pulse.

use embedded_hal::pwm::SetDutyCycle;
use kleis_core::traits::{ActuatorError, BoltPosition, LockActuator};

/// Servo pulse geometry
#[derive(Debug, Clone)]
pub struct ServoConfig {
    /// PWM period in microseconds
    pub period_us: u16,
    /// Pulse width for the locked position (0 degrees)
    pub locked_pulse_us: u16,
    /// Pulse width for the unlocked position (90 degrees)
    pub unlocked_pulse_us: u16,
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self {
            period_us: 20_000,
            locked_pulse_us: 500,
            unlocked_pulse_us: 1_500,
        }
    }
}

impl ServoConfig {
    /// Pulse width for a bolt position
    pub fn pulse_us(&self, position: BoltPosition) -> u16 {
        match position {
            BoltPosition::Locked => self.locked_pulse_us,
            BoltPosition::Unlocked => self.unlocked_pulse_us,
        }
    }
}

/// Servo driving the door bolt
pub struct Servo<P> {
    pwm: P,
    config: ServoConfig,
    attached: bool,
    position: Option<BoltPosition>,
}

impl<P: SetDutyCycle> Servo<P> {
    /// Wrap a PWM channel; nothing is driven until the first command
    pub fn new(pwm: P, config: ServoConfig) -> Self {
        Self {
            pwm,
            config,
            attached: false,
            position: None,
        }
    }

    /// Check the PWM channel and mark the servo attached
    pub fn attach(&mut self) -> Result<(), ActuatorError> {
        let config = &self.config;
        let usable = self.pwm.max_duty_cycle() > 0
            && config.period_us > 0
            && config.locked_pulse_us <= config.period_us
            && config.unlocked_pulse_us <= config.period_us;
        if !usable {
            self.attached = false;
            return Err(ActuatorError::Unavailable);
        }
        self.attached = true;
        Ok(())
    }

    /// Last position commanded successfully
    pub fn position(&self) -> Option<BoltPosition> {
        self.position
    }
}

impl<P: SetDutyCycle> LockActuator for Servo<P> {
    fn drive(&mut self, position: BoltPosition) -> Result<(), ActuatorError> {
        if !self.attached {
            self.attach()?;
        }

        let pulse = self.config.pulse_us(position);
        match self
            .pwm
            .set_duty_cycle_fraction(pulse, self.config.period_us)
        {
            Ok(()) => {
                self.position = Some(position);
                Ok(())
            }
            Err(_) => {
                // Re-check the channel on the next command
                self.attached = false;
                self.position = None;
                Err(ActuatorError::Output)
            }
        }
    }

    fn is_attached(&self) -> bool {
        self.attached
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::pwm::{Error, ErrorKind, ErrorType};

    #[derive(Debug)]
    struct PwmFault;

    impl Error for PwmFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    /// Mock PWM channel with a 16-bit counter
    struct MockPwm {
        max: u16,
        duty: u16,
        fail: bool,
    }

    impl MockPwm {
        fn new() -> Self {
            Self {
                max: 62_500,
                duty: 0,
                fail: false,
            }
        }
    }

    impl ErrorType for MockPwm {
        type Error = PwmFault;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            self.max
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            if self.fail {
                return Err(PwmFault);
            }
            self.duty = duty;
            Ok(())
        }
    }

    #[test]
    fn test_lazy_attach() {
        let mut servo = Servo::new(MockPwm::new(), ServoConfig::default());
        assert!(!servo.is_attached());
        servo.drive(BoltPosition::Locked).unwrap();
        assert!(servo.is_attached());
        assert_eq!(servo.position(), Some(BoltPosition::Locked));
    }

    #[test]
    fn test_pulse_widths() {
        let mut servo = Servo::new(MockPwm::new(), ServoConfig::default());

        // 0.5 ms of 20 ms
        servo.drive(BoltPosition::Locked).unwrap();
        assert_eq!(servo.pwm.duty, 62_500 / 40);

        // 1.5 ms of 20 ms
        servo.drive(BoltPosition::Unlocked).unwrap();
        assert_eq!(servo.pwm.duty, (62_500u32 * 3 / 40) as u16);
    }

    #[test]
    fn test_unconfigured_channel_unavailable() {
        let mut pwm = MockPwm::new();
        pwm.max = 0;
        let mut servo = Servo::new(pwm, ServoConfig::default());
        assert_eq!(
            servo.drive(BoltPosition::Locked),
            Err(ActuatorError::Unavailable)
        );
        assert!(!servo.is_attached());
    }

    #[test]
    fn test_output_failure_detaches_then_recovers() {
        let mut servo = Servo::new(MockPwm::new(), ServoConfig::default());
        servo.drive(BoltPosition::Unlocked).unwrap();

        servo.pwm.fail = true;
        assert_eq!(
            servo.drive(BoltPosition::Locked),
            Err(ActuatorError::Output)
        );
        assert!(!servo.is_attached());
        assert_eq!(servo.position(), None);

        servo.pwm.fail = false;
        servo.drive(BoltPosition::Locked).unwrap();
        assert!(servo.is_attached());
        assert_eq!(servo.position(), Some(BoltPosition::Locked));
    }
}
