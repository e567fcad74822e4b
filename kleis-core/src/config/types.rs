//! Configuration type definitions
//!
//! These types represent the lock configuration: the reference passcode,
//! task cadences and dwell times, and the display layout.

use heapless::Vec;

use super::layout::DisplayLayout;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum passcode length supported by the entry buffer
pub const MAX_PASSCODE_LEN: usize = 8;

/// Entry buffer capacity (passcode plus one slack slot)
pub const ENTRY_CAPACITY: usize = MAX_PASSCODE_LEN + 1;

/// Passcode used when nothing else is configured
pub const DEFAULT_PASSCODE: [u8; 6] = [1, 2, 3, 4, 5, 6];

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Passcode has no digits
    EmptyPasscode,
    /// Passcode longer than [`MAX_PASSCODE_LEN`]
    PasscodeTooLong,
    /// Passcode element outside 0-9
    InvalidDigit(u8),
    /// A task period or dwell time is zero
    ZeroPeriod,
    /// Entered digits would be drawn outside the entry box
    LayoutOverflow,
}

/// Reference passcode
///
/// An ordered sequence of digits 0-9. Its length is the number of digits
/// the user must enter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Passcode {
    digits: Vec<u8, MAX_PASSCODE_LEN>,
}

impl Passcode {
    /// Build a passcode from a digit slice
    pub fn from_digits(digits: &[u8]) -> Result<Self, ConfigError> {
        if digits.is_empty() {
            return Err(ConfigError::EmptyPasscode);
        }
        if let Some(&bad) = digits.iter().find(|&&d| d > 9) {
            return Err(ConfigError::InvalidDigit(bad));
        }
        let digits = Vec::from_slice(digits).map_err(|_| ConfigError::PasscodeTooLong)?;
        Ok(Self { digits })
    }

    /// Digits of the passcode
    pub fn as_slice(&self) -> &[u8] {
        &self.digits
    }

    /// Number of digits (the required entry length)
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Always false for a constructed passcode
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }
}

impl Default for Passcode {
    fn default() -> Self {
        let mut digits = Vec::new();
        for d in DEFAULT_PASSCODE {
            let _ = digits.push(d);
        }
        Self { digits }
    }
}

/// Task cadences and hold times (all in milliseconds)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timing {
    /// Keypad scan period
    pub scan_period_ms: u32,
    /// Entry indicator refresh period
    pub refresh_period_ms: u32,
    /// Delay before the refresh task draws for the first time
    pub refresh_start_delay_ms: u32,
    /// How long the door stays unlocked after a correct passcode
    pub success_dwell_ms: u32,
    /// How long the error screen stays up after a wrong passcode
    pub failure_dwell_ms: u32,
    /// Time the servo needs to finish a move
    pub settle_ms: u32,
    /// Delay between boot progress bar columns
    pub boot_step_ms: u32,
    /// Hold after the boot progress bar completes
    pub boot_ready_ms: u32,
    /// Logo screen hold during boot
    pub logo_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            scan_period_ms: 10,
            refresh_period_ms: 100,
            refresh_start_delay_ms: 500,
            success_dwell_ms: 5000,
            failure_dwell_ms: 1000,
            settle_ms: 300,
            boot_step_ms: 10,
            boot_ready_ms: 500,
            logo_ms: 1000,
        }
    }
}

/// Complete lock configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LockConfig {
    /// Reference passcode
    pub passcode: Passcode,
    /// Task periods and dwell times
    pub timing: Timing,
    /// Screen geometry and colours
    pub layout: DisplayLayout,
}

impl LockConfig {
    /// Configuration with a custom passcode and default everything else
    pub fn with_passcode(digits: &[u8]) -> Result<Self, ConfigError> {
        let config = Self {
            passcode: Passcode::from_digits(digits)?,
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values the firmware cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.passcode.is_empty() {
            return Err(ConfigError::EmptyPasscode);
        }
        if let Some(&bad) = self.passcode.as_slice().iter().find(|&&d| d > 9) {
            return Err(ConfigError::InvalidDigit(bad));
        }

        let t = &self.timing;
        let periods = [
            t.scan_period_ms,
            t.refresh_period_ms,
            t.refresh_start_delay_ms,
            t.success_dwell_ms,
            t.failure_dwell_ms,
            t.settle_ms,
        ];
        if periods.contains(&0) {
            return Err(ConfigError::ZeroPeriod);
        }

        if !self.layout.fits_digits(self.passcode.len()) {
            return Err(ConfigError::LayoutOverflow);
        }

        Ok(())
    }

    /// Required entry length
    pub fn required_len(&self) -> usize {
        self.passcode.len()
    }
}
