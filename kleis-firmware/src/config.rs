//! Lock configuration
//!
//! The passcode is compiled in. A bad value here falls back to the
//! defaults instead of leaving the door without a working code.

use defmt::*;

use kleis_core::config::{LockConfig, DEFAULT_PASSCODE};

/// Reference passcode
const PASSCODE: [u8; 6] = DEFAULT_PASSCODE;

/// Build and validate the configuration
pub fn load() -> LockConfig {
    match LockConfig::with_passcode(&PASSCODE) {
        Ok(config) => {
            info!("Passcode configured: {} digits", config.required_len());
            config
        }
        Err(e) => {
            warn!("Invalid lock configuration: {:?}, using defaults", e);
            LockConfig::default()
        }
    }
}
