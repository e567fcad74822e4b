//! Explicit lock state
//!
//! The servo gives no position feedback, so the state is whatever the last
//! successful command asked for. A failed command leaves the state
//! `Unknown`, which the input task treats as "re-lock on the next tick".

use crate::traits::{ActuatorError, BoltPosition, LockActuator};

/// Bolt state as last commanded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LockState {
    /// No successful command yet, or the last command failed
    Unknown,
    /// Bolt thrown
    Locked,
    /// Bolt retracted
    Unlocked,
}

impl From<BoltPosition> for LockState {
    fn from(position: BoltPosition) -> Self {
        match position {
            BoltPosition::Locked => LockState::Locked,
            BoltPosition::Unlocked => LockState::Unlocked,
        }
    }
}

/// Actuator plus the state it was last driven to
pub struct Lock<A> {
    actuator: A,
    state: LockState,
}

impl<A: LockActuator> Lock<A> {
    /// Wrap an actuator; the state is `Unknown` until the first command
    pub fn new(actuator: A) -> Self {
        Self {
            actuator,
            state: LockState::Unknown,
        }
    }

    /// Command the bolt and record the outcome
    pub fn drive(&mut self, position: BoltPosition) -> Result<(), ActuatorError> {
        match self.actuator.drive(position) {
            Ok(()) => {
                self.state = position.into();
                Ok(())
            }
            Err(e) => {
                self.state = LockState::Unknown;
                Err(e)
            }
        }
    }

    /// Last commanded state
    pub fn state(&self) -> LockState {
        self.state
    }

    /// Check whether the bolt must be driven back to `Locked`
    ///
    /// Only meaningful outside an unlock dwell; during the dwell the
    /// action plan owns the bolt.
    pub fn needs_relock(&self) -> bool {
        self.state != LockState::Locked
    }
}
