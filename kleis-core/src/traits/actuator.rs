//! Bolt actuator trait

/// Errors that can occur when moving the bolt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorError {
    /// Output device is not attached and could not be re-attached
    Unavailable,
    /// Output device rejected the command
    Output,
}

/// Commanded bolt position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoltPosition {
    /// Bolt thrown, door cannot open
    Locked,
    /// Bolt retracted
    Unlocked,
}

/// Trait for the lock actuator
///
/// Implementations move the bolt to one of two fixed positions. They do not
/// wait for the mechanism to settle; the caller owns that delay.
pub trait LockActuator {
    /// Command the bolt to a position
    fn drive(&mut self, position: BoltPosition) -> Result<(), ActuatorError>;

    /// Check whether the output device is attached
    fn is_attached(&self) -> bool;
}
