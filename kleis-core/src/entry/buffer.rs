//! Entry buffer state machine
//!
//! ```text
//!            digit               digit (count == required - 1)
//!   Idle ────────────► Entering ─────────────────────────────► Full
//!    ▲                    │                                     │
//!    └──── Clear / Confirm (buffer zeroed) ◄────────────────────┘
//! ```
//!
//! Digits pressed while `Full` are dropped. The buffer has one slack slot
//! beyond the required length; `count` never reaches it.

use crate::config::{ENTRY_CAPACITY, MAX_PASSCODE_LEN};

/// Value every slot holds after a clear
pub const SLOT_SENTINEL: u8 = 0;

/// Entry progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntryState {
    /// Nothing entered
    Idle,
    /// Some digits entered, more accepted
    Entering,
    /// Required number of digits entered
    Full,
}

/// Digits entered so far
#[derive(Debug, Clone)]
pub struct EntryBuffer {
    slots: [u8; ENTRY_CAPACITY],
    count: usize,
    required: usize,
}

impl EntryBuffer {
    /// Create an empty buffer for a passcode of `required` digits
    ///
    /// `required` is clamped to `1..=MAX_PASSCODE_LEN`.
    pub fn new(required: usize) -> Self {
        Self {
            slots: [SLOT_SENTINEL; ENTRY_CAPACITY],
            count: 0,
            required: required.clamp(1, MAX_PASSCODE_LEN),
        }
    }

    /// Append a digit
    ///
    /// Returns false if the digit was dropped because the buffer is full
    /// or the value is not a digit.
    pub fn push(&mut self, digit: u8) -> bool {
        if digit > 9 || self.count >= self.required {
            return false;
        }
        match self.slots.get_mut(self.count) {
            Some(slot) => {
                *slot = digit;
                self.count += 1;
                true
            }
            None => false,
        }
    }

    /// Zero every slot and return to `Idle`
    pub fn clear(&mut self) {
        self.slots.fill(SLOT_SENTINEL);
        self.count = 0;
    }

    /// Number of digits entered
    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of digits the passcode needs
    pub fn required(&self) -> usize {
        self.required
    }

    /// Slots in use including the slack slot
    pub fn capacity(&self) -> usize {
        self.required + 1
    }

    /// Current progress
    pub fn state(&self) -> EntryState {
        match self.count {
            0 => EntryState::Idle,
            n if n >= self.required => EntryState::Full,
            _ => EntryState::Entering,
        }
    }

    /// Digits entered so far
    pub fn entered(&self) -> &[u8] {
        &self.slots[..self.count]
    }

    /// The `required` leading slots, sentinel-filled past `count`
    ///
    /// This is what verification compares against the reference.
    pub fn comparison_window(&self) -> &[u8] {
        &self.slots[..self.required]
    }

    /// All slots in use, including the slack slot
    pub fn slots(&self) -> &[u8] {
        &self.slots[..self.capacity()]
    }

    /// Copy of the current state for observers
    pub fn snapshot(&self) -> EntrySnapshot {
        EntrySnapshot {
            digits: self.slots,
            count: self.count as u8,
            required: self.required as u8,
        }
    }
}

/// Point-in-time copy of the entry published to the display task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EntrySnapshot {
    digits: [u8; ENTRY_CAPACITY],
    count: u8,
    required: u8,
}

impl EntrySnapshot {
    /// Snapshot of an empty entry
    pub const fn empty(required: u8) -> Self {
        Self {
            digits: [SLOT_SENTINEL; ENTRY_CAPACITY],
            count: 0,
            required,
        }
    }

    /// Build a snapshot from raw parts without checking them
    pub const fn from_raw(digits: [u8; ENTRY_CAPACITY], count: u8, required: u8) -> Self {
        Self {
            digits,
            count,
            required,
        }
    }

    /// Count as published, unchecked
    pub fn count(&self) -> usize {
        self.count as usize
    }

    /// Count clamped to the largest value the buffer can legally hold
    pub fn clamped_count(&self) -> usize {
        let limit = (self.required as usize).min(ENTRY_CAPACITY - 1);
        self.count().min(limit)
    }

    /// Entered digits, bounded by [`Self::clamped_count`]
    pub fn digits(&self) -> &[u8] {
        &self.digits[..self.clamped_count()]
    }
}
