//! Inter-task communication
//!
//! The input task is the only writer of the passcode entry. It publishes a
//! copy after every change; the refresh task only ever sees those copies.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;

use kleis_core::entry::EntrySnapshot;

use crate::board::Panel;

/// Latest entry snapshot (updated by the input task)
///
/// A signal holds one value, so a slow reader skips straight to the newest
/// snapshot.
pub static ENTRY_UPDATE: Signal<CriticalSectionRawMutex, EntrySnapshot> = Signal::new();

/// Display shared by the input and refresh tasks
pub type SharedPanel = Mutex<CriticalSectionRawMutex, Panel>;
