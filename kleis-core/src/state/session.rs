//! Passcode entry session
//!
//! All keypad handling in one place: edge detection, key mapping, the
//! entry buffer and verification. The session never touches hardware; it
//! reports what changed and the caller decides what to draw or actuate.

use crate::config::LockConfig;
use crate::dispatch::Outcome;
use crate::entry::{verify, EntryBuffer, EntrySnapshot};
use crate::keypad::{map_code, EdgeDetector, KeyEvent};

/// Result of feeding one scan tick or key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    /// Nothing observable changed
    Ignored,
    /// Entry changed; the snapshot should be published to the display task
    EntryChanged(EntrySnapshot),
    /// Confirm pressed; entry already cleared
    Verified(Outcome),
}

/// Entry session bound to a configuration
pub struct Session<'a> {
    config: &'a LockConfig,
    edge: EdgeDetector,
    entry: EntryBuffer,
    failed_attempts: u32,
}

impl<'a> Session<'a> {
    /// Create an idle session
    pub fn new(config: &'a LockConfig) -> Self {
        Self {
            config,
            edge: EdgeDetector::new(),
            entry: EntryBuffer::new(config.required_len()),
            failed_attempts: 0,
        }
    }

    /// Feed the raw level read on one scan tick
    pub fn scan(&mut self, level: u8) -> Response {
        match self.edge.update(level) {
            Some(code) => self.handle(map_code(code)),
            None => Response::Ignored,
        }
    }

    /// Apply a key event
    pub fn handle(&mut self, event: KeyEvent) -> Response {
        match event {
            KeyEvent::Digit(d) => {
                if self.entry.push(d) {
                    Response::EntryChanged(self.entry.snapshot())
                } else {
                    Response::Ignored
                }
            }
            KeyEvent::Clear => {
                let had_digits = self.entry.count() > 0;
                self.entry.clear();
                if had_digits {
                    Response::EntryChanged(self.entry.snapshot())
                } else {
                    Response::Ignored
                }
            }
            KeyEvent::Confirm => Response::Verified(self.confirm()),
            KeyEvent::Unmapped => Response::Ignored,
        }
    }

    /// Verify the entry against the reference, then clear it
    fn confirm(&mut self) -> Outcome {
        let reference = self.config.passcode.as_slice();
        let matched = verify(
            self.entry.comparison_window(),
            reference,
            self.entry.required(),
        );
        self.entry.clear();

        if matched {
            self.failed_attempts = 0;
            Outcome::Granted
        } else {
            self.failed_attempts = self.failed_attempts.saturating_add(1);
            Outcome::Denied
        }
    }

    /// Current entry buffer
    pub fn entry(&self) -> &EntryBuffer {
        &self.entry
    }

    /// Snapshot of the current entry
    pub fn snapshot(&self) -> EntrySnapshot {
        self.entry.snapshot()
    }

    /// Consecutive denied attempts since the last grant
    ///
    /// Informational only; attempts are not throttled.
    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryState;
    use crate::keypad::KEYMAP;

    /// Raw code for a key event according to the keymap
    fn code_for(event: KeyEvent) -> u8 {
        KEYMAP.iter().position(|&e| e == event).unwrap() as u8 + 1
    }

    /// Press and release each key, one tick each
    fn type_keys(session: &mut Session, keys: &[KeyEvent]) -> Vec<Response> {
        let mut out = Vec::new();
        for &key in keys {
            out.push(session.scan(code_for(key)));
            out.push(session.scan(0));
        }
        out.into_iter().filter(|r| *r != Response::Ignored).collect()
    }

    fn digits(ds: &[u8]) -> Vec<KeyEvent> {
        ds.iter().map(|&d| KeyEvent::Digit(d)).collect()
    }

    #[test]
    fn test_correct_code_granted() {
        let config = LockConfig::default();
        let mut session = Session::new(&config);

        let mut keys = digits(&[1, 2, 3, 4, 5, 6]);
        keys.push(KeyEvent::Confirm);
        let responses = type_keys(&mut session, &keys);

        assert_eq!(responses.last(), Some(&Response::Verified(Outcome::Granted)));
        assert_eq!(session.entry().count(), 0);
        assert_eq!(session.entry().state(), EntryState::Idle);
    }

    #[test]
    fn test_short_code_denied_and_cleared() {
        let config = LockConfig::default();
        let mut session = Session::new(&config);

        let mut keys = digits(&[1, 2, 3]);
        keys.push(KeyEvent::Confirm);
        let responses = type_keys(&mut session, &keys);

        assert_eq!(responses.last(), Some(&Response::Verified(Outcome::Denied)));
        assert_eq!(session.entry().count(), 0);
        assert!(session.entry().slots().iter().all(|&s| s == 0));
        assert_eq!(session.failed_attempts(), 1);
    }

    #[test]
    fn test_clear_discards_prefix() {
        let config = LockConfig::with_passcode(&[4, 5, 6, 7, 8, 9]).unwrap();
        let mut session = Session::new(&config);

        let mut keys = digits(&[1, 2, 3]);
        keys.push(KeyEvent::Clear);
        keys.extend(digits(&[4, 5, 6, 7, 8, 9]));
        keys.push(KeyEvent::Confirm);
        let responses = type_keys(&mut session, &keys);

        assert_eq!(responses.last(), Some(&Response::Verified(Outcome::Granted)));
    }

    #[test]
    fn test_clear_when_idle_is_ignored() {
        let config = LockConfig::default();
        let mut session = Session::new(&config);
        assert_eq!(session.handle(KeyEvent::Clear), Response::Ignored);
    }

    #[test]
    fn test_extra_digits_ignored_when_full() {
        let config = LockConfig::default();
        let mut session = Session::new(&config);

        let mut keys = digits(&[1, 2, 3, 4, 5, 6]);
        keys.extend(digits(&[7, 8, 9]));
        let responses = type_keys(&mut session, &keys);

        assert_eq!(responses.len(), 6);
        assert_eq!(session.entry().count(), 6);

        // The overflow digits did not spill into the comparison
        assert_eq!(
            session.handle(KeyEvent::Confirm),
            Response::Verified(Outcome::Granted)
        );
    }

    #[test]
    fn test_confirm_on_empty_entry() {
        let config = LockConfig::default();
        let mut session = Session::new(&config);
        assert_eq!(
            session.handle(KeyEvent::Confirm),
            Response::Verified(Outcome::Denied)
        );

        let zeros = LockConfig::with_passcode(&[0, 0, 0, 0, 0, 0]).unwrap();
        let mut session = Session::new(&zeros);
        assert_eq!(
            session.handle(KeyEvent::Confirm),
            Response::Verified(Outcome::Granted)
        );
    }

    #[test]
    fn test_held_key_counts_once() {
        let config = LockConfig::default();
        let mut session = Session::new(&config);

        let code = code_for(KeyEvent::Digit(1));
        let changes = (0..7)
            .map(|_| session.scan(code))
            .filter(|r| matches!(r, Response::EntryChanged(_)))
            .count();

        assert_eq!(changes, 1);
        assert_eq!(session.entry().entered(), &[1]);
    }

    #[test]
    fn test_reserved_column_ignored() {
        let config = LockConfig::default();
        let mut session = Session::new(&config);
        for code in [4, 8, 12, 16] {
            assert_eq!(session.scan(code), Response::Ignored);
            session.scan(0);
        }
        assert_eq!(session.entry().count(), 0);
    }

    #[test]
    fn test_grant_resets_failed_attempts() {
        let config = LockConfig::default();
        let mut session = Session::new(&config);
        session.handle(KeyEvent::Confirm);
        session.handle(KeyEvent::Confirm);
        assert_eq!(session.failed_attempts(), 2);

        let mut keys = digits(&[1, 2, 3, 4, 5, 6]);
        keys.push(KeyEvent::Confirm);
        for key in keys {
            session.handle(key);
        }
        assert_eq!(session.failed_attempts(), 0);
    }

    #[test]
    fn test_entry_snapshots_track_count() {
        let config = LockConfig::default();
        let mut session = Session::new(&config);
        let responses = type_keys(&mut session, &digits(&[9, 8, 7]));

        let counts: Vec<usize> = responses
            .iter()
            .map(|r| match r {
                Response::EntryChanged(snap) => snap.count(),
                _ => usize::MAX,
            })
            .collect();
        assert_eq!(counts, vec![1, 2, 3]);
    }
}
