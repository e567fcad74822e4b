//! Action plans for verification outcomes

use heapless::Vec;

use crate::config::{DisplayLayout, Timing};
use crate::display::{render_screen, Screen};
use crate::state::Lock;
use crate::traits::{ActuatorError, BoltPosition, DisplayError, LockActuator, LockDisplay};

/// Maximum steps in a plan
pub const MAX_PLAN_STEPS: usize = 8;

/// Verification outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Entry matched the reference passcode
    Granted,
    /// Entry did not match
    Denied,
}

/// One step of an action plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Move the bolt
    Drive(BoltPosition),
    /// Paint a full screen
    Show(Screen),
    /// Wait, in milliseconds
    Hold(u32),
}

/// Error raised by a single step
///
/// Step errors never abort a plan: a failed screen must not skip the
/// re-lock that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepError {
    Actuator(ActuatorError),
    Display(DisplayError),
}

impl From<ActuatorError> for StepError {
    fn from(e: ActuatorError) -> Self {
        StepError::Actuator(e)
    }
}

impl From<DisplayError> for StepError {
    fn from(e: DisplayError) -> Self {
        StepError::Display(e)
    }
}

/// Ordered steps for one outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionPlan {
    steps: Vec<Step, MAX_PLAN_STEPS>,
}

impl ActionPlan {
    /// Build the plan for a verification outcome
    ///
    /// Granted: unlock, success screen, success dwell, lock, idle prompt.
    /// Denied: lock (the bolt should already be thrown), error screen,
    /// failure dwell, idle prompt. Every bolt move is followed by the
    /// servo settling time.
    pub fn for_outcome(outcome: Outcome, timing: &Timing) -> Self {
        let steps: &[Step] = match outcome {
            Outcome::Granted => &[
                Step::Drive(BoltPosition::Unlocked),
                Step::Hold(timing.settle_ms),
                Step::Show(Screen::Granted),
                Step::Hold(timing.success_dwell_ms),
                Step::Drive(BoltPosition::Locked),
                Step::Hold(timing.settle_ms),
                Step::Show(Screen::Idle),
            ],
            Outcome::Denied => &[
                Step::Drive(BoltPosition::Locked),
                Step::Hold(timing.settle_ms),
                Step::Show(Screen::Denied),
                Step::Hold(timing.failure_dwell_ms),
                Step::Show(Screen::Idle),
            ],
        };

        let mut plan = Vec::new();
        for &step in steps {
            // Both plans are shorter than MAX_PLAN_STEPS
            let _ = plan.push(step);
        }
        Self { steps: plan }
    }

    /// Steps in execution order
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Sum of all holds
    pub fn total_hold_ms(&self) -> u32 {
        self.steps
            .iter()
            .map(|s| match s {
                Step::Hold(ms) => *ms,
                _ => 0,
            })
            .fold(0u32, u32::saturating_add)
    }
}

/// Execute a non-hold step
///
/// Returns `Ok(Some(ms))` for a hold, which the caller must wait out on its
/// own timer, and `Ok(None)` once a drive or show step has completed.
pub fn perform<A, D>(
    step: Step,
    lock: &mut Lock<A>,
    display: &mut D,
    layout: &DisplayLayout,
) -> Result<Option<u32>, StepError>
where
    A: LockActuator,
    D: LockDisplay,
{
    match step {
        Step::Drive(position) => {
            lock.drive(position)?;
            Ok(None)
        }
        Step::Show(screen) => {
            render_screen(display, screen, layout)?;
            Ok(None)
        }
        Step::Hold(ms) => Ok(Some(ms)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LockState;
    use crate::traits::{Artwork, Color, Point, Rect};

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Bolt(BoltPosition),
        Art(Artwork),
        Wait(u32),
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<Event, 32>,
        fail_display: bool,
        fail_actuator: bool,
    }

    struct RecActuator<'a>(&'a core::cell::RefCell<Recorder>);
    struct RecDisplay<'a>(&'a core::cell::RefCell<Recorder>);

    impl LockActuator for RecActuator<'_> {
        fn drive(&mut self, position: BoltPosition) -> Result<(), ActuatorError> {
            let mut r = self.0.borrow_mut();
            if r.fail_actuator {
                return Err(ActuatorError::Output);
            }
            let _ = r.events.push(Event::Bolt(position));
            Ok(())
        }

        fn is_attached(&self) -> bool {
            true
        }
    }

    impl LockDisplay for RecDisplay<'_> {
        fn fill_rect(&mut self, _: Rect, _: Color) -> Result<(), DisplayError> {
            Ok(())
        }
        fn draw_vline(&mut self, _: u16, _: u16, _: u16, _: Color) -> Result<(), DisplayError> {
            Ok(())
        }
        fn draw_glyph(&mut self, _: Point, _: char, _: Color, _: Color) -> Result<(), DisplayError> {
            Ok(())
        }
        fn draw_text(&mut self, _: Point, _: &str, _: Color, _: Color) -> Result<(), DisplayError> {
            Ok(())
        }
        fn draw_artwork(&mut self, art: Artwork) -> Result<(), DisplayError> {
            let mut r = self.0.borrow_mut();
            if r.fail_display {
                return Err(DisplayError::Communication);
            }
            let _ = r.events.push(Event::Art(art));
            Ok(())
        }
        fn is_ready(&self) -> bool {
            true
        }
    }

    fn run(plan: &ActionPlan, recorder: &core::cell::RefCell<Recorder>) -> LockState {
        let mut lock = Lock::new(RecActuator(recorder));
        let mut display = RecDisplay(recorder);
        let layout = DisplayLayout::default();
        for &step in plan.steps() {
            if let Ok(Some(ms)) = perform(step, &mut lock, &mut display, &layout) {
                let _ = recorder.borrow_mut().events.push(Event::Wait(ms));
            }
        }
        lock.state()
    }

    #[test]
    fn test_granted_plan_order() {
        let timing = Timing::default();
        let plan = ActionPlan::for_outcome(Outcome::Granted, &timing);
        let recorder = core::cell::RefCell::new(Recorder::default());
        let state = run(&plan, &recorder);

        assert_eq!(
            recorder.borrow().events.as_slice(),
            &[
                Event::Bolt(BoltPosition::Unlocked),
                Event::Wait(300),
                Event::Art(Artwork::Granted),
                Event::Wait(5000),
                Event::Bolt(BoltPosition::Locked),
                Event::Wait(300),
                Event::Art(Artwork::IdleBackdrop),
            ]
        );
        assert_eq!(state, LockState::Locked);
    }

    #[test]
    fn test_denied_plan_order() {
        let timing = Timing::default();
        let plan = ActionPlan::for_outcome(Outcome::Denied, &timing);
        let recorder = core::cell::RefCell::new(Recorder::default());
        let state = run(&plan, &recorder);

        assert_eq!(
            recorder.borrow().events.as_slice(),
            &[
                Event::Bolt(BoltPosition::Locked),
                Event::Wait(300),
                Event::Art(Artwork::Denied),
                Event::Wait(1000),
                Event::Art(Artwork::IdleBackdrop),
            ]
        );
        assert_eq!(state, LockState::Locked);
    }

    #[test]
    fn test_hold_totals() {
        let timing = Timing::default();
        assert_eq!(
            ActionPlan::for_outcome(Outcome::Granted, &timing).total_hold_ms(),
            5600
        );
        assert_eq!(
            ActionPlan::for_outcome(Outcome::Denied, &timing).total_hold_ms(),
            1300
        );
    }

    #[test]
    fn test_display_failure_still_relocks() {
        let timing = Timing::default();
        let plan = ActionPlan::for_outcome(Outcome::Granted, &timing);
        let recorder = core::cell::RefCell::new(Recorder {
            fail_display: true,
            ..Default::default()
        });
        let state = run(&plan, &recorder);

        let r = recorder.borrow();
        assert_eq!(r.events.first(), Some(&Event::Bolt(BoltPosition::Unlocked)));
        assert!(r.events.contains(&Event::Bolt(BoltPosition::Locked)));
        assert_eq!(state, LockState::Locked);
    }

    #[test]
    fn test_actuator_failure_leaves_unknown() {
        let timing = Timing::default();
        let plan = ActionPlan::for_outcome(Outcome::Denied, &timing);
        let recorder = core::cell::RefCell::new(Recorder {
            fail_actuator: true,
            ..Default::default()
        });
        assert_eq!(run(&plan, &recorder), LockState::Unknown);
    }
}
