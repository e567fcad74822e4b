//! Keypad input task
//!
//! Scans the keypad every scan period and owns the passcode entry. Entry
//! changes are published to the refresh task; a confirmed entry runs the
//! outcome's action plan with the display held for the whole sequence.
//!
//! Scanning stops while a plan runs, so keys pressed during a dwell are
//! lost rather than queued.

use defmt::*;
use embassy_time::{Duration, Ticker, Timer};

use kleis_core::config::{DisplayLayout, LockConfig};
use kleis_core::dispatch::{perform, ActionPlan, Outcome};
use kleis_core::state::{Lock, Response, Session};
use kleis_core::traits::{BoltPosition, KeyScanner, NO_KEY};

use crate::board::{BoltServo, Keypad};
use crate::channels::{SharedPanel, ENTRY_UPDATE};

/// Input task - keypad scan, entry, verification and dispatch
#[embassy_executor::task]
pub async fn input_task(
    mut keypad: Keypad,
    mut lock: Lock<BoltServo>,
    panel: &'static SharedPanel,
    config: &'static LockConfig,
) {
    info!("Input task started");

    let mut session = Session::new(config);
    let mut ticker = Ticker::every(Duration::from_millis(config.timing.scan_period_ms as u64));

    loop {
        ticker.next().await;

        if lock.needs_relock() {
            relock(&mut lock);
        }

        let level = match keypad.read_key() {
            Ok(level) => level,
            Err(e) => {
                warn!("Keypad scan failed: {:?}", e);
                NO_KEY
            }
        };

        match session.scan(level) {
            Response::Ignored => {}
            Response::EntryChanged(snapshot) => {
                debug!("Entry: {}/{} digits", snapshot.count(), config.required_len());
                ENTRY_UPDATE.signal(snapshot);
            }
            Response::Verified(outcome) => {
                match outcome {
                    Outcome::Granted => info!("Passcode accepted"),
                    Outcome::Denied => warn!(
                        "Passcode rejected ({} consecutive)",
                        session.failed_attempts()
                    ),
                }

                let plan = ActionPlan::for_outcome(outcome, &config.timing);
                run_plan(&plan, &mut lock, panel, &config.layout).await;

                // The idle screen left an empty entry box; sync the indicator
                ENTRY_UPDATE.signal(session.snapshot());
                ticker.reset();
            }
        }
    }
}

/// Walk an action plan, waiting out each hold
///
/// Failed steps are logged and skipped; the re-lock later in the plan
/// still runs.
async fn run_plan(
    plan: &ActionPlan,
    lock: &mut Lock<BoltServo>,
    panel: &'static SharedPanel,
    layout: &DisplayLayout,
) {
    let mut display = panel.lock().await;
    debug!("Running plan: {} steps, {}ms", plan.steps().len(), plan.total_hold_ms());

    for &step in plan.steps() {
        match perform(step, lock, &mut *display, layout) {
            Ok(Some(ms)) => Timer::after_millis(ms as u64).await,
            Ok(None) => trace!("Step done: {:?}", step),
            Err(e) => warn!("Step {:?} failed: {:?}", step, e),
        }
    }

    debug!("Plan complete, lock {:?}", lock.state());
}

/// Try to drive the bolt back to `Locked`
fn relock(lock: &mut Lock<BoltServo>) {
    match lock.drive(BoltPosition::Locked) {
        Ok(()) => info!("Bolt re-locked"),
        Err(e) => debug!("Re-lock failed: {:?}", e),
    }
}
