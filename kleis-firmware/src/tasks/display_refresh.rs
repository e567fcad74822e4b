//! Entry indicator refresh task
//!
//! Redraws the passcode entry box when the entry count changes. Updates
//! arrive through [`ENTRY_UPDATE`]; a ticker caps the redraw rate, and
//! whatever snapshot is newest when the panel is free gets drawn.

use defmt::*;
use embassy_time::{Duration, Ticker, Timer};

use kleis_core::config::LockConfig;
use kleis_core::display::EntryIndicator;
use kleis_core::entry::EntrySnapshot;

use crate::channels::{SharedPanel, ENTRY_UPDATE};

/// Display refresh task - keeps the entry indicator in sync
#[embassy_executor::task]
pub async fn display_refresh_task(panel: &'static SharedPanel, config: &'static LockConfig) {
    info!("Display refresh task started");

    // Let the boot screens settle before the first redraw
    Timer::after_millis(config.timing.refresh_start_delay_ms as u64).await;

    let mut indicator = EntryIndicator::new();
    let mut snapshot = EntrySnapshot::empty(config.required_len() as u8);
    let mut ticker = Ticker::every(Duration::from_millis(config.timing.refresh_period_ms as u64));

    loop {
        {
            let mut display = panel.lock().await;

            // The input task may have published again while we waited
            if let Some(latest) = ENTRY_UPDATE.try_take() {
                snapshot = latest;
            }

            match indicator.refresh(&snapshot, &mut *display, &config.layout) {
                Ok(true) => trace!("Entry indicator redrawn: {}", indicator.last_rendered()),
                Ok(false) => {}
                Err(e) => warn!("Entry indicator refresh failed: {:?}", e),
            }
        }

        ticker.next().await;

        // Retry a failed redraw on the next tick, otherwise wait for news
        if indicator.last_rendered().is_some() {
            snapshot = ENTRY_UPDATE.wait().await;
        }
    }
}
