use std::future;

use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    time::{Instant, sleep_until},
};
use tracing::{debug, instrument};

use super::{AnalogClock, DeskletEvent};
use crate::{clock::TickId, core::Result};

/// Creates the channel feeding a desklet's event loop.
pub fn event_channel() -> (UnboundedSender<DeskletEvent>, UnboundedReceiver<DeskletEvent>) {
    mpsc::unbounded_channel()
}

/// Adds the desklet and drives it until it is removed.
///
/// Events and clock ticks are handled one at a time on the calling task.
///
/// # Errors
/// Returns error if the desklet cannot be added to its host.
#[instrument(skip_all, fields(instance = %clock.instance_id()))]
pub async fn run(mut clock: AnalogClock, mut events: UnboundedReceiver<DeskletEvent>) -> Result<()> {
    clock.on_added()?;

    loop {
        let next = clock.next_tick();

        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else {
                    debug!("event channel closed");
                    clock.on_removed();
                    break;
                };

                if !clock.handle_event(event) {
                    break;
                }
            }

            id = wait_for_tick(next) => clock.tick(id),
        }
    }

    Ok(())
}

async fn wait_for_tick(next: Option<(TickId, Instant)>) -> TickId {
    match next {
        Some((id, deadline)) => {
            sleep_until(deadline).await;
            id
        }
        None => future::pending().await,
    }
}
