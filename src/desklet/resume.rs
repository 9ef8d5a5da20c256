//! Wake-from-suspend notifications from systemd-logind.

use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use zbus::{Connection, proxy};

use crate::signals::Handler;

/// logind session manager, reduced to the sleep signal.
#[proxy(
    default_service = "org.freedesktop.login1",
    interface = "org.freedesktop.login1.Manager",
    default_path = "/org/freedesktop/login1"
)]
pub trait LoginManager {
    /// Emitted with `true` right before suspend and `false` after resume.
    #[zbus(signal)]
    fn prepare_for_sleep(&self, start: bool) -> zbus::Result<()>;
}

/// Background task calling a handler whenever the system resumes.
pub struct ResumeMonitor {
    task: JoinHandle<()>,
}

impl ResumeMonitor {
    /// Starts listening on the system bus.
    ///
    /// A missing bus or logind is logged once and the monitor stays idle.
    pub fn spawn(on_resume: Handler<()>) -> Self {
        let task = tokio::spawn(async move {
            let connection = match Connection::system().await {
                Ok(connection) => connection,
                Err(e) => {
                    warn!(error = %e, "system bus unavailable, resume detection disabled");
                    return;
                }
            };

            let Ok(manager) = LoginManagerProxy::new(&connection).await else {
                warn!("failed to create logind proxy, resume detection disabled");
                return;
            };

            let Ok(mut sleep_signals) = manager.receive_prepare_for_sleep().await else {
                warn!("failed to subscribe to PrepareForSleep");
                return;
            };

            debug!("monitoring logind for resume");
            while let Some(signal) = sleep_signals.next().await {
                let Ok(args) = signal.args() else { continue };

                if !args.start {
                    info!("system resumed");
                    on_resume.call(&());
                }
            }
        });

        Self { task }
    }

    /// Stops listening.
    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for ResumeMonitor {
    fn drop(&mut self) {
        self.task.abort();
    }
}
