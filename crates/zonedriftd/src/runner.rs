//! The scheduled run loop
//!
//! One run: mint a correlation id, check whether the external IP moved,
//! and on change dispatch the updater fan-out. The known IP is committed
//! as soon as the update is dispatched, without waiting for propagation:
//! change detection is cheap and frequent, provider propagation is the
//! slow path and is allowed to lag behind the next check.

use std::net::IpAddr;

use tracing::{debug, error, info};
use uuid::Uuid;

use zonedrift_core::{IpChecker, Updater};

/// Drives one check-and-update cycle per scheduler tick
pub struct Runner {
    checker: Box<dyn IpChecker>,
    updater: Updater,
    known_ip: Option<IpAddr>,
}

impl Runner {
    /// Create a new runner; the known IP starts out unset, so the first
    /// observed address always counts as a change.
    pub fn new(checker: Box<dyn IpChecker>, updater: Updater) -> Self {
        Self {
            checker,
            updater,
            known_ip: None,
        }
    }

    /// Executes one scheduled run.
    ///
    /// Never fails: a lookup error is logged and the run is treated as
    /// no-change, ready for the next tick. The IP check is the only part
    /// awaited here; a slow endpoint therefore delays the next tick,
    /// while update tasks from a previous run may still be in flight.
    pub async fn run_once(&mut self) {
        let correlation_id = Uuid::new_v4().to_string();

        debug!(%correlation_id, "checking whether external IP has changed");

        let check = match self.checker.ip_has_changed(self.known_ip).await {
            Ok(check) => check,
            Err(err) => {
                error!(
                    %correlation_id,
                    %err,
                    "failed to determine whether external IP has changed"
                );
                return;
            }
        };

        if !check.changed {
            debug!(
                %correlation_id,
                observed_ip = %check.observed,
                "external IP has not changed"
            );
            return;
        }

        info!(
            %correlation_id,
            known_ip = ?self.known_ip,
            new_ip = %check.observed,
            "found new external IP"
        );

        self.updater.update(&correlation_id, check.observed);

        // Committed without waiting for the fan-out; the next check
        // compares against this address even while propagation runs.
        self.known_ip = Some(check.observed);
    }

    /// Drains outstanding update tasks before shutdown.
    pub async fn stop(&mut self) {
        info!("stopping runner");
        self.updater.stop().await;
    }
}
