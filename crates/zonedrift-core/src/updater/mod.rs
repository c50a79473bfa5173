//! The update orchestrator
//!
//! The [`Updater`] owns the provider registration table and the domain
//! list. On each detected IP change it fans out one concurrent task per
//! registered domain (not per provider: a provider may own several
//! domains, each updated independently).
//!
//! ## Failure Isolation
//!
//! Domains fail independently. A missing provider registration, a failed
//! `records()` fetch, or a failed record update aborts only that domain's
//! task for the run; sibling domains proceed. Within one domain, records
//! are processed in provider-reported order and the first failed update
//! stops that domain's remaining records (fail-fast).
//!
//! ## Lifecycle
//!
//! Registration happens single-threaded at setup time; the tables are
//! read-only once updates start, so concurrent tasks need no locking.
//! In-flight tasks are tracked in one [`JoinSet`] spanning the updater's
//! lifetime; [`Updater::stop`] drains it before returning.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::domain::Domain;
use crate::error::{Error, Result};
use crate::record::ProviderRecord;
use crate::traits::Provider;

/// Update orchestrator
pub struct Updater {
    /// Domains to keep updated, in registration order
    domains: Vec<Domain>,

    /// Registered providers, keyed by [`Provider::name`]
    providers: HashMap<String, Arc<dyn Provider>>,

    /// In-flight per-domain tasks across all runs
    tasks: JoinSet<()>,

    /// Set by [`Updater::stop`]; later `update` calls become no-ops
    stopped: bool,
}

impl Updater {
    /// Create a new updater with no providers or domains registered
    pub fn new() -> Self {
        Self {
            domains: Vec::new(),
            providers: HashMap::new(),
            tasks: JoinSet::new(),
            stopped: false,
        }
    }

    /// Registers a provider under its [`Provider::name`].
    ///
    /// The last registration for a given name wins.
    pub fn register_provider(&mut self, provider: Arc<dyn Provider>) {
        self.providers.insert(provider.name().to_string(), provider);
    }

    /// Registers domains to keep updated.
    ///
    /// Setup-time only: the domain list is read from concurrent tasks
    /// once updates start.
    pub fn register_domains(&mut self, domains: Vec<Domain>) {
        self.domains.extend(domains);
    }

    /// Number of registered domains
    pub fn domain_count(&self) -> usize {
        self.domains.len()
    }

    /// Fans out one concurrent update task per registered domain.
    ///
    /// Returns as soon as the tasks are spawned; propagation is allowed
    /// to outlive the call (and overlap the next run's check) and is
    /// drained by [`Updater::stop`].
    pub fn update(&mut self, correlation_id: &str, new_ip: IpAddr) {
        if self.stopped {
            warn!(%correlation_id, "update requested after stop, ignoring");
            return;
        }

        // Reap tasks from earlier runs that have already finished.
        while self.tasks.try_join_next().is_some() {}

        for domain in &self.domains {
            let provider = self.providers.get(&domain.provider).cloned();
            let domain = domain.clone();
            let correlation_id = correlation_id.to_string();

            self.tasks.spawn(async move {
                info!(
                    %correlation_id,
                    domain = %domain.name,
                    provider = %domain.provider,
                    new_ip = %new_ip,
                    "starting update for domain"
                );

                if let Err(err) =
                    update_domain(provider.as_deref(), &domain, &correlation_id, new_ip).await
                {
                    error!(
                        %correlation_id,
                        domain = %domain.name,
                        provider = %domain.provider,
                        new_ip = %new_ip,
                        %err,
                        "failed to update domain"
                    );
                    return;
                }

                info!(
                    %correlation_id,
                    domain = %domain.name,
                    provider = %domain.provider,
                    new_ip = %new_ip,
                    "finished update for domain"
                );
            });
        }
    }

    /// Blocks until every in-flight per-domain task has completed.
    ///
    /// Cooperative drain, not cancellation: a hung provider call keeps
    /// its domain task (and this method) pending until the provider's
    /// own network timeout fires. Stopping is idempotent, and `update`
    /// calls after this returns are no-ops.
    pub async fn stop(&mut self) {
        info!("stopping updater");
        self.stopped = true;

        while self.tasks.join_next().await.is_some() {}
    }
}

impl Default for Updater {
    fn default() -> Self {
        Self::new()
    }
}

/// Updates one domain: fetch the provider's current records, rewrite
/// every record whose content differs from `new_ip`, skip the rest.
async fn update_domain(
    provider: Option<&dyn Provider>,
    domain: &Domain,
    correlation_id: &str,
    new_ip: IpAddr,
) -> Result<()> {
    let provider = provider.ok_or_else(|| Error::provider_not_found(domain.provider.as_str()))?;

    let records = provider.records(domain).await?;
    let target = new_ip.to_string();

    for record in records {
        if record.content == target {
            info!(
                %correlation_id,
                domain = %domain.name,
                record = %record.name,
                record_id = %record.id,
                content = %record.content,
                "record already has desired content"
            );
            continue;
        }

        let previous = record.content.clone();
        let desired = ProviderRecord {
            content: target.clone(),
            ..record
        };

        provider.update_record(&desired).await.map_err(|err| {
            error!(
                %correlation_id,
                domain = %domain.name,
                record = %desired.name,
                record_id = %desired.id,
                previous_content = %previous,
                new_content = %desired.content,
                %err,
                "failed to update record"
            );
            err
        })?;

        info!(
            %correlation_id,
            domain = %domain.name,
            record = %desired.name,
            record_id = %desired.id,
            previous_content = %previous,
            new_content = %desired.content,
            "record updated"
        );
    }

    Ok(())
}
