//! Test doubles and common utilities for orchestrator contract tests
//!
//! The mock provider answers with scripted record sets, supports failure
//! injection on both trait methods, and records every call so tests can
//! assert on isolation and fail-fast behavior.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use zonedrift_core::{Domain, Error, Provider, ProviderRecord, Result};

/// Builds a `Domain` without going through the classifier
pub fn domain(name: &str, labels: &[&str], provider: &str) -> Domain {
    Domain {
        name: name.to_string(),
        records: labels.iter().map(|l| l.to_string()).collect(),
        provider: provider.to_string(),
    }
}

/// Builds a synthetic provider record
pub fn record(id: &str, domain: &str, name: &str, content: &str) -> ProviderRecord {
    ProviderRecord {
        id: id.to_string(),
        domain: domain.to_string(),
        name: name.to_string(),
        record_type: "A".to_string(),
        content: content.to_string(),
        metadata: serde_json::Value::Null,
    }
}

/// A mock provider with scripted record sets and failure injection
pub struct MockProvider {
    name: &'static str,
    /// Records answered per domain name; successful updates are written
    /// back so a second run observes converged content
    records: Mutex<HashMap<String, Vec<ProviderRecord>>>,
    /// When true, `records()` fails
    fail_records: bool,
    /// Record ids whose update fails
    fail_update_ids: Vec<String>,
    /// Delay injected into every `update_record` call
    update_delay: Duration,
    records_calls: AtomicUsize,
    update_calls: AtomicUsize,
    updated: Mutex<Vec<ProviderRecord>>,
}

impl MockProvider {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            records: Mutex::new(HashMap::new()),
            fail_records: false,
            fail_update_ids: Vec::new(),
            update_delay: Duration::ZERO,
            records_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
            updated: Mutex::new(Vec::new()),
        }
    }

    /// Script the records answered for a domain
    pub fn with_records(self, domain: &str, records: Vec<ProviderRecord>) -> Self {
        self.records
            .lock()
            .unwrap()
            .insert(domain.to_string(), records);
        self
    }

    /// Make every `records()` call fail
    pub fn failing_records(mut self) -> Self {
        self.fail_records = true;
        self
    }

    /// Make updates for the given record id fail
    pub fn failing_update(mut self, id: &str) -> Self {
        self.fail_update_ids.push(id.to_string());
        self
    }

    /// Inject a delay into every `update_record` call
    pub fn with_update_delay(mut self, delay: Duration) -> Self {
        self.update_delay = delay;
        self
    }

    /// Number of times `records()` was called
    pub fn records_calls(&self) -> usize {
        self.records_calls.load(Ordering::SeqCst)
    }

    /// Number of times `update_record()` was called (including failed calls)
    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    /// Records that were successfully updated, in call order
    pub fn updated(&self) -> Vec<ProviderRecord> {
        self.updated.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn records(&self, domain: &Domain) -> Result<Vec<ProviderRecord>> {
        self.records_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_records {
            return Err(Error::provider(self.name, "records unavailable"));
        }

        Ok(self
            .records
            .lock()
            .unwrap()
            .get(&domain.name)
            .cloned()
            .unwrap_or_default())
    }

    async fn update_record(&self, record: &ProviderRecord) -> Result<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);

        if !self.update_delay.is_zero() {
            tokio::time::sleep(self.update_delay).await;
        }

        if self.fail_update_ids.iter().any(|id| id == &record.id) {
            return Err(Error::provider(
                self.name,
                format!("update failed for record {}", record.id),
            ));
        }

        self.updated.lock().unwrap().push(record.clone());

        // Write back so a later `records()` call sees the new content.
        if let Some(records) = self.records.lock().unwrap().get_mut(&record.domain)
            && let Some(existing) = records.iter_mut().find(|r| r.id == record.id)
        {
            existing.content = record.content.clone();
        }

        Ok(())
    }
}
