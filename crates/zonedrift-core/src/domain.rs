//! Domain classification
//!
//! Raw record strings ("sub.example.com") are split into a registrable
//! domain plus a subdomain label via public-suffix matching, then grouped
//! per domain. The registrable domain is the longest matching public
//! suffix plus one label; a record equal to its registrable domain gets
//! the apex marker `"@"`.
//!
//! A record that is neither its registrable domain nor a dotted subdomain
//! of it is rejected outright. This is a configuration validation rule:
//! such a string cannot name an upstream record, and silently passing it
//! through would only surface as a confusing no-op at update time.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Marker label for a record at the registrable domain itself
pub const APEX: &str = "@";

/// A registrable domain and the record labels managed under it
///
/// Created once at configuration time from a flat record list and
/// immutable thereafter; owned by the [`Updater`](crate::Updater)'s
/// registration table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    /// Registrable domain name, e.g. "example.com"
    pub name: String,

    /// Managed labels: `"@"` for the apex, otherwise a subdomain prefix
    /// with no trailing dot, in first-seen order
    pub records: Vec<String>,

    /// Name of the provider responsible for this domain
    pub provider: String,
}

impl Domain {
    /// Returns true if `reported` (a full record name as reported by a
    /// provider) corresponds to one of this domain's configured labels,
    /// using the same apex convention as the classifier.
    pub fn has_record(&self, reported: &str) -> bool {
        match record_label(reported, &self.name) {
            Some(label) => self.records.iter().any(|r| r == label),
            None => false,
        }
    }
}

/// Parses a flat list of record strings into per-domain groupings.
///
/// Grouping preserves first-seen order, both for domains and for labels
/// within a domain. Duplicate domains merge their label lists; duplicate
/// labels are kept as-is.
///
/// Fails with [`Error::InvalidRecord`] on the first record that is not a
/// well-formed hostname or has no registrable domain under a known public
/// suffix.
pub fn parse_domains(records: &[String], provider: &str) -> Result<Vec<Domain>> {
    let mut domains: Vec<Domain> = Vec::new();

    for record in records {
        validate_hostname(record)?;

        let domain = registrable_domain(record)?;
        let label = record_label(record, domain).ok_or_else(|| {
            Error::invalid_record(format!(
                "{record}: not the registrable domain {domain} or a subdomain of it"
            ))
        })?;

        match domains.iter_mut().find(|d| d.name == domain) {
            Some(existing) => existing.records.push(label.to_string()),
            None => domains.push(Domain {
                name: domain.to_string(),
                records: vec![label.to_string()],
                provider: provider.to_string(),
            }),
        }
    }

    Ok(domains)
}

/// Computes the registrable domain (effective TLD plus one label) for a
/// record string.
fn registrable_domain(record: &str) -> Result<&str> {
    psl::domain_str(record).ok_or_else(|| {
        Error::invalid_record(format!(
            "{record}: no registrable domain under a known public suffix"
        ))
    })
}

/// Computes the label of `record` relative to `domain`: the apex marker
/// when they are equal, the prefix with the `"." + domain` suffix
/// stripped when `record` is a strict subdomain, `None` otherwise.
fn record_label<'a>(record: &'a str, domain: &str) -> Option<&'a str> {
    if record == domain {
        return Some(APEX);
    }

    record
        .strip_suffix(domain)
        .and_then(|head| head.strip_suffix('.'))
}

/// Syntax check per RFC 1035 label rules, so malformed hostnames fail
/// with a precise message instead of an opaque suffix-lookup miss.
fn validate_hostname(record: &str) -> Result<()> {
    if record.is_empty() {
        return Err(Error::invalid_record("record cannot be empty"));
    }

    if record.len() > 253 {
        return Err(Error::invalid_record(format!(
            "{record}: hostname longer than 253 characters"
        )));
    }

    for label in record.split('.') {
        if label.is_empty() {
            return Err(Error::invalid_record(format!(
                "{record}: hostname has an empty label"
            )));
        }

        if label.len() > 63 {
            return Err(Error::invalid_record(format!(
                "{record}: label '{label}' longer than 63 characters"
            )));
        }

        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(Error::invalid_record(format!(
                "{record}: label '{label}' contains invalid characters"
            )));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(Error::invalid_record(format!(
                "{record}: label '{label}' starts or ends with a hyphen"
            )));
        }
    }

    Ok(())
}
