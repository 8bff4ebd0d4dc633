//! Update orchestration
//!
//! One pass of: resolve zone, resolve record, fetch the external IP, and
//! push it to the record when it differs. Every step awaits the previous
//! one and the first failure ends the run.

use std::fmt;

use tracing::{debug, info, warn};

use crate::dns_provider::{DnsProvider, DnsRecord};
use crate::error::{Error, Result};
use crate::external_ip::IpSource;

//==============================================================================
// Types
//==============================================================================

/// Stage of the pipeline, used to label failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Zone,
    Record,
    ExternalIp,
    Update,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Step::Zone => "retrieving the zone",
            Step::Record => "retrieving the record",
            Step::ExternalIp => "retrieving the external ip",
            Step::Update => "updating the record ip",
        };
        f.write_str(label)
    }
}

/// A failed run: which step broke and why
#[derive(Debug, thiserror::Error)]
#[error("Problem {step}: {source}")]
pub struct RunError {
    pub step: Step,
    pub source: Error,
}

impl RunError {
    fn at(step: Step) -> impl FnOnce(Error) -> Self {
        move |source| Self { step, source }
    }
}

/// What a successful run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Record already pointed at the external IP; nothing was sent
    Unchanged,
    /// Record content replaced and accepted by the provider
    Updated { ip: String, record: String },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Unchanged => f.write_str("IP has not changed, no need to update DNS"),
            Outcome::Updated { ip, record } => write!(
                f,
                "DNS IP Successfully Updated to '{}' for record '{}'",
                ip, record
            ),
        }
    }
}

//==============================================================================
// Updater
//==============================================================================

pub struct Updater<P, I> {
    provider: P,
    ip_source: I,
    zone_name: String,
    record_name: String,
}

impl<P, I> Updater<P, I>
where
    P: DnsProvider,
    I: IpSource,
{
    pub fn new(
        provider: P,
        ip_source: I,
        zone_name: impl Into<String>,
        record_name: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            ip_source,
            zone_name: zone_name.into(),
            record_name: record_name.into(),
        }
    }

    /// Runs the whole pipeline once
    pub async fn run(&self) -> std::result::Result<Outcome, RunError> {
        let zone = self
            .provider
            .resolve_zone(&self.zone_name)
            .await
            .map_err(RunError::at(Step::Zone))?;
        debug!("Zone {} (ID: {}, status: {})", zone.name, zone.id, zone.status);

        let mut record = self
            .provider
            .resolve_record(&self.record_name, &zone.id)
            .await
            .map_err(RunError::at(Step::Record))?;
        debug!("Record {} (ID: {})", record, record.id);

        let ip = self
            .ip_source
            .fetch_external_ip()
            .await
            .map_err(RunError::at(Step::ExternalIp))?;
        info!("External IP: {}", ip);

        self.update_if_changed(&ip, &zone.id, &mut record)
            .await
            .map_err(RunError::at(Step::Update))
    }

    /// Points `record` at `ip` unless it already does
    ///
    /// On success `record.content` holds `ip`, so calling again with the same
    /// address short-circuits without a request. On failure the record is left
    /// as it was.
    pub async fn update_if_changed(
        &self,
        ip: &str,
        zone_id: &str,
        record: &mut DnsRecord,
    ) -> Result<Outcome> {
        if ip == record.content {
            info!("Record {} already matches {}", record.name, ip);
            return Ok(Outcome::Unchanged);
        }

        info!("Updating {} from {} to {}", record.name, record.content, ip);
        let previous = std::mem::replace(&mut record.content, ip.to_string());

        let result = match self.provider.update_record(zone_id, record).await {
            Ok(result) => result,
            Err(e) => {
                record.content = previous;
                return Err(e);
            }
        };

        if !result.success {
            record.content = previous;
            if !result.errors.is_empty() {
                warn!(
                    "Update rejected: {}",
                    result
                        .errors
                        .iter()
                        .map(|e| e.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
            return Err(Error::UpdateRejected {
                ip: ip.to_string(),
                record: record.name.clone(),
            });
        }

        Ok(Outcome::Updated {
            ip: ip.to_string(),
            record: record.name.clone(),
        })
    }
}

//==============================================================================
// Tests
//==============================================================================
