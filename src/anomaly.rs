//! Anomaly Injector: mutates a sampled subset of a batch into one of the
//! source-specific archetypes. Runs exactly once per batch, before
//! correlation and scoring.

use crate::error::{Result, SynthError};
use crate::fields::FieldLibrary;
use crate::model::{AnomalyKind, LogLevel, LogRecord, SourceFields, SourceType};
use rand::seq::index::sample;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::Arc;

/// Archetypes available per source type
#[derive(Debug, Clone)]
pub struct AnomalyCatalog {
    siem: Vec<AnomalyKind>,
    erp: Vec<AnomalyKind>,
    application: Vec<AnomalyKind>,
}

impl AnomalyCatalog {
    pub fn kinds_for(&self, source: SourceType) -> &[AnomalyKind] {
        match source {
            SourceType::Siem => &self.siem,
            SourceType::Erp => &self.erp,
            SourceType::Application => &self.application,
        }
    }
}

impl Default for AnomalyCatalog {
    fn default() -> Self {
        Self {
            siem: vec![
                AnomalyKind::SecurityViolation,
                AnomalyKind::SystemFailure,
                AnomalyKind::DataIntegrityError,
            ],
            erp: vec![
                AnomalyKind::DataIntegrityError,
                AnomalyKind::SystemFailure,
                AnomalyKind::SecurityViolation,
            ],
            application: vec![
                AnomalyKind::PerformanceDegradation,
                AnomalyKind::SystemFailure,
                AnomalyKind::SecurityViolation,
            ],
        }
    }
}

pub struct AnomalyInjector {
    rng: StdRng,
    catalog: AnomalyCatalog,
    library: Arc<FieldLibrary>,
}

impl AnomalyInjector {
    pub fn new(catalog: AnomalyCatalog, library: Arc<FieldLibrary>, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            catalog,
            library,
        }
    }

    /// Mutate `round(len * rate)` records, selected uniformly without
    /// replacement, into anomalies. Returns the number of records injected.
    /// A rate that rounds to zero selections is a no-op, not an error.
    pub fn inject(&mut self, records: &mut [LogRecord], rate: f64) -> Result<usize> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(SynthError::config(format!(
                "injection stage: anomaly_rate must be within 0.0..=1.0, got {}",
                rate
            )));
        }
        if records.is_empty() {
            return Ok(0);
        }

        let target = ((records.len() as f64) * rate).round() as usize;
        let target = target.min(records.len());
        if target == 0 {
            return Ok(0);
        }

        let selected = sample(&mut self.rng, records.len(), target);
        for idx in selected.iter() {
            let record = &mut records[idx];
            let kinds = self.catalog.kinds_for(record.source_type);
            let kind = kinds[self.rng.gen_range(0..kinds.len())];
            self.apply(record, kind);
        }
        Ok(target)
    }

    fn apply(&mut self, record: &mut LogRecord, kind: AnomalyKind) {
        match record.source_type {
            SourceType::Siem => self.apply_siem(record, kind),
            SourceType::Erp => self.apply_erp(record, kind),
            SourceType::Application => self.apply_application(record, kind),
        }
        record.is_anomaly = true;
        record.anomaly_kind = Some(kind);
    }

    fn apply_siem(&mut self, record: &mut LogRecord, kind: AnomalyKind) {
        let SourceFields::Siem {
            host,
            event_id,
            event_category,
            rule_name,
            outcome,
            user_name,
            affected_services,
        } = &mut record.fields
        else {
            return;
        };

        match kind {
            AnomalyKind::SecurityViolation => {
                record.level = if self.rng.gen_bool(0.5) {
                    LogLevel::Fatal
                } else {
                    LogLevel::Error
                };
                *rule_name = "Unauthorized Access Detected".to_string();
                *event_id = "4625".to_string();
                *outcome = "failure".to_string();
                record.message = format!(
                    "{}: security breach detected, unauthorized access attempt by {} on {}",
                    event_category, user_name, host
                );
            }
            AnomalyKind::SystemFailure => {
                record.level = LogLevel::Fatal;
                let services = self.sample_services(2, 4);
                record.message = format!(
                    "{}: multiple services down, {} unreachable from {}",
                    event_category,
                    services.join(","),
                    host
                );
                *rule_name = "Service Availability Collapse".to_string();
                *outcome = "failure".to_string();
                *affected_services = Some(services);
            }
            _ => {
                record.level = LogLevel::Error;
                *rule_name = "Audit Log Tampering".to_string();
                *event_id = "1102".to_string();
                *outcome = "failure".to_string();
                record.message = format!(
                    "{}: audit trail integrity check failed on {}, event sequence gap detected",
                    event_category, host
                );
            }
        }
    }

    fn apply_erp(&mut self, record: &mut LogRecord, kind: AnomalyKind) {
        let SourceFields::Erp {
            transaction_code,
            module,
            amount,
            currency,
            document_id,
            ..
        } = &mut record.fields
        else {
            return;
        };

        match kind {
            AnomalyKind::DataIntegrityError => {
                record.level = LogLevel::Error;
                // ledger disagreement rendered as a negated posting amount
                *amount = -*amount;
                record.message = format!(
                    "transaction {} ({}) flagged: amount mismatch between ledger and {}, integrity check failed",
                    transaction_code, module, document_id
                );
            }
            AnomalyKind::SystemFailure => {
                record.level = LogLevel::Fatal;
                // nothing was posted
                *amount = 0.0;
                record.message = format!(
                    "transaction {} ({}) aborted: posting engine failure, rollback storm across module",
                    transaction_code, module
                );
            }
            _ => {
                record.level = if self.rng.gen_bool(0.3) {
                    LogLevel::Fatal
                } else {
                    LogLevel::Error
                };
                *amount = self.rng.gen_range(100_000.0..900_000.0f64).round();
                record.message = format!(
                    "transaction {} ({}) blocked: unauthorized posting attempt of {:.0} {} doc={}",
                    transaction_code, module, amount, currency, document_id
                );
            }
        }
    }

    fn apply_application(&mut self, record: &mut LogRecord, kind: AnomalyKind) {
        let SourceFields::Application {
            http_method,
            endpoint,
            http_status,
            response_time_ms,
            ..
        } = &mut record.fields
        else {
            return;
        };

        match kind {
            AnomalyKind::PerformanceDegradation => {
                record.level = LogLevel::Error;
                *http_status = 504;
                *response_time_ms = self.rng.gen_range(5_000..30_000);
                record.message = format!(
                    "{} {} {} {}ms upstream timeout exceeded, response degraded",
                    http_method, endpoint, http_status, response_time_ms
                );
            }
            AnomalyKind::SystemFailure => {
                record.level = LogLevel::Fatal;
                *http_status = 503;
                *response_time_ms = self.rng.gen_range(500..3_000);
                record.message = format!(
                    "{} {} {} {}ms service unavailable, connection failed to all replicas",
                    http_method, endpoint, http_status, response_time_ms
                );
            }
            _ => {
                record.level = LogLevel::Error;
                *http_status = if self.rng.gen_bool(0.5) { 401 } else { 403 };
                *response_time_ms = self.rng.gen_range(5..200);
                record.message = format!(
                    "{} {} {} {}ms unauthorized access attempt blocked",
                    http_method, endpoint, http_status, response_time_ms
                );
            }
        }
    }

    fn sample_services(&mut self, min: usize, max: usize) -> Vec<String> {
        let pool = self.library.app_services;
        let n = self.rng.gen_range(min..=max).min(pool.len());
        sample(&mut self.rng, pool.len(), n)
            .iter()
            .map(|i| pool[i].to_string())
            .collect()
    }
}
