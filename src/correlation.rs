//! Correlation Engine: propagates request identifiers from the origin
//! (application-style) batch into the other sources' batches, simulating a
//! single transaction traversing systems.
//!
//! Non-origin sources never invent identifiers; every shared id is copied
//! from an origin record generated in the same batch.

use crate::error::{Result, SynthError};
use crate::model::{LogRecord, SourceType};
use rand::seq::index::sample;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy)]
pub struct CorrelationConfig {
    /// Fraction of origin request ids sampled into the shared pool
    pub share_fraction: f64,
    /// Per-record probability that a non-origin record receives a pool id
    pub inject_fraction: f64,
}

impl CorrelationConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.share_fraction) {
            return Err(SynthError::config(format!(
                "correlation stage: share_fraction must be within 0.0..=1.0, got {}",
                self.share_fraction
            )));
        }
        if !(0.0..=1.0).contains(&self.inject_fraction) {
            return Err(SynthError::config(format!(
                "correlation stage: inject_fraction must be within 0.0..=1.0, got {}",
                self.inject_fraction
            )));
        }
        Ok(())
    }
}

/// Outcome of one correlation pass
#[derive(Debug, Clone, Default)]
pub struct CorrelationReport {
    pub pool_size: usize,
    pub linked_by_source: BTreeMap<SourceType, usize>,
}

impl CorrelationReport {
    pub fn total_linked(&self) -> usize {
        self.linked_by_source.values().sum()
    }
}

pub struct CorrelationEngine {
    config: CorrelationConfig,
    rng: StdRng,
}

impl CorrelationEngine {
    pub fn new(config: CorrelationConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Share a sampled fraction of origin request ids with the other batches.
    ///
    /// An empty pool (empty origin batch or share_fraction of zero) skips
    /// the pass entirely; that is a quiet no-op, not an error.
    pub fn correlate(
        &mut self,
        origin: &mut [LogRecord],
        others: &mut [&mut Vec<LogRecord>],
    ) -> Result<CorrelationReport> {
        self.config.validate()?;

        let carrier_indices: Vec<usize> = origin
            .iter()
            .enumerate()
            .filter(|(_, r)| r.request_id.is_some())
            .map(|(i, _)| i)
            .collect();

        let pool_target = ((carrier_indices.len() as f64) * self.config.share_fraction).round() as usize;
        let pool_target = pool_target.min(carrier_indices.len());

        let mut report = CorrelationReport::default();
        if pool_target == 0 {
            return Ok(report);
        }

        let mut pool = Vec::with_capacity(pool_target);
        for picked in sample(&mut self.rng, carrier_indices.len(), pool_target).iter() {
            let record = &mut origin[carrier_indices[picked]];
            if let Some(id) = record.request_id.clone() {
                // pooled origin records are marked as correlation members too
                record.correlation_id = Some(id.clone());
                pool.push(id);
            }
        }
        report.pool_size = pool.len();

        for batch in others.iter_mut() {
            let source = match batch.first() {
                Some(record) => record.source_type,
                None => continue,
            };
            let mut linked = 0usize;
            for record in batch.iter_mut() {
                if self.rng.gen_bool(self.config.inject_fraction) {
                    let id = &pool[self.rng.gen_range(0..pool.len())];
                    record.request_id = Some(id.clone());
                    record.correlation_id = Some(id.clone());
                    linked += 1;
                }
            }
            report.linked_by_source.insert(source, linked);
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldLibrary;
    use crate::generator::{
        ApplicationGenerator, ErpGenerator, SiemGenerator, SourceGenerator, TimeWindow,
    };
    use chrono::{TimeZone, Utc};
    use std::collections::HashSet;
    use std::sync::Arc;

    fn window() -> TimeWindow {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap();
        TimeWindow::new(start, end).unwrap()
    }

    fn batches(app: usize, erp: usize, siem: usize) -> (Vec<LogRecord>, Vec<LogRecord>, Vec<LogRecord>) {
        let library = Arc::new(FieldLibrary::default());
        (
            ApplicationGenerator::new(Arc::clone(&library), 1).generate(app, &window()),
            ErpGenerator::new(Arc::clone(&library), 2).generate(erp, &window()),
            SiemGenerator::new(library, 3).generate(siem, &window()),
        )
    }

    #[test]
    fn test_shared_ids_exist_on_origin_records() {
        let (mut app, mut erp, mut siem) = batches(1_000, 500, 500);
        let mut engine = CorrelationEngine::new(
            CorrelationConfig { share_fraction: 0.3, inject_fraction: 0.4 },
            99,
        );
        engine
            .correlate(&mut app, &mut [&mut erp, &mut siem])
            .unwrap();

        let origin_ids: HashSet<_> = app.iter().filter_map(|r| r.request_id.clone()).collect();
        for record in erp.iter().chain(siem.iter()) {
            if let Some(id) = &record.request_id {
                assert!(origin_ids.contains(id), "fabricated identifier {}", id);
                assert_eq!(record.correlation_id.as_ref(), Some(id));
            }
        }
    }

    #[test]
    fn test_linked_counts_near_inject_fraction() {
        let (mut app, mut erp, mut siem) = batches(1_000, 500, 500);
        let mut engine = CorrelationEngine::new(
            CorrelationConfig { share_fraction: 0.3, inject_fraction: 0.4 },
            7,
        );
        let report = engine
            .correlate(&mut app, &mut [&mut erp, &mut siem])
            .unwrap();

        assert_eq!(report.pool_size, 300);
        let erp_linked = *report.linked_by_source.get(&SourceType::Erp).unwrap();
        let siem_linked = *report.linked_by_source.get(&SourceType::Siem).unwrap();
        // 0.4 of 500 with binomial spread
        assert!((150..=250).contains(&erp_linked), "erp linked {}", erp_linked);
        assert!((150..=250).contains(&siem_linked), "siem linked {}", siem_linked);
        assert_eq!(erp_linked, erp.iter().filter(|r| r.request_id.is_some()).count());
    }

    #[test]
    fn test_zero_share_fraction_skips_pass() {
        let (mut app, mut erp, mut siem) = batches(200, 100, 100);
        let mut engine = CorrelationEngine::new(
            CorrelationConfig { share_fraction: 0.0, inject_fraction: 0.4 },
            7,
        );
        let report = engine
            .correlate(&mut app, &mut [&mut erp, &mut siem])
            .unwrap();
        assert_eq!(report.pool_size, 0);
        assert_eq!(report.total_linked(), 0);
        assert!(erp.iter().all(|r| r.request_id.is_none()));
        assert!(siem.iter().all(|r| r.request_id.is_none()));
    }

    #[test]
    fn test_empty_origin_batch_skips_pass() {
        let (mut app, mut erp, mut siem) = batches(0, 100, 100);
        let mut engine = CorrelationEngine::new(
            CorrelationConfig { share_fraction: 0.5, inject_fraction: 0.9 },
            7,
        );
        let report = engine
            .correlate(&mut app, &mut [&mut erp, &mut siem])
            .unwrap();
        assert_eq!(report.pool_size, 0);
        assert!(erp.iter().all(|r| r.request_id.is_none()));
    }

    #[test]
    fn test_invalid_fractions_are_config_errors() {
        let (mut app, mut erp, _) = batches(10, 10, 0);
        let mut engine = CorrelationEngine::new(
            CorrelationConfig { share_fraction: 1.2, inject_fraction: 0.4 },
            7,
        );
        let err = engine.correlate(&mut app, &mut [&mut erp]).unwrap_err();
        assert!(err.to_string().contains("share_fraction"));

        let mut engine = CorrelationEngine::new(
            CorrelationConfig { share_fraction: 0.2, inject_fraction: -0.1 },
            7,
        );
        let err = engine.correlate(&mut app, &mut [&mut erp]).unwrap_err();
        assert!(err.to_string().contains("inject_fraction"));
    }

    #[test]
    fn test_many_to_many_sharing_is_possible() {
        // tiny pool + high inject probability forces identifier reuse
        let (mut app, mut erp, mut siem) = batches(10, 200, 200);
        let mut engine = CorrelationEngine::new(
            CorrelationConfig { share_fraction: 0.1, inject_fraction: 0.9 },
            11,
        );
        let report = engine
            .correlate(&mut app, &mut [&mut erp, &mut siem])
            .unwrap();
        assert_eq!(report.pool_size, 1);
        let linked = erp
            .iter()
            .chain(siem.iter())
            .filter(|r| r.request_id.is_some())
            .count();
        assert!(linked > 1, "expected identifier reuse, got {}", linked);
    }
}
