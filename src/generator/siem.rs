//! SIEM-style generator: authentication, firewall, and sensor events

use super::{internal_ip, pick, LevelTable, SourceGenerator, TimeWindow};
use crate::fields::FieldLibrary;
use crate::model::{LogLevel, LogRecord, SourceFields, SourceType};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::Arc;

const LEVEL_WEIGHTS: &[(LogLevel, u32)] = &[
    (LogLevel::Info, 55),
    (LogLevel::Debug, 15),
    (LogLevel::Warn, 15),
    (LogLevel::Error, 12),
    (LogLevel::Fatal, 3),
];

pub struct SiemGenerator {
    rng: StdRng,
    library: Arc<FieldLibrary>,
    levels: LevelTable,
}

impl SiemGenerator {
    pub fn new(library: Arc<FieldLibrary>, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            library,
            levels: LevelTable::new(LEVEL_WEIGHTS),
        }
    }

    fn generate_one(&mut self, window: &TimeWindow) -> LogRecord {
        let timestamp = window.sample(&mut self.rng);
        let level = self.levels.sample(&mut self.rng);

        let host = pick(&mut self.rng, self.library.siem_hosts).to_string();
        let category = pick(&mut self.rng, self.library.siem_event_categories).to_string();
        let rule = pick(&mut self.rng, self.library.siem_rule_names).to_string();
        let event_id = pick(&mut self.rng, self.library.siem_event_ids).to_string();
        let user = pick(&mut self.rng, self.library.user_names).to_string();

        let outcome = match level {
            LogLevel::Error | LogLevel::Fatal => "failure",
            LogLevel::Warn => {
                if self.rng.gen_bool(0.6) {
                    "failure"
                } else {
                    "success"
                }
            }
            _ => "success",
        }
        .to_string();

        let message = match level {
            LogLevel::Debug => {
                format!("{}: heartbeat from {} event_id={}", category, host, event_id)
            }
            LogLevel::Info => format!(
                "{}: {} user={} host={} outcome={}",
                category, rule, user, host, outcome
            ),
            LogLevel::Warn => format!(
                "{}: multiple failed attempts matched '{}' user={} host={}",
                category, rule, user, host
            ),
            LogLevel::Error => format!(
                "{}: connection failed between {} and log collector, events queued",
                category, host
            ),
            LogLevel::Fatal => format!(
                "{}: sensor {} unresponsive, event forwarding halted",
                category, host
            ),
        };

        let mut record = LogRecord::new(
            timestamp,
            level,
            SourceType::Siem,
            message,
            SourceFields::Siem {
                host,
                event_id,
                event_category: category,
                rule_name: rule,
                outcome,
                user_name: user,
                affected_services: None,
            },
        );
        record.ip_address = Some(internal_ip(&mut self.rng));
        if self.rng.gen_bool(0.3) {
            record.session_id = Some(format!("sess-{:032x}", self.rng.gen::<u128>()));
        }
        record
    }
}

impl SourceGenerator for SiemGenerator {
    fn source_type(&self) -> SourceType {
        SourceType::Siem
    }

    fn generate(&mut self, count: usize, window: &TimeWindow) -> Vec<LogRecord> {
        (0..count).map(|_| self.generate_one(window)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn window() -> TimeWindow {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap();
        TimeWindow::new(start, end).unwrap()
    }

    #[test]
    fn test_zero_count_is_empty() {
        let mut generator = SiemGenerator::new(Arc::new(FieldLibrary::default()), 1);
        assert!(generator.generate(0, &window()).is_empty());
    }

    #[test]
    fn test_records_are_well_formed() {
        let mut generator = SiemGenerator::new(Arc::new(FieldLibrary::default()), 42);
        let window = window();
        let records = generator.generate(200, &window);
        assert_eq!(records.len(), 200);
        for record in &records {
            assert_eq!(record.source_type, SourceType::Siem);
            assert!(window.contains(record.timestamp));
            assert!(record.ip_address.is_some());
            assert!(record.request_id.is_none());
            assert!(!record.is_anomaly);
            match &record.fields {
                SourceFields::Siem { host, outcome, .. } => {
                    assert!(!host.is_empty());
                    assert!(outcome == "success" || outcome == "failure");
                }
                other => panic!("unexpected fields variant: {:?}", other),
            }
        }
    }

    #[test]
    fn test_outcome_tracks_level() {
        let mut generator = SiemGenerator::new(Arc::new(FieldLibrary::default()), 9);
        let records = generator.generate(500, &window());
        for record in records {
            if matches!(record.level, LogLevel::Error | LogLevel::Fatal) {
                if let SourceFields::Siem { outcome, .. } = &record.fields {
                    assert_eq!(outcome, "failure");
                }
            }
        }
    }

    #[test]
    fn test_same_seed_reproduces_batch() {
        let library = Arc::new(FieldLibrary::default());
        let window = window();
        let a = SiemGenerator::new(Arc::clone(&library), 77).generate(50, &window);
        let b = SiemGenerator::new(library, 77).generate(50, &window);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.timestamp, y.timestamp);
            assert_eq!(x.level, y.level);
            assert_eq!(x.message, y.message);
        }
    }
}
