//! ERP-style generator: transaction postings across business modules

use super::{internal_ip, pick, LevelTable, SourceGenerator, TimeWindow};
use crate::fields::FieldLibrary;
use crate::model::{LogLevel, LogRecord, SourceFields, SourceType};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::Arc;

const LEVEL_WEIGHTS: &[(LogLevel, u32)] = &[
    (LogLevel::Info, 60),
    (LogLevel::Debug, 18),
    (LogLevel::Warn, 12),
    (LogLevel::Error, 8),
    (LogLevel::Fatal, 2),
];

pub struct ErpGenerator {
    rng: StdRng,
    library: Arc<FieldLibrary>,
    levels: LevelTable,
}

impl ErpGenerator {
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

        let tcode = pick(&mut self.rng, self.library.erp_transaction_codes).to_string();
        let module = pick(&mut self.rng, self.library.erp_modules).to_string();
        let department = pick(&mut self.rng, self.library.erp_departments).to_string();

        let range = self.library.erp_currencies[self.rng.gen_range(0..self.library.erp_currencies.len())];
        let factor = 10f64.powi(range.decimals as i32);
        let amount = (self.rng.gen_range(range.min_amount..range.max_amount) * factor).round() / factor;
        let amount_str = if range.decimals == 0 {
            format!("{:.0}", amount)
        } else {
            format!("{:.2}", amount)
        };

        let document_id = format!("DOC-{:08}", self.rng.gen_range(1..100_000_000u64));

        // Every message carries the transaction code line
        let message = match level {
            LogLevel::Debug => format!("transaction {} ({}) prevalidation passed", tcode, module),
            LogLevel::Info => format!(
                "transaction {} ({}) posted by {}: amount {} {} doc={}",
                tcode, module, department, amount_str, range.code, document_id
            ),
            LogLevel::Warn => format!(
                "transaction {} ({}) posted with warnings, retry of batch step scheduled doc={}",
                tcode, module, document_id
            ),
            LogLevel::Error => format!(
                "transaction {} ({}) rolled back: validation failed for doc={}",
                tcode, module, document_id
            ),
            LogLevel::Fatal => format!(
                "transaction {} ({}) aborted: posting engine unavailable",
                tcode, module
            ),
        };

        let mut record = LogRecord::new(
            timestamp,
            level,
            SourceType::Erp,
            message,
            SourceFields::Erp {
                transaction_code: tcode,
                module,
                department,
                amount,
                currency: range.code.to_string(),
                document_id,
            },
        );
        if self.rng.gen_bool(0.4) {
            record.session_id = Some(format!("sess-{:032x}", self.rng.gen::<u128>()));
        }
        if self.rng.gen_bool(0.2) {
            record.ip_address = Some(internal_ip(&mut self.rng));
        }
        record
    }
}

impl SourceGenerator for ErpGenerator {
    fn source_type(&self) -> SourceType {
        SourceType::Erp
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
        let end = Utc.with_ymd_and_hms(2025, 6, 1, 6, 0, 0).unwrap();
        TimeWindow::new(start, end).unwrap()
    }

    #[test]
    fn test_zero_count_is_empty() {
        let mut generator = ErpGenerator::new(Arc::new(FieldLibrary::default()), 1);
        assert!(generator.generate(0, &window()).is_empty());
    }

    #[test]
    fn test_amount_pairs_with_currency_range() {
        let library = Arc::new(FieldLibrary::default());
        let mut generator = ErpGenerator::new(Arc::clone(&library), 13);
        let records = generator.generate(400, &window());
        for record in &records {
            let SourceFields::Erp { amount, currency, .. } = &record.fields else {
                panic!("unexpected fields variant");
            };
            let range = library
                .erp_currencies
                .iter()
                .find(|c| c.code == currency)
                .expect("currency from library");
            assert!(*amount >= range.min_amount && *amount <= range.max_amount,
                "{} {} outside {:?}", amount, currency, range);
            if range.decimals == 0 {
                assert_eq!(amount.fract(), 0.0, "zero-decimal currency got fraction");
            }
        }
    }

    #[test]
    fn test_message_carries_transaction_code() {
        let mut generator = ErpGenerator::new(Arc::new(FieldLibrary::default()), 5);
        let records = generator.generate(100, &window());
        for record in &records {
            let SourceFields::Erp { transaction_code, .. } = &record.fields else {
                panic!("unexpected fields variant");
            };
            assert!(record.message.contains(transaction_code.as_str()));
            assert!(record.message.starts_with("transaction "));
        }
    }

    #[test]
    fn test_timestamps_in_window() {
        let window = window();
        let mut generator = ErpGenerator::new(Arc::new(FieldLibrary::default()), 21);
        for record in generator.generate(300, &window) {
            assert!(window.contains(record.timestamp));
        }
    }
}
