//! Application-style generator: HTTP service request logs
//! Origin source for correlation: every record carries a fresh request_id

use super::{pick, random_ip, LevelTable, SourceGenerator, TimeWindow};
use crate::fields::FieldLibrary;
use crate::model::{LogLevel, LogRecord, SourceFields, SourceType};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::Arc;

const LEVEL_WEIGHTS: &[(LogLevel, u32)] = &[
    (LogLevel::Info, 52),
    (LogLevel::Debug, 20),
    (LogLevel::Warn, 14),
    (LogLevel::Error, 11),
    (LogLevel::Fatal, 3),
];

const OK_STATUSES: &[u16] = &[200, 200, 200, 201, 204, 302];
const WARN_STATUSES: &[u16] = &[400, 401, 403, 404, 429];
const ERROR_STATUSES: &[u16] = &[500, 502, 503, 504];
const FATAL_STATUSES: &[u16] = &[503, 500];

pub struct ApplicationGenerator {
    rng: StdRng,
    library: Arc<FieldLibrary>,
    levels: LevelTable,
}

impl ApplicationGenerator {
    pub fn new(library: Arc<FieldLibrary>, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            library,
            levels: LevelTable::new(LEVEL_WEIGHTS),
        }
    }

    // http_status follows level: 5xx for ERROR/FATAL, 4xx for WARN,
    // success codes otherwise
    fn status_for(&mut self, level: LogLevel) -> u16 {
        let pool = match level {
            LogLevel::Fatal => FATAL_STATUSES,
            LogLevel::Error => ERROR_STATUSES,
            LogLevel::Warn => WARN_STATUSES,
            _ => OK_STATUSES,
        };
        pool[self.rng.gen_range(0..pool.len())]
    }

    fn response_time_for(&mut self, status: u16) -> u64 {
        if status >= 500 {
            self.rng.gen_range(200..5_000)
        } else if status >= 400 {
            self.rng.gen_range(5..400)
        } else {
            self.rng.gen_range(5..800)
        }
    }

    fn generate_one(&mut self, window: &TimeWindow) -> LogRecord {
        let timestamp = window.sample(&mut self.rng);
        let level = self.levels.sample(&mut self.rng);

        let service = pick(&mut self.rng, self.library.app_services).to_string();
        let method = pick(&mut self.rng, self.library.http_methods).to_string();
        let endpoint = pick(&mut self.rng, self.library.app_endpoints).to_string();
        let status = self.status_for(level);
        let elapsed = self.response_time_for(status);

        let phrase = match level {
            LogLevel::Error | LogLevel::Fatal => pick(&mut self.rng, self.library.app_error_phrases),
            LogLevel::Warn => pick(&mut self.rng, self.library.app_warn_phrases),
            _ => pick(&mut self.rng, self.library.app_ok_phrases),
        };

        let message = format!("{} {} {} {}ms {}", method, endpoint, status, elapsed, phrase);

        let mut record = LogRecord::new(
            timestamp,
            level,
            SourceType::Application,
            message,
            SourceFields::Application {
                service,
                http_method: method,
                endpoint,
                http_status: status,
                response_time_ms: elapsed,
            },
        );
        record.request_id = Some(format!("req-{:032x}", self.rng.gen::<u128>()));
        record.ip_address = Some(random_ip(&mut self.rng));
        if self.rng.gen_bool(0.6) {
            record.session_id = Some(format!("sess-{:032x}", self.rng.gen::<u128>()));
        }
        record
    }
}

impl SourceGenerator for ApplicationGenerator {
    fn source_type(&self) -> SourceType {
        SourceType::Application
    }

    fn generate(&mut self, count: usize, window: &TimeWindow) -> Vec<LogRecord> {
        (0..count).map(|_| self.generate_one(window)).collect()
    }
}
