//! Output forwarding to the ingestion collaborator
//! NDJSON over HTTP with gzip compression and retry, or a local NDJSON file

use crate::error::{Result, SynthError};
use crate::model::LogRecord;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::{debug, warn};
use reqwest::{Client, Response};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;
use tokio::time::sleep;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompressionType {
    None,
    Gzip,
}

/// HTTP client pushing NDJSON batches to the ingestion endpoint
#[derive(Debug)]
pub struct IngestClient {
    client: Client,
    endpoint: String,
    compression: CompressionType,
    max_retries: usize,
}

impl IngestClient {
    pub fn new(endpoint: &str, compression: &str, timeout_secs: u64, max_retries: usize) -> Result<Self> {
        let compression = match compression {
            "gzip" => CompressionType::Gzip,
            "none" => CompressionType::None,
            other => {
                return Err(SynthError::config(format!(
                    "ingestion stage: compression must be gzip or none, got {}",
                    other
                )))
            }
        };
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .gzip(true)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            compression,
            max_retries,
        })
    }

    /// Send one batch. Returns the number of bytes put on the wire.
    pub async fn send_records(&self, records: &[LogRecord]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut payload = String::new();
        for record in records {
            payload.push_str(&serde_json::to_string(record)?);
            payload.push('\n');
        }

        let (body, content_encoding) = self.compress_payload(payload.as_bytes())?;
        debug!(
            "sending {} records, {} bytes raw, {} bytes on wire",
            records.len(),
            payload.len(),
            body.len()
        );

        let mut last_error = None;
        for attempt in 0..=self.max_retries {
            match self.send_request(&body, content_encoding).await {
                Ok(_) => {
                    if attempt > 0 {
                        debug!("batch accepted after {} retries", attempt);
                    }
                    return Ok(body.len());
                }
                Err(e) => {
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        let delay = Duration::from_millis(100 * (2_u64.pow(attempt as u32)));
                        warn!(
                            "attempt {} failed, retrying in {:?}: {}",
                            attempt + 1,
                            delay,
                            last_error.as_ref().unwrap()
                        );
                        sleep(delay).await;
                    }
                }
            }
        }
        Err(SynthError::ingestion(format!(
            "failed to send batch after {} attempts: {}",
            self.max_retries + 1,
            last_error.unwrap()
        )))
    }

    fn compress_payload(&self, data: &[u8]) -> Result<(Vec<u8>, Option<&'static str>)> {
        match self.compression {
            CompressionType::None => Ok((data.to_vec(), None)),
            CompressionType::Gzip => {
                let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(data)?;
                let compressed = encoder.finish()?;
                Ok((compressed, Some("gzip")))
            }
        }
    }

    async fn send_request(&self, body: &[u8], content_encoding: Option<&'static str>) -> Result<Response> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/x-ndjson")
            .body(body.to_vec());
        if let Some(encoding) = content_encoding {
            request = request.header("Content-Encoding", encoding);
        }

        let response = request.send().await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read body>".to_string());
            Err(SynthError::ingestion(format!(
                "endpoint returned {}: {}",
                status, body
            )))
        }
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    Ok(())
}

/// Write records as NDJSON to a local file. Returns the record count.
pub fn write_ndjson(path: &Path, records: &[LogRecord]) -> Result<usize> {
    ensure_parent(path)?;
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(records.len())
}
