//! Thin batch driver: parse parameters, run the pipeline once, forward the
//! scored records to the ingestion endpoint or a local NDJSON file

use anyhow::Context;
use clap::Parser;
use log::{info, LevelFilter};
use logsynth::{BatchSummary, IngestClient, Pipeline, SynthConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = SynthConfig::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if config.verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();

    info!("starting log synthesis with config: {}", config);

    let pipeline_config = config
        .to_pipeline_config()
        .context("invalid generation parameters")?;
    let batch = Pipeline::new(pipeline_config)
        .run()
        .context("pipeline run failed")?;

    let summary = BatchSummary::from_batch(&batch);
    summary.log_summary();

    let records = batch.into_records();

    if let Some(path) = &config.out {
        let written = logsynth::write_ndjson(path, &records)
            .with_context(|| format!("writing {:?}", path))?;
        info!("wrote {} records to {:?}", written, path);
        return Ok(());
    }

    if config.dry_run {
        info!("dry run: {} records generated, nothing forwarded", records.len());
        return Ok(());
    }

    let client = IngestClient::new(
        &config.endpoint,
        &config.compression,
        config.timeout,
        config.max_retries,
    )
    .context("creating ingestion client")?;

    let mut sent = 0usize;
    let mut bytes = 0usize;
    for chunk in records.chunks(config.batch_size) {
        bytes += client
            .send_records(chunk)
            .await
            .with_context(|| format!("sending batch after {} records", sent))?;
        sent += chunk.len();
    }
    info!("forwarded {} records ({} bytes on wire) to {}", sent, bytes, config.endpoint);

    Ok(())
}
