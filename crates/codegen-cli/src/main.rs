//! Entrypoint: reads a schema XML file, loads and emits a codec, and writes
//! the generated source plus (optionally) per-message example files.

mod cli;
mod output;
mod xml;

use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Args;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = ?err, "codec generation failed");
            eprintln!("error: {err:?}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let schema_name = args
        .schema
        .file_stem()
        .and_then(|s| s.to_str())
        .context("schema path has no usable file name")?
        .to_string();

    let span = tracing::info_span!("generate", schema = %args.schema.display());
    let _enter = span.enter();

    let xml_text = fs::read_to_string(&args.schema)
        .with_context(|| format!("failed to read {}", args.schema.display()))?;
    let document = xml::parse_document(&xml_text)?;

    let schema = codec_core::loader::load(&document, Some(args.schema.display().to_string()))
        .map_err(anyhow::Error::from)
        .context("schema failed validation")?;
    tracing::info!(
        enums = schema.enums.len(),
        messages = schema.message_formats.len(),
        "loaded schema"
    );

    let source = codec_core::emit::emit_schema(&schema, &schema_name)
        .map_err(anyhow::Error::from)
        .context("code emission failed")?;

    output::prepare_out_dir(&args.out_dir)?;
    output::write_codec_file(&args.out_dir, &schema_name, &source)?;

    if args.emit_examples {
        output::write_example_files(&args.out_dir, &schema, &schema_name)?;
    }

    tracing::info!(out_dir = %args.out_dir.display(), "codec generation complete");
    Ok(())
}
