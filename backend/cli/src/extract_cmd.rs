//! CLI Extract Command
//!
//! Runs the extraction pipeline on a local image and prints the JSON result.

use std::path::Path;

use anyhow::{Context, Result};
use pagecast_config::PagecastConfig;
use pagecast_understanding::{ExtractOptions, extract_document};

use crate::engines::{build_formatter, build_ocr};

pub async fn run(config: &PagecastConfig, path: &Path, format: bool, pretty: bool) -> Result<()> {
    let image = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read image: {}", path.display()))?;
    if image.is_empty() {
        anyhow::bail!("Image file is empty: {}", path.display());
    }

    let ocr = build_ocr(config);
    let formatter = if format { build_formatter(config) } else { None };
    if format && formatter.is_none() {
        eprintln!("No Gemini API key configured; printing unformatted text");
    }

    let options = ExtractOptions {
        format_on_extract: format,
        echo_image: false,
    };
    let result = extract_document(ocr.as_ref(), formatter.as_ref(), &image, options).await?;

    let json = if pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{json}");
    Ok(())
}
