//! CLI Speak Command
//!
//! Synthesizes text with the configured Kokoro server and writes a WAV file.

use std::path::Path;

use anyhow::{Context, Result};
use pagecast_config::PagecastConfig;
use pagecast_tts::synthesize_speech;

use crate::engines::build_speech;

pub async fn run(config: &PagecastConfig, text: &str, voice: Option<&str>, out: &Path) -> Result<()> {
    if text.trim().is_empty() {
        anyhow::bail!("No text provided");
    }
    let voice = voice.unwrap_or(config.default_voice());

    let engine = build_speech(config).get().await?;
    let speech = synthesize_speech(engine.as_ref(), text, voice).await?;
    let wav = speech.to_wav()?;

    tokio::fs::write(out, &wav)
        .await
        .with_context(|| format!("Failed to write {}", out.display()))?;
    println!(
        "Wrote {} ({} segments, {:.1}s at {} Hz)",
        out.display(),
        speech.segments,
        speech.samples.len() as f32 / speech.sample_rate as f32,
        speech.sample_rate
    );
    Ok(())
}
