/// Collect a speech engine's segment stream into one buffer.
use futures::StreamExt;
use pagecast_core::{PagecastError, SpeechEngine};
use tracing::info;

/// Output rate used for synthesis and for the WAV container.
pub const SAMPLE_RATE: u32 = 24_000;

pub const DEFAULT_VOICE: &str = "af_heart";

/// Concatenated synthesis output.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub segments: usize,
}

/// Drain every segment the engine yields for `text`, in order.
///
/// Zero segments is a total failure, as is an error from any segment.
pub async fn synthesize_speech(
    engine: &dyn SpeechEngine,
    text: &str,
    voice: &str,
) -> Result<SpeechAudio, PagecastError> {
    let mut stream = engine.synthesize(text, voice);
    let mut samples = Vec::new();
    let mut segments = 0usize;

    while let Some(segment) = stream.next().await {
        let segment = segment.map_err(|e| PagecastError::Synthesis(format!("{e:#}")))?;
        samples.extend_from_slice(&segment.samples);
        segments += 1;
    }

    if segments == 0 {
        return Err(PagecastError::NoAudio);
    }

    info!(
        engine = engine.name(),
        voice,
        segments,
        samples = samples.len(),
        "Synthesized speech"
    );
    Ok(SpeechAudio {
        samples,
        sample_rate: SAMPLE_RATE,
        segments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSpeechEngine;

    #[tokio::test]
    async fn concatenates_segments_in_order() {
        let a = vec![0.1, 0.2, 0.3];
        let b = vec![-0.5, 0.25];
        let engine = MockSpeechEngine::with_segments(vec![a.clone(), b.clone()]);

        let audio = synthesize_speech(&engine, "hello\nworld", DEFAULT_VOICE).await.unwrap();
        assert_eq!(audio.samples, [a, b].concat());
        assert_eq!(audio.sample_rate, 24_000);
        assert_eq!(audio.segments, 2);
    }

    #[tokio::test]
    async fn zero_segments_is_failure() {
        let engine = MockSpeechEngine::silent();
        let err = synthesize_speech(&engine, "hello", DEFAULT_VOICE).await.unwrap_err();
        assert!(matches!(err, PagecastError::NoAudio));
    }

    #[tokio::test]
    async fn segment_error_fails_whole_request() {
        let engine = MockSpeechEngine::failing("voice not found");
        let err = synthesize_speech(&engine, "hello", "zz_nobody").await.unwrap_err();
        assert!(matches!(err, PagecastError::Synthesis(_)));
        assert!(err.to_string().contains("voice not found"));
    }
}
