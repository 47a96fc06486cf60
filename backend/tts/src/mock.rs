/// In-process speech engine yielding canned segments.
use anyhow::Result;
use futures::StreamExt;
use futures::stream::{self, BoxStream};
use pagecast_core::{AudioSegment, SpeechEngine};

pub struct MockSpeechEngine {
    segments: Vec<AudioSegment>,
    failure: Option<String>,
}

impl MockSpeechEngine {
    pub fn with_segments(segments: Vec<Vec<f32>>) -> Self {
        Self {
            segments: segments.into_iter().map(AudioSegment::new).collect(),
            failure: None,
        }
    }

    /// An engine that yields no segments at all.
    pub fn silent() -> Self {
        Self::with_segments(Vec::new())
    }

    /// An engine whose first segment is an error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            segments: Vec::new(),
            failure: Some(message.into()),
        }
    }
}

impl SpeechEngine for MockSpeechEngine {
    fn name(&self) -> &str {
        "mock"
    }

    fn synthesize<'a>(&'a self, _text: &'a str, _voice: &'a str) -> BoxStream<'a, Result<AudioSegment>> {
        if let Some(message) = &self.failure {
            return stream::once(async move { Err::<AudioSegment, _>(anyhow::anyhow!("{message}")) }).boxed();
        }
        stream::iter(self.segments.iter().cloned().map(Ok)).boxed()
    }
}
