pub mod engine;
pub mod lazy;
pub mod mock;
pub mod pipeline;
pub mod wav;

pub use engine::{KokoroTts, split_chunks};
pub use lazy::LazySpeechEngine;
pub use pipeline::{DEFAULT_VOICE, SAMPLE_RATE, SpeechAudio, synthesize_speech};
pub use wav::{decode_wav, encode_wav};
