/// WAV container encoding for synthesized audio (16-bit mono PCM).
use std::io::Cursor;

use anyhow::{Context, Result};
use base64::{Engine, engine::general_purpose::STANDARD};

use crate::pipeline::SpeechAudio;

/// Inverse of [`pcm16_to_f32`](crate::engine::pcm16_to_f32): the same 32768 scale,
/// so engine PCM survives the trip into the WAV unchanged.
fn to_pcm16(sample: f32) -> i16 {
    (sample * 32768.0)
        .round()
        .clamp(f32::from(i16::MIN), f32::from(i16::MAX)) as i16
}

/// Encode mono `f32` samples as a 16-bit PCM WAV file in memory.
pub fn encode_wav(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::with_capacity(44 + samples.len() * 2));
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).context("Failed to start WAV stream")?;
        for &s in samples {
            writer.write_sample(to_pcm16(s))?;
        }
        writer.finalize().context("Failed to finalize WAV stream")?;
    }
    Ok(cursor.into_inner())
}

/// Read a 16-bit WAV back into its sample rate and raw samples.
pub fn decode_wav(bytes: &[u8]) -> Result<(u32, Vec<i16>)> {
    let mut reader = hound::WavReader::new(Cursor::new(bytes)).context("Not a WAV stream")?;
    let rate = reader.spec().sample_rate;
    let samples = reader.samples::<i16>().collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((rate, samples))
}

impl SpeechAudio {
    pub fn to_wav(&self) -> Result<Vec<u8>> {
        encode_wav(&self.samples, self.sample_rate)
    }

    /// The WAV file, base64-encoded for JSON transport.
    pub fn to_base64_wav(&self) -> Result<String> {
        Ok(STANDARD.encode(self.to_wav()?))
    }

    /// Samples as they appear in the encoded WAV.
    pub fn pcm16(&self) -> Vec<i16> {
        self.samples.iter().copied().map(to_pcm16).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_header_and_samples() {
        let bytes = encode_wav(&[0.0, 1.0, -1.0, 2.0], 24_000).unwrap();
        assert_eq!(&bytes[..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(bytes.len(), 44 + 4 * 2);

        let (rate, samples) = decode_wav(&bytes).unwrap();
        assert_eq!(rate, 24_000);
        assert_eq!(samples, vec![0, i16::MAX, i16::MIN, i16::MAX]);
    }

    #[test]
    fn engine_pcm_survives_wav_round_trip() {
        let input: Vec<i16> = vec![1000, 16383, 16385, 20000, 32767, -32768, -20000, 0, -1];
        let raw: Vec<u8> = input.iter().flat_map(|s| s.to_le_bytes()).collect();

        let samples = crate::engine::pcm16_to_f32(&raw);
        let (_, out) = decode_wav(&encode_wav(&samples, 24_000).unwrap()).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn base64_wav_matches_pcm16() {
        let audio = SpeechAudio {
            samples: vec![0.5, -0.25],
            sample_rate: 24_000,
            segments: 1,
        };
        let b64 = audio.to_base64_wav().unwrap();
        let (_, samples) = decode_wav(&STANDARD.decode(b64).unwrap()).unwrap();
        assert_eq!(samples, audio.pcm16());
    }
}
