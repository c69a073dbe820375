use std::io::Cursor;

use scribe_domain::{AudioClip, AudioDecoderPort, DomainError};

/// Sample rate the speech model consumes.
pub const MODEL_SAMPLE_RATE: u32 = 16_000;

/// Decodes stored WAV bytes into mono f32 at the model sample rate.
/// Integer and float formats are accepted, stereo is downmixed and
/// other sample rates are linearly resampled.
pub struct WavAudioDecoder {
    target_sample_rate_hz: u32,
}

impl WavAudioDecoder {
    pub fn new(target_sample_rate_hz: u32) -> Self {
        Self {
            target_sample_rate_hz,
        }
    }
}

impl Default for WavAudioDecoder {
    fn default() -> Self {
        Self::new(MODEL_SAMPLE_RATE)
    }
}

impl AudioDecoderPort for WavAudioDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<AudioClip, DomainError> {
        let reader = hound::WavReader::new(Cursor::new(bytes)).map_err(|err| {
            DomainError::internal_error(&format!("audio object is not a readable WAV stream: {err}"))
        })?;
        let spec = reader.spec();
        if spec.channels == 0 || spec.bits_per_sample == 0 {
            return Err(DomainError::internal_error(
                "WAV stream reports a degenerate format",
            ));
        }

        let interleaved = read_samples(reader, &spec)?;
        let mono = downmix(&interleaved, spec.channels as usize);
        let samples = if spec.sample_rate == self.target_sample_rate_hz {
            mono
        } else {
            resample_linear(&mono, spec.sample_rate, self.target_sample_rate_hz)
        };

        tracing::debug!(
            source_sample_rate_hz = spec.sample_rate,
            channels = spec.channels,
            sample_count = samples.len(),
            "decoded audio object"
        );

        Ok(AudioClip {
            sample_rate_hz: self.target_sample_rate_hz,
            samples,
        })
    }
}

fn read_samples<R: std::io::Read>(
    mut reader: hound::WavReader<R>,
    spec: &hound::WavSpec,
) -> Result<Vec<f32>, DomainError> {
    let collected = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>(),
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample.min(32) - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|sample| sample.map(|value| value as f32 / scale))
                .collect::<Result<Vec<_>, _>>()
        }
    };
    collected.map_err(|err| DomainError::internal_error(&format!("WAV stream is corrupt: {err}")))
}

fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels == 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

fn resample_linear(samples: &[f32], from_hz: u32, to_hz: u32) -> Vec<f32> {
    if samples.is_empty() || from_hz == to_hz {
        return samples.to_vec();
    }
    let ratio = from_hz as f64 / to_hz as f64;
    let out_len = (samples.len() as f64 / ratio).floor() as usize;
    let mut out = Vec::with_capacity(out_len);
    for i in 0..out_len {
        let pos = i as f64 * ratio;
        let idx = pos as usize;
        let frac = (pos - idx as f64) as f32;
        let a = samples[idx.min(samples.len() - 1)];
        let b = samples[(idx + 1).min(samples.len() - 1)];
        out.push(a + (b - a) * frac);
    }
    out
}
