//! WAV packaging for completed recordings
//!
//! The coordinator hands back raw PCM16LE bytes; these helpers wrap them in a
//! WAV container so the memo is playable by any audio player.

use anyhow::{bail, Context, Result};
use std::io::Cursor;
use std::path::Path;

/// Wrap raw PCM16LE bytes in an in-memory WAV container.
pub fn wav_bytes(pcm: &[u8], sample_rate: u32, channels: u16) -> Result<Vec<u8>> {
    if pcm.len() % 2 != 0 {
        bail!("PCM byte stream has odd length ({} bytes)", pcm.len());
    }

    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut buffer = Cursor::new(Vec::new());
    {
        let mut writer =
            hound::WavWriter::new(&mut buffer, spec).context("Failed to create WAV writer")?;
        for sample in pcm.chunks_exact(2) {
            writer
                .write_sample(i16::from_le_bytes([sample[0], sample[1]]))
                .context("Failed to write sample to WAV")?;
        }
        writer.finalize().context("Failed to finalize WAV")?;
    }

    Ok(buffer.into_inner())
}

/// Write raw PCM16LE bytes to a WAV file on disk.
pub fn write_wav_file(path: &Path, pcm: &[u8], sample_rate: u32, channels: u16) -> Result<()> {
    let bytes = wav_bytes(pcm, sample_rate, channels)?;
    std::fs::write(path, bytes).with_context(|| format!("Failed to write WAV file: {path:?}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wav_round_trips_samples() -> Result<()> {
        let samples: Vec<i16> = vec![0, 100, -100, i16::MAX, i16::MIN];
        let pcm: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();

        let wav = wav_bytes(&pcm, 16000, 1)?;
        let reader = hound::WavReader::new(Cursor::new(wav))?;
        assert_eq!(reader.spec().sample_rate, 16000);
        assert_eq!(reader.spec().channels, 1);

        let decoded: Vec<i16> = reader.into_samples().collect::<Result<_, _>>()?;
        assert_eq!(decoded, samples);
        Ok(())
    }

    #[test]
    fn odd_length_pcm_is_rejected() {
        assert!(wav_bytes(&[0u8, 1, 2], 16000, 1).is_err());
    }
}
