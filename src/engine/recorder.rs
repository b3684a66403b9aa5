//! WAV export
//!
//! Tone schedules rendered offline into mono float WAV files.

use anyhow::{Context, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use super::offline::lock_mixer;
use super::{OfflineBackend, ToneSynthesizer};
use crate::codec::ToneSchedule;

/// Mono float WAV output
pub struct WavSink {
    writer: WavWriter<BufWriter<File>>,
    sample_rate: u32,
    frames: u64,
}

impl WavSink {
    /// Create or truncate `path` for mono 32-bit float samples
    pub fn create(path: &Path, sample_rate: u32) -> Result<Self> {
        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let writer = WavWriter::create(path, spec)
            .with_context(|| format!("failed to create WAV file: {:?}", path))?;

        Ok(Self { writer, sample_rate, frames: 0 })
    }

    /// Frames written so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Seconds written so far
    pub fn elapsed_secs(&self) -> f64 {
        self.frames as f64 / self.sample_rate as f64
    }

    /// Append samples
    pub fn write(&mut self, samples: &[f32]) -> Result<()> {
        samples
            .iter()
            .try_for_each(|&s| self.writer.write_sample(s))
            .context("failed to write sample")?;
        self.frames += samples.len() as u64;
        Ok(())
    }

    /// Patch the header and close the file, returning the frame count
    pub fn finish(self) -> Result<u64> {
        let frames = self.frames;
        self.writer.finalize().context("failed to finalize WAV file")?;
        Ok(frames)
    }
}

/// Render a schedule to a WAV file, returning the number of samples written.
///
/// The file covers the schedule's full duration, trailing gap included.
pub fn render_to_wav(schedule: &ToneSchedule, path: &Path, sample_rate: u32) -> Result<u64> {
    let backend = OfflineBackend::new(sample_rate);
    let mixer = backend.mixer();
    let mut synth = ToneSynthesizer::new(backend);
    synth.play(schedule)?;

    let total = (schedule.total_ms() * sample_rate as u64).div_ceil(1000);
    let mut sink = WavSink::create(path, sample_rate)?;
    let mut buffer = [0.0f32; 1024];

    while sink.frames() < total {
        let chunk = (total - sink.frames()).min(buffer.len() as u64) as usize;
        lock_mixer(&mixer).fill_buffer(&mut buffer[..chunk]);
        sink.write(&buffer[..chunk])?;
    }

    let written = sink.finish()?;
    tracing::debug!("rendered {} samples to {:?}", written, path);
    Ok(written)
}
