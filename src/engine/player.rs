//! Real-time audio sessions using cpal

use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, Stream, StreamConfig};

use super::offline::lock_mixer;
use super::{AudioBackend, AudioSession, SessionState, SynthError};
use crate::synth::{Mixer, ScheduleId, ScheduledTone};

/// Opens sessions on a sound card output device
#[derive(Debug, Clone, Default)]
pub struct CpalBackend {
    device: Option<String>,
}

/// An output device as reported by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDevice {
    pub name: String,
    pub sample_rate: u32,
    pub channels: u16,
    pub is_default: bool,
}

impl CpalBackend {
    /// Use the named output device, or the host default when `None`
    pub fn new(device: Option<String>) -> Self {
        Self { device }
    }

    /// Output devices with a usable default config, the host default marked
    pub fn output_devices() -> Result<Vec<OutputDevice>, SynthError> {
        let host = cpal::default_host();
        let default_name = host.default_output_device().and_then(|d| d.name().ok());

        let devices = host
            .output_devices()
            .map_err(|e| SynthError::CapabilityUnavailable(e.to_string()))?
            .filter_map(|device| {
                let name = device.name().ok()?;
                let config = device.default_output_config().ok()?;
                Some(OutputDevice {
                    is_default: default_name.as_ref() == Some(&name),
                    name,
                    sample_rate: config.sample_rate().0,
                    channels: config.channels(),
                })
            })
            .collect();

        Ok(devices)
    }

    fn find_device(&self) -> Result<Device, SynthError> {
        let host = cpal::default_host();

        let device = match &self.device {
            None => host.default_output_device(),
            Some(wanted) => host
                .output_devices()
                .map_err(|e| SynthError::CapabilityUnavailable(e.to_string()))?
                .find(|d| d.name().map(|n| &n == wanted).unwrap_or(false)),
        };

        device.ok_or_else(|| match &self.device {
            Some(name) => SynthError::CapabilityUnavailable(format!("no output device named {:?}", name)),
            None => SynthError::CapabilityUnavailable("no output device available".to_string()),
        })
    }
}

impl AudioBackend for CpalBackend {
    fn open(&self) -> Result<Box<dyn AudioSession>, SynthError> {
        let device = self.find_device()?;
        let config = device
            .default_output_config()
            .map_err(|e| SynthError::CapabilityUnavailable(e.to_string()))?;
        let sample_format = config.sample_format();
        let stream_config: StreamConfig = config.into();

        let mixer = Arc::new(Mutex::new(Mixer::new(stream_config.sample_rate.0 as f64)));

        let stream = match sample_format {
            SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, mixer.clone())?,
            SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, mixer.clone())?,
            SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, mixer.clone())?,
            other => {
                return Err(SynthError::CapabilityUnavailable(format!(
                    "unsupported sample format {:?}",
                    other
                )))
            }
        };

        // Some hosts start streams on creation
        if let Err(e) = stream.pause() {
            tracing::debug!("could not pause new stream: {}", e);
        }

        tracing::debug!(
            "audio stream on {:?}: {} Hz, {} ch",
            device.name().unwrap_or_default(),
            stream_config.sample_rate.0,
            stream_config.channels
        );

        Ok(Box::new(CpalSession {
            stream,
            mixer,
            state: SessionState::Suspended,
        }))
    }
}

/// A cpal output stream driving a mixer. Starts suspended.
struct CpalSession {
    stream: Stream,
    mixer: Arc<Mutex<Mixer>>,
    state: SessionState,
}

impl AudioSession for CpalSession {
    fn state(&self) -> SessionState {
        self.state
    }

    fn resume(&mut self) -> Result<(), SynthError> {
        self.stream.play().map_err(|e| SynthError::Stream(e.to_string()))?;
        self.state = SessionState::Running;
        Ok(())
    }

    fn current_time(&self) -> f64 {
        lock_mixer(&self.mixer).current_time()
    }

    fn schedule(&mut self, tone: ScheduledTone) {
        lock_mixer(&self.mixer).schedule(tone);
    }

    fn cancel(&mut self, schedule: ScheduleId) -> usize {
        lock_mixer(&self.mixer).cancel(schedule)
    }
}

fn build_stream<T: cpal::Sample + cpal::SizedSample + cpal::FromSample<f32>>(
    device: &Device,
    config: &StreamConfig,
    mixer: Arc<Mutex<Mixer>>,
) -> Result<Stream, SynthError> {
    let channels = config.channels as usize;

    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                if let Ok(mut mixer) = mixer.try_lock() {
                    for frame in data.chunks_mut(channels) {
                        let sample = mixer.process() as f32;
                        for channel_sample in frame.iter_mut() {
                            *channel_sample = T::from_sample(sample);
                        }
                    }
                } else {
                    // Being scheduled into, fill with silence
                    for sample in data.iter_mut() {
                        *sample = T::from_sample(0.0f32);
                    }
                }
            },
            |err| {
                tracing::error!("audio stream error: {}", err);
            },
            None,
        )
        .map_err(|e| SynthError::Stream(e.to_string()))
}
