// SPDX-License-Identifier: MPL-2.0
//! Audio output using cpal.
//!
//! The decoder thread pushes interleaved `f32` samples; the cpal callback
//! drains them and applies the element's volume and mute state, which are
//! shared through atomics so changes take effect on the next callback.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

use super::Volume;
use crate::error::{Error, Result, VideoError};

/// Interleaved samples normalized to `[-1.0, 1.0]`.
pub type AudioSamples = Arc<Vec<f32>>;

/// Format the decoder must resample to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioOutputConfig {
    pub sample_rate: u32,
    pub channels: u16,
}

#[derive(Debug)]
pub enum AudioOutputCommand {
    /// Queue samples for playback.
    Play(AudioSamples),
    Pause,
    Resume,
    /// Drop queued samples without touching the pause state.
    ClearBuffer,
    SetVolume(Volume),
    SetMuted(bool),
}

/// State read by the cpal callback.
struct SharedState {
    volume_bits: AtomicU32,
    muted: AtomicBool,
    paused: AtomicBool,
}

impl SharedState {
    fn new(volume: Volume, muted: bool) -> Self {
        Self {
            volume_bits: AtomicU32::new(volume.value().to_bits()),
            muted: AtomicBool::new(muted),
            paused: AtomicBool::new(true),
        }
    }

    fn volume(&self) -> f32 {
        f32::from_bits(self.volume_bits.load(Ordering::Relaxed))
    }

    fn set_volume(&self, volume: Volume) {
        self.volume_bits
            .store(volume.value().to_bits(), Ordering::Relaxed);
    }

    fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Relaxed)
    }

    fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::Relaxed);
    }

    fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Relaxed);
    }

    /// Gain applied to each sample, zero while muted.
    fn gain(&self) -> f32 {
        if self.is_muted() {
            0.0
        } else {
            self.volume()
        }
    }
}

/// Output stream on the default audio device.
///
/// Starts paused; call [`AudioOutput::resume`] when playback begins.
pub struct AudioOutput {
    command_tx: mpsc::UnboundedSender<AudioOutputCommand>,
    shared_state: Arc<SharedState>,
    config: AudioOutputConfig,
    _stream: cpal::Stream,
}

impl AudioOutput {
    /// Opens the default output device.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no output device or the stream cannot be
    /// built or started.
    pub fn new(volume: Volume, muted: bool) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::Io("No audio output device found".to_string()))?;

        let supported_config = device
            .default_output_config()
            .map_err(|e| Error::Io(format!("Failed to get audio config: {e}")))?;

        let config = AudioOutputConfig {
            sample_rate: supported_config.sample_rate().0,
            channels: supported_config.channels(),
        };

        let shared_state = Arc::new(SharedState::new(volume, muted));

        // Capped at one second of audio; excess samples are dropped.
        let max_buffer_size = (config.sample_rate as usize) * (config.channels as usize);
        let buffer: Arc<Mutex<Vec<f32>>> = Arc::new(Mutex::new(Vec::with_capacity(max_buffer_size)));

        let (command_tx, mut command_rx) = mpsc::unbounded_channel::<AudioOutputCommand>();
        let buffer_for_task = Arc::clone(&buffer);
        let shared_for_task = Arc::clone(&shared_state);
        tokio::spawn(async move {
            while let Some(cmd) = command_rx.recv().await {
                match cmd {
                    AudioOutputCommand::Play(samples) => {
                        if let Ok(mut buf) = buffer_for_task.lock() {
                            let available = max_buffer_size.saturating_sub(buf.len());
                            let take = available.min(samples.len());
                            buf.extend_from_slice(&samples[..take]);
                        }
                    }
                    AudioOutputCommand::Pause => shared_for_task.set_paused(true),
                    AudioOutputCommand::Resume => shared_for_task.set_paused(false),
                    AudioOutputCommand::ClearBuffer => {
                        if let Ok(mut buf) = buffer_for_task.lock() {
                            buf.clear();
                        }
                    }
                    AudioOutputCommand::SetVolume(volume) => shared_for_task.set_volume(volume),
                    AudioOutputCommand::SetMuted(muted) => shared_for_task.set_muted(muted),
                }
            }
        });

        let stream_config: cpal::StreamConfig = supported_config.clone().into();
        let stream = match supported_config.sample_format() {
            cpal::SampleFormat::F32 => Self::build_stream::<f32>(
                &device,
                &stream_config,
                buffer,
                Arc::clone(&shared_state),
            )?,
            cpal::SampleFormat::I16 => Self::build_stream::<i16>(
                &device,
                &stream_config,
                buffer,
                Arc::clone(&shared_state),
            )?,
            cpal::SampleFormat::U16 => Self::build_stream::<u16>(
                &device,
                &stream_config,
                buffer,
                Arc::clone(&shared_state),
            )?,
            other => {
                return Err(Error::Io(format!(
                    "Unsupported audio sample format: {other:?}"
                )))
            }
        };

        stream
            .play()
            .map_err(|e| Error::Io(format!("Failed to start audio stream: {e}")))?;

        tracing::debug!(
            sample_rate = config.sample_rate,
            channels = config.channels,
            "audio output opened"
        );

        Ok(Self {
            command_tx,
            shared_state,
            config,
            _stream: stream,
        })
    }

    fn build_stream<T: cpal::SizedSample + cpal::FromSample<f32>>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        buffer: Arc<Mutex<Vec<f32>>>,
        shared_state: Arc<SharedState>,
    ) -> Result<cpal::Stream> {
        device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    if shared_state.is_paused() {
                        data.fill(T::from_sample(0.0f32));
                        return;
                    }

                    let Ok(mut buf) = buffer.lock() else {
                        data.fill(T::from_sample(0.0f32));
                        return;
                    };

                    let gain = shared_state.gain();
                    for (i, sample) in data.iter_mut().enumerate() {
                        let value = buf.get(i).copied().unwrap_or(0.0);
                        // i16 conversion overflows at exactly 1.0
                        *sample = T::from_sample((value * gain).clamp(-1.0, 0.999_999_9));
                    }

                    let consumed = data.len().min(buf.len());
                    buf.drain(..consumed);
                },
                |err| {
                    tracing::error!(%err, "audio output stream error");
                },
                None,
            )
            .map_err(|e| Error::Io(format!("Failed to build audio stream: {e}")))
    }

    /// # Errors
    ///
    /// Returns an error if the command task has stopped.
    pub fn send_command(&self, command: AudioOutputCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| Error::Video(VideoError::PipelineStopped("audio output")))
    }

    /// Queues samples for playback.
    ///
    /// # Errors
    ///
    /// Returns an error if the command task has stopped.
    pub fn play(&self, samples: AudioSamples) -> Result<()> {
        self.send_command(AudioOutputCommand::Play(samples))
    }

    /// # Errors
    ///
    /// Returns an error if the command task has stopped.
    pub fn pause(&self) -> Result<()> {
        self.send_command(AudioOutputCommand::Pause)
    }

    /// # Errors
    ///
    /// Returns an error if the command task has stopped.
    pub fn resume(&self) -> Result<()> {
        self.send_command(AudioOutputCommand::Resume)
    }

    /// # Errors
    ///
    /// Returns an error if the command task has stopped.
    pub fn clear_buffer(&self) -> Result<()> {
        self.send_command(AudioOutputCommand::ClearBuffer)
    }

    /// # Errors
    ///
    /// Returns an error if the command task has stopped.
    pub fn set_volume(&self, volume: Volume) -> Result<()> {
        self.send_command(AudioOutputCommand::SetVolume(volume))
    }

    /// # Errors
    ///
    /// Returns an error if the command task has stopped.
    pub fn set_muted(&self, muted: bool) -> Result<()> {
        self.send_command(AudioOutputCommand::SetMuted(muted))
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        self.shared_state.volume()
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.shared_state.is_muted()
    }

    #[must_use]
    pub fn config(&self) -> AudioOutputConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_state_starts_paused_with_initial_levels() {
        let state = SharedState::new(Volume::new(0.8), true);
        assert!(state.is_paused());
        assert!(state.is_muted());
        assert!((state.volume() - 0.8).abs() < 0.001);
    }

    #[test]
    fn gain_is_zero_while_muted_and_keeps_volume() {
        let state = SharedState::new(Volume::new(0.6), false);
        assert!((state.gain() - 0.6).abs() < 0.001);

        state.set_muted(true);
        assert_eq!(state.gain(), 0.0);
        assert!((state.volume() - 0.6).abs() < 0.001);

        state.set_muted(false);
        assert!((state.gain() - 0.6).abs() < 0.001);
    }

    #[test]
    fn shared_state_pause_toggles() {
        let state = SharedState::new(Volume::default(), false);
        state.set_paused(false);
        assert!(!state.is_paused());
        state.set_paused(true);
        assert!(state.is_paused());
    }

    #[test]
    fn set_volume_stores_clamped_level() {
        let state = SharedState::new(Volume::default(), false);
        state.set_volume(Volume::new(3.0));
        assert!((state.volume() - 1.0).abs() < 0.001);
    }

    #[tokio::test]
    #[ignore = "requires audio hardware"]
    async fn audio_output_can_be_created() {
        if let Ok(output) = AudioOutput::new(Volume::new(0.8), false) {
            assert!((output.volume() - 0.8).abs() < 0.001);
            assert!(!output.is_muted());
            assert!(output.config().sample_rate > 0);
        }
    }
}
