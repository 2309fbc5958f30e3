// SPDX-License-Identifier: MPL-2.0
//! Async showreel decoder using FFmpeg.
//!
//! One blocking thread demuxes the file, paces video frames by their PTS and
//! resamples the audio stream (if any) to the output device format. Frames,
//! audio buffers and status are delivered through a bounded channel.
//!
//! A seek lands on the preceding keyframe; frames and audio before the
//! requested position are decoded but dropped, so playback resumes exactly
//! where it was asked to. At end of input both decoders are drained before
//! [`DecoderEvent::EndOfStream`] is raised.

use super::audio_output::{AudioOutputConfig, AudioSamples};
use super::time::{secs_to_timestamp, MICROS_PER_SECOND};
use crate::error::{Error, Result, VideoError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Idle poll interval while paused.
const IDLE_SLEEP: Duration = Duration::from_millis(10);

/// Slack for timestamp rounding when comparing a frame to a seek target.
const SEEK_TOLERANCE_SECS: f64 = 0.001;

/// A decoded video frame ready for display.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    /// RGBA pixel data (width × height × 4 bytes).
    pub rgba_data: Arc<Vec<u8>>,
    pub width: u32,
    pub height: u32,
    /// Presentation timestamp in seconds.
    pub pts_secs: f64,
}

/// Stream properties known once the file is opened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamMetadata {
    /// `None` when the container does not declare a duration.
    pub duration_secs: Option<f64>,
    pub width: u32,
    pub height: u32,
    pub has_audio: bool,
}

#[derive(Debug, Clone)]
pub enum DecoderCommand {
    Play,
    Pause,
    /// Seek to a timestamp, keeping the play/pause state.
    Seek { target_secs: f64 },
    Stop,
}

#[derive(Debug, Clone)]
pub enum DecoderEvent {
    Metadata(StreamMetadata),
    FrameReady(DecodedFrame),
    /// Resampled audio in the output device format.
    AudioReady(AudioSamples),
    EndOfStream,
    Error(VideoError),
}

/// Handle to the decoder thread.
pub struct AsyncDecoder {
    command_tx: mpsc::UnboundedSender<DecoderCommand>,
    event_rx: mpsc::Receiver<DecoderEvent>,
}

impl AsyncDecoder {
    /// Spawns the decoder for `video_path`.
    ///
    /// Audio is decoded only when `audio_output` is given.
    ///
    /// # Errors
    ///
    /// Returns [`VideoError::NotFound`] if the file does not exist. Failures
    /// while opening or decoding arrive later as [`DecoderEvent::Error`].
    pub fn new<P: AsRef<Path>>(
        video_path: P,
        audio_output: Option<AudioOutputConfig>,
    ) -> Result<Self> {
        let path = video_path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(VideoError::NotFound(path.display().to_string()).into());
        }

        // Commands are unbounded so the UI never blocks; events are bounded so
        // the decoder cannot run ahead of the UI.
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel(8);

        // FFmpeg contexts are not Send.
        tokio::task::spawn_blocking(move || {
            let error_tx = event_tx.clone();
            if let Err(e) = Self::decoder_loop_blocking(path, command_rx, event_tx, audio_output)
            {
                tracing::error!(error = %e, "decoder task failed");
                let video_error = match e {
                    Error::Video(video_error) => video_error,
                    other => VideoError::from_message(&other.to_string()),
                };
                let _ = error_tx.blocking_send(DecoderEvent::Error(video_error));
            }
        });

        Ok(Self {
            command_tx,
            event_rx,
        })
    }

    /// # Errors
    ///
    /// Returns an error if the decoder thread has exited.
    pub fn send_command(&self, command: DecoderCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| Error::Video(VideoError::PipelineStopped("decoder")))
    }

    /// Receives the next event, or `None` once the decoder thread has exited.
    pub async fn recv_event(&mut self) -> Option<DecoderEvent> {
        self.event_rx.recv().await
    }

    fn decoder_loop_blocking(
        video_path: PathBuf,
        mut command_rx: mpsc::UnboundedReceiver<DecoderCommand>,
        event_tx: mpsc::Sender<DecoderEvent>,
        audio_output: Option<AudioOutputConfig>,
    ) -> Result<()> {
        super::video::init_ffmpeg()?;

        let mut ictx = ffmpeg_next::format::input(&video_path)
            .map_err(|e| VideoError::from_message(&format!("Failed to open video: {e}")))?;

        let video_input = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or(VideoError::NoVideoStream)?;
        let mut video = VideoTrack::open(&video_input)?;
        let (width, height) = (video.width, video.height);

        let mut audio = match audio_output {
            Some(config) => AudioTrack::open(&ictx, config),
            None => None,
        };

        let duration_secs = (ictx.duration() > 0).then(|| ictx.duration() as f64 / MICROS_PER_SECOND);
        let metadata = StreamMetadata {
            duration_secs,
            width,
            height,
            has_audio: audio.is_some(),
        };
        tracing::info!(
            path = %video_path.display(),
            ?duration_secs,
            width,
            height,
            has_audio = metadata.has_audio,
            "showreel opened"
        );
        if event_tx
            .blocking_send(DecoderEvent::Metadata(metadata))
            .is_err()
        {
            return Ok(());
        }

        let mut is_playing = false;
        let mut playback_start_time: Option<Instant> = None;
        let mut first_pts: Option<f64> = None;
        let mut current_pts_secs: f64 = 0.0;
        // Frames and audio before this position are decoded but not presented.
        let mut seek_target: Option<f64> = None;
        // Set once the decoders have been drained after the last packet.
        let mut eof_flushed = false;
        // Decode one frame while paused: the poster frame and seek previews.
        let mut decode_single_frame = true;

        loop {
            match command_rx.try_recv() {
                Ok(DecoderCommand::Play) => {
                    if !is_playing && current_pts_secs > 0.0 {
                        let timestamp = secs_to_timestamp(current_pts_secs);
                        // `..timestamp` lets FFmpeg land on the preceding keyframe.
                        if let Err(e) = ictx.seek(timestamp, ..timestamp) {
                            tracing::warn!(error = %e, "resume seek failed");
                        } else {
                            video.decoder.flush();
                            if let Some(track) = audio.as_mut() {
                                track.decoder.flush();
                            }
                            seek_target = Some(current_pts_secs);
                            eof_flushed = false;
                        }
                    }
                    is_playing = true;
                    playback_start_time = Some(Instant::now());
                    first_pts = None;
                }
                Ok(DecoderCommand::Pause) => {
                    is_playing = false;
                    playback_start_time = None;
                    first_pts = None;
                }
                Ok(DecoderCommand::Seek { target_secs }) => {
                    let timestamp = secs_to_timestamp(target_secs);
                    if let Err(e) = ictx.seek(timestamp, ..timestamp) {
                        let _ = event_tx.blocking_send(DecoderEvent::Error(
                            VideoError::DecodingFailed(format!("Seek failed: {e}")),
                        ));
                    } else {
                        video.decoder.flush();
                        if let Some(track) = audio.as_mut() {
                            track.decoder.flush();
                        }
                        current_pts_secs = target_secs;
                        seek_target = Some(target_secs);
                        eof_flushed = false;
                        playback_start_time = is_playing.then(Instant::now);
                        first_pts = None;
                        if !is_playing {
                            decode_single_frame = true;
                        }
                    }
                }
                Ok(DecoderCommand::Stop) | Err(mpsc::error::TryRecvError::Disconnected) => {
                    break;
                }
                Err(mpsc::error::TryRecvError::Empty) => {}
            }

            if !is_playing && !decode_single_frame {
                std::thread::sleep(IDLE_SLEEP);
                continue;
            }

            let mut frames: Vec<DecodedFrame> = Vec::new();
            let mut receiver_gone = false;
            for (stream, packet) in ictx.packets() {
                let index = stream.index();

                if let Some(track) = audio.as_mut().filter(|t| t.stream_index == index) {
                    if !is_playing {
                        continue;
                    }
                    let samples = track.decode(&packet, seek_target);
                    if !send_audio(&event_tx, samples) {
                        receiver_gone = true;
                        break;
                    }
                    continue;
                }

                if index != video.stream_index {
                    continue;
                }

                match video.decode(&packet, seek_target, current_pts_secs) {
                    Ok(decoded) if decoded.is_empty() => {}
                    Ok(decoded) => {
                        frames = decoded;
                        break;
                    }
                    Err(error) => {
                        let _ = event_tx.blocking_send(DecoderEvent::Error(error));
                    }
                }
            }

            if receiver_gone {
                break;
            }

            // Packets ran out: drain what the decoders still hold.
            if frames.is_empty() && !eof_flushed {
                eof_flushed = true;
                if let Some(track) = audio.as_mut().filter(|_| is_playing) {
                    let samples = track.finish(seek_target);
                    if !send_audio(&event_tx, samples) {
                        break;
                    }
                }
                match video.finish(seek_target, current_pts_secs) {
                    Ok(decoded) => frames = decoded,
                    Err(error) => {
                        let _ = event_tx.blocking_send(DecoderEvent::Error(error));
                    }
                }
            }

            let mut frame_presented = false;
            for frame in frames {
                if let Some(start_time) = playback_start_time {
                    let first = *first_pts.get_or_insert(frame.pts_secs);
                    let frame_delay = (frame.pts_secs - first).max(0.0);
                    let target_time = start_time + Duration::from_secs_f64(frame_delay);
                    let now = Instant::now();
                    if target_time > now {
                        std::thread::sleep(target_time - now);
                    }
                }

                current_pts_secs = frame.pts_secs;
                seek_target = None;

                if event_tx
                    .blocking_send(DecoderEvent::FrameReady(frame))
                    .is_err()
                {
                    receiver_gone = true;
                    break;
                }

                frame_presented = true;
                decode_single_frame = false;
                if !is_playing {
                    break;
                }
            }

            if receiver_gone {
                break;
            }

            if !frame_presented {
                let _ = event_tx.blocking_send(DecoderEvent::EndOfStream);
                is_playing = false;
                playback_start_time = None;
                first_pts = None;
                seek_target = None;
                decode_single_frame = false;
            }
        }

        tracing::debug!("decoder loop finished");
        Ok(())
    }
}

/// Returns true if a frame at `pts_secs` is due after a seek to `seek_target`.
///
/// FFmpeg seeks land on the keyframe before the target; everything decoded
/// between that keyframe and the target is skipped.
fn should_present(pts_secs: f64, seek_target: Option<f64>) -> bool {
    seek_target.is_none_or(|target| pts_secs >= target - SEEK_TOLERANCE_SECS)
}

/// Forwards decoded audio; false once the receiver is gone.
fn send_audio(event_tx: &mpsc::Sender<DecoderEvent>, buffers: Vec<AudioSamples>) -> bool {
    buffers
        .into_iter()
        .all(|samples| event_tx.blocking_send(DecoderEvent::AudioReady(samples)).is_ok())
}

/// Video stream decoder with a scaler to RGBA.
struct VideoTrack {
    stream_index: usize,
    time_base: f64,
    decoder: ffmpeg_next::decoder::Video,
    scaler: ffmpeg_next::software::scaling::Context,
    width: u32,
    height: u32,
}

impl VideoTrack {
    fn open(input: &ffmpeg_next::Stream<'_>) -> Result<Self> {
        let decoder = ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
            .and_then(|context| context.decoder().video())
            .map_err(|e| VideoError::from_message(&format!("Failed to create video decoder: {e}")))?;

        let width = decoder.width();
        let height = decoder.height();

        let scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg_next::format::Pixel::RGBA,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )
        .map_err(|e| VideoError::DecodingFailed(format!("Failed to create scaler: {e}")))?;

        Ok(Self {
            stream_index: input.index(),
            time_base: f64::from(input.time_base()),
            decoder,
            scaler,
            width,
            height,
        })
    }

    /// Sends one packet and returns the due frames it completed.
    ///
    /// `fallback_pts` stamps frames that carry no timestamp.
    fn decode(
        &mut self,
        packet: &ffmpeg_next::Packet,
        seek_target: Option<f64>,
        fallback_pts: f64,
    ) -> std::result::Result<Vec<DecodedFrame>, VideoError> {
        if let Err(e) = self.decoder.send_packet(packet) {
            tracing::debug!(error = %e, "video packet rejected");
            return Ok(Vec::new());
        }
        self.receive_frames(seek_target, fallback_pts)
    }

    /// Signals end of stream and returns the frames still buffered.
    fn finish(
        &mut self,
        seek_target: Option<f64>,
        fallback_pts: f64,
    ) -> std::result::Result<Vec<DecodedFrame>, VideoError> {
        if let Err(e) = self.decoder.send_eof() {
            tracing::debug!(error = %e, "video decoder already at end of stream");
            return Ok(Vec::new());
        }
        self.receive_frames(seek_target, fallback_pts)
    }

    /// Drains every frame the decoder has ready.
    ///
    /// Draining after each send keeps `send_packet` from refusing input.
    fn receive_frames(
        &mut self,
        seek_target: Option<f64>,
        fallback_pts: f64,
    ) -> std::result::Result<Vec<DecodedFrame>, VideoError> {
        let mut frames = Vec::new();
        let mut decoded = ffmpeg_next::frame::Video::empty();
        while self.decoder.receive_frame(&mut decoded).is_ok() {
            let pts_secs = decoded
                .timestamp()
                .map_or(fallback_pts, |pts| pts as f64 * self.time_base);
            if !should_present(pts_secs, seek_target) {
                continue;
            }

            let mut rgba_frame = ffmpeg_next::frame::Video::empty();
            self.scaler
                .run(&decoded, &mut rgba_frame)
                .map_err(|e| VideoError::DecodingFailed(format!("Scaling failed: {e}")))?;

            frames.push(DecodedFrame {
                rgba_data: Arc::new(extract_rgba_data(&rgba_frame)),
                width: self.width,
                height: self.height,
                pts_secs,
            });
        }
        Ok(frames)
    }
}

/// Audio stream decoder with a resampler to the output format.
struct AudioTrack {
    stream_index: usize,
    time_base: f64,
    decoder: ffmpeg_next::decoder::Audio,
    resampler: ffmpeg_next::software::resampling::Context,
    channels: u16,
}

impl AudioTrack {
    /// Returns `None` when the file has no usable audio stream.
    fn open(ictx: &ffmpeg_next::format::context::Input, output: AudioOutputConfig) -> Option<Self> {
        let input = ictx.streams().best(ffmpeg_next::media::Type::Audio)?;
        let stream_index = input.index();
        let time_base = f64::from(input.time_base());

        let decoder = match ffmpeg_next::codec::context::Context::from_parameters(
            input.parameters(),
        )
        .and_then(|context| context.decoder().audio())
        {
            Ok(decoder) => decoder,
            Err(e) => {
                tracing::warn!(error = %e, "audio stream cannot be decoded, playing silently");
                return None;
            }
        };

        // Anything wider than stereo is downmixed.
        let output_layout = match output.channels {
            1 => ffmpeg_next::ChannelLayout::MONO,
            _ => ffmpeg_next::ChannelLayout::STEREO,
        };
        let channels = if output.channels == 1 { 1 } else { 2 };

        let resampler = match ffmpeg_next::software::resampling::Context::get(
            decoder.format(),
            decoder.channel_layout(),
            decoder.rate(),
            ffmpeg_next::format::Sample::F32(ffmpeg_next::format::sample::Type::Packed),
            output_layout,
            output.sample_rate,
        ) {
            Ok(resampler) => resampler,
            Err(e) => {
                tracing::warn!(error = %e, "audio resampler unavailable, playing silently");
                return None;
            }
        };

        Some(Self {
            stream_index,
            time_base,
            decoder,
            resampler,
            channels,
        })
    }

    /// Decodes one packet into zero or more sample buffers.
    fn decode(&mut self, packet: &ffmpeg_next::Packet, seek_target: Option<f64>) -> Vec<AudioSamples> {
        if let Err(e) = self.decoder.send_packet(packet) {
            tracing::debug!(error = %e, "audio packet rejected");
            return Vec::new();
        }
        self.receive_buffers(seek_target)
    }

    /// Signals end of stream and returns the samples still buffered.
    fn finish(&mut self, seek_target: Option<f64>) -> Vec<AudioSamples> {
        if let Err(e) = self.decoder.send_eof() {
            tracing::debug!(error = %e, "audio decoder already at end of stream");
            return Vec::new();
        }
        self.receive_buffers(seek_target)
    }

    fn receive_buffers(&mut self, seek_target: Option<f64>) -> Vec<AudioSamples> {
        let mut buffers = Vec::new();
        let mut decoded = ffmpeg_next::frame::Audio::empty();
        while self.decoder.receive_frame(&mut decoded).is_ok() {
            let due = decoded
                .timestamp()
                .is_none_or(|pts| should_present(pts as f64 * self.time_base, seek_target));
            if !due {
                continue;
            }

            let mut resampled = ffmpeg_next::frame::Audio::empty();
            if let Err(e) = self.resampler.run(&decoded, &mut resampled) {
                tracing::debug!(error = %e, "audio resampling failed");
                continue;
            }
            let samples = extract_samples(&resampled, self.channels);
            if !samples.is_empty() {
                buffers.push(Arc::new(samples));
            }
        }
        buffers
    }
}

/// Copies RGBA rows out of a frame, dropping stride padding.
fn extract_rgba_data(frame: &ffmpeg_next::frame::Video) -> Vec<u8> {
    let width = frame.width() as usize;
    let height = frame.height() as usize;
    let data = frame.data(0);
    let stride = frame.stride(0);

    let mut rgba_bytes = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        let row_start = y * stride;
        let row_end = row_start + width * 4;
        if let Some(row) = data.get(row_start..row_end) {
            rgba_bytes.extend_from_slice(row);
        }
    }
    rgba_bytes
}

/// Reads packed little-endian `f32` samples.
fn extract_samples(frame: &ffmpeg_next::frame::Audio, channels: u16) -> Vec<f32> {
    let sample_count = frame.samples() * channels as usize;
    frame
        .data(0)
        .chunks_exact(4)
        .take(sample_count)
        .map(|bytes| f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
        .collect()
}
