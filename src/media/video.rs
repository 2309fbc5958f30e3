// SPDX-License-Identifier: MPL-2.0
//! FFmpeg-backed media element for the showreel.

use super::subscription::{video_playback, CommandSender, PlaybackMessage, PlayerCommand};
use super::{MediaElement, MediaEvent, Volume};
use crate::error::{Result, VideoError};
use iced::widget::image;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Once};

static FFMPEG_INIT: Once = Once::new();

/// Initializes FFmpeg once and lowers its log level to errors.
pub fn init_ffmpeg() -> Result<()> {
    let mut init_result: Result<()> = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            init_result = Err(VideoError::Other(format!("FFmpeg initialization failed: {e}")).into());
            return;
        }

        // SAFETY: av_log_set_level only updates a global log threshold.
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });

    init_result
}

/// The showreel `<video>` equivalent.
///
/// Playback state lives here and is updated from two directions: the
/// [`MediaElement`] setters (called by the controls) and the
/// [`PlaybackMessage`]s coming back from the decoder. Commands issued before
/// the pipeline reports [`PlaybackMessage::Started`] are queued.
#[derive(Debug)]
pub struct VideoElement {
    source: PathBuf,
    session_id: u64,
    sender: Option<CommandSender>,
    pending: Vec<PlayerCommand>,
    paused: bool,
    ended: bool,
    current_time: f64,
    duration: Option<f64>,
    volume: Volume,
    muted: bool,
    frame: Option<image::Handle>,
    error: Option<VideoError>,
}

impl VideoElement {
    pub fn new(source: PathBuf, volume: f32, muted: bool) -> Self {
        Self {
            source,
            session_id: 0,
            sender: None,
            pending: Vec::new(),
            paused: true,
            ended: false,
            current_time: 0.0,
            duration: None,
            volume: Volume::new(volume),
            muted,
            frame: None,
            error: None,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Playback pipeline for this element.
    pub fn subscription(&self) -> iced::Subscription<PlaybackMessage> {
        video_playback(self.source.clone(), self.session_id, self.volume, self.muted)
    }

    /// Most recent decoded frame.
    pub fn frame(&self) -> Option<&image::Handle> {
        self.frame.as_ref()
    }

    pub fn error(&self) -> Option<&VideoError> {
        self.error.as_ref()
    }

    /// Applies a pipeline message and reports the matching media event.
    pub fn handle(&mut self, message: PlaybackMessage) -> Option<MediaEvent> {
        match message {
            PlaybackMessage::Started(sender) => {
                for command in self.pending.drain(..) {
                    if let Err(e) = sender.send(command) {
                        tracing::warn!(error = %e, "queued playback command dropped");
                    }
                }
                self.sender = Some(sender);
                None
            }
            PlaybackMessage::Metadata(metadata) => {
                self.duration = metadata.duration_secs;
                Some(MediaEvent::LoadedMetadata)
            }
            PlaybackMessage::FrameReady(frame) => {
                let pixels =
                    Arc::try_unwrap(frame.rgba_data).unwrap_or_else(|shared| (*shared).clone());
                self.frame = Some(image::Handle::from_rgba(frame.width, frame.height, pixels));
                self.current_time = frame.pts_secs;
                Some(MediaEvent::TimeUpdate)
            }
            PlaybackMessage::EndOfStream => {
                self.ended = true;
                self.paused = true;
                if let Some(duration) = self.duration {
                    self.current_time = duration;
                }
                Some(MediaEvent::Ended)
            }
            PlaybackMessage::Error(error) => {
                tracing::error!(source = %self.source.display(), %error, "showreel unavailable");
                self.error = Some(error);
                self.paused = true;
                Some(MediaEvent::Error)
            }
        }
    }

    fn send(&mut self, command: PlayerCommand) {
        match &self.sender {
            Some(sender) => {
                if let Err(e) = sender.send(command) {
                    tracing::warn!(error = %e, "playback command dropped");
                }
            }
            None => self.pending.push(command),
        }
    }
}

impl MediaElement for VideoElement {
    fn paused(&self) -> bool {
        self.paused
    }

    fn ended(&self) -> bool {
        self.ended
    }

    fn play(&mut self) {
        if self.ended {
            self.ended = false;
            self.current_time = 0.0;
            self.send(PlayerCommand::Seek(0.0));
        }
        self.paused = false;
        self.send(PlayerCommand::Play);
    }

    fn pause(&mut self) {
        self.paused = true;
        self.send(PlayerCommand::Pause);
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, seconds: f64) {
        let upper = self.duration.unwrap_or(f64::INFINITY);
        let target = if seconds.is_nan() {
            0.0
        } else {
            seconds.clamp(0.0, upper)
        };
        if target < upper {
            self.ended = false;
        }
        self.current_time = target;
        self.send(PlayerCommand::Seek(target));
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn volume(&self) -> f32 {
        self.volume.value()
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = Volume::new(volume);
        self.send(PlayerCommand::SetVolume(self.volume));
    }

    fn muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.send(PlayerCommand::SetMuted(muted));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::decoder::{DecodedFrame, StreamMetadata};

    fn element() -> VideoElement {
        VideoElement::new(PathBuf::from("showreel.mp4"), 1.0, false)
    }

    fn metadata(duration_secs: Option<f64>) -> PlaybackMessage {
        PlaybackMessage::Metadata(StreamMetadata {
            duration_secs,
            width: 2,
            height: 2,
            has_audio: false,
        })
    }

    #[test]
    fn starts_paused_without_duration() {
        let video = element();
        assert!(video.paused());
        assert!(!video.ended());
        assert_eq!(video.duration(), None);
    }

    #[test]
    fn commands_before_start_are_queued() {
        let mut video = element();
        video.play();
        video.set_volume(0.5);
        assert_eq!(
            video.pending,
            vec![PlayerCommand::Play, PlayerCommand::SetVolume(Volume::new(0.5))]
        );
    }

    #[test]
    fn metadata_sets_duration() {
        let mut video = element();
        assert_eq!(video.handle(metadata(Some(90.0))), Some(MediaEvent::LoadedMetadata));
        assert_eq!(video.duration(), Some(90.0));
    }

    #[test]
    fn frames_advance_current_time() {
        let mut video = element();
        let event = video.handle(PlaybackMessage::FrameReady(DecodedFrame {
            rgba_data: Arc::new(vec![0; 16]),
            width: 2,
            height: 2,
            pts_secs: 4.5,
        }));
        assert_eq!(event, Some(MediaEvent::TimeUpdate));
        assert_eq!(video.current_time(), 4.5);
        assert!(video.frame().is_some());
    }

    #[test]
    fn play_after_end_restarts_from_zero() {
        let mut video = element();
        video.handle(metadata(Some(30.0)));
        video.play();
        video.handle(PlaybackMessage::EndOfStream);
        assert!(video.ended());
        assert!(video.paused());
        assert_eq!(video.current_time(), 30.0);

        video.pending.clear();
        video.play();
        assert!(!video.ended());
        assert!(!video.paused());
        assert_eq!(video.current_time(), 0.0);
        assert_eq!(
            video.pending,
            vec![PlayerCommand::Seek(0.0), PlayerCommand::Play]
        );
    }

    #[test]
    fn seek_is_clamped_to_duration() {
        let mut video = element();
        video.handle(metadata(Some(30.0)));
        video.set_current_time(45.0);
        assert_eq!(video.current_time(), 30.0);
        video.set_current_time(-3.0);
        assert_eq!(video.current_time(), 0.0);
    }

    #[test]
    fn volume_is_clamped() {
        let mut video = element();
        video.set_volume(1.7);
        assert_eq!(video.volume(), 1.0);
        video.set_volume(-1.0);
        assert_eq!(video.volume(), 0.0);
    }

    #[test]
    fn error_is_kept_for_display() {
        let mut video = element();
        let event = video.handle(PlaybackMessage::Error(VideoError::NoVideoStream));
        assert_eq!(event, Some(MediaEvent::Error));
        assert!(matches!(video.error(), Some(VideoError::NoVideoStream)));
    }

    #[test]
    fn init_ffmpeg_is_idempotent() {
        assert!(init_ffmpeg().is_ok());
        assert!(init_ffmpeg().is_ok());
    }
}
