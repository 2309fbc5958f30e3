// SPDX-License-Identifier: MPL-2.0
//! Showreel media element and its playback pipeline.
//!
//! [`MediaElement`] is the playback surface the video controls drive.
//! [`VideoElement`] implements it on top of an FFmpeg decoder and a cpal
//! audio output running inside an iced subscription.

pub mod audio_output;
pub mod decoder;
pub mod subscription;
pub mod time;
pub mod video;
mod volume;

pub use subscription::PlaybackMessage;
pub use video::VideoElement;
pub use volume::Volume;

/// Live playback state and controls of a media element.
///
/// Setters take effect immediately on the values reported by the getters;
/// implementations clamp out-of-range input.
pub trait MediaElement {
    fn paused(&self) -> bool;
    fn ended(&self) -> bool;
    fn play(&mut self);
    fn pause(&mut self);
    /// Position in seconds.
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, seconds: f64);
    /// Length in seconds, `None` until metadata has loaded.
    fn duration(&self) -> Option<f64>;
    /// Level in `[0, 1]`, independent of [`MediaElement::muted`].
    fn volume(&self) -> f32;
    fn set_volume(&mut self, volume: f32);
    fn muted(&self) -> bool;
    fn set_muted(&mut self, muted: bool);
}

/// Notifications a media element raises while playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    /// Duration is known.
    LoadedMetadata,
    /// A new frame was presented.
    TimeUpdate,
    /// Playback reached the end.
    Ended,
    /// The source could not be opened or decoded.
    Error,
}
