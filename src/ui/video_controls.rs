// SPDX-License-Identifier: MPL-2.0
//! Showreel player surface and its control bar.
//!
//! The controls never keep their own copy of playback state: every operation
//! reads and writes the [`MediaElement`] passed in, and only the enumerated
//! button states and labels below are stored for rendering.

use crate::error::VideoError;
use crate::i18n::fluent::I18n;
use crate::media::time::{format_time, progress_percent};
use crate::media::{MediaElement, MediaEvent};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::seek_track;
use iced::widget::{
    button, center, container, image, mouse_area, row, slider, text, tooltip, Text,
};
use iced::{window, Alignment, ContentFit, Element, Length};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayButton {
    Playing,
    #[default]
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VolumeButton {
    Muted,
    #[default]
    Unmuted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FullscreenButton {
    Fullscreen,
    #[default]
    Windowed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Play button or a click on the video surface.
    TogglePlayback,
    /// Click on the progress track, as a share of its width.
    Seek(f32),
    ToggleMute,
    /// Volume slider input.
    SetVolume(f32),
    ToggleFullscreen,
}

/// Window-level work the application performs for the controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    EnterFullscreen,
    ExitFullscreen,
}

impl Effect {
    /// Window mode the effect asks for.
    pub fn requested_mode(self) -> Option<window::Mode> {
        match self {
            Effect::None => None,
            Effect::EnterFullscreen => Some(window::Mode::Fullscreen),
            Effect::ExitFullscreen => Some(window::Mode::Windowed),
        }
    }
}

/// Inputs for the player view besides the controls' own state.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub frame: Option<&'a image::Handle>,
    pub error: Option<&'a VideoError>,
}

#[derive(Debug, Clone)]
pub struct State {
    play: PlayButton,
    volume: VolumeButton,
    fullscreen: FullscreenButton,
    progress: f32,
    current_label: String,
    duration_label: String,
    slider_value: f32,
}

impl State {
    /// Control state matching the element as it is now.
    pub fn new(media: &impl MediaElement) -> Self {
        let muted = media.muted();
        Self {
            play: if media.paused() {
                PlayButton::Paused
            } else {
                PlayButton::Playing
            },
            volume: if muted {
                VolumeButton::Muted
            } else {
                VolumeButton::Unmuted
            },
            fullscreen: FullscreenButton::Windowed,
            progress: progress_percent(media.current_time(), media.duration()),
            current_label: format_time(media.current_time()),
            duration_label: format_time(media.duration().unwrap_or(f64::NAN)),
            slider_value: if muted { 0.0 } else { media.volume() },
        }
    }

    pub fn play_button(&self) -> PlayButton {
        self.play
    }

    pub fn volume_button(&self) -> VolumeButton {
        self.volume
    }

    pub fn fullscreen_button(&self) -> FullscreenButton {
        self.fullscreen
    }

    /// Elapsed share in percent.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn current_label(&self) -> &str {
        &self.current_label
    }

    pub fn duration_label(&self) -> &str {
        &self.duration_label
    }

    pub fn slider_value(&self) -> f32 {
        self.slider_value
    }

    pub fn update(&mut self, message: Message, media: &mut impl MediaElement) -> Effect {
        match message {
            Message::TogglePlayback => {
                if media.paused() || media.ended() {
                    media.play();
                    self.play = PlayButton::Playing;
                } else {
                    media.pause();
                    self.play = PlayButton::Paused;
                }
            }
            Message::Seek(fraction) => {
                if let Some(duration) = media.duration() {
                    media.set_current_time(f64::from(fraction) * duration);
                }
            }
            Message::ToggleMute => {
                if media.muted() {
                    media.set_muted(false);
                    self.volume = VolumeButton::Unmuted;
                    self.slider_value = media.volume();
                } else {
                    media.set_muted(true);
                    self.volume = VolumeButton::Muted;
                    self.slider_value = 0.0;
                }
            }
            Message::SetVolume(value) => {
                media.set_volume(value);
                self.slider_value = value;
                if media.volume() > 0.0 {
                    media.set_muted(false);
                    self.volume = VolumeButton::Unmuted;
                } else {
                    media.set_muted(true);
                    self.volume = VolumeButton::Muted;
                }
            }
            Message::ToggleFullscreen => {
                return match self.fullscreen {
                    FullscreenButton::Windowed => Effect::EnterFullscreen,
                    FullscreenButton::Fullscreen => Effect::ExitFullscreen,
                };
            }
        }
        Effect::None
    }

    /// Refreshes labels and buttons after the element raised `event`.
    pub fn handle_media_event(&mut self, event: MediaEvent, media: &impl MediaElement) {
        match event {
            MediaEvent::LoadedMetadata => {
                self.duration_label = format_time(media.duration().unwrap_or(f64::NAN));
            }
            MediaEvent::TimeUpdate => {
                self.progress = progress_percent(media.current_time(), media.duration());
                self.current_label = format_time(media.current_time());
            }
            MediaEvent::Ended => {
                self.play = PlayButton::Paused;
                self.progress = progress_percent(media.current_time(), media.duration());
                self.current_label = format_time(media.current_time());
            }
            MediaEvent::Error => {
                self.play = PlayButton::Paused;
            }
        }
    }

    /// Sets the fullscreen button from the mode the window reports.
    ///
    /// `requested` is the mode asked for just before, if any. A request the
    /// window did not honor is logged.
    pub fn set_window_mode(&mut self, requested: Option<window::Mode>, actual: window::Mode) {
        if let Some(requested) = requested {
            if requested != actual {
                tracing::error!(?requested, ?actual, "window mode change not honored");
            }
        }
        self.fullscreen = if actual == window::Mode::Fullscreen {
            FullscreenButton::Fullscreen
        } else {
            FullscreenButton::Windowed
        };
    }

    /// Player surface with the control bar under it.
    pub fn view<'a>(&self, ctx: ViewContext<'a>) -> Element<'a, Message> {
        let surface: Element<'a, Message> = if let Some(error) = ctx.error {
            container(text(ctx.i18n.tr(error.i18n_key())).size(typography::BODY_LG))
                .padding(spacing::LG)
                .style(styles::container::player_error)
                .into()
        } else if let Some(frame) = ctx.frame {
            mouse_area(
                image(frame.clone())
                    .content_fit(ContentFit::Contain)
                    .width(Length::Fill)
                    .height(Length::Fill),
            )
            .on_press(Message::TogglePlayback)
            .into()
        } else {
            text(ctx.i18n.tr("video-loading"))
                .size(typography::BODY)
                .into()
        };

        let surface = container(center(surface))
            .width(Length::Fill)
            .height(if self.fullscreen == FullscreenButton::Fullscreen {
                Length::Fill
            } else {
                Length::Fixed(sizing::PLAYER_HEIGHT)
            })
            .style(styles::container::player_surface);

        let column = iced::widget::column![surface, self.controls(ctx.i18n)];
        container(column).width(Length::Fill).into()
    }

    fn controls<'a>(&self, i18n: &'a I18n) -> Element<'a, Message> {
        let playing = self.play == PlayButton::Playing;
        let play_button = control_button(
            if playing { "❚❚" } else { "▶" },
            Message::TogglePlayback,
            false,
            i18n.tr(if playing {
                "video-pause-tooltip"
            } else {
                "video-play-tooltip"
            }),
        );

        let time_display = text(format!("{} / {}", self.current_label, self.duration_label))
            .size(typography::CAPTION);

        let muted = self.volume == VolumeButton::Muted;
        let volume_button = control_button(
            if muted { "🔇" } else { "🔊" },
            Message::ToggleMute,
            muted,
            i18n.tr(if muted {
                "video-unmute-tooltip"
            } else {
                "video-mute-tooltip"
            }),
        );

        let volume_slider = slider(0.0..=1.0, self.slider_value, Message::SetVolume)
            .width(Length::Fixed(sizing::VOLUME_SLIDER_WIDTH))
            .step(0.01)
            .style(styles::slider::volume);

        let fullscreen = self.fullscreen == FullscreenButton::Fullscreen;
        let fullscreen_button = control_button(
            if fullscreen { "⤡" } else { "⤢" },
            Message::ToggleFullscreen,
            fullscreen,
            i18n.tr(if fullscreen {
                "video-exit-fullscreen-tooltip"
            } else {
                "video-fullscreen-tooltip"
            }),
        );

        let controls = row![
            play_button,
            seek_track(self.progress, Message::Seek),
            time_display,
            volume_button,
            volume_slider,
            fullscreen_button,
        ]
        .spacing(spacing::XS)
        .padding(spacing::XS)
        .align_y(Alignment::Center);

        container(controls)
            .width(Length::Fill)
            .style(styles::container::controls_bar)
            .into()
    }
}

fn control_button<'a>(
    glyph: &'static str,
    message: Message,
    active: bool,
    tip: String,
) -> Element<'a, Message> {
    let button = button(Text::new(glyph).size(sizing::CONTROL_ICON))
        .on_press(message)
        .padding(spacing::XS)
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .style(styles::button::control(active));

    tooltip(button, Text::new(tip), tooltip::Position::Top)
        .gap(4)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct FakeMedia {
        paused: bool,
        ended: bool,
        current_time: f64,
        duration: Option<f64>,
        volume: f32,
        muted: bool,
        play_calls: usize,
    }

    impl FakeMedia {
        fn loaded(duration: f64) -> Self {
            Self {
                paused: true,
                duration: Some(duration),
                volume: 1.0,
                ..Self::default()
            }
        }
    }

    impl MediaElement for FakeMedia {
        fn paused(&self) -> bool {
            self.paused
        }
        fn ended(&self) -> bool {
            self.ended
        }
        fn play(&mut self) {
            self.play_calls += 1;
            self.paused = false;
            self.ended = false;
        }
        fn pause(&mut self) {
            self.paused = true;
        }
        fn current_time(&self) -> f64 {
            self.current_time
        }
        fn set_current_time(&mut self, seconds: f64) {
            self.current_time = seconds;
        }
        fn duration(&self) -> Option<f64> {
            self.duration
        }
        fn volume(&self) -> f32 {
            self.volume
        }
        fn set_volume(&mut self, volume: f32) {
            self.volume = volume.clamp(0.0, 1.0);
        }
        fn muted(&self) -> bool {
            self.muted
        }
        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }
    }

    #[test]
    fn toggle_playback_alternates() {
        let mut media = FakeMedia::loaded(90.0);
        let mut state = State::new(&media);
        assert_eq!(state.play_button(), PlayButton::Paused);

        state.update(Message::TogglePlayback, &mut media);
        assert!(!media.paused);
        assert_eq!(state.play_button(), PlayButton::Playing);

        state.update(Message::TogglePlayback, &mut media);
        assert!(media.paused);
        assert_eq!(state.play_button(), PlayButton::Paused);
    }

    #[test]
    fn toggle_on_ended_element_plays() {
        let mut media = FakeMedia::loaded(90.0);
        media.ended = true;
        media.paused = false;
        let mut state = State::new(&media);

        state.update(Message::TogglePlayback, &mut media);
        assert_eq!(media.play_calls, 1);
        assert_eq!(state.play_button(), PlayButton::Playing);
    }

    #[test]
    fn seek_assigns_fraction_of_duration() {
        let mut media = FakeMedia::loaded(120.0);
        let mut state = State::new(&media);
        state.update(Message::Seek(0.25), &mut media);
        assert_eq!(media.current_time, 30.0);
    }

    #[test]
    fn seek_without_duration_is_ignored() {
        let mut media = FakeMedia::loaded(120.0);
        media.duration = None;
        media.current_time = 7.0;
        let mut state = State::new(&media);
        state.update(Message::Seek(0.5), &mut media);
        assert_eq!(media.current_time, 7.0);
    }

    #[test]
    fn mute_toggle_keeps_volume() {
        let mut media = FakeMedia::loaded(60.0);
        media.volume = 0.6;
        let mut state = State::new(&media);

        state.update(Message::ToggleMute, &mut media);
        assert!(media.muted);
        assert_eq!(state.volume_button(), VolumeButton::Muted);
        assert_eq!(state.slider_value(), 0.0);
        assert_eq!(media.volume, 0.6);

        state.update(Message::ToggleMute, &mut media);
        assert!(!media.muted);
        assert_eq!(state.volume_button(), VolumeButton::Unmuted);
        assert_eq!(state.slider_value(), 0.6);
        assert_eq!(media.volume, 0.6);
    }

    #[test]
    fn volume_zero_mutes_and_positive_unmutes() {
        let mut media = FakeMedia::loaded(60.0);
        let mut state = State::new(&media);

        state.update(Message::SetVolume(0.0), &mut media);
        assert!(media.muted);
        assert_eq!(state.volume_button(), VolumeButton::Muted);

        state.update(Message::SetVolume(0.3), &mut media);
        assert!(!media.muted);
        assert_eq!(state.volume_button(), VolumeButton::Unmuted);
        assert_eq!(state.slider_value(), 0.3);
    }

    #[test]
    fn time_update_refreshes_progress_and_label() {
        let mut media = FakeMedia::loaded(200.0);
        let mut state = State::new(&media);
        media.current_time = 65.0;

        state.handle_media_event(MediaEvent::TimeUpdate, &media);
        assert_eq!(state.current_label(), "01:05");
        assert!((state.progress() - 32.5).abs() < 1e-4);
    }

    #[test]
    fn metadata_sets_duration_label() {
        let mut media = FakeMedia::loaded(0.0);
        media.duration = None;
        let mut state = State::new(&media);
        assert_eq!(state.duration_label(), "00:00");

        media.duration = Some(3599.0);
        state.handle_media_event(MediaEvent::LoadedMetadata, &media);
        assert_eq!(state.duration_label(), "59:59");
    }

    #[test]
    fn ended_resets_play_button() {
        let mut media = FakeMedia::loaded(10.0);
        let mut state = State::new(&media);
        state.update(Message::TogglePlayback, &mut media);

        media.ended = true;
        media.current_time = 10.0;
        state.handle_media_event(MediaEvent::Ended, &media);
        assert_eq!(state.play_button(), PlayButton::Paused);
        assert_eq!(state.progress(), 100.0);
    }

    #[test]
    fn fullscreen_follows_reported_mode() {
        let mut media = FakeMedia::loaded(10.0);
        let mut state = State::new(&media);

        let effect = state.update(Message::ToggleFullscreen, &mut media);
        assert_eq!(effect, Effect::EnterFullscreen);
        assert_eq!(state.fullscreen_button(), FullscreenButton::Windowed);

        state.set_window_mode(effect.requested_mode(), window::Mode::Fullscreen);
        assert_eq!(state.fullscreen_button(), FullscreenButton::Fullscreen);
        assert_eq!(
            state.update(Message::ToggleFullscreen, &mut media),
            Effect::ExitFullscreen
        );
    }

    #[test]
    fn refused_fullscreen_stays_windowed() {
        let media = FakeMedia::loaded(10.0);
        let mut state = State::new(&media);
        state.set_window_mode(Some(window::Mode::Fullscreen), window::Mode::Windowed);
        assert_eq!(state.fullscreen_button(), FullscreenButton::Windowed);
    }
}
