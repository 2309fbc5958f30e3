// SPDX-License-Identifier: MPL-2.0
use film_showcase::app::config::{self, DEFAULT_NAV_BREAKPOINT, DEFAULT_REVEAL_THRESHOLD};
use film_showcase::i18n::fluent::I18n;
use film_showcase::media::time::format_time;
use film_showcase::media::{MediaElement, MediaEvent, VideoElement};
use film_showcase::ui::gallery::{self, Gallery, Visibility as ViewerVisibility, SERIES};
use film_showcase::ui::navbar::{self, MenuState, Section};
use film_showcase::ui::reveal::{self, Target, Visibility};
use film_showcase::ui::video_controls::{self, PlayButton, VolumeButton};
use iced::keyboard::{key::Named, Key};
use std::fs;
use tempfile::tempdir;

/// In-memory media element recording what the controls asked of it.
#[derive(Debug)]
struct RecordingMedia {
    paused: bool,
    ended: bool,
    current_time: f64,
    duration: Option<f64>,
    volume: f32,
    muted: bool,
    play_calls: usize,
}

impl RecordingMedia {
    fn with_duration(duration: f64) -> Self {
        Self {
            paused: true,
            ended: false,
            current_time: 0.0,
            duration: Some(duration),
            volume: 1.0,
            muted: false,
            play_calls: 0,
        }
    }
}

impl MediaElement for RecordingMedia {
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

fn series_gallery() -> Gallery {
    Gallery::new(SERIES.to_vec()).expect("series is not empty")
}

#[test]
fn settings_file_selects_locale_and_page_tuning() {
    let dir = tempdir().expect("failed to create temp dir");
    fs::write(
        dir.path().join("settings.toml"),
        "[general]\nlanguage = \"zh-CN\"\n\n[page]\nnav_breakpoint = 1024.0\n",
    )
    .expect("failed to write settings");

    let config = config::load_with_override(Some(dir.path().to_path_buf()));
    assert_eq!(config.page.nav_breakpoint(), 1024.0);
    assert_eq!(config.page.reveal_threshold(), DEFAULT_REVEAL_THRESHOLD);

    let i18n = I18n::new(None, &config);
    assert_eq!(i18n.current_locale().to_string(), "zh-CN");

    let cli_wins = I18n::new(Some("en-US".to_string()), &config);
    assert_eq!(cli_wins.current_locale().to_string(), "en-US");
}

#[test]
fn unreadable_settings_fall_back_to_defaults() {
    let dir = tempdir().expect("failed to create temp dir");
    fs::write(dir.path().join("settings.toml"), "[page\nbroken").expect("failed to write");

    let config = config::load_with_override(Some(dir.path().to_path_buf()));
    assert_eq!(config.page.nav_breakpoint(), DEFAULT_NAV_BREAKPOINT);
}

#[test]
fn any_wide_resize_closes_the_menu() {
    for width in (769..=2560).step_by(97) {
        for open in [false, true] {
            let mut nav = navbar::State::new(DEFAULT_NAV_BREAKPOINT, 375.0);
            if open {
                nav.update(navbar::Message::ToggleMenu);
            }
            nav.update(navbar::Message::ViewportResized(width as f32));
            assert_eq!(nav.menu(), MenuState::Closed, "width {width}, open {open}");
        }
    }
}

#[test]
fn narrow_resize_leaves_the_menu_alone() {
    for width in (320..=768).step_by(64) {
        for open in [false, true] {
            let mut nav = navbar::State::new(DEFAULT_NAV_BREAKPOINT, 375.0);
            if open {
                nav.update(navbar::Message::ToggleMenu);
            }
            let before = nav.menu();
            nav.update(navbar::Message::ViewportResized(width as f32));
            assert_eq!(nav.menu(), before, "width {width}");
        }
    }
}

#[test]
fn next_nineteen_times_returns_to_start() {
    let mut gallery = series_gallery();
    for start in 0..19 {
        gallery.update(gallery::Message::Open(start));
        for _ in 0..19 {
            gallery.update(gallery::Message::Next);
        }
        assert_eq!(gallery.current_index(), start);
    }
}

#[test]
fn viewer_wraps_at_the_edges() {
    let mut gallery = series_gallery();
    gallery.update(gallery::Message::Open(0));
    gallery.update(gallery::Message::Previous);
    assert_eq!(gallery.current_index(), 18);

    gallery.update(gallery::Message::Open(18));
    gallery.update(gallery::Message::Next);
    assert_eq!(gallery.current_index(), 0);
}

#[test]
fn keys_do_nothing_while_viewer_is_closed() {
    let mut gallery = series_gallery();
    for named in [Named::Escape, Named::ArrowLeft, Named::ArrowRight] {
        gallery.update(gallery::Message::KeyPressed(Key::Named(named)));
        assert_eq!(gallery.current_index(), 0);
        assert_eq!(gallery.visibility(), ViewerVisibility::Inactive);
    }
}

#[test]
fn backdrop_closes_and_content_does_not() {
    let mut gallery = series_gallery();
    gallery.update(gallery::Message::Open(9));
    gallery.update(gallery::Message::Pressed(gallery::Target::Content));
    assert_eq!(gallery.visibility(), ViewerVisibility::Active);
    gallery.update(gallery::Message::Pressed(gallery::Target::Backdrop));
    assert_eq!(gallery.visibility(), ViewerVisibility::Inactive);
}

#[test]
fn time_labels() {
    assert_eq!(format_time(65.0), "01:05");
    assert_eq!(format_time(0.0), "00:00");
    assert_eq!(format_time(3599.0), "59:59");
    assert_eq!(format_time(f64::NAN), "00:00");
}

#[test]
fn volume_slider_drives_mute_state() {
    let mut media = RecordingMedia::with_duration(60.0);
    let mut controls = video_controls::State::new(&media);

    controls.update(video_controls::Message::SetVolume(0.0), &mut media);
    assert!(media.muted);
    assert_eq!(controls.volume_button(), VolumeButton::Muted);

    controls.update(video_controls::Message::SetVolume(0.5), &mut media);
    assert!(!media.muted);
    assert_eq!(controls.volume_button(), VolumeButton::Unmuted);
}

#[test]
fn mute_toggle_preserves_volume() {
    let mut media = RecordingMedia::with_duration(60.0);
    media.volume = 0.35;
    let mut controls = video_controls::State::new(&media);

    controls.update(video_controls::Message::ToggleMute, &mut media);
    controls.update(video_controls::Message::ToggleMute, &mut media);
    assert_eq!(media.volume, 0.35);
    assert!(!media.muted);
}

#[test]
fn replay_after_end_calls_play() {
    let mut media = RecordingMedia::with_duration(60.0);
    let mut controls = video_controls::State::new(&media);
    controls.update(video_controls::Message::TogglePlayback, &mut media);

    media.ended = true;
    media.paused = true;
    media.current_time = 60.0;
    controls.handle_media_event(MediaEvent::Ended, &media);
    assert_eq!(controls.play_button(), PlayButton::Paused);

    controls.update(video_controls::Message::TogglePlayback, &mut media);
    assert_eq!(media.play_calls, 2);
    assert_eq!(controls.play_button(), PlayButton::Playing);
}

#[test]
fn seek_uses_click_fraction() {
    let mut media = RecordingMedia::with_duration(80.0);
    let mut controls = video_controls::State::new(&media);
    controls.update(video_controls::Message::Seek(0.75), &mut media);
    assert_eq!(media.current_time, 60.0);
}

#[test]
fn video_element_clamps_and_restarts() {
    let mut video = VideoElement::new("missing.mp4".into(), 2.0, false);
    assert_eq!(video.volume(), 1.0);
    assert!(video.paused());
    assert_eq!(video.duration(), None);

    video.set_current_time(-4.0);
    assert_eq!(video.current_time(), 0.0);

    video.play();
    assert!(!video.paused());
}

#[test]
fn reveal_marks_targets_above_the_fold() {
    let mut tracker = reveal::Tracker::new(DEFAULT_REVEAL_THRESHOLD, 900.0);
    let tops = [
        (Section::Home, 64.0),
        (Section::Video, 700.0),
        (Section::Gallery, 1400.0),
        (Section::About, 3200.0),
        (Section::Contact, 3800.0),
    ];
    for (section, top) in tops {
        tracker.update(reveal::Message::Measured(Target::Section(section), top));
    }

    tracker.update(reveal::Message::Scrolled(2500.0));
    // Nothing changes until a frame is rendered.
    assert_eq!(
        tracker.visibility(Target::Section(Section::About)),
        Visibility::Hidden
    );

    tracker.update(reveal::Message::Frame);
    for (section, top) in tops {
        let expected = if top - 2500.0 < 900.0 - DEFAULT_REVEAL_THRESHOLD {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        assert_eq!(tracker.visibility(Target::Section(section)), expected, "{section:?}");
    }
}
