// SPDX-License-Identifier: MPL-2.0
//! Message handlers for the application.
//!
//! Each controller update runs synchronously; the only tasks produced here are
//! window mode changes, window mode queries and page scrolling.

use super::{Message, PAGE_SCROLLABLE_ID};
use crate::media::VideoElement;
use crate::ui::gallery::{self, Gallery};
use crate::ui::navbar::{self, Section};
use crate::ui::reveal::{self, Target};
use crate::ui::video_controls::{self, Effect, FullscreenButton};
use iced::keyboard::{self, key::Named};
use iced::widget::scrollable::AbsoluteOffset;
use iced::widget::{operation, Id};
use iced::{window, Size, Task};

/// Mutable view of the application state handed to the handlers.
pub struct UpdateContext<'a> {
    pub navbar: &'a mut navbar::State,
    pub video: &'a mut VideoElement,
    pub controls: &'a mut video_controls::State,
    pub gallery: &'a mut Gallery,
    pub reveal: &'a mut reveal::Tracker,
    pub window_id: &'a mut Option<window::Id>,
}

pub fn handle_navbar_message(ctx: &mut UpdateContext<'_>, message: navbar::Message) -> Task<Message> {
    match ctx.navbar.update(message) {
        navbar::Event::None => Task::none(),
        navbar::Event::ScrollTo(section) => scroll_to_section(ctx.reveal, section),
    }
}

pub fn handle_controls_message(
    ctx: &mut UpdateContext<'_>,
    message: video_controls::Message,
) -> Task<Message> {
    let effect = ctx.controls.update(message, &mut *ctx.video);
    apply_window_effect(*ctx.window_id, effect)
}

pub fn handle_playback_message(
    ctx: &mut UpdateContext<'_>,
    message: crate::media::PlaybackMessage,
) -> Task<Message> {
    if let Some(event) = ctx.video.handle(message) {
        ctx.controls.handle_media_event(event, &*ctx.video);
    }
    Task::none()
}

pub fn handle_gallery_message(ctx: &mut UpdateContext<'_>, message: gallery::Message) -> Task<Message> {
    match ctx.gallery.update(message) {
        gallery::Event::None => {}
        gallery::Event::ItemMeasured { index, top } => {
            ctx.reveal.measure(Target::GalleryItem(index), top);
        }
    }
    Task::none()
}

pub fn handle_window_resized(
    ctx: &mut UpdateContext<'_>,
    window: window::Id,
    size: Size,
) -> Task<Message> {
    *ctx.window_id = Some(window);
    ctx.navbar.update(navbar::Message::ViewportResized(size.width));
    ctx.reveal.update(reveal::Message::Resized(size.height));

    window::mode(window).map(|mode| Message::WindowModeReported {
        requested: None,
        mode,
    })
}

/// Escape leaves fullscreen first; every other key goes to the gallery.
pub fn handle_key_pressed(ctx: &mut UpdateContext<'_>, key: keyboard::Key) -> Task<Message> {
    if exits_fullscreen(&key, ctx.controls.fullscreen_button()) {
        return handle_controls_message(ctx, video_controls::Message::ToggleFullscreen);
    }
    ctx.gallery.update(gallery::Message::KeyPressed(key));
    Task::none()
}

fn exits_fullscreen(key: &keyboard::Key, fullscreen: FullscreenButton) -> bool {
    fullscreen == FullscreenButton::Fullscreen && *key == keyboard::Key::Named(Named::Escape)
}

/// Issues the requested window mode change and reports back the real mode.
fn apply_window_effect(window_id: Option<window::Id>, effect: Effect) -> Task<Message> {
    let Some(requested) = effect.requested_mode() else {
        return Task::none();
    };

    let Some(window_id) = window_id else {
        tracing::error!(?requested, "window mode change requested before the window opened");
        return Task::none();
    };

    window::set_mode(window_id, requested).chain(window::mode(window_id).map(move |mode| {
        Message::WindowModeReported {
            requested: Some(requested),
            mode,
        }
    }))
}

/// Scrolls the page so `section` sits at the top of the viewport.
fn scroll_to_section(tracker: &reveal::Tracker, section: Section) -> Task<Message> {
    match section_offset(tracker, section) {
        Some(y) => operation::scroll_to(Id::new(PAGE_SCROLLABLE_ID), AbsoluteOffset { x: 0.0, y }),
        None => {
            tracing::debug!(?section, "section not laid out yet, scroll skipped");
            Task::none()
        }
    }
}

/// Page offset of a section, measured from the first one.
fn section_offset(tracker: &reveal::Tracker, section: Section) -> Option<f32> {
    let origin = tracker.layout_top(Target::Section(Section::Home))?;
    let top = tracker.layout_top(Target::Section(section))?;
    Some((top - origin).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::gallery::{Visibility, SERIES};

    /// Controllers an `UpdateContext` borrows from.
    struct Fixture {
        navbar: navbar::State,
        video: VideoElement,
        controls: video_controls::State,
        gallery: Gallery,
        reveal: reveal::Tracker,
        window_id: Option<window::Id>,
    }

    impl Fixture {
        fn new() -> Self {
            let video = VideoElement::new("showreel.mp4".into(), 1.0, false);
            let controls = video_controls::State::new(&video);
            Self {
                navbar: navbar::State::new(768.0, 1280.0),
                video,
                controls,
                gallery: Gallery::new(SERIES.to_vec()).expect("series is not empty"),
                reveal: reveal::Tracker::new(150.0, 800.0),
                window_id: None,
            }
        }

        fn press(&mut self, key: keyboard::Key) {
            let mut ctx = UpdateContext {
                navbar: &mut self.navbar,
                video: &mut self.video,
                controls: &mut self.controls,
                gallery: &mut self.gallery,
                reveal: &mut self.reveal,
                window_id: &mut self.window_id,
            };
            let _ = handle_key_pressed(&mut ctx, key);
        }
    }

    #[test]
    fn escape_in_fullscreen_leaves_open_viewer_alone() {
        let mut fixture = Fixture::new();
        fixture.gallery.open(4);
        fixture
            .controls
            .set_window_mode(None, window::Mode::Fullscreen);

        fixture.press(keyboard::Key::Named(Named::Escape));
        assert_eq!(fixture.gallery.visibility(), Visibility::Active);
        assert_eq!(fixture.gallery.current_index(), 4);
    }

    #[test]
    fn escape_while_windowed_closes_viewer() {
        let mut fixture = Fixture::new();
        fixture.gallery.open(4);

        fixture.press(keyboard::Key::Named(Named::Escape));
        assert_eq!(fixture.gallery.visibility(), Visibility::Inactive);
    }

    #[test]
    fn arrows_reach_viewer_in_fullscreen() {
        let mut fixture = Fixture::new();
        fixture.gallery.open(18);
        fixture
            .controls
            .set_window_mode(None, window::Mode::Fullscreen);

        fixture.press(keyboard::Key::Named(Named::ArrowRight));
        assert_eq!(fixture.gallery.current_index(), 0);
    }

    #[test]
    fn escape_exits_only_in_fullscreen() {
        let escape = keyboard::Key::Named(Named::Escape);
        assert!(exits_fullscreen(&escape, FullscreenButton::Fullscreen));
        assert!(!exits_fullscreen(&escape, FullscreenButton::Windowed));

        let arrow = keyboard::Key::Named(Named::ArrowLeft);
        assert!(!exits_fullscreen(&arrow, FullscreenButton::Fullscreen));
    }

    #[test]
    fn section_offset_is_relative_to_home() {
        let mut tracker = reveal::Tracker::new(150.0, 800.0);
        assert_eq!(section_offset(&tracker, Section::Gallery), None);

        tracker.measure(Target::Section(Section::Home), 64.0);
        tracker.measure(Target::Section(Section::Gallery), 1464.0);
        assert_eq!(section_offset(&tracker, Section::Gallery), Some(1400.0));
        assert_eq!(section_offset(&tracker, Section::Home), Some(0.0));
    }
}
