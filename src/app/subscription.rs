// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Native window and keyboard events are turned into top-level messages here;
//! the playback pipeline and the reveal frame ticks come from their owners.

use super::Message;
use crate::media::VideoElement;
use crate::ui::reveal;
use iced::{event, keyboard, window, Subscription};

/// Window geometry and uncaptured key presses.
///
/// Keys a focused widget already handled are not forwarded.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, window_id| match event {
        event::Event::Window(window::Event::Opened { size, .. })
        | event::Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized {
            window: window_id,
            size,
        }),
        event::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => match status {
            event::Status::Ignored => Some(Message::KeyPressed(key)),
            event::Status::Captured => None,
        },
        _ => None,
    })
}

/// Showreel decoding and audio.
pub fn create_video_subscription(video: &VideoElement) -> Subscription<Message> {
    video.subscription().map(Message::Playback)
}

/// Frame ticks while a reveal evaluation is pending.
pub fn create_reveal_subscription(tracker: &reveal::Tracker) -> Subscription<Message> {
    tracker.subscription().map(Message::Reveal)
}
