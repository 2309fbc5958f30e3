// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::media::PlaybackMessage;
use crate::ui::{gallery, navbar, reveal, video_controls};
use iced::{keyboard, window, Size};

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level controller messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Navbar(navbar::Message),
    Controls(video_controls::Message),
    Playback(PlaybackMessage),
    Gallery(gallery::Message),
    Reveal(reveal::Message),
    /// Window opened or resized.
    WindowResized { window: window::Id, size: Size },
    /// Mode the window reports, after a change request or a resize.
    WindowModeReported {
        requested: Option<window::Mode>,
        mode: window::Mode,
    },
    /// A key press no widget captured.
    KeyPressed(keyboard::Key),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `zh-CN`, `en-US`).
    pub lang: Option<String>,
    /// Optional root directory containing `assets/`.
    /// Takes precedence over `[page] assets_dir`.
    pub assets_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `FILM_SHOWCASE_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Optional showreel path. Takes precedence over `[video] source`.
    pub video: Option<String>,
}
