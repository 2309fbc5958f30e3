// SPDX-License-Identifier: MPL-2.0
//! Application root state and message routing between the page controllers.
//!
//! The `App` struct initializes the four controllers together (navigation,
//! video controls, gallery, scroll reveal) and is the only place that knows
//! about all of them. Controllers never read each other's state; whatever one
//! needs from another is passed in explicitly here.

pub mod config;
mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::i18n::fluent::I18n;
use crate::media::VideoElement;
use crate::ui::gallery::Gallery;
use crate::ui::navbar;
use crate::ui::reveal;
use crate::ui::theming::AppTheme;
use crate::ui::video_controls;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;

/// Widget id of the page scrollable, target of section navigation.
pub const PAGE_SCROLLABLE_ID: &str = "page";

pub const WINDOW_DEFAULT_WIDTH: f32 = 1280.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 800.0;
pub const MIN_WINDOW_WIDTH: f32 = 360.0;
pub const MIN_WINDOW_HEIGHT: f32 = 480.0;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    theme: AppTheme,
    assets_dir: PathBuf,
    navbar: navbar::State,
    video: VideoElement,
    controls: video_controls::State,
    gallery: Gallery,
    reveal: reveal::Tracker,
    window_id: Option<window::Id>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("assets_dir", &self.assets_dir)
            .field("video", &self.video.source())
            .field("viewer", &self.gallery.visibility())
            .finish()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(iced::Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
///
/// `gallery` is built by the caller so an invalid image list is reported
/// before any window opens.
pub fn run(flags: Flags, gallery: Gallery) -> iced::Result {
    let boot = move || App::new(&flags, gallery.clone());

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes the controllers from the settings file and CLI flags.
    ///
    /// CLI flags win over the settings file, which wins over defaults.
    fn new(flags: &Flags, gallery: Gallery) -> (Self, Task<Message>) {
        let config = config::load();
        let i18n = I18n::new(flags.lang.clone(), &config);

        let assets_dir = flags
            .assets_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| config.page.assets_dir());
        let video_source = flags
            .video
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| config.video.source(&assets_dir));

        let video = VideoElement::new(video_source, config.video.volume(), config.video.muted());
        let controls = video_controls::State::new(&video);

        let app = App {
            i18n,
            theme: AppTheme::new(config.general.theme_mode),
            navbar: navbar::State::new(config.page.nav_breakpoint(), WINDOW_DEFAULT_WIDTH),
            reveal: reveal::Tracker::new(config.page.reveal_threshold(), WINDOW_DEFAULT_HEIGHT),
            assets_dir,
            video,
            controls,
            gallery,
            window_id: None,
        };

        tracing::info!(
            locale = %app.i18n.current_locale(),
            assets = %app.assets_dir.display(),
            video = %app.video.source().display(),
            images = app.gallery.len(),
            "page ready"
        );

        (app, Task::none())
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        self.theme.iced_theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_video_subscription(&self.video),
            subscription::create_reveal_subscription(&self.reveal),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            navbar: &mut self.navbar,
            video: &mut self.video,
            controls: &mut self.controls,
            gallery: &mut self.gallery,
            reveal: &mut self.reveal,
            window_id: &mut self.window_id,
        };

        match message {
            Message::Navbar(navbar_message) => update::handle_navbar_message(&mut ctx, navbar_message),
            Message::Controls(controls_message) => {
                update::handle_controls_message(&mut ctx, controls_message)
            }
            Message::Playback(playback_message) => {
                update::handle_playback_message(&mut ctx, playback_message)
            }
            Message::Gallery(gallery_message) => {
                update::handle_gallery_message(&mut ctx, gallery_message)
            }
            Message::Reveal(reveal_message) => {
                ctx.reveal.update(reveal_message);
                Task::none()
            }
            Message::WindowResized { window, size } => {
                update::handle_window_resized(&mut ctx, window, size)
            }
            Message::WindowModeReported { requested, mode } => {
                ctx.controls.set_window_mode(requested, mode);
                Task::none()
            }
            Message::KeyPressed(key) => update::handle_key_pressed(&mut ctx, key),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            assets_dir: &self.assets_dir,
            navbar: &self.navbar,
            video: &self.video,
            controls: &self.controls,
            gallery: &self.gallery,
            reveal: &self.reveal,
        })
    }
}
