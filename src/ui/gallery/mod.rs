// SPDX-License-Identifier: MPL-2.0
//! Photo grid and the lightbox viewer opened from it.
//!
//! The viewer shows one photo at a time and wraps around at both ends. While
//! it is [`Visibility::Active`] the page scroll is locked and the arrow and
//! Escape keys drive it; while inactive those keys do nothing.

pub mod catalog;

pub use catalog::{ImageDescriptor, SERIES};

use crate::error::{Error, Result};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::reveal_sensor;
use iced::keyboard::{self, key::Named};
use iced::widget::{
    button, center, column, container, image, mouse_area, opaque, row, stack, text, tooltip,
    Column, Row, Space, Text,
};
use iced::{Alignment, ContentFit, Element, Length};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    Active,
    #[default]
    Inactive,
}

/// Page scrolling while the viewer is in a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageScroll {
    Enabled,
    Locked,
}

/// Where a press inside the open viewer landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Backdrop,
    Content,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Open(usize),
    Close,
    Previous,
    Next,
    KeyPressed(keyboard::Key),
    Pressed(Target),
    /// A grid item reported its layout top.
    ItemMeasured(usize, f32),
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    ItemMeasured { index: usize, top: f32 },
}

/// Inputs for the grid besides the gallery's own state.
pub struct ViewContext<'a> {
    pub assets_dir: &'a Path,
    /// Reveal state per grid item, by index.
    pub revealed: &'a [bool],
}

#[derive(Debug, Clone)]
pub struct Gallery {
    images: Vec<ImageDescriptor>,
    current: usize,
    visibility: Visibility,
}

impl Gallery {
    /// Creates a closed viewer over `images`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyGallery`] if `images` is empty.
    pub fn new(images: Vec<ImageDescriptor>) -> Result<Self> {
        if images.is_empty() {
            return Err(Error::EmptyGallery);
        }
        Ok(Self {
            images,
            current: 0,
            visibility: Visibility::Inactive,
        })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Always false; kept for the `len` convention.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &ImageDescriptor {
        &self.images[self.current]
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn page_scroll(&self) -> PageScroll {
        match self.visibility {
            Visibility::Active => PageScroll::Locked,
            Visibility::Inactive => PageScroll::Enabled,
        }
    }

    pub fn open(&mut self, index: usize) {
        if index >= self.images.len() {
            tracing::warn!(index, len = self.images.len(), "gallery index out of range");
            return;
        }
        self.current = index;
        self.visibility = Visibility::Active;
    }

    pub fn close(&mut self) {
        self.visibility = Visibility::Inactive;
    }

    pub fn previous(&mut self) {
        let len = self.images.len();
        self.current = (self.current + len - 1) % len;
    }

    pub fn next(&mut self) {
        self.current = (self.current + 1) % self.images.len();
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::Open(index) => self.open(index),
            Message::Close | Message::Pressed(Target::Backdrop) => self.close(),
            Message::Pressed(Target::Content) => {}
            Message::Previous => self.previous(),
            Message::Next => self.next(),
            Message::KeyPressed(key) => self.handle_key(&key),
            Message::ItemMeasured(index, top) => return Event::ItemMeasured { index, top },
        }
        Event::None
    }

    fn handle_key(&mut self, key: &keyboard::Key) {
        if self.visibility != Visibility::Active {
            return;
        }
        match key {
            keyboard::Key::Named(Named::Escape) => self.close(),
            keyboard::Key::Named(Named::ArrowLeft) => self.previous(),
            keyboard::Key::Named(Named::ArrowRight) => self.next(),
            _ => {}
        }
    }

    /// Thumbnail grid, each item a fade-in target.
    pub fn view_grid<'a>(&self, ctx: ViewContext<'_>) -> Element<'a, Message> {
        let columns = sizing::GALLERY_COLUMNS;
        let mut grid = Column::new().spacing(spacing::MD).width(Length::Fill);

        for (row_index, chunk) in self.images.chunks(columns).enumerate() {
            let mut line = Row::new().spacing(spacing::MD).width(Length::Fill);
            for (offset, descriptor) in chunk.iter().enumerate() {
                let index = row_index * columns + offset;
                let thumbnail = button(
                    image(image::Handle::from_path(ctx.assets_dir.join(descriptor.source)))
                        .content_fit(ContentFit::Cover)
                        .width(Length::Fill)
                        .height(Length::Fixed(sizing::GALLERY_THUMB_HEIGHT)),
                )
                .on_press(Message::Open(index))
                .padding(0)
                .width(Length::FillPortion(1))
                .style(styles::button::thumbnail);

                let visible = ctx.revealed.get(index).copied().unwrap_or(false);
                line = line.push(reveal_sensor(thumbnail, visible, move |top| {
                    Message::ItemMeasured(index, top)
                }));
            }
            for _ in chunk.len()..columns {
                line = line.push(Space::new().width(Length::FillPortion(1)));
            }
            grid = grid.push(line);
        }

        grid.into()
    }

    /// Lightbox overlay, present only while the viewer is active.
    pub fn view_viewer<'a>(&self, i18n: &'a I18n, assets_dir: &Path) -> Option<Element<'a, Message>> {
        if self.visibility != Visibility::Active {
            return None;
        }

        let descriptor = self.current();
        let photo = image(image::Handle::from_path(assets_dir.join(descriptor.source)))
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill);

        let counter = i18n.tr_with_args(
            "viewer-counter",
            &[
                ("current", &(self.current + 1).to_string()),
                ("total", &self.images.len().to_string()),
            ],
        );

        let header = row![
            Space::new().width(Length::Fill),
            overlay_button("✕", Message::Close, i18n.tr("viewer-close-tooltip")),
        ];

        let body = row![
            overlay_button("‹", Message::Previous, i18n.tr("viewer-prev-tooltip")),
            photo,
            overlay_button("›", Message::Next, i18n.tr("viewer-next-tooltip")),
        ]
        .spacing(spacing::MD)
        .align_y(Alignment::Center)
        .height(Length::Fill);

        let caption = column![
            text(descriptor.alt).size(typography::BODY_LG),
            text(counter).size(typography::CAPTION),
        ]
        .spacing(spacing::XXS)
        .align_x(Alignment::Center)
        .width(Length::Fill);

        let content = column![header, body, caption]
            .spacing(spacing::SM)
            .padding(spacing::LG)
            .max_width(sizing::CONTENT_MAX_WIDTH);

        let content = opaque(mouse_area(content).on_press(Message::Pressed(Target::Content)));

        let backdrop = mouse_area(
            container(Space::new())
                .width(Length::Fill)
                .height(Length::Fill)
                .style(styles::container::backdrop),
        )
        .on_press(Message::Pressed(Target::Backdrop));

        Some(stack![backdrop, center(content)].into())
    }
}

fn overlay_button<'a>(glyph: &'static str, message: Message, tip: String) -> Element<'a, Message> {
    let button = button(
        container(Text::new(glyph).size(typography::TITLE_LG))
            .center(Length::Fixed(sizing::VIEWER_ARROW)),
    )
    .on_press(message)
    .padding(0)
    .style(styles::button::overlay);

    tooltip(button, Text::new(tip), tooltip::Position::Bottom)
        .gap(4)
        .into()
}
