// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The page is a navbar over one scrollable column of sections. The lightbox
//! is stacked on top while open, and fullscreen shows the player alone.

use super::{Message, PAGE_SCROLLABLE_ID};
use crate::i18n::fluent::I18n;
use crate::media::VideoElement;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::gallery::{self, Gallery, PageScroll};
use crate::ui::navbar::{self, Section};
use crate::ui::reveal::{self, Target, Visibility};
use crate::ui::styles;
use crate::ui::video_controls::{self, FullscreenButton};
use crate::ui::widgets::{reveal_sensor, scroll_lock};
use iced::widget::scrollable::Viewport;
use iced::widget::{column, container, scrollable, stack, text, Column, Id};
use iced::{Alignment, Element, Length};
use std::path::Path;

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub assets_dir: &'a Path,
    pub navbar: &'a navbar::State,
    pub video: &'a VideoElement,
    pub controls: &'a video_controls::State,
    pub gallery: &'a Gallery,
    pub reveal: &'a reveal::Tracker,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    if ctx.controls.fullscreen_button() == FullscreenButton::Fullscreen {
        return view_player(&ctx);
    }

    let navbar = ctx.navbar.view(ctx.i18n).map(Message::Navbar);

    let page = Column::new()
        .push(section(&ctx, Section::Home, view_hero(ctx.i18n)))
        .push(section(&ctx, Section::Video, view_video_section(&ctx)))
        .push(section(&ctx, Section::Gallery, view_gallery_section(&ctx)))
        .push(section(
            &ctx,
            Section::About,
            text_block(ctx.i18n, "about-title", "about-body"),
        ))
        .push(section(
            &ctx,
            Section::Contact,
            text_block(ctx.i18n, "contact-title", "contact-body"),
        ))
        .push(
            container(text(ctx.i18n.tr("footer-text")).size(typography::CAPTION))
                .center_x(Length::Fill)
                .padding(spacing::LG),
        )
        .width(Length::Fill);

    let page = scrollable(page)
        .id(Id::new(PAGE_SCROLLABLE_ID))
        .width(Length::Fill)
        .height(Length::Fill)
        .on_scroll(|viewport: Viewport| {
            Message::Reveal(reveal::Message::Scrolled(viewport.absolute_offset().y))
        });

    let locked = ctx.gallery.page_scroll() == PageScroll::Locked;
    let base: Element<'_, Message> = column![navbar, scroll_lock(page, locked)]
        .width(Length::Fill)
        .height(Length::Fill)
        .into();

    match ctx.gallery.view_viewer(ctx.i18n, ctx.assets_dir) {
        Some(viewer) => stack![base, viewer.map(Message::Gallery)].into(),
        None => base,
    }
}

/// Wraps page content as a reveal target with the section band styling.
fn section<'a>(
    ctx: &ViewContext<'a>,
    section: Section,
    content: Element<'a, Message>,
) -> Element<'a, Message> {
    let visible = ctx.reveal.visibility(Target::Section(section)) == Visibility::Visible;
    let band = container(
        container(content)
            .max_width(sizing::CONTENT_MAX_WIDTH)
            .width(Length::Fill),
    )
    .center_x(Length::Fill)
    .padding([spacing::SECTION, spacing::LG])
    .style(styles::container::section_band);

    reveal_sensor(band, visible, move |top| {
        Message::Reveal(reveal::Message::Measured(Target::Section(section), top))
    })
    .into()
}

fn view_hero(i18n: &I18n) -> Element<'_, Message> {
    column![
        text(i18n.tr("hero-title")).size(typography::HERO),
        text(i18n.tr("hero-subtitle")).size(typography::BODY_LG),
    ]
    .spacing(spacing::MD)
    .align_x(Alignment::Center)
    .width(Length::Fill)
    .into()
}

fn view_video_section<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    column![
        text(ctx.i18n.tr("video-section-title")).size(typography::TITLE_LG),
        view_player(ctx),
    ]
    .spacing(spacing::LG)
    .into()
}

fn view_player<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    ctx.controls
        .view(video_controls::ViewContext {
            i18n: ctx.i18n,
            frame: ctx.video.frame(),
            error: ctx.video.error(),
        })
        .map(Message::Controls)
}

fn view_gallery_section<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let revealed: Vec<bool> = (0..ctx.gallery.len())
        .map(|index| ctx.reveal.visibility(Target::GalleryItem(index)) == Visibility::Visible)
        .collect();

    let grid = ctx
        .gallery
        .view_grid(gallery::ViewContext {
            assets_dir: ctx.assets_dir,
            revealed: &revealed,
        })
        .map(Message::Gallery);

    column![
        text(ctx.i18n.tr("gallery-section-title")).size(typography::TITLE_LG),
        text(ctx.i18n.tr("gallery-section-subtitle")).size(typography::BODY),
        grid,
    ]
    .spacing(spacing::MD)
    .into()
}

fn text_block<'a>(i18n: &I18n, title_key: &str, body_key: &str) -> Element<'a, Message> {
    column![
        text(i18n.tr(title_key)).size(typography::TITLE_LG),
        text(i18n.tr(body_key)).size(typography::BODY_LG),
    ]
    .spacing(spacing::MD)
    .into()
}
