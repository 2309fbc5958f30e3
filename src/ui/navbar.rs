// SPDX-License-Identifier: MPL-2.0
//! Navigation bar with a collapsible mobile menu.
//!
//! Above the breakpoint the section links sit inline in the bar and the menu
//! is always closed. At or below it a toggle button shows the links in a
//! panel under the bar. The toggle and the panel are both rendered from one
//! [`MenuState`], so they can never disagree.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::{
    alignment::Vertical,
    widget::{button, container, Column, Container, Row, Space, Text},
    Element, Length,
};

/// Page sections, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Home,
    Video,
    Gallery,
    About,
    Contact,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Home,
        Section::Video,
        Section::Gallery,
        Section::About,
        Section::Contact,
    ];

    /// Localization key of the menu label.
    pub fn label_key(self) -> &'static str {
        match self {
            Section::Home => "nav-home",
            Section::Video => "nav-video",
            Section::Gallery => "nav-gallery",
            Section::About => "nav-about",
            Section::Contact => "nav-contact",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    Open,
    #[default]
    Closed,
}

impl MenuState {
    fn toggled(self) -> Self {
        match self {
            MenuState::Open => MenuState::Closed,
            MenuState::Closed => MenuState::Open,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    ToggleMenu,
    NavigateTo(Section),
    /// New window width in logical pixels.
    ViewportResized(f32),
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    ScrollTo(Section),
}

#[derive(Debug, Clone)]
pub struct State {
    menu: MenuState,
    breakpoint: f32,
    width: f32,
}

impl State {
    pub fn new(breakpoint: f32, initial_width: f32) -> Self {
        Self {
            menu: MenuState::Closed,
            breakpoint,
            width: initial_width,
        }
    }

    pub fn menu(&self) -> MenuState {
        self.menu
    }

    /// Links are laid out inline in the bar.
    pub fn is_inline(&self) -> bool {
        self.width > self.breakpoint
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::ToggleMenu => {
                self.menu = self.menu.toggled();
                Event::None
            }
            Message::NavigateTo(section) => {
                self.menu = MenuState::Closed;
                Event::ScrollTo(section)
            }
            Message::ViewportResized(width) => {
                self.width = width;
                if self.is_inline() {
                    self.menu = MenuState::Closed;
                }
                Event::None
            }
        }
    }

    pub fn view<'a>(&self, i18n: &'a I18n) -> Element<'a, Message> {
        let brand = Text::new(i18n.tr("nav-brand")).size(typography::TITLE_MD);

        let mut bar = Row::new()
            .spacing(spacing::MD)
            .padding([0.0, spacing::LG])
            .height(Length::Fixed(sizing::NAV_HEIGHT))
            .align_y(Vertical::Center)
            .push(brand)
            .push(Space::new().width(Length::Fill));

        if self.is_inline() {
            for section in Section::ALL {
                bar = bar.push(nav_link(i18n, section));
            }
        } else {
            let open = self.menu == MenuState::Open;
            let glyph = if open { "✕" } else { "☰" };
            bar = bar.push(
                button(Text::new(glyph).size(typography::TITLE_MD))
                    .on_press(Message::ToggleMenu)
                    .padding([spacing::XXS, spacing::XS])
                    .style(styles::button::menu_toggle(open)),
            );
        }

        let mut content = Column::new().width(Length::Fill).push(bar);

        if !self.is_inline() && self.menu == MenuState::Open {
            let panel = Section::ALL
                .into_iter()
                .fold(Column::new().spacing(spacing::XXS), |column, section| {
                    column.push(nav_link(i18n, section).width(Length::Fill))
                });
            content = content.push(container(panel).padding([spacing::XS, spacing::LG]));
        }

        Container::new(content)
            .width(Length::Fill)
            .style(styles::container::navbar)
            .into()
    }
}

fn nav_link<'a>(i18n: &I18n, section: Section) -> iced::widget::Button<'a, Message> {
    button(Text::new(i18n.tr(section.label_key())).size(typography::BODY_LG))
        .on_press(Message::NavigateTo(section))
        .padding([spacing::XS, spacing::SM])
        .style(styles::button::nav_link)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BREAKPOINT: f32 = 768.0;

    #[test]
    fn toggle_flips_menu_state() {
        let mut state = State::new(BREAKPOINT, 400.0);
        assert_eq!(state.update(Message::ToggleMenu), Event::None);
        assert_eq!(state.menu(), MenuState::Open);
        state.update(Message::ToggleMenu);
        assert_eq!(state.menu(), MenuState::Closed);
    }

    #[test]
    fn navigating_closes_menu_and_requests_scroll() {
        let mut state = State::new(BREAKPOINT, 400.0);
        state.update(Message::ToggleMenu);
        let event = state.update(Message::NavigateTo(Section::Gallery));
        assert_eq!(event, Event::ScrollTo(Section::Gallery));
        assert_eq!(state.menu(), MenuState::Closed);
    }

    #[test]
    fn wide_resize_forces_menu_closed() {
        for width in [769.0, 1024.0, 1920.0] {
            for start_open in [true, false] {
                let mut state = State::new(BREAKPOINT, 400.0);
                if start_open {
                    state.update(Message::ToggleMenu);
                }
                state.update(Message::ViewportResized(width));
                assert_eq!(state.menu(), MenuState::Closed, "width {width}");
                assert!(state.is_inline());
            }
        }
    }

    #[test]
    fn narrow_resize_keeps_menu_state() {
        for width in [320.0, 600.0, 768.0] {
            let mut state = State::new(BREAKPOINT, 400.0);
            state.update(Message::ToggleMenu);
            state.update(Message::ViewportResized(width));
            assert_eq!(state.menu(), MenuState::Open, "width {width}");
            assert!(!state.is_inline());
        }
    }

    #[test]
    fn sections_have_distinct_labels() {
        let keys: std::collections::HashSet<_> =
            Section::ALL.iter().map(|s| s.label_key()).collect();
        assert_eq!(keys.len(), Section::ALL.len());
    }

    #[test]
    fn view_renders_in_both_layouts() {
        let i18n = I18n::default();
        let mut state = State::new(BREAKPOINT, 400.0);
        state.update(Message::ToggleMenu);
        let _narrow = state.view(&i18n);

        state.update(Message::ViewportResized(1280.0));
        let _wide = state.view(&i18n);
    }
}
