// SPDX-License-Identifier: MPL-2.0
//! Button styles.

use crate::ui::design_tokens::{
    opacity,
    palette::{self, BLACK, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

/// Text-only navigation link; the brand color marks hover.
pub fn nav_link(theme: &Theme, status: button::Status) -> button::Style {
    let text = theme.palette().text;
    let text_color = match status {
        button::Status::Hovered | button::Status::Pressed => palette::AMBER_500,
        _ => text,
    };

    button::Style {
        background: None,
        text_color,
        border: Border::default(),
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Menu toggle; filled while the mobile menu is open.
pub fn menu_toggle(open: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |theme: &Theme, status: button::Status| {
        let background = match (open, status) {
            (true, _) => Some(Background::Color(palette::AMBER_500)),
            (false, button::Status::Hovered) => Some(Background::Color(Color {
                a: opacity::OVERLAY_SUBTLE,
                ..palette::AMBER_500
            })),
            _ => None,
        };

        button::Style {
            background,
            text_color: if open { BLACK } else { theme.palette().text },
            border: Border {
                color: palette::AMBER_500,
                width: 1.0,
                radius: radius::SM.into(),
            },
            shadow: shadow::NONE,
            snap: true,
        }
    }
}

/// Player control on the dark controls bar.
///
/// `active` highlights toggles such as mute and fullscreen.
pub fn control(active: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme: &Theme, status: button::Status| {
        let text_color = match status {
            _ if active => palette::AMBER_500,
            button::Status::Hovered | button::Status::Pressed => palette::AMBER_300,
            _ => WHITE,
        };

        button::Style {
            background: None,
            text_color,
            border: Border::default(),
            shadow: shadow::NONE,
            snap: true,
        }
    }
}

/// Round translucent button over the viewer backdrop.
pub fn overlay(_theme: &Theme, status: button::Status) -> button::Style {
    let alpha = match status {
        button::Status::Hovered => opacity::OVERLAY_STRONG,
        button::Status::Pressed => opacity::OVERLAY_PRESSED,
        _ => opacity::OVERLAY_MEDIUM,
    };

    button::Style {
        background: Some(Background::Color(Color { a: alpha, ..BLACK })),
        text_color: WHITE,
        border: Border {
            color: Color {
                a: opacity::OVERLAY_SUBTLE,
                ..WHITE
            },
            width: 1.0,
            radius: radius::FULL.into(),
        },
        shadow: shadow::MD,
        snap: true,
    }
}

/// Gallery thumbnail; a brand outline on hover.
pub fn thumbnail(_theme: &Theme, status: button::Status) -> button::Style {
    let border_color = match status {
        button::Status::Hovered | button::Status::Pressed => palette::AMBER_500,
        _ => Color::TRANSPARENT,
    };

    button::Style {
        background: None,
        text_color: WHITE,
        border: Border {
            color: border_color,
            width: 2.0,
            radius: radius::MD.into(),
        },
        shadow: shadow::SM,
        snap: true,
    }
}
