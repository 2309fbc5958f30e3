// SPDX-License-Identifier: MPL-2.0
//! Design tokens for the showcase page.
//!
//! - **Palette**: base and brand colors (warm film amber)
//! - **Opacity**: overlay and backdrop levels
//! - **Spacing**: 8px grid
//! - **Sizing**: page chrome and media dimensions
//! - **Typography**: font size scale
//! - **Radius**: border radii
//! - **Shadow**: elevation
//!
//! ```
//! use film_showcase::ui::design_tokens::{opacity, palette, spacing};
//! use iced::Color;
//!
//! let backdrop = Color {
//!     a: opacity::BACKDROP,
//!     ..palette::BLACK
//! };
//! let padding = spacing::MD;
//! # let _ = (backdrop, padding);
//! ```

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const INK_900: Color = Color::from_rgb(0.07, 0.07, 0.08);
    pub const INK_800: Color = Color::from_rgb(0.11, 0.11, 0.12);
    pub const INK_700: Color = Color::from_rgb(0.17, 0.17, 0.19);
    pub const GRAY_300: Color = Color::from_rgb(0.72, 0.72, 0.74);
    pub const PAPER_100: Color = Color::from_rgb(0.97, 0.95, 0.91);
    pub const PAPER_200: Color = Color::from_rgb(0.92, 0.89, 0.84);

    // Brand (film amber)
    pub const AMBER_300: Color = Color::from_rgb(1.0, 0.8, 0.45);
    pub const AMBER_500: Color = Color::from_rgb(0.95, 0.65, 0.2);
    pub const AMBER_700: Color = Color::from_rgb(0.75, 0.47, 0.1);

    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const OVERLAY_STRONG: f32 = 0.7;
    pub const OVERLAY_PRESSED: f32 = 0.9;
    /// Lightbox backdrop behind the enlarged photo.
    pub const BACKDROP: f32 = 0.92;
}

// ============================================================================
// Spacing Scale (8px baseline grid)
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
    /// Vertical padding of each page section.
    pub const SECTION: f32 = 80.0;
}

// ============================================================================
// Sizing Scale
// ============================================================================

pub mod sizing {
    pub const NAV_HEIGHT: f32 = 64.0;
    pub const BUTTON_HEIGHT: f32 = 36.0;
    pub const CONTROL_ICON: f32 = 16.0;

    /// Widest the page content grows before centering.
    pub const CONTENT_MAX_WIDTH: f32 = 1100.0;
    /// Height of the showreel surface in the page.
    pub const PLAYER_HEIGHT: f32 = 480.0;
    pub const VOLUME_SLIDER_WIDTH: f32 = 80.0;
    pub const PROGRESS_TRACK: f32 = 6.0;

    pub const GALLERY_COLUMNS: usize = 3;
    pub const GALLERY_THUMB_HEIGHT: f32 = 220.0;
    pub const VIEWER_ARROW: f32 = 48.0;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    pub const HERO: f32 = 56.0;
    pub const TITLE_LG: f32 = 32.0;
    pub const TITLE_MD: f32 = 20.0;
    pub const BODY_LG: f32 = 18.0;
    pub const BODY: f32 = 14.0;
    pub const CAPTION: f32 = 12.0;
}

// ============================================================================
// Border Radius Scale
// ============================================================================

pub mod radius {
    pub const NONE: f32 = 0.0;
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const FULL: f32 = 9999.0;
}

// ============================================================================
// Shadow Definitions
// ============================================================================

pub mod shadow {
    use super::palette;
    use iced::{Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    pub const SM: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 2.0 },
        blur_radius: 4.0,
    };

    pub const MD: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 4.0 },
        blur_radius: 8.0,
    };
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::XS > 0.0);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);
    assert!(spacing::SECTION > spacing::LG);

    assert!(opacity::BACKDROP > opacity::OVERLAY_STRONG && opacity::BACKDROP < 1.0);

    assert!(sizing::GALLERY_COLUMNS > 0);
    assert!(sizing::PLAYER_HEIGHT > sizing::NAV_HEIGHT);

    assert!(typography::HERO > typography::TITLE_LG);
    assert!(typography::TITLE_LG > typography::TITLE_MD);
    assert!(typography::BODY_LG > typography::BODY);
    assert!(typography::BODY > typography::CAPTION);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_scale_is_consistent() {
        assert_eq!(spacing::MD, spacing::XS * 2.0);
        assert_eq!(spacing::LG, spacing::MD * 1.5);
    }

    #[test]
    fn brand_color_is_warm() {
        assert!(palette::AMBER_500.r > palette::AMBER_500.b);
    }
}
