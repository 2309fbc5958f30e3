// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Page**: Navigation breakpoint and reveal threshold
//! - **Volume**: Initial media element volume

// ==========================================================================
// Page Defaults
// ==========================================================================

/// Viewport width (logical pixels) above which the menu is laid out inline
/// and forced closed.
pub const DEFAULT_NAV_BREAKPOINT: f32 = 768.0;

/// Smallest accepted navigation breakpoint.
pub const MIN_NAV_BREAKPOINT: f32 = 320.0;

/// Largest accepted navigation breakpoint.
pub const MAX_NAV_BREAKPOINT: f32 = 2560.0;

/// Distance from the bottom of the viewport a fade target must cross before
/// it becomes visible.
pub const DEFAULT_REVEAL_THRESHOLD: f32 = 150.0;

/// Smallest accepted reveal threshold.
pub const MIN_REVEAL_THRESHOLD: f32 = 0.0;

/// Largest accepted reveal threshold.
pub const MAX_REVEAL_THRESHOLD: f32 = 1000.0;

/// Assets root, relative to the working directory.
pub const DEFAULT_ASSETS_DIR: &str = ".";

/// Showreel location, relative to the assets root.
pub const DEFAULT_VIDEO_SOURCE: &str = "assets/video/21film-showreel.mp4";

// ==========================================================================
// Volume Defaults
// ==========================================================================

/// Initial media element volume (0.0 to 1.0).
pub const DEFAULT_VOLUME: f32 = 1.0;

/// Minimum volume level.
pub const MIN_VOLUME: f32 = 0.0;

/// Maximum volume level.
pub const MAX_VOLUME: f32 = 1.0;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_NAV_BREAKPOINT > 0.0);
    assert!(DEFAULT_NAV_BREAKPOINT >= MIN_NAV_BREAKPOINT);
    assert!(DEFAULT_NAV_BREAKPOINT <= MAX_NAV_BREAKPOINT);

    assert!(DEFAULT_REVEAL_THRESHOLD >= MIN_REVEAL_THRESHOLD);
    assert!(DEFAULT_REVEAL_THRESHOLD <= MAX_REVEAL_THRESHOLD);

    assert!(DEFAULT_VOLUME >= MIN_VOLUME);
    assert!(DEFAULT_VOLUME <= MAX_VOLUME);
};
