// SPDX-License-Identifier: MPL-2.0
//! Page controllers and their visual building blocks.
//!
//! Each controller owns an enumerated UI state, takes its dependencies
//! explicitly and turns that state into widgets in a single `view` step
//! ("state down, messages up").
//!
//! # Controllers
//!
//! - [`navbar`] - Navigation bar with the collapsible mobile menu
//! - [`video_controls`] - Showreel surface and playback controls
//! - [`gallery`] - Photo grid and lightbox viewer
//! - [`reveal`] - Scroll-triggered fade-in of page content
//!
//! # Shared Infrastructure
//!
//! - [`widgets`] - Custom Iced widgets (reveal sensor, scroll lock, seek track)
//! - [`styles`] - Centralized widget styles
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod design_tokens;
pub mod gallery;
pub mod navbar;
pub mod reveal;
pub mod styles;
pub mod theming;
pub mod video_controls;
pub mod widgets;
