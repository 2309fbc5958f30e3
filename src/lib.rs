// SPDX-License-Identifier: MPL-2.0
//! `film_showcase` is a one-page showcase for the "21 Film" photo series,
//! built with the Iced GUI framework.
//!
//! The page combines a navigation bar with a collapsible mobile menu, an
//! FFmpeg-backed showreel with custom controls, a photo grid with a lightbox
//! viewer, and sections that fade in as they scroll into view.

pub mod app;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod media;
pub mod ui;
