// SPDX-License-Identifier: MPL-2.0
//! Localization using the Fluent system.
//!
//! Translation files are embedded at build time from `assets/i18n/`. The
//! locale is chosen from the `--lang` flag, then the `[general] language`
//! setting, then the system locale, falling back to `en-US`.

pub mod fluent;
