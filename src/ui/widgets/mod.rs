// SPDX-License-Identifier: MPL-2.0
pub mod reveal_sensor;
pub mod scroll_lock;
pub mod seek_track;

pub use reveal_sensor::reveal_sensor;
pub use scroll_lock::scroll_lock;
pub use seek_track::seek_track;
