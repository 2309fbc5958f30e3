// SPDX-License-Identifier: MPL-2.0
//! Scroll-triggered fade-in of page sections and gallery items.
//!
//! Each target reports its layout top through a [`reveal_sensor`]. A target is
//! visible while its top, relative to the window, sits above
//! `viewport_height - threshold`; it hides again when scrolled back below.
//!
//! Scroll and resize only record the new geometry and mark the tracker dirty.
//! Evaluation runs on the next rendered frame, so a burst of scroll events
//! costs one pass over the targets per frame.
//!
//! [`reveal_sensor`]: crate::ui::widgets::reveal_sensor

use crate::ui::navbar::Section;
use iced::{window, Subscription};
use std::collections::HashMap;

/// A fade-in element of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Section(Section),
    GalleryItem(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    Visible,
    #[default]
    Hidden,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// A target's layout top, in window coordinates at zero scroll.
    Measured(Target, f32),
    /// New vertical scroll offset of the page.
    Scrolled(f32),
    /// New window height.
    Resized(f32),
    /// A frame was rendered while dirty.
    Frame,
}

/// Returns true if an element whose top is `top` pixels below the window top
/// should be shown.
#[must_use]
pub fn is_visible(top: f32, viewport_height: f32, threshold: f32) -> bool {
    top < viewport_height - threshold
}

#[derive(Debug, Clone)]
pub struct Tracker {
    threshold: f32,
    viewport_height: f32,
    scroll_offset: f32,
    tops: HashMap<Target, f32>,
    visibility: HashMap<Target, Visibility>,
    dirty: bool,
}

impl Tracker {
    pub fn new(threshold: f32, viewport_height: f32) -> Self {
        Self {
            threshold,
            viewport_height,
            scroll_offset: 0.0,
            tops: HashMap::new(),
            visibility: HashMap::new(),
            dirty: false,
        }
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::Measured(target, top) => self.measure(target, top),
            Message::Scrolled(offset) => self.scroll(offset),
            Message::Resized(height) => self.resize(height),
            Message::Frame => {
                if self.dirty {
                    self.evaluate();
                }
            }
        }
    }

    /// Records a target's layout top.
    ///
    /// A target seen for the first time is evaluated right away so content
    /// already in view does not wait for a scroll.
    pub fn measure(&mut self, target: Target, top: f32) {
        let first = self.tops.insert(target, top).is_none();
        if first {
            self.evaluate_one(target, top);
        } else {
            self.dirty = true;
        }
    }

    pub fn scroll(&mut self, offset: f32) {
        if offset != self.scroll_offset {
            self.scroll_offset = offset;
            self.dirty = true;
        }
    }

    pub fn resize(&mut self, viewport_height: f32) {
        if viewport_height != self.viewport_height {
            self.viewport_height = viewport_height;
            self.dirty = true;
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Recomputes the visibility of every measured target.
    pub fn evaluate(&mut self) {
        let tops: Vec<(Target, f32)> = self.tops.iter().map(|(t, top)| (*t, *top)).collect();
        for (target, top) in tops {
            self.evaluate_one(target, top);
        }
        self.dirty = false;
    }

    fn evaluate_one(&mut self, target: Target, layout_top: f32) {
        let top = layout_top - self.scroll_offset;
        let visibility = if is_visible(top, self.viewport_height, self.threshold) {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        self.visibility.insert(target, visibility);
    }

    /// Unmeasured targets are hidden.
    pub fn visibility(&self, target: Target) -> Visibility {
        self.visibility.get(&target).copied().unwrap_or_default()
    }

    pub fn layout_top(&self, target: Target) -> Option<f32> {
        self.tops.get(&target).copied()
    }

    /// Frame ticks, only while an evaluation is pending.
    pub fn subscription(&self) -> Subscription<Message> {
        if self.dirty {
            window::frames().map(|_| Message::Frame)
        } else {
            Subscription::none()
        }
    }
}
