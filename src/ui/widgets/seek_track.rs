// SPDX-License-Identifier: MPL-2.0
//! Clickable progress track for the showreel.
//!
//! Draws the elapsed fill over the rail and reports a left click as the
//! fraction of the track width left of the cursor.

use crate::ui::design_tokens::{opacity, palette, radius, sizing};
use iced::mouse::{self, Cursor};
use iced::widget::canvas::{self, Frame, Geometry, Path};
use iced::widget::Action;
use iced::{Color, Element, Event, Length, Point, Rectangle, Renderer, Size, Theme};

/// Fill level of the track.
#[derive(Debug, Clone, Copy)]
pub struct SeekTrack {
    /// Elapsed share in percent, `[0, 100]`.
    percent: f32,
}

impl SeekTrack {
    pub fn new(percent: f32) -> Self {
        Self {
            percent: percent.clamp(0.0, 100.0),
        }
    }
}

/// Click position as a share of the track width, `[0, 1]`.
#[must_use]
pub fn click_fraction(x: f32, width: f32) -> f32 {
    if width <= 0.0 {
        return 0.0;
    }
    (x / width).clamp(0.0, 1.0)
}

/// Canvas program pairing the track with its seek message.
pub struct SeekTrackProgram<Message> {
    track: SeekTrack,
    on_seek: Box<dyn Fn(f32) -> Message>,
}

impl<Message> canvas::Program<Message> for SeekTrackProgram<Message>
where
    Message: Clone,
{
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> Option<Action<Message>> {
        if let Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) = event {
            let position = cursor.position_in(bounds)?;
            let fraction = click_fraction(position.x, bounds.width);
            return Some(Action::publish((self.on_seek)(fraction)).and_capture());
        }
        None
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let rail_height = sizing::PROGRESS_TRACK;
        let top = (bounds.height - rail_height) / 2.0;

        let rail = Path::rounded_rectangle(
            Point::new(0.0, top),
            Size::new(bounds.width, rail_height),
            radius::SM.into(),
        );
        frame.fill(
            &rail,
            Color {
                a: opacity::OVERLAY_SUBTLE,
                ..palette::WHITE
            },
        );

        let filled = bounds.width * self.track.percent / 100.0;
        if filled > 0.0 {
            let fill = Path::rounded_rectangle(
                Point::new(0.0, top),
                Size::new(filled, rail_height),
                radius::SM.into(),
            );
            frame.fill(&fill, palette::AMBER_500);
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> mouse::Interaction {
        if cursor.is_over(bounds) {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }
}

/// Progress track that emits `on_seek(fraction)` when clicked.
pub fn seek_track<'a, Message>(
    percent: f32,
    on_seek: impl Fn(f32) -> Message + 'static,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    canvas::Canvas::new(SeekTrackProgram {
        track: SeekTrack::new(percent),
        on_seek: Box::new(on_seek),
    })
    .width(Length::Fill)
    .height(Length::Fixed(sizing::BUTTON_HEIGHT / 2.0))
    .into()
}
