// SPDX-License-Identifier: MPL-2.0
//! Volume domain type for audio playback.

use crate::app::config::{MAX_VOLUME, MIN_VOLUME};

/// Volume level, guaranteed to be within `[0.0, 1.0]`.
///
/// # Example
///
/// ```
/// use film_showcase::media::Volume;
///
/// assert_eq!(Volume::new(0.5).value(), 0.5);
/// assert_eq!(Volume::new(2.0).value(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume(f32);

impl Volume {
    /// Creates a new volume level, clamping to the valid range.
    ///
    /// NaN maps to silence.
    #[must_use]
    pub fn new(volume: f32) -> Self {
        if volume.is_nan() {
            return Self(MIN_VOLUME);
        }
        Self(volume.clamp(MIN_VOLUME, MAX_VOLUME))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(crate::app::config::DEFAULT_VOLUME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_to_valid_range() {
        assert_eq!(Volume::new(-0.5).value(), MIN_VOLUME);
        assert_eq!(Volume::new(1.5).value(), MAX_VOLUME);
        assert_eq!(Volume::new(0.5).value(), 0.5);
    }

    #[test]
    fn nan_maps_to_silence() {
        assert_eq!(Volume::new(f32::NAN).value(), 0.0);
    }
}
