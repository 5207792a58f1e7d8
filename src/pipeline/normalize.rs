use crate::color::Color;

/// An inclusive range for the HSV value channel, as fractions of full scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    /// Build a range from bounds on the 0..=255 channel scale.
    pub fn from_u8(min: u8, max: u8) -> Self {
        Self {
            min: min as f32 / 255.0,
            max: max as f32 / 255.0,
        }
    }
}

/// Brightness policy for a palette position (not a role).
pub fn range_for_position(position: usize) -> ValueRange {
    match position {
        0 => ValueRange::from_u8(0, 32),
        1..=7 => ValueRange::from_u8(160, 224),
        8 => ValueRange::from_u8(128, 192),
        _ => ValueRange::from_u8(200, 255),
    }
}

/// Clamp the HSV value of `color` into `range`, keeping hue and saturation.
pub fn clamp_value(color: Color, range: ValueRange) -> Color {
    let mut hsv = color.to_hsv();
    hsv.value = hsv.value.clamp(range.min, range.max);
    Color::from_hsv(hsv)
}

/// Apply the positional brightness policy to every palette entry.
pub fn normalize_palette(palette: &[Color]) -> Vec<Color> {
    palette
        .iter()
        .enumerate()
        .map(|(i, &color)| clamp_value(color, range_for_position(i)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_brightness_clamps_to_ceiling() {
        for color in [Color::new(255, 0, 0), Color::new(255, 255, 0)] {
            let before = color.to_hsv();
            let clamped = clamp_value(color, ValueRange::from_u8(0, 32));
            let after = clamped.to_hsv();

            assert!((after.value - 32.0 / 255.0).abs() < 1e-6, "value {}", after.value);
            assert!((after.saturation - before.saturation).abs() < 1e-6);
            let hue_diff =
                (after.hue.into_positive_degrees() - before.hue.into_positive_degrees()).abs();
            assert!(hue_diff < 1e-3, "hue moved by {hue_diff}");
        }
    }

    #[test]
    fn in_range_color_is_unchanged() {
        let color = Color::new(180, 120, 60);
        assert_eq!(clamp_value(color, ValueRange::from_u8(128, 192)), color);
    }

    #[test]
    fn black_is_lifted_to_floor_as_gray() {
        assert_eq!(
            clamp_value(Color::BLACK, ValueRange::from_u8(160, 224)),
            Color::new(160, 160, 160)
        );
    }

    #[test]
    fn position_zero_darkest_and_tail_brightest() {
        let ceilings: Vec<f32> = [0, 1, 8, 9].iter().map(|&p| range_for_position(p).max).collect();
        assert!(ceilings[0] < ceilings[2]);
        assert!(ceilings[2] < ceilings[1]);
        assert!(ceilings[1] < ceilings[3]);
        assert_eq!(range_for_position(15), range_for_position(9));
    }

    #[test]
    fn normalize_keeps_length_and_order() {
        let palette = vec![Color::WHITE; 16];
        let normalized = normalize_palette(&palette);
        assert_eq!(normalized.len(), 16);
        assert_eq!(normalized[0], Color::new(32, 32, 32));
        assert_eq!(normalized[1], Color::new(224, 224, 224));
        assert_eq!(normalized[8], Color::new(192, 192, 192));
        assert_eq!(normalized[15], Color::WHITE);
    }
}
