use palette::Hsv;

use crate::color::Color;
use crate::error::SchemeError;
use crate::pipeline::assign::{Assignment, Role};

/// Number of intervals between the two anchors; the ramp has `STEPS + 1` points.
const STEPS: usize = 7;

/// Linear interpolation of hue, saturation and value, each independently.
///
/// Hue is interpolated on the raw `[0, 360)` degree scale, not around the
/// shorter arc.
pub fn interpolate(start: Color, end: Color, t: f32) -> Color {
    let a = start.to_hsv();
    let b = end.to_hsv();
    let lerp = |x: f32, y: f32| x + (y - x) * t;

    let hue = lerp(
        a.hue.into_positive_degrees(),
        b.hue.into_positive_degrees(),
    );
    Color::from_hsv(Hsv::new(
        hue,
        lerp(a.saturation, b.saturation),
        lerp(a.value, b.value),
    ))
}

/// The six colors strictly between `start` and `end` at steps `i / 7`.
pub fn ramp(start: Color, end: Color) -> Vec<Color> {
    (1..STEPS)
        .map(|i| interpolate(start, end, i as f32 / STEPS as f32))
        .collect()
}

/// Overwrite base01..base06 with a ramp from base00 to base07.
///
/// Anything previously bound to base01..base06 goes back to the pool. Each
/// synthesized step then retires the pool color nearest to it, so the ramp
/// stands in for those palette entries.
pub fn fill_gradient(assignment: &mut Assignment) -> Result<(), SchemeError> {
    let anchor = |role: Role| {
        assignment.get(role).ok_or_else(|| {
            SchemeError::AssignmentExhaustion(format!("{role} must be bound before the gradient"))
        })
    };
    let start = anchor(Role::BASE00)?;
    let end = anchor(Role::BASE07)?;

    let ramp_roles: Vec<Role> = (Role::BASE01.index()..=Role::BASE06.index())
        .filter_map(Role::new)
        .collect();

    for &role in &ramp_roles {
        if let Some(freed) = assignment.recycle(role) {
            tracing::debug!(%role, %freed, "recycled color displaced by gradient");
        }
    }

    // The color just freed from base05 is usually gray, so a mid step often
    // retires it and it never reaches a residual role.
    for (role, color) in ramp_roles.into_iter().zip(ramp(start, end)) {
        let retired = assignment.take_nearest(color).ok_or_else(|| {
            SchemeError::AssignmentExhaustion(format!("no palette color left to retire for {role}"))
        })?;
        tracing::debug!(%role, %color, %retired, "gradient step");
        assignment.bind(role, color);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::assign::assign_ideal;

    #[test]
    fn black_to_white_is_an_even_gray_ramp() {
        let grays: Vec<u8> = ramp(Color::BLACK, Color::WHITE).iter().map(|c| c.r).collect();
        assert_eq!(grays, vec![36, 73, 109, 146, 182, 219]);
        for c in ramp(Color::BLACK, Color::WHITE) {
            assert_eq!(c.r, c.g);
            assert_eq!(c.g, c.b);
        }
    }

    #[test]
    fn endpoints_are_reproduced() {
        let start = Color::new(20, 10, 30);
        let end = Color::new(230, 240, 200);
        assert_eq!(interpolate(start, end, 0.0), start);
        assert_eq!(interpolate(start, end, 1.0), end);
    }

    #[test]
    fn value_is_monotonic_along_the_ramp() {
        let start = Color::new(20, 10, 30);
        let end = Color::new(230, 240, 200);
        let mut points = vec![start];
        points.extend(ramp(start, end));
        points.push(end);

        let values: Vec<f32> = points.iter().map(|c| c.to_hsv().value).collect();
        for pair in values.windows(2) {
            assert!(
                pair[1] + 1.0 / 255.0 >= pair[0],
                "value decreased: {} -> {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn gradient_overwrites_and_consumes_palette() {
        let palette: Vec<Color> = (0..16u8)
            .map(|i| Color::new(i * 16, i * 8, 255 - i * 16))
            .collect();
        let mut assignment = assign_ideal(palette).unwrap();
        assert_eq!(assignment.pool().len(), 7);

        fill_gradient(&mut assignment).unwrap();

        // 7 left after matching, +1 freed from base05, -6 retired by the ramp.
        assert_eq!(assignment.pool().len(), 2);
        let expected = ramp(
            assignment.get(Role::BASE00).unwrap(),
            assignment.get(Role::BASE07).unwrap(),
        );
        for (i, color) in expected.into_iter().enumerate() {
            assert_eq!(assignment.get(Role::new(i + 1).unwrap()), Some(color));
        }
    }

    #[test]
    fn missing_anchor_is_an_error() {
        let mut assignment = Assignment::new(vec![Color::BLACK; 8]);
        assignment.bind(Role::BASE00, Color::BLACK);
        let err = fill_gradient(&mut assignment).unwrap_err();
        assert!(err.to_string().contains("base07"));
    }
}
