//! Gradient overlay and multiply compositing.
//!
//! The symbol is drawn flat and a linear gradient is multiplied over it.
//! This approximates a gradient fill; light modules pick up the gradient too.

use crate::color::Color;
use crate::template::Gradient;

/// Linear interpolation between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Multiply blend of two unit-range colors.
#[inline]
pub fn multiply(base: [f32; 3], blend: [f32; 3]) -> [f32; 3] {
    [base[0] * blend[0], base[1] * blend[1], base[2] * blend[2]]
}

/// A gradient resolved against a square box, sampled by position.
#[derive(Debug, Clone, Copy)]
pub struct GradientField {
    from: [f32; 3],
    to: [f32; 3],
    /// Unit direction of the gradient line (y grows downward)
    dir: (f32, f32),
    half: f32,
    /// Length of the gradient line across the box
    length: f32,
}

impl GradientField {
    /// Resolve a gradient for a `size × size` box using CSS angle rules:
    /// 0° runs bottom-to-top, 90° left-to-right, and the gradient line is
    /// long enough for the corners to hit the end stops exactly.
    pub fn new(gradient: &Gradient, size: f32) -> Self {
        let angle = gradient.rotation_degrees().to_radians();
        let (sin, cos) = angle.sin_cos();
        let length = (size * sin).abs() + (size * cos).abs();
        Self {
            from: gradient.stops[0].to_unit(),
            to: gradient.stops[1].to_unit(),
            dir: (sin, -cos),
            half: size / 2.0,
            length: length.max(f32::EPSILON),
        }
    }

    /// Position along the gradient line, `0.0` at the first stop.
    pub fn t_at(&self, x: f32, y: f32) -> f32 {
        let proj = (x - self.half) * self.dir.0 + (y - self.half) * self.dir.1;
        (proj / self.length + 0.5).clamp(0.0, 1.0)
    }

    pub fn color_at(&self, x: f32, y: f32) -> [f32; 3] {
        let t = self.t_at(x, y);
        [
            lerp(self.from[0], self.to[0], t),
            lerp(self.from[1], self.to[1], t),
            lerp(self.from[2], self.to[2], t),
        ]
    }

    /// Composite the gradient over `base` at `(x, y)`.
    pub fn apply(&self, base: Color, x: f32, y: f32) -> Color {
        Color::from_unit(multiply(base.to_unit(), self.color_at(x, y)))
    }
}

/// Whether `(x, y)` lies inside a `size × size` box whose corners are
/// rounded with `radius`.
pub fn inside_rounded_box(x: f32, y: f32, size: f32, radius: f32) -> bool {
    if x < 0.0 || y < 0.0 || x >= size || y >= size {
        return false;
    }
    let r = radius.min(size / 2.0);
    if r <= 0.0 {
        return true;
    }
    let dx = (r - x).max(x - (size - r)).max(0.0);
    let dy = (r - y).max(y - (size - r)).max(0.0);
    dx * dx + dy * dy <= r * r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::GradientKind;

    fn gradient(rotation: f32) -> Gradient {
        Gradient {
            kind: GradientKind::Linear,
            stops: [Color::BLACK, Color::WHITE],
            rotation: Some(rotation),
        }
    }

    #[test]
    fn test_multiply_with_white_is_identity() {
        let c = [0.2, 0.5, 0.9];
        assert_eq!(multiply(c, [1.0, 1.0, 1.0]), c);
    }

    #[test]
    fn test_90_degrees_runs_left_to_right() {
        let field = GradientField::new(&gradient(90.0), 100.0);
        assert!(field.t_at(0.0, 50.0) < 0.01);
        assert!(field.t_at(100.0, 50.0) > 0.99);
        assert!((field.t_at(50.0, 50.0) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_0_degrees_runs_bottom_to_top() {
        let field = GradientField::new(&gradient(0.0), 100.0);
        assert!(field.t_at(50.0, 100.0) < 0.01);
        assert!(field.t_at(50.0, 0.0) > 0.99);
    }

    #[test]
    fn test_135_degrees_hits_corners() {
        let field = GradientField::new(&gradient(135.0), 100.0);
        assert!(field.t_at(0.0, 0.0) < 0.01);
        assert!(field.t_at(100.0, 100.0) > 0.99);
    }

    #[test]
    fn test_rounded_box_clips_corners() {
        assert!(inside_rounded_box(50.0, 50.0, 100.0, 10.0));
        assert!(!inside_rounded_box(0.5, 0.5, 100.0, 10.0));
        assert!(inside_rounded_box(0.5, 0.5, 100.0, 0.0));
        assert!(inside_rounded_box(10.0, 0.5, 100.0, 10.0));
        assert!(!inside_rounded_box(100.0, 50.0, 100.0, 0.0));
    }
}
