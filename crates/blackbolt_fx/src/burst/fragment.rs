//! Decorative fragments thrown off by a landing letter.

use std::f32::consts::TAU;

use blackbolt_core::{EffectRng, Easing};

use crate::draw::{Color, DrawCommand};

/// Fragment geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FragmentShape {
    /// Triangle with half-side `side`, rotated and scaled.
    Triangle {
        /// Half the base length before scaling.
        side: f32,
        /// Fixed rotation in degrees.
        rotation_deg: f32,
        /// Uniform scale.
        scale: f32,
    },
    /// Filled circle.
    Circle {
        /// Radius.
        radius: f32,
    },
}

/// One fragment flying from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstFragment {
    /// Start point.
    pub from: (f32, f32),
    /// End point.
    pub to: (f32, f32),
    /// Geometry.
    pub shape: FragmentShape,
    /// Fill color.
    pub color: Color,
    /// Local time the fragment appeared.
    pub born: f32,
}

impl BurstFragment {
    /// A triangle leaving the letter rim with some angular drift.
    #[must_use]
    pub fn triangle(rng: &mut EffectRng, center: (f32, f32), size: f32, color: Color, born: f32) -> Self {
        let a = rng.unit();
        let a2 = a + rng.range(-0.2, 0.2);
        let r = size * 0.52;
        let r2 = r + size * rng.range(0.2, 0.5);
        let scale = rng.range(0.3, 1.0);
        let shade = rng.range(-0.2, 0.2);
        Self {
            from: polar(center, r, a),
            to: polar(center, r2, a2),
            shape: FragmentShape::Triangle {
                side: size * 0.1,
                rotation_deg: rng.range(0.0, 360.0),
                scale,
            },
            color: color.shade(shade),
            born,
        }
    }

    /// A small circle flying straight out by one letter size.
    #[must_use]
    pub fn circle(rng: &mut EffectRng, center: (f32, f32), size: f32, born: f32) -> Self {
        let a = rng.unit();
        let r = size * 0.52;
        Self {
            from: polar(center, r, a),
            to: polar(center, r + size, a),
            shape: FragmentShape::Circle {
                radius: size * 0.05 * rng.unit(),
            },
            color: Color::MIST,
            born,
        }
    }

    /// Eased flight progress at local time `now`.
    #[must_use]
    pub fn progress(&self, now: f32, flight: f32) -> f32 {
        let t = if flight > 0.0 { (now - self.born) / flight } else { 1.0 };
        Easing::CubicIn.apply(t)
    }

    /// True once the flight has ended.
    #[must_use]
    pub fn is_done(&self, now: f32, flight: f32) -> bool {
        now - self.born >= flight
    }

    /// Draw command at local time `now`.
    #[must_use]
    pub fn command(&self, now: f32, flight: f32) -> DrawCommand {
        let t = self.progress(now, flight);
        let x = self.from.0 + (self.to.0 - self.from.0) * t;
        let y = self.from.1 + (self.to.1 - self.from.1) * t;
        let alpha = 1.0 - t;
        match self.shape {
            FragmentShape::Triangle {
                side,
                rotation_deg,
                scale,
            } => {
                let s = side * scale;
                let (sin, cos) = rotation_deg.to_radians().sin_cos();
                let corners = [(-s, -s), (s, -s), (0.0, s)];
                let points = corners.map(|(px, py)| (x + px * cos - py * sin, y + px * sin + py * cos));
                DrawCommand::Triangle {
                    points,
                    color: self.color,
                    alpha,
                }
            }
            FragmentShape::Circle { radius } => DrawCommand::Circle {
                center: (x, y),
                radius,
                color: self.color,
                alpha,
            },
        }
    }
}

fn polar(center: (f32, f32), radius: f32, turns: f32) -> (f32, f32) {
    let (sin, cos) = (TAU * turns).sin_cos();
    (center.0 + radius * cos, center.1 + radius * sin)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dist(a: (f32, f32), b: (f32, f32)) -> f32 {
        ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
    }

    #[test]
    fn test_triangle_radii() {
        let mut rng = EffectRng::seeded(21);
        for _ in 0..200 {
            let f = BurstFragment::triangle(&mut rng, (0.0, 0.0), 60.0, Color::WHITE, 0.0);
            assert!((dist(f.from, (0.0, 0.0)) - 31.2).abs() < 1e-3);
            let r2 = dist(f.to, (0.0, 0.0));
            assert!((43.2 - 1e-3..=61.2 + 1e-3).contains(&r2));
        }
    }

    #[test]
    fn test_circle_flies_radially() {
        let mut rng = EffectRng::seeded(4);
        let f = BurstFragment::circle(&mut rng, (10.0, 10.0), 60.0, 0.0);
        assert!((dist(f.to, (10.0, 10.0)) - 91.2).abs() < 1e-3);
        assert_eq!(f.color, Color::MIST);
        match f.shape {
            FragmentShape::Circle { radius } => assert!((0.0..3.0).contains(&radius)),
            FragmentShape::Triangle { .. } => panic!("expected circle"),
        }
    }

    #[test]
    fn test_flight_ends_transparent() {
        let f = BurstFragment::circle(&mut EffectRng::seeded(2), (0.0, 0.0), 60.0, 1.0);
        assert!(!f.is_done(1.3, 0.6));
        assert!(f.is_done(1.7, 0.6));
        match f.command(1.7, 0.6) {
            DrawCommand::Circle { center, alpha, .. } => {
                assert_eq!(alpha, 0.0);
                assert!(dist(center, f.to) < 1e-3);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
