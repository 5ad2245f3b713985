//! Flat 2D geometry helpers shared across the simulation

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Euclidean distance between two points
pub fn distance(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    (bx - ax).hypot(by - ay)
}

/// Squared distance, for comparisons that avoid the sqrt
pub fn distance_sq(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let dx = bx - ax;
    let dy = by - ay;
    dx * dx + dy * dy
}

/// Angle in radians of the vector from (ax, ay) to (bx, by)
pub fn bearing(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    (by - ay).atan2(bx - ax)
}

/// Arena bounds, fixed for the session
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Clamp a point so a circle of `radius` stays fully inside the bounds
    pub fn clamp_circle(&self, x: f32, y: f32, radius: f32) -> (f32, f32) {
        (
            x.clamp(radius, self.width - radius),
            y.clamp(radius, self.height - radius),
        )
    }

    /// True when the point lies inside the bounds
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && x <= self.width && y >= 0.0 && y <= self.height
    }

    /// Uniform random point inside the bounds
    pub fn random_point(&self, rng: &mut ChaCha8Rng) -> (f32, f32) {
        (
            rng.gen_range(0.0..self.width),
            rng.gen_range(0.0..self.height),
        )
    }
}

/// Axis-aligned rectangle described by center and half-extents
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rect {
    pub center_x: f32,
    pub center_y: f32,
    pub half_width: f32,
    pub half_height: f32,
}

impl Rect {
    pub fn from_center(center_x: f32, center_y: f32, width: f32, height: f32) -> Self {
        Self {
            center_x,
            center_y,
            half_width: width / 2.0,
            half_height: height / 2.0,
        }
    }

    /// True when the point lies inside the rectangle (bounds inclusive)
    pub fn contains(&self, x: f32, y: f32) -> bool {
        (x - self.center_x).abs() <= self.half_width
            && (y - self.center_y).abs() <= self.half_height
    }

    /// Uniform random point inside the rectangle
    pub fn random_point(&self, rng: &mut ChaCha8Rng) -> (f32, f32) {
        (
            self.center_x + rng.gen_range(-self.half_width..self.half_width),
            self.center_y + rng.gen_range(-self.half_height..self.half_height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_distance() {
        assert_eq!(distance(0.0, 0.0, 3.0, 4.0), 5.0);
        assert_eq!(distance_sq(0.0, 0.0, 3.0, 4.0), 25.0);
    }

    #[test]
    fn test_bearing_quadrants() {
        assert!((bearing(0.0, 0.0, 1.0, 0.0)).abs() < 1e-6);
        assert!((bearing(0.0, 0.0, 0.0, 1.0) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_extent_clamp_circle() {
        let bounds = Extent::new(800.0, 600.0);
        assert_eq!(bounds.clamp_circle(-50.0, 300.0, 25.0), (25.0, 300.0));
        assert_eq!(bounds.clamp_circle(900.0, 700.0, 25.0), (775.0, 575.0));
        assert_eq!(bounds.clamp_circle(400.0, 300.0, 25.0), (400.0, 300.0));
    }

    #[test]
    fn test_rect_random_points_stay_inside() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let rect = Rect::from_center(200.0, 540.0, 300.0, 400.0);
        for _ in 0..200 {
            let (x, y) = rect.random_point(&mut rng);
            assert!(rect.contains(x, y), "({x}, {y}) escaped the rect");
        }
    }

    #[test]
    fn test_rect_contains_is_inclusive() {
        let rect = Rect::from_center(100.0, 100.0, 50.0, 50.0);
        assert!(rect.contains(75.0, 100.0));
        assert!(rect.contains(125.0, 125.0));
        assert!(!rect.contains(74.9, 100.0));
    }
}
