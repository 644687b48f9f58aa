//! Edge blending module for multi-projector setups.

mod planner;

use crate::config::BlendCurve;

pub use planner::{plan_projector_array, PlannedProjector, ProjectorArrayPlan, MAX_ARRAY_SIZE};

/// Blend mask for a projector.
#[derive(Debug, Clone, PartialEq)]
pub struct BlendMask {
    /// Width of the mask texture.
    pub width: u32,
    /// Height of the mask texture.
    pub height: u32,
    /// Blend values 0.0-1.0 (row-major storage).
    pub data: Vec<f32>,
    /// Blend curve type used.
    pub curve: BlendCurve,
    /// Exponent for the gamma curve.
    pub gamma: f32,
}

/// Side of the image an overlap band sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Left,
    Right,
}

impl BlendMask {
    /// Create a new blend mask filled with 1.0 (no blending).
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![1.0; width as usize * height as usize],
            curve: BlendCurve::default(),
            gamma: 2.2,
        }
    }

    /// Value at pixel `(x, y)`, `None` outside the mask.
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(pixel_offset(self.width, x, y)).copied()
    }

    /// Shape a normalized overlap position `t` (0-1) with the blend curve.
    pub fn apply_curve(t: f32, curve: BlendCurve, gamma: f32) -> f32 {
        match curve {
            BlendCurve::Linear => t,
            BlendCurve::Gamma => t.powf(gamma),
            BlendCurve::Cosine => (1.0 - (std::f32::consts::PI * t).cos()) * 0.5,
            BlendCurve::Smoothstep => t * t * (3.0 - 2.0 * t),
        }
    }

    /// Fade the rightmost `blend_width` columns towards zero.
    pub fn apply_right_blend(&mut self, blend_width: u32, curve: BlendCurve) {
        self.fade_edge(Edge::Right, blend_width, curve);
    }

    /// Fade the leftmost `blend_width` columns towards zero.
    pub fn apply_left_blend(&mut self, blend_width: u32, curve: BlendCurve) {
        self.fade_edge(Edge::Left, blend_width, curve);
    }

    fn fade_edge(&mut self, edge: Edge, blend_width: u32, curve: BlendCurve) {
        let band = blend_width.min(self.width);
        if band == 0 {
            return;
        }
        self.curve = curve;

        // Weight per column of the band; `t` grows towards the outer edge
        let weights: Vec<(usize, f32)> = (0..band)
            .map(|k| {
                let s = k as f32 / blend_width as f32;
                let (x, t) = match edge {
                    Edge::Left => (k, 1.0 - s),
                    Edge::Right => (self.width - band + k, s),
                };
                (x as usize, 1.0 - Self::apply_curve(t, curve, self.gamma))
            })
            .collect();

        for row in self.data.chunks_exact_mut(self.width as usize) {
            for &(x, weight) in &weights {
                row[x] *= weight;
            }
        }
    }
}

/// Row-major offset of `(x, y)`, computed in `usize` so large masks do not
/// overflow `u32`.
fn pixel_offset(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curves_hit_endpoints() {
        for curve in [
            BlendCurve::Linear,
            BlendCurve::Gamma,
            BlendCurve::Cosine,
            BlendCurve::Smoothstep,
        ] {
            assert!(BlendMask::apply_curve(0.0, curve, 2.2).abs() < 1e-6);
            assert!((BlendMask::apply_curve(1.0, curve, 2.2) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_right_blend_fades_to_edge() {
        let mut mask = BlendMask::new(100, 2);
        mask.apply_right_blend(20, BlendCurve::Linear);

        assert_eq!(mask.get(0, 0), Some(1.0));
        assert_eq!(mask.get(79, 1), Some(1.0));
        assert_eq!(mask.get(80, 0), Some(1.0));
        assert!((mask.get(90, 0).unwrap() - 0.5).abs() < 1e-6);
        assert!(mask.get(99, 0).unwrap() < 0.1);
        assert_eq!(mask.get(100, 0), None);
    }

    #[test]
    fn test_left_blend_mirrors_right() {
        let mut left = BlendMask::new(100, 1);
        left.apply_left_blend(20, BlendCurve::Smoothstep);
        let mut right = BlendMask::new(100, 1);
        right.apply_right_blend(20, BlendCurve::Smoothstep);

        assert!(left.get(0, 0).unwrap() < 1e-6);
        assert!(right.get(99, 0).unwrap() < 0.1);
        assert_eq!(left.get(50, 0), Some(1.0));
        assert_eq!(left.curve, BlendCurve::Smoothstep);
    }

    #[test]
    fn test_pixel_offset_does_not_wrap() {
        let offset = pixel_offset(300_000, 299_999, 299_999);
        assert_eq!(offset, 299_999 * 300_000 + 299_999);
        assert!(offset > u32::MAX as usize);
    }

    #[test]
    fn test_blend_wider_than_mask_covers_every_column() {
        let mut mask = BlendMask::new(4, 1);
        mask.apply_right_blend(8, BlendCurve::Linear);
        assert_eq!(mask.get(0, 0), Some(1.0));
        assert!((mask.get(3, 0).unwrap() - 0.625).abs() < 1e-6);
    }

    #[test]
    fn test_zero_width_blend_is_noop() {
        let mut mask = BlendMask::new(10, 10);
        mask.apply_left_blend(0, BlendCurve::Cosine);
        mask.apply_right_blend(0, BlendCurve::Cosine);
        assert!(mask.data.iter().all(|&v| v == 1.0));
    }
}
