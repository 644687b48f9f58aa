//! Distortion sampling
//!
//! Casts a grid of rays from the projector onto the surface plane and
//! measures how far each hit deviates from the optimal throw distance.
//!
//! Every surface type is treated as a plane perpendicular to world Z through
//! the surface center. For cylinders and spheres this is an approximation.

use glam::{DVec2, DVec3};

use super::camera::euler_rotation;
use super::coverage::optimal_distance;
use super::types::{DistortionPoint, ProjectorSettings, SurfaceGeometry};

/// Samples per axis
pub const GRID_SIZE: usize = 10;

pub fn calculate_distortion_map(
    settings: &ProjectorSettings,
    surface: &SurfaceGeometry,
) -> Vec<DistortionPoint> {
    let rotation = euler_rotation(settings.rotation);
    let optimal = optimal_distance(settings, surface);
    let last = (GRID_SIZE - 1) as f64;

    let mut points = Vec::with_capacity(GRID_SIZE * GRID_SIZE);

    for i in 0..GRID_SIZE {
        for j in 0..GRID_SIZE {
            let screen = DVec2::new(i as f64 / last, j as f64 / last);
            let ray = rotation * DVec3::new((screen.x - 0.5) * 2.0, (screen.y - 0.5) * 2.0, -1.0);

            let world_coord = intersect_surface_plane(settings.position, ray, surface.position.z);
            let distortion_factor = match world_coord {
                Some(hit) => distortion_factor(hit.distance(settings.position), optimal),
                None => f64::INFINITY,
            };

            points.push(DistortionPoint {
                screen_coord: screen,
                world_coord,
                distortion_factor,
            });
        }
    }

    let misses = points.iter().filter(|p| p.world_coord.is_none()).count();
    if misses > 0 {
        log::warn!(
            "{} of {} distortion rays run parallel to the surface plane",
            misses,
            points.len()
        );
    }

    points
}

/// Intersect a ray with the plane `z = plane_z`. `None` when the ray is
/// parallel to the plane.
fn intersect_surface_plane(origin: DVec3, direction: DVec3, plane_z: f64) -> Option<DVec3> {
    let t = (plane_z - origin.z) / direction.z;
    if !t.is_finite() {
        return None;
    }
    let hit = origin + direction * t;
    hit.is_finite().then_some(hit)
}

/// `|distance - optimal| / |optimal|`, zero when there is no optimal distance.
fn distortion_factor(distance: f64, optimal: f64) -> f64 {
    if optimal == 0.0 || !optimal.is_finite() {
        return 0.0;
    }
    (distance - optimal).abs() / optimal.abs()
}
