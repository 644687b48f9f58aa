//! Throw distance helpers.

use glam::{DVec2, DVec3};

use super::types::ImageSize;

/// Distance needed for an image of `image_width` meters.
pub fn calculate_throw_distance(image_width: f64, throw_ratio: f64) -> f64 {
    image_width * throw_ratio
}

/// Image size at `distance`, assuming a 16:9 image.
pub fn calculate_image_size(distance: f64, throw_ratio: f64) -> ImageSize {
    let width = distance / throw_ratio;
    ImageSize {
        width,
        height: width * 9.0 / 16.0,
    }
}

/// Lens shift needed to center an image of `projection_size` on `surface_center`,
/// as a fraction of the image size.
pub fn calculate_lens_shift(
    projector_pos: DVec3,
    surface_center: DVec3,
    projection_size: ImageSize,
) -> DVec2 {
    DVec2::new(
        (projector_pos.x - surface_center.x) / projection_size.width,
        (projector_pos.y - surface_center.y) / projection_size.height,
    )
}
