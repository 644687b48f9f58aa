//! Projector array planning.
//!
//! Splits a surface that is too large for one projector into a row of
//! identical projectors with overlapping, edge-blended images.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::BlendMask;
use crate::config::BlendConfig;
use crate::projection::coverage::{
    calculate_recommendations, optimal_distance, DESIRED_WIDTH_FRACTION, MULTI_PROJECTOR_AREA,
    MULTI_PROJECTOR_WIDTH,
};
use crate::projection::throw::calculate_throw_distance;
use crate::projection::{ProjectorSettings, SurfaceGeometry};

/// Upper bound on the number of projectors in a planned row
pub const MAX_ARRAY_SIZE: usize = 16;

/// Largest overlap fraction accepted from the blend config
const MAX_OVERLAP: f64 = 0.5;

/// One projector in a planned array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedProjector {
    /// Position in the row, left to right.
    pub index: usize,
    /// Source settings moved to the planned position.
    pub settings: ProjectorSettings,
    /// Projected image width in meters.
    pub image_width: f64,
    /// Left edge blend width in projector pixels.
    pub blend_left: u32,
    /// Right edge blend width in projector pixels.
    pub blend_right: u32,
}

/// Result of [`plan_projector_array`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectorArrayPlan {
    pub projectors: Vec<PlannedProjector>,
    /// Overlap fraction actually used.
    pub overlap: f64,
    pub edge_blending: bool,
}

impl ProjectorArrayPlan {
    pub fn len(&self) -> usize {
        self.projectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectors.is_empty()
    }

    /// Generate one blend mask per projector at `1 / downscale` of the
    /// projector resolution.
    pub fn blend_masks(&self, config: &BlendConfig, downscale: u32) -> Vec<BlendMask> {
        let downscale = downscale.max(1);

        self.projectors
            .iter()
            .map(|p| {
                let width = (p.settings.resolution.width / downscale).max(1);
                let height = (p.settings.resolution.height / downscale).max(1);

                let mut mask = BlendMask::new(width, height);
                mask.gamma = config.gamma;
                mask.curve = config.curve;
                mask.apply_left_blend(p.blend_left / downscale, config.curve);
                mask.apply_right_blend(p.blend_right / downscale, config.curve);
                mask
            })
            .collect()
    }
}

/// Plan a row of projectors across the surface.
///
/// A single projector is planned unless the recommendations call for a
/// multi-projector setup. Degenerate inputs (empty surface, non-positive
/// throw ratio) keep the source projector as-is.
pub fn plan_projector_array(
    settings: &ProjectorSettings,
    surface: &SurfaceGeometry,
    config: &BlendConfig,
) -> ProjectorArrayPlan {
    let surface_width = surface.dimensions.width;
    let overlap = if config.overlap.is_finite() {
        config.overlap.clamp(0.0, MAX_OVERLAP)
    } else {
        0.0
    };

    let usable_width = surface_width > 0.0 && surface_width.is_finite();
    let usable_throw = settings.throw_ratio > 0.0 && settings.throw_ratio.is_finite();
    if !usable_width || !usable_throw {
        log::warn!(
            "Cannot plan an array for surface width {} and throw ratio {}",
            surface_width,
            settings.throw_ratio
        );
        return single_projector(settings.clone(), surface_width * DESIRED_WIDTH_FRACTION);
    }

    let recommendations = calculate_recommendations(settings, surface);
    if !recommendations.multi_projector_setup {
        let mut planned = settings.clone();
        planned.position = surface.position + DVec3::Z * optimal_distance(settings, surface);
        return single_projector(planned, surface_width * DESIRED_WIDTH_FRACTION);
    }

    let by_width = (surface_width / MULTI_PROJECTOR_WIDTH).ceil() as usize;
    let by_area = (surface.dimensions.area() / MULTI_PROJECTOR_AREA).ceil() as usize;
    let mut count = by_width.max(by_area).max(2);
    if count > MAX_ARRAY_SIZE {
        log::warn!(
            "Surface needs {} projectors, capping the array at {}",
            count,
            MAX_ARRAY_SIZE
        );
        count = MAX_ARRAY_SIZE;
    }

    // n images of width w overlapping by overlap * w span exactly the surface
    let image_width = surface_width / (count as f64 - (count - 1) as f64 * overlap);
    let step = image_width * (1.0 - overlap);
    let throw = calculate_throw_distance(image_width, settings.throw_ratio);
    let left_center = surface.position.x - surface_width / 2.0 + image_width / 2.0;
    let blend_px = (overlap * settings.resolution.width as f64).round() as u32;

    let projectors = (0..count)
        .map(|index| {
            let mut planned = settings.clone();
            planned.position = DVec3::new(
                left_center + step * index as f64,
                surface.position.y,
                surface.position.z + throw,
            );
            PlannedProjector {
                index,
                settings: planned,
                image_width,
                blend_left: if index > 0 { blend_px } else { 0 },
                blend_right: if index + 1 < count { blend_px } else { 0 },
            }
        })
        .collect();

    log::info!(
        "Planned {} projectors, {:.2}m images, {:.0}% overlap",
        count,
        image_width,
        overlap * 100.0
    );

    ProjectorArrayPlan {
        projectors,
        overlap,
        edge_blending: true,
    }
}

fn single_projector(settings: ProjectorSettings, image_width: f64) -> ProjectorArrayPlan {
    ProjectorArrayPlan {
        projectors: vec![PlannedProjector {
            index: 0,
            settings,
            image_width,
            blend_left: 0,
            blend_right: 0,
        }],
        overlap: 0.0,
        edge_blending: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::SurfaceDimensions;

    fn surface(width: f64, height: f64) -> SurfaceGeometry {
        SurfaceGeometry {
            dimensions: SurfaceDimensions {
                width,
                height,
                depth: 0.1,
                radius: None,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_small_surface_gets_one_projector() {
        let plan = plan_projector_array(
            &ProjectorSettings::default(),
            &surface(10.0, 6.0),
            &BlendConfig::default(),
        );
        assert_eq!(plan.len(), 1);
        assert!(!plan.edge_blending);
        let p = &plan.projectors[0];
        assert!((p.settings.position.z - 10.8).abs() < 1e-9);
        assert_eq!((p.blend_left, p.blend_right), (0, 0));
    }

    #[test]
    fn test_wide_surface_is_split() {
        let config = BlendConfig::default();
        let plan = plan_projector_array(&ProjectorSettings::default(), &surface(25.0, 15.0), &config);

        // 375 m² needs 4 projectors by area
        assert_eq!(plan.len(), 4);
        assert!(plan.edge_blending);

        let w = plan.projectors[0].image_width;
        let covered = plan.len() as f64 * w - (plan.len() - 1) as f64 * config.overlap * w;
        assert!((covered - 25.0).abs() < 1e-9);

        let first = &plan.projectors[0];
        let last = &plan.projectors[3];
        assert!((first.settings.position.x - (-12.5 + w / 2.0)).abs() < 1e-9);
        assert!((last.settings.position.x - (12.5 - w / 2.0)).abs() < 1e-9);
        assert_eq!(first.blend_left, 0);
        assert_eq!(first.blend_right, 288);
        assert_eq!(last.blend_left, 288);
        assert_eq!(last.blend_right, 0);
    }

    #[test]
    fn test_array_size_is_capped() {
        let plan = plan_projector_array(
            &ProjectorSettings::default(),
            &surface(1000.0, 50.0),
            &BlendConfig::default(),
        );
        assert_eq!(plan.len(), MAX_ARRAY_SIZE);
    }

    #[test]
    fn test_degenerate_inputs_keep_source_projector() {
        let mut settings = ProjectorSettings::default();
        settings.throw_ratio = -1.0;
        let plan = plan_projector_array(&settings, &surface(30.0, 10.0), &BlendConfig::default());
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.projectors[0].settings, settings);

        let plan = plan_projector_array(
            &ProjectorSettings::default(),
            &surface(0.0, 0.0),
            &BlendConfig::default(),
        );
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn test_blend_masks_follow_plan() {
        let config = BlendConfig {
            curve: crate::config::BlendCurve::Linear,
            ..Default::default()
        };
        let plan = plan_projector_array(&ProjectorSettings::default(), &surface(20.0, 4.0), &config);
        assert_eq!(plan.len(), 2);

        let masks = plan.blend_masks(&config, 4);
        assert_eq!(masks.len(), 2);
        assert_eq!((masks[0].width, masks[0].height), (480, 270));

        // Left projector fades on its right edge only
        assert_eq!(masks[0].get(0, 0), Some(1.0));
        assert!(masks[0].get(479, 0).unwrap() < 0.1);
        assert!(masks[1].get(0, 0).unwrap() < 1e-6);
        assert_eq!(masks[1].get(479, 0), Some(1.0));
    }
}
