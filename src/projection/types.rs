//! Projection types
//!
//! Inputs (projector and surface description) and the values produced by the
//! projection engine.

use glam::{DMat4, DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// Output resolution of a projector in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width / height. Non-finite when `height` is zero.
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}

/// Optical axis offset as a fraction of the image size (roughly -0.5..0.5)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LensShift {
    pub horizontal: f64,
    pub vertical: f64,
}

/// Where a projector sits and how it is configured
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectorSettings {
    /// World-space position
    pub position: DVec3,
    /// Euler angles in degrees (tilt, pan, roll), applied in XYZ order
    pub rotation: DVec3,
    /// Vertical field of view in degrees
    pub fov: f64,
    /// Projection distance / image width
    pub throw_ratio: f64,
    /// Light output in lumens
    pub brightness: f64,
    pub resolution: Resolution,
    pub lens_shift: LensShift,
}

impl Default for ProjectorSettings {
    fn default() -> Self {
        Self {
            position: DVec3::new(0.0, 0.0, 10.0),
            rotation: DVec3::ZERO,
            fov: 45.0,
            throw_ratio: 1.2,
            brightness: 5000.0,
            resolution: Resolution::default(),
            lens_shift: LensShift::default(),
        }
    }
}

/// Shape of the projection surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceType {
    #[default]
    Box,
    Cylinder,
    Sphere,
    Custom,
}

impl SurfaceType {
    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            SurfaceType::Box => "Box",
            SurfaceType::Cylinder => "Cylinder",
            SurfaceType::Sphere => "Sphere",
            SurfaceType::Custom => "Custom Mesh",
        }
    }

    /// Whether the surface is curved; curved surfaces are still sampled as planes
    pub fn is_curved(&self) -> bool {
        matches!(self, SurfaceType::Cylinder | SurfaceType::Sphere)
    }
}

/// Surface extents in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceDimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    /// Only meaningful for cylinders and spheres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

impl SurfaceDimensions {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

impl Default for SurfaceDimensions {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 6.0,
            depth: 0.1,
            radius: None,
        }
    }
}

/// Face to texture-coordinate mapping, passed through for renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UvMapping {
    pub face: String,
    /// UV coordinates of the face corners
    pub uvs: Vec<DVec2>,
}

/// What the projector projects onto
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SurfaceGeometry {
    #[serde(rename = "type")]
    pub surface_type: SurfaceType,
    pub dimensions: SurfaceDimensions,
    /// World-space center
    pub position: DVec3,
    pub uv_mapping: Vec<UvMapping>,
}

impl Default for SurfaceGeometry {
    fn default() -> Self {
        Self {
            surface_type: SurfaceType::default(),
            dimensions: SurfaceDimensions::default(),
            position: DVec3::ZERO,
            uv_mapping: Vec::new(),
        }
    }
}

/// Estimated keystone distortion
///
/// Corner offsets are a symmetric visualization aid, not a homography.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeystoneCorrection {
    pub top_left: DVec2,
    pub top_right: DVec2,
    pub bottom_left: DVec2,
    pub bottom_right: DVec2,
    /// Degrees
    pub vertical_keystone: f64,
    /// Degrees
    pub horizontal_keystone: f64,
}

/// One sample of the distortion map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistortionPoint {
    /// Normalized screen coordinate in [0, 1]
    pub screen_coord: DVec2,
    /// Hit point on the surface plane, `None` when the ray misses it
    pub world_coord: Option<DVec3>,
    /// Relative deviation from the optimal throw distance. A miss is
    /// infinite and is written to JSON as `null`.
    #[serde(with = "non_finite_as_null")]
    pub distortion_factor: f64,
}

/// JSON has no infinity: non-finite values go out as `null` and `null`
/// comes back as `f64::INFINITY`.
mod non_finite_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

/// Suggested projector configuration for a surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectorRecommendations {
    /// Lumens
    pub minimum_brightness: f64,
    /// Meters
    pub optimal_distance: f64,
    pub suggested_lens_shift: DVec2,
    pub edge_blending_required: bool,
    pub multi_projector_setup: bool,
}

/// Modeled brightness distribution of the projected image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LuminanceData {
    pub center_brightness: f64,
    pub edge_brightness: f64,
    pub uniformity: f64,
    /// Normalized screen coordinates of bright spots
    pub hotspots: Vec<DVec2>,
}

/// Projected image size in meters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: f64,
    pub height: f64,
}

/// Full result of a projection calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionConfig {
    pub projector_position: DVec3,
    pub projection_matrix: DMat4,
    pub view_matrix: DMat4,
    pub keystone_correction: KeystoneCorrection,
    pub distortion_map: Vec<DistortionPoint>,
    /// Fraction of the surface covered, in [0, 1]
    pub coverage_area: f64,
    pub recommended_settings: ProjectorRecommendations,
    pub luminance_map: LuminanceData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_json_uses_type_tag() {
        let json = r#"{
            "type": "cylinder",
            "dimensions": { "width": 4.0, "height": 3.0, "depth": 4.0, "radius": 2.0 },
            "position": [0.0, 1.0, -2.0]
        }"#;
        let surface: SurfaceGeometry = serde_json::from_str(json).unwrap();
        assert_eq!(surface.surface_type, SurfaceType::Cylinder);
        assert_eq!(surface.dimensions.radius, Some(2.0));
        assert_eq!(surface.position, DVec3::new(0.0, 1.0, -2.0));
        assert!(surface.uv_mapping.is_empty());
    }

    #[test]
    fn test_projector_defaults_fill_missing_fields() {
        let settings: ProjectorSettings =
            serde_json::from_str(r#"{ "throwRatio": 0.8, "brightness": 12000 }"#).unwrap();
        assert_eq!(settings.throw_ratio, 0.8);
        assert_eq!(settings.brightness, 12000.0);
        assert_eq!(settings.fov, 45.0);
        assert_eq!(settings.resolution, Resolution::new(1920, 1080));
    }

    #[test]
    fn test_curved_surfaces() {
        assert!(SurfaceType::Sphere.is_curved());
        assert!(!SurfaceType::Box.is_curved());
    }

    #[test]
    fn test_missed_ray_reads_back_as_infinite() {
        let miss = DistortionPoint {
            screen_coord: DVec2::new(0.5, 1.0),
            world_coord: None,
            distortion_factor: f64::INFINITY,
        };
        let json = serde_json::to_string(&miss).unwrap();
        assert!(json.contains("\"distortionFactor\":null"), "{}", json);

        let back: DistortionPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, miss);
    }

    #[test]
    fn test_finite_factor_is_written_as_number() {
        let hit = DistortionPoint {
            screen_coord: DVec2::ZERO,
            world_coord: Some(DVec3::new(-10.0, -10.0, 0.0)),
            distortion_factor: 0.25,
        };
        let json = serde_json::to_string(&hit).unwrap();
        assert!(json.contains("\"distortionFactor\":0.25"), "{}", json);
        assert_eq!(serde_json::from_str::<DistortionPoint>(&json).unwrap(), hit);
    }
}
