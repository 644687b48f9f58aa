//! Project file configuration and serialization.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PrevisError, Result};
use crate::projection::{ProjectorSettings, SurfaceGeometry};

/// Largest accepted output width or height in pixels.
pub const MAX_RESOLUTION: u32 = 16_384;

/// A previs project: one surface lit by one or more projectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectFile {
    /// Project name.
    pub name: String,
    /// Target surface.
    pub surface: SurfaceGeometry,
    /// Configured projectors.
    pub projectors: Vec<ProjectorEntry>,
    /// Edge blend settings used when planning projector arrays.
    pub blend: BlendConfig,
}

impl Default for ProjectFile {
    fn default() -> Self {
        Self {
            name: "New Project".to_string(),
            surface: SurfaceGeometry::default(),
            projectors: vec![ProjectorEntry::default()],
            blend: BlendConfig::default(),
        }
    }
}

impl ProjectFile {
    /// Load a project from a JSON file and check it.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let project: Self = serde_json::from_str(&contents)?;
        project.validate()?;
        log::info!(
            "Loaded project '{}' ({} projector(s)) from {:?}",
            project.name,
            project.projectors.len(),
            path
        );
        Ok(project)
    }

    /// Save the project as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Saved project to {:?}", path);
        Ok(())
    }

    /// Reject projects the engine cannot meaningfully analyze.
    pub fn validate(&self) -> Result<()> {
        if self.projectors.is_empty() {
            return Err(PrevisError::InvalidProject(
                "project has no projectors".to_string(),
            ));
        }

        let mut ids = HashSet::new();
        for entry in &self.projectors {
            if !ids.insert(entry.id) {
                return Err(PrevisError::InvalidProject(format!(
                    "duplicate projector id {}",
                    entry.id
                )));
            }

            let resolution = entry.settings.resolution;
            if resolution.width == 0 || resolution.height == 0 {
                return Err(PrevisError::InvalidProject(format!(
                    "projector '{}' has an empty resolution {}x{}",
                    entry.name, resolution.width, resolution.height
                )));
            }
            if resolution.width > MAX_RESOLUTION || resolution.height > MAX_RESOLUTION {
                return Err(PrevisError::InvalidProject(format!(
                    "projector '{}' resolution {}x{} exceeds {}px",
                    entry.name, resolution.width, resolution.height, MAX_RESOLUTION
                )));
            }
        }

        Ok(())
    }

    /// Find a projector by id.
    pub fn projector(&self, id: u32) -> Option<&ProjectorEntry> {
        self.projectors.iter().find(|p| p.id == id)
    }
}

/// Per-projector entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectorEntry {
    /// Unique ID.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Placement and optics.
    pub settings: ProjectorSettings,
}

impl Default for ProjectorEntry {
    fn default() -> Self {
        Self {
            id: 1,
            name: "Projector 1".to_string(),
            settings: ProjectorSettings::default(),
        }
    }
}

/// Edge blend configuration for projector arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendConfig {
    /// Overlap between neighbouring images, as a fraction of image width.
    pub overlap: f64,
    /// Gamma used by [`BlendCurve::Gamma`].
    pub gamma: f32,
    /// Blend curve type.
    pub curve: BlendCurve,
}

impl Default for BlendConfig {
    fn default() -> Self {
        Self {
            overlap: 0.15,
            gamma: 2.2,
            curve: BlendCurve::Gamma,
        }
    }
}

/// Blend curve types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BlendCurve {
    Linear,
    #[default]
    Gamma,
    Cosine,
    Smoothstep,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_project_is_valid() {
        assert!(ProjectFile::default().validate().is_ok());
    }

    #[test]
    fn test_empty_project_json_uses_defaults() {
        let project: ProjectFile = serde_json::from_str("{}").unwrap();
        assert_eq!(project, ProjectFile::default());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut project = ProjectFile::default();
        project.projectors.push(ProjectorEntry::default());
        let err = project.validate().unwrap_err();
        assert!(matches!(err, PrevisError::InvalidProject(_)));
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_zero_resolution_rejected() {
        let mut project = ProjectFile::default();
        project.projectors[0].settings.resolution.height = 0;
        assert!(project.validate().is_err());
    }

    #[test]
    fn test_oversized_resolution_rejected() {
        let mut project = ProjectFile::default();
        project.projectors[0].settings.resolution.width = 300_000;
        project.projectors[0].settings.resolution.height = 300_000;
        let err = project.validate().unwrap_err();
        assert!(err.to_string().contains("exceeds"));

        project.projectors[0].settings.resolution.width = MAX_RESOLUTION;
        project.projectors[0].settings.resolution.height = MAX_RESOLUTION;
        assert!(project.validate().is_ok());
    }

    #[test]
    fn test_no_projectors_rejected() {
        let project = ProjectFile {
            projectors: Vec::new(),
            ..Default::default()
        };
        assert!(project.validate().is_err());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stage.json");

        let mut project = ProjectFile::default();
        project.name = "Main Stage".to_string();
        project.surface.dimensions.width = 24.0;
        project.save(&path).unwrap();

        let loaded = ProjectFile::load(&path).unwrap();
        assert_eq!(loaded, project);
        assert!(loaded.projector(1).is_some());
        assert!(loaded.projector(2).is_none());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = ProjectFile::load(Path::new("/nonexistent/project.json")).unwrap_err();
        assert!(matches!(err, PrevisError::Io(_)));
    }
}
