//! Export module for projection reports and blend masks.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::blending::BlendMask;
use crate::config::{ProjectFile, ProjectorEntry};
use crate::error::Result;
use crate::projection::{calculate_projection, ProjectionConfig, ProjectorSettings};
use crate::validation::{validate_projector_setup, ValidationResult};

/// Everything computed for one projector of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionReport {
    pub project: String,
    pub projector_id: u32,
    pub projector_name: String,
    pub settings: ProjectorSettings,
    pub projection: ProjectionConfig,
    pub validation: ValidationResult,
    /// Producing tool and version.
    pub generated_by: String,
}

impl ProjectionReport {
    /// Run the engine and validator for one projector entry.
    pub fn build(project: &ProjectFile, entry: &ProjectorEntry) -> Self {
        Self {
            project: project.name.clone(),
            projector_id: entry.id,
            projector_name: entry.name.clone(),
            settings: entry.settings.clone(),
            projection: calculate_projection(&entry.settings, &project.surface),
            validation: validate_projector_setup(&entry.settings, &project.surface),
            generated_by: concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))
                .to_string(),
        }
    }

    /// One report per projector, in project order.
    pub fn build_all(project: &ProjectFile) -> Vec<Self> {
        project
            .projectors
            .iter()
            .map(|entry| Self::build(project, entry))
            .collect()
    }
}

/// Export reports and masks to disk.
pub struct ReportExporter;

impl ReportExporter {
    /// Export reports to pretty-printed JSON.
    pub fn export_json(reports: &[ProjectionReport], path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(reports)?;
        std::fs::write(path, json)?;
        log::info!("Exported {} report(s) to {:?}", reports.len(), path);
        Ok(())
    }

    /// Write one mask as a grayscale PNG, 8 or 16 bits per pixel.
    pub fn export_blend_mask(mask: &BlendMask, path: &Path, use_16bit: bool) -> Result<()> {
        let level = |x: u32, y: u32, full_scale: f32| {
            (mask.get(x, y).unwrap_or(0.0) * full_scale).round().clamp(0.0, full_scale)
        };

        if use_16bit {
            image::ImageBuffer::from_fn(mask.width, mask.height, |x, y| {
                image::Luma([level(x, y, u16::MAX as f32) as u16])
            })
            .save(path)?;
        } else {
            image::GrayImage::from_fn(mask.width, mask.height, |x, y| {
                image::Luma([level(x, y, u8::MAX as f32) as u8])
            })
            .save(path)?;
        }
        Ok(())
    }

    /// Export all blend masks of a projector array to a directory.
    pub fn export_blend_masks(masks: &[BlendMask], output_dir: &Path, use_16bit: bool) -> Result<()> {
        std::fs::create_dir_all(output_dir)?;

        for (i, mask) in masks.iter().enumerate() {
            let filename = format!("blend_mask_projector_{}.png", i);
            let path = output_dir.join(&filename);

            Self::export_blend_mask(mask, &path, use_16bit)?;
            log::info!("Exported blend mask: {}", filename);
        }

        Ok(())
    }
}
