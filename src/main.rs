//! Projection Mapping Previsualization
//!
//! Entry point for the projmap-previs command-line tool.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use projmap_previs::blending::plan_projector_array;
use projmap_previs::config::ProjectFile;
use projmap_previs::export::{ProjectionReport, ReportExporter};
use projmap_previs::telemetry::{init_logging, LogConfig};

/// Mask resolution divisor for exported blend masks
const MASK_DOWNSCALE: u32 = 4;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    cmd: Command,

    /// Default log level filter
    #[clap(long, global = true, default_value = "info")]
    log_level: String,

    /// Also write logs to this file
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,

    /// Emit JSON log lines
    #[clap(long, global = true)]
    json_logs: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Analyze every projector of a project
    Analyze {
        /// Project file (JSON)
        project: PathBuf,
        /// Write the full reports to this JSON file
        #[clap(long, short)]
        output: Option<PathBuf>,
    },
    /// Plan a projector array for the first projector of a project
    Plan {
        /// Project file (JSON)
        project: PathBuf,
        /// Export blend masks into this directory
        #[clap(long)]
        masks: Option<PathBuf>,
        /// Write 16-bit masks
        #[clap(long = "16bit")]
        sixteen_bit: bool,
    },
    /// Write a default project file
    Init {
        /// Destination path
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_config = LogConfig {
        file_enabled: args.log_file.is_some(),
        file_path: args.log_file.clone(),
        json_format: args.json_logs,
        default_level: args.log_level.clone(),
        ..Default::default()
    };
    let _log_guard = init_logging(&log_config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    match args.cmd {
        Command::Analyze { project, output } => analyze(&project, output.as_deref()),
        Command::Plan {
            project,
            masks,
            sixteen_bit,
        } => plan(&project, masks.as_deref(), sixteen_bit),
        Command::Init { path } => {
            ProjectFile::default()
                .save(&path)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote default project to {}", path.display());
            Ok(())
        }
    }
}

fn analyze(path: &std::path::Path, output: Option<&std::path::Path>) -> Result<()> {
    let project =
        ProjectFile::load(path).with_context(|| format!("loading {}", path.display()))?;
    let reports = ProjectionReport::build_all(&project);

    println!(
        "{} ({} {:.1}m x {:.1}m)",
        project.name,
        project.surface.surface_type.display_name(),
        project.surface.dimensions.width,
        project.surface.dimensions.height
    );

    for report in &reports {
        let projection = &report.projection;
        println!(
            "  [{}] {}: coverage {:.0}%, brightness {:.0}, keystone {:.1}°/{:.1}°, {}",
            report.projector_id,
            report.projector_name,
            projection.coverage_area * 100.0,
            projection.luminance_map.center_brightness,
            projection.keystone_correction.horizontal_keystone,
            projection.keystone_correction.vertical_keystone,
            if report.validation.is_valid { "ok" } else { "INVALID" }
        );

        for error in &report.validation.errors {
            log::error!("{}: {}", report.projector_name, error);
        }
        for warning in &report.validation.warnings {
            log::warn!("{}: {}", report.projector_name, warning);
        }
    }

    if let Some(output) = output {
        ReportExporter::export_json(&reports, output)
            .with_context(|| format!("exporting {}", output.display()))?;
    }

    Ok(())
}

fn plan(path: &std::path::Path, masks: Option<&std::path::Path>, use_16bit: bool) -> Result<()> {
    let project =
        ProjectFile::load(path).with_context(|| format!("loading {}", path.display()))?;
    let source = &project.projectors[0];
    let array = plan_projector_array(&source.settings, &project.surface, &project.blend);

    println!(
        "{}: {} projector(s) based on '{}'",
        project.name,
        array.len(),
        source.name
    );
    for planned in &array.projectors {
        let p = planned.settings.position;
        println!(
            "  #{} at ({:.2}, {:.2}, {:.2}), image {:.2}m, blend L{} R{}",
            planned.index, p.x, p.y, p.z, planned.image_width, planned.blend_left, planned.blend_right
        );
    }

    if let Some(dir) = masks {
        let blend_masks = array.blend_masks(&project.blend, MASK_DOWNSCALE);
        ReportExporter::export_blend_masks(&blend_masks, dir, use_16bit)
            .with_context(|| format!("exporting masks to {}", dir.display()))?;
    }

    Ok(())
}
