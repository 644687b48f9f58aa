//! Projection Mapping Previsualization
//!
//! Projector placement analysis for projection mapping:
//! - Camera model (projection and view matrices with lens shift)
//! - Keystone, distortion, coverage and luminance estimation
//! - Setup recommendations and validation
//! - Multi-projector array planning with edge blend masks

pub mod blending;
pub mod config;
pub mod error;
pub mod export;
pub mod projection;
pub mod telemetry;
pub mod validation;

pub use error::{PrevisError, Result};
pub use projection::{calculate_projection, ProjectionConfig, ProjectorSettings, SurfaceGeometry};
pub use validation::{validate_projector_setup, ValidationResult};
