//! Unified configuration loading for drishya-map.
//!
//! Loads all configuration from a single YAML file; every section and field
//! is optional and falls back to documented defaults.

mod drishya;
mod error;
mod sections;

pub use drishya::DrishyaConfig;
pub use error::ConfigLoadError;
pub use sections::{
    AssociationSection, FilterSection, FusionSection, GraphSection, PipelineSection,
};
