//! Main DrishyaConfig and YAML loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ConfigLoadError;
use super::sections::{
    AssociationSection, FilterSection, FusionSection, GraphSection, PipelineSection,
};

/// Full drishya-map configuration loaded from YAML.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DrishyaConfig {
    /// Association settings.
    #[serde(default)]
    pub association: AssociationSection,

    /// Outlier filter settings.
    #[serde(default)]
    pub filter: FilterSection,

    /// Fusion settings.
    #[serde(default)]
    pub fusion: FusionSection,

    /// Scene graph settings.
    #[serde(default)]
    pub graph: GraphSection,

    /// Frame pipeline settings.
    #[serde(default)]
    pub pipeline: PipelineSection,
}

impl DrishyaConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from the default config path (configs/config.yaml), falling
    /// back to defaults when the file does not exist.
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new("configs/config.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DrishyaConfig::default();
        assert!((config.association.delta_sim - 1.1).abs() < 1e-6);
        assert!((config.association.distance_threshold - 0.025).abs() < 1e-6);
        assert!((config.filter.eps - 0.03).abs() < 1e-6);
        assert_eq!(config.filter.min_points, 20);
        assert!(!config.fusion.renormalize_fused);
        assert_eq!(config.graph.relation_retries, 1);
        assert_eq!(config.pipeline.max_caption_views, 10);
        assert_eq!(config.pipeline.min_mask_points, 0);
    }

    #[test]
    fn test_partial_yaml_overrides() {
        let yaml = r#"
association:
  delta_sim: 1.3
filter:
  min_points: 10
"#;
        let config = DrishyaConfig::from_yaml(yaml).unwrap();
        assert!((config.association.delta_sim - 1.3).abs() < 1e-6);
        // Unset fields keep their defaults.
        assert!((config.association.distance_threshold - 0.025).abs() < 1e-6);
        assert_eq!(config.filter.min_points, 10);
        assert!((config.filter.eps - 0.03).abs() < 1e-6);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = DrishyaConfig::from_yaml("{}").unwrap();
        assert!((config.association.delta_sim - 1.1).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_yaml_errors() {
        let err = DrishyaConfig::from_yaml("association: [not, a, map]");
        assert!(err.is_err());
    }

    #[test]
    fn test_section_conversions() {
        let config = DrishyaConfig::default();
        let assoc = config.association.to_association_config();
        assert!((assoc.delta_sim - 1.1).abs() < 1e-6);
        let dbscan = config.filter.to_dbscan_config();
        assert_eq!(dbscan.min_points, 20);
        let graph = config.graph.to_graph_config();
        assert_eq!(graph.relation_retries, 1);
    }
}
