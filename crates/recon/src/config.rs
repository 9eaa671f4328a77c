use serde::Deserialize;

use crate::error::ReconError;

/// Matching parameters, passed explicitly into each stage entry point.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchConfig {
    /// Field names forming the join/similarity key, in order.
    #[serde(default = "default_merge_fields")]
    pub merge_fields: Vec<String>,
    /// A fuzzy candidate is kept only when its summed edit distance is
    /// strictly below this.
    #[serde(default = "default_threshold")]
    pub distance_threshold: usize,
    /// Cap on the number of candidates proposed per track.
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
}

fn default_merge_fields() -> Vec<String> {
    vec!["artist".into(), "title".into()]
}

fn default_threshold() -> usize {
    4
}

fn default_max_candidates() -> usize {
    5
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            merge_fields: default_merge_fields(),
            distance_threshold: default_threshold(),
            max_candidates: default_max_candidates(),
        }
    }
}

impl MatchConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: MatchConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.merge_fields.is_empty() {
            return Err(ReconError::ConfigValidation(
                "at least one merge field is required".into(),
            ));
        }
        if self.distance_threshold == 0 {
            return Err(ReconError::ConfigValidation(
                "distance_threshold must be at least 1".into(),
            ));
        }
        if self.max_candidates == 0 {
            return Err(ReconError::ConfigValidation(
                "max_candidates must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_artist_title() {
        let config = MatchConfig::default();
        assert_eq!(config.merge_fields, vec!["artist", "title"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_valid() {
        let config = MatchConfig::from_toml(
            r#"
merge_fields = ["artist", "title", "album"]
distance_threshold = 3
max_candidates = 8
"#,
        )
        .unwrap();
        assert_eq!(config.merge_fields.len(), 3);
        assert_eq!(config.distance_threshold, 3);
        assert_eq!(config.max_candidates, 8);
    }

    #[test]
    fn parse_fills_defaults() {
        let config = MatchConfig::from_toml("distance_threshold = 2").unwrap();
        assert_eq!(config.merge_fields, vec!["artist", "title"]);
        assert_eq!(config.max_candidates, 5);
    }

    #[test]
    fn reject_empty_merge_fields() {
        let err = MatchConfig::from_toml("merge_fields = []").unwrap_err();
        assert!(err.to_string().contains("merge field"));
    }

    #[test]
    fn reject_zero_threshold() {
        let err = MatchConfig::from_toml("distance_threshold = 0").unwrap_err();
        assert!(err.to_string().contains("distance_threshold"));
    }

    #[test]
    fn reject_zero_candidates() {
        let err = MatchConfig::from_toml("max_candidates = 0").unwrap_err();
        assert!(err.to_string().contains("max_candidates"));
    }
}
