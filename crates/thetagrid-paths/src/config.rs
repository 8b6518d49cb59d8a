/// Tuning knobs for a [`PathFinder`](crate::PathFinder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Allow the line-of-sight shortcut to a vertex's grandparent.
    /// When `false` the search never consults the oracle and degenerates to
    /// a 4-connected Dijkstra search.
    pub any_angle: bool,

    /// Abort after expanding this many vertices. `None` = unbounded.
    pub max_expansions: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            any_angle: true,
            max_expansions: None,
        }
    }
}

impl SearchConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for [`any_angle`](Self::any_angle).
    pub fn with_any_angle(mut self, any_angle: bool) -> Self {
        self.any_angle = any_angle;
        self
    }

    /// Builder-style setter for [`max_expansions`](Self::max_expansions).
    pub fn with_max_expansions(mut self, max: usize) -> Self {
        self.max_expansions = Some(max);
        self
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let cfg: SearchConfig = serde_json::from_str(r#"{"max_expansions": 10}"#).unwrap();
        assert!(cfg.any_angle);
        assert_eq!(cfg.max_expansions, Some(10));
    }
}
