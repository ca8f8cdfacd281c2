//! Search configuration for the segment resolver.

/// Configuration parameters for itinerary search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Segments with at most this many stops are candidates for merging
    /// with their neighbour.
    pub short_segment_max_stops: usize,

    /// Repeat the merge pass until no more segments collapse.
    /// A single pass leaves chains of three or more short segments.
    pub merge_until_stable: bool,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(short_segment_max_stops: usize, merge_until_stable: bool) -> Self {
        Self {
            short_segment_max_stops,
            merge_until_stable,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            short_segment_max_stops: 3,
            merge_until_stable: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SearchConfig::default();

        assert_eq!(config.short_segment_max_stops, 3);
        assert!(!config.merge_until_stable);
    }

    #[test]
    fn custom_config() {
        let config = SearchConfig::new(5, true);

        assert_eq!(config.short_segment_max_stops, 5);
        assert!(config.merge_until_stable);
    }
}
