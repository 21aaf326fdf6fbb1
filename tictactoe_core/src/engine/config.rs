use serde::{Deserialize, Serialize};

/// IDS look-ahead bound. Tic-tac-toe never lasts more than 9 plies.
pub const DEFAULT_MAX_DEPTH: u8 = 9;
pub const DEFAULT_SIMULATIONS: u32 = 10_000;
pub const DEFAULT_EXPLORATION: f64 = std::f64::consts::SQRT_2;

/// Search options. Every field is optional; each searcher falls back to its
/// own default through the accessor methods.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u8>,
    /// Wall-clock budget in milliseconds for IDS and MCTS.
    #[serde(
        rename = "timeBudget",
        alias = "timeBudgetMs",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_budget_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulation_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exploration_constant: Option<f64>,
    /// MCTS rollout seed. Unset means seeded from OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl SearchConfig {
    /// Parses a JSON document; absent fields stay unset.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed JSON or mistyped fields.
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Fields set on `self` win; unset ones are taken from `base`.
    #[must_use]
    pub fn layered_over(&self, base: &Self) -> Self {
        Self {
            max_depth: self.max_depth.or(base.max_depth),
            time_budget_ms: self.time_budget_ms.or(base.time_budget_ms),
            simulation_count: self.simulation_count.or(base.simulation_count),
            exploration_constant: self.exploration_constant.or(base.exploration_constant),
            seed: self.seed.or(base.seed),
        }
    }

    /// Clamps the time budget and simulation count to `limits`. Unset fields
    /// take the limit; a budget is only capped when `limits` sets one.
    #[must_use]
    pub fn capped_by(&self, limits: &Self) -> Self {
        let time_budget_ms = match (self.time_budget_ms, limits.time_budget_ms) {
            (Some(ms), Some(limit)) => Some(ms.min(limit)),
            (ms, limit) => ms.or(limit),
        };
        Self {
            time_budget_ms,
            simulation_count: self
                .simulation_count
                .map(|n| n.min(limits.simulation_count()))
                .or(limits.simulation_count),
            ..self.clone()
        }
    }

    #[must_use]
    pub const fn with_max_depth(mut self, depth: u8) -> Self {
        self.max_depth = Some(depth);
        self
    }

    #[must_use]
    pub const fn with_time_budget_ms(mut self, ms: u64) -> Self {
        self.time_budget_ms = Some(ms);
        self
    }

    #[must_use]
    pub const fn with_simulations(mut self, n: u32) -> Self {
        self.simulation_count = Some(n);
        self
    }

    #[must_use]
    pub const fn with_exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = Some(c);
        self
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Effective IDS depth bound, at least 1.
    #[must_use]
    pub fn max_depth(&self) -> u8 {
        self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH).max(1)
    }

    /// Effective rollout count, at least 1.
    #[must_use]
    pub fn simulation_count(&self) -> u32 {
        self.simulation_count.unwrap_or(DEFAULT_SIMULATIONS).max(1)
    }

    /// Effective UCT weight; negative or non-finite values fall back to the default.
    #[must_use]
    pub fn exploration_constant(&self) -> f64 {
        self.exploration_constant
            .filter(|c| c.is_finite() && *c >= 0.0)
            .unwrap_or(DEFAULT_EXPLORATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_default() {
        let config = SearchConfig::load_from_json("{}").unwrap();
        assert_eq!(config, SearchConfig::default());
        assert_eq!(config.max_depth(), DEFAULT_MAX_DEPTH);
        assert_eq!(config.simulation_count(), DEFAULT_SIMULATIONS);
        assert!((config.exploration_constant() - DEFAULT_EXPLORATION).abs() < f64::EPSILON);
        assert_eq!(config.time_budget_ms, None);
    }

    #[test]
    fn test_load_config_full() {
        let json = r#"{
            "maxDepth": 4,
            "timeBudget": 250,
            "simulationCount": 3000,
            "explorationConstant": 0.9,
            "seed": 7
        }"#;
        let config = SearchConfig::load_from_json(json).unwrap();
        assert_eq!(config.max_depth(), 4);
        assert_eq!(config.time_budget_ms, Some(250));
        assert_eq!(config.simulation_count(), 3000);
        assert!((config.exploration_constant() - 0.9).abs() < f64::EPSILON);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_capped_by() {
        let limits = SearchConfig::default()
            .with_time_budget_ms(2000)
            .with_simulations(500);
        let greedy = SearchConfig::default()
            .with_time_budget_ms(60_000)
            .with_simulations(1_000_000)
            .with_seed(4);
        let capped = greedy.capped_by(&limits);
        assert_eq!(capped.time_budget_ms, Some(2000));
        assert_eq!(capped.simulation_count, Some(500));
        assert_eq!(capped.seed, Some(4));

        let modest = SearchConfig::default()
            .with_time_budget_ms(100)
            .with_simulations(50);
        assert_eq!(modest.capped_by(&limits), modest);

        // Without explicit limits only the default simulation count applies.
        let capped = greedy.capped_by(&SearchConfig::default());
        assert_eq!(capped.time_budget_ms, Some(60_000));
        assert_eq!(capped.simulation_count, Some(DEFAULT_SIMULATIONS));

        // An unbounded request inherits the limits.
        let unbounded = SearchConfig::default().capped_by(&limits);
        assert_eq!(unbounded.time_budget_ms, Some(2000));
        assert_eq!(unbounded.simulation_count, Some(500));
    }

    #[test]
    fn test_load_config_partial_and_alias() {
        let config = SearchConfig::load_from_json(r#"{ "timeBudgetMs": 10 }"#).unwrap();
        assert_eq!(config.time_budget_ms, Some(10));
        assert_eq!(config.max_depth, None);
    }

    #[test]
    fn test_load_config_invalid_json() {
        assert!(SearchConfig::load_from_json("{ invalid json }").is_err());
        assert!(SearchConfig::load_from_json(r#"{ "maxDepth": "deep" }"#).is_err());
    }

    #[test]
    fn test_effective_values_are_clamped() {
        let config = SearchConfig::default()
            .with_max_depth(0)
            .with_simulations(0)
            .with_exploration_constant(f64::NAN);
        assert_eq!(config.max_depth(), 1);
        assert_eq!(config.simulation_count(), 1);
        assert!((config.exploration_constant() - DEFAULT_EXPLORATION).abs() < f64::EPSILON);

        let negative = SearchConfig::default().with_exploration_constant(-1.0);
        assert!((negative.exploration_constant() - DEFAULT_EXPLORATION).abs() < f64::EPSILON);
    }

    #[test]
    fn test_layered_over() {
        let base = SearchConfig::default()
            .with_time_budget_ms(2000)
            .with_simulations(500);
        let request = SearchConfig::default().with_simulations(50).with_seed(1);
        let merged = request.layered_over(&base);
        assert_eq!(merged.time_budget_ms, Some(2000));
        assert_eq!(merged.simulation_count, Some(50));
        assert_eq!(merged.seed, Some(1));
        assert_eq!(merged.max_depth, None);
    }

    #[test]
    fn test_serializes_camel_case_without_unset_fields() {
        let config = SearchConfig::default().with_time_budget_ms(100);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"timeBudget":100}"#);
    }
}
