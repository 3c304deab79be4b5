//! Game constants grouped as one configurable set.
//!
//! `Rules::default()` is the classic setup: three lives, a 3.0 s budget that
//! shrinks by 0.2 s every fifth consecutive hit down to 1.0 s, and 10 points per
//! hit multiplied by the current level. Times are integral milliseconds so the
//! repeated decrements stay exact.

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct Rules {
    pub initial_lives: u8,
    pub initial_time_limit_ms: u32,
    pub time_limit_step_ms: u32,
    pub min_time_limit_ms: u32,
    /// Consecutive hits needed for each level-up.
    pub streak_per_level: u32,
    /// Points per hit at level 1.
    pub base_points: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            initial_lives: 3,
            initial_time_limit_ms: 3_000,
            time_limit_step_ms: 200,
            min_time_limit_ms: 1_000,
            streak_per_level: 5,
            base_points: 10,
        }
    }
}

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("initial lives must be at least 1")]
    NoLives,
    #[error("streak per level must be at least 1")]
    ZeroStreak,
    #[error("base points must be at least 1")]
    ZeroPoints,
    #[error("minimum time limit must be positive")]
    ZeroMinimum,
    #[error("initial time limit {initial} ms is below the minimum {minimum} ms")]
    LimitBelowMinimum { initial: u32, minimum: u32 },
    #[cfg(feature = "serde_json")]
    #[error("invalid rules json: {0}")]
    Json(#[from] serde_json::Error),
}

impl Rules {
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.initial_lives == 0 {
            return Err(RulesError::NoLives);
        }
        if self.streak_per_level == 0 {
            return Err(RulesError::ZeroStreak);
        }
        if self.base_points == 0 {
            return Err(RulesError::ZeroPoints);
        }
        if self.min_time_limit_ms == 0 {
            return Err(RulesError::ZeroMinimum);
        }
        if self.initial_time_limit_ms < self.min_time_limit_ms {
            return Err(RulesError::LimitBelowMinimum {
                initial: self.initial_time_limit_ms,
                minimum: self.min_time_limit_ms,
            });
        }
        Ok(())
    }

    /// Time limit after one more level-up, clamped to the minimum.
    pub fn next_time_limit_ms(&self, current_ms: u32) -> u32 {
        current_ms
            .saturating_sub(self.time_limit_step_ms)
            .max(self.min_time_limit_ms)
    }

    /// Parse and validate rules from a JSON object. Missing fields keep their
    /// default value, so `{"initial_lives": 5}` is a complete document. Unknown
    /// keys are rejected so a misspelled field cannot silently fall back.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, RulesError> {
        let rules: Rules = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Rules::default().validate().is_ok());
    }

    #[test]
    fn time_limit_steps_down_to_floor() {
        let rules = Rules::default();
        assert_eq!(rules.next_time_limit_ms(3_000), 2_800);
        assert_eq!(rules.next_time_limit_ms(1_100), 1_000);
        assert_eq!(rules.next_time_limit_ms(1_000), 1_000);
    }

    #[test]
    fn rejects_inconsistent_rules() {
        let mut rules = Rules::default();
        rules.initial_lives = 0;
        assert!(matches!(rules.validate(), Err(RulesError::NoLives)));

        let mut rules = Rules::default();
        rules.streak_per_level = 0;
        assert!(matches!(rules.validate(), Err(RulesError::ZeroStreak)));

        let mut rules = Rules::default();
        rules.initial_time_limit_ms = 500;
        assert!(matches!(
            rules.validate(),
            Err(RulesError::LimitBelowMinimum { initial: 500, minimum: 1_000 })
        ));
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn partial_json_fills_in_defaults() {
        let rules = Rules::from_json(r#"{"initial_lives": 5, "base_points": 20}"#).unwrap();
        assert_eq!(rules.initial_lives, 5);
        assert_eq!(rules.base_points, 20);
        assert_eq!(rules.initial_time_limit_ms, 3_000);
        assert_eq!(rules.streak_per_level, 5);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn json_errors_surface() {
        assert!(matches!(Rules::from_json("{"), Err(RulesError::Json(_))));
        assert!(matches!(
            Rules::from_json(r#"{"initial_live": 1}"#),
            Err(RulesError::Json(_))
        ));
        assert!(matches!(
            Rules::from_json(r#"{"min_time_limit_ms": 0}"#),
            Err(RulesError::ZeroMinimum)
        ));
    }
}
