use serde::{Deserialize, Serialize};

use crate::profile::{Profile, ProfileOverrides, ProfileSettings};

/// Le budget de tirages du pool vaut `pool_size * ATTEMPTS_PER_SLOT`.
pub const ATTEMPTS_PER_SLOT: usize = 50;

/// Règles structurelles dures d'un jogo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HardRules {
    /// Bande de somme inclusive, désactivée par défaut.
    pub sum_band: Option<(u32, u32)>,
    pub min_over_31: usize,
    /// Nombre de dezenas impaires autorisé (bornes incluses).
    pub odd_range: (usize, usize),
    pub max_same_decile: usize,
    pub max_same_ending: usize,
    pub max_mult5: usize,
}

impl Default for HardRules {
    fn default() -> Self {
        Self {
            sum_band: None,
            min_over_31: 3,
            odd_range: (2, 4),
            max_same_decile: 4,
            max_same_ending: 2,
            max_mult5: 3,
        }
    }
}

/// Que faire quand aucun candidat ne respecte le plafond d'exposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExposurePolicy {
    /// Relâche le plafond pour ce tour, puis complète le lot en l'ignorant.
    #[default]
    Lenient,
    /// S'arrête : le lot est plus court que demandé.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub rules: HardRules,
    pub pool_size: usize,
    pub candidates_per_pick: usize,
    pub max_exposure: usize,
    pub display_shuffle: bool,
    pub exposure_policy: ExposurePolicy,
    pub profile: Profile,
    pub overrides: ProfileOverrides,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            rules: HardRules::default(),
            pool_size: 6000,
            candidates_per_pick: 1200,
            max_exposure: 4,
            display_shuffle: true,
            exposure_policy: ExposurePolicy::default(),
            profile: Profile::default(),
            overrides: ProfileOverrides::default(),
        }
    }
}

impl GenerationConfig {
    pub fn for_profile(profile: Profile, overrides: &ProfileOverrides) -> Self {
        Self {
            profile,
            overrides: *overrides,
            ..Self::default()
        }
    }

    /// Cibles du profil après application des surcharges.
    pub fn settings(&self) -> ProfileSettings {
        self.profile.settings(&self.overrides)
    }

    /// Fusionne des surcharges : seules les valeurs fournies remplacent l'existant.
    pub fn apply_overrides(&mut self, overrides: &ProfileOverrides) {
        let current = &mut self.overrides;
        current.sum_target = overrides.sum_target.or(current.sum_target);
        current.sum_weight = overrides.sum_weight.or(current.sum_weight);
        current.bucket_target = overrides.bucket_target.or(current.bucket_target);
        current.bucket_weight = overrides.bucket_weight.or(current.bucket_weight);
        current.min_high = overrides.min_high.or(current.min_high);
    }

    pub fn attempt_budget(&self) -> usize {
        self.pool_size.saturating_mul(ATTEMPTS_PER_SLOT)
    }

    /// Plafond d'exposition du lot ; toujours >= 1.
    pub fn exposure_cap(&self, n_games: usize, balanced: bool) -> usize {
        let fits = n_games
            .checked_mul(crate::TICKET_SIZE)
            .is_some_and(|cells| cells <= crate::UNIVERSE_MAX as usize);
        if balanced && fits {
            1
        } else {
            self.max_exposure.max(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GenerationConfig::default();
        assert_eq!(config.pool_size, 6000);
        assert_eq!(config.candidates_per_pick, 1200);
        assert_eq!(config.max_exposure, 4);
        assert!(config.display_shuffle);
        assert_eq!(config.profile, Profile::Historico);
        assert_eq!(config.rules.odd_range, (2, 4));
        assert_eq!(config.rules.sum_band, None);
        assert_eq!(config.attempt_budget(), 300_000);
    }

    #[test]
    fn test_for_profile() {
        let config = GenerationConfig::for_profile(Profile::Alto, &ProfileOverrides::default());
        assert_eq!(config.settings().sum_target, 260.0);
        assert_eq!(config.settings().min_high, 3);
    }

    #[test]
    fn test_apply_overrides_keeps_floor() {
        let mut config = GenerationConfig::for_profile(Profile::Alto, &ProfileOverrides::default());
        config.apply_overrides(&ProfileOverrides {
            min_high: Some(0),
            sum_weight: Some(0.0),
            ..Default::default()
        });
        assert_eq!(config.settings().min_high, 3);
        assert_eq!(config.settings().sum_weight, 0.0);
        assert_eq!(config.settings().sum_target, 260.0);

        config.apply_overrides(&ProfileOverrides {
            sum_target: Some(240.0),
            ..Default::default()
        });
        assert_eq!(config.settings().sum_target, 240.0);
        assert_eq!(config.settings().sum_weight, 0.0);
    }

    #[test]
    fn test_exposure_cap() {
        let mut config = GenerationConfig::default();
        assert_eq!(config.exposure_cap(10, true), 1);
        assert_eq!(config.exposure_cap(11, true), 4);
        assert_eq!(config.exposure_cap(5, false), 4);
        config.max_exposure = 0;
        assert_eq!(config.exposure_cap(20, false), 1);
    }

    #[test]
    fn test_exposure_cap_huge_request() {
        let config = GenerationConfig::default();
        assert_eq!(config.exposure_cap(usize::MAX, true), 4);
        assert_eq!(config.exposure_cap(1 << (usize::BITS - 1), true), 4);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = GenerationConfig::for_profile(Profile::Alto, &ProfileOverrides::default());
        let json = serde_json::to_string(&config).unwrap();
        let restored: GenerationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let restored: GenerationConfig =
            serde_json::from_str(r#"{"pool_size": 500, "exposure_policy": "strict"}"#).unwrap();
        assert_eq!(restored.pool_size, 500);
        assert_eq!(restored.exposure_policy, ExposurePolicy::Strict);
        assert_eq!(restored.candidates_per_pick, 1200);
        assert_eq!(restored.rules, HardRules::default());
        assert_eq!(restored.settings(), Profile::Historico.defaults());
    }

    #[test]
    fn test_config_json_profile_drives_settings() {
        let restored: GenerationConfig =
            serde_json::from_str(r#"{"profile": "alto", "overrides": {"min_high": 4}}"#).unwrap();
        let settings = restored.settings();
        assert_eq!(settings.sum_target, 260.0);
        assert_eq!(settings.min_high, 4);
    }
}
