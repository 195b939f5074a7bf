use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};

/// Poids par défaut de l'écart de répartition bas/milieu/haut.
pub const DEFAULT_BUCKET_WEIGHT: f64 = 0.20;

/// Profil nommé : cibles par défaut du score anti-popularité.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Historico,
    Misto,
    Alto,
}

impl Profile {
    pub const ALL: [Profile; 3] = [Profile::Historico, Profile::Misto, Profile::Alto];

    pub fn name(&self) -> &'static str {
        match self {
            Profile::Historico => "historico",
            Profile::Misto => "misto",
            Profile::Alto => "alto",
        }
    }

    /// Résolution tolérante : un nom inconnu retombe sur `historico`.
    pub fn resolve(name: &str) -> Profile {
        name.parse().unwrap_or_default()
    }

    pub fn defaults(&self) -> ProfileSettings {
        match self {
            Profile::Historico => ProfileSettings {
                sum_target: 145.0,
                sum_weight: 0.15,
                bucket_target: [0.33, 0.33, 0.34],
                bucket_weight: DEFAULT_BUCKET_WEIGHT,
                min_high: 1,
            },
            Profile::Misto => ProfileSettings {
                sum_target: 183.0,
                sum_weight: 0.10,
                bucket_target: [1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0],
                bucket_weight: DEFAULT_BUCKET_WEIGHT,
                min_high: 1,
            },
            Profile::Alto => ProfileSettings {
                sum_target: 260.0,
                sum_weight: 0.05,
                bucket_target: [0.15, 0.30, 0.55],
                bucket_weight: DEFAULT_BUCKET_WEIGHT,
                min_high: 3,
            },
        }
    }

    /// Valeurs par défaut du profil, remplacées par les surcharges fournies.
    ///
    /// `min_high` ne descend jamais sous le minimum du profil.
    pub fn settings(&self, overrides: &ProfileOverrides) -> ProfileSettings {
        let defaults = self.defaults();
        ProfileSettings {
            sum_target: overrides.sum_target.unwrap_or(defaults.sum_target),
            sum_weight: overrides.sum_weight.unwrap_or(defaults.sum_weight),
            bucket_target: overrides.bucket_target.unwrap_or(defaults.bucket_target),
            bucket_weight: overrides.bucket_weight.unwrap_or(defaults.bucket_weight),
            min_high: overrides
                .min_high
                .map_or(defaults.min_high, |m| m.max(defaults.min_high)),
        }
    }
}

impl FromStr for Profile {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "historico" => Ok(Profile::Historico),
            "misto" => Ok(Profile::Misto),
            "alto" => Ok(Profile::Alto),
            other => bail!("Profil inconnu '{}' (historico, misto, alto)", other),
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Cibles résolues d'un profil.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileSettings {
    pub sum_target: f64,
    pub sum_weight: f64,
    /// Proportions visées dans les tranches 1-20, 21-40, 41-60.
    pub bucket_target: [f64; 3],
    pub bucket_weight: f64,
    /// Minimum de dezenas >= 41 par jogo.
    pub min_high: usize,
}

/// Surcharges fournies par l'appelant ; `None` garde la valeur du profil.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileOverrides {
    pub sum_target: Option<f64>,
    pub sum_weight: Option<f64>,
    pub bucket_target: Option<[f64; 3]>,
    pub bucket_weight: Option<f64>,
    pub min_high: Option<usize>,
}

/// Résout un nom de profil (tolérant) et ses surcharges.
pub fn resolve_profile(name: &str, overrides: &ProfileOverrides) -> ProfileSettings {
    Profile::resolve(name).settings(overrides)
}
