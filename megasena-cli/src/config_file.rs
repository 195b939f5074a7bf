use std::path::Path;

use anyhow::{Context, Result};

use megasena_core::GenerationConfig;

pub fn load_config(path: &Path) -> Result<GenerationConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let config: GenerationConfig = serde_json::from_str(&json)
        .with_context(|| format!("JSON invalide dans {}", path.display()))?;
    Ok(config)
}

pub fn save_config(path: &Path, config: &GenerationConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)
        .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
    Ok(())
}
