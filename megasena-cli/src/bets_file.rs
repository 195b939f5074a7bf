use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use megasena_core::{Batch, Game, Ticket, TICKET_SIZE};

/// Jogos publiés pour un concours, dans l'ordre d'affichage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedBets {
    pub concurso: u32,
    pub bets: Vec<[u8; TICKET_SIZE]>,
}

impl SavedBets {
    pub fn from_batch(concurso: u32, batch: &Batch) -> Self {
        Self {
            concurso,
            bets: batch.games().iter().map(|g| g.display).collect(),
        }
    }

    /// Reconstruit le lot ; chaque jogo est revalidé.
    pub fn to_batch(&self) -> Result<Batch> {
        let games = self
            .bets
            .iter()
            .enumerate()
            .map(|(i, display)| {
                let ticket = Ticket::new(display)
                    .with_context(|| format!("Jogo {} invalide pour le concours {}", i + 1, self.concurso))?;
                Ok(Game { ticket, display: *display })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Batch::new(games, 0))
    }
}

pub fn bets_path(dir: &Path, concurso: u32) -> PathBuf {
    dir.join(format!("bets_{concurso}.json"))
}

pub fn save_bets(dir: &Path, bets: &SavedBets) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Impossible de créer {}", dir.display()))?;
    let path = bets_path(dir, bets.concurso);
    let json = serde_json::to_string_pretty(bets)?;
    std::fs::write(&path, json)
        .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
    Ok(path)
}

/// `None` si aucun fichier n'existe pour ce concours.
pub fn load_bets(dir: &Path, concurso: u32) -> Result<Option<SavedBets>> {
    let path = bets_path(dir, concurso);
    if !path.exists() {
        return Ok(None);
    }
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let saved: SavedBets = serde_json::from_str(&json)
        .with_context(|| format!("JSON invalide dans {}", path.display()))?;
    if saved.concurso != concurso {
        bail!(
            "{} contient le concours {} au lieu de {}",
            path.display(),
            saved.concurso,
            concurso
        );
    }
    Ok(Some(saved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use megasena_core::{generate, GenerationConfig};

    fn small_config() -> GenerationConfig {
        GenerationConfig {
            pool_size: 200,
            candidates_per_pick: 50,
            ..GenerationConfig::default()
        }
    }

    #[test]
    fn test_save_then_load_keeps_display_order() {
        let dir = tempfile::tempdir().unwrap();
        let batch = generate("MEGASENA-2900-2025-08-30", 5, false, &small_config());
        let saved = SavedBets::from_batch(2900, &batch);

        let path = save_bets(dir.path(), &saved).unwrap();
        assert!(path.ends_with("bets_2900.json"));

        let loaded = load_bets(dir.path(), 2900).unwrap().unwrap();
        assert_eq!(loaded, saved);

        let restored = loaded.to_batch().unwrap();
        let displays: Vec<_> = restored.games().iter().map(|g| g.display).collect();
        let original: Vec<_> = batch.games().iter().map(|g| g.display).collect();
        assert_eq!(displays, original);
        assert_eq!(
            restored.tickets().collect::<Vec<_>>(),
            batch.tickets().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_load_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_bets(dir.path(), 2901).unwrap().is_none());
    }

    #[test]
    fn test_save_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("state");
        let saved = SavedBets { concurso: 7, bets: vec![[46, 4, 58, 17, 39, 32]] };
        save_bets(&nested, &saved).unwrap();
        assert!(bets_path(&nested, 7).exists());
    }

    #[test]
    fn test_load_rejects_other_concurso() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            bets_path(dir.path(), 10),
            r#"{"concurso": 11, "bets": [[1, 2, 3, 4, 5, 6]]}"#,
        )
        .unwrap();
        assert!(load_bets(dir.path(), 10).is_err());
    }

    #[test]
    fn test_to_batch_rejects_invalid_game() {
        let saved = SavedBets { concurso: 1, bets: vec![[1, 1, 2, 3, 4, 5]] };
        assert!(saved.to_batch().is_err());
    }
}
