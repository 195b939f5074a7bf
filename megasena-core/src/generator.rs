use crate::config::GenerationConfig;
use crate::models::Batch;
use crate::pool::build_pool;
use crate::presenter::present_game;
use crate::rng::rng_from_seed;
use crate::selector::select_batch;

/// Point d'entrée : génère jusqu'à `n_games` jogos pour une graine donnée.
///
/// Une même graine et une même configuration reproduisent exactement le même
/// lot, ordre d'affichage compris. Le générateur est consommé dans un ordre
/// fixe : pool, fenêtres de sélection, puis mélanges d'affichage.
pub fn generate(seed: &str, n_games: usize, balanced: bool, config: &GenerationConfig) -> Batch {
    if n_games == 0 {
        return Batch::default();
    }

    let mut rng = rng_from_seed(seed);

    let pool = build_pool(config, &mut rng);
    let selection = select_batch(&pool, n_games, balanced, config, &mut rng);

    let games = selection
        .tickets
        .into_iter()
        .map(|ticket| present_game(ticket, config, &mut rng))
        .collect::<Vec<_>>();

    if games.len() < n_games {
        log::warn!(
            "Lot incomplet : {}/{} jogos (pool de {})",
            games.len(),
            n_games,
            pool.len()
        );
    }
    log::debug!(
        "Graine '{}' : {} jogos, profil {}, {} relâché(s)",
        seed,
        games.len(),
        config.profile,
        selection.relaxed_picks
    );

    Batch::new(games, selection.relaxed_picks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Profile, ProfileOverrides};

    fn small_config() -> GenerationConfig {
        GenerationConfig {
            pool_size: 500,
            candidates_per_pick: 200,
            ..GenerationConfig::default()
        }
    }

    #[test]
    fn test_zero_games_is_empty() {
        let batch = generate("MEGASENA-2900-", 0, false, &small_config());
        assert!(batch.is_empty());
        assert!(!batch.is_short(0));
    }

    #[test]
    fn test_generate_deterministic() {
        let config = small_config();
        let a = generate("MEGASENA-2900-", 10, false, &config);
        let b = generate("MEGASENA-2900-", 10, false, &config);
        assert_eq!(a.len(), 10);
        assert_eq!(a, b);
        assert_eq!(a.to_display(), b.to_display());
    }

    #[test]
    fn test_generate_seed_changes_batch() {
        let config = small_config();
        let a = generate("MEGASENA-2900-", 5, false, &config);
        let b = generate("MEGASENA-2900--NEW-x-1", 5, false, &config);
        assert_ne!(a, b);
    }

    #[test]
    fn test_display_matches_canonical() {
        let batch = generate("display", 8, false, &small_config());
        for game in batch.games() {
            let mut sorted = game.display;
            sorted.sort();
            assert_eq!(&sorted, game.ticket.numbers());
        }
    }

    #[test]
    fn test_no_shuffle_keeps_ascending() {
        let config = GenerationConfig {
            display_shuffle: false,
            ..small_config()
        };
        let batch = generate("ascending", 5, false, &config);
        for game in batch.games() {
            assert_eq!(&game.display, game.ticket.numbers());
        }
    }

    #[test]
    fn test_shuffle_flag_does_not_change_tickets() {
        let shuffled = generate("flag", 6, false, &small_config());
        let sorted = generate(
            "flag",
            6,
            false,
            &GenerationConfig {
                display_shuffle: false,
                ..small_config()
            },
        );
        let a: Vec<_> = shuffled.tickets().copied().collect();
        let b: Vec<_> = sorted.tickets().copied().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_shortfall_is_not_an_error() {
        let config = GenerationConfig {
            pool_size: 3,
            ..small_config()
        };
        let batch = generate("tiny", 10, false, &config);
        assert_eq!(batch.len(), 3);
        assert!(batch.is_short(10));
    }

    #[test]
    fn test_huge_balanced_request_is_short() {
        let config = GenerationConfig {
            pool_size: 40,
            ..small_config()
        };
        let batch = generate("MEGASENA-2900-", usize::MAX, true, &config);
        assert_eq!(batch.len(), 40);
        assert!(batch.is_short(usize::MAX));
    }

    #[test]
    fn test_alto_raises_sum_and_highs() {
        let overrides = ProfileOverrides::default();
        let historico = GenerationConfig::for_profile(Profile::Historico, &overrides);
        let alto = GenerationConfig::for_profile(Profile::Alto, &overrides);

        let h = generate("MEGASENA-2900-", 10, false, &historico);
        let a = generate("MEGASENA-2900-", 10, false, &alto);
        assert_eq!(h.len(), 10);
        assert_eq!(a.len(), 10);

        let mean = |batch: &Batch, f: fn(&crate::Ticket) -> f64| {
            batch.tickets().map(f).sum::<f64>() / batch.len() as f64
        };
        let sum = |t: &crate::Ticket| t.sum() as f64;
        let highs = |t: &crate::Ticket| t.high_count() as f64;

        assert!(mean(&a, sum) > mean(&h, sum));
        assert!(mean(&a, highs) > mean(&h, highs));
        assert!(a.tickets().all(|t| t.high_count() >= 3));
    }
}
