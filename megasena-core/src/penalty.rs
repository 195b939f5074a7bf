use crate::models::{Ticket, TICKET_SIZE, UNIVERSE_MAX};
use crate::profile::ProfileSettings;

const ENDING_WEIGHT: f64 = 0.3;
const DECILE_WEIGHT: f64 = 0.4;
const DECILE_FREE: usize = 2;
const MULT5_WEIGHT: f64 = 0.5;
const MULT5_FREE: usize = 2;

/// Coût « anti-popularité » d'un jogo, positif, plus bas = meilleur.
///
/// Heuristique additive : il ne sert qu'à ordonner les candidats d'un même lot.
pub fn penalty(ticket: &Ticket, settings: &ProfileSettings) -> f64 {
    sum_term(ticket, settings)
        + bucket_term(ticket, settings)
        + ending_term(ticket)
        + decile_term(ticket)
        + mult5_term(ticket)
}

fn sum_term(ticket: &Ticket, settings: &ProfileSettings) -> f64 {
    settings.sum_weight * (ticket.sum() as f64 - settings.sum_target).abs() / UNIVERSE_MAX as f64
}

/// Distance L1 entre la répartition bas/milieu/haut observée et la cible.
fn bucket_term(ticket: &Ticket, settings: &ProfileSettings) -> f64 {
    let distance: f64 = ticket
        .bucket_counts()
        .iter()
        .zip(settings.bucket_target.iter())
        .map(|(&count, &target)| (count as f64 / TICKET_SIZE as f64 - target).abs())
        .sum();
    settings.bucket_weight * distance
}

fn ending_term(ticket: &Ticket) -> f64 {
    let repeated: usize = ticket
        .ending_counts()
        .iter()
        .map(|&c| c.saturating_sub(1))
        .sum();
    ENDING_WEIGHT * repeated as f64
}

fn decile_term(ticket: &Ticket) -> f64 {
    let excess: usize = ticket
        .decile_counts()
        .iter()
        .map(|&c| c.saturating_sub(DECILE_FREE))
        .sum();
    DECILE_WEIGHT * excess as f64
}

fn mult5_term(ticket: &Ticket) -> f64 {
    MULT5_WEIGHT * ticket.mult5_count().saturating_sub(MULT5_FREE) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Profile;

    fn flat_settings() -> ProfileSettings {
        ProfileSettings {
            sum_target: 0.0,
            sum_weight: 0.0,
            bucket_target: [0.0; 3],
            bucket_weight: 0.0,
            min_high: 0,
        }
    }

    #[test]
    fn test_penalty_historico() {
        let ticket = Ticket::new(&[4, 17, 32, 39, 46, 58]).unwrap();
        let settings = Profile::Historico.defaults();
        let third: f64 = 1.0 / 3.0;
        let expected = 0.15 * 51.0 / 60.0
            + 0.20 * ((third - 0.33).abs() + (third - 0.33).abs() + (third - 0.34).abs());
        let p = penalty(&ticket, &settings);
        assert!((p - expected).abs() < 1e-12, "p={p} expected={expected}");
    }

    #[test]
    fn test_penalty_endings_and_mult5() {
        let ticket = Ticket::new(&[5, 15, 25, 35, 45, 58]).unwrap();
        let p = penalty(&ticket, &flat_settings());
        // 4 finales répétées (0.3 * 4) + 3 multiples de 5 en trop (0.5 * 3)
        assert!((p - 2.7).abs() < 1e-12, "p={p}");
    }

    #[test]
    fn test_penalty_decile_concentration() {
        let ticket = Ticket::new(&[1, 2, 4, 6, 8, 60]).unwrap();
        let p = penalty(&ticket, &flat_settings());
        assert!((p - 1.2).abs() < 1e-12, "p={p}");
    }

    #[test]
    fn test_penalty_sum_target_closer_is_cheaper() {
        let settings = Profile::Alto.defaults();
        let low = Ticket::new(&[2, 13, 24, 35, 46, 57]).unwrap();
        let high = Ticket::new(&[12, 33, 44, 49, 56, 58]).unwrap();
        assert!(sum_term(&high, &settings) < sum_term(&low, &settings));
    }

    #[test]
    fn test_penalty_deterministic() {
        let ticket = Ticket::new(&[3, 18, 31, 42, 47, 59]).unwrap();
        let settings = Profile::Misto.defaults();
        assert_eq!(
            penalty(&ticket, &settings).to_bits(),
            penalty(&ticket, &settings).to_bits()
        );
    }
}
