use crate::config::GenerationConfig;
use crate::models::Ticket;

/// Longueur de suite consécutive interdite (ex. 23-24-25).
pub const MAX_RUN: usize = 3;

/// Vrai si le jogo respecte toutes les règles dures de la configuration.
pub fn is_valid(ticket: &Ticket, config: &GenerationConfig) -> bool {
    let rules = &config.rules;

    if let Some((low, high)) = rules.sum_band {
        let sum = ticket.sum();
        if sum < low || sum > high {
            return false;
        }
    }
    if ticket.count_above(31) < rules.min_over_31 {
        return false;
    }
    if ticket.high_count() < config.settings().min_high {
        return false;
    }

    let odds = ticket.odd_count();
    if odds < rules.odd_range.0 || odds > rules.odd_range.1 {
        return false;
    }
    if ticket.decile_counts().iter().any(|&c| c > rules.max_same_decile) {
        return false;
    }
    if ticket.ending_counts().iter().any(|&c| c > rules.max_same_ending) {
        return false;
    }
    if ticket.mult5_count() > rules.max_mult5 {
        return false;
    }

    !ticket.has_run(MAX_RUN)
}
