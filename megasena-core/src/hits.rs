use crate::models::{Batch, Ticket};

/// Faixa de prêmio atteinte selon le nombre d'acertos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrizeTier {
    Quadra,
    Quina,
    Sena,
}

impl PrizeTier {
    pub fn from_hits(hits: usize) -> Option<PrizeTier> {
        match hits {
            6 => Some(PrizeTier::Sena),
            5 => Some(PrizeTier::Quina),
            4 => Some(PrizeTier::Quadra),
            _ => None,
        }
    }
}

impl std::fmt::Display for PrizeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrizeTier::Quadra => write!(f, "Quadra"),
            PrizeTier::Quina => write!(f, "Quina"),
            PrizeTier::Sena => write!(f, "Sena"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitReport {
    /// Acertos par jogo, dans l'ordre du lot.
    pub per_game: Vec<usize>,
    /// Index (à partir de 1) du meilleur jogo ; le premier en cas d'égalité.
    pub best_index: Option<usize>,
    pub max_hits: usize,
}

impl HitReport {
    pub fn best_tier(&self) -> Option<PrizeTier> {
        PrizeTier::from_hits(self.max_hits)
    }
}

pub fn evaluate_tickets<'a, I>(drawn: &Ticket, tickets: I) -> HitReport
where
    I: IntoIterator<Item = &'a Ticket>,
{
    let per_game: Vec<usize> = tickets.into_iter().map(|t| t.common_with(drawn)).collect();
    let max_hits = per_game.iter().copied().max().unwrap_or(0);
    let best_index = per_game.iter().position(|&h| h == max_hits).map(|i| i + 1);
    HitReport {
        per_game,
        best_index,
        max_hits,
    }
}

/// Compare le résultat officiel avec un lot généré.
pub fn evaluate_hits(drawn: &Ticket, batch: &Batch) -> HitReport {
    evaluate_tickets(drawn, batch.tickets())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(numbers: [u8; 6]) -> Ticket {
        Ticket::new(&numbers).unwrap()
    }

    #[test]
    fn test_hits_per_game() {
        let drawn = t([4, 17, 32, 39, 46, 58]);
        let bets = [
            t([1, 2, 3, 5, 6, 7]),
            t([4, 17, 32, 39, 45, 57]),
            t([4, 17, 32, 39, 46, 57]),
            t([4, 17, 32, 39, 46, 56]),
        ];
        let report = evaluate_tickets(&drawn, bets.iter());
        assert_eq!(report.per_game, vec![0, 4, 5, 5]);
        assert_eq!(report.max_hits, 5);
        assert_eq!(report.best_index, Some(3));
        assert_eq!(report.best_tier(), Some(PrizeTier::Quina));
    }

    #[test]
    fn test_hits_empty_batch() {
        let drawn = t([4, 17, 32, 39, 46, 58]);
        let report = evaluate_hits(&drawn, &Batch::default());
        assert!(report.per_game.is_empty());
        assert_eq!(report.best_index, None);
        assert_eq!(report.max_hits, 0);
        assert_eq!(report.best_tier(), None);
    }

    #[test]
    fn test_prize_tiers() {
        assert_eq!(PrizeTier::from_hits(6), Some(PrizeTier::Sena));
        assert_eq!(PrizeTier::from_hits(4), Some(PrizeTier::Quadra));
        assert_eq!(PrizeTier::from_hits(3), None);
        assert_eq!(PrizeTier::Sena.to_string(), "Sena");
    }
}
