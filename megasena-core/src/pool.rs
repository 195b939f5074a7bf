use std::collections::HashSet;

use rand::RngCore;

use crate::config::GenerationConfig;
use crate::models::{universe, Ticket, TICKET_SIZE};
use crate::rng::partial_shuffle;
use crate::rules::is_valid;

/// Ensemble de jogos valides, sans doublon, dans l'ordre de tirage.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    tickets: Vec<Ticket>,
    attempts: usize,
}

impl CandidatePool {
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// Nombre de tirages consommés pour construire le pool.
    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

/// Pool fourni par l'appelant : les doublons sont ignorés, l'ordre est conservé.
impl FromIterator<Ticket> for CandidatePool {
    fn from_iter<I: IntoIterator<Item = Ticket>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        let tickets: Vec<Ticket> = iter.into_iter().filter(|t| seen.insert(*t)).collect();
        Self { tickets, attempts: 0 }
    }
}

/// Échantillonnage par rejet jusqu'à `pool_size` jogos ou épuisement du budget.
///
/// Un pool plus petit que la cible reste un résultat valide.
pub fn build_pool<R: RngCore + ?Sized>(config: &GenerationConfig, rng: &mut R) -> CandidatePool {
    let target = config.pool_size;
    let budget = config.attempt_budget();

    let mut numbers = universe();
    let mut seen: HashSet<Ticket> = HashSet::with_capacity(target);
    let mut tickets = Vec::with_capacity(target);
    let mut attempts = 0;

    while tickets.len() < target && attempts < budget {
        attempts += 1;
        let mut draw = [0u8; TICKET_SIZE];
        draw.copy_from_slice(partial_shuffle(rng, &mut numbers, TICKET_SIZE));
        let ticket = Ticket::from_draw(draw);
        if is_valid(&ticket, config) && seen.insert(ticket) {
            tickets.push(ticket);
        }
    }

    if tickets.len() < target {
        log::warn!(
            "Pool incomplet : {}/{} jogos valides après {} tirages",
            tickets.len(),
            target,
            attempts
        );
    } else {
        log::debug!("Pool complet : {} jogos en {} tirages", tickets.len(), attempts);
    }

    CandidatePool { tickets, attempts }
}
