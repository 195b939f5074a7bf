use std::collections::HashSet;

use rand::RngCore;

use crate::config::{ExposurePolicy, GenerationConfig};
use crate::models::{Ticket, UNIVERSE_MAX};
use crate::penalty::penalty;
use crate::pool::CandidatePool;
use crate::rng::sample_indices;

const PAIR_WEIGHT: f64 = 3.0;
const TRIPLE_WEIGHT: f64 = 1.5;
const OVERLAP_WEIGHT: f64 = 2.5;
const PENALTY_WEIGHT: f64 = 1.8;
const EXPOSURE_WEIGHT: f64 = 0.3;

/// Jogos retenus dans l'ordre de sélection (le premier est le principal).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub tickets: Vec<Ticket>,
    /// Jogos choisis alors qu'un de leurs numéros avait atteint le plafond.
    pub relaxed_picks: usize,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    ticket: Ticket,
    penalty: f64,
}

/// État courant du lot : paires/triplets couverts et exposition par numéro.
struct Coverage {
    selected: Vec<Ticket>,
    pairs: HashSet<[u8; 2]>,
    triples: HashSet<[u8; 3]>,
    exposure: [usize; UNIVERSE_MAX as usize + 1],
    cap: usize,
    relaxed_picks: usize,
}

impl Coverage {
    fn new(cap: usize) -> Self {
        Self {
            selected: Vec::new(),
            pairs: HashSet::new(),
            triples: HashSet::new(),
            exposure: [0; UNIVERSE_MAX as usize + 1],
            cap: cap.max(1),
            relaxed_picks: 0,
        }
    }

    fn len(&self) -> usize {
        self.selected.len()
    }

    fn is_feasible(&self, ticket: &Ticket) -> bool {
        ticket
            .numbers()
            .iter()
            .all(|&n| self.exposure[n as usize] < self.cap)
    }

    /// Nouveauté de couverture, chevauchement et pénalité, sans terme d'exposition.
    fn coverage_score(&self, candidate: &Candidate) -> f64 {
        let ticket = &candidate.ticket;
        let new_pairs = ticket.pairs().filter(|p| !self.pairs.contains(p)).count();
        let new_triples = ticket.triples().filter(|t| !self.triples.contains(t)).count();
        let overlap: f64 = self.selected.iter().map(|s| ticket.jaccard(s)).sum();

        PAIR_WEIGHT * new_pairs as f64 + TRIPLE_WEIGHT * new_triples as f64
            - OVERLAP_WEIGHT * overlap
            - PENALTY_WEIGHT * candidate.penalty
    }

    fn exposure_load(&self, ticket: &Ticket) -> f64 {
        ticket
            .numbers()
            .iter()
            .map(|&n| self.exposure[n as usize] as f64 / self.cap as f64)
            .sum()
    }

    fn score(&self, candidate: &Candidate) -> f64 {
        self.coverage_score(candidate) - EXPOSURE_WEIGHT * self.exposure_load(&candidate.ticket)
    }

    fn record(&mut self, ticket: Ticket) {
        if !self.is_feasible(&ticket) {
            self.relaxed_picks += 1;
        }
        self.pairs.extend(ticket.pairs());
        self.triples.extend(ticket.triples());
        for &n in ticket.numbers() {
            self.exposure[n as usize] += 1;
        }
        self.selected.push(ticket);
    }

    fn into_selection(self) -> Selection {
        Selection {
            tickets: self.selected,
            relaxed_picks: self.relaxed_picks,
        }
    }
}

/// Premier candidat de la fenêtre au score strictement maximal.
///
/// `score` renvoie `None` pour écarter un candidat.
fn best_in_window<F>(window: &[usize], remaining: &[Candidate], mut score: F) -> Option<usize>
where
    F: FnMut(&Candidate) -> Option<f64>,
{
    let mut best: Option<(usize, f64)> = None;
    for &i in window {
        let Some(s) = score(&remaining[i]) else {
            continue;
        };
        if best.map_or(true, |(_, b)| s > b) {
            best = Some((i, s));
        }
    }
    best.map(|(i, _)| i)
}

/// Sélection gloutonne : couverture de paires/triplets + diversité entre jogos,
/// sous plafond d'exposition par numéro.
pub fn select_batch<R: RngCore + ?Sized>(
    pool: &CandidatePool,
    n_games: usize,
    balanced: bool,
    config: &GenerationConfig,
    rng: &mut R,
) -> Selection {
    let settings = config.settings();
    let mut remaining: Vec<Candidate> = pool
        .tickets()
        .iter()
        .map(|&ticket| Candidate {
            ticket,
            penalty: penalty(&ticket, &settings),
        })
        .collect();
    let mut coverage = Coverage::new(config.exposure_cap(n_games, balanced));

    while coverage.len() < n_games {
        let window = sample_indices(rng, remaining.len(), config.candidates_per_pick);
        if window.is_empty() {
            break;
        }

        let feasible = best_in_window(&window, &remaining, |c| {
            coverage.is_feasible(&c.ticket).then(|| coverage.score(c))
        });
        let pick = match (feasible, config.exposure_policy) {
            (Some(i), _) => i,
            (None, ExposurePolicy::Lenient) => {
                match best_in_window(&window, &remaining, |c| Some(coverage.score(c))) {
                    Some(i) => i,
                    None => break,
                }
            }
            (None, ExposurePolicy::Strict) => {
                log::debug!(
                    "Aucun candidat sous le plafond {} au jogo {}",
                    coverage.cap,
                    coverage.len() + 1
                );
                break;
            }
        };

        let chosen = remaining.remove(pick);
        coverage.record(chosen.ticket);
    }

    if config.exposure_policy == ExposurePolicy::Lenient {
        top_up(&mut remaining, &mut coverage, n_games, config, rng);
    }

    if coverage.relaxed_picks > 0 {
        log::warn!(
            "{} jogo(s) retenu(s) au-delà du plafond d'exposition {}",
            coverage.relaxed_picks,
            coverage.cap
        );
    }

    coverage.into_selection()
}

/// Complète le lot sans tenir compte de l'exposition.
fn top_up<R: RngCore + ?Sized>(
    remaining: &mut Vec<Candidate>,
    coverage: &mut Coverage,
    n_games: usize,
    config: &GenerationConfig,
    rng: &mut R,
) {
    while coverage.len() < n_games && !remaining.is_empty() {
        let window = sample_indices(rng, remaining.len(), config.candidates_per_pick);
        let Some(pick) = best_in_window(&window, remaining, |c| Some(coverage.coverage_score(c)))
        else {
            break;
        };
        let chosen = remaining.remove(pick);
        coverage.record(chosen.ticket);
    }
}
