//! Source pseudo-aléatoire du lot et primitives de tirage versionnées.
//!
//! Le flux est ChaCha8 initialisé avec le SHA-256 de la graine textuelle : il ne
//! dépend ni de la plateforme ni de l'algorithme derrière `StdRng`. Les
//! mélanges sont des Fisher–Yates explicites bâtis sur `next_u64`, pour que
//! l'ordre des candidats (et donc le départage des égalités) reste stable.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

pub type GameRng = ChaCha8Rng;

/// Générateur déterministe dérivé uniquement de la graine textuelle.
pub fn rng_from_seed(seed: &str) -> GameRng {
    let digest: [u8; 32] = Sha256::digest(seed.as_bytes()).into();
    ChaCha8Rng::from_seed(digest)
}

/// Entier uniforme dans `0..bound` (multiplication élargie + rejet).
///
/// `bound` doit être non nul.
pub fn below<R: RngCore + ?Sized>(rng: &mut R, bound: usize) -> usize {
    debug_assert!(bound > 0);
    let range = bound as u64;
    let threshold = range.wrapping_neg() % range;
    loop {
        let m = rng.next_u64() as u128 * range as u128;
        if (m as u64) >= threshold {
            return (m >> 64) as usize;
        }
    }
}

/// Fisher–Yates complet.
pub fn shuffle<T, R: RngCore + ?Sized>(rng: &mut R, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = below(rng, i + 1);
        items.swap(i, j);
    }
}

/// Fisher–Yates partiel : les `amount` premiers éléments forment un
/// échantillon sans remise, dans l'ordre de tirage.
pub fn partial_shuffle<'a, T, R: RngCore + ?Sized>(
    rng: &mut R,
    items: &'a mut [T],
    amount: usize,
) -> &'a mut [T] {
    let amount = amount.min(items.len());
    let len = items.len();
    for i in 0..amount {
        let j = i + below(rng, len - i);
        items.swap(i, j);
    }
    &mut items[..amount]
}

/// Indices de `amount` éléments parmi `len`, sans remise.
pub fn sample_indices<R: RngCore + ?Sized>(rng: &mut R, len: usize, amount: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    let amount = partial_shuffle(rng, &mut indices, amount).len();
    indices.truncate(amount);
    indices
}
