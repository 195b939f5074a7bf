use rand::RngCore;

use crate::config::GenerationConfig;
use crate::models::{Game, Ticket, TICKET_SIZE};
use crate::rng::shuffle;

/// Ordre de présentation d'un jogo : mélangé si `display_shuffle`, sinon croissant.
///
/// Purement cosmétique ; consomme de l'aléa seulement quand le mélange est actif.
pub fn present<R: RngCore + ?Sized>(
    ticket: &Ticket,
    config: &GenerationConfig,
    rng: &mut R,
) -> [u8; TICKET_SIZE] {
    let mut display = *ticket.numbers();
    if config.display_shuffle {
        shuffle(rng, &mut display);
    }
    display
}

pub fn present_game<R: RngCore + ?Sized>(
    ticket: Ticket,
    config: &GenerationConfig,
    rng: &mut R,
) -> Game {
    Game {
        display: present(&ticket, config, rng),
        ticket,
    }
}
