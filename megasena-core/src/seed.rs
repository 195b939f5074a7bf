/// Préfixe des graines produites par la couche appelante.
pub const SEED_PREFIX: &str = "MEGASENA";

/// Graine textuelle d'un concours : `MEGASENA-{concurso}-{suffix}{salt}`.
///
/// `suffix` est en général la date du prochain tirage ; `salt` est vide sauf
/// quand l'appelant veut forcer des jogos différents (voir [`novos_salt`]).
pub fn compose_seed(concurso: u32, suffix: &str, salt: &str) -> String {
    format!("{SEED_PREFIX}-{concurso}-{suffix}{salt}")
}

/// Sel « novos » : horodatage + jeton aléatoire fournis par l'appelant.
pub fn novos_salt(timestamp: &str, token: u32) -> String {
    format!("-NEW-{timestamp}-{token}")
}
