use anyhow::{bail, Result};

/// Plus grand numéro de l'univers (1..=60).
pub const UNIVERSE_MAX: u8 = 60;
/// Nombre de dezenas par jogo.
pub const TICKET_SIZE: usize = 6;

/// Numéros « hauts » : à partir de 41.
pub const HIGH_FROM: u8 = 41;

/// Tous les numéros de l'univers, dans l'ordre croissant.
pub fn universe() -> [u8; UNIVERSE_MAX as usize] {
    std::array::from_fn(|i| (i + 1) as u8)
}

/// Décennie 0..6 : 1-10, 11-20, ..., 51-60.
pub fn decile(n: u8) -> usize {
    ((n - 1) / 10) as usize
}

/// Tranche 0..3 : bas (1-20), milieu (21-40), haut (41-60).
pub fn bucket(n: u8) -> usize {
    ((n - 1) / 20) as usize
}

/// Un jogo sous forme canonique : 6 numéros distincts, triés par ordre croissant.
///
/// C'est la seule identité utilisée pour la validité, le score, la couverture
/// et la déduplication. L'ordre d'affichage vit dans [`Game`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket([u8; TICKET_SIZE]);

impl Ticket {
    /// Construit un jogo depuis une saisie externe (1-60, 6 numéros, pas de doublons).
    pub fn new(numbers: &[u8]) -> Result<Self> {
        if numbers.len() != TICKET_SIZE {
            bail!("Un jogo contient exactement {} dezenas (reçu {})", TICKET_SIZE, numbers.len());
        }
        for &n in numbers {
            if n < 1 || n > UNIVERSE_MAX {
                bail!("Dezena {} hors limites (1-{})", n, UNIVERSE_MAX);
            }
        }
        let mut sorted = [0u8; TICKET_SIZE];
        sorted.copy_from_slice(numbers);
        sorted.sort_unstable();
        if let Some(w) = sorted.windows(2).find(|w| w[0] == w[1]) {
            bail!("Dezena en double : {}", w[0]);
        }
        Ok(Self(sorted))
    }

    /// Tirage interne : les numéros viennent de l'univers et sont déjà distincts.
    pub(crate) fn from_draw(mut numbers: [u8; TICKET_SIZE]) -> Self {
        numbers.sort_unstable();
        Self(numbers)
    }

    pub fn numbers(&self) -> &[u8; TICKET_SIZE] {
        &self.0
    }

    pub fn contains(&self, n: u8) -> bool {
        self.0.binary_search(&n).is_ok()
    }

    pub fn sum(&self) -> u32 {
        self.0.iter().map(|&n| n as u32).sum()
    }

    pub fn odd_count(&self) -> usize {
        self.0.iter().filter(|&&n| n % 2 == 1).count()
    }

    pub fn mult5_count(&self) -> usize {
        self.0.iter().filter(|&&n| n % 5 == 0).count()
    }

    pub fn count_above(&self, threshold: u8) -> usize {
        self.0.iter().filter(|&&n| n > threshold).count()
    }

    pub fn high_count(&self) -> usize {
        self.0.iter().filter(|&&n| n >= HIGH_FROM).count()
    }

    pub fn decile_counts(&self) -> [usize; 6] {
        let mut counts = [0usize; 6];
        for &n in &self.0 {
            counts[decile(n)] += 1;
        }
        counts
    }

    /// Comptage par chiffre final (`n % 10`).
    pub fn ending_counts(&self) -> [usize; 10] {
        let mut counts = [0usize; 10];
        for &n in &self.0 {
            counts[(n % 10) as usize] += 1;
        }
        counts
    }

    pub fn bucket_counts(&self) -> [usize; 3] {
        let mut counts = [0usize; 3];
        for &n in &self.0 {
            counts[bucket(n)] += 1;
        }
        counts
    }

    /// Vrai si la forme triée contient au moins `len` entiers consécutifs.
    pub fn has_run(&self, len: usize) -> bool {
        let mut run = 1;
        for w in self.0.windows(2) {
            if w[1] == w[0] + 1 {
                run += 1;
                if run >= len {
                    return true;
                }
            } else {
                run = 1;
            }
        }
        false
    }

    /// Les 15 paires du jogo, chacune triée.
    pub fn pairs(&self) -> impl Iterator<Item = [u8; 2]> + '_ {
        let t = &self.0;
        (0..TICKET_SIZE).flat_map(move |i| ((i + 1)..TICKET_SIZE).map(move |j| [t[i], t[j]]))
    }

    /// Les 20 triplets du jogo, chacun trié.
    pub fn triples(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        let t = &self.0;
        (0..TICKET_SIZE).flat_map(move |i| {
            ((i + 1)..TICKET_SIZE)
                .flat_map(move |j| ((j + 1)..TICKET_SIZE).map(move |k| [t[i], t[j], t[k]]))
        })
    }

    pub fn common_with(&self, other: &Ticket) -> usize {
        self.0.iter().filter(|&&n| other.contains(n)).count()
    }

    /// Similarité de Jaccard `|A ∩ B| / |A ∪ B|` entre deux jogos.
    pub fn jaccard(&self, other: &Ticket) -> f64 {
        let inter = self.common_with(other);
        let union = 2 * TICKET_SIZE - inter;
        inter as f64 / union as f64
    }
}

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|n| format!("{:02}", n)).collect();
        write!(f, "{}", parts.join(" - "))
    }
}

/// Un jogo retenu : forme canonique + ordre de présentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub ticket: Ticket,
    pub display: [u8; TICKET_SIZE],
}

/// Résultat d'un appel à `generate`, dans l'ordre de sélection.
///
/// Un lot plus court que demandé est un résultat dégradé, pas une erreur.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    games: Vec<Game>,
    relaxed_picks: usize,
}

impl Batch {
    pub fn new(games: Vec<Game>, relaxed_picks: usize) -> Self {
        Self { games, relaxed_picks }
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn tickets(&self) -> impl Iterator<Item = &Ticket> + '_ {
        self.games.iter().map(|g| &g.ticket)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Vrai si le lot contient moins de jogos que demandé.
    pub fn is_short(&self, n_games: usize) -> bool {
        self.games.len() < n_games
    }

    /// Nombre de jogos retenus alors qu'ils dépassaient le plafond d'exposition.
    pub fn relaxed_picks(&self) -> usize {
        self.relaxed_picks
    }

    /// Les jogos dans leur ordre d'affichage, prêts pour la couche de sortie.
    pub fn to_display(&self) -> Vec<[u8; TICKET_SIZE]> {
        self.games.iter().map(|g| g.display).collect()
    }
}
