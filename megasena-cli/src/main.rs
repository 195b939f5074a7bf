mod bets_file;
mod config_file;
mod display;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::builder::{BoolishValueParser, FalseyValueParser};
use clap::{Args, Parser, Subcommand};
use rand::Rng;

use megasena_core::hits::evaluate_hits;
use megasena_core::seed::{compose_seed, novos_salt};
use megasena_core::{generate, Batch, GenerationConfig, Profile, ProfileOverrides, Ticket};

use crate::bets_file::{bets_path, load_bets, save_bets, SavedBets};
use crate::display::{display_batch, display_hits, display_profiles, BatchHeader};

#[derive(Parser)]
#[command(name = "megasena", about = "Générateur de jogos Mega-Sena")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Générer les jogos recommandés pour un concours
    Generate {
        #[command(flatten)]
        args: GenerationArgs,

        /// Afficher un tableau détaillé (somme, hautes, pénalité)
        #[arg(long)]
        table: bool,
    },

    /// Comparer les jogos enregistrés d'un concours au résultat tiré
    Check {
        #[command(flatten)]
        args: GenerationArgs,

        /// Les 6 dezenas tirées
        #[arg(long, num_args = 6, required = true)]
        drawn: Vec<u8>,
    },

    /// Afficher les valeurs par défaut de chaque profil
    Profiles,

    /// Écrire la configuration par défaut dans un fichier JSON
    Config {
        /// Fichier de sortie
        #[arg(short, long, default_value = "megasena.json")]
        output: PathBuf,

        /// Profil de départ
        #[arg(short, long, default_value = "historico")]
        profile: Profile,
    },
}

#[derive(Args, Debug)]
struct GenerationArgs {
    /// Numéro du concours
    #[arg(short, long)]
    concurso: u32,

    /// Suffixe de la graine (défaut : date du jour AAAA-MM-JJ)
    #[arg(long)]
    suffix: Option<String>,

    /// Nouvelle graine aléatoire : jogos différents à chaque appel
    #[arg(long)]
    novos: bool,

    /// Nombre de jogos
    #[arg(short = 'n', long = "games", env = "SURPRESINHA_COUNT", default_value = "10")]
    games: usize,

    /// Limiter chaque dezena à un seul jogo quand c'est possible
    #[arg(long, env = "SURPRESINHA_BALANCED", value_parser = FalseyValueParser::new())]
    balanced: bool,

    /// Mélanger l'ordre d'affichage des dezenas
    #[arg(long, env = "SURPRESINHA_SHUFFLE", value_parser = BoolishValueParser::new())]
    shuffle: Option<bool>,

    /// Profil : historico, misto, alto (inconnu → historico)
    #[arg(short, long, env = "SURPRESINHA_PROFILE")]
    profile: Option<String>,

    /// Minimum de dezenas >= 41 (jamais sous le minimum du profil)
    #[arg(long)]
    min_high: Option<usize>,

    /// Somme visée
    #[arg(long)]
    sum_target: Option<f64>,

    /// Poids de l'écart à la somme visée (0 désactive)
    #[arg(long)]
    sum_weight: Option<f64>,

    /// Poids de l'écart de répartition bas/milieu/haut
    #[arg(long)]
    bucket_weight: Option<f64>,

    /// Configuration JSON de base
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dossier des jogos enregistrés (bets_<concurso>.json)
    #[arg(long, env = "MEGASENA_DATA_DIR", default_value = "./state")]
    data_dir: PathBuf,
}

impl GenerationArgs {
    fn profile(&self) -> Option<Profile> {
        let name = self.profile.as_deref()?;
        let profile = Profile::resolve(name);
        if profile.name() != name.trim().to_lowercase() {
            log::warn!("Profil inconnu '{name}', utilisation de '{profile}'");
        }
        Some(profile)
    }

    fn overrides(&self) -> ProfileOverrides {
        ProfileOverrides {
            sum_target: self.sum_target,
            sum_weight: self.sum_weight.map(|w| w.max(0.0)),
            bucket_target: None,
            bucket_weight: self.bucket_weight.map(|w| w.max(0.0)),
            min_high: self.min_high,
        }
    }

    fn generation_config(&self) -> Result<GenerationConfig> {
        let mut config = match &self.config {
            Some(path) => config_file::load_config(path)?,
            None => GenerationConfig::default(),
        };
        if let Some(profile) = self.profile() {
            config.profile = profile;
        }
        if let Some(shuffle) = self.shuffle {
            config.display_shuffle = shuffle;
        }
        config.apply_overrides(&self.overrides());
        Ok(config)
    }

    fn seed(&self) -> String {
        let suffix = self.suffix.clone().unwrap_or_else(today);
        let salt = if self.novos {
            let token: u32 = rand::rng().random_range(0..=1_000_000);
            novos_salt(&chrono::Local::now().to_rfc3339(), token)
        } else {
            String::new()
        };
        compose_seed(self.concurso, &suffix, &salt)
    }

    fn flags(&self, config: &GenerationConfig) -> Vec<String> {
        let mut flags = Vec::new();
        if self.novos {
            flags.push("novos".to_string());
        }
        if self.balanced {
            flags.push("balanceados".to_string());
        }
        if self.profile.is_some() {
            flags.push(format!("perfil={}", config.profile));
        }
        if let Some(min_high) = self.min_high {
            flags.push(format!("min_high={min_high}"));
        }
        flags
    }
}

fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate { args, table } => cmd_generate(&args, table),
        Command::Check { args, drawn } => cmd_check(&args, &drawn),
        Command::Profiles => {
            display_profiles();
            Ok(())
        }
        Command::Config { output, profile } => {
            let config = GenerationConfig::for_profile(profile, &ProfileOverrides::default());
            config_file::save_config(&output, &config)?;
            println!("Configuration écrite dans {}", output.display());
            Ok(())
        }
    }
}

fn cmd_generate(args: &GenerationArgs, table: bool) -> Result<()> {
    let config = args.generation_config()?;
    let seed = args.seed();
    log::info!("Graine : {seed}");

    let batch = generate(&seed, args.games, args.balanced, &config);

    let header = BatchHeader {
        concurso: args.concurso,
        requested: args.games,
        flags: args.flags(&config),
    };
    display_batch(&batch, &header, &config, table);

    let path = save_bets(&args.data_dir, &SavedBets::from_batch(args.concurso, &batch))?;
    log::info!("Jogos enregistrés dans {}", path.display());
    Ok(())
}

fn cmd_check(args: &GenerationArgs, drawn: &[u8]) -> Result<()> {
    let drawn = Ticket::new(drawn)?;
    let batch = bets_to_check(args)?;
    let report = evaluate_hits(&drawn, &batch);
    display_hits(&batch, &drawn, &report);
    Ok(())
}

/// Jogos enregistrés par `generate` ; à défaut, régénération depuis une graine
/// explicite (`--suffix` sans `--novos`).
fn bets_to_check(args: &GenerationArgs) -> Result<Batch> {
    if let Some(saved) = load_bets(&args.data_dir, args.concurso)? {
        log::info!("{} jogo(s) enregistrés pour le concours {}", saved.bets.len(), args.concurso);
        return saved.to_batch();
    }

    let path = bets_path(&args.data_dir, args.concurso);
    if args.novos || args.suffix.is_none() {
        bail!(
            "Aucun jogo enregistré dans {} ; relancez avec --suffix pour régénérer le lot",
            path.display()
        );
    }
    log::warn!("{} absent : régénération depuis la graine", path.display());
    let config = args.generation_config()?;
    Ok(generate(&args.seed(), args.games, args.balanced, &config))
}
