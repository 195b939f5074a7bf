use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use megasena_core::hits::{HitReport, PrizeTier};
use megasena_core::penalty::penalty;
use megasena_core::{Batch, GenerationConfig, Profile, Ticket, TICKET_SIZE};

pub struct BatchHeader {
    pub concurso: u32,
    pub requested: usize,
    pub flags: Vec<String>,
}

fn join_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:02}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

/// Une ligne `- Jogo i: 04 - 17 - ...` par jogo, dans l'ordre d'affichage
/// (ou trié si `sort_output`).
pub fn format_games(batch: &Batch, sort_output: bool) -> String {
    batch
        .games()
        .iter()
        .enumerate()
        .map(|(i, game)| {
            let numbers: [u8; TICKET_SIZE] = if sort_output {
                *game.ticket.numbers()
            } else {
                game.display
            };
            format!("- Jogo {}: {}", i + 1, join_numbers(&numbers))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_header(header: &BatchHeader) -> String {
    let mut line = format!("Jogos recommandés pour le concours {}", header.concurso);
    if !header.flags.is_empty() {
        line.push_str(&format!(" ({})", header.flags.join(", ")));
    }
    line.push(':');
    line
}

pub fn display_batch(batch: &Batch, header: &BatchHeader, config: &GenerationConfig, table: bool) {
    println!("{}", format_header(header));

    if batch.is_empty() {
        println!("Aucun jogo généré.");
        return;
    }

    if table {
        display_batch_table(batch, config);
    } else {
        println!("{}", format_games(batch, !config.display_shuffle));
    }

    if batch.is_short(header.requested) {
        println!(
            "\n⚠ Seulement {} jogo(s) sur {} demandés : contraintes trop serrées.",
            batch.len(),
            header.requested
        );
    }
    if batch.relaxed_picks() > 0 {
        println!(
            "⚠ {} jogo(s) dépassent le plafond d'exposition (mode balanceado relâché).",
            batch.relaxed_picks()
        );
    }
}

fn display_batch_table(batch: &Batch, config: &GenerationConfig) {
    let settings = config.settings();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Dezenas", "Somme", "Impaires", "≥ 41", "Pénalité"]);

    for (i, game) in batch.games().iter().enumerate() {
        let numbers = if config.display_shuffle {
            game.display
        } else {
            *game.ticket.numbers()
        };
        table.add_row(vec![
            format!("{}", i + 1),
            join_numbers(&numbers),
            game.ticket.sum().to_string(),
            game.ticket.odd_count().to_string(),
            game.ticket.high_count().to_string(),
            format!("{:.3}", penalty(&game.ticket, &settings)),
        ]);
    }
    println!("{table}");
}

pub fn display_hits(batch: &Batch, drawn: &Ticket, report: &HitReport) {
    println!("\n🎯 Résultat : {}\n", drawn);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Jogo", "Dezenas", "Acertos", "Faixa"]);

    for (i, (game, &hits)) in batch.games().iter().zip(report.per_game.iter()).enumerate() {
        let tier = PrizeTier::from_hits(hits);
        let color = if tier.is_some() { Color::Green } else { Color::White };
        table.add_row(vec![
            Cell::new(format!("{}", i + 1)),
            Cell::new(game.ticket.to_string()),
            Cell::new(hits.to_string()).fg(color),
            Cell::new(tier.map(|t| t.to_string()).unwrap_or_else(|| "—".to_string())).fg(color),
        ]);
    }
    println!("{table}");

    match report.best_index {
        Some(best) => println!(
            "\nMeilleur jogo : #{} avec {} acerto(s){}",
            best,
            report.max_hits,
            report
                .best_tier()
                .map(|t| format!(" ({t})"))
                .unwrap_or_default()
        ),
        None => println!("\nAucun jogo à comparer."),
    }
}

pub fn display_profiles() {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Profil",
            "Somme visée",
            "Poids somme",
            "Cible bas/milieu/haut",
            "Poids tranches",
            "Min ≥ 41",
        ]);

    for profile in Profile::ALL {
        let s = profile.defaults();
        table.add_row(vec![
            profile.to_string(),
            format!("{:.1}", s.sum_target),
            format!("{:.2}", s.sum_weight),
            format!(
                "{:.2} / {:.2} / {:.2}",
                s.bucket_target[0], s.bucket_target[1], s.bucket_target[2]
            ),
            format!("{:.2}", s.bucket_weight),
            s.min_high.to_string(),
        ]);
    }
    println!("{table}");
}
