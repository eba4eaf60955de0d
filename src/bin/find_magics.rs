//! Regenerates the slider magic numbers and prints them as Rust arrays.
//!
//! usage: find_magics [seed max_attempts]

use std::env;
use std::process::ExitCode;

use chess_core::board::{AttackTables, MagicSource, Slider, Square, TableConfig};

fn parse_source(args: &[String]) -> Option<MagicSource> {
    match args {
        [_] => Some(MagicSource::default_search()),
        [_, seed, max_attempts] => Some(MagicSource::Search {
            seed: seed.parse().ok()?,
            max_attempts: max_attempts.parse().ok()?,
        }),
        _ => None,
    }
}

fn print_array(name: &str, magics: &[u64]) {
    println!("pub(crate) const {name}: [u64; 64] = [");
    for row in magics.chunks(4) {
        let cells: Vec<String> = row.iter().map(|m| format!("{m:#018x}")).collect();
        println!("    {},", cells.join(", "));
    }
    println!("];");
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let Some(magics) = parse_source(&args) else {
        eprintln!("usage: find_magics [seed max_attempts]");
        return ExitCode::FAILURE;
    };

    // Rooks are searched before bishops from one stream, as a table build
    // with the same seed does.
    let tables = match AttackTables::with_config(&TableConfig { magics }) {
        Ok(tables) => tables,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    for (slider, name) in [
        (Slider::Bishop, "SHIPPED_BISHOP_MAGICS"),
        (Slider::Rook, "SHIPPED_ROOK_MAGICS"),
    ] {
        let magics: Vec<u64> = Square::all().map(|sq| tables.magic(slider, sq)).collect();
        print_array(name, &magics);
        println!();
    }
    ExitCode::SUCCESS
}
