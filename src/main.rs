#![warn(non_snake_case)]
//! # rpg_mapper command line
//!
//! Generates a map and prints its persisted JSON form to stdout.
//!
//! ```text
//! rpg_mapper [REQUEST.json] [SEED]
//! ```
//!
//! Without a request file a default dungeon is generated. Set `RUST_LOG=info`
//! (or `debug`) to see generation diagnostics on stderr.

use log::info;
use std::error::Error;
use std::fs;

use rpg_mapper::generator::{generate, generate_seeded, GenerationRequest, GeneratorKind, MapSettings};

fn load_request(path: Option<&String>) -> Result<GenerationRequest, Box<dyn Error>> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(GenerationRequest::new(
            GeneratorKind::Dungeon(Default::default()),
            MapSettings::default(),
        )),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging.
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let request = load_request(args.get(1))?;
    let seed = args.get(2).map(|s| s.parse::<u64>()).transpose()?;

    info!("Starting rpg_mapper: {} generator", request.kind.name());
    let map = match seed {
        Some(seed) => generate_seeded(&request, seed)?,
        None => generate(&request, &mut rand::rng())?,
    };

    println!("{}", map.to_json()?);
    info!("Done.");
    Ok(())
}
