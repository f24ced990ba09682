use std::path::PathBuf;

use clap::Parser;
use tmx_lite::{load_map, MapData, DEFAULT_MAP_PATH};

/// Loads TMX maps and prints a one-line summary of each.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maps to load. Defaults to the game's starting map.
    files: Vec<PathBuf>,

    /// Also list every layer and map property.
    #[arg(short, long)]
    verbose: bool,
}

fn summary(map: &MapData) -> String {
    format!(
        "Loaded {}x{} map with {} layers.",
        map.width,
        map.height,
        map.layer_count()
    )
}

fn print_details(map: &MapData) {
    for layer in &map.layers {
        println!("  layer '{}': {} tiles", layer.name, layer.ids.len());
    }

    let mut properties: Vec<_> = map.properties.iter().collect();
    properties.sort();
    for (key, value) in properties {
        println!("  property {key} = {value}");
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let files = if args.files.is_empty() {
        vec![PathBuf::from(DEFAULT_MAP_PATH)]
    } else {
        args.files
    };

    let mut failed = 0;
    for file in &files {
        match load_map(file) {
            Ok(map) => {
                println!("{}", summary(&map));
                if args.verbose {
                    print_details(&map);
                }
            }
            Err(e) => {
                failed += 1;
                eprintln!("\x1b[31mFAILED loading {file:#?}\x1b[0m");
                eprintln!("{:?}", miette::Report::new(e));
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} maps failed to load", files.len());
    }

    Ok(())
}
