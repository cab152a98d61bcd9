/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::path::PathBuf;
use std::process;

use clap::Parser;
use dimension::{
    HashPolicy, Quantity, Registry, RegistryBuilder, RegistryConfig, UnitError,
};

#[derive(Parser)]
#[clap(version = env!("CARGO_PKG_VERSION"))]
/// Unit converter
///
/// Parses a quantity such as "10 m/s" and converts it to the given
/// unit, or simplifies it when no unit is given.
struct Args {
    /// The quantity to convert.
    quantity: String,
    /// The target unit, e.g. "ft/s".
    target: Option<String>,
    /// Additional unit declarations (JSON).
    #[clap(long)]
    definitions: Option<PathBuf>,
    /// Output the result as JSON.
    #[clap(long)]
    json: bool,
    /// Also print the binary encoding of the result (hex).
    #[clap(long)]
    bytes: bool,
    /// Leave the type tag out of the binary encoding.
    #[clap(long)]
    no_tag: bool,
    /// Increase verbosity. Log messages go to stdout.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    verbosity: u8,
}

fn main() {
    let args = Args::parse();
    init_logger(args.verbosity);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logger(verbosity: u8) {
    if let Err(e) = simplelog::TermLogger::init(
        match verbosity {
            0 => simplelog::LevelFilter::Warn,
            1 => simplelog::LevelFilter::Info,
            2 => simplelog::LevelFilter::Debug,
            3.. => simplelog::LevelFilter::Trace,
        },
        simplelog::ConfigBuilder::new().build(),
        simplelog::TerminalMode::Stdout,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("Error: failed to initialize logging: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), UnitError> {
    let mut builder = RegistryBuilder::standard();
    if let Some(path) = &args.definitions {
        builder.apply_config(&RegistryConfig::from_file(path)?)?;
    }
    let registry: &Registry = builder.build()?.install()?;

    let quantity = registry.parse_quantity(&args.quantity)?;
    let result = match &args.target {
        Some(target) => {
            registry.convert_to(&quantity, &registry.parse_signature(target)?)?
        }
        None => registry.multiply(&quantity, &Quantity::dimensionless(1.0))?,
    };

    match args.json {
        true => println!(
            "{}",
            serde_json::to_string(&result).expect("serialization failed!?")
        ),
        false => println!("{}", result),
    }

    if args.bytes {
        let policy = match args.no_tag {
            true => HashPolicy::NoHash,
            false => HashPolicy::Fnv1a32,
        };
        let bytes = registry.serialize(&result, policy)?;
        println!(
            "{}",
            bytes
                .iter()
                .map(|b| format!("{:02x}", b))
                .collect::<Vec<_>>()
                .join(" ")
        );
    }

    Ok(())
}
