//! Snitch topology CLI.
//!
//! This binary builds the chip topology from the default architecture, an optional JSON file,
//! and `-p name=value` property overrides. It performs:
//! 1. **Map:** Print the global layout and every top-level router table, or the whole topology
//!    as JSON.
//! 2. **Route:** Follow one address hop by hop from the narrow or wide plane to its device.
//! 3. **Properties:** List the declared properties with their effective values.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use snitchsim_core::config::PropertyRegistry;
use snitchsim_core::{ArchProperties, ChipArch, Topology, TopologyBuilder, TopologyError};

#[derive(Parser, Debug)]
#[command(
    name = "snitchsim",
    author,
    version,
    about = "Snitch chip address map and interconnect topology",
    long_about = "Build the board/chip/soc topology of a multi-cluster Snitch chip and inspect it.\n\nExamples:\n  snitchsim map\n  snitchsim -p soc/nb_cluster=4 map --json\n  snitchsim route 0x10041234\n  snitchsim --config arch.json route 0x80000100 --plane wide"
)]
struct Cli {
    /// JSON architecture file; defaults are used for missing keys.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Property override, e.g. `hbm_type=dramsys`. Repeatable.
    #[arg(short = 'p', long = "property", value_name = "NAME=VALUE", global = true)]
    properties: Vec<String>,

    /// Binary handed to the loader.
    #[arg(long, global = true)]
    binary: Option<PathBuf>,

    /// Log build steps (same as RUST_LOG=debug).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the chip layout and router tables.
    Map {
        /// Print the whole topology as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Route an address to the device that services it.
    Route {
        /// Address, decimal or 0x-prefixed hex.
        #[arg(value_parser = parse_addr)]
        addr: u64,

        /// Plane the access enters on.
        #[arg(long, value_enum, default_value_t = Plane::Narrow)]
        plane: Plane,
    },

    /// List declared properties.
    Properties,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Plane {
    Narrow,
    Wide,
}

fn parse_addr(raw: &str) -> Result<u64, String> {
    let digits: String = raw.chars().filter(|&c| c != '_').collect();
    let parsed = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => digits.parse(),
    };
    parsed.map_err(|e| format!("invalid address '{raw}': {e}"))
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), TopologyError> {
    let (props, registry) = load_properties(cli)?;

    if matches!(cli.command, Commands::Properties) {
        print_properties(&registry);
        return Ok(());
    }

    let arch = ChipArch::compute_layout(&props)?;
    let mut builder = TopologyBuilder::new(&arch);
    if let Some(binary) = &cli.binary {
        builder = builder.with_binary(binary.clone());
    }
    let topology = builder.build()?;

    match cli.command {
        Commands::Map { json: true } => {
            let text = serde_json::to_string_pretty(&topology)
                .map_err(snitchsim_core::ConfigError::from)?;
            println!("{text}");
        }
        Commands::Map { json: false } => print_map(&topology)?,
        Commands::Route { addr, plane } => {
            let route = match plane {
                Plane::Narrow => topology.resolve_narrow(addr)?,
                Plane::Wide => topology.resolve_wide(addr)?,
            };
            println!("{route}");
            if let Some(latency) = route.attrs.latency {
                println!("  latency: {latency} cycles");
            }
        }
        Commands::Properties => {}
    }
    Ok(())
}

fn load_properties(cli: &Cli) -> Result<(ArchProperties, PropertyRegistry), TopologyError> {
    let props = match &cli.config {
        Some(path) => ArchProperties::from_file(path)?,
        None => ArchProperties::default(),
    };
    let mut registry = PropertyRegistry::new();
    for pair in &cli.properties {
        registry.set_override_pair(pair)?;
    }
    let props = props.declare(&mut registry)?;
    registry.finish()?;
    Ok((props, registry))
}

fn print_properties(registry: &PropertyRegistry) {
    for prop in registry.describe() {
        let marker = if prop.overridden { "*" } else { " " };
        println!(
            "{marker} {:<24} {:<14} {}",
            prop.decl.name, prop.value, prop.decl.description
        );
        if let Some(allowed) = &prop.decl.allowed {
            println!("  {:<24} allowed: {}", "", allowed.join(", "));
        }
    }
}

fn print_map(topology: &Topology) -> Result<(), TopologyError> {
    let arch = topology.arch();
    println!("Layout");
    println!("  bootrom   {}", arch.bootrom);
    println!("  hbm       {} ({})", arch.hbm, arch.hbm_type);
    println!("  entry     {:#x}", arch.loader_entry);
    for cluster in &arch.clusters {
        println!(
            "  cluster {:<2} {}  harts {}..{}",
            cluster.id, cluster.region, cluster.hart_ids.start, cluster.hart_ids.end
        );
    }

    for router in [topology.narrow(), topology.wide()] {
        let bandwidth = topology.graph().router(router)?.bandwidth();
        println!();
        println!("{} ({bandwidth} B/cycle)", topology.path(router));
        for row in topology.address_map(router)? {
            println!(
                "  {:<34} {:<12} -> {}{}",
                row.range.to_string(),
                row.port,
                row.target,
                if row.rebase { "  [rebase]" } else { "" }
            );
        }
    }
    Ok(())
}
