use std::path::PathBuf;

use clap::Parser;
use rod_optimizer::config::parse_raw_length;
use rod_optimizer::render;
use rod_optimizer::types::{DEFAULT_RAW_LENGTH, OptimizeRequest, ProjectSummary};
use rod_optimizer::{Optimizer, ProductCatalog};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "rod_optimizer",
    about = "Window-frame rod cutting optimizer"
)]
struct Cli {
    /// Product catalog JSON (vendor -> window type -> category -> products)
    #[arg(long, default_value = "window_data.json")]
    catalog: PathBuf,

    /// Optimization request JSON with a `configurations` list
    #[arg(long, required_unless_present = "list_catalog")]
    request: Option<PathBuf>,

    /// Length of one fresh rod
    #[arg(long, default_value_t = DEFAULT_RAW_LENGTH, value_parser = parse_raw_length)]
    raw_length: f64,

    /// Print the project summary as JSON
    #[arg(long)]
    json: bool,

    /// Show ASCII layout of each rod
    #[arg(long)]
    layout: bool,

    /// Print the catalog and exit
    #[arg(long)]
    list_catalog: bool,

    /// Log each packed material group
    #[arg(long, short)]
    verbose: bool,
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let catalog = ProductCatalog::load(&cli.catalog).unwrap_or_else(|e| fail(e));

    if cli.list_catalog {
        let json = serde_json::to_string_pretty(catalog.list()).unwrap_or_else(|e| fail(e));
        println!("{json}");
        return;
    }

    let Some(request_path) = cli.request else {
        fail("--request is required");
    };
    let request: OptimizeRequest = std::fs::read_to_string(&request_path)
        .map_err(|e| e.to_string())
        .and_then(|body| serde_json::from_str(&body).map_err(|e| e.to_string()))
        .unwrap_or_else(|e| fail(format!("{}: {}", request_path.display(), e)));

    let optimizer =
        Optimizer::with_raw_length(&catalog, cli.raw_length).unwrap_or_else(|e| fail(e));
    let summary = optimizer
        .optimize(&request.configurations)
        .unwrap_or_else(|e| fail(e));

    if cli.json {
        let json = serde_json::to_string_pretty(&summary).unwrap_or_else(|e| fail(e));
        println!("{json}");
    } else {
        print_summary(&summary, cli.raw_length, cli.layout);
    }
}

fn print_summary(summary: &ProjectSummary, raw_length: f64, layout: bool) {
    for material in &summary.materials {
        let group = &material.group;
        println!("{} ({}, {}):", group.description, group.code, group.vendor);
        for (i, rod) in material.rods_used.iter().enumerate() {
            let cuts: Vec<String> = rod.pieces.iter().map(|p| format!("{:.2}", p.length)).collect();
            print!("  Rod {}: {}", i + 1, cuts.join(" "));
            if rod.leftover > 0.0 {
                print!(" [leftover {:.2}]", rod.leftover);
            }
            println!();
            if layout {
                print!("{}", render::render_rod(raw_length, rod));
            }
        }
        for event in &material.reused {
            println!(
                "  Reused: {:.2} {} from leftover {:.2}",
                event.length, event.kind, event.remnant_length
            );
        }
        println!(
            "  Length {:.2}, rods {}, wastage {:.2}, price/ft {:.2}, price/rod {:.2}, wastage cost {:.2}",
            material.total_length,
            material.total_rods_required,
            material.total_wastage,
            material.priced_by_length,
            material.priced_by_rod,
            material.wastage_cost,
        );
        println!();
    }

    for (code, lengths) in summary.remnants.iter() {
        let lengths: Vec<String> = lengths.iter().map(|l| format!("{l:.2}")).collect();
        println!("Leftovers {}: {}", code, lengths.join(", "));
    }

    println!(
        "Summary: {} material{}, {} rod{} used, {:.2} wastage ({:.1}%), price/ft {:.2}, price/rod {:.2}, wastage cost {:.2}",
        summary.total_unique_materials,
        if summary.total_unique_materials == 1 { "" } else { "s" },
        summary.total_rods_used,
        if summary.total_rods_used == 1 { "" } else { "s" },
        summary.total_wastage,
        summary.waste_percent(raw_length),
        summary.total_priced_by_length,
        summary.total_priced_by_rod,
        summary.total_wastage_cost,
    );
}
