//! Command-line entry point: argument parsing, project loading and report output.

use std::path::{Path, PathBuf};
use std::process;

use vrf_sizer::catalog::{Brand, Orientation};
use vrf_sizer::config::ProjectConfig;
use vrf_sizer::io::export::{export_evaporators_csv, export_report_csv};

/// Parsed CLI arguments.
struct CliArgs {
    project_path: Option<String>,
    preset: Option<String>,
    brand: Option<Brand>,
    orientation: Option<Orientation>,
    diversity: Option<String>,
    catalog: Option<String>,
    factors: Option<String>,
    export: Option<String>,
    export_evaporators: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("vrf-sizer: VRF condensing unit sizing");
    eprintln!();
    eprintln!("Usage: vrf-sizer [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --project <path>         Load project from TOML file");
    eprintln!("  --preset <name>          Use a built-in preset (office, residential, max_capacity)");
    eprintln!("  --brand <name>           Override active brand (samsung, daikin)");
    eprintln!("  --orientation <name>     Override orientation (vertical, horizontal)");
    eprintln!("  --diversity <token>      Override diversity (corporate, residential, 1.25, 130%, max)");
    eprintln!("  --catalog <path>         Catalog TOML file");
    eprintln!("  --factors <path>         Diversity factor TOML file");
    eprintln!("  --export <path>          Export the report to CSV");
    eprintln!("  --export-evaporators <path>  Export the evaporator list to CSV");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --project or --preset is given, the office preset is used.");
    eprintln!("Set RUST_LOG to control log output (default: info, on stderr).");
}

/// Returns the value following a flag, or exits with an error.
fn flag_value(args: &[String], i: &mut usize, flag: &str, what: &str) -> String {
    *i += 1;
    if *i >= args.len() {
        eprintln!("error: {flag} requires {what} argument");
        process::exit(1);
    }
    args[*i].clone()
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        project_path: None,
        preset: None,
        brand: None,
        orientation: None,
        diversity: None,
        catalog: None,
        factors: None,
        export: None,
        export_evaporators: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--project" => cli.project_path = Some(flag_value(&args, &mut i, "--project", "a path")),
            "--preset" => cli.preset = Some(flag_value(&args, &mut i, "--preset", "a name")),
            "--brand" => {
                let v = flag_value(&args, &mut i, "--brand", "a name");
                match v.parse::<Brand>() {
                    Ok(b) => cli.brand = Some(b),
                    Err(e) => {
                        eprintln!("error: {e}");
                        process::exit(1);
                    }
                }
            }
            "--orientation" => {
                let v = flag_value(&args, &mut i, "--orientation", "a name");
                match v.parse::<Orientation>() {
                    Ok(o) => cli.orientation = Some(o),
                    Err(e) => {
                        eprintln!("error: {e}");
                        process::exit(1);
                    }
                }
            }
            "--diversity" => {
                cli.diversity = Some(flag_value(&args, &mut i, "--diversity", "a token"));
            }
            "--catalog" => cli.catalog = Some(flag_value(&args, &mut i, "--catalog", "a path")),
            "--factors" => cli.factors = Some(flag_value(&args, &mut i, "--factors", "a path")),
            "--export" => cli.export = Some(flag_value(&args, &mut i, "--export", "a path")),
            "--export-evaporators" => {
                cli.export_evaporators =
                    Some(flag_value(&args, &mut i, "--export-evaporators", "a path"));
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                let v = flag_value(&args, &mut i, "--port", "a u16");
                if let Ok(p) = v.parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{v}\" is not a valid u16");
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = parse_args();
    init_tracing();

    // Load config: --project takes priority, then --preset, then office default
    let mut project = if let Some(ref path) = cli.project_path {
        match ProjectConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match ProjectConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ProjectConfig::office()
    };

    // Apply overrides
    if let Some(brand) = cli.brand {
        project.project.brand = brand;
    }
    if let Some(orientation) = cli.orientation {
        project.project.orientation = orientation;
    }
    if let Some(diversity) = cli.diversity {
        project.project.diversity = diversity;
    }
    if let Some(path) = cli.catalog {
        project.data.catalog = Some(PathBuf::from(path));
    }
    if let Some(path) = cli.factors {
        project.data.factors = Some(PathBuf::from(path));
    }

    // Validate
    let errors = project.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let data = project.load_data();
    #[cfg(feature = "api")]
    let api_data = data.clone();

    let name = project.project.name.clone();
    let session = project.into_session(data);

    for a in session.load_advisories() {
        println!("Notice: {a}");
    }

    println!("Project: {name}");
    println!("Brand:   {} ({})", session.brand(), session.brand().capacity_unit());
    for line in session.selections().items() {
        println!(
            "  {:>3} x {} {} @ {:.1}{}",
            line.quantity,
            line.kind,
            line.nominal,
            line.real_capacity,
            if line.approximated { " (approximated)" } else { "" }
        );
    }
    println!(
        "Total demand: {:.1} ({} units)",
        session.total_demand(),
        session.selections().unit_count()
    );
    println!();

    if let Some(ref path) = cli.export_evaporators {
        if let Err(e) = export_evaporators_csv(session.selections().items(), Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Evaporator list written to {path}");
    }

    match session.report() {
        Some(report) => {
            println!("{report}");
            if let Some(ref path) = cli.export {
                if let Err(e) = export_report_csv(&report, Path::new(path)) {
                    eprintln!("error: failed to write CSV: {e}");
                    process::exit(1);
                }
                eprintln!("Report written to {path}");
            }
        }
        None => println!("No evaporators selected."),
    }

    // Start API server if requested
    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(vrf_sizer::api::AppState::from(api_data));
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(vrf_sizer::api::serve(state, addr)) {
            eprintln!("error: server failed: {e}");
            process::exit(1);
        }
    }
}
