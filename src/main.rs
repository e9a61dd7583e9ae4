use clap::Parser;
use hydro_formats::cli::{args::Args, commands};
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Create cancellation token for coordinating graceful shutdown
        let cancellation_token = CancellationToken::new();

        // Cancel on CTRL+C; the current file is finished before the command returns
        let signal_token = cancellation_token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("\nReceived CTRL+C, finishing the current file...");
                signal_token.cancel();
            }
        });

        commands::run(args, cancellation_token).await
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Hydro Formats - Sobek RR and D-Flow FM model file reader");
    println!("========================================================");
    println!();
    println!("Read the structured text files of hydrological and hydrodynamic models:");
    println!("Sobek RR tagged records, polylines, polygons, samples, time series and");
    println!("structures files.");
    println!();
    println!("USAGE:");
    println!("    hydro-formats <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    inspect       Read one file of any supported kind and summarise it");
    println!("    structures    Read a structures file against a structure schema");
    println!("    import        Import files, directories or glob patterns in one batch");
    println!("    help          Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Summarise a polyline file");
    println!("    hydro-formats inspect weirs.pli");
    println!();
    println!("    # Read structures and print them as JSON");
    println!("    hydro-formats structures structures.ini --format json");
    println!();
    println!("    # Import a model directory relative to a reference date");
    println!("    hydro-formats import model/ --reference-date 2020-01-01");
    println!();
    println!("For more information on a specific command, use:");
    println!("    hydro-formats <COMMAND> --help");
}
