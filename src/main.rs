use clap::Parser;
use halltab::{Cli, HallTab, HallTabError, OutputFormatter, OutputMode, UserFriendlyError};
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    halltab::ui::init_logging(cli.verbosity_level(), cli.quiet);

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let directory = match cli.directory.clone() {
        Some(directory) => directory,
        None => {
            eprintln!("A directory to scan is required");
            return 2; // clap's usage error code
        }
    };

    let halltab = match HallTab::from_cli(&cli) {
        Ok(halltab) => halltab,
        Err(e) => {
            print_startup_error(&e);
            return exit_code_for(&e);
        }
    };

    if cli.dry_run {
        return handle_dry_run(&directory, &halltab);
    }

    match halltab.extract_directory(&directory) {
        Ok(report) => {
            halltab.output_formatter().print_extraction_report(&report);

            if report.has_warnings() {
                6 // Table written, some reports left out
            } else {
                0
            }
        }
        Err(e) => {
            halltab.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &HallTabError) -> i32 {
    if error.is_invalid_input() {
        return 3;
    }

    match error {
        HallTabError::MalformedFile { .. } => 4,
        HallTabError::Config { .. } => 5,
        _ => 1,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("halltab.toml"));

    match HallTab::generate_sample_config(&config_path) {
        Ok(()) => {
            println!(
                "Generated sample configuration file: {}",
                config_path.display()
            );
            println!("\nTo use this configuration:");
            println!("  halltab <directory> --config {}", config_path.display());
            0
        }
        Err(e) => {
            eprintln!(
                "Failed to generate configuration file: {}",
                e.user_message()
            );
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(directory: &Path, halltab: &HallTab) -> i32 {
    let formatter = halltab.output_formatter();

    formatter.info("DRY RUN MODE - the table will not be written");
    formatter.print_separator();

    let (output_path, reports) = match halltab.plan(directory) {
        Ok(plan) => plan,
        Err(e) => {
            halltab.handle_error(&e);
            return exit_code_for(&e);
        }
    };

    let config = halltab.config();
    println!("  Directory:      {}", directory.display());
    println!("  Output table:   {}", output_path.display());
    println!("  Input suffix:   {}", config.extraction.suffix);
    println!("  On malformed:   {:?}", config.extraction.on_malformed);
    println!("  Reports found:  {}", reports.len());
    for report in &reports {
        println!("    {} ({} bytes)", report.filename, report.size);
    }

    formatter.print_separator();
    formatter.success("Dry run completed successfully");

    0
}

fn print_startup_error(error: &HallTabError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
