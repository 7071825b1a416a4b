use clap::Parser;
use libcat::utils::{logger, validation::Validate};
use libcat::{CliConfig, CsvFileManager, LibraryControl};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting libcat");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let file_manager = CsvFileManager::new(&config.library_file, &config.users_file);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut control = LibraryControl::new(stdin.lock(), stdout.lock(), file_manager);
    control.run()?;

    tracing::info!("libcat finished");
    Ok(())
}
