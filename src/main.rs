use anyhow::Result;
use clap::Parser;
use hangterm::config::{self, Cli, Commands, Settings};
use hangterm::core::engine::Engine;
use hangterm::HangmanPresenter;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();
    config::init_logging(cli.log_file.as_deref(), cli.log_level)?;

    let settings = Settings::from_cli(&cli)?;

    if cli.command == Some(Commands::List) {
        println!("🎮 Categorías:");
        for category in settings.bank.categories() {
            println!("  • {} ({} palabras)", category.name, category.words.len());
        }
        return Ok(());
    }

    // 1. Rules engine, injected into its presenter
    let engine = settings.into_engine()?;
    let presenter = HangmanPresenter::new(engine);

    // 2. Hand the terminal to the loop
    let mut terminal = ratatui::init();
    let result = Engine::new(presenter).run(&mut terminal);
    ratatui::restore();

    let presenter = result?;
    info!(score = presenter.engine().score(), "session finished");
    println!("Puntuación final: {}", presenter.engine().score());
    Ok(())
}
