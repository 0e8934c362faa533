use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use podcycle::{cli, config, context::AppContext, error, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Path of the credentials document
    #[clap(long)]
    credentials: Option<PathBuf>,

    /// Maximum number of play commands in flight at once
    #[clap(long)]
    max_concurrent: Option<usize>,

    /// Stop after this many cycles instead of running until disabled
    #[clap(long)]
    cycles: Option<u64>,

    /// Do not start librespot
    #[clap(long)]
    no_renderer: bool,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Some(Command::Completions(opt)) = cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = config::load_env().await {
        warning!("Could not load environment file ({}), using defaults.", e);
    }

    let mut settings = config::Settings::from_env();
    if let Some(path) = cli.credentials {
        settings.credentials_path = path;
    }
    if let Some(max_concurrent) = cli.max_concurrent {
        settings.max_concurrent = max_concurrent;
    }
    settings.max_cycles = cli.cycles;
    settings.launch_renderer = !cli.no_renderer;

    let ctx = AppContext::new(settings);
    if let Err(e) = cli::play(&ctx).await {
        error!("{}", e);
    }
}
