use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use folio_app::logging::init_logging;
use folio_app::{ContentFeed, FolioConfig, CONFIG_FILE_NAME};
use folio_theme::{AccentController, AccentId, FileStore, ThemeContext};
use std::path::PathBuf;

/// Default location of the accent store
const DEFAULT_STORE: &str = ".folio/storage.json";

#[derive(Parser)]
#[command(name = "folio", version, about = "Portfolio accent theming and content tools")]
struct Cli {
    /// Config file or directory containing folio.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON file the selected accent is persisted in
    #[arg(long, global = true, default_value = DEFAULT_STORE)]
    store: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the accent palette, marking the selected accent
    Accents,
    /// Print the :root style block for the selected accent
    Css,
    /// Persist an accent and print its style block
    Select {
        /// Accent id (orange, cyan, red, violet)
        id: String,
    },
    /// Validate a content feed
    CheckContent {
        /// Feed file; defaults to [content].path from the config
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    let config = FolioConfig::load_from_dir(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let controller = || {
        AccentController::initialize(
            Box::new(FileStore::new(&cli.store)),
            ThemeContext::new(),
            &config.theme,
        )
    };

    match cli.command {
        Command::Accents => {
            let selected = controller().selected();
            for accent in AccentId::all() {
                let token = accent.token();
                let marker = if *accent == selected { "*" } else { " " };
                println!(
                    "{marker} {:<7} {:<7} {}  {}",
                    accent.id(),
                    token.name(),
                    token.primary,
                    token.gradient
                );
            }
        }

        Command::Css => {
            let controller = controller();
            controller.apply();
            print!("{}", controller.context().to_css());
        }

        Command::Select { id } => {
            let mut controller = controller();
            if !controller.select(&id) {
                let known: Vec<&str> = AccentId::all().iter().map(|a| a.id()).collect();
                bail!("Unknown accent `{}` (expected one of: {})", id, known.join(", "));
            }
            print!("{}", controller.context().to_css());
        }

        Command::CheckContent { file } => {
            let Some(path) = file.or_else(|| config.content.path.clone()) else {
                bail!("No content file given and [content].path is not set");
            };
            let feed = ContentFeed::load(&path)
                .with_context(|| format!("Failed to load content feed {}", path.display()))?;
            let issues = feed.validate();
            if !issues.is_empty() {
                for issue in &issues {
                    eprintln!("{}", issue);
                }
                bail!("{} content issue(s) in {}", issues.len(), path.display());
            }
            println!(
                "{}: ok ({} projects, {} roles, {} skills)",
                path.display(),
                feed.projects.len(),
                feed.experience.len(),
                feed.skills.len()
            );
        }
    }

    Ok(())
}
