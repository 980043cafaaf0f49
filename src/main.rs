use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use oxidian_launcher::{Note, UrlMode, Vault};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum UrlModeArg {
    Open,
    New,
}

impl From<UrlModeArg> for UrlMode {
    fn from(value: UrlModeArg) -> Self {
        match value {
            UrlModeArg::Open => UrlMode::Open,
            UrlModeArg::New => UrlMode::New,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "oxl",
    version,
    about = "Obsidian vault lookup for command launchers"
)]
struct Cli {
    /// Path to the Obsidian vault.
    #[arg(long, env = "OBSIDIAN_VAULT", global = true)]
    vault: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search notes by name, tag or content.
    Search {
        #[command(subcommand)]
        command: SearchCommand,
    },
    /// Resolve today's daily note.
    Daily {
        /// Print a deep link instead of the file path.
        #[arg(long)]
        url: bool,
    },
    /// Create a note unless it already exists.
    Create {
        /// Note name, relative to the vault, without `.md`.
        name: String,

        /// Print a deep link instead of the file path.
        #[arg(long)]
        url: bool,
    },
    /// Append a line to a note (today's daily note by default).
    Append {
        /// Target note, relative to the vault.
        #[arg(long, default_value = "")]
        file: String,

        /// Text to append.
        content: String,
    },
    /// Build a deep link for a note.
    Url {
        /// Note name or path.
        note: String,

        #[arg(long, value_enum, default_value = "open")]
        mode: UrlModeArg,
    },
}

#[derive(Debug, Subcommand)]
enum SearchCommand {
    /// Fuzzy search by note name.
    Name(SearchArgs),
    /// Notes containing a #tag.
    Tag(SearchArgs),
    /// Notes containing a substring.
    Content(SearchArgs),
}

#[derive(Debug, clap::Args)]
struct SearchArgs {
    /// Query string.
    #[arg(default_value = "")]
    query: String,

    /// Maximum number of results.
    #[arg(long, default_value_t = 20)]
    limit: usize,

    /// Print results as a JSON array.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let vault = Vault::open(require_vault(cli.vault)?)?;

    match cli.command {
        Command::Search { command } => handle_search(&vault, command)?,
        Command::Daily { url } => {
            if url {
                println!("{}", vault.daily_url());
            } else {
                let daily = vault.daily_path();
                println!("{}", daily.path.display());
            }
        }
        Command::Create { name, url } => {
            let path = vault.create_note(&name)?;
            if url {
                println!("{}", vault.url(&path.to_string_lossy(), UrlMode::Open));
            } else {
                println!("{}", path.display());
            }
        }
        Command::Append { file, content } => {
            let path = vault.append_to_note(&file, &content)?;
            println!("{}", path.display());
        }
        Command::Url { note, mode } => println!("{}", vault.url(&note, mode.into())),
    }

    Ok(())
}

fn handle_search(vault: &Vault, command: SearchCommand) -> anyhow::Result<()> {
    let (mut notes, args) = match command {
        SearchCommand::Name(args) => (vault.search_notes(&args.query), args),
        SearchCommand::Tag(args) => (vault.search_tags(&args.query), args),
        SearchCommand::Content(args) => (vault.search_content(&args.query), args),
    };
    notes.truncate(args.limit);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
    } else {
        print_notes(&notes);
    }
    Ok(())
}

fn print_notes(notes: &[Note]) {
    for n in notes {
        println!("{}\t{}\t{}", n.name, n.description, n.path.display());
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn require_vault(vault: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    vault.ok_or_else(|| anyhow::anyhow!("--vault is required (or set OBSIDIAN_VAULT)"))
}
