//! paperdock - personal arXiv paper manager
//!
//! Downloads paper metadata and artifacts into a local folder backed by
//! SQLite, and serves a small web UI over the same collection.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use paperdock_cli::{commands, AppState};
use paperdock_common::config;
use paperdock_common::db::{init_database, PaperStore};

#[derive(Parser)]
#[command(name = "paperdock", version, about = "Personal arXiv paper manager")]
struct Cli {
    /// Root folder for the database and downloaded papers
    /// (falls back to PAPERDOCK_ROOT, then the config file, then the
    /// platform data directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download a paper: metadata, PDF, source tarball and BibTeX
    Download {
        /// arXiv URL or identifier, e.g. 2103.00112 or https://arxiv.org/abs/2103.00112
        input: String,

        /// Tag to file the paper under
        #[arg(short, long)]
        tag: Option<String>,

        /// Companion GitHub repository to clone alongside the paper
        #[arg(short, long)]
        github: Option<String>,
    },

    /// List papers, optionally filtered by keywords and tag
    List {
        /// Keywords matched against title, authors, abstract and id
        keywords: Vec<String>,

        /// Exact tag filter
        #[arg(short, long)]
        tag: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: i64,

        #[arg(long, default_value_t = 20)]
        page_size: i64,
    },

    /// Delete one paper by id, or a whole tag, files included
    Delete {
        /// arXiv identifier
        id: Option<String>,

        /// Delete every paper with this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Export stored BibTeX entries for matching papers
    Bibtex {
        /// Keywords matched against title, authors, abstract and id
        keywords: Vec<String>,

        #[arg(short, long)]
        tag: Option<String>,

        /// Export every stored entry
        #[arg(long)]
        all: bool,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Remove all downloaded files and reset the database
    Clean {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Open a paper's directory with the platform file manager
    Open {
        /// arXiv identifier
        id: String,

        /// Open the downloaded source tarball instead
        #[arg(long, conflicts_with = "github")]
        source: bool,

        /// Open the cloned companion repository instead
        #[arg(long)]
        github: bool,
    },

    /// Open the root folder itself
    OpenKb,

    /// Serve the web UI on the loopback interface
    Web {
        #[arg(short, long, default_value_t = commands::web::DEFAULT_PORT)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("paperdock=info")),
        )
        .init();

    let cli = Cli::parse();

    let root = config::resolve_root_folder(cli.root.as_deref());
    config::ensure_root_exists(&root)
        .with_context(|| format!("failed to create root folder {}", root.display()))?;

    let db_path = config::database_path(&root);
    let pool = init_database(&db_path)
        .await
        .with_context(|| format!("failed to open database {}", db_path.display()))?;
    let store = PaperStore::new(pool);

    match cli.command {
        Command::Download { input, tag, github } => {
            commands::download::run(&store, &root, &input, tag, github).await
        }
        Command::List {
            keywords,
            tag,
            page,
            page_size,
        } => commands::list::run(&store, &keywords, tag.as_deref(), page, page_size).await,
        Command::Delete { id, tag, force } => {
            commands::delete::run(&store, &root, id.as_deref(), tag.as_deref(), force).await
        }
        Command::Bibtex {
            keywords,
            tag,
            all,
            output,
        } => {
            commands::bibtex::run(&store, &keywords, tag.as_deref(), all, output.as_deref()).await
        }
        Command::Clean { force } => commands::clean::run(&store, &root, force).await,
        Command::Open { id, source, github } => {
            let target = if source {
                commands::open::OpenTarget::Source
            } else if github {
                commands::open::OpenTarget::Github
            } else {
                commands::open::OpenTarget::Dir
            };
            commands::open::run(&store, &root, &id, target).await
        }
        Command::OpenKb => commands::open::run_open_root(&root),
        Command::Web { port } => {
            let state = AppState::new(store, root);
            commands::web::run(state, port).await
        }
    }
}
