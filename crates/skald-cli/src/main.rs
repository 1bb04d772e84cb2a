mod cmd_chunk;
mod cmd_queue;
mod cmd_recap;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "skald",
    version,
    about = "Activity recaps and chunk planning for agent workspaces"
)]
struct Cli {
    /// Workspace root (defaults to the current directory)
    #[arg(long, default_value = ".", global = true)]
    base: String,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize recent activity across handoffs, memory, git, and logs
    Recap {
        /// Timeframe token: last, 1h, 6h, 12h, 24h, 7d, or a bare day count
        #[arg(default_value = "1h")]
        timeframe: String,
    },
    /// Analyze source structure and queue chunk plans for documentation
    Chunk {
        /// Analyze a single file (path relative to the workspace root)
        #[arg(long)]
        file: Option<String>,
        /// Timeframe for recently changed files when --file is omitted
        #[arg(long, default_value = "last")]
        since: String,
    },
    /// Inspect the documentation queue
    Queue {
        #[command(subcommand)]
        cmd: QueueCmd,
    },
}

#[derive(Subcommand)]
enum QueueCmd {
    /// List queued chunk plans
    List,
    /// Show the full queue entry for a file
    Show {
        /// File path as recorded in the queue
        file: String,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let repo_root = std::path::PathBuf::from(&cli.base);

    match cli.cmd {
        Command::Recap { timeframe } => cmd_recap::execute(&repo_root, &timeframe),
        Command::Chunk { file, since } => cmd_chunk::execute(&repo_root, file.as_deref(), &since),
        Command::Queue { cmd } => match cmd {
            QueueCmd::List => cmd_queue::list(&repo_root),
            QueueCmd::Show { file } => cmd_queue::show(&repo_root, &file),
        },
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
