use anyhow::Result;
use clap::{Parser, Subcommand};
use highlights::config::{BASE_URL_ENV, ClientConfig, DEFAULT_BASE_URL};
use highlights::model::Highlight;
use highlights::{HighlightsApi, SyncClient};
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "highlights-cli")]
#[command(about = "Edit the highlights list on a running highlights service")]
struct Cli {
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Print the resulting list as JSON.
    #[arg(short, long)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the list
    List,
    /// Append a placeholder highlight
    Add,
    /// Replace the text of a highlight
    Edit { id: String, text: String },
    /// Remove a highlight
    Delete { id: String },
    /// Move the highlight at one position to another (zero-based)
    Move { from: usize, to: usize },
    /// Drop the highlight `active` onto the position held by `over`
    Drag { active: String, over: String },
}

fn print_highlights(highlights: &[Highlight], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(highlights)?);
        return Ok(());
    }

    for (pos, highlight) in highlights.iter().enumerate() {
        println!("{:>3}  [{}] {}", pos, highlight.id, highlight.text);
    }
    Ok(())
}

async fn join(handle: Option<JoinHandle<()>>) -> Result<()> {
    if let Some(handle) = handle {
        handle.await?;
    }
    Ok(())
}

/// Runs one action. Add and delete failures turn into an error so the
/// process exits non-zero.
async fn apply(client: &mut SyncClient, command: Command) -> Result<()> {
    match command {
        Command::List => {}
        Command::Add => {
            if client.add_local().await.is_none() {
                anyhow::bail!("could not add a highlight");
            }
        }
        Command::Edit { id, text } => {
            client.edit_local(&id, &text).await?;
        }
        Command::Delete { id } => {
            if !client.delete_local(&id).await {
                anyhow::bail!("could not delete highlight {}", id);
            }
        }
        Command::Move { from, to } => {
            join(client.reorder_local(from, to)).await?;
        }
        Command::Drag { active, over } => {
            join(client.reorder_by_id(&active, &over)).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let api = HighlightsApi::new(&ClientConfig::new(&cli.base_url));
    let mut client = SyncClient::new(api);
    if !client.load().await {
        anyhow::bail!("could not load highlights from {}", cli.base_url);
    }

    apply(&mut client, cli.command).await?;

    print_highlights(client.highlights(), cli.json)
}
