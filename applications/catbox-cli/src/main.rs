/// catbox - upload files to Catbox and Litterbox from the command line
use anyhow::{bail, Context};
use catbox_cli::config::CliConfig;
use catbox_client::{CatboxClient, LitterboxDuration};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "catbox")]
#[command(about = "Upload files to Catbox and manage albums", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./catbox.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload files to permanent hosting
    Upload {
        /// Files to upload; several files are uploaded in chunks
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// File name to send instead of the local one (single file only)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Upload files to Litterbox temporary hosting
    Litterbox {
        /// Files to upload; several files are uploaded in chunks
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// File name to send instead of the local one (single file only)
        #[arg(short, long)]
        name: Option<String>,
        /// Retention period: 1h, 12h, 24h, 72h or 1w
        #[arg(short, long)]
        duration: Option<LitterboxDuration>,
    },
    /// Create an album from uploaded files
    CreateAlbum {
        /// Album title
        #[arg(short, long)]
        title: String,
        /// Album description
        #[arg(short, long)]
        description: Option<String>,
        /// File URLs or shortcodes
        #[arg(required = true)]
        files: Vec<String>,
    },
    /// Replace the title, description and files of an album
    EditAlbum {
        /// Album shortcode or URL
        shortcode: String,
        /// Album title
        #[arg(short, long)]
        title: String,
        /// Album description
        #[arg(short, long)]
        description: Option<String>,
        /// File URLs or shortcodes
        #[arg(required = true)]
        files: Vec<String>,
    },
    /// Delete an album
    DeleteAlbum {
        /// Album shortcode or URL
        shortcode: String,
    },
    /// Delete uploaded files
    Delete {
        /// File URLs or shortcodes
        #[arg(required = true)]
        files: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries links only
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catbox_cli=info,catbox_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let default_duration = config.litterbox.duration;
    let client = CatboxClient::new(config.into_client_config())?;

    match cli.command {
        Commands::Upload { paths, name } => {
            upload(&client, paths, name).await?;
        }
        Commands::Litterbox {
            paths,
            name,
            duration,
        } => {
            upload_litterbox(&client, paths, name, duration.unwrap_or(default_duration)).await?;
        }
        Commands::CreateAlbum {
            title,
            description,
            files,
        } => {
            let shortcode = client
                .create_album(files.as_slice(), &title, description.as_deref())
                .await?;
            println!("{}", shortcode);
        }
        Commands::EditAlbum {
            shortcode,
            title,
            description,
            files,
        } => {
            let shortcode = client.shortcode_from_url(&shortcode).to_string();
            client
                .edit_album(&shortcode, files.as_slice(), &title, description.as_deref())
                .await?;
            tracing::info!("Album {} updated", shortcode);
        }
        Commands::DeleteAlbum { shortcode } => {
            let shortcode = client.shortcode_from_url(&shortcode).to_string();
            client.delete_album(&shortcode).await?;
            tracing::info!("Album {} deleted", shortcode);
        }
        Commands::Delete { files } => {
            client.delete_files(files.as_slice(), None).await?;
        }
    }

    Ok(())
}

async fn upload(
    client: &CatboxClient,
    paths: Vec<PathBuf>,
    name: Option<String>,
) -> anyhow::Result<()> {
    match paths.as_slice() {
        [path] => {
            let url = client
                .upload_file(path.as_path(), name.as_deref(), None)
                .await
                .with_context(|| format!("Failed to upload {}", path.display()))?;
            println!("{}", url);
        }
        _ => {
            if name.is_some() {
                bail!("--name can only be used with a single file");
            }
            tracing::info!("Uploading {} files", paths.len());
            for url in client.upload_album(&paths, &client.batch_options()).await? {
                println!("{}", url);
            }
        }
    }

    Ok(())
}

async fn upload_litterbox(
    client: &CatboxClient,
    paths: Vec<PathBuf>,
    name: Option<String>,
    duration: LitterboxDuration,
) -> anyhow::Result<()> {
    match paths.as_slice() {
        [path] => {
            let url = client
                .upload_to_litterbox(path.as_path(), name.as_deref(), duration, None)
                .await
                .with_context(|| format!("Failed to upload {}", path.display()))?;
            println!("{}", url);
        }
        _ => {
            if name.is_some() {
                bail!("--name can only be used with a single file");
            }
            tracing::info!("Uploading {} files to Litterbox for {}", paths.len(), duration);
            for url in client
                .upload_album_to_litterbox(&paths, duration, &client.batch_options())
                .await?
            {
                println!("{}", url);
            }
        }
    }

    Ok(())
}
