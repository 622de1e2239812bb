use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use studio_core::api::{ConfirmCartReq, CreateClientFolderReq, SkippedFile};
use studio_core::config::{media_root_from_env_value, media_url_from_env_value};
use studio_core::{AlbumService, StudioConfig};

#[derive(Parser)]
#[command(name = "studio")]
#[command(about = "Photo studio album CLI")]
struct Cli {
    /// Directory holding the album images
    #[arg(long, env = "MEDIA_ROOT", global = true)]
    media_root: Option<PathBuf>,
    /// URL prefix the media root is exposed under
    #[arg(long, env = "MEDIA_URL", global = true)]
    media_url: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every image under the media root
    List,
    /// Move images into a client subfolder next to each image
    CreateClient {
        /// Client folder name
        client: String,
        /// Image paths under the media URL prefix
        files: Vec<String>,
    },
    /// Copy a cart's images into validated/<email>/
    ConfirmCart {
        /// Customer email
        email: String,
        /// Image paths under the media URL prefix
        files: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let media_root = media_root_from_env_value(
        cli.media_root.map(|p| p.display().to_string()),
        &std::env::current_dir()?,
    );
    let media_url = media_url_from_env_value(cli.media_url);
    let service = AlbumService::new(Arc::new(StudioConfig::new(media_root, &media_url)?));

    match cli.command {
        Some(Commands::List) => {
            let images = service.list_albums();
            if images.is_empty() {
                println!("No images found under {}.", service.config().media_root().display());
            } else {
                for image in images {
                    println!("{}\t{}", image.folder, image.path);
                }
            }
        }
        Some(Commands::CreateClient { client, files }) => {
            match service.create_client_folder(CreateClientFolderReq {
                client: Some(client),
                files: Some(files),
            }) {
                Ok(res) => {
                    println!("{}", res.message);
                    for file in &res.files {
                        println!("  moved {}", file);
                    }
                    print_skipped(&res.skipped);
                }
                Err(e) => eprintln!("Error creating client folder: {}", e),
            }
        }
        Some(Commands::ConfirmCart { email, files }) => {
            match service.confirm_cart(ConfirmCartReq {
                email: Some(email),
                files: Some(files),
            }) {
                Ok(res) => {
                    println!("Confirmed cart for {}: {} file(s)", res.email, res.copied.len());
                    for file in &res.copied {
                        println!("  copied {}", file);
                    }
                    print_skipped(&res.skipped);
                }
                Err(e) => eprintln!("Error confirming cart: {}", e),
            }
        }
        None => {
            println!("Use 'studio --help' for commands");
        }
    }

    Ok(())
}

fn print_skipped(skipped: &[SkippedFile]) {
    for file in skipped {
        println!("  skipped {} ({:?})", file.path, file.reason);
    }
}
