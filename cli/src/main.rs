mod render;
mod session;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

use session::ConverterSession;
use tamis_core::convert::InputMode;

#[derive(Parser)]
#[command(name = "tamis")]
#[command(about = "Convert a recipe to gluten-free", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a recipe pasted as text
    Text {
        /// The recipe text; reads stdin when omitted
        recipe: Option<String>,
        /// Conversion service URL (default: http://localhost:3000)
        #[arg(long, default_value = "http://localhost:3000")]
        server: String,
    },
    /// Convert a recipe from a URL
    Url {
        /// The recipe page URL
        url: String,
        /// Conversion service URL (default: http://localhost:3000)
        #[arg(long, default_value = "http://localhost:3000")]
        server: String,
    },
    /// Convert a recipe photographed in an image file
    Image {
        /// Path to the photo (JPEG, PNG, GIF, or WebP)
        path: PathBuf,
        /// Conversion service URL (default: http://localhost:3000)
        #[arg(long, default_value = "http://localhost:3000")]
        server: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut session = match cli.command {
        Commands::Text { recipe, server } => {
            let recipe = match recipe {
                Some(text) => text,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };
            let mut session = ConverterSession::new(server);
            session.set_mode(InputMode::Text);
            session.set_recipe_input(recipe);
            session
        }
        Commands::Url { url, server } => {
            let mut session = ConverterSession::new(server);
            session.set_mode(InputMode::Url);
            session.set_recipe_input(url);
            session
        }
        Commands::Image { path, server } => {
            let mut session = ConverterSession::new(server);
            session.set_mode(InputMode::Image);
            session.set_image_file(path);
            session
        }
    };

    if !session.can_submit() {
        anyhow::bail!("Nothing to convert: provide a non-empty recipe, URL, or image file");
    }

    if session.submit().await {
        if let Some(document) = session.converted_recipe() {
            print!("{}", render::render_document(document));
        }
        Ok(())
    } else {
        anyhow::bail!(
            "Conversion failed: {}",
            session.error().unwrap_or("unknown error")
        )
    }
}
