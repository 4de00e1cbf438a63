pub mod console;

use crate::domain::conversion::{naming, ConversionService, Language};
use crate::error::{AppError, AppResult};
use crate::infrastructure::config::Config;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "docspeak")]
#[command(about = "Turn uploaded documents into speech you can play or save", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Conversion backend base URL (overrides BACKEND_URL)
    #[arg(long, global = true)]
    pub server: Option<String>,

    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload a document for conversion
    Upload {
        /// Path of the document to upload
        file: PathBuf,
    },

    /// Check whether converted audio is ready
    Status {
        /// Uploaded document name
        file: String,

        /// Language to check, all of them when omitted
        #[arg(long, short)]
        language: Option<String>,
    },

    /// Wait for conversion to finish, then play the audio
    Listen {
        /// Uploaded document name
        file: String,

        /// Language to play
        #[arg(long, short, default_value = "english")]
        language: String,

        /// Skip saving a local copy of the audio
        #[arg(long)]
        no_download: bool,
    },

    /// Download converted audio without playing it
    Fetch {
        /// Uploaded document name
        file: String,

        /// Language to fetch
        #[arg(long, short, default_value = "english")]
        language: String,
    },

    /// List supported languages and their voices
    Languages,

    /// Start an interactive session
    Console,
}

pub async fn run(
    command: Commands,
    service: Arc<ConversionService>,
    config: &Config,
) -> AppResult<()> {
    match command {
        Commands::Upload { file } => upload(&service, &file).await,
        Commands::Status { file, language } => {
            status(&service, &file, language.as_deref()).await
        }
        Commands::Listen {
            file,
            language,
            no_download,
        } => listen(&service, &file, &language, !no_download).await,
        Commands::Fetch { file, language } => fetch(&service, &file, &language).await,
        Commands::Languages => {
            print_languages();
            Ok(())
        }
        Commands::Console => {
            let mut console =
                console::InteractiveConsole::new(service, config.backend_url.clone());
            console.run().await
        }
    }
}

async fn upload(service: &ConversionService, file: &Path) -> AppResult<()> {
    let outcome = service.upload_document(file).await.map_err(AppError::from)?;

    println!("✅ Uploaded {}", outcome.file_name);
    if !outcome.confirmed {
        println!("⚠️  Backend did not confirm the upload");
    }
    println!(
        "Conversion has started. Check it with: docspeak status {}",
        outcome.file_name
    );

    Ok(())
}

async fn status(
    service: &ConversionService,
    file: &str,
    language: Option<&str>,
) -> AppResult<()> {
    let document = document_name(file)?;

    match language {
        Some(raw) => {
            let language = parse_language(raw)?;
            let presence = service
                .check(&document, language)
                .await
                .map_err(AppError::from)?;

            print_presence(service, &document, language, presence.is_present());

            if !presence.is_present() {
                return Err(AppError::NotReady(format!("{} ({})", document, language)));
            }
        }
        None => {
            for language in Language::ALL {
                let presence = service
                    .check(&document, language)
                    .await
                    .map_err(AppError::from)?;
                print_presence(service, &document, language, presence.is_present());
            }
        }
    }

    Ok(())
}

async fn listen(
    service: &ConversionService,
    file: &str,
    language: &str,
    download: bool,
) -> AppResult<()> {
    let document = document_name(file)?;
    let language = parse_language(language)?;

    let outcome = service
        .listen(&document, language, download)
        .await
        .map_err(AppError::from)?;

    println!("🔊 Played {}", outcome.audio_file);
    println!("   {}", outcome.audio_url);
    if let Some(path) = outcome.saved_to {
        println!("⬇️  Saved to {}", path.display());
    }

    Ok(())
}

async fn fetch(service: &ConversionService, file: &str, language: &str) -> AppResult<()> {
    let document = document_name(file)?;
    let language = parse_language(language)?;

    let path = service
        .fetch(&document, language)
        .await
        .map_err(AppError::from)?;

    println!("⬇️  Saved to {}", path.display());

    Ok(())
}

fn print_languages() {
    println!("Supported languages:");
    for language in Language::ALL {
        println!(
            "  {:<8} voice {:<7} ({})",
            language.token(),
            language.voice(),
            language.synthesis_code()
        );
    }
}

fn print_presence(
    service: &ConversionService,
    document: &str,
    language: Language,
    present: bool,
) {
    let audio_file = naming::audio_file_name(document, language);
    if present {
        println!("✅ {} ready", audio_file);
        println!("   {}", service.playback_url(&audio_file));
    } else {
        println!("⏳ {} not ready yet", audio_file);
    }
}

/// Reduce a user-supplied document argument to its file name
fn document_name(input: &str) -> AppResult<String> {
    Path::new(input)
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_string())
        .ok_or_else(|| AppError::BadRequest(format!("not a usable document name: {}", input)))
}

fn parse_language(raw: &str) -> AppResult<Language> {
    raw.parse::<Language>().map_err(AppError::BadRequest)
}
