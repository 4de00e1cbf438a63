// Docspeak Interactive Console
// REPL for driving the upload / convert / play workflow in one session

use crate::domain::conversion::{naming, ConversionService, Language};
use crate::domain::session::SessionState;
use crate::error::AppResult;
use chrono::{DateTime, Utc};
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::Arc;

pub struct InteractiveConsole {
    service: Arc<ConversionService>,
    backend_url: String,
    session: SessionState,
    prompt: String,
}

impl InteractiveConsole {
    pub fn new(service: Arc<ConversionService>, backend_url: String) -> Self {
        Self {
            service,
            backend_url,
            session: SessionState::new(),
            prompt: "docspeak".to_string(),
        }
    }

    /// Start the interactive console
    pub async fn run(&mut self) -> AppResult<()> {
        self.print_banner();
        self.print_help();

        let stdin = io::stdin();
        let mut stdin = BufReader::new(stdin.lock());

        loop {
            // Update prompt with the selected document
            self.update_prompt();
            print!("{}> ", self.prompt);
            io::stdout().flush()?;

            let mut line = String::new();
            if stdin.read_line(&mut line)? == 0 {
                break;
            }

            let line = line.trim().to_string();

            if line.is_empty() {
                continue;
            }

            match self.handle_command(&line).await {
                Ok(CommandResult::Continue) => continue,
                Ok(CommandResult::Exit) => break,
                Ok(CommandResult::Success(msg)) => {
                    if !msg.is_empty() {
                        println!("✅ {}", msg);
                    }
                }
                Ok(CommandResult::Error(msg)) => {
                    println!("❌ Error: {}", msg);
                }
                Err(e) => {
                    println!("❌ Error: {}", e);
                }
            }
        }

        println!("\n👋 Goodbye!");
        Ok(())
    }

    fn print_banner(&self) {
        println!("\n╔═══════════════════════════════════════════════════════════════╗");
        println!("║                  Docspeak Interactive Console                 ║");
        println!("║            Upload a document, hear it in any voice            ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Connected to: {}", self.backend_url);
        println!("Type 'help' for available commands, 'exit' to quit");
        println!();
    }

    fn print_help(&self) {
        println!("📚 Available Commands:");
        println!("  help, ?            - Show this help message");
        println!("  exit, quit, q      - Exit the console");
        println!("  clear, cls         - Clear the screen");
        println!("  file <path>        - Choose the document to work with");
        println!("  upload             - Upload the chosen document for conversion");
        println!("  play <language>    - Wait for the conversion, then play it");
        println!("  status [language]  - Check whether converted audio is ready");
        println!("  download on|off    - Save audio next to playback (default on)");
        println!("  languages          - List supported languages");
        println!();
        println!("💡 Example session:");
        println!("  file ./notes.txt");
        println!("  upload");
        println!("  play hindi");
        println!();
    }

    fn update_prompt(&mut self) {
        if let Some(source) = self.session.selected() {
            self.prompt = format!("docspeak[{}]", source.file_name);
        } else {
            self.prompt = "docspeak".to_string();
        }
    }

    async fn handle_command(&mut self, line: &str) -> AppResult<CommandResult> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        if parts.is_empty() {
            return Ok(CommandResult::Continue);
        }

        let command = parts[0].to_lowercase();

        match command.as_str() {
            "exit" | "quit" | "q" => Ok(CommandResult::Exit),
            "help" | "?" => {
                self.print_help();
                Ok(CommandResult::Continue)
            }
            "clear" | "cls" => {
                print!("\x1B[2J\x1B[1;1H");
                io::stdout().flush()?;
                Ok(CommandResult::Continue)
            }
            "file" => {
                if parts.len() < 2 {
                    return Ok(CommandResult::Error("Usage: file <path>".to_string()));
                }
                self.select_file(parts[1..].join(" "))
            }
            "upload" => self.upload().await,
            "play" => {
                if parts.len() < 2 {
                    return Ok(CommandResult::Error(
                        "Usage: play <language> (english, hindi or chinese)".to_string(),
                    ));
                }
                self.play(parts[1])
            }
            "status" => self.status(parts.get(1).copied()).await,
            "download" => self.toggle_download(parts.get(1).copied()),
            "languages" => {
                println!("Supported languages:");
                for language in Language::ALL {
                    println!(
                        "  {:<8} voice {:<7} ({})",
                        language.token(),
                        language.voice(),
                        language.synthesis_code()
                    );
                }
                Ok(CommandResult::Continue)
            }
            _ => Ok(CommandResult::Error(format!(
                "Unknown command: {}. Type 'help' for available commands",
                command
            ))),
        }
    }

    fn select_file(&mut self, raw: String) -> AppResult<CommandResult> {
        let path = PathBuf::from(&raw);

        if !path.is_file() {
            return Ok(CommandResult::Error(format!("no such file: {}", raw)));
        }

        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => {
                return Ok(CommandResult::Error(format!(
                    "not a usable document name: {}",
                    raw
                )))
            }
        };

        self.session.select(file_name.clone(), path);
        Ok(CommandResult::Success(format!("Selected {}", file_name)))
    }

    async fn upload(&mut self) -> AppResult<CommandResult> {
        let source = match self.session.selected() {
            Some(source) => source.clone(),
            None => {
                return Ok(CommandResult::Error(
                    "no document selected, choose one with: file <path>".to_string(),
                ))
            }
        };

        match self.service.upload_document(&source.path).await {
            Ok(outcome) => {
                self.session.mark_uploaded(outcome.uploaded_at);
                let mut msg = format!("Uploaded {}", outcome.file_name);
                if !outcome.confirmed {
                    msg.push_str(" (backend did not confirm)");
                }
                Ok(CommandResult::Success(msg))
            }
            Err(e) => Ok(CommandResult::Error(e.to_string())),
        }
    }

    /// Kick off a playback in the background and return to the prompt.
    ///
    /// The download switch is snapshotted here, flipping it later does not
    /// affect a playback that is already running.
    fn play(&mut self, raw_language: &str) -> AppResult<CommandResult> {
        let language = match raw_language.parse::<Language>() {
            Ok(language) => language,
            Err(e) => return Ok(CommandResult::Error(e)),
        };

        let source = match self.session.selected() {
            Some(source) => source.clone(),
            None => {
                return Ok(CommandResult::Error(
                    "no document selected, choose one with: file <path>".to_string(),
                ))
            }
        };

        let download = self.session.download_enabled();
        let epoch = self.service.begin_listen();
        let service = self.service.clone();
        let document = source.file_name.clone();

        tokio::spawn(async move {
            match service
                .listen_with_epoch(&document, language, download, epoch)
                .await
            {
                Ok(outcome) if outcome.superseded => {
                    println!("\n⏭️  {} skipped, a newer play took over", outcome.audio_file);
                }
                Ok(outcome) => {
                    println!("\n🔊 Played {}", outcome.audio_file);
                    if let Some(path) = outcome.saved_to {
                        println!("⬇️  Saved to {}", path.display());
                    }
                }
                Err(e) => {
                    println!("\n❌ {} playback failed: {}", language, e);
                }
            }
        });

        Ok(CommandResult::Success(format!(
            "Preparing {} audio for {}",
            language, source.file_name
        )))
    }

    async fn status(&mut self, raw_language: Option<&str>) -> AppResult<CommandResult> {
        let source = match self.session.selected() {
            Some(source) => source.clone(),
            None => {
                return Ok(CommandResult::Error(
                    "no document selected, choose one with: file <path>".to_string(),
                ))
            }
        };

        let languages: Vec<Language> = match raw_language {
            Some(raw) => match raw.parse::<Language>() {
                Ok(language) => vec![language],
                Err(e) => return Ok(CommandResult::Error(e)),
            },
            None => Language::ALL.to_vec(),
        };

        match self.session.uploaded_at() {
            Some(at) => println!("📄 {} (uploaded {})", source.file_name, elapsed_since(at)),
            None => println!("📄 {} (not uploaded in this session)", source.file_name),
        }

        for language in languages {
            let audio_file = naming::audio_file_name(&source.file_name, language);
            match self.service.check(&source.file_name, language).await {
                Ok(presence) if presence.is_present() => {
                    println!("  ✅ {} ready", audio_file);
                }
                Ok(_) => {
                    println!("  ⏳ {} not ready yet", audio_file);
                }
                Err(e) => {
                    println!("  ❌ {} check failed: {}", audio_file, e);
                }
            }
        }

        Ok(CommandResult::Continue)
    }

    fn toggle_download(&mut self, value: Option<&str>) -> AppResult<CommandResult> {
        match value {
            Some("on") => {
                self.session.set_download(true);
                Ok(CommandResult::Success("Audio download enabled".to_string()))
            }
            Some("off") => {
                self.session.set_download(false);
                Ok(CommandResult::Success("Audio download disabled".to_string()))
            }
            _ => Ok(CommandResult::Error("Usage: download on|off".to_string())),
        }
    }
}

fn elapsed_since(at: DateTime<Utc>) -> String {
    let secs = (Utc::now() - at).num_seconds().max(0);
    if secs < 60 {
        format!("{}s ago", secs)
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else {
        format!("{}h ago", secs / 3600)
    }
}

enum CommandResult {
    Continue,
    Exit,
    Success(String),
    Error(String),
}
