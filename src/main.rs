//! admin-panel: drive the bot administration panel from a terminal
//!
//! Usage:
//!   admin-panel broadcast "Привет всем"          # Asks for confirmation first
//!   admin-panel logs --lines 50
//!   admin-panel translations list
//!   admin-panel translations show ru
//!   admin-panel translations set en greeting=Hi   # Saves, then restarts the bot
//!   admin-panel restart
//!
//! Required environment variables:
//! - ADMIN_PANEL_URL
//!
//! Optional:
//! - ADMIN_SESSION_COOKIE, or ADMIN_USERNAME + ADMIN_PASSWORD
//! - ADMIN_HTTP_TIMEOUT_SECS (defaults to 30)
//! - ADMIN_LOG_LINES (defaults to 100)

use admin_panel::strings::STRINGS;
use admin_panel::{AdminClient, AdminPanel, Config, Shell, Tab};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "admin-panel", version, about = "Bot administration panel client")]
struct Cli {
    /// Admin server URL (overrides ADMIN_PANEL_URL)
    #[arg(long)]
    url: Option<String>,

    /// Answer yes to every confirmation
    #[arg(long, short = 'y', global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Send a message to every bot user
    Broadcast { message: String },
    /// Show the most recent log lines
    Logs {
        #[arg(long)]
        lines: Option<u32>,
    },
    /// Translation files
    Translations {
        #[command(subcommand)]
        action: TranslationsCmd,
    },
    /// Restart the bot
    Restart,
}

#[derive(Debug, Subcommand)]
enum TranslationsCmd {
    /// List loaded languages
    List,
    /// Print every key of one language
    Show { language: String },
    /// Change keys of one language and save (key=value pairs)
    Set {
        language: String,
        #[arg(required = true, value_parser = parse_assignment)]
        edits: Vec<(String, String)>,
    },
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{}'", s)),
    }
}

/// Terminal stand-in for the browser page
struct TerminalShell {
    assume_yes: bool,
    reload_requested: bool,
}

impl Shell for TerminalShell {
    fn confirm(&mut self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("{} [y/N] ", question);
        let _ = std::io::stdout().flush();

        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "д" | "да")
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{}", message);
    }

    fn reload(&mut self) {
        self.reload_requested = true;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("admin_panel=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env_with_base_url(cli.url.clone())?;
    if let Command::Logs { lines: Some(lines) } = &cli.command {
        config.log_lines = *lines;
    }

    let client = AdminClient::new(&config).context("Failed to build admin client")?;
    if !client.has_session() {
        let (username, password) = config
            .credentials()
            .context("No session: set ADMIN_SESSION_COOKIE or ADMIN_USERNAME/ADMIN_PASSWORD")?;
        client
            .login(username, password)
            .await
            .context("Login failed")?;
    }

    let mut shell = TerminalShell {
        assume_yes: cli.yes,
        reload_requested: false,
    };
    let mut panel = AdminPanel::new(client, config.log_lines);

    let outcome = run(cli.command, &mut panel, &mut shell).await;

    if shell.reload_requested {
        bail!("Admin session expired, log in again");
    }
    outcome
}

async fn run(command: Command, panel: &mut AdminPanel, shell: &mut TerminalShell) -> Result<()> {
    match command {
        Command::Broadcast { message } => {
            panel.broadcast_mut().set_message(message);
            match panel.send_broadcast(shell).await? {
                Some(status) => println!("{}", status),
                None => info!("Broadcast not sent"),
            }
        }
        Command::Logs { .. } => {
            eprintln!("{}", STRINGS.logs_loading);
            panel.show_tab(Tab::Logs, shell).await?;
            println!("{}", panel.logs().content());
        }
        Command::Translations { action } => {
            panel.show_tab(Tab::Translations, shell).await?;
            run_translations(action, panel, shell).await?;
        }
        Command::Restart => {
            panel
                .client()
                .restart_service()
                .await
                .context("Bot restart failed")?;
            println!("✅ {}", STRINGS.restart_done);
        }
    }
    Ok(())
}

async fn run_translations(
    action: TranslationsCmd,
    panel: &mut AdminPanel,
    shell: &mut TerminalShell,
) -> Result<()> {
    match action {
        TranslationsCmd::List => {
            for option in panel.editor().language_options().into_iter().skip(1) {
                let keys = panel
                    .editor()
                    .translations()
                    .get(&option.code)
                    .map(|d| d.len())
                    .unwrap_or(0);
                println!("{:<6} {} ({} keys)", option.code, option.label, keys);
            }
        }
        TranslationsCmd::Show { language } => {
            panel.editor_mut().select_language(&language, shell)?;
            if let Some(view) = panel.editor().view() {
                println!("[{}]", view.heading());
                for field in view.fields() {
                    println!("{} = {}", field.key, field.value);
                }
            }
        }
        TranslationsCmd::Set { language, edits } => {
            let editor = panel.editor_mut();
            editor.select_language(&language, shell)?;
            for (key, value) in edits {
                editor.edit(&key, value)?;
            }

            let report = panel.save_translations(shell).await?;
            info!("Saved translations for '{}'", report.language);

            if let Some(status) = panel.editor().status() {
                println!("{}", status);
            }
            if !report.restart.is_restarted() {
                bail!("Translations for '{}' saved, but the bot was not restarted", report.language);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("greeting=Hi=there"),
            Ok(("greeting".to_string(), "Hi=there".to_string()))
        );
        assert_eq!(parse_assignment("empty="), Ok(("empty".to_string(), String::new())));
        assert!(parse_assignment("=value").is_err());
        assert!(parse_assignment("novalue").is_err());
    }

    #[test]
    fn test_cli_parses_set_command() {
        let cli = Cli::try_parse_from([
            "admin-panel",
            "translations",
            "set",
            "en",
            "greeting=Hi",
            "farewell=Bye",
        ])
        .expect("should parse");

        match cli.command {
            Command::Translations {
                action: TranslationsCmd::Set { language, edits },
            } => {
                assert_eq!(language, "en");
                assert_eq!(edits.len(), 2);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_yes_is_global() {
        let cli = Cli::try_parse_from(["admin-panel", "broadcast", "hi", "--yes"]).unwrap();
        assert!(cli.yes);
    }

    #[test]
    fn test_terminal_shell_assume_yes() {
        let mut shell = TerminalShell {
            assume_yes: true,
            reload_requested: false,
        };
        assert!(shell.confirm("?"));
        shell.reload();
        assert!(shell.reload_requested);
    }
}
