//! Client for the bot administration panel.
//!
//! Broadcasts a message to every bot user, shows the bot's logs, and edits the
//! per-language translation files, restarting the bot after each save.

pub mod api;
pub mod broadcast;
pub mod config;
pub mod editor;
pub mod error;
pub mod logs;
pub mod panel;
pub mod shell;
pub mod strings;
pub mod translations;
pub mod view;

pub use api::AdminClient;
pub use config::Config;
pub use editor::{EditorState, RestartOutcome, SaveReport, TranslationEditor};
pub use error::{AdminError, AdminResult};
pub use panel::{AdminPanel, Tab};
pub use shell::Shell;
