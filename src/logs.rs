//! Log viewer. Always re-fetched, never cached.

use crate::api::AdminClient;
use crate::config::DEFAULT_LOG_LINES;
use crate::error::AdminError;
use crate::shell::Shell;
use crate::strings::STRINGS;
use tracing::warn;

#[derive(Debug)]
pub struct LogViewer {
    lines: u32,
    content: String,
}

impl Default for LogViewer {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_LINES)
    }
}

impl LogViewer {
    pub fn new(lines: u32) -> Self {
        Self {
            lines,
            content: String::new(),
        }
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn set_lines(&mut self, lines: u32) {
        self.lines = lines;
    }

    /// Text currently shown: logs, a placeholder, or an error line
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Fetch the most recent `lines` lines and return what the view now shows.
    pub async fn refresh(&mut self, client: &AdminClient, shell: &mut dyn Shell) -> &str {
        self.content = match client.fetch_logs(self.lines).await {
            Ok(logs) if logs.is_empty() => STRINGS.logs_empty.to_string(),
            Ok(logs) => logs,
            Err(AdminError::AuthExpired) => {
                shell.alert(STRINGS.reauth_required);
                shell.reload();
                String::new()
            }
            Err(AdminError::Network(e)) => {
                warn!("Failed to load logs: {}", e);
                format!("{}{}", STRINGS.logs_network_error_prefix, e)
            }
            Err(e) => {
                warn!("Server failed to return logs: {}", e);
                format!("{}{}", STRINGS.logs_error_prefix, e)
            }
        };

        &self.content
    }
}
