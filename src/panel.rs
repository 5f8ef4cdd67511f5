//! The admin panel as a whole: one client, three tabs.

use crate::api::AdminClient;
use crate::broadcast::BroadcastForm;
use crate::editor::{SaveReport, TranslationEditor};
use crate::error::AdminResult;
use crate::logs::LogViewer;
use crate::shell::Shell;
use crate::view::StatusLine;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Broadcast,
    Logs,
    Translations,
}

impl Tab {
    pub fn id(self) -> &'static str {
        match self {
            Tab::Broadcast => "broadcast",
            Tab::Logs => "logs",
            Tab::Translations => "translations",
        }
    }
}

#[derive(Debug)]
pub struct AdminPanel {
    client: AdminClient,
    active_tab: Tab,
    broadcast: BroadcastForm,
    logs: LogViewer,
    editor: TranslationEditor,
}

impl AdminPanel {
    pub fn new(client: AdminClient, log_lines: u32) -> Self {
        Self {
            client,
            active_tab: Tab::Broadcast,
            broadcast: BroadcastForm::new(),
            logs: LogViewer::new(log_lines),
            editor: TranslationEditor::new(),
        }
    }

    pub fn client(&self) -> &AdminClient {
        &self.client
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn broadcast(&self) -> &BroadcastForm {
        &self.broadcast
    }

    pub fn broadcast_mut(&mut self) -> &mut BroadcastForm {
        &mut self.broadcast
    }

    pub fn logs(&self) -> &LogViewer {
        &self.logs
    }

    pub fn logs_mut(&mut self) -> &mut LogViewer {
        &mut self.logs
    }

    pub fn editor(&self) -> &TranslationEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut TranslationEditor {
        &mut self.editor
    }

    /// Activate `tab`. The logs tab refetches on every visit; the translations
    /// tab loads once, the first time it is shown.
    pub async fn show_tab(&mut self, tab: Tab, shell: &mut dyn Shell) -> AdminResult<()> {
        debug!("Switching to {} tab", tab.id());
        self.active_tab = tab;

        match tab {
            Tab::Broadcast => Ok(()),
            Tab::Logs => {
                self.logs.refresh(&self.client, shell).await;
                Ok(())
            }
            Tab::Translations => self.editor.ensure_loaded(&self.client, shell).await,
        }
    }

    pub async fn refresh_logs(&mut self, shell: &mut dyn Shell) -> &str {
        self.logs.refresh(&self.client, shell).await
    }

    pub async fn send_broadcast(&mut self, shell: &mut dyn Shell) -> AdminResult<Option<StatusLine>> {
        self.broadcast.submit(&self.client, shell).await
    }

    pub async fn save_translations(&mut self, shell: &mut dyn Shell) -> AdminResult<SaveReport> {
        self.editor.save(&self.client, shell).await
    }
}
