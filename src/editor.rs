//! Translation editor controller.
//!
//! Owns the translation set fetched from the server, the editing session and
//! the rendered form. Flow:
//!
//! ```text
//! Unloaded ──load──▶ Loaded ──select──▶ Editing(lang) ──save──▶ Saving(lang)
//!                                           ▲                        │
//!                                           └────── ok / error ──────┘
//! ```
//!
//! The snapshot in `EditorSession::original_translations` is only replaced by
//! selecting a language or by a successful save; edits live in the form.

use crate::api::AdminClient;
use crate::error::{AdminError, AdminResult};
use crate::shell::Shell;
use crate::strings::STRINGS;
use crate::translations::{LanguageDictionary, TranslationSet};
use crate::view::{language_options, EditorView, LanguageOption, StatusLine, SubmitButton};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorState {
    Unloaded,
    Loaded,
    Editing(String),
    Saving(String),
}

/// Which language is open and what it looked like when it was opened or last saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorSession {
    pub current_language: Option<String>,
    pub original_translations: LanguageDictionary,
}

/// What happened to the restart that follows every successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestartOutcome {
    Restarted,
    /// The server could not restart the bot; carries its error
    Failed(String),
    /// The restart request got no response
    Unreachable(String),
    /// The session expired between save and restart
    SessionExpired,
}

impl RestartOutcome {
    pub fn is_restarted(&self) -> bool {
        matches!(self, RestartOutcome::Restarted)
    }
}

/// Result of a save that the server accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    pub language: String,
    /// Server confirmation message
    pub message: String,
    pub restart: RestartOutcome,
}

#[derive(Debug)]
pub struct TranslationEditor {
    translations: TranslationSet,
    session: EditorSession,
    state: EditorState,
    view: Option<EditorView>,
    status: Option<StatusLine>,
    save_button: SubmitButton,
}

impl Default for TranslationEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl TranslationEditor {
    pub fn new() -> Self {
        Self {
            translations: TranslationSet::new(),
            session: EditorSession::default(),
            state: EditorState::Unloaded,
            view: None,
            status: None,
            save_button: SubmitButton::idle(STRINGS.save_submit),
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn translations(&self) -> &TranslationSet {
        &self.translations
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    /// The open form, if a language is selected
    pub fn view(&self) -> Option<&EditorView> {
        self.view.as_ref()
    }

    /// Result box of the last save, hidden (`None`) after select and cancel
    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    pub fn save_button(&self) -> &SubmitButton {
        &self.save_button
    }

    pub fn needs_load(&self) -> bool {
        self.translations.is_empty()
    }

    pub fn language_options(&self) -> Vec<LanguageOption> {
        language_options(&self.translations)
    }

    /// Drop everything, as a page reload would.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Fetch the translation set, but only if nothing is cached yet.
    pub async fn ensure_loaded(
        &mut self,
        client: &AdminClient,
        shell: &mut dyn Shell,
    ) -> AdminResult<()> {
        if !self.needs_load() {
            debug!("Translations already cached, skipping load");
            return Ok(());
        }
        self.load(client, shell).await
    }

    pub async fn load(&mut self, client: &AdminClient, shell: &mut dyn Shell) -> AdminResult<()> {
        match client.fetch_translations().await {
            Ok(translations) => {
                info!("Translation editor loaded {} languages", translations.len());
                self.translations = translations;
                if self.state == EditorState::Unloaded {
                    self.state = EditorState::Loaded;
                }
                Ok(())
            }
            Err(AdminError::AuthExpired) => Err(self.session_expired(shell)),
            Err(AdminError::Network(e)) => {
                warn!("Network error while loading translations: {}", e);
                shell.alert(&format!("{}{}", STRINGS.load_network_error_prefix, e));
                Err(AdminError::Network(e))
            }
            Err(e) => {
                warn!("Failed to load translations: {}", e);
                shell.alert(&format!("{}{}", STRINGS.load_error_prefix, e));
                Err(e)
            }
        }
    }

    /// Open the editor for `language`. An empty code closes the editor.
    pub fn select_language(&mut self, language: &str, shell: &mut dyn Shell) -> AdminResult<()> {
        if language.is_empty() {
            debug!("Language selection cleared");
            self.session.current_language = None;
            self.view = None;
            self.status = None;
            if self.state != EditorState::Unloaded {
                self.state = EditorState::Loaded;
            }
            return Ok(());
        }

        let dictionary = match self.translations.get(language) {
            Some(dictionary) => dictionary,
            None => {
                warn!("Language '{}' not present in loaded translations", language);
                shell.alert(STRINGS.language_not_found);
                return Err(AdminError::LanguageNotFound(language.to_string()));
            }
        };

        info!("Editing '{}' ({} keys)", language, dictionary.len());

        self.session.original_translations = dictionary.clone();
        self.session.current_language = Some(language.to_string());
        self.view = Some(EditorView::render(language, dictionary));
        self.status = None;
        self.state = EditorState::Editing(language.to_string());
        Ok(())
    }

    /// Change one field of the open form.
    pub fn edit(&mut self, key: &str, value: impl Into<String>) -> AdminResult<()> {
        match self.view.as_mut() {
            Some(view) => view.set_value(key, value),
            None => Err(AdminError::Validation(STRINGS.language_not_selected.to_string())),
        }
    }

    /// Post the whole form, then restart the bot if the server accepted it.
    ///
    /// A failed restart does not fail the save: it is reported in
    /// `SaveReport::restart` and in the status line.
    pub async fn save(
        &mut self,
        client: &AdminClient,
        shell: &mut dyn Shell,
    ) -> AdminResult<SaveReport> {
        if let EditorState::Saving(_) = self.state {
            return Err(AdminError::Validation(STRINGS.save_already_running.to_string()));
        }

        let (language, data) = match (&self.session.current_language, &self.view) {
            (Some(language), Some(view)) => (language.clone(), view.collect()),
            _ => {
                shell.alert(STRINGS.language_not_selected);
                return Err(AdminError::Validation(STRINGS.language_not_selected.to_string()));
            }
        };

        let result = {
            let _saving = SavingGuard::enter(&mut self.state, &mut self.save_button, &language);
            client.save_translations(&language, &data).await
        };

        let message = match result {
            Ok(message) => message,
            Err(AdminError::AuthExpired) => return Err(self.session_expired(shell)),
            Err(AdminError::Network(e)) => {
                warn!("Network error while saving '{}': {}", language, e);
                self.status = Some(StatusLine::error(format!(
                    "❌ {}{}",
                    STRINGS.save_network_error_prefix, e
                )));
                return Err(AdminError::Network(e));
            }
            Err(e) => {
                warn!("Server rejected translations for '{}': {}", language, e);
                self.status = Some(StatusLine::error(format!("❌ {}{}", STRINGS.save_error_prefix, e)));
                return Err(e);
            }
        };

        self.session.original_translations = data.clone();
        self.translations.insert(language.clone(), data);
        self.status = Some(StatusLine::success(format!(
            "✅ {}\n{}",
            message, STRINGS.restart_pending
        )));

        let restart = self.restart(client, shell).await;

        Ok(SaveReport {
            language,
            message,
            restart,
        })
    }

    async fn restart(&mut self, client: &AdminClient, shell: &mut dyn Shell) -> RestartOutcome {
        match client.restart_service().await {
            Ok(()) => {
                self.status = Some(StatusLine::success(format!("✅ {}", STRINGS.restart_success)));
                RestartOutcome::Restarted
            }
            Err(AdminError::AuthExpired) => {
                self.session_expired(shell);
                RestartOutcome::SessionExpired
            }
            Err(AdminError::Network(e)) => {
                warn!("Restart request failed: {}", e);
                self.status = Some(StatusLine::warning(format!(
                    "{}\n{}",
                    STRINGS.restart_network_failed, STRINGS.restart_manual_hint
                )));
                RestartOutcome::Unreachable(e.to_string())
            }
            Err(e) => {
                warn!("Bot restart failed: {}", e);
                self.status = Some(StatusLine::warning(format!(
                    "{}\n❌ {}\n{}",
                    STRINGS.restart_failed, e, STRINGS.restart_manual_hint
                )));
                RestartOutcome::Failed(e.to_string())
            }
        }
    }

    /// Discard unsaved edits after confirmation. Returns whether the form was reset.
    pub fn cancel(&mut self, shell: &mut dyn Shell) -> bool {
        let language = match &self.session.current_language {
            Some(language) => language.clone(),
            None => return false,
        };

        if !shell.confirm(STRINGS.cancel_confirm) {
            return false;
        }

        debug!("Reverting '{}' to last loaded translations", language);
        self.view = Some(EditorView::render(&language, &self.session.original_translations));
        self.status = None;
        true
    }

    fn session_expired(&mut self, shell: &mut dyn Shell) -> AdminError {
        warn!("Admin session expired, reloading panel");
        shell.alert(STRINGS.reauth_required);
        shell.reload();
        self.reset();
        AdminError::AuthExpired
    }
}

/// Holds the editor in `Saving` with a busy button. Dropping it, also when the
/// save future itself is dropped mid-request, returns to `Editing`.
struct SavingGuard<'a> {
    state: &'a mut EditorState,
    button: &'a mut SubmitButton,
    language: String,
}

impl<'a> SavingGuard<'a> {
    fn enter(state: &'a mut EditorState, button: &'a mut SubmitButton, language: &str) -> Self {
        *state = EditorState::Saving(language.to_string());
        *button = SubmitButton::busy(STRINGS.save_in_progress);
        Self {
            state,
            button,
            language: language.to_string(),
        }
    }
}

impl Drop for SavingGuard<'_> {
    fn drop(&mut self) {
        *self.button = SubmitButton::idle(STRINGS.save_submit);
        *self.state = EditorState::Editing(std::mem::take(&mut self.language));
    }
}
