//! Broadcast form: one message to every bot user.

use crate::api::AdminClient;
use crate::error::{AdminError, AdminResult};
use crate::shell::Shell;
use crate::strings::STRINGS;
use crate::view::{StatusLine, SubmitButton};
use tracing::{info, warn};

#[derive(Debug)]
pub struct BroadcastForm {
    message: String,
    submit: SubmitButton,
    result: Option<StatusLine>,
}

impl Default for BroadcastForm {
    fn default() -> Self {
        Self::new()
    }
}

impl BroadcastForm {
    pub fn new() -> Self {
        Self {
            message: String::new(),
            submit: SubmitButton::idle(STRINGS.broadcast_submit),
            result: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn submit_button(&self) -> &SubmitButton {
        &self.submit
    }

    pub fn result(&self) -> Option<&StatusLine> {
        self.result.as_ref()
    }

    /// Empty the message and hide the result box
    pub fn clear(&mut self) {
        self.message.clear();
        self.result = None;
    }

    /// Validate, confirm and send the current message.
    ///
    /// Returns `Ok(None)` when the user declined the confirmation. A server
    /// that refused the broadcast is still `Ok`, as an error status line.
    pub async fn submit(
        &mut self,
        client: &AdminClient,
        shell: &mut dyn Shell,
    ) -> AdminResult<Option<StatusLine>> {
        let message = self.message.trim().to_string();
        if message.is_empty() {
            shell.alert(STRINGS.broadcast_empty);
            return Err(AdminError::Validation(STRINGS.broadcast_empty.to_string()));
        }

        if !shell.confirm(STRINGS.broadcast_confirm) {
            info!("Broadcast cancelled by user");
            return Ok(None);
        }

        self.submit = SubmitButton::busy(STRINGS.broadcast_sending);
        let outcome = client.broadcast_message(&message).await;
        self.submit = SubmitButton::idle(STRINGS.broadcast_submit);

        let status = match outcome {
            Ok(reply) if reply.success => StatusLine::success(format!("✅ {}", reply.message)),
            Ok(reply) => StatusLine::error(format!("❌ {}", reply.message)),
            Err(AdminError::AuthExpired) => {
                shell.alert(STRINGS.reauth_required);
                shell.reload();
                self.clear();
                return Err(AdminError::AuthExpired);
            }
            Err(e) => {
                warn!("Broadcast request failed: {}", e);
                StatusLine::error(format!("❌ {}", STRINGS.broadcast_network_error))
            }
        };

        self.result = Some(status.clone());
        Ok(Some(status))
    }
}
