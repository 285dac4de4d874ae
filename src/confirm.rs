//! Awaitable confirmation gate for destructive actions.
//!
//! A single-flight request/response channel: the requesting side suspends
//! on [`ConfirmationGate::confirm`] until the presentation side resolves
//! the request. The channel holds one in-flight request; a second `confirm`
//! issued before the first resolves queues behind it in FIFO order. There
//! is no timeout — the gate waits indefinitely for user input.

use tokio::sync::{mpsc, oneshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Primary,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPrompt {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub severity: Severity,
}

impl ConfirmationPrompt {
    pub fn danger(title: &str, message: &str, confirm_label: &str) -> Self {
        Self {
            title: title.to_owned(),
            message: message.to_owned(),
            confirm_label: confirm_label.to_owned(),
            severity: Severity::Danger,
        }
    }
}

/// One pending question for the presentation side. Dropping it without
/// resolving counts as cancel.
pub struct ConfirmationRequest {
    pub prompt: ConfirmationPrompt,
    responder: oneshot::Sender<bool>,
}

impl ConfirmationRequest {
    pub fn resolve(self, confirmed: bool) {
        let _ = self.responder.send(confirmed);
    }
}

#[derive(Clone)]
pub struct ConfirmationGate {
    tx: mpsc::Sender<ConfirmationRequest>,
}

pub struct ConfirmationHost {
    rx: mpsc::Receiver<ConfirmationRequest>,
}

pub fn confirmation_channel() -> (ConfirmationGate, ConfirmationHost) {
    let (tx, rx) = mpsc::channel(1);
    (ConfirmationGate { tx }, ConfirmationHost { rx })
}

impl ConfirmationGate {
    /// Suspends the caller until the user resolves the prompt. A missing or
    /// departed host resolves to "not confirmed" with no side effects.
    pub async fn confirm(&self, prompt: ConfirmationPrompt) -> bool {
        let (responder, resolved) = oneshot::channel();
        let request = ConfirmationRequest { prompt, responder };
        if self.tx.send(request).await.is_err() {
            return false;
        }
        resolved.await.unwrap_or(false)
    }
}

impl ConfirmationHost {
    /// Next pending request, or `None` once every gate handle is gone.
    pub async fn next(&mut self) -> Option<ConfirmationRequest> {
        self.rx.recv().await
    }
}
