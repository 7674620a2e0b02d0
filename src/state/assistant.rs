//! Travel assistant view state
//!
//! The conversation is append-only and lives only as long as the view is
//! mounted. Every submission is one provider call whose reply is appended.

use chrono::{DateTime, Local};
use eframe::egui;
use tokio::task::JoinHandle;

use crate::providers::assistant::describe_error;
use crate::providers::{AssistantClient, ProviderError};
use crate::state::StateEvent;
use crate::task::{poll_task, PollResult};

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

/// One entry in the conversation
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Local>,
}

/// Assistant view state
pub struct AssistantState {
    /// Text in the input box
    pub draft: String,
    messages: Vec<ChatMessage>,
    next_id: u64,
    /// Provider call for the last submission
    reply: Option<JoinHandle<Result<String, ProviderError>>>,
    /// Set by a quota error; only a remount clears it
    quota_exhausted: bool,
    client: AssistantClient,
}

impl AssistantState {
    pub fn mount(client: AssistantClient) -> Self {
        Self {
            draft: String::new(),
            messages: Vec::new(),
            next_id: 1,
            reply: None,
            quota_exhausted: false,
            client,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Whether a reply is outstanding
    pub fn is_waiting(&self) -> bool {
        self.reply.is_some()
    }

    /// Whether submissions are locked by a quota error
    pub fn is_disabled(&self) -> bool {
        self.quota_exhausted
    }

    pub fn can_submit(&self) -> bool {
        !self.is_waiting() && !self.quota_exhausted
    }

    fn push(&mut self, sender: Sender, text: String) {
        self.messages.push(ChatMessage {
            id: self.next_id,
            text,
            sender,
            timestamp: Local::now(),
        });
        self.next_id += 1;
    }

    /// Send the draft to the assistant
    pub fn submit(&mut self) -> Vec<StateEvent> {
        let question = self.draft.trim().to_string();
        if question.is_empty() || !self.can_submit() {
            return Vec::new();
        }

        // Never call out without a key; the draft stays for a retry
        if let Err(e) = self.client.ensure_configured() {
            self.push(Sender::Assistant, describe_error(&e));
            return vec![StateEvent::StatusMessage(
                "The travel assistant is not configured".to_string(),
            )];
        }

        self.push(Sender::User, question.clone());
        self.draft.clear();

        let client = self.client.clone();
        self.reply = Some(tokio::spawn(async move { client.reply(&question).await }));

        vec![StateEvent::StatusMessage("Asking the travel assistant...".to_string())]
    }

    /// Append the reply once it arrives
    pub fn poll(&mut self, ctx: &egui::Context) -> Vec<StateEvent> {
        let mut events = Vec::new();

        match poll_task(&mut self.reply) {
            PollResult::Complete(Ok(Ok(text))) => {
                self.push(Sender::Assistant, text);
                events.push(StateEvent::StatusMessage("The travel assistant replied".to_string()));
            }
            PollResult::Complete(Ok(Err(e))) => {
                if e == ProviderError::QuotaExceeded {
                    self.quota_exhausted = true;
                }
                events.push(StateEvent::LogError(format!("Assistant request failed: {}", e)));
                self.push(Sender::Assistant, describe_error(&e));
            }
            PollResult::Complete(Err(e)) => {
                events.push(StateEvent::LogError(format!("Assistant task panicked: {}", e)));
                self.push(
                    Sender::Assistant,
                    describe_error(&ProviderError::Unknown(e.to_string())),
                );
            }
            PollResult::Pending => ctx.request_repaint(),
            PollResult::NoTask => {}
        }

        events
    }
}
