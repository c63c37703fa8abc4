use tracing::warn;
use uuid::Uuid;

use super::ChatTransport;
use crate::chats::dto::{ChatRequest, ChatResponse, ChatTurn};

/// Assistant turn shown when the request could not be completed.
pub const FAILURE_REPLY: &str = "Er ging iets mis. Probeer opnieuw.";
pub const EMPTY_TRANSCRIPT_HINT: &str = "Stel je eerste vraag...";
pub const INPUT_PLACEHOLDER: &str = "Welke belastingen moet ik betalen als zzp'er?";
pub const THINKING: &str = "Denken...";
pub const LOGIN_HINT: &str = "Log in om je gesprekken te bewaren.";

/// In-memory transcript and input state of the chat box.
///
/// Submitting is split in [`ChatWidget::begin_submit`] and
/// [`ChatWidget::finish_submit`] so the caller can render the optimistic user
/// turn while the request is in flight. Enter and the send button both map to
/// [`ChatWidget::submit`].
#[derive(Debug, Default)]
pub struct ChatWidget {
    messages: Vec<ChatTurn>,
    input: String,
    loading: bool,
    chat_id: Option<Uuid>,
}

impl ChatWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatTurn] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn chat_id(&self) -> Option<Uuid> {
        self.chat_id
    }

    /// Empties the transcript and forgets the chat, e.g. after signing out.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether the send button is enabled.
    pub fn can_submit(&self) -> bool {
        !self.loading && !self.input.trim().is_empty()
    }

    /// Placeholder line shown above the input, if any.
    pub fn status_line(&self) -> Option<&'static str> {
        if self.loading {
            Some(THINKING)
        } else if self.messages.is_empty() {
            Some(EMPTY_TRANSCRIPT_HINT)
        } else {
            None
        }
    }

    /// Appends the user turn, clears the input and locks the widget.
    /// Returns `None` for blank input or while a request is in flight.
    pub fn begin_submit(&mut self) -> Option<ChatRequest> {
        if !self.can_submit() {
            return None;
        }
        let message = std::mem::take(&mut self.input);
        let request = ChatRequest {
            message: message.clone(),
            history: self.messages.clone(),
            chat_id: self.chat_id,
        };
        self.messages.push(ChatTurn::user(message));
        self.loading = true;
        Some(request)
    }

    /// Appends the assistant turn (or the failure reply) and unlocks the widget.
    pub fn finish_submit(&mut self, outcome: anyhow::Result<ChatResponse>) {
        match outcome {
            Ok(res) => {
                self.messages.push(ChatTurn::assistant(res.response));
                if let Some(id) = res.chat_id {
                    self.chat_id = Some(id);
                }
            }
            Err(e) => {
                warn!(error = %e, "chat request failed");
                self.messages.push(ChatTurn::assistant(FAILURE_REPLY));
            }
        }
        self.loading = false;
    }

    /// Full submit cycle. Returns false if nothing was sent.
    pub async fn submit<T: ChatTransport + ?Sized>(&mut self, transport: &T) -> bool {
        let Some(request) = self.begin_submit() else {
            return false;
        };
        let outcome = transport.send_chat(&request).await;
        self.finish_submit(outcome);
        true
    }
}
