// In-memory `Responder` used by dispatcher and command tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::dispatcher::{Responder, ResponderError};
use super::relay_message::RelayMessage;

#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Ack { ephemeral: bool },
    Notice { text: String, ephemeral: bool },
    Message { title: String, ephemeral: bool },
}

#[derive(Default)]
pub struct RecordingResponder {
    sent: Mutex<Vec<Sent>>,
}

impl RecordingResponder {
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Responder for RecordingResponder {
    async fn acknowledge(&self, ephemeral: bool) -> Result<(), ResponderError> {
        self.sent.lock().unwrap().push(Sent::Ack { ephemeral });
        Ok(())
    }

    async fn notify(&self, text: String, ephemeral: bool) -> Result<(), ResponderError> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Notice { text, ephemeral });
        Ok(())
    }

    async fn deliver(&self, message: RelayMessage, ephemeral: bool) -> Result<(), ResponderError> {
        self.sent.lock().unwrap().push(Sent::Message {
            title: message.title,
            ephemeral,
        });
        Ok(())
    }
}
