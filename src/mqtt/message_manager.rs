use bytes::Bytes;
use rumqttc::Publish;
use serde_json::Value;

use super::error::PayloadError;
use super::log_block::{LogBlock, LogLine, DELIMITER};

/// One inbound message, alive for a single handler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MQTTMessage {
    topic: String,
    payload: Bytes,
}

impl From<Publish> for MQTTMessage {
    fn from(publish: Publish) -> Self {
        MQTTMessage {
            topic: publish.topic,
            payload: publish.payload,
        }
    }
}

impl MQTTMessage {
    pub fn from_topic(topic: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        MQTTMessage {
            topic: topic.into(),
            payload: payload.into(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Payload as text, with invalid UTF-8 sequences replaced
    pub fn payload_text(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }
}

/// Decodes the payload as UTF-8, then parses the text as JSON.
pub fn parse_payload(payload: &[u8]) -> Result<Value, PayloadError> {
    let text = std::str::from_utf8(payload)?;
    Ok(serde_json::from_str(text)?)
}

/// Turns every inbound message into a self-contained, delimited log block.
#[derive(Debug, Default, Clone, Copy)]
pub struct MessageHandler;

impl MessageHandler {
    pub fn handle(&self, message: &MQTTMessage) -> LogBlock {
        let mut block = LogBlock::new();
        block
            .push(LogLine::info(DELIMITER))
            .push(LogLine::info(format!("📌 Topic: {}", message.topic())))
            .push(LogLine::info(format!(
                "📦 Raw Payload: {}",
                message.payload_text()
            )));

        match parse_payload(message.payload()) {
            Ok(value) => block.push(LogLine::info(format!("🔍 Parsed JSON: {value}"))),
            Err(e) => block.push(LogLine::warn(format!("⚠ Error parsing message: {e}"))),
        };

        block.push(LogLine::info(DELIMITER));
        block
    }
}
