use std::time::Duration;

use rumqttc::{
    AsyncClient, ClientError, ConnectReturnCode, ConnectionError, Event, EventLoop, Packet, QoS,
};
use tracing::info;

use super::config::MqttConfig;
use super::error::{return_code_value, ConnectionFailure};
use super::log_block::{LogBlock, LogLine};
use super::message_manager::{MQTTMessage, MessageHandler};

/// Pause after a failed poll before the event loop is polled (and reconnects) again
pub const RECONNECT_DELAY: Duration = Duration::from_secs(1);

/// Result of one connection attempt, classified from the CONNACK code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionOutcome {
    Success,
    Failure(ConnectionFailure),
}

impl ConnectionOutcome {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => ConnectionOutcome::Success,
            code => ConnectionOutcome::Failure(ConnectionFailure::from_code(code)),
        }
    }
}

impl From<ConnectReturnCode> for ConnectionOutcome {
    fn from(code: ConnectReturnCode) -> Self {
        Self::from_code(return_code_value(code))
    }
}

/// Anything that can queue a subscribe request towards the broker.
pub trait TopicSubscriber {
    fn request_subscription(&self, topic_filter: &str) -> Result<(), ClientError>;
}

impl TopicSubscriber for AsyncClient {
    fn request_subscription(&self, topic_filter: &str) -> Result<(), ClientError> {
        self.try_subscribe(topic_filter, QoS::AtMostOnce)
    }
}

/// Reacts to connection outcomes. Subscribes on success, reports the code on failure.
#[derive(Debug, Clone)]
pub struct ConnectionHandler {
    endpoint: String,
    topic_filter: String,
}

impl ConnectionHandler {
    pub fn new(config: &MqttConfig) -> Self {
        Self {
            endpoint: config.endpoint(),
            topic_filter: config.topic_filter.clone(),
        }
    }

    pub fn handle(&self, outcome: ConnectionOutcome, client: &impl TopicSubscriber) -> LogBlock {
        let mut block = LogBlock::new();
        match outcome {
            ConnectionOutcome::Success => match client.request_subscription(&self.topic_filter) {
                Ok(()) => {
                    block.push(LogLine::info(format!(
                        "✅ Connected to MQTT Broker {} | 📡 Subscribed to: {}",
                        self.endpoint, self.topic_filter
                    )));
                }
                Err(e) => {
                    block
                        .push(LogLine::info(format!(
                            "✅ Connected to MQTT Broker {}",
                            self.endpoint
                        )))
                        .push(LogLine::error(format!(
                            "❌ Subscribe request for {} failed: {}",
                            self.topic_filter, e
                        )));
                }
            },
            ConnectionOutcome::Failure(failure) => {
                block.push(LogLine::error(format!("❌ Connection failed with {failure}")));
            }
        }
        block
    }
}

/// Session driver: owns the client and its event loop and feeds events to the handlers.
pub struct MqttHandler<C = AsyncClient> {
    client: C,
    eventloop: EventLoop,
    connection_handler: ConnectionHandler,
    message_handler: MessageHandler,
}

impl MqttHandler<AsyncClient> {
    pub fn new(config: &MqttConfig) -> Self {
        let (client, eventloop) =
            AsyncClient::new(config.mqtt_options(), config.request_capacity);
        Self::with_client(config, client, eventloop)
    }
}

impl<C: TopicSubscriber> MqttHandler<C> {
    pub fn with_client(config: &MqttConfig, client: C, eventloop: EventLoop) -> Self {
        MqttHandler {
            client,
            eventloop,
            connection_handler: ConnectionHandler::new(config),
            message_handler: MessageHandler,
        }
    }

    /// Polls the event loop forever. Handlers run one at a time on this task.
    pub async fn run(&mut self) {
        info!(
            "Connecting to MQTT Broker {}",
            self.connection_handler.endpoint
        );
        loop {
            let notification = self.eventloop.poll().await;
            let failed = notification.is_err();

            let block = self.dispatch(notification);
            if !block.is_empty() {
                block.emit();
            }

            if failed {
                tokio::time::sleep(RECONNECT_DELAY).await;
            }
        }
    }

    pub fn dispatch(&mut self, notification: Result<Event, ConnectionError>) -> LogBlock {
        match notification {
            Ok(Event::Incoming(Packet::ConnAck(ack))) => self
                .connection_handler
                .handle(ConnectionOutcome::from(ack.code), &self.client),
            Ok(Event::Incoming(Packet::Publish(publish))) => self
                .message_handler
                .handle(&MQTTMessage::from(publish)),
            Ok(Event::Incoming(packet)) => {
                LogLine::debug(format!("Incoming packet: {packet:?}")).into()
            }
            Ok(Event::Outgoing(_)) => LogBlock::new(),
            // rumqttc reports a non-zero CONNACK as an error instead of an event
            Err(ConnectionError::ConnectionRefused(code)) => self
                .connection_handler
                .handle(ConnectionOutcome::from(code), &self.client),
            Err(e) => LogLine::error(format!("❌ MQTT connection error: {e}")).into(),
        }
    }
}
