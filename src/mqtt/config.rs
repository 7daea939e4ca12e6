use std::time::Duration;

use rumqttc::MqttOptions;

const BROKER_HOST: &str = "103.20.215.109";
const BROKER_PORT: u16 = 1883;
const KEEP_ALIVE_SECS: u64 = 60;
const CLIENT_ID: &str = "aqi-subscriber";
/// Listens to every AQI station topic.
const TOPIC_FILTER: &str = "aqi/#";
const REQUEST_CAPACITY: usize = 10;

/// Broker endpoint and subscription filter, fixed for the process lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct MqttConfig {
    pub host: String,
    pub port: u16,
    pub keep_alive: Duration,
    pub client_id: String,
    pub topic_filter: String,
    /// Capacity of the request channel between `AsyncClient` and `EventLoop`
    pub request_capacity: usize,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            host: BROKER_HOST.to_string(),
            port: BROKER_PORT,
            keep_alive: Duration::from_secs(KEEP_ALIVE_SECS),
            client_id: CLIENT_ID.to_string(),
            topic_filter: TOPIC_FILTER.to_string(),
            request_capacity: REQUEST_CAPACITY,
        }
    }
}

impl MqttConfig {
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn mqtt_options(&self) -> MqttOptions {
        let mut mqtt_options =
            MqttOptions::new(self.client_id.clone(), self.host.clone(), self.port);
        mqtt_options
            .set_keep_alive(self.keep_alive)
            .set_clean_session(true);
        mqtt_options
    }
}
