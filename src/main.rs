pub mod mqtt;

use color_eyre::Result;
use mqtt::config::MqttConfig;
use mqtt::mqtt_handler::MqttHandler;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const DEFAULT_LOG_FILTER: &str = "info";

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let config = MqttConfig::default();
    info!(
        "Starting AQI subscriber for {} on {}",
        config.topic_filter,
        config.endpoint()
    );

    let mut session = MqttHandler::new(&config);
    session.run().await;

    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    setup_logging_env();
    Ok(())
}

/// `RUST_LOG` directives, falling back to info when unset
fn log_filter(directives: Option<String>) -> EnvFilter {
    EnvFilter::new(directives.as_deref().unwrap_or(DEFAULT_LOG_FILTER))
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok()))
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stdout)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mqtt::log_block::capture::capture_lines;
    use crate::mqtt::log_block::{LogBlock, LogLine};

    fn packet_lines() -> LogBlock {
        let mut block = LogBlock::new();
        block
            .push(LogLine::debug("Incoming packet: PingResp"))
            .push(LogLine::info("✅ Connected to MQTT Broker"));
        block
    }

    #[test]
    fn default_filter_hides_debug_lines() {
        let block = packet_lines();
        let output = capture_lines(log_filter(None), || block.emit());

        assert_eq!(
            output,
            [("INFO".to_string(), "✅ Connected to MQTT Broker".to_string())]
        );
    }

    #[test]
    fn rust_log_debug_shows_packet_lines() {
        let block = packet_lines();
        let output = capture_lines(log_filter(Some("debug".to_string())), || block.emit());

        assert_eq!(output.len(), 2);
        assert_eq!(
            output[0],
            ("DEBUG".to_string(), "Incoming packet: PingResp".to_string())
        );
    }
}
