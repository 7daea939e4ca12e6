//! # MQTT Subscriber Module
//!
//! Connects to the AQI broker, subscribes to every station topic and logs each
//! received message together with its parsed JSON form.
//!
//! ## Why This Module Exists
//!
//! Air quality stations publish their readings as JSON over MQTT. This module is
//! the listening end used to watch that traffic live:
//! - One long-lived broker connection with a fixed endpoint
//! - A single wildcard subscription (`aqi/#`), issued on every successful connect
//! - One delimited, greppable log block per received message
//!
//! ## Module Architecture
//!
//! ```text
//! mqtt/
//! ├── config.rs           - Fixed broker endpoint and topic filter
//! ├── error.rs            - Payload and connection failure types
//! ├── log_block.rs        - Ordered log lines returned by the handlers
//! ├── message_manager.rs  - Message representation, payload parsing, message handler
//! └── mqtt_handler.rs     - Connection handler and session driver
//! ```
//!
//! ## Design Philosophy
//!
//! - **Transport stays in rumqttc**: QoS, keep-alive and reconnects are handled by
//!   the `rumqttc` event loop; this module only reacts to its events
//! - **Handlers are pure**: they return a `LogBlock` instead of logging directly, so
//!   their output can be checked without a broker
//! - **Nothing propagates**: payload and connection failures end up as log lines,
//!   the dispatch loop keeps running
//! - **Strict serialization**: one task polls the event loop and runs the handlers,
//!   so message blocks never interleave

pub mod config;
pub mod error;
pub mod log_block;
pub mod message_manager;
pub mod mqtt_handler;
