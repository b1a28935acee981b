//! MQTT remote input
//!
//! Subscribes to a topic and applies button press/release and pointer
//! commands straight to a shared `InputState` from a background thread, the
//! same way a GPIO interrupt would on the board.
//!
//! Payloads are either JSON:
//!   {"button": "fire", "pressed": true}
//!   {"pointer": [120, 80]}
//! or plain text:
//!   down fire | up fire | pointer 120 80

use super::{Button, InputState};
use rumqttc::{Client, Event, MqttOptions, Packet, QoS};
use serde::Deserialize;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 1883;
pub const DEFAULT_TOPIC: &str = "tinydoom/input";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteCommand {
    Press(Button),
    Release(Button),
    Pointer(i32, i32),
}

impl RemoteCommand {
    pub fn apply(self, input: &InputState) {
        match self {
            Self::Press(b) => input.key_down(b),
            Self::Release(b) => input.key_up(b),
            Self::Pointer(x, y) => input.set_pointer(x, y),
        }
    }
}

/// JSON forms for incoming messages
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonCommand {
    Button { button: Button, pressed: bool },
    Pointer { pointer: (i32, i32) },
}

impl From<JsonCommand> for RemoteCommand {
    fn from(json: JsonCommand) -> Self {
        match json {
            JsonCommand::Button {
                button,
                pressed: true,
            } => Self::Press(button),
            JsonCommand::Button {
                button,
                pressed: false,
            } => Self::Release(button),
            JsonCommand::Pointer { pointer: (x, y) } => Self::Pointer(x, y),
        }
    }
}

/// Parse one payload. Tries JSON first, falls back to plain text.
pub fn parse_command(payload: &str) -> Option<RemoteCommand> {
    let text = payload.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(json) = serde_json::from_str::<JsonCommand>(text) {
        return Some(json.into());
    }

    let mut words = text.split_whitespace();
    let verb = words.next()?.to_lowercase();
    match verb.as_str() {
        "down" | "press" => Button::from_name(words.next()?).map(RemoteCommand::Press),
        "up" | "release" => Button::from_name(words.next()?).map(RemoteCommand::Release),
        "pointer" | "touch" => {
            let x = words.next()?.parse().ok()?;
            let y = words.next()?.parse().ok()?;
            Some(RemoteCommand::Pointer(x, y))
        },
        _ => None,
    }
}

/// MQTT subscriber feeding an `InputState` from a background thread
pub struct RemoteInput {
    _thread: thread::JoinHandle<()>,
}

impl RemoteInput {
    /// Connect to the broker and start applying commands to `input`.
    /// Fails immediately if the connection cannot be established.
    pub fn connect(
        host: &str,
        port: u16,
        topic: &str,
        input: Arc<InputState>,
    ) -> Result<Self, String> {
        let mut options = MqttOptions::new("tinydoom", host, port);
        options.set_keep_alive(Duration::from_secs(30));

        let (client, mut connection) = Client::new(options, 10);

        client
            .subscribe(topic, QoS::AtMostOnce)
            .map_err(|e| format!("Failed to subscribe to topic '{}': {}", topic, e))?;

        // Poll once so an unreachable broker fails at startup
        match connection.iter().next() {
            Some(Ok(_)) => {},
            Some(Err(e)) => {
                return Err(format!(
                    "Failed to connect to MQTT broker at {}:{} - {}",
                    host, port, e
                ));
            },
            None => {
                return Err(format!(
                    "Failed to connect to MQTT broker at {}:{} - connection closed",
                    host, port
                ));
            },
        }

        let topic_owned = topic.to_string();
        let handle = thread::spawn(move || {
            // Keep the client alive for as long as the event loop runs
            let _client = client;
            Self::message_loop(connection, &input, &topic_owned);
        });

        tracing::info!("MQTT: connected to {}:{}, subscribed to '{}'", host, port, topic);

        Ok(Self { _thread: handle })
    }

    fn message_loop(mut connection: rumqttc::Connection, input: &InputState, topic: &str) {
        for event in connection.iter() {
            match event {
                Ok(Event::Incoming(Packet::Publish(publish))) if publish.topic == topic => {
                    let Ok(text) = std::str::from_utf8(&publish.payload) else {
                        tracing::debug!("MQTT: ignoring non-UTF-8 payload");
                        continue;
                    };
                    match parse_command(text) {
                        Some(cmd) => {
                            tracing::trace!("MQTT: {:?}", cmd);
                            cmd.apply(input);
                        },
                        None => tracing::debug!("MQTT: unrecognised command {:?}", text),
                    }
                },
                Ok(_) => {},
                Err(e) => {
                    // Connection may recover; rumqttc reconnects on the next poll
                    tracing::warn!("MQTT error: {}", e);
                    thread::sleep(Duration::from_secs(1));
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_button() {
        assert_eq!(
            parse_command(r#"{"button": "fire", "pressed": true}"#),
            Some(RemoteCommand::Press(Button::Fire))
        );
        assert_eq!(
            parse_command(r#"{"button": "left", "pressed": false}"#),
            Some(RemoteCommand::Release(Button::Left))
        );
    }

    #[test]
    fn test_parse_json_pointer() {
        assert_eq!(
            parse_command(r#"{"pointer": [120, -4]}"#),
            Some(RemoteCommand::Pointer(120, -4))
        );
    }

    #[test]
    fn test_parse_plain_text() {
        assert_eq!(parse_command("down USE"), Some(RemoteCommand::Press(Button::Use)));
        assert_eq!(parse_command(" up run \n"), Some(RemoteCommand::Release(Button::Run)));
        assert_eq!(parse_command("pointer 10 20"), Some(RemoteCommand::Pointer(10, 20)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("down jump"), None);
        assert_eq!(parse_command("pointer 10"), None);
        assert_eq!(parse_command("dance"), None);
        assert_eq!(parse_command(r#"{"button": "fire"}"#), None);
    }

    #[test]
    fn test_apply_updates_input() {
        let input = InputState::new();
        RemoteCommand::Press(Button::Up).apply(&input);
        RemoteCommand::Pointer(7, 8).apply(&input);
        assert!(input.current_keys().contains(Button::Up));
        assert_eq!(input.pointer(), Some((7, 8)));
        RemoteCommand::Release(Button::Up).apply(&input);
        assert!(input.current_keys().is_empty());
    }
}
