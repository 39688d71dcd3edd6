//! Relay wire protocol
//!
//! Every frame is one JSON object with a `type` tag. Clients only ever
//! send their own position; the relay answers with membership changes
//! and full position snapshots. Malformed frames are dropped, never
//! answered.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One player's pose inside a state broadcast. Coordinates are whole
/// pixels on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPos {
    pub x: i32,
    pub y: i32,
    #[serde(rename = "flipX", default)]
    pub flip_x: bool,
}

/// Relay-to-client frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMsg {
    /// First frame after connect; tells the client its own id.
    Hello { id: String },
    Join { id: String },
    Leave { id: String },
    /// Full snapshot of every peer that has reported a position.
    State { players: BTreeMap<String, PlayerPos> },
}

/// Client-to-relay frames. Coordinates arrive as floats and are
/// truncated by the relay before rebroadcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientMsg {
    State {
        x: f64,
        y: f64,
        #[serde(rename = "flipX", default)]
        flip_x: bool,
    },
}

pub fn encode_server(msg: &ServerMsg) -> String {
    // Tagged enums of plain fields always serialize.
    serde_json::to_string(msg).unwrap_or_default()
}

pub fn encode_client(msg: &ClientMsg) -> String {
    serde_json::to_string(msg).unwrap_or_default()
}

/// Parse a frame from a client, dropping anything malformed.
pub fn parse_client(raw: &str) -> Option<ClientMsg> {
    match serde_json::from_str(raw) {
        Ok(msg) => Some(msg),
        Err(err) => {
            log::debug!("dropping malformed client frame: {err}");
            None
        }
    }
}

/// Parse a frame from the relay, dropping anything malformed.
pub fn parse_server(raw: &str) -> Option<ServerMsg> {
    match serde_json::from_str(raw) {
        Ok(msg) => Some(msg),
        Err(err) => {
            log::debug!("dropping malformed relay frame: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_state_wire_format() {
        let msg = ClientMsg::State {
            x: 312.0,
            y: 468.0,
            flip_x: true,
        };
        assert_eq!(
            encode_client(&msg),
            r#"{"type":"state","x":312.0,"y":468.0,"flipX":true}"#
        );
    }

    #[test]
    fn test_server_frames_round_trip() {
        let mut players = BTreeMap::new();
        players.insert(
            "p1".to_owned(),
            PlayerPos {
                x: 200,
                y: 468,
                flip_x: false,
            },
        );
        for msg in [
            ServerMsg::Hello {
                id: "p1".to_owned(),
            },
            ServerMsg::Join {
                id: "p2".to_owned(),
            },
            ServerMsg::Leave {
                id: "p2".to_owned(),
            },
            ServerMsg::State { players },
        ] {
            let raw = encode_server(&msg);
            assert_eq!(parse_server(&raw), Some(msg));
        }
    }

    #[test]
    fn test_hello_tag_is_lowercase() {
        let raw = encode_server(&ServerMsg::Hello {
            id: "p7".to_owned(),
        });
        assert_eq!(raw, r#"{"type":"hello","id":"p7"}"#);
    }

    #[test]
    fn test_flip_x_defaults_when_absent() {
        let msg = parse_client(r#"{"type":"state","x":1,"y":2}"#);
        assert_eq!(
            msg,
            Some(ClientMsg::State {
                x: 1.0,
                y: 2.0,
                flip_x: false,
            })
        );
    }

    #[test]
    fn test_malformed_frames_dropped() {
        for raw in [
            "",
            "not json",
            r#"{"type":"warp","x":1}"#,
            r#"{"x":1,"y":2}"#,
            r#"{"type":"state","x":"far","y":2}"#,
        ] {
            assert_eq!(parse_client(raw), None);
        }
        assert_eq!(parse_server(r#"{"type":"state"}"#), None);
    }
}
