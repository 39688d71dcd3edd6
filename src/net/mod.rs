//! Position relay bookkeeping
//!
//! The relay shares nothing but player positions: no authority, no
//! simulation state. [`RelayHub`] is the server side, transport left to
//! the host; feed it raw frames and deliver what it returns. Remote
//! players are ghosts only, they never join the local simulation.

pub mod protocol;

use std::collections::{BTreeMap, BTreeSet};

pub use protocol::{ClientMsg, PlayerPos, ServerMsg};

/// Server-side connection registry. Ids are handed out in connect order
/// and never reused within a hub's lifetime.
#[derive(Debug, Default)]
pub struct RelayHub {
    next_peer: u32,
    connected: BTreeSet<String>,
    positions: BTreeMap<String, PlayerPos>,
}

impl RelayHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new connection. Returns the peer id, the hello frame
    /// for that peer, and the join frame to broadcast to everyone else.
    pub fn connect(&mut self) -> (String, ServerMsg, ServerMsg) {
        self.next_peer += 1;
        let id = format!("p{}", self.next_peer);
        self.connected.insert(id.clone());
        log::info!("relay: {id} connected ({} online)", self.connected.len());
        (
            id.clone(),
            ServerMsg::Hello { id: id.clone() },
            ServerMsg::Join { id },
        )
    }

    /// Process one raw frame from `id`. A valid position update yields
    /// the state snapshot to broadcast; anything else yields nothing.
    pub fn handle_message(&mut self, id: &str, raw: &str) -> Option<ServerMsg> {
        if !self.connected.contains(id) {
            log::debug!("relay: frame from unknown peer {id}");
            return None;
        }
        let ClientMsg::State { x, y, flip_x } = protocol::parse_client(raw)?;
        self.positions.insert(
            id.to_owned(),
            PlayerPos {
                x: x as i32,
                y: y as i32,
                flip_x,
            },
        );
        Some(ServerMsg::State {
            players: self.positions.clone(),
        })
    }

    /// Drop a connection. Returns the leave frame to broadcast.
    pub fn disconnect(&mut self, id: &str) -> ServerMsg {
        self.connected.remove(id);
        self.positions.remove(id);
        log::info!("relay: {id} disconnected ({} online)", self.connected.len());
        ServerMsg::Leave { id: id.to_owned() }
    }

    pub fn online(&self) -> usize {
        self.connected.len()
    }
}

/// Client-side view of the relay: our assigned id plus the latest ghost
/// positions of everyone else.
#[derive(Debug, Default)]
pub struct RelayClientState {
    local_id: Option<String>,
    remote: BTreeMap<String, PlayerPos>,
}

impl RelayClientState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one frame from the relay.
    pub fn apply(&mut self, msg: ServerMsg) {
        match msg {
            ServerMsg::Hello { id } => {
                self.local_id = Some(id);
            }
            ServerMsg::Join { .. } => {}
            ServerMsg::Leave { id } => {
                self.remote.remove(&id);
            }
            // Snapshots replace the ghost set wholesale; our own entry
            // is not a ghost.
            ServerMsg::State { mut players } => {
                if let Some(id) = &self.local_id {
                    players.remove(id);
                }
                self.remote = players;
            }
        }
    }

    /// Build the position report frame for this tick.
    pub fn position_report(x: f32, y: f32, flip_x: bool) -> ClientMsg {
        ClientMsg::State {
            x: x as f64,
            y: y as f64,
            flip_x,
        }
    }

    pub fn local_id(&self) -> Option<&str> {
        self.local_id.as_deref()
    }

    pub fn ghosts(&self) -> &BTreeMap<String, PlayerPos> {
        &self.remote
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hub_assigns_sequential_ids() {
        let mut hub = RelayHub::new();
        let (a, hello, join) = hub.connect();
        let (b, ..) = hub.connect();
        assert_eq!(a, "p1");
        assert_eq!(b, "p2");
        assert_eq!(hello, ServerMsg::Hello { id: "p1".into() });
        assert_eq!(join, ServerMsg::Join { id: "p1".into() });
        assert_eq!(hub.online(), 2);
    }

    #[test]
    fn test_hub_broadcasts_truncated_positions() {
        let mut hub = RelayHub::new();
        let (id, ..) = hub.connect();

        let broadcast = hub
            .handle_message(&id, r#"{"type":"state","x":312.9,"y":468.2,"flipX":true}"#)
            .unwrap();
        let ServerMsg::State { players } = broadcast else {
            panic!("expected a state broadcast");
        };
        assert_eq!(
            players.get(&id),
            Some(&PlayerPos {
                x: 312,
                y: 468,
                flip_x: true,
            })
        );
    }

    #[test]
    fn test_hub_ignores_garbage_and_strangers() {
        let mut hub = RelayHub::new();
        let (id, ..) = hub.connect();
        assert_eq!(hub.handle_message(&id, "{nope"), None);
        assert_eq!(
            hub.handle_message("p99", r#"{"type":"state","x":1,"y":2}"#),
            None
        );
    }

    #[test]
    fn test_disconnect_prunes_position() {
        let mut hub = RelayHub::new();
        let (a, ..) = hub.connect();
        let (b, ..) = hub.connect();
        hub.handle_message(&a, r#"{"type":"state","x":1,"y":2}"#);
        hub.handle_message(&b, r#"{"type":"state","x":3,"y":4}"#);

        let leave = hub.disconnect(&a);
        assert_eq!(leave, ServerMsg::Leave { id: a.clone() });
        assert_eq!(hub.online(), 1);

        let ServerMsg::State { players } = hub
            .handle_message(&b, r#"{"type":"state","x":3,"y":4}"#)
            .unwrap()
        else {
            panic!("expected a state broadcast");
        };
        assert!(!players.contains_key(&a));
    }

    #[test]
    fn test_client_drops_own_ghost() {
        let mut client = RelayClientState::new();
        client.apply(ServerMsg::Hello { id: "p1".into() });
        assert_eq!(client.local_id(), Some("p1"));

        let mut players = BTreeMap::new();
        players.insert("p1".into(), PlayerPos { x: 1, y: 2, flip_x: false });
        players.insert("p2".into(), PlayerPos { x: 3, y: 4, flip_x: true });
        client.apply(ServerMsg::State { players });

        assert_eq!(client.ghosts().len(), 1);
        assert!(client.ghosts().contains_key("p2"));

        client.apply(ServerMsg::Leave { id: "p2".into() });
        assert!(client.ghosts().is_empty());
    }
}
