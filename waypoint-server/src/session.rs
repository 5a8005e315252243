//! Session management.

use crate::config::SpawnConfig;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};
use uuid::Uuid;
use waypoint_protocol::CharacterView;

/// Identifiers are handed out from here, upward.
const FIRST_CHARACTER_ID: u32 = 1_000_000;

static NEXT_CHARACTER_ID: AtomicU32 = AtomicU32::new(FIRST_CHARACTER_ID);

/// The character a session controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Character {
    pub character_id: u32,
    pub map_id: u32,
    pub x: u16,
    pub y: u16,
}

impl Character {
    /// Creates a character with a fresh id at the spawn point.
    pub fn spawn(spawn: &SpawnConfig) -> Self {
        Self {
            character_id: NEXT_CHARACTER_ID.fetch_add(1, Ordering::Relaxed),
            map_id: spawn.map_id,
            x: spawn.x,
            y: spawn.y,
        }
    }
}

/// A client session.
///
/// Owned by the connection task; packets of one connection are processed
/// strictly in order.
pub struct Session {
    /// Unique session ID.
    pub id: String,

    /// Remote address.
    pub remote_addr: SocketAddr,

    /// Controlled character.
    character: Character,

    /// Packets processed.
    packet_count: u64,

    /// Session creation time.
    created_at: Instant,

    /// Last activity time.
    last_activity: Instant,
}

impl Session {
    /// Creates a new session.
    pub fn new(remote_addr: SocketAddr, character: Character) -> Self {
        let now = Instant::now();
        Self {
            id: Uuid::new_v4().to_string(),
            remote_addr,
            character,
            packet_count: 0,
            created_at: now,
            last_activity: now,
        }
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }

    /// Records a processed packet.
    pub fn record_packet(&mut self) {
        self.packet_count += 1;
        self.last_activity = Instant::now();
    }

    pub fn packet_count(&self) -> u64 {
        self.packet_count
    }

    /// Returns the time since last activity.
    pub fn idle_duration(&self) -> Duration {
        self.last_activity.elapsed()
    }

    /// Returns the session age.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }
}

impl CharacterView for Session {
    fn character_id(&self) -> u32 {
        self.character.character_id
    }

    fn map_id(&self) -> u32 {
        self.character.map_id
    }

    fn x(&self) -> u16 {
        self.character.x
    }

    fn y(&self) -> u16 {
        self.character.y
    }
}
