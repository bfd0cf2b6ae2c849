//! The player session: which entity is "the player" for this run.

use orbitcam_scene::{Entity, Scene};
use tracing::info;

use crate::SessionError;

/// Player reference resolved once when the scene is composed.
///
/// Sessions are plain values. Building a second one against the same scene
/// is allowed and leaves the first untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    player: Entity,
    player_name: String,
}

impl Session {
    /// Looks up the entity named `player_name`.
    pub fn new(scene: &Scene, player_name: &str) -> Result<Self, SessionError> {
        let player = scene
            .find(player_name)
            .ok_or_else(|| SessionError::MissingPlayer(player_name.to_string()))?;
        info!("Session bound to player `{player_name}` ({player})");
        Ok(Self {
            player,
            player_name: player_name.to_string(),
        })
    }

    /// The player entity.
    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }
}
