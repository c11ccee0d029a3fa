use crate::entity::{EntityId, EntityKind};
use crate::snake::Direction;

pub type PlayerId = u8;

/// Non-owning handle to an entity, tagged with its variant so receivers
/// can tell a wall from food without looking the entity up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityRef {
    pub id: EntityId,
    pub kind: EntityKind,
}

/// The only channel entities have to talk to each other and to the world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    ChangeDirection { player: PlayerId, direction: Direction },
    SpawnFood,
    RemoveEntity(EntityId),
    EntityCollision { entity: EntityRef, other: EntityRef },
    GameOver { reason: String },
}

impl Message {
    pub fn game_over(reason: &str) -> Self {
        Message::GameOver { reason: reason.to_string() }
    }
}
