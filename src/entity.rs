use std::collections::HashSet;
use std::fmt;

use crossterm::style::Color;

use crate::Coords;
use crate::message::Message;
use crate::snake::Snake;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub(crate) u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Food,
    Wall,
    Snake,
}

/// Whatever the entities draw into: one colour per grid cell.
pub trait Surface {
    fn fill(&mut self, color: Color);
    fn set_cell(&mut self, pos: Coords, color: Color);
}

/// Capability set shared by everything that lives in the world.
///
/// Only `kind` is mandatory. The defaults describe an entity with no spatial
/// presence that never draws and never reacts to messages.
pub trait Entity {
    fn kind(&self) -> EntityKind;

    fn render(&self, _surface: &mut dyn Surface) {}

    /// Reacts to this step's messages. `me` is the id the world stores this
    /// entity under, so collision messages can be matched against it.
    fn update(&mut self, _me: EntityId, _messages: &[Message]) -> Vec<Message> {
        Vec::new()
    }

    fn extent(&self) -> HashSet<Coords> {
        HashSet::new()
    }

    /// Collision with a different entity: the extents intersect.
    fn collides_with(&self, other: &dyn Entity) -> bool {
        !self.extent().is_disjoint(&other.extent())
    }

    /// Collision of an entity with itself. Never, unless a variant says so.
    fn collides_with_itself(&self) -> bool {
        false
    }

    fn as_snake(&self) -> Option<&Snake> {
        None
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    struct Marker(Vec<Coords>);

    impl Entity for Marker {
        fn kind(&self) -> EntityKind {
            EntityKind::Food
        }

        fn extent(&self) -> HashSet<Coords> {
            self.0.iter().copied().collect()
        }
    }

    struct Ghost;

    impl Entity for Ghost {
        fn kind(&self) -> EntityKind {
            EntityKind::Wall
        }
    }

    #[test]
    fn test_default_collision_is_extent_overlap() {
        let a = Marker(vec![(1, 1), (2, 1)]);
        let b = Marker(vec![(2, 1)]);
        let c = Marker(vec![(5, 5)]);

        assert!(a.collides_with(&b));
        assert!(b.collides_with(&a));
        assert!(!a.collides_with(&c));
    }

    #[test]
    fn test_default_never_collides_with_itself() {
        let a = Marker(vec![(1, 1), (1, 1)]);
        assert!(!a.collides_with_itself());
    }

    #[test]
    fn test_defaults_without_extent() {
        let mut ghost = Ghost;
        assert!(ghost.extent().is_empty());
        assert!(ghost.update(EntityId(0), &[Message::SpawnFood]).is_empty());
        assert!(!ghost.collides_with(&Marker(vec![(0, 0)])));
        assert!(ghost.as_snake().is_none());
    }

    #[test]
    fn test_entity_id_display() {
        assert_eq!(EntityId(7).to_string(), "#7");
    }
}
