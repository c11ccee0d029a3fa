use std::collections::{HashSet, VecDeque};

use crossterm::style::Color;

use crate::Coords;
use crate::config::GameMode;
use crate::entity::{Entity, EntityId, EntityKind, Surface};
use crate::message::{Message, PlayerId};
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// Unit vector, with y growing downwards.
    pub fn offset(self) -> Coords {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

pub struct Snake {
    body: VecDeque<Coords>, // head first
    direction: Direction,
    max_length: usize,
    player: PlayerId,
    color: Color,
    mode: GameMode,
}

impl Snake {
    /// Lays out `length` cells ending at `head`, trailing behind it.
    pub fn new(head: Coords, length: usize, direction: Direction, player: PlayerId, color: Color, mode: GameMode) -> Self {
        let diff = direction.offset();

        let body = (0..length as i32)
            .map(|i| (head.0 - diff.0 * i, head.1 - diff.1 * i))
            .collect();
        Snake { body, direction, max_length: length, player, color, mode }
    }

    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    pub fn head(&self) -> Option<Coords> {
        self.body.front().copied()
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Turning back onto the own neck is refused.
    pub fn set_direction(&mut self, new_direction: Direction) {
        if new_direction != self.direction.opposite() {
            self.direction = new_direction;
        }
    }

    /// Moves the head one cell forward and trims the tail down to `max_length`.
    pub fn move_step(&mut self) {
        let Some(old_head) = self.head() else {
            return;
        };

        let diff = self.direction.offset();
        self.body.push_front((old_head.0 + diff.0, old_head.1 + diff.1));

        while self.body.len() > self.max_length {
            self.body.pop_back();
        }
    }

    fn listens_to(&self, player: PlayerId) -> bool {
        match self.mode {
            GameMode::SinglePlayer => true,
            GameMode::Multiplayer => player == self.player,
        }
    }

    /// What a deadly collision turns into: the end of the game when playing
    /// alone, elimination of this snake otherwise.
    fn crash(&self, me: EntityId, reason: &str) -> Message {
        match self.mode {
            GameMode::SinglePlayer => Message::game_over(reason),
            GameMode::Multiplayer => Message::RemoveEntity(me),
        }
    }
}

impl Entity for Snake {
    fn kind(&self) -> EntityKind {
        EntityKind::Snake
    }

    fn render(&self, surface: &mut dyn Surface) {
        let head_color = darken(self.color, 0.8);

        for (i, pos) in self.body.iter().enumerate() {
            let color = if i == 0 { head_color } else { self.color };
            surface.set_cell(*pos, color);
        }
    }

    fn update(&mut self, me: EntityId, messages: &[Message]) -> Vec<Message> {
        let mut new_messages = vec![];

        for message in messages {
            match message {
                Message::ChangeDirection { player, direction } if self.listens_to(*player) => {
                    self.set_direction(*direction);
                }
                Message::EntityCollision { entity, other } if entity.id == me => {
                    if other.id == me {
                        new_messages.push(self.crash(me, "Snake bit its tail"));
                        continue;
                    }

                    match other.kind {
                        EntityKind::Wall => new_messages.push(self.crash(me, "Snake hit wall")),
                        EntityKind::Food => {
                            self.max_length += 1;
                            new_messages.push(Message::RemoveEntity(other.id));
                            new_messages.push(Message::SpawnFood);
                        }
                        EntityKind::Snake => {}
                    }
                }
                _ => {}
            }
        }

        // The body advances even on the step a crash is reported
        self.move_step();

        new_messages
    }

    fn extent(&self) -> HashSet<Coords> {
        self.body.iter().copied().collect()
    }

    fn collides_with_itself(&self) -> bool {
        self.extent().len() != self.body.len()
    }

    fn as_snake(&self) -> Option<&Snake> {
        Some(self)
    }
}

fn darken(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb { r, g, b } => Color::Rgb {
            r: (r as f32 * factor) as u8,
            g: (g as f32 * factor) as u8,
            b: (b as f32 * factor) as u8,
        },
        other => other,
    }
}
