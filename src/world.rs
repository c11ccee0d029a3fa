use std::collections::HashSet;

use crossterm::style::Color;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{GameConfig, GameMode};
use crate::entity::{Entity, EntityId, EntityKind, Surface};
use crate::error::WorldError;
use crate::food::Food;
use crate::input::{Command, InputEvent, KeyBindings};
use crate::message::{EntityRef, Message, PlayerId};
use crate::snake::{Direction, Snake};
use crate::wall::Wall;

/// Random placements tried per `SpawnFood` before the board counts as full.
pub const SPAWN_ATTEMPTS: usize = 100;

pub const ALL_PLAYERS_OUT: &str = "all players are out of the game";

const BACKGROUND: Color = Color::Rgb { r: 255, g: 255, b: 255 };
const PLAYER_COLORS: [Color; 2] = [
    Color::Rgb { r: 0, g: 255, b: 0 },
    Color::Rgb { r: 112, g: 214, b: 255 },
];

struct Slot {
    id: EntityId,
    entity: Box<dyn Entity>,
}

impl Slot {
    fn handle(&self) -> EntityRef {
        EntityRef { id: self.id, kind: self.entity.kind() }
    }
}

/// Owns every entity and the message queue, and advances the game one step
/// at a time. Entities never see each other; they only see messages.
pub struct World {
    width: i32,
    height: i32,
    mode: GameMode,
    initial_length: usize,
    bindings: KeyBindings,
    entities: Vec<Slot>, // insertion order is render and update order
    queue: Vec<Message>,
    next_id: u64,
    running: bool,
    paused: bool,
    game_over: Option<String>,
    rng: StdRng,
}

impl World {
    pub fn new(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        World {
            width: config.width,
            height: config.height,
            mode: config.mode,
            initial_length: config.initial_length,
            bindings: KeyBindings::for_mode(config.mode),
            entities: vec![],
            queue: vec![],
            next_id: 0,
            running: true,
            paused: false,
            game_over: None,
            rng,
        }
    }

    /// Border wall, one snake per player and a pending food spawn.
    pub fn populate(&mut self) {
        let (w, h) = (self.width, self.height);
        let head_x = std::cmp::max(self.initial_length as i32, w / 4);
        let rows = match self.mode {
            GameMode::SinglePlayer => vec![h / 2],
            GameMode::Multiplayer => vec![h / 3, 2 * h / 3],
        };

        for (i, y) in rows.into_iter().enumerate() {
            let player = i as PlayerId + 1;
            let color = PLAYER_COLORS[i % PLAYER_COLORS.len()];
            let snake = Snake::new((head_x, y), self.initial_length, Direction::Right, player, color, self.mode);
            self.spawn(snake);
        }

        self.spawn(Wall::border(w, h));
        self.post(Message::SpawnFood);

        info!("new {}-player game on a {}x{} grid", self.mode.players(), w, h);
    }

    pub fn spawn<E: Entity + 'static>(&mut self, entity: E) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.push(Slot { id, entity: Box::new(entity) });
        id
    }

    /// Queues a message for the next step.
    pub fn post(&mut self, message: Message) {
        self.queue.push(message);
    }

    /// One step: input, collisions, entity updates, then global messages.
    pub fn update(&mut self, events: &[InputEvent]) -> Result<(), WorldError> {
        if !self.ingest_input(events) {
            self.queue.clear();
            return Ok(());
        }

        self.detect_collisions();

        let produced = self.update_entities();
        self.queue.extend(produced);

        // Snakes already marked for removal count as gone, so the game ends
        // on the step the last one is eliminated rather than the step after
        if self.mode == GameMode::Multiplayer && !self.any_snake_survives() {
            self.queue.push(Message::game_over(ALL_PLAYERS_OUT));
        }

        // Taking the queue empties it, whatever way processing ends
        let messages = std::mem::take(&mut self.queue);
        self.process_messages(&messages)
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.fill(BACKGROUND);

        for slot in &self.entities {
            slot.entity.render(surface);
        }
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over_reason(&self) -> Option<&str> {
        self.game_over.as_deref()
    }

    pub fn entity(&self, id: EntityId) -> Option<&dyn Entity> {
        self.entities.iter().find(|s| s.id == id).map(|s| s.entity.as_ref())
    }

    pub fn snakes(&self) -> impl Iterator<Item = &Snake> {
        self.entities.iter().filter_map(|s| s.entity.as_snake())
    }

    pub fn snake(&self, player: PlayerId) -> Option<&Snake> {
        self.snakes().find(|s| s.player() == player)
    }

    pub fn food_count(&self) -> usize {
        self.count(EntityKind::Food)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    ///////////////////////////////////////////////////////////////////////////

    /// Returns whether the step should go on.
    fn ingest_input(&mut self, events: &[InputEvent]) -> bool {
        for event in events {
            match event {
                InputEvent::Quit => {
                    info!("quit requested");
                    self.running = false;
                    return false;
                }
                InputEvent::KeyDown(code) => match self.bindings.resolve(code) {
                    Some(Command::Steer { player, direction }) => {
                        self.queue.push(Message::ChangeDirection { player, direction });
                    }
                    Some(Command::TogglePause) => {
                        self.paused = !self.paused;
                        debug!("paused: {}", self.paused);
                    }
                    None => {}
                },
            }
        }

        !self.paused
    }

    /// Every unordered pair once, an entity paired with itself included.
    /// A hit is reported from both sides.
    fn detect_collisions(&mut self) {
        let n = self.entities.len();

        for i in 0..n {
            for j in i..n {
                let (a, b) = (&self.entities[i], &self.entities[j]);
                let hit = if i == j {
                    a.entity.collides_with_itself()
                } else {
                    a.entity.collides_with(b.entity.as_ref())
                };

                if hit {
                    let (a, b) = (a.handle(), b.handle());
                    self.queue.push(Message::EntityCollision { entity: a, other: b });
                    self.queue.push(Message::EntityCollision { entity: b, other: a });
                }
            }
        }
    }

    /// All entities see the same queue; their output is only appended
    /// once everyone has run.
    fn update_entities(&mut self) -> Vec<Message> {
        let mut produced = vec![];

        for slot in &mut self.entities {
            produced.extend(slot.entity.update(slot.id, &self.queue));
        }

        produced
    }

    fn any_snake_survives(&self) -> bool {
        let removed: HashSet<EntityId> = self.queue.iter()
            .filter_map(|m| match m {
                Message::RemoveEntity(id) => Some(*id),
                _ => None,
            })
            .collect();

        self.entities.iter()
            .any(|s| s.entity.kind() == EntityKind::Snake && !removed.contains(&s.id))
    }

    fn process_messages(&mut self, messages: &[Message]) -> Result<(), WorldError> {
        for message in messages {
            debug!("{:?}", message);

            match message {
                Message::GameOver { reason } => {
                    info!("game over: {}", reason);
                    self.game_over = Some(reason.clone());
                    self.running = false;
                    return Ok(());
                }
                Message::RemoveEntity(id) => self.remove(*id),
                Message::SpawnFood => self.spawn_food()?,
                Message::ChangeDirection { .. } | Message::EntityCollision { .. } => {}
            }
        }

        Ok(())
    }

    fn remove(&mut self, id: EntityId) {
        match self.entities.iter().position(|s| s.id == id) {
            Some(index) => {
                self.entities.remove(index);
            }
            None => debug!("entity {} already removed", id),
        }
    }

    fn spawn_food(&mut self) -> Result<(), WorldError> {
        if self.food_count() > 0 {
            debug!("food already on the board, spawn skipped");
            return Ok(());
        }

        for _ in 0..SPAWN_ATTEMPTS {
            let pos = (self.rng.gen_range(0..self.width), self.rng.gen_range(0..self.height));
            let candidate = Food::new(pos);

            if !self.entities.iter().any(|s| s.entity.collides_with(&candidate)) {
                self.spawn(candidate);
                return Ok(());
            }
        }

        Err(WorldError::NoFreeCell { attempts: SPAWN_ATTEMPTS })
    }

    fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|s| s.entity.kind() == kind).count()
    }
}
