use std::collections::HashSet;

use crossterm::style::Color;

use crate::Coords;
use crate::entity::{Entity, EntityKind, Surface};

const FOOD_COLOR: Color = Color::Rgb { r: 255, g: 0, b: 0 };

pub struct Food {
    position: Coords,
}

impl Food {
    pub fn new(position: Coords) -> Self {
        Food { position }
    }

    pub fn position(&self) -> Coords {
        self.position
    }
}

impl Entity for Food {
    fn kind(&self) -> EntityKind {
        EntityKind::Food
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.set_cell(self.position, FOOD_COLOR);
    }

    fn extent(&self) -> HashSet<Coords> {
        std::iter::once(self.position).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::testing::Canvas;

    #[test]
    fn test_food_occupies_one_cell() {
        let food = Food::new((3, 4));
        assert_eq!(food.position(), (3, 4));
        assert_eq!(food.extent(), [(3, 4)].iter().copied().collect());
        assert_eq!(food.kind(), EntityKind::Food);
    }

    #[test]
    fn test_food_renders_red() {
        let mut canvas = Canvas::default();
        Food::new((3, 4)).render(&mut canvas);
        assert_eq!(canvas.cells.get(&(3, 4)), Some(&FOOD_COLOR));
        assert_eq!(canvas.cells.len(), 1);
    }
}
