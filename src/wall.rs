use std::collections::HashSet;

use crossterm::style::Color;

use crate::Coords;
use crate::entity::{Entity, EntityKind, Surface};

const DARK_STONE: Color = Color::Rgb { r: 100, g: 100, b: 100 };
const LIGHT_STONE: Color = Color::Rgb { r: 120, g: 120, b: 120 };

pub struct Wall {
    positions: HashSet<Coords>,
}

impl Wall {
    pub fn new<I: IntoIterator<Item = Coords>>(positions: I) -> Self {
        Wall { positions: positions.into_iter().collect() }
    }

    /// The outermost ring of a `width` x `height` grid.
    pub fn border(width: i32, height: i32) -> Self {
        let horizontal = (0..width).flat_map(|x| vec![(x, 0), (x, height - 1)]);
        let vertical = (0..height).flat_map(|y| vec![(0, y), (width - 1, y)]);
        Wall::new(horizontal.chain(vertical))
    }
}

impl Entity for Wall {
    fn kind(&self) -> EntityKind {
        EntityKind::Wall
    }

    fn render(&self, surface: &mut dyn Surface) {
        for &(x, y) in &self.positions {
            let color = if (x + y) % 2 == 0 { DARK_STONE } else { LIGHT_STONE };
            surface.set_cell((x, y), color);
        }
    }

    fn extent(&self) -> HashSet<Coords> {
        self.positions.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::testing::Canvas;

    #[test]
    fn test_border_covers_ring_only() {
        let wall = Wall::border(5, 4);
        let extent = wall.extent();

        // 2 * 5 + 2 * 4 - 4 corners counted twice
        assert_eq!(extent.len(), 14);
        assert!(extent.contains(&(0, 0)));
        assert!(extent.contains(&(4, 3)));
        assert!(extent.contains(&(0, 2)));
        assert!(!extent.contains(&(1, 1)));
        assert!(!extent.contains(&(3, 2)));
    }

    #[test]
    fn test_checkerboard_shading() {
        let mut canvas = Canvas::default();
        Wall::border(4, 4).render(&mut canvas);

        assert_eq!(canvas.cells.get(&(0, 0)), Some(&DARK_STONE));
        assert_eq!(canvas.cells.get(&(1, 0)), Some(&LIGHT_STONE));
        assert_eq!(canvas.cells.get(&(3, 3)), Some(&DARK_STONE));
        assert_eq!(canvas.cells.len(), 12);
    }
}
