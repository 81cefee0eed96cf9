use rand::Rng;
use std::io;

use crate::render::{Rect, Surface};
use crate::scene::ParallaxEl;
use crate::sprites::Sheet;

pub const CLOUD_WIDTH: i32 = 8;
pub const CLOUD_HEIGHT: i32 = 3;
pub const MIN_CLOUD_GAP: i32 = 20;
pub const MAX_CLOUD_GAP: i32 = 80;
/// Sky band the cloud may occupy. Y grows downward, so the "max" level is
/// the smaller number.
pub const MAX_SKY_LEVEL: i32 = 2;
pub const MIN_SKY_LEVEL: i32 = 12;

/// Background cloud. Similar to an obstacle but without collision boxes.
pub struct Cloud {
    sheet: Sheet,
    sprite_pos: (i32, i32),
    x_pos: i32,
    y_pos: i32,
    gap: i32,
    remove: bool,
}

impl Cloud {
    pub fn new(sheet: Sheet, sprite_pos: (i32, i32), container_width: i32) -> Self {
        let mut rng = rand::rng();
        Self {
            sheet,
            sprite_pos,
            x_pos: container_width,
            y_pos: rng.random_range(MAX_SKY_LEVEL..=MIN_SKY_LEVEL),
            gap: rng.random_range(MIN_CLOUD_GAP..=MAX_CLOUD_GAP),
            remove: false,
        }
    }

    fn is_visible(&self) -> bool {
        self.x_pos + CLOUD_WIDTH > 0
    }

    fn draw(&self, surface: &mut dyn Surface) -> io::Result<()> {
        surface.blit(
            self.sheet,
            Rect::new(self.sprite_pos.0, self.sprite_pos.1, CLOUD_WIDTH, CLOUD_HEIGHT),
            Rect::new(self.x_pos, self.y_pos, CLOUD_WIDTH, CLOUD_HEIGHT),
            1.0,
        )
    }
}

impl ParallaxEl for Cloud {
    fn update(&mut self, speed: f64, surface: &mut dyn Surface) -> io::Result<()> {
        if self.remove {
            return Ok(());
        }
        self.x_pos -= speed.ceil() as i32;
        self.draw(surface)?;
        if !self.is_visible() {
            self.remove = true;
        }
        Ok(())
    }

    fn x_pos(&self) -> i32 {
        self.x_pos
    }

    fn gap(&self) -> i32 {
        self.gap
    }

    fn is_removed(&self) -> bool {
        self.remove
    }
}
