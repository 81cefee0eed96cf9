use rand::random;
use std::io;

use crate::constants::FPS;
use crate::render::{Rect, Surface};
use crate::sprites::{LineConfig, Sheet};

const BUMP_THRESHOLD: f64 = 0.5;

/// Infinite scrolling ground line built from two connecting segments.
///
/// The trailing segment is always kept exactly adjacent to the active one, so
/// no seam is ever visible. Whenever a segment wraps back to the right it
/// re-randomizes its source crop (flat vs bumpy), which yields a patchwork
/// ground from only two textures.
pub struct HorizonLine {
    sheet: Sheet,
    sprite_pos: (i32, i32),
    source_x_pos: [i32; 2],
    x_pos: [i32; 2],
    y_pos: i32,
    width: i32,
    height: i32,
}

impl HorizonLine {
    pub fn new(config: &LineConfig, sheet: Sheet) -> Self {
        Self {
            sheet,
            sprite_pos: (config.source_x, config.source_y),
            source_x_pos: [config.source_x, config.source_x + config.width],
            x_pos: [0, config.width],
            y_pos: config.y_pos,
            width: config.width,
            height: config.height,
        }
    }

    /// Source crop x for a freshly wrapped segment: bumpy or flat.
    fn random_crop_offset(&self) -> i32 {
        if random::<f64>() > BUMP_THRESHOLD {
            self.width
        } else {
            0
        }
    }

    fn update_x_pos(&mut self, pos: usize, increment: i32) {
        let line1 = pos;
        let line2 = if pos == 0 { 1 } else { 0 };

        self.x_pos[line1] -= increment;
        self.x_pos[line2] = self.x_pos[line1] + self.width;

        if self.x_pos[line1] <= -self.width {
            self.x_pos[line1] += self.width * 2;
            self.x_pos[line2] = self.x_pos[line1] - self.width;
            self.source_x_pos[line1] = self.random_crop_offset() + self.sprite_pos.0;
        }
    }

    pub fn update(
        &mut self,
        delta: f64,
        speed: f64,
        surface: &mut dyn Surface,
    ) -> io::Result<()> {
        let increment = (speed * (FPS / 1000.0) * delta).floor() as i32;
        let active = if self.x_pos[0] <= 0 { 0 } else { 1 };
        self.update_x_pos(active, increment);
        self.draw(surface)
    }

    fn draw(&self, surface: &mut dyn Surface) -> io::Result<()> {
        for segment in 0..2 {
            surface.blit(
                self.sheet,
                Rect::new(
                    self.source_x_pos[segment],
                    self.sprite_pos.1,
                    self.width,
                    self.height,
                ),
                Rect::new(self.x_pos[segment], self.y_pos, self.width, self.height),
                1.0,
            )?;
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        self.x_pos = [0, self.width];
    }

    pub fn x_positions(&self) -> [i32; 2] {
        self.x_pos
    }

    pub fn width(&self) -> i32 {
        self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NoopSurface;
    use crate::sprites;

    fn test_line() -> HorizonLine {
        let def = sprites::default_definition();
        HorizonLine::new(&def.lines[0], def.sheet)
    }

    fn assert_adjacent(line: &HorizonLine) {
        let [x0, x1] = line.x_positions();
        let w = line.width();
        assert!(
            x1 == x0 + w || x0 == x1 + w,
            "segments drifted apart: x0={x0} x1={x1} width={w}"
        );
    }

    #[test]
    fn test_segments_stay_adjacent_across_many_updates() {
        let mut line = test_line();
        let mut surface = NoopSurface;
        for _ in 0..5000 {
            line.update(16.0, 9.0, &mut surface).unwrap();
            assert_adjacent(&line);
        }
    }

    #[test]
    fn test_reset_restores_start_positions() {
        let mut line = test_line();
        let mut surface = NoopSurface;
        for _ in 0..100 {
            line.update(16.0, 6.0, &mut surface).unwrap();
        }
        line.reset();
        assert_eq!(line.x_positions(), [0, line.width()]);
    }

    #[test]
    fn test_zero_speed_does_not_move_segments() {
        let mut line = test_line();
        let mut surface = NoopSurface;
        line.update(16.0, 0.0, &mut surface).unwrap();
        assert_eq!(line.x_positions(), [0, line.width()]);
    }
}
