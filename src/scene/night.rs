use rand::Rng;
use std::io;

use crate::render::{Rect, Surface};
use crate::sprites::{MOON_HEIGHT, MOON_PHASES, MOON_WIDTH, STAR_SIZE, Sheet, SpritePositions};

const FADE_SPEED: f64 = 0.035;
const MOON_SPEED: f64 = 0.25;
const STAR_SPEED: f64 = 0.3;
const NUM_STARS: usize = 2;
const STAR_MAX_Y: i32 = 10;
const MOON_Y_POS: i32 = 3;

#[derive(Debug, Clone, Copy, Default)]
struct Star {
    x: f64,
    y: i32,
    source_y: i32,
}

/// Night mode: a phased moon and a sparse star field, faded in and out over
/// the running scene. Always drawn from the base sheet.
pub struct NightMode {
    sprite_pos: (i32, i32),
    star_pos: (i32, i32),
    x_pos: f64,
    y_pos: i32,
    current_phase: usize,
    opacity: f64,
    container_width: i32,
    stars: [Star; NUM_STARS],
    draw_stars: bool,
}

impl NightMode {
    pub fn new(sprite_pos: &SpritePositions, container_width: i32) -> Self {
        let mut night = Self {
            sprite_pos: sprite_pos.moon,
            star_pos: sprite_pos.star,
            x_pos: 0.0,
            y_pos: MOON_Y_POS,
            current_phase: 0,
            opacity: 0.0,
            container_width,
            stars: [Star::default(); NUM_STARS],
            draw_stars: false,
        };
        night.place_stars();
        night
    }

    /// Advance fading, phase changes and star/moon drift for one frame.
    pub fn update(&mut self, activated: bool, surface: &mut dyn Surface) -> io::Result<()> {
        // The phase only turns over while fully faded out.
        if activated && self.opacity == 0.0 {
            self.current_phase = (self.current_phase + 1) % MOON_PHASES.len();
        }

        if activated {
            if self.opacity < 1.0 {
                self.opacity = (self.opacity + FADE_SPEED).min(1.0);
            }
        } else if self.opacity > 0.0 {
            self.opacity = (self.opacity - FADE_SPEED).max(0.0);
        }

        if self.opacity > 0.0 {
            self.x_pos = Self::wrap_x(self.x_pos, MOON_SPEED, self.container_width);
            if self.draw_stars {
                for star in &mut self.stars {
                    star.x = Self::wrap_x(star.x, STAR_SPEED, self.container_width);
                }
            }
            self.draw(surface)?;
        } else {
            self.opacity = 0.0;
            self.place_stars();
        }
        self.draw_stars = true;
        Ok(())
    }

    fn wrap_x(current: f64, speed: f64, container_width: i32) -> f64 {
        if current < -f64::from(MOON_WIDTH) {
            container_width as f64
        } else {
            current - speed
        }
    }

    fn draw(&self, surface: &mut dyn Surface) -> io::Result<()> {
        // Full moon is double width in the sheet.
        let moon_width = if self.current_phase == 3 {
            MOON_WIDTH * 2
        } else {
            MOON_WIDTH
        };
        let moon_source_x = self.sprite_pos.0 + MOON_PHASES[self.current_phase];

        if self.draw_stars {
            for star in &self.stars {
                surface.blit(
                    Sheet::Base,
                    Rect::new(self.star_pos.0, star.source_y, STAR_SIZE, STAR_SIZE),
                    Rect::new(star.x.round() as i32, star.y, STAR_SIZE, STAR_SIZE),
                    self.opacity,
                )?;
            }
        }

        surface.blit(
            Sheet::Base,
            Rect::new(moon_source_x, self.sprite_pos.1, moon_width, MOON_HEIGHT),
            Rect::new(self.x_pos.round() as i32, self.y_pos, moon_width, MOON_HEIGHT),
            self.opacity,
        )
    }

    /// Scatter one star per horizontal segment of the container.
    fn place_stars(&mut self) {
        let mut rng = rand::rng();
        let segment_size = (f64::from(self.container_width) / NUM_STARS as f64).round() as i32;
        for (i, star) in self.stars.iter_mut().enumerate() {
            let segment_start = segment_size * i as i32;
            star.x = f64::from(rng.random_range(segment_start..=segment_start + segment_size));
            star.y = rng.random_range(0..=STAR_MAX_Y);
            star.source_y = self.star_pos.1 + STAR_SIZE * i as i32;
        }
    }

    pub fn reset(&mut self) {
        self.current_phase = 0;
        self.opacity = 0.0;
        self.place_stars();
        self.draw_stars = true;
    }

    pub fn resize(&mut self, container_width: i32) {
        self.container_width = container_width;
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn current_phase(&self) -> usize {
        self.current_phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NoopSurface;
    use crate::sprites;

    fn test_night() -> NightMode {
        NightMode::new(&sprites::default_sprite_positions(), 120)
    }

    #[test]
    fn test_reset_then_inactive_update_is_idempotent() {
        let mut night = test_night();
        let mut surface = NoopSurface;
        for _ in 0..10 {
            night.update(true, &mut surface).unwrap();
        }
        night.reset();
        night.update(false, &mut surface).unwrap();
        assert_eq!(night.current_phase(), 0);
        assert_eq!(night.opacity(), 0.0);
    }

    #[test]
    fn test_fade_in_saturates_at_full_opacity() {
        let mut night = test_night();
        let mut surface = NoopSurface;
        for _ in 0..60 {
            night.update(true, &mut surface).unwrap();
        }
        assert_eq!(night.opacity(), 1.0);
    }

    #[test]
    fn test_opacity_holds_steady_while_active() {
        let mut night = test_night();
        let mut surface = NoopSurface;
        for _ in 0..60 {
            night.update(true, &mut surface).unwrap();
        }
        // Saturated opacity must not oscillate on further active frames.
        for _ in 0..20 {
            night.update(true, &mut surface).unwrap();
            assert_eq!(night.opacity(), 1.0);
        }
    }

    #[test]
    fn test_fade_out_returns_to_zero() {
        let mut night = test_night();
        let mut surface = NoopSurface;
        for _ in 0..60 {
            night.update(true, &mut surface).unwrap();
        }
        for _ in 0..60 {
            night.update(false, &mut surface).unwrap();
        }
        assert_eq!(night.opacity(), 0.0);
    }

    #[test]
    fn test_phase_advances_once_per_activation() {
        let mut night = test_night();
        let mut surface = NoopSurface;

        night.update(true, &mut surface).unwrap();
        assert_eq!(night.current_phase(), 1);
        // Once fading has started the phase holds steady.
        night.update(true, &mut surface).unwrap();
        night.update(true, &mut surface).unwrap();
        assert_eq!(night.current_phase(), 1);
    }

    #[test]
    fn test_phase_wraps_around() {
        let mut night = test_night();
        let mut surface = NoopSurface;
        for _ in 0..MOON_PHASES.len() {
            // One full in-and-out cycle per phase step.
            for _ in 0..60 {
                night.update(true, &mut surface).unwrap();
            }
            for _ in 0..60 {
                night.update(false, &mut surface).unwrap();
            }
        }
        assert_eq!(night.current_phase(), 0);
    }
}
