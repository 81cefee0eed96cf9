use rand::Rng;
use std::io;

use crate::render::{Rect, Surface};
use crate::scene::ParallaxEl;
use crate::sprites::{BackgroundElConfig, BackgroundElSpec, ElPlacement, Sheet};

/// Decorative background element, used by the alt game mode.
///
/// Scrolling elements behave like clouds at a fixed speed that ignores the
/// game speed. Fixed elements stay put and bob between two y positions on a
/// timer instead; they never recycle.
pub struct BackgroundEl {
    sheet: Sheet,
    spec: BackgroundElSpec,
    config: BackgroundElConfig,
    x_pos: f64,
    y_pos: i32,
    gap: i32,
    anim_timer: f64,
    switch_frames: bool,
    remove: bool,
}

impl BackgroundEl {
    pub fn new(
        sheet: Sheet,
        spec: &BackgroundElSpec,
        config: BackgroundElConfig,
        container_width: i32,
    ) -> Self {
        let mut rng = rand::rng();
        let gap = rng.random_range(config.min_gap..=config.max_gap);

        let x_pos = match spec.placement {
            ElPlacement::Fixed { x_pos, .. } => x_pos as f64,
            ElPlacement::Scrolling => container_width as f64,
        };
        let y_pos = config.y_pos - spec.height + spec.offset;

        Self {
            sheet,
            spec: spec.clone(),
            config,
            x_pos,
            y_pos,
            gap,
            anim_timer: 0.0,
            switch_frames: false,
            remove: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    pub fn y_pos(&self) -> i32 {
        self.y_pos
    }

    fn is_visible(&self) -> bool {
        self.x_pos + self.spec.width as f64 > 0.0
    }

    fn draw(&self, surface: &mut dyn Surface) -> io::Result<()> {
        surface.blit(
            self.sheet,
            Rect::new(
                self.spec.sprite_pos.0,
                self.spec.sprite_pos.1,
                self.spec.width,
                self.spec.height,
            ),
            Rect::new(
                self.x_pos.round() as i32,
                self.y_pos,
                self.spec.width,
                self.spec.height,
            ),
            1.0,
        )
    }
}

impl ParallaxEl for BackgroundEl {
    /// `speed` is the frame's delta in ms; scrolling elements ignore it and
    /// move at the config's fixed rate.
    fn update(&mut self, speed: f64, surface: &mut dyn Surface) -> io::Result<()> {
        if self.remove {
            return Ok(());
        }
        match self.spec.placement {
            ElPlacement::Fixed { y_frames, .. } => {
                self.anim_timer += speed;
                if self.anim_timer > self.config.ms_per_frame {
                    self.anim_timer = 0.0;
                    self.switch_frames = !self.switch_frames;
                }
                if let Some((y1, y2)) = y_frames {
                    self.y_pos = if self.switch_frames { y1 } else { y2 };
                }
                self.draw(surface)?;
            }
            ElPlacement::Scrolling => {
                self.x_pos -= self.config.speed;
                self.draw(surface)?;
                if !self.is_visible() {
                    self.remove = true;
                }
            }
        }
        Ok(())
    }

    fn x_pos(&self) -> i32 {
        self.x_pos.round() as i32
    }

    fn gap(&self) -> i32 {
        // A pinned element reserves no trailing space; it would otherwise
        // stall the spawn gate forever once it becomes the newest element.
        match self.spec.placement {
            ElPlacement::Fixed { .. } => 0,
            ElPlacement::Scrolling => self.gap,
        }
    }

    fn is_removed(&self) -> bool {
        self.remove
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NoopSurface;
    use crate::sprites;

    fn alt_spec(name: &str) -> (BackgroundElSpec, BackgroundElConfig) {
        let def = sprites::alt_definition();
        let spec = def
            .background_els
            .iter()
            .find(|s| s.name == name)
            .expect("spec present in alt definition")
            .clone();
        (spec, def.background_el_config)
    }

    #[test]
    fn test_scrolling_el_moves_left_and_self_removes() {
        let (spec, config) = alt_spec("tree");
        let mut el = BackgroundEl::new(Sheet::Alt, &spec, config, 120);
        let mut surface = NoopSurface;

        let start = el.x_pos();
        el.update(16.0, &mut surface).unwrap();
        assert!(el.x_pos() <= start);

        for _ in 0..2000 {
            el.update(16.0, &mut surface).unwrap();
        }
        assert!(el.is_removed());
    }

    #[test]
    fn test_fixed_el_stays_put_and_toggles_y() {
        let (spec, config) = alt_spec("lantern");
        let mut el = BackgroundEl::new(Sheet::Alt, &spec, config, 120);
        let mut surface = NoopSurface;

        let fixed_x = el.x_pos();
        let mut seen_y = std::collections::HashSet::new();
        for _ in 0..200 {
            el.update(16.0, &mut surface).unwrap();
            seen_y.insert(el.y_pos());
            assert_eq!(el.x_pos(), fixed_x);
            assert!(!el.is_removed());
        }
        assert_eq!(seen_y.len(), 2, "fixed element should bob between two rows");
    }

    #[test]
    fn test_fixed_el_reserves_no_trailing_gap() {
        let (spec, config) = alt_spec("lantern");
        let el = BackgroundEl::new(Sheet::Alt, &spec, config, 120);
        assert_eq!(el.gap(), 0);
    }

    #[test]
    fn test_gap_drawn_from_config_bounds() {
        let (spec, config) = alt_spec("tree");
        for _ in 0..50 {
            let el = BackgroundEl::new(Sheet::Alt, &spec, config, 120);
            assert!(el.gap() >= config.min_gap && el.gap() <= config.max_gap);
        }
    }
}
