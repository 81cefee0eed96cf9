//! Static sprite-atlas and element-type tables.
//!
//! Each sheet is an ASCII char grid assembled at startup from the art pieces
//! below; every element type records where its art lives inside the grid.
//! The engine only ever addresses sheets through source rectangles, so the
//! layout constants here are the single source of truth for both assembly
//! and lookup.

/// Identifies one of the assembled char grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sheet {
    /// Default (desert) sprite set. Also carries the moon, stars and clouds.
    Base,
    /// Alt-game-mode (midnight forest) sprite set.
    Alt,
}

/// Axis-aligned hit rectangle, relative to the owning obstacle's origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl CollisionBox {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    CactusSmall,
    CactusLarge,
    Pterodactyl,
    Stump,
    Owl,
    Coin,
}

/// Vertical placement of an obstacle type.
#[derive(Debug, Clone)]
pub enum YPlacement {
    Fixed(i32),
    /// Uniform pick among slots; `compact_slots` is used on short terminals.
    Variable {
        slots: Vec<i32>,
        compact_slots: Vec<i32>,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct AnimationConfig {
    pub num_frames: usize,
    pub ms_per_frame: f64,
}

/// Immutable per-type obstacle descriptor.
#[derive(Debug, Clone)]
pub struct ObstacleType {
    pub kind: ObstacleKind,
    pub sprite_pos: (i32, i32),
    pub width: i32,
    pub height: i32,
    pub y_placement: YPlacement,
    /// Speed below which the obstacle never spawns grouped (size > 1).
    pub multiple_speed: f64,
    /// Base minimum gap, scaled by the game's gap coefficient.
    pub min_gap: f64,
    /// Speed below which the type is rejected at spawn time.
    pub min_speed: f64,
    /// Relative drift; randomly signed per instance. 0.0 = scrolls with the
    /// horizon.
    pub speed_offset: f64,
    pub animation: Option<AnimationConfig>,
    pub collision_boxes: Vec<CollisionBox>,
    pub collectable: bool,
}

/// How a background element occupies the screen.
#[derive(Debug, Clone, Copy)]
pub enum ElPlacement {
    /// Moves left at the background config's fixed speed and recycles.
    Scrolling,
    /// Pinned at a constant x; optionally bobs between two y positions.
    Fixed {
        x_pos: i32,
        y_frames: Option<(i32, i32)>,
    },
}

#[derive(Debug, Clone)]
pub struct BackgroundElSpec {
    pub name: &'static str,
    pub sprite_pos: (i32, i32),
    pub width: i32,
    pub height: i32,
    /// Vertical nudge applied on top of the baseline.
    pub offset: i32,
    pub placement: ElPlacement,
}

/// Sizing/gap parameters shared by every background element of the active
/// sprite set. Swapped wholesale on mode change.
#[derive(Debug, Clone, Copy)]
pub struct BackgroundElConfig {
    pub max_bg_els: usize,
    pub min_gap: i32,
    pub max_gap: i32,
    pub ms_per_frame: f64,
    pub speed: f64,
    pub y_pos: i32,
}

impl BackgroundElConfig {
    /// Placeholder used while no background elements are active (default
    /// sprite set has none).
    pub const fn empty() -> Self {
        Self {
            max_bg_els: 0,
            min_gap: 0,
            max_gap: 0,
            ms_per_frame: 0.0,
            speed: 0.0,
            y_pos: 0,
        }
    }
}

/// One ground-line strip: source crop plus on-screen placement.
#[derive(Debug, Clone, Copy)]
pub struct LineConfig {
    pub source_x: i32,
    pub source_y: i32,
    pub width: i32,
    pub height: i32,
    pub y_pos: i32,
}

/// Sprite rects for the horizon-owned elements.
#[derive(Debug, Clone, Copy)]
pub struct SpritePositions {
    pub cloud: (i32, i32),
    pub moon: (i32, i32),
    pub star: (i32, i32),
}

/// Everything the environment needs to know about one sprite set.
#[derive(Debug, Clone)]
pub struct SpriteDefinition {
    pub sheet: Sheet,
    pub lines: Vec<LineConfig>,
    pub obstacles: Vec<ObstacleType>,
    pub background_els: Vec<BackgroundElSpec>,
    pub background_el_config: BackgroundElConfig,
    pub max_gap_coefficient: f64,
    pub max_obstacle_length: i32,
    pub has_clouds: bool,
}

// ── Sheet layout ─────────────────────────────────────────────────────────────

const BASE_SHEET_WIDTH: usize = 240;
const BASE_SHEET_HEIGHT: usize = 42;
const ALT_SHEET_WIDTH: usize = 240;
const ALT_SHEET_HEIGHT: usize = 35;

const SMALL_CACTUS_POS: (i32, i32) = (0, 0);
const LARGE_CACTUS_POS: (i32, i32) = (0, 4);
const PTERO_POS: (i32, i32) = (30, 0);
const CLOUD_POS: (i32, i32) = (50, 0);
const MOON_POS: (i32, i32) = (60, 0);
const STAR_POS: (i32, i32) = (100, 0);
const COIN_POS: (i32, i32) = (110, 0);
const BASE_LINE_POS: (i32, i32) = (0, 40);

const STUMP_POS: (i32, i32) = (0, 0);
const OWL_POS: (i32, i32) = (30, 0);
const ALT_COIN_POS: (i32, i32) = (50, 0);
const TREE_POS: (i32, i32) = (60, 0);
const LANTERN_POS: (i32, i32) = (70, 0);
const ALT_LINE_POS: (i32, i32) = (0, 30);
const TREELINE_POS: (i32, i32) = (0, 34);

/// Moon phase source-x offsets, most recent phase first. Phase 3 (index 3)
/// is the full moon and is drawn double width.
pub const MOON_PHASES: [i32; 7] = [28, 24, 20, 12, 8, 4, 0];
pub const MOON_WIDTH: i32 = 4;
pub const MOON_HEIGHT: i32 = 3;
pub const STAR_SIZE: i32 = 1;

const LINE_WIDTH: i32 = 120;

// ── Art pieces ───────────────────────────────────────────────────────────────

const SMALL_CACTUS: [&str; 3] = [
    " ,  ", //
    "\\|/ ", //
    " |  ",
];

const LARGE_CACTUS: [&str; 4] = [
    " ,  ", //
    "\\|/ ", //
    " |\\ ", //
    " |  ",
];

// Two 6-cell frames side by side: wing up, wing down.
const PTERO: [&str; 3] = [
    " \\          ", //
    "<==o> <==o> ", //
    "       /    ",
];

const CLOUD: [&str; 3] = [
    "  .--.  ", //
    " (    ) ", //
    "(______)",
];

const MOON_Q1: [&str; 3] = ["  , ", "  ) ", "  ' "];
const MOON_Q2: [&str; 3] = [" ,, ", " )) ", " '' "];
const MOON_Q3: [&str; 3] = [" .-.", " | )", " '-'"];
const MOON_FULL: [&str; 3] = ["  .--.  ", " (    ) ", "  '--'  "];
const MOON_Q3M: [&str; 3] = [".-. ", "( | ", "'-' "];
const MOON_Q2M: [&str; 3] = [" ,, ", " (( ", " '' "];
const MOON_Q1M: [&str; 3] = [" ,  ", " (  ", " '  "];

const STAR: [&str; 2] = ["*", "+"];

const COIN: [&str; 2] = [" _ ", "(o)"];

const STUMP: [&str; 3] = [
    " __ ", //
    "|  |", //
    "|__|",
];

// Two 6-cell frames side by side: wings folded, wings out.
const OWL: [&str; 3] = [
    " ,_,   ,_,  ", //
    "(o,o) /o,o\\ ", //
    " \" \"   \" \"  ",
];

const TREE: [&str; 5] = [
    "   ^   ", //
    "  /^\\  ", //
    " /_^_\\ ", //
    "   |   ", //
    "   |   ",
];

const LANTERN: [&str; 2] = [" o ", "]|["];

const BASE_FLAT: &str = "____,____.___";
const BASE_BUMPY: &str = "__/\\__/\\____";
const BASE_SPECKLE: &str = "  .    ,   . ";
const ALT_FLAT: &str = "~~~~,~~~.~~~";
const ALT_BUMPY: &str = "~/\\~~~/\\~~~";
const ALT_SPECKLE: &str = "  *     .  , ";
const TREELINE_FLAT: &str = "^^~^^^^~~^^^";
const TREELINE_BUMPY: &str = "^~^^~~^^^~^~";

// ── Sheet assembly ───────────────────────────────────────────────────────────

fn place(grid: &mut [Vec<u8>], pos: (i32, i32), art: &[&str]) {
    let (x, y) = (pos.0 as usize, pos.1 as usize);
    for (row, line) in art.iter().enumerate() {
        for (col, byte) in line.bytes().enumerate() {
            grid[y + row][x + col] = byte;
        }
    }
}

fn place_strip(grid: &mut [Vec<u8>], pos: (i32, i32), copies: usize, art: &[&str]) {
    let art_width = art[0].len() as i32;
    for i in 0..copies {
        place(grid, (pos.0 + i as i32 * art_width, pos.1), art);
    }
}

fn place_pattern(grid: &mut [Vec<u8>], pos: (i32, i32), width: usize, pattern: &str) {
    let bytes = pattern.as_bytes();
    let (x, y) = (pos.0 as usize, pos.1 as usize);
    for col in 0..width {
        grid[y][x + col] = bytes[col % bytes.len()];
    }
}

/// Assemble the char grid for a sheet. Rows are full sheet width, space
/// padded; callers index them with the source rects from the definitions.
pub fn sheet_grid(sheet: Sheet) -> Vec<Vec<u8>> {
    match sheet {
        Sheet::Base => {
            let mut grid = vec![vec![b' '; BASE_SHEET_WIDTH]; BASE_SHEET_HEIGHT];
            place_strip(&mut grid, SMALL_CACTUS_POS, 6, &SMALL_CACTUS);
            place_strip(&mut grid, LARGE_CACTUS_POS, 6, &LARGE_CACTUS);
            place(&mut grid, PTERO_POS, &PTERO);
            place(&mut grid, CLOUD_POS, &CLOUD);
            place(&mut grid, (MOON_POS.0, MOON_POS.1), &MOON_Q1);
            place(&mut grid, (MOON_POS.0 + 4, MOON_POS.1), &MOON_Q2);
            place(&mut grid, (MOON_POS.0 + 8, MOON_POS.1), &MOON_Q3);
            place(&mut grid, (MOON_POS.0 + 12, MOON_POS.1), &MOON_FULL);
            place(&mut grid, (MOON_POS.0 + 20, MOON_POS.1), &MOON_Q3M);
            place(&mut grid, (MOON_POS.0 + 24, MOON_POS.1), &MOON_Q2M);
            place(&mut grid, (MOON_POS.0 + 28, MOON_POS.1), &MOON_Q1M);
            place(&mut grid, STAR_POS, &STAR);
            place(&mut grid, COIN_POS, &COIN);
            // Flat crop on the left half, bumpy on the right.
            place_pattern(&mut grid, BASE_LINE_POS, LINE_WIDTH as usize, BASE_FLAT);
            place_pattern(
                &mut grid,
                (BASE_LINE_POS.0 + LINE_WIDTH, BASE_LINE_POS.1),
                LINE_WIDTH as usize,
                BASE_BUMPY,
            );
            place_pattern(
                &mut grid,
                (BASE_LINE_POS.0, BASE_LINE_POS.1 + 1),
                2 * LINE_WIDTH as usize,
                BASE_SPECKLE,
            );
            grid
        }
        Sheet::Alt => {
            let mut grid = vec![vec![b' '; ALT_SHEET_WIDTH]; ALT_SHEET_HEIGHT];
            place_strip(&mut grid, STUMP_POS, 3, &STUMP);
            place(&mut grid, OWL_POS, &OWL);
            place(&mut grid, ALT_COIN_POS, &COIN);
            place(&mut grid, TREE_POS, &TREE);
            place(&mut grid, LANTERN_POS, &LANTERN);
            place_pattern(&mut grid, ALT_LINE_POS, LINE_WIDTH as usize, ALT_FLAT);
            place_pattern(
                &mut grid,
                (ALT_LINE_POS.0 + LINE_WIDTH, ALT_LINE_POS.1),
                LINE_WIDTH as usize,
                ALT_BUMPY,
            );
            place_pattern(
                &mut grid,
                (ALT_LINE_POS.0, ALT_LINE_POS.1 + 1),
                2 * LINE_WIDTH as usize,
                ALT_SPECKLE,
            );
            place_pattern(
                &mut grid,
                TREELINE_POS,
                LINE_WIDTH as usize,
                TREELINE_FLAT,
            );
            place_pattern(
                &mut grid,
                (TREELINE_POS.0 + LINE_WIDTH, TREELINE_POS.1),
                LINE_WIDTH as usize,
                TREELINE_BUMPY,
            );
            grid
        }
    }
}

// ── Definitions ──────────────────────────────────────────────────────────────

pub fn default_sprite_positions() -> SpritePositions {
    SpritePositions {
        cloud: CLOUD_POS,
        moon: MOON_POS,
        star: STAR_POS,
    }
}

pub fn alt_sprite_positions() -> SpritePositions {
    // The alt set has no clouds; moon and stars always come from the base
    // sheet, so the base rects stay valid.
    default_sprite_positions()
}

pub fn default_definition() -> SpriteDefinition {
    SpriteDefinition {
        sheet: Sheet::Base,
        lines: vec![LineConfig {
            source_x: BASE_LINE_POS.0,
            source_y: BASE_LINE_POS.1,
            width: LINE_WIDTH,
            height: 2,
            y_pos: 26,
        }],
        obstacles: vec![
            ObstacleType {
                kind: ObstacleKind::CactusSmall,
                sprite_pos: SMALL_CACTUS_POS,
                width: 4,
                height: 3,
                y_placement: YPlacement::Fixed(23),
                multiple_speed: 4.0,
                min_gap: 30.0,
                min_speed: 0.0,
                speed_offset: 0.0,
                animation: None,
                collision_boxes: vec![
                    CollisionBox::new(0, 1, 1, 2),
                    CollisionBox::new(1, 0, 2, 3),
                    CollisionBox::new(3, 1, 1, 2),
                ],
                collectable: false,
            },
            ObstacleType {
                kind: ObstacleKind::CactusLarge,
                sprite_pos: LARGE_CACTUS_POS,
                width: 4,
                height: 4,
                y_placement: YPlacement::Fixed(22),
                multiple_speed: 7.0,
                min_gap: 30.0,
                min_speed: 0.0,
                speed_offset: 0.0,
                animation: None,
                collision_boxes: vec![
                    CollisionBox::new(0, 1, 1, 3),
                    CollisionBox::new(1, 0, 2, 4),
                    CollisionBox::new(3, 1, 1, 3),
                ],
                collectable: false,
            },
            ObstacleType {
                kind: ObstacleKind::Pterodactyl,
                sprite_pos: PTERO_POS,
                width: 6,
                height: 3,
                y_placement: YPlacement::Variable {
                    slots: vec![20, 14, 8],
                    compact_slots: vec![20, 14],
                },
                multiple_speed: 999.0,
                min_gap: 45.0,
                min_speed: 8.5,
                speed_offset: 0.8,
                animation: Some(AnimationConfig {
                    num_frames: 2,
                    ms_per_frame: 1000.0 / 6.0,
                }),
                collision_boxes: vec![CollisionBox::new(0, 1, 5, 1)],
                collectable: false,
            },
            ObstacleType {
                kind: ObstacleKind::Coin,
                sprite_pos: COIN_POS,
                width: 3,
                height: 2,
                y_placement: YPlacement::Fixed(18),
                multiple_speed: 999.0,
                min_gap: 40.0,
                min_speed: 0.0,
                speed_offset: 0.0,
                animation: None,
                collision_boxes: vec![CollisionBox::new(0, 0, 3, 2)],
                collectable: true,
            },
        ],
        background_els: Vec::new(),
        background_el_config: BackgroundElConfig::empty(),
        max_gap_coefficient: 1.5,
        max_obstacle_length: 3,
        has_clouds: true,
    }
}

pub fn alt_definition() -> SpriteDefinition {
    SpriteDefinition {
        sheet: Sheet::Alt,
        lines: vec![
            LineConfig {
                source_x: TREELINE_POS.0,
                source_y: TREELINE_POS.1,
                width: LINE_WIDTH,
                height: 1,
                y_pos: 25,
            },
            LineConfig {
                source_x: ALT_LINE_POS.0,
                source_y: ALT_LINE_POS.1,
                width: LINE_WIDTH,
                height: 2,
                y_pos: 26,
            },
        ],
        obstacles: vec![
            ObstacleType {
                kind: ObstacleKind::Stump,
                sprite_pos: STUMP_POS,
                width: 4,
                height: 3,
                y_placement: YPlacement::Fixed(23),
                multiple_speed: 4.0,
                min_gap: 30.0,
                min_speed: 0.0,
                speed_offset: 0.0,
                animation: None,
                collision_boxes: vec![
                    CollisionBox::new(0, 0, 1, 3),
                    CollisionBox::new(1, 0, 2, 3),
                    CollisionBox::new(3, 0, 1, 3),
                ],
                collectable: false,
            },
            ObstacleType {
                kind: ObstacleKind::Owl,
                sprite_pos: OWL_POS,
                width: 6,
                height: 3,
                y_placement: YPlacement::Variable {
                    slots: vec![20, 14, 9],
                    compact_slots: vec![20, 14],
                },
                multiple_speed: 999.0,
                min_gap: 45.0,
                min_speed: 8.5,
                speed_offset: 0.8,
                animation: Some(AnimationConfig {
                    num_frames: 2,
                    ms_per_frame: 1000.0 / 4.0,
                }),
                collision_boxes: vec![CollisionBox::new(0, 1, 5, 1)],
                collectable: false,
            },
            ObstacleType {
                kind: ObstacleKind::Coin,
                sprite_pos: ALT_COIN_POS,
                width: 3,
                height: 2,
                y_placement: YPlacement::Fixed(17),
                multiple_speed: 999.0,
                min_gap: 40.0,
                min_speed: 0.0,
                speed_offset: 0.0,
                animation: None,
                collision_boxes: vec![CollisionBox::new(0, 0, 3, 2)],
                collectable: true,
            },
        ],
        background_els: vec![
            BackgroundElSpec {
                name: "tree",
                sprite_pos: TREE_POS,
                width: 7,
                height: 5,
                offset: 0,
                placement: ElPlacement::Scrolling,
            },
            BackgroundElSpec {
                name: "lantern",
                sprite_pos: LANTERN_POS,
                width: 3,
                height: 2,
                offset: 0,
                placement: ElPlacement::Fixed {
                    x_pos: 96,
                    y_frames: Some((23, 24)),
                },
            },
        ],
        background_el_config: BackgroundElConfig {
            max_bg_els: 4,
            min_gap: 30,
            max_gap: 80,
            ms_per_frame: 500.0,
            speed: 0.4,
            y_pos: 26,
        },
        max_gap_coefficient: 1.5,
        max_obstacle_length: 2,
        has_clouds: false,
    }
}
