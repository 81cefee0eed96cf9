/// Frame rate the scrolling math is normalized to. `delta` values are in
/// milliseconds, so a speed of `s` moves an element `s` cells per 1000/FPS ms.
pub const FPS: f64 = 60.0;

/// Logical playfield size in terminal cells. The renderer centers this arena
/// in the terminal and clips anything outside it.
pub const DEFAULT_DIMENSIONS: Dimensions = Dimensions {
    width: 120,
    height: 30,
};

/// Width/height of the logical drawing area, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: i32,
    pub height: i32,
}
