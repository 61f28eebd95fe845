//! Isometric projection and hit-testing
//!
//! Translates grid cells into board-surface pixels and back:
//! - +row steps toward the lower right of the screen
//! - +col steps toward the upper right of the screen
//!
//! A die's clickable area is the diamond of its top face.

use crate::types::{
    GridPos, Point, BOARD_COLS, BOARD_SURFACE_HEIGHT, BOARD_SURFACE_WIDTH, DIE_SPRITE_HEIGHT,
    DIE_SPRITE_WIDTH, TILE_GAP, TILE_HEIGHT, TILE_WIDTH,
};

/// Horizontal pixel step between neighbouring cells.
pub const X_STEP: f32 = TILE_WIDTH / 2.0 + TILE_GAP;

/// Vertical pixel step between neighbouring cells.
pub const Y_STEP: f32 = TILE_HEIGHT / 2.0 + TILE_GAP;

/// Pixel position of cell (0, 0).
pub fn grid_origin() -> Point {
    let span = DIE_SPRITE_WIDTH * BOARD_COLS as f32 + 14.0 * TILE_GAP;
    Point::new(
        ((BOARD_SURFACE_WIDTH - span) / 2.0).floor(),
        BOARD_SURFACE_HEIGHT - DIE_SPRITE_HEIGHT * 3.0,
    )
}

/// Resting (canonical) draw position of a die at `cell`.
pub fn canonical_position(cell: GridPos) -> Point {
    let origin = grid_origin();
    let row = cell.row as f32;
    let col = cell.col as f32;
    Point::new(
        origin.x + X_STEP * (col + row),
        origin.y + Y_STEP * (row - col),
    )
}

/// Centre of the top face for a die drawn at `position`.
pub fn face_center(position: Point) -> Point {
    position.offset(TILE_WIDTH / 2.0, TILE_HEIGHT / 2.0)
}

/// Diamond hitbox (top, right, bottom, left) for a die drawn at `position`.
pub fn hitbox(position: Point) -> [Point; 4] {
    [
        position.offset(TILE_WIDTH / 2.0, 0.0),
        position.offset(TILE_WIDTH, TILE_HEIGHT / 2.0),
        position.offset(TILE_WIDTH / 2.0, TILE_HEIGHT),
        position.offset(0.0, TILE_HEIGHT / 2.0),
    ]
}

/// Even-odd ray casting test.
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    let mut inside = false;
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut j = n - 1;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > point.y) != (b.y > point.y) {
            let cross_x = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Whether `point` lies on the top face of a die drawn at `position`.
pub fn hits_die(position: Point, point: Point) -> bool {
    point_in_polygon(point, &hitbox(position))
}

/// Draw-order key for a die resting at `cell`: lower on screen draws later.
pub fn z_for(cell: GridPos) -> f32 {
    canonical_position(cell).y
}
