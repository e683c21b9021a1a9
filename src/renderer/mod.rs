//! Rendering abstraction layer.
//!
//! The simulation never touches a pixel buffer. It exposes the tile map and
//! a list of [`Sprite`]s; a type implementing [`Renderer`] turns those into
//! pixels, and the blanket [`RendererExt`] adds a one-call `draw_scene`.

use glam::Vec2;

use crate::sim::Sprite;
use crate::world::{Color, TILE_SIZE, TileMap};

/// Pixel format of the software frame-buffer (0x00RRGGBB).
pub type Rgba = u32;

/// Height of a health bar and its gap above the sprite.
pub const HEALTH_BAR_H: f32 = 5.0;
pub const HEALTH_BAR_GAP: f32 = 10.0;

const OUTLINE: Color = Color::BLACK;
const HEALTH_FILL: Color = Color::RED;
const PAUSE_FRAME: Color = Color::PERU;

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure, e.g.
/// `|fb, w, h| window.update_with_buffer(fb, w, h)`.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Solid rectangle, clipped to the frame.
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Rgba);

    /// One-pixel rectangle outline, clipped to the frame.
    fn stroke_rect(&mut self, pos: Vec2, size: Vec2, color: Rgba);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

/// Convenience blanket-impl drawing a whole arena frame.
pub trait RendererExt: Renderer {
    /// Floor tiles, then sprites in order, then health bars and, while
    /// paused, a frame around the field.
    fn draw_scene<F>(&mut self, map: &TileMap, sprites: &[Sprite], paused: bool, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        let field = map.pixel_size();
        self.begin_frame(field.x as usize, field.y as usize);

        let tile = Vec2::splat(TILE_SIZE);
        for (x, y, t) in map.iter() {
            let pos = Vec2::new(x as f32, y as f32) * TILE_SIZE;
            self.fill_rect(pos, tile, t.color.to_u32());
            self.stroke_rect(pos, tile, OUTLINE.to_u32());
        }

        for s in sprites.iter().filter(|s| s.active) {
            self.fill_rect(s.pos, s.size, s.color.to_u32());
            self.stroke_rect(s.pos, s.size, OUTLINE.to_u32());
        }

        for s in sprites {
            let Some(ratio) = s.health else { continue };
            let bar = Vec2::new(s.pos.x, s.pos.y - HEALTH_BAR_GAP - HEALTH_BAR_H);
            self.fill_rect(
                bar,
                Vec2::new(s.size.x * ratio, HEALTH_BAR_H),
                HEALTH_FILL.to_u32(),
            );
            self.stroke_rect(bar, Vec2::new(s.size.x, HEALTH_BAR_H), OUTLINE.to_u32());
        }

        if paused {
            for inset in 0..3 {
                let d = Vec2::splat(inset as f32);
                self.stroke_rect(d, field - d * 2.0, PAUSE_FRAME.to_u32());
            }
        }

        self.end_frame(submit);
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}

pub mod software;
pub use software::Software;
