//! CPU rectangle rasteriser into an `&[u32]` frame-buffer (0x00RRGGBB).

use glam::Vec2;

use crate::renderer::{Renderer, Rgba};

const CLEAR: Rgba = 0x00_202020;

#[derive(Default)]
pub struct Software {
    scratch: Vec<Rgba>,
    width: usize,
    height: usize,
}

impl Software {
    /// Clip `pos..pos+size` to the frame; `None` if nothing is left.
    fn clip(&self, pos: Vec2, size: Vec2) -> Option<(usize, usize, usize, usize)> {
        let x0 = pos.x.floor().max(0.0);
        let y0 = pos.y.floor().max(0.0);
        let x1 = (pos.x + size.x).floor().min(self.width as f32);
        let y1 = (pos.y + size.y).floor().min(self.height as f32);
        (x1 > x0 && y1 > y0).then(|| (x0 as usize, y0 as usize, x1 as usize, y1 as usize))
    }

    #[inline]
    fn put(&mut self, x: usize, y: usize, color: Rgba) {
        if x < self.width && y < self.height {
            self.scratch[y * self.width + x] = color;
        }
    }
}

impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.scratch.resize(w * h, 0);
        }
        self.scratch.fill(CLEAR);
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Rgba) {
        let Some((x0, y0, x1, y1)) = self.clip(pos, size) else {
            return;
        };
        for y in y0..y1 {
            let row = y * self.width;
            self.scratch[row + x0..row + x1].fill(color);
        }
    }

    fn stroke_rect(&mut self, pos: Vec2, size: Vec2, color: Rgba) {
        if size.x <= 0.0 || size.y <= 0.0 {
            return;
        }
        let left = pos.x.floor() as i64;
        let top = pos.y.floor() as i64;
        let right = (pos.x + size.x).floor() as i64 - 1;
        let bottom = (pos.y + size.y).floor() as i64 - 1;

        let mut plot = |x: i64, y: i64| {
            if x >= 0 && y >= 0 {
                self.put(x as usize, y as usize, color);
            }
        };
        for x in left..=right {
            plot(x, top);
            plot(x, bottom);
        }
        for y in top..=bottom {
            plot(left, y);
            plot(right, y);
        }
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }
}
