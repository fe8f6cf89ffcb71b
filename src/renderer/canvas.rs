//! RGBA frame buffer for software rendering
//!
//! Pixels use straight (non-premultiplied) alpha. Every drawing call
//! composites source-over, so overlays with transparent backgrounds can be
//! layered and then cross-faded with a single `blit` opacity.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::sim::{Rect, Rgb};

/// One RGBA8 pixel
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const TRANSPARENT: Pixel = Pixel::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(rgb: Rgb) -> Self {
        Self::new(rgb.r, rgb.g, rgb.b, 255)
    }

    pub const fn with_alpha(rgb: Rgb, a: u8) -> Self {
        Self::new(rgb.r, rgb.g, rgb.b, a)
    }

    pub fn rgb(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

/// Composite `src` over `dst`, scaling the source alpha by `opacity`
#[inline]
fn over(dst: Pixel, src: Pixel, opacity: u8) -> Pixel {
    let sa = f32::from(src.a) * f32::from(opacity) / (255.0 * 255.0);
    if sa <= 0.0 {
        return dst;
    }
    if sa >= 1.0 {
        return Pixel { a: 255, ..src };
    }

    let da = f32::from(dst.a) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    let channel = |s: u8, d: u8| {
        let c = (f32::from(s) * sa + f32::from(d) * da * (1.0 - sa)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };

    Pixel {
        r: channel(src.r, dst.r),
        g: channel(src.g, dst.g),
        b: channel(src.b, dst.b),
        a: (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    }
}

/// True if the pixel centre `(px, py)` lies inside a rounded rectangle
fn in_rounded_rect(px: f32, py: f32, rect: &Rect, radius: f32) -> bool {
    if px < rect.left() || px >= rect.right() || py < rect.top() || py >= rect.bottom() {
        return false;
    }
    let radius = radius.min(rect.width() / 2.0).min(rect.height() / 2.0);
    if radius <= 0.0 {
        return true;
    }

    let cx = px.clamp(rect.left() + radius, rect.right() - radius);
    let cy = py.clamp(rect.top() + radius, rect.bottom() - radius);
    let dx = px - cx;
    let dy = py - cy;
    dx * dx + dy * dy <= radius * radius
}

/// Software canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Canvas {
    /// Fully transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Pixel::TRANSPARENT; (width * height) as usize],
        }
    }

    /// Opaque canvas filled with one colour
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        let mut canvas = Self::new(width, height);
        canvas.fill(color);
        canvas
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Raw RGBA bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Pixel> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Replace every pixel with an opaque colour
    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(Pixel::opaque(color));
    }

    /// Reset to fully transparent
    pub fn clear(&mut self) {
        self.pixels.fill(Pixel::TRANSPARENT);
    }

    /// Composite one pixel; out-of-bounds writes are dropped
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, src: Pixel, opacity: u8) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = over(self.pixels[i], src, opacity);
        }
    }

    /// Pixel range covered by a rectangle, clipped to the canvas
    fn span(&self, rect: &Rect) -> (i32, i32, i32, i32) {
        let x0 = (rect.left().floor() as i32).max(0);
        let y0 = (rect.top().floor() as i32).max(0);
        let x1 = (rect.right().ceil() as i32).min(self.width as i32);
        let y1 = (rect.bottom().ceil() as i32).min(self.height as i32);
        (x0, y0, x1, y1)
    }

    pub fn fill_rect(&mut self, rect: &Rect, color: Rgb, alpha: u8) {
        self.fill_rounded_rect(rect, 0.0, color, alpha);
    }

    pub fn fill_rounded_rect(&mut self, rect: &Rect, radius: f32, color: Rgb, alpha: u8) {
        let src = Pixel::with_alpha(color, alpha);
        let (x0, y0, x1, y1) = self.span(rect);
        for y in y0..y1 {
            for x in x0..x1 {
                if in_rounded_rect(x as f32 + 0.5, y as f32 + 0.5, rect, radius) {
                    self.blend_pixel(x, y, src, 255);
                }
            }
        }
    }

    /// Outline of `width` pixels drawn inside the rectangle's bounds
    pub fn stroke_rounded_rect(&mut self, rect: &Rect, radius: f32, width: f32, color: Rgb) {
        let src = Pixel::opaque(color);
        let inner = Rect::new(
            rect.left() + width,
            rect.top() + width,
            rect.width() - 2.0 * width,
            rect.height() - 2.0 * width,
        );
        let inner_radius = (radius - width).max(0.0);
        let (x0, y0, x1, y1) = self.span(rect);
        for y in y0..y1 {
            for x in x0..x1 {
                let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
                if in_rounded_rect(px, py, rect, radius)
                    && !in_rounded_rect(px, py, &inner, inner_radius)
                {
                    self.blend_pixel(x, y, src, 255);
                }
            }
        }
    }

    /// Filled disc of whole-pixel radius around `center`
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb, alpha: u8) {
        let r = radius.floor() as i32;
        if r <= 0 || alpha == 0 {
            return;
        }
        let src = Pixel::with_alpha(color, alpha);
        let cx = center.x.floor() as i32;
        let cy = center.y.floor() as i32;
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.blend_pixel(cx + dx, cy + dy, src, 255);
                }
            }
        }
    }

    /// Composite another canvas of the same size on top at `opacity`
    pub fn blit(&mut self, src: &Canvas, opacity: u8) {
        debug_assert_eq!((self.width, self.height), (src.width, src.height));
        if opacity == 0 {
            return;
        }
        for (dst, &s) in self.pixels.iter_mut().zip(src.pixels.iter()) {
            *dst = over(*dst, s, opacity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);

    #[test]
    fn test_new_is_transparent() {
        let canvas = Canvas::new(4, 4);
        assert!(canvas.pixels().iter().all(|p| *p == Pixel::TRANSPARENT));
        assert_eq!(canvas.as_bytes().len(), 4 * 4 * 4);
    }

    #[test]
    fn test_opaque_over_replaces() {
        let mut canvas = Canvas::filled(2, 2, BLUE);
        canvas.blend_pixel(0, 0, Pixel::opaque(RED), 255);
        assert_eq!(canvas.pixel(0, 0), Some(Pixel::opaque(RED)));
        assert_eq!(canvas.pixel(1, 1), Some(Pixel::opaque(BLUE)));
    }

    #[test]
    fn test_half_opacity_mixes() {
        let mut canvas = Canvas::filled(1, 1, Rgb::BLACK);
        canvas.blend_pixel(0, 0, Pixel::opaque(Rgb::WHITE), 128);
        let p = canvas.pixel(0, 0).unwrap_or_default();
        assert_eq!(p.a, 255);
        assert!((127..=129).contains(&p.r));
    }

    #[test]
    fn test_zero_opacity_blit_is_noop() {
        let mut canvas = Canvas::filled(3, 3, BLUE);
        let before = canvas.clone();
        canvas.blit(&Canvas::filled(3, 3, RED), 0);
        assert_eq!(canvas, before);
    }

    #[test]
    fn test_transparent_blit_keeps_destination() {
        let mut canvas = Canvas::filled(3, 3, BLUE);
        canvas.blit(&Canvas::new(3, 3), 255);
        assert_eq!(canvas.pixel(1, 1), Some(Pixel::opaque(BLUE)));
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut canvas = Canvas::new(2, 2);
        canvas.blend_pixel(-1, 0, Pixel::opaque(RED), 255);
        canvas.blend_pixel(0, 5, Pixel::opaque(RED), 255);
        assert!(canvas.pixels().iter().all(|p| *p == Pixel::TRANSPARENT));
        assert_eq!(canvas.pixel(2, 0), None);
    }

    #[test]
    fn test_fill_circle_covers_center_not_corners() {
        let mut canvas = Canvas::new(20, 20);
        canvas.fill_circle(Vec2::new(10.0, 10.0), 5.0, RED, 255);
        assert_eq!(canvas.pixel(10, 10), Some(Pixel::opaque(RED)));
        assert_eq!(canvas.pixel(15, 10), Some(Pixel::opaque(RED)));
        assert_eq!(canvas.pixel(14, 14), Some(Pixel::TRANSPARENT));
    }

    #[test]
    fn test_rounded_rect_cuts_corners() {
        let mut canvas = Canvas::new(40, 40);
        let rect = Rect::new(0.0, 0.0, 40.0, 40.0);
        canvas.fill_rounded_rect(&rect, 10.0, RED, 255);
        assert_eq!(canvas.pixel(0, 0), Some(Pixel::TRANSPARENT));
        assert_eq!(canvas.pixel(20, 0), Some(Pixel::opaque(RED)));
        assert_eq!(canvas.pixel(20, 20), Some(Pixel::opaque(RED)));
    }

    #[test]
    fn test_stroke_leaves_interior() {
        let mut canvas = Canvas::new(40, 40);
        let rect = Rect::new(0.0, 0.0, 40.0, 40.0);
        canvas.stroke_rounded_rect(&rect, 10.0, 3.0, RED);
        assert_eq!(canvas.pixel(20, 1), Some(Pixel::opaque(RED)));
        assert_eq!(canvas.pixel(20, 20), Some(Pixel::TRANSPARENT));
    }
}
