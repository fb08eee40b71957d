//! Raster surface abstraction and the image-backed canvas.
//!
//! The compositor draws through the [`Surface`] trait so the drawing pass
//! can be exercised against a recording fake in tests while production
//! runs against [`ImageSurface`], a thin wrapper over an RGBA pixel
//! buffer. Actual PNG encoding stays outside the library boundary: the
//! caller takes the finished image and saves it.

mod compositor;

pub use compositor::{ComposeError, Compositor, RenderStats};

use image::{Rgba, RgbaImage};

/// Solid colors for the map layers, RGBA.
///
/// Defaults follow the classic renderer: black background, white visited
/// fill, red grid, green origin marker, blue notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgba<u8>,
    pub visited: Rgba<u8>,
    pub grid: Rgba<u8>,
    pub origin: Rgba<u8>,
    pub note: Rgba<u8>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgba([0x00, 0x00, 0x00, 0xff]),
            visited: Rgba([0xff, 0xff, 0xff, 0xff]),
            grid: Rgba([0xff, 0x00, 0x00, 0xff]),
            origin: Rgba([0x00, 0xff, 0x00, 0xff]),
            note: Rgba([0x00, 0x00, 0xff, 0xff]),
        }
    }
}

/// A mutable raster the compositor draws on.
///
/// Rectangle far edges are exclusive throughout, so a cell scaled by `s`
/// covers exactly `s` pixels per axis and the bottom/right cells of the
/// grid end flush with the surface bounds.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Fill `[x0, x1) × [y0, y1)` with a solid color.
    fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgba<u8>);

    /// Draw a one-pixel border just inside `[x0, x1) × [y0, y1)`.
    fn outline_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgba<u8>) {
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        self.fill_rect(x0, y0, x1, y0 + 1, color);
        self.fill_rect(x0, y1 - 1, x1, y1, color);
        self.fill_rect(x0, y0, x0 + 1, y1, color);
        self.fill_rect(x1 - 1, y0, x1, y1, color);
    }
}

/// [`Surface`] backed by an [`image::RgbaImage`].
pub struct ImageSurface {
    image: RgbaImage,
}

impl ImageSurface {
    /// Allocate a surface of the given pixel size, filled with
    /// `background`.
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, background),
        }
    }

    /// Take the finished pixel buffer for encoding.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

impl Surface for ImageSurface {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgba<u8>) {
        let x1 = x1.min(self.image.width());
        let y1 = y1.min(self.image.height());
        for y in y0..y1 {
            for x in x0..x1 {
                self.image.put_pixel(x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([0xff, 0x00, 0x00, 0xff]);
    const BLACK: Rgba<u8> = Rgba([0x00, 0x00, 0x00, 0xff]);

    #[test]
    fn test_new_surface_is_background_filled() {
        let surface = ImageSurface::new(4, 3, BLACK);
        let image = surface.into_image();
        assert_eq!(image.dimensions(), (4, 3));
        assert!(image.pixels().all(|p| *p == BLACK));
    }

    #[test]
    fn test_fill_rect_far_edges_are_exclusive() {
        let mut surface = ImageSurface::new(6, 6, BLACK);
        surface.fill_rect(1, 2, 3, 4, RED);
        let image = surface.into_image();

        assert_eq!(*image.get_pixel(1, 2), RED);
        assert_eq!(*image.get_pixel(2, 3), RED);
        // The far edges themselves stay untouched.
        assert_eq!(*image.get_pixel(3, 2), BLACK);
        assert_eq!(*image.get_pixel(1, 4), BLACK);
        assert_eq!(*image.get_pixel(0, 0), BLACK);
    }

    #[test]
    fn test_fill_rect_clamps_to_bounds() {
        let mut surface = ImageSurface::new(4, 4, BLACK);
        surface.fill_rect(2, 2, 10, 10, RED);
        let image = surface.into_image();
        assert_eq!(*image.get_pixel(3, 3), RED);
        assert_eq!(*image.get_pixel(1, 1), BLACK);
    }

    #[test]
    fn test_outline_rect_leaves_interior() {
        let mut surface = ImageSurface::new(5, 5, BLACK);
        surface.outline_rect(0, 0, 5, 5, RED);
        let image = surface.into_image();

        // Corners and edges painted.
        assert_eq!(*image.get_pixel(0, 0), RED);
        assert_eq!(*image.get_pixel(4, 4), RED);
        assert_eq!(*image.get_pixel(2, 0), RED);
        assert_eq!(*image.get_pixel(0, 2), RED);
        // Interior untouched.
        assert_eq!(*image.get_pixel(2, 2), BLACK);
        assert_eq!(*image.get_pixel(1, 3), BLACK);
    }

    #[test]
    fn test_outline_rect_degenerate_is_a_no_op() {
        let mut surface = ImageSurface::new(4, 4, BLACK);
        surface.outline_rect(2, 2, 2, 2, RED);
        let image = surface.into_image();
        assert!(image.pixels().all(|p| *p == BLACK));
    }

    #[test]
    fn test_palette_defaults() {
        let palette = Palette::default();
        assert_eq!(palette.background, Rgba([0, 0, 0, 0xff]));
        assert_eq!(palette.visited, Rgba([0xff, 0xff, 0xff, 0xff]));
        assert_eq!(palette.grid, RED);
        assert_eq!(palette.origin, Rgba([0, 0xff, 0, 0xff]));
        assert_eq!(palette.note, Rgba([0, 0, 0xff, 0xff]));
    }
}
