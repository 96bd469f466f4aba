//! Destinations for rendered tiles.
//!
//! A renderer fills a [`PixelBuffer`] it owns for the duration of one call,
//! then hands it to a [`TileSink`]. Sinks that can draw text also receive
//! per-cell labels from the choropleth renderer.

use grid_common::{Rgba, VizError, VizResult, TILE_SIZE};
use image::RgbaImage;
use imageproc::drawing::draw_text_mut;
use rusttype::{Font, Scale};
use std::fmt;
use std::path::Path;

/// A 256×256 RGBA raster, row-major, 4 bytes per pixel.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
}

impl PixelBuffer {
    /// A fully transparent tile.
    pub fn new() -> Self {
        Self {
            data: vec![0; TILE_SIZE * TILE_SIZE * 4],
        }
    }

    /// Write one pixel. Coordinates outside the tile are ignored.
    #[inline]
    pub fn put(&mut self, x: usize, y: usize, color: Rgba) {
        if x >= TILE_SIZE || y >= TILE_SIZE {
            return;
        }
        let offset = (y * TILE_SIZE + x) * 4;
        self.data[offset..offset + 4].copy_from_slice(&color);
    }

    /// Read one pixel; transparent outside the tile.
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        if x >= TILE_SIZE || y >= TILE_SIZE {
            return [0; 4];
        }
        let offset = (y * TILE_SIZE + x) * 4;
        [
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
            self.data[offset + 3],
        ]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn is_transparent(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opaque = self.data.chunks_exact(4).filter(|px| px[3] != 0).count();
        f.debug_struct("PixelBuffer")
            .field("size", &TILE_SIZE)
            .field("opaque_pixels", &opaque)
            .finish()
    }
}

/// Text for one grid cell, anchored at the cell's top-left tile pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct CellLabel {
    pub text: String,
    pub value: i32,
    pub gx: i64,
    pub gy: i64,
    /// Tile pixel column of the cell's left edge
    pub x: i64,
    /// Tile pixel row of the cell's top edge
    pub y: i64,
}

/// Receives finished tiles.
pub trait TileSink {
    /// Replace the sink's pixels with `buffer`.
    fn put_pixels(&mut self, buffer: &PixelBuffer);

    /// Draw a text label over the pixels. Ignored by default.
    fn draw_label(&mut self, _label: &CellLabel) {}
}

impl TileSink for PixelBuffer {
    fn put_pixels(&mut self, buffer: &PixelBuffer) {
        self.data.copy_from_slice(&buffer.data);
    }
}

/// Label text height in pixels.
const LABEL_FONT_SIZE: f32 = 10.0;

/// Parse a TrueType font for [`ImageSink::with_font`].
pub fn parse_font(bytes: Vec<u8>) -> VizResult<Font<'static>> {
    Font::try_from_vec(bytes).ok_or_else(|| VizError::config("unparseable TrueType font"))
}

/// Read and parse a TrueType font file. Parse once and clone the font into
/// each sink; clones share the font data.
pub fn load_font(path: impl AsRef<Path>) -> VizResult<Font<'static>> {
    parse_font(std::fs::read(path)?)
}

/// Sink backed by an [`image::RgbaImage`], drawing labels when a font is set.
pub struct ImageSink {
    image: RgbaImage,
    font: Option<Font<'static>>,
    labels: Vec<CellLabel>,
}

impl ImageSink {
    pub fn new() -> Self {
        Self {
            image: RgbaImage::new(TILE_SIZE as u32, TILE_SIZE as u32),
            font: None,
            labels: Vec::new(),
        }
    }

    /// Draw labels with `font`. Without one, labels are only recorded.
    pub fn with_font(mut self, font: Font<'static>) -> Self {
        self.font = Some(font);
        self
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Every label received since creation.
    pub fn labels(&self) -> &[CellLabel] {
        &self.labels
    }
}

impl Default for ImageSink {
    fn default() -> Self {
        Self::new()
    }
}

impl TileSink for ImageSink {
    fn put_pixels(&mut self, buffer: &PixelBuffer) {
        self.image.copy_from_slice(buffer.as_bytes());
    }

    fn draw_label(&mut self, label: &CellLabel) {
        self.labels.push(label.clone());

        let Some(font) = &self.font else {
            return;
        };
        let scale = Scale::uniform(LABEL_FONT_SIZE);
        let line_height = LABEL_FONT_SIZE.ceil() as i32;
        for (i, line) in label.text.lines().enumerate() {
            draw_text_mut(
                &mut self.image,
                image::Rgba([0, 0, 0, 255]),
                label.x as i32 + 1,
                label.y as i32 + 1 + i as i32 * line_height,
                scale,
                font,
                line,
            );
        }
    }
}
