//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
#[cfg(feature = "png_source")]
use png::{BitDepth, ColorType, Decoder, Transformations};
#[cfg(feature = "png_source")]
use std::io::Cursor;
use std::io::{Error, ErrorKind, Result};
use std::rc::Rc;

use super::*;

/// Side length of every theme atlas cell.
pub const CELL_SIZE: i32 = 16;
/// Minimum atlas width: the right-most referenced cell starts at x = 112.
pub const MIN_ATLAS_WIDTH: i32 = 128;
/// Minimum atlas height: the bottom-most referenced cell starts at y = 32.
pub const MIN_ATLAS_HEIGHT: i32 = 48;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Top-left pixel offset of a 16×16 cell inside the theme atlas.
pub struct Cell {
    /// Horizontal pixel offset.
    pub x: i32,
    /// Vertical pixel offset.
    pub y: i32,
}

impl Cell {
    /// Creates a cell reference from its pixel offset.
    pub const fn new(x: i32, y: i32) -> Self { Self { x, y } }

    /// Returns the cell's rectangle inside the atlas.
    pub fn rect(self) -> Recti { rect(self.x, self.y, CELL_SIZE, CELL_SIZE) }
}

/// Button face while idle.
pub const BUTTON_NORMAL: Cell = Cell::new(48, 16);
/// Button face while hovered.
pub const BUTTON_HOVER: Cell = Cell::new(64, 16);
/// Button face while pressed.
pub const BUTTON_CLICKED: Cell = Cell::new(80, 16);
/// Checkbox box while idle.
pub const CHECKBOX_NORMAL: Cell = Cell::new(48, 32);
/// Checkbox box while hovered.
pub const CHECKBOX_HOVER: Cell = Cell::new(64, 32);
/// Check mark overlay drawn when a checkbox is checked.
pub const CHECKBOX_CHECKED: Cell = Cell::new(80, 32);
/// Textbox frame while inactive.
pub const TEXTBOX_NORMAL: Cell = Cell::new(96, 16);
/// Textbox frame while active.
pub const TEXTBOX_ACTIVE: Cell = Cell::new(112, 16);
/// Window close button while idle or pressed.
pub const CLOSE_NORMAL: Cell = Cell::new(96, 0);
/// Window close button while hovered.
pub const CLOSE_HOVER: Cell = Cell::new(112, 0);

/// Window top row (left, middle, right) for fixed windows.
pub const WINDOW_TOP: [Cell; 3] = [Cell::new(0, 0), Cell::new(16, 0), Cell::new(32, 0)];
/// Window top row (left, middle, right) for movable windows.
pub const WINDOW_TOP_MOVABLE: [Cell; 3] = [Cell::new(48, 0), Cell::new(64, 0), Cell::new(80, 0)];
/// Window middle row (left, center, right).
pub const WINDOW_MIDDLE: [Cell; 3] = [Cell::new(0, 16), Cell::new(16, 16), Cell::new(32, 16)];
/// Window bottom row (left, middle, right).
pub const WINDOW_BOTTOM: [Cell; 3] = [Cell::new(0, 32), Cell::new(16, 32), Cell::new(32, 32)];

/// Describes image bytes a theme atlas can be decoded from.
#[derive(Copy, Clone)]
pub enum ImageSource<'a> {
    /// Raw RGBA pixels laid out as width × height × 4 bytes.
    Raw {
        /// Width in pixels.
        width: i32,
        /// Height in pixels.
        height: i32,
        /// Pixel buffer in RGBA8888 format.
        pixels: &'a [u8],
    },
    #[cfg(feature = "png_source")]
    /// PNG-compressed byte slice (requires the `png_source` feature).
    /// Grayscale and RGB images are expanded to opaque RGBA (alpha = 255).
    Png {
        /// Compressed PNG payload.
        bytes: &'a [u8],
    },
}

/// Decodes image data into a [`Bitmap`] according to `source`.
pub fn load_image_bytes(source: ImageSource) -> Result<Bitmap> {
    match source {
        ImageSource::Raw { width, height, pixels } => {
            if width <= 0 || height <= 0 {
                return Err(Error::new(ErrorKind::InvalidData, "Image dimensions must be positive"));
            }
            let expected = width as usize * height as usize * 4;
            if pixels.len() != expected {
                return Err(Error::new(
                    ErrorKind::InvalidData,
                    format!("Expected {} RGBA bytes, found {}", expected, pixels.len()),
                ));
            }
            let colors = pixels.chunks_exact(4).map(|c| color(c[0], c[1], c[2], c[3])).collect();
            Bitmap::from_pixels(width, height, colors).ok_or_else(|| Error::new(ErrorKind::InvalidData, "Image buffer size mismatch"))
        }
        #[cfg(feature = "png_source")]
        ImageSource::Png { bytes } => decode_png(bytes),
    }
}

#[cfg(feature = "png_source")]
fn decode_png(bytes: &[u8]) -> Result<Bitmap> {
    let mut decoder = Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| Error::new(ErrorKind::InvalidData, format!("PNG decode error: {}", e)))?;
    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| Error::new(ErrorKind::InvalidData, "PNG decoder did not report output size"))?;
    let mut img_data = vec![0; buf_size];
    let info = reader
        .next_frame(&mut img_data)
        .map_err(|e| Error::new(ErrorKind::InvalidData, format!("PNG decode error: {}", e)))?;

    if info.bit_depth != BitDepth::Eight {
        return Err(Error::new(ErrorKind::InvalidData, format!("Unsupported PNG bit depth: {:?}", info.bit_depth)));
    }

    let pixel_size = match info.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Indexed => 1,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
    };

    let mut pixels = Vec::with_capacity((info.width * info.height) as usize);
    let line_size = info.line_size;
    for y in 0..info.height as usize {
        let line = &img_data[(y * line_size)..((y + 1) * line_size)];
        for x in 0..info.width as usize {
            let xx = x * pixel_size;
            let c = match info.color_type {
                ColorType::Grayscale => color(line[xx], line[xx], line[xx], 0xFF),
                ColorType::GrayscaleAlpha => color(line[xx], line[xx], line[xx], line[xx + 1]),
                ColorType::Indexed => return Err(Error::new(ErrorKind::InvalidData, "Indexed PNGs are not supported")),
                ColorType::Rgb => color(line[xx], line[xx + 1], line[xx + 2], 0xFF),
                ColorType::Rgba => color(line[xx], line[xx + 1], line[xx + 2], line[xx + 3]),
            };
            pixels.push(c);
        }
    }

    Bitmap::from_pixels(info.width as i32, info.height as i32, pixels).ok_or_else(|| Error::new(ErrorKind::InvalidData, "PNG buffer size mismatch"))
}

struct Atlas {
    image: Bitmap,
}

#[derive(Clone)]
/// Shared, read-only handle to a loaded theme atlas.
pub struct AtlasHandle(Rc<Atlas>);

impl AtlasHandle {
    /// Wraps an already decoded image, validating that every referenced cell is present.
    pub fn from_bitmap(image: Bitmap) -> Result<Self> {
        if image.width() < MIN_ATLAS_WIDTH || image.height() < MIN_ATLAS_HEIGHT {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!(
                    "Theme atlas is {}x{}, at least {}x{} is required",
                    image.width(),
                    image.height(),
                    MIN_ATLAS_WIDTH,
                    MIN_ATLAS_HEIGHT
                ),
            ));
        }
        tracing::debug!(width = image.width(), height = image.height(), "theme atlas loaded");
        Ok(Self(Rc::new(Atlas { image })))
    }

    /// Attempts to decode and validate a theme atlas.
    pub fn try_from(source: ImageSource) -> Result<Self> { Self::from_bitmap(load_image_bytes(source)?) }

    /// Decodes a theme atlas.
    ///
    /// A malformed atlas is a construction-time misconfiguration, so this method panics when decoding or
    /// validation fails. Use [`AtlasHandle::try_from`] to handle failures explicitly.
    pub fn from(source: ImageSource) -> Self { Self::try_from(source).unwrap_or_else(|err| panic!("Theme atlas load failed: {}", err)) }

    /// Builds the built-in flat grey theme, laid out like the reference atlas.
    pub fn default_theme() -> Self {
        let mut image = Bitmap::new(MIN_ATLAS_WIDTH, MIN_ATLAS_HEIGHT);
        paint_default_theme(&mut image);
        Self(Rc::new(Atlas { image }))
    }

    /// Returns the atlas width in pixels.
    pub fn width(&self) -> i32 { self.0.image.width() }

    /// Returns the atlas height in pixels.
    pub fn height(&self) -> i32 { self.0.image.height() }

    /// Returns the whole atlas image.
    pub fn image(&self) -> &Bitmap { &self.0.image }

    /// Copies a single 16×16 cell out of the atlas.
    pub fn cell(&self, cell: Cell) -> Bitmap { self.0.image.sub_image(cell.rect()) }

    #[cfg(feature = "png_source")]
    /// Encodes the atlas image as an RGBA PNG.
    pub fn png_image_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        let pixels = self.0.image.pixels().iter().flat_map(|c| [c.r, c.g, c.b, c.a]).collect::<Vec<u8>>();
        {
            let mut encoder = png::Encoder::new(&mut bytes, self.width() as u32, self.height() as u32);
            encoder.set_color(ColorType::Rgba);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header().map_err(|e| Error::new(ErrorKind::Other, format!("{}", e)))?;
            writer.write_image_data(pixels.as_slice()).map_err(|e| Error::new(ErrorKind::Other, format!("{}", e)))?;
        }
        Ok(bytes)
    }
}

const FACE: Color = Color { r: 70, g: 70, b: 78, a: 255 };
const FACE_HOVER: Color = Color { r: 92, g: 92, b: 102, a: 255 };
const FACE_DOWN: Color = Color { r: 52, g: 52, b: 58, a: 255 };
const LIGHT: Color = Color { r: 140, g: 140, b: 150, a: 255 };
const DARK: Color = Color { r: 24, g: 24, b: 28, a: 255 };
const WINDOW_BG: Color = Color { r: 44, g: 44, b: 50, a: 240 };
const TITLE_BG: Color = Color { r: 30, g: 56, b: 96, a: 255 };
const TITLE_FIXED_BG: Color = Color { r: 36, g: 36, b: 42, a: 255 };
const FIELD: Color = Color { r: 20, g: 20, b: 24, a: 255 };
const ACCENT: Color = Color { r: 90, g: 150, b: 230, a: 255 };

#[derive(Copy, Clone)]
struct Edges {
    top: bool,
    left: bool,
    bottom: bool,
    right: bool,
}

const ALL_EDGES: Edges = Edges { top: true, left: true, bottom: true, right: true };

fn paint_tile(image: &mut Bitmap, cell: Cell, fill: Color, light: Color, dark: Color, edges: Edges) {
    image.fill_rect(cell.rect(), fill);
    let s = CELL_SIZE;
    if edges.top {
        image.fill_rect(rect(cell.x, cell.y, s, 1), light);
    }
    if edges.left {
        image.fill_rect(rect(cell.x, cell.y, 1, s), light);
    }
    if edges.bottom {
        image.fill_rect(rect(cell.x, cell.y + s - 1, s, 1), dark);
    }
    if edges.right {
        image.fill_rect(rect(cell.x + s - 1, cell.y, 1, s), dark);
    }
}

fn paint_frame_row(image: &mut Bitmap, cells: [Cell; 3], fill: Color, top: bool, bottom: bool) {
    let [left, middle, right] = cells;
    paint_tile(image, left, fill, LIGHT, DARK, Edges { top, left: true, bottom, right: false });
    paint_tile(image, middle, fill, LIGHT, DARK, Edges { top, left: false, bottom, right: false });
    paint_tile(image, right, fill, LIGHT, DARK, Edges { top, left: false, bottom, right: true });
}

fn paint_cross(image: &mut Bitmap, cell: Cell, ink: Color) {
    for i in 4..12 {
        image.set(cell.x + i, cell.y + i, ink);
        image.set(cell.x + 15 - i, cell.y + i, ink);
    }
}

fn paint_default_theme(image: &mut Bitmap) {
    paint_frame_row(image, WINDOW_TOP, TITLE_FIXED_BG, true, false);
    paint_frame_row(image, WINDOW_TOP_MOVABLE, TITLE_BG, true, false);
    paint_frame_row(image, WINDOW_MIDDLE, WINDOW_BG, false, false);
    paint_frame_row(image, WINDOW_BOTTOM, WINDOW_BG, false, true);

    paint_tile(image, CLOSE_NORMAL, TITLE_BG, TITLE_BG, TITLE_BG, ALL_EDGES);
    paint_cross(image, CLOSE_NORMAL, LIGHT);
    paint_tile(image, CLOSE_HOVER, TITLE_BG, TITLE_BG, TITLE_BG, ALL_EDGES);
    paint_cross(image, CLOSE_HOVER, Color::WHITE);

    paint_tile(image, BUTTON_NORMAL, FACE, LIGHT, DARK, ALL_EDGES);
    paint_tile(image, BUTTON_HOVER, FACE_HOVER, LIGHT, DARK, ALL_EDGES);
    paint_tile(image, BUTTON_CLICKED, FACE_DOWN, DARK, LIGHT, ALL_EDGES);

    paint_tile(image, TEXTBOX_NORMAL, FIELD, DARK, LIGHT, ALL_EDGES);
    paint_tile(image, TEXTBOX_ACTIVE, FIELD, ACCENT, ACCENT, ALL_EDGES);

    paint_tile(image, CHECKBOX_NORMAL, FIELD, DARK, LIGHT, ALL_EDGES);
    paint_tile(image, CHECKBOX_HOVER, FIELD, ACCENT, ACCENT, ALL_EDGES);
    // the checked cell is an overlay: transparent except for the mark
    image.fill_rect(CHECKBOX_CHECKED.rect(), Color::TRANSPARENT);
    image.fill_rect(rect(CHECKBOX_CHECKED.x + 4, CHECKBOX_CHECKED.y + 4, 8, 8), ACCENT);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_size_mismatch_is_rejected() {
        let res = load_image_bytes(ImageSource::Raw { width: 2, height: 2, pixels: &[0; 15] });
        assert!(res.is_err());
    }

    #[test]
    fn small_atlas_is_rejected() {
        let pixels = vec![0xFFu8; 64 * 48 * 4];
        let res = AtlasHandle::try_from(ImageSource::Raw { width: 64, height: 48, pixels: &pixels });
        assert!(res.is_err());
    }

    #[test]
    #[should_panic(expected = "Theme atlas load failed")]
    fn from_panics_on_malformed_atlas() {
        let _ = AtlasHandle::from(ImageSource::Raw { width: 1, height: 1, pixels: &[0, 0, 0, 0] });
    }

    #[test]
    fn raw_atlas_round_trips_cells() {
        let mut pixels = vec![0u8; 128 * 48 * 4];
        // mark the top-left pixel of the button-hover cell
        let idx = ((BUTTON_HOVER.y * 128 + BUTTON_HOVER.x) * 4) as usize;
        pixels[idx..idx + 4].copy_from_slice(&[1, 2, 3, 4]);
        let atlas = AtlasHandle::from(ImageSource::Raw { width: 128, height: 48, pixels: &pixels });
        let cell = atlas.cell(BUTTON_HOVER);
        assert_eq!((cell.width(), cell.height()), (16, 16));
        assert_eq!(cell.get(0, 0), Some(color(1, 2, 3, 4)));
        assert_eq!(cell.get(1, 0), Some(color(0, 0, 0, 0)));
    }

    #[test]
    fn default_theme_has_every_cell() {
        let atlas = AtlasHandle::default_theme();
        assert_eq!((atlas.width(), atlas.height()), (MIN_ATLAS_WIDTH, MIN_ATLAS_HEIGHT));
        for cell in [BUTTON_NORMAL, BUTTON_HOVER, BUTTON_CLICKED, TEXTBOX_NORMAL, TEXTBOX_ACTIVE, CHECKBOX_NORMAL, CLOSE_NORMAL] {
            assert_eq!(atlas.cell(cell).get(8, 8).map(|c| c.a), Some(255));
        }
        assert_eq!(atlas.cell(CHECKBOX_CHECKED).get(0, 0), Some(Color::TRANSPARENT));
    }

    #[cfg(feature = "png_source")]
    #[test]
    fn png_round_trip_keeps_pixels() {
        let atlas = AtlasHandle::default_theme();
        let bytes = atlas.png_image_bytes().unwrap();
        let decoded = AtlasHandle::try_from(ImageSource::Png { bytes: &bytes }).unwrap();
        assert_eq!(decoded.image(), atlas.image());
    }

    #[cfg(feature = "png_source")]
    #[test]
    fn png_decode_error_returns_err() {
        assert!(load_image_bytes(ImageSource::Png { bytes: &[] }).is_err());
    }
}
