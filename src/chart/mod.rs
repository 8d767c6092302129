//! Chart rendering for classification tallies.
//!
//! Two presentations of the same [`Classification`]: a proportional pie
//! view with percentage labels ([`pie::render_pie_png`]) and an absolute
//! bar view with value labels ([`bar::render_bar_png`]). Both render into
//! in-memory PNG bytes; [`png_base64`] encodes them for transport.

pub mod bar;
pub mod pie;

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use plotters::style::RGBColor;

use crate::classify::Classification;
use crate::error::{AnalysisError, AnalysisResult};

/// Size and title of a rendered chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartStyle {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Chart title.
    pub title: String,
}

impl ChartStyle {
    /// Default size with a custom title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Category Distribution".to_string(),
        }
    }
}

/// Slice palette; the first three entries match the dashboard the charts
/// were designed against.
const PALETTE: [RGBColor; 6] = [
    RGBColor(0xff, 0x99, 0x99),
    RGBColor(0x66, 0xb3, 0xff),
    RGBColor(0x99, 0xff, 0x99),
    RGBColor(0xff, 0xcc, 0x66),
    RGBColor(0xc2, 0x99, 0xff),
    RGBColor(0xb0, 0xb0, 0xb0),
];

pub(crate) fn color_for(idx: usize) -> RGBColor {
    PALETTE[idx % PALETTE.len()]
}

/// Labels and counts in render order: categories first, then the Other
/// bucket as `Others`.
pub(crate) fn chart_slices(classification: &Classification) -> Vec<(String, usize)> {
    let mut slices: Vec<(String, usize)> = classification
        .categories
        .iter()
        .map(|c| (c.name.clone(), c.count))
        .collect();
    slices.push(("Others".to_string(), classification.other));
    slices
}

pub(crate) fn render_err(e: impl std::fmt::Display) -> AnalysisError {
    AnalysisError::Render {
        message: e.to_string(),
    }
}

/// Encode an RGB pixel buffer (as filled by the plotters bitmap backend)
/// into PNG bytes.
pub(crate) fn rgb_buffer_to_png(width: u32, height: u32, buf: Vec<u8>) -> AnalysisResult<Vec<u8>> {
    let img = image::RgbImage::from_raw(width, height, buf).ok_or_else(|| AnalysisError::Render {
        message: "pixel buffer size does not match chart dimensions".to_string(),
    })?;
    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(render_err)?;
    Ok(png)
}

/// Base64 (standard alphabet) encoding of PNG bytes for JSON transport.
pub fn png_base64(png: &[u8]) -> String {
    STANDARD.encode(png)
}
