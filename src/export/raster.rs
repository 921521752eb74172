//! Raster snapshot backend.
//!
//! Captures a rendered SVG scene into an opaque PNG at a device-pixel
//! scale. The capture path does not lay anything out itself: it
//! rasterizes the visual tree it is given (or the snapshot's own
//! vector rendering), optionally cropped to a single element, and
//! fails fast when the requested element does not exist.

use std::io::{Cursor, Seek, Write};

use image::{ImageFormat, RgbaImage};
use resvg::{tiny_skia, usvg};

use crate::Result;
use crate::error::Error;
use crate::layout::LayoutConfig;
use crate::model::Snapshot;

use super::Exporter;
use super::svg::{SvgConfig, SvgExporter};

/// Configuration for raster capture.
#[derive(Debug, Clone)]
pub struct RasterConfig {
    /// Page geometry for the snapshot's own scene; defaults to A4
    /// landscape.
    pub layout: LayoutConfig,
    /// Device-pixel scale. Values below 2.0 are raised to 2.0 so the
    /// capture stays crisp on high-density displays.
    pub scale: f32,
    /// Opaque background painted under the scene.
    pub background: (u8, u8, u8),
    /// Element id to crop the capture to; `None` captures the full
    /// scene. A missing element is an error, not an empty image.
    pub target: Option<String>,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            scale: 2.0,
            background: (255, 255, 255),
            target: None,
        }
    }
}

/// Exporter for PNG captures.
#[derive(Debug, Clone, Default)]
pub struct RasterExporter {
    config: RasterConfig,
}

impl RasterExporter {
    /// Create a new RasterExporter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a RasterExporter with the specified configuration.
    pub fn with_config(config: RasterConfig) -> Self {
        Self { config }
    }

    /// Renders the snapshot's own diagram scene and captures it.
    pub fn render(&self, snapshot: &Snapshot) -> Result<Vec<u8>> {
        let scene = SvgExporter::with_config(SvgConfig {
            layout: self.config.layout.clone(),
            ..SvgConfig::default()
        })
        .render(snapshot);
        self.capture(&scene)
    }

    /// Rasterizes an SVG scene to PNG bytes.
    ///
    /// The scene is parsed, checked for the capture target, rendered at
    /// the configured scale onto the opaque background, cropped when a
    /// target is set, and encoded.
    pub fn capture(&self, scene: &str) -> Result<Vec<u8>> {
        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        let tree = usvg::Tree::from_str(scene, &options)
            .map_err(|e| Error::InvalidScene(e.to_string()))?;

        // Fail before any pixel work when the target is absent.
        let target_box = match &self.config.target {
            Some(id) => match tree.node_by_id(id) {
                Some(node) => Some(node.abs_bounding_box()),
                None => return Err(Error::MissingCaptureTarget(id.clone())),
            },
            None => None,
        };

        let scale = self.config.scale.max(2.0);
        let size = tree.size();
        let width = (size.width() * scale).ceil() as u32;
        let height = (size.height() * scale).ceil() as u32;
        let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or(Error::EncodeFailed {
            format: "PNG",
            reason: format!("cannot allocate {width}x{height} pixmap"),
        })?;

        let (r, g, b) = self.config.background;
        pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, 255));
        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );

        let pixmap = match target_box {
            Some(rect) => crop(&pixmap, rect, scale)?,
            None => pixmap,
        };
        log::debug!(
            "captured {}x{} px at {scale}x scale",
            pixmap.width(),
            pixmap.height()
        );
        encode_png(&pixmap)
    }
}

/// Clips the rendered pixmap to one element's device-space box.
fn crop(pixmap: &tiny_skia::Pixmap, rect: tiny_skia::Rect, scale: f32) -> Result<tiny_skia::Pixmap> {
    let max_x = pixmap.width() as f32;
    let max_y = pixmap.height() as f32;
    let left = (rect.left() * scale).floor().clamp(0.0, max_x);
    let top = (rect.top() * scale).floor().clamp(0.0, max_y);
    let right = (rect.right() * scale).ceil().clamp(0.0, max_x);
    let bottom = (rect.bottom() * scale).ceil().clamp(0.0, max_y);

    let width = ((right - left) as u32).max(1);
    let height = ((bottom - top) as u32).max(1);
    tiny_skia::IntRect::from_xywh(left as i32, top as i32, width, height)
        .and_then(|clip| pixmap.clone_rect(clip))
        .ok_or_else(|| Error::InvalidScene("capture region lies outside the scene".to_string()))
}

/// Encodes a pixmap as PNG via the image crate, converting the
/// premultiplied pixels back to straight alpha first.
fn encode_png(pixmap: &tiny_skia::Pixmap) -> Result<Vec<u8>> {
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    let img =
        RgbaImage::from_raw(pixmap.width(), pixmap.height(), rgba).ok_or(Error::EncodeFailed {
            format: "PNG",
            reason: "pixel buffer does not match dimensions".to_string(),
        })?;

    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|e| Error::EncodeFailed {
            format: "PNG",
            reason: e.to_string(),
        })?;
    Ok(buffer)
}

impl Exporter for RasterExporter {
    fn export<W: Write + Seek>(&self, snapshot: &Snapshot, writer: &mut W) -> Result<()> {
        writer.write_all(&self.render(snapshot)?)?;
        Ok(())
    }

    fn media_type(&self) -> &'static str {
        "image/png"
    }

    fn suffix(&self) -> &'static str {
        "_diagram.png"
    }
}
