//! Deck export to image and document formats.
//!
//! Every frame is first serialised to SVG; PNG rasterises that SVG with
//! resvg/tiny-skia and PDF embeds one rasterised frame per page.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use deck_core::text::ApproxMetrics;
use deck_core::{DeckScene, Frame, Page};
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};
use crate::svg;

/// Export output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// One SVG per frame plus a page overview.
    #[default]
    Svg,
    /// One PNG per frame.
    Png,
    /// One multi-page PDF document.
    Pdf,
    /// The recorded scene as JSON.
    Json,
}

impl ExportFormat {
    /// File extension for this format.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Png => "png",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(ExportFormat::Svg),
            "png" => Ok(ExportFormat::Png),
            "pdf" => Ok(ExportFormat::Pdf),
            "json" => Ok(ExportFormat::Json),
            other => Err(RenderError::UnknownFormat(other.to_string())),
        }
    }
}

/// Configuration for deck export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Scale factor for raster output (e.g. 0.5 for previews).
    pub scale: f32,
    /// DPI used to size PDF pages (default: 96.0).
    pub dpi: f32,
    /// Load the system font database before rasterising text.
    pub system_fonts: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            dpi: 96.0,
            system_fonts: true,
        }
    }
}

/// Exports a [`DeckScene`] to files.
#[derive(Debug, Clone, Default)]
pub struct DeckExporter {
    config: ExportConfig,
    metrics: ApproxMetrics,
}

impl DeckExporter {
    /// Create a new exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self {
            config,
            metrics: ApproxMetrics::default(),
        }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Use specific text metrics for wrapping.
    #[must_use]
    pub fn with_metrics(mut self, metrics: ApproxMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Render one frame as an SVG document.
    #[must_use]
    pub fn frame_svg(&self, frame: &Frame) -> String {
        svg::frame_svg(frame, &self.metrics)
    }

    /// Render a page overview as an SVG document.
    #[must_use]
    pub fn page_svg(&self, page: &Page) -> String {
        svg::page_svg(page, &self.metrics)
    }

    /// Render one frame to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if rasterisation or encoding fails.
    pub fn frame_png(&self, frame: &Frame) -> RenderResult<Vec<u8>> {
        #[cfg(feature = "raster")]
        {
            let pixmap = self.rasterize(&self.frame_svg(frame))?;
            pixmap
                .encode_png()
                .map_err(|e| RenderError::Export(format!("PNG encoding failed: {e}")))
        }
        #[cfg(not(feature = "raster"))]
        {
            let _ = frame;
            Err(RenderError::Unsupported("png".to_string()))
        }
    }

    /// Render every frame of the scene into one PDF, a page per frame.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::EmptyScene`] if there are no frames, or an
    /// error if rendering or PDF generation fails.
    pub fn scene_pdf(&self, scene: &DeckScene) -> RenderResult<Vec<u8>> {
        #[cfg(feature = "raster")]
        {
            self.render_pdf(scene)
        }
        #[cfg(not(feature = "raster"))]
        {
            let _ = scene;
            Err(RenderError::Unsupported("pdf".to_string()))
        }
    }

    /// Write the scene to `out_dir` in `format`, returning the files written.
    ///
    /// SVG and PNG produce one file per frame named after the frame
    /// (`01-hero.svg`); SVG also writes `deck.svg` with all frames. PDF
    /// writes `deck.pdf` and JSON writes `scene.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene is empty, rendering fails, or a file
    /// cannot be written.
    pub fn export(
        &self,
        scene: &DeckScene,
        format: ExportFormat,
        out_dir: &Path,
    ) -> RenderResult<Vec<PathBuf>> {
        if scene.frame_count() == 0 {
            return Err(RenderError::EmptyScene);
        }
        std::fs::create_dir_all(out_dir)?;

        let mut written = Vec::new();
        let mut write = |name: String, bytes: &[u8]| -> RenderResult<()> {
            let path = out_dir.join(name);
            std::fs::write(&path, bytes)?;
            tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote export file");
            written.push(path);
            Ok(())
        };

        match format {
            ExportFormat::Svg => {
                for frame in scene.frames() {
                    write(file_name(frame, format), self.frame_svg(frame).as_bytes())?;
                }
                if let Some(page) = scene.current_page() {
                    write("deck.svg".to_string(), self.page_svg(page).as_bytes())?;
                }
            }
            ExportFormat::Png => {
                for frame in scene.frames() {
                    write(file_name(frame, format), &self.frame_png(frame)?)?;
                }
            }
            ExportFormat::Pdf => write("deck.pdf".to_string(), &self.scene_pdf(scene)?)?,
            ExportFormat::Json => write("scene.json".to_string(), scene.to_json()?.as_bytes())?,
        }

        tracing::info!(
            format = %format,
            files = written.len(),
            dir = %out_dir.display(),
            "Exported deck"
        );
        Ok(written)
    }

    #[cfg(feature = "raster")]
    #[allow(clippy::cast_precision_loss)]
    fn render_pdf(&self, scene: &DeckScene) -> RenderResult<Vec<u8>> {
        let frames: Vec<&Frame> = scene.frames().collect();
        let first = frames.first().ok_or(RenderError::EmptyScene)?;
        let title = scene
            .current_page()
            .map_or("Deck", |page| page.name.as_str());

        let mm = |px: f32| printpdf::Mm(px / self.config.dpi * 25.4);
        let (doc, page1, layer1) =
            printpdf::PdfDocument::new(title, mm(first.width), mm(first.height), "Slide");

        for (i, frame) in frames.iter().enumerate() {
            let (page, layer) = if i == 0 {
                (page1, layer1)
            } else {
                doc.add_page(mm(frame.width), mm(frame.height), "Slide")
            };
            let current_layer = doc.get_page(page).get_layer(layer);

            let pixmap = self.rasterize(&self.frame_svg(frame))?;
            let png = pixmap
                .encode_png()
                .map_err(|e| RenderError::Export(format!("PNG encoding failed: {e}")))?;
            let dynamic_image = printpdf::image_crate::load_from_memory(&png)
                .map_err(|e| RenderError::Export(format!("Failed to decode PNG for PDF: {e}")))?;
            let pdf_image = printpdf::Image::from_dynamic_image(&dynamic_image);

            // Pixels are placed at the configured DPI so the image fills the page.
            let transform = printpdf::ImageTransform {
                translate_x: Some(printpdf::Mm(0.0)),
                translate_y: Some(printpdf::Mm(0.0)),
                dpi: Some(self.config.dpi * self.config.scale),
                ..Default::default()
            };
            pdf_image.add_to_layer(current_layer, transform);
        }

        doc.save_to_bytes()
            .map_err(|e| RenderError::Export(format!("PDF save failed: {e}")))
    }

    /// Rasterise an SVG string to a tiny-skia Pixmap at the configured scale.
    #[cfg(feature = "raster")]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn rasterize(&self, svg_string: &str) -> RenderResult<tiny_skia::Pixmap> {
        let mut opt = usvg::Options::default();
        if self.config.system_fonts {
            opt.fontdb_mut().load_system_fonts();
        }
        let tree = usvg::Tree::from_str(svg_string, &opt)
            .map_err(|e| RenderError::Raster(format!("SVG parsing failed: {e}")))?;

        let scale = self.config.scale.max(0.01);
        let px_w = (tree.size().width() * scale).ceil() as u32;
        let px_h = (tree.size().height() * scale).ceil() as u32;

        let mut pixmap = tiny_skia::Pixmap::new(px_w.max(1), px_h.max(1))
            .ok_or_else(|| RenderError::Raster("Failed to create pixmap".to_string()))?;

        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );

        Ok(pixmap)
    }
}

/// File name for a frame, e.g. `01 - TWO_COL` becomes `01-two-col.svg`.
#[must_use]
pub fn file_name(frame: &Frame, format: ExportFormat) -> String {
    let mut stem = String::with_capacity(frame.name.len());
    for c in frame.name.chars() {
        if c.is_ascii_alphanumeric() {
            stem.push(c.to_ascii_lowercase());
        } else if !stem.ends_with('-') && !stem.is_empty() {
            stem.push('-');
        }
    }
    let stem = stem.trim_end_matches('-');
    let stem = if stem.is_empty() { "frame" } else { stem };
    format!("{stem}.{}", format.extension())
}
