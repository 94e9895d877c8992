//! QR code generation and export
//!
//! Turns a (business, area, table) triple into the guest menu URL, renders
//! it as a QR image and hands back a downloadable artifact. Encoding is a
//! pure function of the URL string: failures mutate nothing and retrying
//! means re-invoking with the same inputs.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};

use crate::{ClientConfig, ClientResult};

/// Export format selected in the QR dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrFormat {
    Png,
    Svg,
}

impl QrFormat {
    pub fn extension(self) -> &'static str {
        match self {
            QrFormat::Png => "png",
            QrFormat::Svg => "svg",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            QrFormat::Png => "image/png",
            QrFormat::Svg => "image/svg+xml",
        }
    }
}

/// A rendered QR artifact ready for download
#[derive(Debug, Clone)]
pub struct QrExport {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl QrExport {
    /// Write the artifact into a directory, returning the full path
    pub fn save_to(&self, dir: &Path) -> ClientResult<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        tracing::debug!(path = %path.display(), "QR export written");
        Ok(path)
    }
}

/// Compose the guest menu URL a table QR encodes:
/// `<origin>/<prefix>/<business>/menu?area=<area>&table=<unit>`
pub fn menu_url(config: &ClientConfig, business: &str, area: &str, unit: &str) -> String {
    format!(
        "{}/{}/{}/menu?area={}&table={}",
        config.public_origin.trim_end_matches('/'),
        config.guest_prefix,
        business,
        area,
        unit
    )
}

/// QR renderer with a configurable error-correction level (default H)
#[derive(Debug, Clone, Copy)]
pub struct QrExporter {
    ec_level: EcLevel,
    /// Minimum raster edge in pixels (PNG only)
    min_dimensions: u32,
}

impl Default for QrExporter {
    fn default() -> Self {
        Self {
            ec_level: EcLevel::H,
            min_dimensions: 256,
        }
    }
}

impl QrExporter {
    pub fn new(ec_level: EcLevel) -> Self {
        Self {
            ec_level,
            ..Self::default()
        }
    }

    pub fn with_min_dimensions(mut self, pixels: u32) -> Self {
        self.min_dimensions = pixels;
        self
    }

    /// Render a URL into a downloadable artifact
    pub fn export(&self, url: &str, stem: &str, format: QrFormat) -> ClientResult<QrExport> {
        let bytes = match format {
            QrFormat::Png => self.render_png(url)?,
            QrFormat::Svg => self.render_svg(url)?.into_bytes(),
        };
        Ok(QrExport {
            file_name: format!("{}.{}", stem, format.extension()),
            mime: format.mime(),
            bytes,
        })
    }

    /// Render a URL as PNG bytes
    pub fn render_png(&self, url: &str) -> ClientResult<Vec<u8>> {
        let code = QrCode::with_error_correction_level(url, self.ec_level)?;
        let raster = code
            .render::<image::Luma<u8>>()
            .min_dimensions(self.min_dimensions, self.min_dimensions)
            .build();

        let mut bytes = Vec::new();
        image::DynamicImage::ImageLuma8(raster)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Render a URL as a PNG data URL for inline preview
    pub fn png_data_url(&self, url: &str) -> ClientResult<String> {
        let bytes = self.render_png(url)?;
        Ok(format!("data:image/png;base64,{}", BASE64.encode(bytes)))
    }

    /// Render a URL as SVG markup
    pub fn render_svg(&self, url: &str) -> ClientResult<String> {
        let code = QrCode::with_error_correction_level(url, self.ec_level)?;
        Ok(code
            .render::<svg::Color>()
            .min_dimensions(self.min_dimensions, self.min_dimensions)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .build())
    }
}
