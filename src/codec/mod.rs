//! Image decode/encode.
//!
//! Output formats live in a [`FormatRegistry`] that is built once at
//! startup and passed to whoever needs to encode. Decoding sniffs the
//! format from the data.

mod options;

pub use options::EncoderOptions;

use std::io::Write;
use std::path::Path;

use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{DynamicImage, ExtendedColorType, Frame, ImageEncoder, ImageError, RgbaImage};

use crate::error::{MapError, Result};

/// Encoder entry point shared by every format.
pub type EncodeFn = fn(&mut dyn Write, &RgbaImage, &EncoderOptions) -> Result<()>;

/// A registered output format.
#[derive(Debug, Clone)]
pub struct Format {
    /// Format name, as given to `--format`.
    pub name: &'static str,
    /// File extensions, without the dot.
    pub extensions: &'static [&'static str],
    /// Option keys the encoder understands.
    pub options: &'static [&'static str],
    encode: EncodeFn,
}

impl Format {
    pub const fn new(
        name: &'static str,
        extensions: &'static [&'static str],
        options: &'static [&'static str],
        encode: EncodeFn,
    ) -> Self {
        Self {
            name,
            extensions,
            options,
            encode,
        }
    }

    /// Encode an image in this format.
    pub fn encode(
        &self,
        writer: &mut dyn Write,
        image: &RgbaImage,
        options: &EncoderOptions,
    ) -> Result<()> {
        (self.encode)(writer, image, options)
    }

    fn has_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// The set of formats available for output.
#[derive(Debug, Clone, Default)]
pub struct FormatRegistry {
    formats: Vec<Format>,
}

impl FormatRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with png, jpeg, gif and pnm.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Format::new("png", &["png"], &["compression"], encode_png));
        registry.register(Format::new("jpeg", &["jpg", "jpeg"], &["quality"], encode_jpeg));
        registry.register(Format::new("gif", &["gif"], &[], encode_gif));
        registry.register(Format::new(
            "pnm",
            &["pnm", "ppm", "pgm"],
            &["format"],
            encode_pnm,
        ));
        registry
    }

    /// Add a format. A later registration with the same name replaces the earlier one.
    pub fn register(&mut self, format: Format) {
        self.formats.retain(|f| !f.name.eq_ignore_ascii_case(format.name));
        self.formats.push(format);
    }

    /// Look up a format by name (case-insensitive).
    pub fn get(&self, name: &str) -> Result<&Format> {
        self.formats
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| MapError::UnsupportedFormat {
                format: name.to_string(),
            })
    }

    /// Look up a format by a path's extension.
    pub fn for_path(&self, path: &Path) -> Option<&Format> {
        let ext = path.extension()?.to_str()?;
        self.formats.iter().find(|f| f.has_extension(ext))
    }

    /// Iterate over registered formats in registration order.
    pub fn formats(&self) -> impl Iterator<Item = &Format> {
        self.formats.iter()
    }

    /// Encode `image` as the named format.
    pub fn encode(
        &self,
        name: &str,
        writer: &mut dyn Write,
        image: &RgbaImage,
        options: &EncoderOptions,
    ) -> Result<()> {
        self.get(name)?.encode(writer, image, options)
    }
}

/// Decode an image from memory, guessing its format.
pub fn decode(bytes: &[u8]) -> Result<RgbaImage> {
    image::load_from_memory(bytes)
        .map(|img| img.to_rgba8())
        .map_err(image_error)
}

/// Decode an image file.
pub fn open(path: &Path) -> Result<RgbaImage> {
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|e| MapError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to decode image: {}", e),
        })
}

fn image_error(e: ImageError) -> MapError {
    MapError::Image {
        message: e.to_string(),
    }
}

fn encode_png(writer: &mut dyn Write, image: &RgbaImage, options: &EncoderOptions) -> Result<()> {
    let compression = match options.str_or("compression", "default") {
        "fast" => CompressionType::Fast,
        "best" => CompressionType::Best,
        _ => CompressionType::Default,
    };

    PngEncoder::new_with_quality(writer, compression, FilterType::Adaptive)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(image_error)
}

fn encode_jpeg(writer: &mut dyn Write, image: &RgbaImage, options: &EncoderOptions) -> Result<()> {
    let quality = options.u8_or("quality", 75).clamp(1, 100);
    // JPEG has no alpha channel.
    let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();

    JpegEncoder::new_with_quality(writer, quality)
        .write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        .map_err(image_error)
}

fn encode_gif(writer: &mut dyn Write, image: &RgbaImage, _options: &EncoderOptions) -> Result<()> {
    GifEncoder::new(writer)
        .encode_frame(Frame::new(image.clone()))
        .map_err(image_error)
}

fn encode_pnm(writer: &mut dyn Write, image: &RgbaImage, options: &EncoderOptions) -> Result<()> {
    let subtype = options.str_or("format", "p6").to_ascii_lowercase();
    let (subtype, gray) = match subtype.as_str() {
        "p2" => (PnmSubtype::Graymap(SampleEncoding::Ascii), true),
        "p3" => (PnmSubtype::Pixmap(SampleEncoding::Ascii), false),
        "p5" => (PnmSubtype::Graymap(SampleEncoding::Binary), true),
        "p6" => (PnmSubtype::Pixmap(SampleEncoding::Binary), false),
        other => {
            return Err(MapError::Image {
                message: format!("invalid pnm format {:?}; expected p2, p3, p5 or p6", other),
            })
        }
    };

    let encoder = PnmEncoder::new(writer).with_subtype(subtype);
    let dynamic = DynamicImage::ImageRgba8(image.clone());

    let result = if gray {
        let luma = dynamic.to_luma8();
        encoder.write_image(luma.as_raw(), luma.width(), luma.height(), ExtendedColorType::L8)
    } else {
        let rgb = dynamic.to_rgb8();
        encoder.write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
    };

    result.map_err(image_error)
}
