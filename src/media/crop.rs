use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

use crate::entities::FileExtension;
use crate::error::MediaError;

/// Crop box in pixels of the source image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Crop box as percentages of the displayed image, the unit the crop widget
/// works in while the user drags.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PercentCrop {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    pub fn extension(&self) -> FileExtension {
        match self {
            OutputFormat::Png => FileExtension::Png,
            OutputFormat::Jpeg => FileExtension::Jpg,
        }
    }

    fn image_format(&self) -> ImageFormat {
        match self {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Jpeg => ImageFormat::Jpeg,
        }
    }
}

impl CropRegion {
    /// Clips the region to a `width` x `height` image.
    pub fn clamp_to(&self, width: u32, height: u32) -> Self {
        let x = self.x.min(width);
        let y = self.y.min(height);
        Self {
            x,
            y,
            width: self.width.min(width - x),
            height: self.height.min(height - y),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl PercentCrop {
    pub fn to_pixels(&self, width: u32, height: u32) -> CropRegion {
        let scale = |percent: f32, total: u32| -> u32 {
            let percent = percent.clamp(0.0, 100.0) as f64;
            (percent * total as f64 / 100.0).round() as u32
        };
        CropRegion {
            x: scale(self.x, width),
            y: scale(self.y, height),
            width: scale(self.width, width),
            height: scale(self.height, height),
        }
        .clamp_to(width, height)
    }
}

/// Largest centred box with the given aspect ratio covering `coverage`
/// percent of the limiting side; the crop widget starts from it.
pub fn centered_aspect_crop(width: u32, height: u32, aspect: f32, coverage: f32) -> CropRegion {
    if width == 0 || height == 0 || aspect <= 0.0 {
        return CropRegion {
            x: 0,
            y: 0,
            width,
            height,
        };
    }
    let coverage = coverage.clamp(1.0, 100.0) as f64 / 100.0;
    let aspect = aspect as f64;
    let (w, h) = (width as f64, height as f64);

    let (mut crop_w, mut crop_h) = if w / h > aspect {
        (h * aspect, h)
    } else {
        (w, w / aspect)
    };
    crop_w = (crop_w * coverage).round().max(1.0);
    crop_h = (crop_h * coverage).round().max(1.0);

    let crop_w = (crop_w as u32).min(width);
    let crop_h = (crop_h as u32).min(height);
    CropRegion {
        x: (width - crop_w) / 2,
        y: (height - crop_h) / 2,
        width: crop_w,
        height: crop_h,
    }
}

/// Decodes `bytes`, cuts `region` out of it and re-encodes the result.
pub fn crop_image(
    bytes: &[u8],
    region: CropRegion,
    format: OutputFormat,
) -> Result<Vec<u8>, MediaError> {
    let source = image::load_from_memory(bytes).map_err(|err| MediaError::Decode(err.to_string()))?;
    let region = region.clamp_to(source.width(), source.height());
    if region.is_empty() {
        return Err(MediaError::EmptyRegion);
    }

    let cropped = source.crop_imm(region.x, region.y, region.width, region.height);
    // JPEG has no alpha channel.
    let cropped = match format {
        OutputFormat::Jpeg => DynamicImage::ImageRgb8(cropped.to_rgb8()),
        OutputFormat::Png => cropped,
    };

    let mut out = Cursor::new(Vec::new());
    cropped
        .write_to(&mut out, format.image_format())
        .map_err(|err| MediaError::Encode(err.to_string()))?;
    Ok(out.into_inner())
}
