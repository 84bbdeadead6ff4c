// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Working image: the bounded-resolution copy of the input that all
// detection geometry is computed on, together with its gradient magnitude map.

use docedge_core::error::{DocEdgeError, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, ImageBuffer, Luma, RgbImage};
use imageproc::gradients::{horizontal_sobel, vertical_sobel};
use tracing::{debug, instrument};

use crate::image::color::luma_plane;

/// Per-pixel gradient magnitude of the working image's intensity.
pub type GradientMap = ImageBuffer<Luma<f32>, Vec<f32>>;

/// The downsampled colour image, its grayscale, its gradient map, and the
/// factor that maps original coordinates onto it.
///
/// Built once per detection and read-only afterwards.
#[derive(Debug, Clone)]
pub struct WorkingImage {
    rgb: RgbImage,
    gray: GrayImage,
    gradient: GradientMap,
    scale: f64,
}

impl WorkingImage {
    // -- Construction ---------------------------------------------------------

    /// Normalize `image` to 8-bit RGB and prepare it for detection.
    ///
    /// Fails only for images with zero width or height.
    pub fn prepare(image: &DynamicImage, working_size: u32) -> Result<Self> {
        let rgb = normalize_channels(image)?;
        Self::from_rgb(rgb, working_size)
    }

    /// Downsample `rgb` so that its longest side is at most `working_size`,
    /// then compute the grayscale and gradient planes.
    #[instrument(skip(rgb), fields(width = rgb.width(), height = rgb.height()))]
    pub fn from_rgb(rgb: RgbImage, working_size: u32) -> Result<Self> {
        let (w, h) = rgb.dimensions();
        if w == 0 || h == 0 {
            return Err(DocEdgeError::InvalidImage(format!(
                "image has zero area ({w}x{h})"
            )));
        }

        let longest = w.max(h);
        let (rgb, scale) = if longest > working_size && working_size > 0 {
            let scale = working_size as f64 / longest as f64;
            let nw = ((w as f64 * scale).round() as u32).max(1);
            let nh = ((h as f64 * scale).round() as u32).max(1);
            // Triangle filtering widens its support with the reduction
            // factor, averaging each source footprint.
            (imageops::resize(&rgb, nw, nh, FilterType::Triangle), scale)
        } else {
            (rgb, 1.0)
        };

        let gray = luma_plane(&rgb);
        let gradient = gradient_magnitude(&gray);

        debug!(
            working_w = rgb.width(),
            working_h = rgb.height(),
            scale,
            "Working image prepared"
        );
        Ok(Self {
            rgb,
            gray,
            gradient,
            scale,
        })
    }

    // -- Accessors ------------------------------------------------------------

    pub fn rgb(&self) -> &RgbImage {
        &self.rgb
    }

    pub fn gray(&self) -> &GrayImage {
        &self.gray
    }

    pub fn gradient(&self) -> &GradientMap {
        &self.gradient
    }

    /// Factor from original to working coordinates (`<= 1.0`).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn width(&self) -> u32 {
        self.rgb.width()
    }

    pub fn height(&self) -> u32 {
        self.rgb.height()
    }

    /// Working-image area in pixels.
    pub fn area(&self) -> f64 {
        self.width() as f64 * self.height() as f64
    }

    /// Gradient magnitude at `(x, y)`, or `None` outside the image.
    pub fn gradient_at(&self, x: i32, y: i32) -> Option<f32> {
        if x < 0 || y < 0 {
            return None;
        }
        self.gradient
            .get_pixel_checked(x as u32, y as u32)
            .map(|p| p.0[0])
    }
}

/// Convert any decoded image to 8-bit RGB: alpha is dropped and single
/// channel images are replicated across R, G and B.
pub fn normalize_channels(image: &DynamicImage) -> Result<RgbImage> {
    if image.width() == 0 || image.height() == 0 {
        return Err(DocEdgeError::InvalidImage(format!(
            "image has zero area ({}x{})",
            image.width(),
            image.height()
        )));
    }
    Ok(match image {
        DynamicImage::ImageRgb8(rgb) => rgb.clone(),
        other => other.to_rgb8(),
    })
}

/// `sqrt(gx² + gy²)` of the 3x3 Sobel derivatives.
pub fn gradient_magnitude(gray: &GrayImage) -> GradientMap {
    let gx = horizontal_sobel(gray);
    let gy = vertical_sobel(gray);
    GradientMap::from_fn(gray.width(), gray.height(), |x, y| {
        let dx = gx.get_pixel(x, y).0[0] as f32;
        let dy = gy.get_pixel(x, y).0[0] as f32;
        Luma([(dx * dx + dy * dy).sqrt()])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, Rgba, RgbaImage};

    #[test]
    fn zero_area_is_invalid() {
        let empty = DynamicImage::ImageRgb8(RgbImage::new(0, 480));
        assert!(matches!(
            WorkingImage::prepare(&empty, 600),
            Err(DocEdgeError::InvalidImage(_))
        ));
    }

    #[test]
    fn large_inputs_are_downsampled() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(1200, 900));
        let working = WorkingImage::prepare(&img, 600).unwrap();
        assert_eq!((working.width(), working.height()), (600, 450));
        assert!((working.scale() - 0.5).abs() < 1e-12);
        assert!((working.area() - 270_000.0).abs() < 1e-9);
        assert_eq!(working.gradient().dimensions(), (600, 450));
    }

    #[test]
    fn small_inputs_keep_their_size() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(320, 240));
        let working = WorkingImage::prepare(&img, 600).unwrap();
        assert_eq!((working.width(), working.height()), (320, 240));
        assert_eq!(working.scale(), 1.0);
    }

    #[test]
    fn alpha_is_dropped_and_gray_replicated() {
        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 0])));
        assert_eq!(normalize_channels(&rgba).unwrap().get_pixel(1, 1), &Rgb([10, 20, 30]));

        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(2, 2, Luma([77])));
        assert_eq!(normalize_channels(&gray).unwrap().get_pixel(0, 1), &Rgb([77, 77, 77]));
    }

    #[test]
    fn gray_plane_is_bt601_luma() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([200, 40, 90])));
        let working = WorkingImage::prepare(&img, 600).unwrap();
        // 0.299 * 200 + 0.587 * 40 + 0.114 * 90 = 93.54
        assert_eq!(working.gray().get_pixel(2, 2).0[0], 94);
    }

    #[test]
    fn gradient_peaks_on_step_edge() {
        let gray = GrayImage::from_fn(20, 10, |x, _| Luma([if x < 10 { 20 } else { 220 }]));
        let grad = gradient_magnitude(&gray);
        assert!(grad.get_pixel(9, 5).0[0] > 500.0);
        assert_eq!(grad.get_pixel(3, 5).0[0], 0.0);
        assert_eq!(grad.get_pixel(16, 5).0[0], 0.0);
    }

    #[test]
    fn gradient_lookup_is_bounds_checked() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(8, 8));
        let working = WorkingImage::prepare(&img, 600).unwrap();
        assert_eq!(working.gradient_at(0, 0), Some(0.0));
        assert_eq!(working.gradient_at(-1, 3), None);
        assert_eq!(working.gradient_at(3, 8), None);
    }
}
