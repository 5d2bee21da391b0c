use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::contrast::{threshold, ThresholdType};
use imageproc::distance_transform::Norm;
use imageproc::filter::gaussian_blur_f32;
use imageproc::map::map_colors;
use imageproc::morphology::{close, open};

use crate::models::{Blob, HsvRange};

/// Sigma of a 5x5 Gaussian kernel when sigma is derived from the kernel size
pub const BLUR_SIGMA: f32 = 0.3 * ((5.0 - 1.0) * 0.5 - 1.0) + 0.8;

/// BT.601 luma in 14-bit fixed point: 0.299 R + 0.587 G + 0.114 B, rounded
pub fn luma(pixel: Rgb<u8>) -> u8 {
    let [r, g, b] = pixel.0.map(|c| c as u32);
    ((r * 4899 + g * 9617 + b * 1868 + 8192) >> 14) as u8
}

/// Convert frame to grayscale with BT.601 weights
pub fn to_grayscale(img: &RgbImage) -> GrayImage {
    map_colors(img, |p: Rgb<u8>| Luma([luma(p)]))
}

/// Mean luma over a blob's bounding box, read straight from the colour frame
pub fn bbox_brightness(frame: &RgbImage, blob: &Blob) -> f32 {
    let max_x = blob.max_x.min(frame.width().saturating_sub(1));
    let max_y = blob.max_y.min(frame.height().saturating_sub(1));
    let mut sum: u64 = 0;
    let mut count: u64 = 0;

    for y in blob.min_y..=max_y {
        for x in blob.min_x..=max_x {
            sum += luma(*frame.get_pixel(x, y)) as u64;
            count += 1;
        }
    }

    if count > 0 {
        sum as f32 / count as f32
    } else {
        0.0
    }
}

/// Apply Gaussian blur to reduce sensor noise
pub fn apply_blur(img: &GrayImage) -> GrayImage {
    gaussian_blur_f32(img, BLUR_SIGMA)
}

/// Keep pixels brighter than the threshold (255), everything else becomes 0
pub fn threshold_bright(img: &GrayImage, level: u8) -> GrayImage {
    threshold(img, level, ThresholdType::Binary)
}

/// Convert an RGB pixel to 8-bit HSV: hue halved into 0..180, S and V in 0..255
pub fn rgb_to_hsv(pixel: Rgb<u8>) -> [u8; 3] {
    let [r, g, b] = pixel.0.map(|c| c as f32);

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max > 0.0 { 255.0 * delta / max } else { 0.0 };

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (g - b) / delta
    } else if max == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    let h = if h < 0.0 { h + 360.0 } else { h };

    [
        (h / 2.0).round() as u8,
        s.round() as u8,
        max as u8,
    ]
}

/// Binary mask of pixels falling inside any of the given ranges
pub fn hsv_mask(img: &RgbImage, ranges: &[HsvRange]) -> GrayImage {
    let (width, height) = img.dimensions();
    let mut mask = GrayImage::new(width, height);

    for (x, y, pixel) in img.enumerate_pixels() {
        let hsv = rgb_to_hsv(*pixel);
        if ranges.iter().any(|range| range.contains(hsv)) {
            mask.put_pixel(x, y, Luma([255u8]));
        }
    }

    mask
}

/// Opening then closing with a 3x3 square to remove speckles and fill pinholes
pub fn denoise_mask(mask: &GrayImage) -> GrayImage {
    let opened = open(mask, Norm::LInf, 1);
    close(&opened, Norm::LInf, 1)
}
