// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Contrast-limited adaptive histogram equalization (CLAHE).

use image::{GrayImage, Luma};

/// Equalize `gray` per tile on a `tiles x tiles` grid, clipping each tile
/// histogram at `clip_limit` times the mean bin count and bilinearly
/// blending neighbouring tile mappings.
///
/// Images too small to tile are returned unchanged.
pub fn clahe(gray: &GrayImage, tiles: u32, clip_limit: f32) -> GrayImage {
    let (w, h) = gray.dimensions();
    if tiles == 0 || w < tiles || h < tiles {
        return gray.clone();
    }
    let tile_w = w / tiles;
    let tile_h = h / tiles;
    let tiles = tiles as usize;

    let mut maps = vec![[0u8; 256]; tiles * tiles];
    for ty in 0..tiles {
        for tx in 0..tiles {
            let x0 = tx as u32 * tile_w;
            let y0 = ty as u32 * tile_h;
            let x1 = if tx == tiles - 1 { w } else { x0 + tile_w };
            let y1 = if ty == tiles - 1 { h } else { y0 + tile_h };
            maps[ty * tiles + tx] = tile_mapping(gray, (x0, y0, x1, y1), clip_limit);
        }
    }

    let (tw, th) = (tile_w as f32, tile_h as f32);
    let last = tiles as i64 - 1;
    let mut out = GrayImage::new(w, h);
    for (x, y, pixel) in gray.enumerate_pixels() {
        let v = pixel.0[0] as usize;

        let fx = (x as f32 + 0.5) / tw - 0.5;
        let fy = (y as f32 + 0.5) / th - 0.5;
        let tx0 = (fx.floor() as i64).clamp(0, last) as usize;
        let tx1 = (fx.floor() as i64 + 1).clamp(0, last) as usize;
        let ty0 = (fy.floor() as i64).clamp(0, last) as usize;
        let ty1 = (fy.floor() as i64 + 1).clamp(0, last) as usize;
        let ax = fx - fx.floor();
        let ay = fy - fy.floor();

        let v00 = maps[ty0 * tiles + tx0][v] as f32;
        let v10 = maps[ty0 * tiles + tx1][v] as f32;
        let v01 = maps[ty1 * tiles + tx0][v] as f32;
        let v11 = maps[ty1 * tiles + tx1][v] as f32;

        let top = v00 * (1.0 - ax) + v10 * ax;
        let bottom = v01 * (1.0 - ax) + v11 * ax;
        let blended = top * (1.0 - ay) + bottom * ay;
        out.put_pixel(x, y, Luma([blended.round().clamp(0.0, 255.0) as u8]));
    }
    out
}

/// Clipped-histogram CDF lookup table for one tile `(x0, y0, x1, y1)`.
fn tile_mapping(gray: &GrayImage, (x0, y0, x1, y1): (u32, u32, u32, u32), clip_limit: f32) -> [u8; 256] {
    let mut hist = [0u32; 256];
    for y in y0..y1 {
        for x in x0..x1 {
            hist[gray.get_pixel(x, y).0[0] as usize] += 1;
        }
    }
    let tile_pixels = (x1 - x0) * (y1 - y0);

    // Clip and spread the excess evenly.
    let clip = ((clip_limit * tile_pixels as f32 / 256.0) as u32).max(1);
    let mut excess = 0u32;
    for bin in hist.iter_mut() {
        if *bin > clip {
            excess += *bin - clip;
            *bin = clip;
        }
    }
    let per_bin = excess / 256;
    let remainder = (excess % 256) as usize;
    for (i, bin) in hist.iter_mut().enumerate() {
        *bin += per_bin + u32::from(i < remainder);
    }

    let mut lut = [0u8; 256];
    let mut cdf = 0u32;
    let total = tile_pixels.max(1) as f32;
    for (i, &count) in hist.iter().enumerate() {
        cdf += count;
        lut[i] = (cdf as f32 * 255.0 / total).round().min(255.0) as u8;
    }
    lut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_dimensions() {
        let gray = GrayImage::from_fn(97, 53, |x, y| Luma([((x * 3 + y) % 256) as u8]));
        assert_eq!(clahe(&gray, 8, 3.0).dimensions(), (97, 53));
    }

    #[test]
    fn stretches_low_contrast_ramp() {
        let gray = GrayImage::from_fn(64, 64, |x, _| Luma([100 + (x % 8) as u8]));
        let out = clahe(&gray, 8, 3.0);

        let spread_in = 107 - 100;
        let min = out.pixels().map(|p| p.0[0]).min().unwrap_or(0);
        let max = out.pixels().map(|p| p.0[0]).max().unwrap_or(0);
        assert!(max - min > spread_in, "output spread {}", max - min);
    }

    #[test]
    fn tiny_images_pass_through() {
        let gray = GrayImage::from_pixel(4, 4, Luma([42]));
        assert_eq!(clahe(&gray, 8, 3.0), gray);
    }
}
