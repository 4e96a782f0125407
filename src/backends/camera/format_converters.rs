// SPDX-License-Identifier: GPL-3.0-only
//! Pixel format conversion helpers
//!
//! Decoding turns device encodings into packed 24-bit frames; the preview
//! then widens them to RGBA for the display surface, and snapshots narrow
//! RGBA back to packed RGB for the PNG encoder.

use super::types::ChannelOrder;

/// Convert YUYV (YUV 4:2:2) to packed RGB
///
/// YUYV format: Y0 U0 Y1 V0 - each 4-byte group encodes 2 pixels.
/// Uses BT.601 coefficients for YUV to RGB conversion.
pub fn yuyv_to_rgb(data: &[u8], width: u32, height: u32) -> Vec<u8> {
    let pixel_count = width as usize * height as usize;
    let mut rgb = Vec::with_capacity(pixel_count * 3);

    'chunks: for chunk in data.chunks_exact(4) {
        let y0 = chunk[0] as f32;
        let u = chunk[1] as f32 - 128.0;
        let y1 = chunk[2] as f32;
        let v = chunk[3] as f32 - 128.0;

        for y in [y0, y1] {
            if rgb.len() >= pixel_count * 3 {
                break 'chunks;
            }

            rgb.push((y + 1.402 * v).clamp(0.0, 255.0) as u8);
            rgb.push((y - 0.344 * u - 0.714 * v).clamp(0.0, 255.0) as u8);
            rgb.push((y + 1.772 * u).clamp(0.0, 255.0) as u8);
        }
    }

    rgb
}

/// Widen packed 24-bit pixels in `order` to opaque RGBA, writing into `rgba`
///
/// `rgba` is resized to fit; its previous allocation is reused.
pub fn packed_to_rgba_into(data: &[u8], order: ChannelOrder, rgba: &mut Vec<u8>) {
    rgba.clear();
    rgba.reserve(data.len() / 3 * 4);

    for px in data.chunks_exact(3) {
        let (r, g, b) = match order {
            ChannelOrder::Rgb => (px[0], px[1], px[2]),
            ChannelOrder::Bgr => (px[2], px[1], px[0]),
        };
        rgba.extend_from_slice(&[r, g, b, 255]);
    }
}

/// Narrow RGBA to packed RGB, dropping alpha
pub fn rgba_to_rgb(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
    }
    rgb
}
