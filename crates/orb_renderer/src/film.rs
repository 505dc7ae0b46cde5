//! Progressive accumulation buffer and display conversion.
//!
//! The film keeps one running radiance sum per pixel. Resolving divides by
//! the sample count, applies the ACES filmic curve, gamma encodes, and
//! packs each pixel as `0xAARRGGBB`.

use orb_math::Color;
use rayon::prelude::*;

// ACES filmic approximation constants
const ACES_A: f32 = 2.51;
const ACES_B: f32 = 0.03;
const ACES_C: f32 = 2.43;
const ACES_D: f32 = 0.59;
const ACES_E: f32 = 0.14;

const DISPLAY_GAMMA: f32 = 2.2;

/// The curve is flat well before this; clamping keeps the rational finite.
const ACES_INPUT_MAX: f32 = 65504.0;

/// ACES filmic tonemap, saturated to [0, 1] per channel.
#[inline]
pub fn aces_tonemap(x: Color) -> Color {
    let x = Color::select(x.is_nan_mask(), Color::ZERO, x);
    let x = x.clamp(Color::ZERO, Color::splat(ACES_INPUT_MAX));
    let mapped = (x * (ACES_A * x + ACES_B)) / (x * (ACES_C * x + ACES_D) + ACES_E);
    mapped.clamp(Color::ZERO, Color::ONE)
}

#[inline]
pub fn gamma_encode(linear: Color) -> Color {
    linear.max(Color::ZERO).powf(1.0 / DISPLAY_GAMMA)
}

/// Pack a display color in [0, 1] as opaque `0xAARRGGBB`.
#[inline]
pub fn pack_argb(color: Color) -> u32 {
    let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0 + 0.5) as u32;
    0xFF00_0000 | (to_byte(color.x) << 16) | (to_byte(color.y) << 8) | to_byte(color.z)
}

/// Split a packed pixel into `[r, g, b, a]` bytes.
#[inline]
pub fn unpack_rgba(argb: u32) -> [u8; 4] {
    let [b, g, r, a] = argb.to_le_bytes();
    [r, g, b, a]
}

/// Full display transform for an averaged radiance value.
#[inline]
pub fn to_display(radiance: Color) -> u32 {
    pack_argb(gamma_encode(aces_tonemap(radiance)))
}

/// Running per-pixel radiance sums plus the resolved display buffer.
#[derive(Debug, Clone)]
pub struct Film {
    width: u32,
    height: u32,
    sum: Vec<Color>,
    pixels: Vec<u32>,
    sample_count: u64,
}

impl Film {
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            sum: vec![Color::ZERO; len],
            pixels: vec![0xFF00_0000; len],
            sample_count: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of completed accumulation passes.
    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    /// Add one sample to every pixel.
    ///
    /// `sample` receives the pixel index in row-major order, row 0 at the top.
    pub fn accumulate<F>(&mut self, sample: F)
    where
        F: Fn(usize) -> Color + Sync,
    {
        self.sum
            .par_iter_mut()
            .enumerate()
            .for_each(|(index, sum)| *sum += sample(index));
        self.sample_count += 1;
    }

    /// Mean radiance of a pixel so far.
    pub fn average(&self, index: usize) -> Color {
        if self.sample_count == 0 {
            return Color::ZERO;
        }
        self.sum[index] / self.sample_count as f32
    }

    /// Tonemap the current averages into the display buffer.
    pub fn resolve(&mut self) -> &[u32] {
        if self.sample_count > 0 {
            let scale = 1.0 / self.sample_count as f32;
            self.pixels
                .par_iter_mut()
                .zip(self.sum.par_iter())
                .for_each(|(pixel, sum)| *pixel = to_display(*sum * scale));
        }
        &self.pixels
    }

    /// Last resolved display buffer.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Display buffer as bytes: BGRA order on little-endian targets.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Display buffer as tightly packed RGBA8, row 0 at the top.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|&p| unpack_rgba(p)).collect()
    }

    /// Drop every accumulated sample.
    pub fn clear(&mut self) {
        self.sum.fill(Color::ZERO);
        self.pixels.fill(0xFF00_0000);
        self.sample_count = 0;
    }
}
