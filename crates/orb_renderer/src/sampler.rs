//! Quasi-random sampling built on Halton sequences.
//!
//! Every function here is a pure function of its index and bases, so
//! threads can draw samples concurrently as long as they use distinct
//! indices. Callers that need a stream of fresh indices hold a
//! [`SampleCounter`].

use orb_math::{Vec2, Vec3};
use std::f32::consts::PI;
use std::sync::atomic::{AtomicU64, Ordering};

/// Radical inverse of `index` in `base`.
///
/// Produces a deterministic, well distributed value in [0, 1).
/// Index 0 maps to 0, and so does every index for a base below 2.
pub fn halton(mut index: u64, base: u32) -> f32 {
    if base < 2 {
        return 0.0;
    }
    let base = base as u64;
    let inv_base = 1.0 / base as f64;

    let mut result = 0.0f64;
    let mut f = 1.0f64;
    while index > 0 {
        f *= inv_base;
        result += f * (index % base) as f64;
        index /= base;
    }

    // Keep the half-open range after narrowing to f32
    (result as f32).min(1.0 - f32::EPSILON)
}

/// Two Halton dimensions drawn with the same index.
///
/// The bases should be coprime (2 and 3 are the usual pair).
#[inline]
pub fn halton_2d(index: u64, base1: u32, base2: u32) -> Vec2 {
    Vec2::new(halton(index, base1), halton(index, base2))
}

/// Point in the unit disk via polar mapping of two Halton dimensions.
///
/// Used for lens offsets and soft-shadow jitter.
pub fn halton_disk(index: u64, base1: u32, base2: u32) -> Vec2 {
    let s = halton_2d(index, base1, base2);
    let r = s.x.sqrt();
    let theta = 2.0 * PI * s.y;
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Cosine-weighted direction on the +Z hemisphere.
pub fn halton_hemisphere(index: u64, base1: u32, base2: u32) -> Vec3 {
    let s = halton_2d(index, base1, base2);
    let r = s.x.sqrt();
    let phi = 2.0 * PI * s.y;
    Vec3::new(r * phi.cos(), r * phi.sin(), (1.0 - s.x).max(0.0).sqrt())
}

/// Monotonically increasing sample index shared across threads.
///
/// Material and light instances own one of these per sampling purpose.
/// Concurrent callers never observe the same index twice.
#[derive(Debug, Default)]
pub struct SampleCounter(AtomicU64);

impl SampleCounter {
    pub fn new(start: u64) -> Self {
        Self(AtomicU64::new(start))
    }

    /// Claim the next index.
    #[inline]
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }

    /// Index the next call to [`next`](Self::next) would return.
    pub fn peek(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_halton_base2_sequence() {
        let expected = [0.5, 0.25, 0.75, 0.125, 0.625, 0.375, 0.875];
        for (i, e) in expected.iter().enumerate() {
            assert_eq!(halton(i as u64 + 1, 2), *e);
        }
    }

    #[test]
    fn test_halton_base3_sequence() {
        let expected = [1.0 / 3.0, 2.0 / 3.0, 1.0 / 9.0, 4.0 / 9.0, 7.0 / 9.0];
        for (i, e) in expected.iter().enumerate() {
            assert!((halton(i as u64 + 1, 3) - e).abs() < 1e-6);
        }
    }

    #[test]
    fn test_halton_is_deterministic_and_in_range() {
        assert_eq!(halton(0, 2), 0.0);
        for index in [1u64, 17, 1023, 99_991, u32::MAX as u64, u64::MAX] {
            for base in [2, 3, 5, 7] {
                let a = halton(index, base);
                assert_eq!(a, halton(index, base));
                assert!((0.0..1.0).contains(&a), "halton({index}, {base}) = {a}");
            }
        }
    }

    #[test]
    fn test_halton_degenerate_base_is_zero() {
        for index in [0u64, 1, 7, u64::MAX] {
            assert_eq!(halton(index, 0), 0.0);
            assert_eq!(halton(index, 1), 0.0);
        }
        assert_eq!(halton_2d(5, 1, 0), Vec2::ZERO);
    }

    #[test]
    fn test_halton_2d_is_well_spread() {
        // Every cell of a 4x4 grid receives a point within the first 16 samples
        // (offset by one to skip the origin).
        let mut cells = HashSet::new();
        for i in 1..=16 {
            let s = halton_2d(i, 2, 3);
            cells.insert(((s.x * 4.0) as u32, (s.y * 4.0) as u32));
        }
        assert!(cells.len() >= 12, "only {} cells covered", cells.len());
    }

    #[test]
    fn test_disk_samples_inside_unit_disk() {
        for i in 0..500 {
            assert!(halton_disk(i, 2, 3).length() <= 1.0 + 1e-6);
        }
    }

    #[test]
    fn test_hemisphere_samples_are_unit_and_upward() {
        let mut mean_z = 0.0;
        let n = 2000;
        for i in 0..n {
            let d = halton_hemisphere(i, 5, 7);
            assert!((d.length() - 1.0).abs() < 1e-4);
            assert!(d.z >= 0.0);
            mean_z += d.z;
        }
        // Cosine-weighted hemisphere: E[cos theta] = 2/3
        mean_z /= n as f32;
        assert!((mean_z - 2.0 / 3.0).abs() < 0.02, "mean z = {mean_z}");
    }

    #[test]
    fn test_sample_counter_concurrent_indices_are_unique() {
        let counter = Arc::new(SampleCounter::default());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let counter = Arc::clone(&counter);
                std::thread::spawn(move || (0..1000).map(|_| counter.next()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for index in handle.join().unwrap() {
                assert!(seen.insert(index), "index {index} handed out twice");
            }
        }
        assert_eq!(seen.len(), 4000);
        assert_eq!(counter.peek(), 4000);
    }
}
