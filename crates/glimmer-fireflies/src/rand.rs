//! Lightweight xorshift32 PRNG, deterministic per seed

pub struct GlowRng {
    state: u32,
}

impl GlowRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        // 24 high bits fit the f32 mantissa exactly, so 1.0 is never produced
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Returns a float in [min, max), or `min` when the range is empty
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Uniform index in [0, len). `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        ((self.next_f32() * len as f32) as usize).min(len - 1)
    }

    /// Uniform point in a disc of `radius` around the origin, as (x, z)
    pub fn point_in_disc(&mut self, radius: f32) -> (f32, f32) {
        let angle = self.range(0.0, std::f32::consts::TAU);
        // sqrt keeps the area density uniform instead of clumping at the center
        let r = radius * self.next_f32().sqrt();
        (r * angle.cos(), r * angle.sin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_range_bounds() {
        let mut rng = GlowRng::new(42);
        for _ in 0..1000 {
            let v = rng.range(0.0, 10.0);
            assert!((0.0..10.0).contains(&v));
        }
    }

    #[test]
    fn rng_is_deterministic_per_seed() {
        let mut a = GlowRng::new(7);
        let mut b = GlowRng::new(7);
        for _ in 0..50 {
            assert_eq!(a.next_f32().to_bits(), b.next_f32().to_bits());
        }
    }

    #[test]
    fn index_stays_in_bounds() {
        let mut rng = GlowRng::new(3);
        let mut seen = [false; 5];
        for _ in 0..500 {
            let i = rng.index(5);
            seen[i] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn disc_points_stay_inside_radius() {
        let mut rng = GlowRng::new(123);
        for _ in 0..500 {
            let (x, z) = rng.point_in_disc(30.0);
            assert!((x * x + z * z).sqrt() <= 30.0 + 1e-3);
        }
    }

    #[test]
    fn zero_seed_does_not_stick() {
        let mut rng = GlowRng::new(0);
        let first = rng.next_f32();
        let second = rng.next_f32();
        assert_ne!(first, second);
    }
}
