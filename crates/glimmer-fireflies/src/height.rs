//! Terrain height lookup supplied by the owning environment

/// Ground height at a world (x, z) position.
///
/// Called once per emitter while the pool is built. `None` (or a non-finite
/// value) means the terrain has no answer there; the emitter is anchored at
/// height 0 and the miss is counted.
pub trait HeightQuery {
    fn height_at(&self, x: f32, z: f32) -> Option<f32>;
}

impl<F> HeightQuery for F
where
    F: Fn(f32, f32) -> Option<f32>,
{
    fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        self(x, z)
    }
}

/// Level ground at a constant height
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatGround(pub f32);

impl HeightQuery for FlatGround {
    fn height_at(&self, _x: f32, _z: f32) -> Option<f32> {
        Some(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_height_queries() {
        let slope = |x: f32, _z: f32| Some(x * 0.5);
        assert_eq!(slope.height_at(4.0, 0.0), Some(2.0));

        let hole = |_x: f32, _z: f32| -> Option<f32> { None };
        assert_eq!(hole.height_at(0.0, 0.0), None);
    }

    #[test]
    fn flat_ground_is_constant() {
        let ground = FlatGround(3.5);
        assert_eq!(ground.height_at(-100.0, 42.0), Some(3.5));
    }
}
