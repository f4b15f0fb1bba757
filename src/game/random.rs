use rand::Rng;

/// A supplier of uniformly distributed integers, used for fruit placement
pub(crate) trait RandomSource {
    /// Return an integer in `min..=max`
    fn between(&mut self, min: i16, max: i16) -> i16;
}

impl<R: Rng> RandomSource for R {
    fn between(&mut self, min: i16, max: i16) -> i16 {
        self.random_range(min..=max)
    }
}
