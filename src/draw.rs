use rand::distributions::uniform::SampleUniform;
use rand::Rng;

/// Uniform draw from `[min, max)`. An empty or inverted range collapses to `min`.
pub fn draw_below<T, R>(rng: &mut R, min: T, max: T) -> T
where
    T: SampleUniform + PartialOrd + Copy,
    R: Rng + ?Sized,
{
    if max <= min { min } else { rng.gen_range(min..max) }
}
