use nalgebra as na;
use num_traits::{Float, FromPrimitive};

/// `current * (1 - factor) + next * factor`
#[inline(always)]
pub fn lerp<F: Float>(current: F, next: F, factor: F) -> F {
    current * (F::one() - factor) + next * factor
}

/// Arithmetic mean, `None` for an empty sequence.
pub fn mean<F, I>(values: I) -> Option<F>
where
    F: Float + FromPrimitive,
    I: IntoIterator<Item = F>,
{
    let (sum, n) = values
        .into_iter()
        .fold((F::zero(), 0usize), |(sum, n), v| (sum + v, n + 1));

    if n == 0 {
        None
    } else {
        Some(sum / F::from_usize(n)?)
    }
}

#[inline]
pub fn to_f32(p: &na::Point2<i32>) -> na::Point2<f32> {
    na::Point2::new(p.x as f32, p.y as f32)
}

/// Truncates toward zero, the way pixel coordinates are reported.
#[inline]
pub fn to_pixel(p: &na::Point2<f32>) -> na::Point2<i32> {
    na::Point2::new(p.x as i32, p.y as i32)
}

#[inline]
pub fn pixel_distance(a: &na::Point2<i32>, b: &na::Point2<f32>) -> f32 {
    na::distance(&to_f32(a), b)
}
