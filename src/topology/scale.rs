use super::Resolution;

/// Computes the uniform factor which shrinks `current` to fit into `base`.
///
/// Returns `None` if `current` doesn't exceed `base` in any dimension. A
/// returned factor is always below `1.0`.
///
/// # Example
/// ```
/// use monman::topology::{scale_factor, Resolution};
///
/// let factor = scale_factor(Resolution::new(1920, 1080), Resolution::new(3840, 2160));
/// assert_eq!(factor, Some(0.5));
/// ```
pub fn scale_factor(base: Resolution, current: Resolution) -> Option<f64> {
    if !current.exceeds(&base) {
        return None;
    }

    let scale_x = f64::from(base.width) / f64::from(current.width);
    let scale_y = f64::from(base.height) / f64::from(current.height);

    Some(scale_x.min(scale_y))
}
