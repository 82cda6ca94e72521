//! Pure calculation functions for resize decisions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::{Dimensions, Interpolation};

/// Pick the resampling method for scaling `source` to `target`.
///
/// Area averaging only when the image shrinks on **both** axes; anything
/// else (enlarging, same size, or shrinking one axis while growing the
/// other) uses linear interpolation.
///
/// # Examples
/// ```
/// # use imgconv::imaging::{Dimensions, Interpolation, choose_interpolation};
/// let src = Dimensions { width: 800, height: 600 };
/// assert_eq!(
///     choose_interpolation(src, Dimensions { width: 400, height: 300 }),
///     Interpolation::Area
/// );
/// assert_eq!(
///     choose_interpolation(src, Dimensions { width: 400, height: 900 }),
///     Interpolation::Linear
/// );
/// ```
pub fn choose_interpolation(source: Dimensions, target: Dimensions) -> Interpolation {
    if target.width < source.width && target.height < source.height {
        Interpolation::Area
    } else {
        Interpolation::Linear
    }
}
