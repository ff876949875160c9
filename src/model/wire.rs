//! JSON number formatting shared by the request and history payloads.

use serde::Serializer;

/// Largest integer an IEEE double holds exactly (2^53 - 1).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Writes whole numbers without a fractional part (`20`, not `20.0`), the way a
/// JavaScript client would. The optimization service only accepts integers for
/// whole amounts.
pub(crate) fn whole_as_integer<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
