//! Size formatting helpers for the `pardu` output layer.

use humansize::{DECIMAL, FormatSizeOptions, format_size};

/// Decimal units with three fixed decimals, e.g. `1.500 kB`.
fn human_options() -> FormatSizeOptions {
    FormatSizeOptions::from(DECIMAL)
        .decimal_places(3)
        .decimal_zeroes(3)
}

/// Renders a byte count for human eyes.
///
/// The unit is picked by `floor(log10(size) / log10(1000))`:
/// - below 1000 the plain integer is printed with no unit (`0` stays `0`);
/// - otherwise the scaled value gets three decimals and a base-1000 unit
///   (`kB`, `MB`, `GB`, `TB`, `PB`, `EB`).
pub fn human_size(size: u64) -> String {
    if size < 1000 {
        size.to_string()
    } else {
        format_size(size, human_options())
    }
}

/// Renders a size either raw or through [`human_size`].
pub fn display_size(size: u64, human_readable: bool) -> String {
    if human_readable {
        human_size(size)
    } else {
        size.to_string()
    }
}
