//! Month-name lookup.

/// Recognized month names, index + 1 is the month number.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Returns the month number (1-12) for a full English month name.
///
/// Matching is exact: "february" and "Feb" are not recognized.
#[must_use]
pub fn month_number(name: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|&month| month == name)
        .and_then(|idx| u32::try_from(idx + 1).ok())
}
