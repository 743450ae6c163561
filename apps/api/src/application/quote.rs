//! Weekly hours → display amount shown on the applicant's contact record.

/// Offered hours per week, in display order.
pub const HOURS_OPTIONS: &[u32] = &[10, 20, 30, 40, 50];

/// Amount in whole pounds for each offered hours value.
const AMOUNT_TABLE: &[(u32, u32)] = &[(10, 165), (20, 330), (30, 495), (40, 660), (50, 825)];

/// Returns the display amount (e.g. `"£330"`) for an hours value.
/// Anything outside the offered set yields an empty string.
pub fn amount_for_hours(hours: &str) -> String {
    let Ok(hours) = hours.trim().parse::<u32>() else {
        return String::new();
    };

    AMOUNT_TABLE
        .iter()
        .find(|(h, _)| *h == hours)
        .map(|(_, pounds)| format!("£{pounds}"))
        .unwrap_or_default()
}
