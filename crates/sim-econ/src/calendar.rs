//! Month/age clock.

/// Advance a 1-based calendar month by `months`, ageing one year per rollover.
pub fn advance(month: u8, age: u32, months: u32) -> (u8, u32) {
    let elapsed = u32::from(month.clamp(1, 12) - 1).saturating_add(months);
    let years = elapsed / 12;
    // elapsed % 12 < 12 fits in u8
    let month = (elapsed % 12) as u8 + 1;
    (month, age.saturating_add(years))
}
