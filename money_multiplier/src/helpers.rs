//! Helper functions for the money multiplier simulation

/// Round an amount to the nearest cent (two decimal places).
///
/// Halves round away from zero, matching how currency amounts are usually
/// presented. All amounts in this crate are non-negative, so this behaves
/// like round-half-up.
///
/// # Examples
///
/// ```
/// use money_multiplier::helpers::round_to_cent;
///
/// assert_eq!(round_to_cent(0.005), 0.01);
/// assert_eq!(round_to_cent(0.004), 0.0);
/// assert_eq!(round_to_cent(899.999), 900.0);
/// ```
pub fn round_to_cent(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Display label for the bank receiving the deposit of the given cycle.
///
/// Cycles 1-26 map to "Bank A" through "Bank Z"; beyond that the letter
/// wraps and gains a numeric suffix ("Bank A1", "Bank B1", ...).
pub fn bank_label(cycle_number: usize) -> String {
    let index = cycle_number.saturating_sub(1);
    let letter = (b'A' + (index % 26) as u8) as char;
    if index < 26 {
        format!("Bank {}", letter)
    } else {
        format!("Bank {}{}", letter, index / 26)
    }
}
