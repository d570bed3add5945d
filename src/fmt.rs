/// Format a summed amount with exactly two decimals, halves rounding away
/// from zero: 59.50
pub fn sum(val: f64) -> String {
    let rounded = (val * 100.0).round() / 100.0;
    let formatted = format!("{rounded:.2}");
    if formatted == "-0.00" {
        "0.00".to_string()
    } else {
        formatted
    }
}

/// Format a (possibly fractional) transaction count with one decimal,
/// keeping the trailing zero: 3.0
pub fn count(val: f64) -> String {
    let rounded = (val * 10.0).round() / 10.0;
    let formatted = format!("{rounded:.1}");
    if formatted == "-0.0" {
        "0.0".to_string()
    } else {
        formatted
    }
}
