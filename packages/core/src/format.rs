//! Display formatting for estimate averages.
//!
//! `format_num` produces the wire representation of an average: fixed to a
//! requested number of decimals, then stripped of trailing fractional
//! zeros, so `10.500000` goes out as `"10.5"` and `10.000000` as `"10"`.
//!
//! Rounding is done over a scaled integer rather than by string-slicing a
//! formatted float, so the trim step can never reintroduce rounding error.

/// Format `value` to at most `decimals` fractional digits, rounding half
/// away from zero and trimming trailing zeros from the fractional part.
///
/// Panics if `value` is not finite; callers only ever format averages
/// derived from finite record fields.
pub fn format_num(value: f64, decimals: u32) -> String {
    assert!(value.is_finite(), "format_num requires finite input, got {value}");

    let scale = 10u128.pow(decimals);
    // f64::round rounds half away from zero, which is the contract here.
    let scaled = (value.abs() * scale as f64).round() as u128;

    let int_part = scaled / scale;
    let frac_part = scaled % scale;

    let sign = if value < 0.0 && scaled > 0 { "-" } else { "" };

    if frac_part == 0 {
        return format!("{sign}{int_part}");
    }

    let mut frac = format!("{frac_part:0width$}", width = decimals as usize);
    while frac.ends_with('0') {
        frac.pop();
    }
    format!("{sign}{int_part}.{frac}")
}
