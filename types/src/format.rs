//! Death-toll formatting. All display goes through millions; the underlying
//! counts stay exact.

const MILLION: f64 = 1_000_000.0;

pub fn millions(deaths: u64) -> f64 {
    deaths as f64 / MILLION
}

/// `value` with `decimals` places, ties rounded away from zero: 0.25 shows as
/// "0.3" at one decimal.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    format!("{:.*}", decimals, (value * scale).round() / scale)
}

/// Fixed-point millions with `decimals` places, e.g. `format_millions(7_000_000, 1) == "7.0"`.
pub fn format_millions(deaths: u64, decimals: usize) -> String {
    format_fixed(millions(deaths), decimals)
}

/// Whole millions rounded half away from zero, with an `M` suffix.
pub fn format_total_millions(deaths: u64) -> String {
    format!("{}M", millions(deaths).round() as u64)
}

/// "~7.0M жертв", as shown on a card.
pub fn card_deaths_label(deaths: u64) -> String {
    format!("~{}M жертв", format_millions(deaths, 1))
}

/// "~7.0 миллионов жертв", as shown in the detail panel.
pub fn detail_deaths_label(deaths: u64) -> String {
    format!("~{} миллионов жертв", format_millions(deaths, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millions() {
        assert_eq!(millions(0), 0.0);
        assert_eq!(millions(75_000_000), 75.0);
        assert_eq!(millions(284_000), 0.284);
    }

    #[test]
    fn test_format_millions_decimals() {
        assert_eq!(format_millions(7_000_000, 1), "7.0");
        assert_eq!(format_millions(1_100_000, 1), "1.1");
        assert_eq!(format_millions(11_000, 1), "0.0");
        assert_eq!(format_millions(284_000, 2), "0.28");
    }

    #[test]
    fn test_format_millions_ties_round_up() {
        assert_eq!(format_millions(250_000, 1), "0.3");
        assert_eq!(format_millions(1_250_000, 1), "1.3");
        assert_eq!(format_millions(50_000, 1), "0.1");
        assert_eq!(format_fixed(2.5, 0), "3");
        assert_eq!(card_deaths_label(250_000), "~0.3M жертв");
        assert_eq!(detail_deaths_label(1_250_000), "~1.3 миллионов жертв");
    }

    #[test]
    fn test_total_rounds_to_nearest() {
        assert_eq!(format_total_millions(249_000_000), "249M");
        assert_eq!(format_total_millions(270_695_774), "271M");
        assert_eq!(format_total_millions(2_500_000), "3M");
        assert_eq!(format_total_millions(0), "0M");
    }

    #[test]
    fn test_labels() {
        assert_eq!(card_deaths_label(75_000_000), "~75.0M жертв");
        assert_eq!(detail_deaths_label(100_000), "~0.1 миллионов жертв");
    }
}
