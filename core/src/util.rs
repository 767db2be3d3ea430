pub trait OptionPathExt {
    fn as_opt_path(&self) -> Option<&camino::Utf8Path>;
}

impl OptionPathExt for Option<camino::Utf8PathBuf> {
    fn as_opt_path(&self) -> Option<&camino::Utf8Path> {
        self.as_ref().map(|p| p.as_path())
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Two decimal places with trailing zeros removed: `24.0 -> "24"`, `23.976 -> "23.98"`.
pub fn trim_decimal(value: f64) -> String {
    let s = format!("{:.2}", value);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn trim_decimal_drops_trailing_zeros() {
        assert_eq!(trim_decimal(24.0), "24");
        assert_eq!(trim_decimal(23.976), "23.98");
        assert_eq!(trim_decimal(1.5), "1.5");
        assert_eq!(trim_decimal(150.0), "150");
        assert_eq!(trim_decimal(0.0), "0");
    }

    #[test]
    fn round2_rounds_half_away_from_zero() {
        assert_eq!(round2(23.976023976), 23.98);
        assert_eq!(round2(6.006), 6.01);
        assert_eq!(round2(24.0), 24.0);
    }
}
