//! Continuous scales mapping data domains onto plot coordinates.
//!
//! These mirror the usual plotting-library contract: `scale` maps a domain
//! value to the range by linear interpolation and `invert` maps back. A
//! degenerate domain (zero span) maps every value to the start of the
//! range and inverts to the start of the domain.

use time::OffsetDateTime;

/// Linear interpolation between a numeric domain and range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        LinearScale { domain, range }
    }

    pub fn scale(&self, value: f64) -> f64 {
        let span = self.domain.1 - self.domain.0;
        if span == 0.0 {
            return self.range.0;
        }
        let t = (value - self.domain.0) / span;
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    pub fn invert(&self, pos: f64) -> f64 {
        let span = self.range.1 - self.range.0;
        if span == 0.0 {
            return self.domain.0;
        }
        let t = (pos - self.range.0) / span;
        self.domain.0 + t * (self.domain.1 - self.domain.0)
    }
}

/// Linear scale over timestamps, interpolating on the unix-second axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    pub domain: (OffsetDateTime, OffsetDateTime),
    pub range: (f64, f64),
}

impl TimeScale {
    pub fn new(domain: (OffsetDateTime, OffsetDateTime), range: (f64, f64)) -> Self {
        TimeScale { domain, range }
    }

    fn inner(&self) -> LinearScale {
        LinearScale::new(
            (
                self.domain.0.unix_timestamp() as f64,
                self.domain.1.unix_timestamp() as f64,
            ),
            self.range,
        )
    }

    pub fn scale(&self, value: OffsetDateTime) -> f64 {
        self.inner().scale(value.unix_timestamp() as f64)
    }

    pub fn invert(&self, pos: f64) -> OffsetDateTime {
        let secs = self.inner().invert(pos).round() as i64;
        OffsetDateTime::from_unix_timestamp(secs).unwrap_or(self.domain.0)
    }
}

/// Square-root scale, the usual choice for mapping a magnitude onto a
/// circle radius so that area tracks the value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl SqrtScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        SqrtScale { domain, range }
    }

    fn inner(&self) -> LinearScale {
        LinearScale::new((self.domain.0.sqrt(), self.domain.1.sqrt()), self.range)
    }

    pub fn scale(&self, value: f64) -> f64 {
        self.inner().scale(value.max(0.0).sqrt())
    }

    pub fn invert(&self, pos: f64) -> f64 {
        let root = self.inner().invert(pos);
        root * root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::format_description::well_known::Rfc3339;

    fn ts(s: &str) -> OffsetDateTime {
        OffsetDateTime::parse(s, &Rfc3339).unwrap()
    }

    #[test]
    fn test_linear_scale_and_invert() {
        let s = LinearScale::new((0.0, 24.0), (0.0, 600.0));
        assert_eq!(s.scale(0.0), 0.0);
        assert_eq!(s.scale(12.0), 300.0);
        assert_eq!(s.scale(24.0), 600.0);
        assert_eq!(s.invert(300.0), 12.0);
    }

    #[test]
    fn test_linear_scale_inverted_range() {
        // Plot y axes run top-down
        let s = LinearScale::new((0.0, 24.0), (600.0, 0.0));
        assert_eq!(s.scale(0.0), 600.0);
        assert_eq!(s.scale(24.0), 0.0);
        assert_eq!(s.invert(0.0), 24.0);
    }

    #[test]
    fn test_linear_scale_degenerate_domain() {
        let s = LinearScale::new((5.0, 5.0), (0.0, 100.0));
        assert_eq!(s.scale(5.0), 0.0);
        assert_eq!(s.scale(99.0), 0.0);
        assert_eq!(s.invert(40.0), 5.0);
    }

    #[test]
    fn test_time_scale_roundtrip() {
        let a = ts("2024-01-01T00:00:00+00:00");
        let b = ts("2024-01-03T00:00:00+00:00");
        let s = TimeScale::new((a, b), (0.0, 100.0));

        assert_eq!(s.scale(a), 0.0);
        assert_eq!(s.scale(b), 100.0);
        assert_eq!(s.scale(ts("2024-01-02T00:00:00+00:00")), 50.0);

        assert_eq!(s.invert(0.0), a);
        assert_eq!(s.invert(100.0), b);
        assert_eq!(s.invert(50.0).unix_timestamp(), ts("2024-01-02T00:00:00+00:00").unix_timestamp());
    }

    #[test]
    fn test_time_scale_degenerate_domain() {
        let a = ts("2024-01-01T00:00:00+00:00");
        let s = TimeScale::new((a, a), (0.0, 100.0));
        assert_eq!(s.scale(a), 0.0);
        assert_eq!(s.invert(70.0), a);
    }

    #[test]
    fn test_sqrt_scale() {
        let s = SqrtScale::new((0.0, 100.0), (0.0, 30.0));
        assert_eq!(s.scale(0.0), 0.0);
        assert_eq!(s.scale(100.0), 30.0);
        // Midpoint of the range corresponds to a quarter of the domain
        assert!((s.scale(25.0) - 15.0).abs() < 1e-9);
        assert!((s.invert(15.0) - 25.0).abs() < 1e-9);
    }
}
