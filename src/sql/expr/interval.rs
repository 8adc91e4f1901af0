//! INTERVAL literals.

use once_cell::sync::Lazy;
use regex::Regex;

/// Strips zero components from the front and back of `Y-M-D H:M:S.f`.
static TRIM_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(^0+\.)|(\.0+$)|(^[0\-.: ]+[\-: ])|([\-:. ][0\-.: ]+$)").unwrap()
});

const LABELS: [&str; 7] = [
    "YEAR",
    "MONTH",
    "DAY",
    "HOUR",
    "MINUTE",
    "SECOND",
    "MICROSECOND",
];

/// Calendar components of an interval. Unset fields are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntervalParts {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub microseconds: i64,
    pub quarters: i64,
    pub weeks: i64,
}

#[derive(Debug, Clone)]
enum Shape {
    Quarters(i64),
    Weeks(i64),
    /// Absolute values in `LABELS` order.
    Units {
        values: [u64; 7],
        largest: Option<usize>,
        smallest: Option<usize>,
        negative: bool,
    },
}

/// An INTERVAL literal such as `INTERVAL '1-1 YEAR_MONTH'`.
///
/// Quarters and weeks take precedence over every other component and render
/// on their own. Otherwise the unit label spans the largest to the smallest
/// populated component, and the sign of the largest one applies to the whole
/// expression.
#[derive(Debug, Clone)]
pub struct Interval {
    shape: Shape,
}

impl Interval {
    pub fn new(parts: IntervalParts) -> Self {
        if parts.quarters != 0 {
            return Self {
                shape: Shape::Quarters(parts.quarters),
            };
        }
        if parts.weeks != 0 {
            return Self {
                shape: Shape::Weeks(parts.weeks),
            };
        }

        let raw = [
            parts.years,
            parts.months,
            parts.days,
            parts.hours,
            parts.minutes,
            parts.seconds,
            parts.microseconds,
        ];
        let mut values = [0; 7];
        let mut largest = None;
        let mut smallest = None;
        let mut negative = false;
        for (i, value) in raw.iter().enumerate() {
            if *value == 0 {
                continue;
            }
            values[i] = value.unsigned_abs();
            if largest.is_none() {
                largest = Some(i);
                negative = *value < 0;
            }
            smallest = Some(i);
        }

        Self {
            shape: Shape::Units {
                values,
                largest,
                smallest,
                negative,
            },
        }
    }

    pub fn years(n: i64) -> Self {
        Self::new(IntervalParts {
            years: n,
            ..Default::default()
        })
    }

    pub fn months(n: i64) -> Self {
        Self::new(IntervalParts {
            months: n,
            ..Default::default()
        })
    }

    pub fn days(n: i64) -> Self {
        Self::new(IntervalParts {
            days: n,
            ..Default::default()
        })
    }

    pub fn hours(n: i64) -> Self {
        Self::new(IntervalParts {
            hours: n,
            ..Default::default()
        })
    }

    pub fn minutes(n: i64) -> Self {
        Self::new(IntervalParts {
            minutes: n,
            ..Default::default()
        })
    }

    pub fn seconds(n: i64) -> Self {
        Self::new(IntervalParts {
            seconds: n,
            ..Default::default()
        })
    }

    pub fn quarters(n: i64) -> Self {
        Self::new(IntervalParts {
            quarters: n,
            ..Default::default()
        })
    }

    pub fn weeks(n: i64) -> Self {
        Self::new(IntervalParts {
            weeks: n,
            ..Default::default()
        })
    }

    /// The expression and unit label handed to the dialect template.
    pub(crate) fn expr_and_unit(&self) -> (String, String) {
        match &self.shape {
            Shape::Quarters(n) => (n.to_string(), "QUARTER".into()),
            Shape::Weeks(n) => (n.to_string(), "WEEK".into()),
            Shape::Units {
                values,
                largest,
                smallest,
                negative,
            } => {
                let sign = if *negative { "-" } else { "" };
                if *largest == Some(6) {
                    return (format!("{sign}{}", values[6]), "MICROSECOND".into());
                }

                let [years, months, days, hours, minutes, seconds, micros] = values;
                let full = format!("{years}-{months}-{days} {hours}:{minutes}:{seconds}.{micros}");
                let expr = format!("{sign}{}", TRIM_PATTERN.replace_all(&full, ""));

                let unit = match (largest, smallest) {
                    (Some(l), Some(s)) if l != s => format!("{}_{}", LABELS[*l], LABELS[*s]),
                    (Some(l), _) => LABELS[*l].to_string(),
                    (None, _) => "DAY".to_string(),
                };
                (expr, unit)
            }
        }
    }
}
