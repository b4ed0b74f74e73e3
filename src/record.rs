//! Representation of the rows of the OECD gender wage gap dataset.

use std::fmt::Display;

use kstring::KString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Country code as found in the `COU` column, e.g. "DNK" (at most 4
/// characters in the data, but not enforced here).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CountryCode(pub KString);

impl CountryCode {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for CountryCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<&str> for CountryCode {
    fn from(value: &str) -> Self {
        Self(KString::from_ref(value))
    }
}

/// The exact label strings used in the `Indicator` column for the two
/// deciles the evaluation is about.
pub const FIRST_DECILE_LABEL: &str = "Gender wage gap at 1st decile (bottom)";
pub const NINTH_DECILE_LABEL: &str = "Gender wage gap at 9th decile (top)";

/// The two indicators the evaluation cares about; any other label is
/// carried along untouched (and then ignored by the aggregation).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Indicator {
    FirstDecileGap,
    NinthDecileGap,
    Other(KString),
}

impl Indicator {
    pub fn from_label(label: &str) -> Self {
        match label {
            FIRST_DECILE_LABEL => Indicator::FirstDecileGap,
            NINTH_DECILE_LABEL => Indicator::NinthDecileGap,
            _ => Indicator::Other(KString::from_ref(label)),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Indicator::FirstDecileGap => FIRST_DECILE_LABEL,
            Indicator::NinthDecileGap => NINTH_DECILE_LABEL,
            Indicator::Other(label) => label.as_str(),
        }
    }
}

/// The two income deciles reported on. "1st (bottom)" and "9th (top)"
/// are the low- and high-income reference points of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decile {
    First,
    Ninth,
}

impl Decile {
    pub const ALL: [Decile; 2] = [Decile::First, Decile::Ninth];

    pub fn indicator(self) -> Indicator {
        match self {
            Decile::First => Indicator::FirstDecileGap,
            Decile::Ninth => Indicator::NinthDecileGap,
        }
    }

    /// Column title in the joined per-country table.
    pub fn column_label(self) -> &'static str {
        match self {
            Decile::First => "First Decile",
            Decile::Ninth => "Ninth Decile",
        }
    }
}

impl Display for Decile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Decile::First => "1st decile (bottom)",
            Decile::Ninth => "9th decile (top)",
        })
    }
}

/// One validated row of the dataset. All fields are non-empty;
/// `value` is a percentage (the percent to which the median male
/// income is greater than the median female income) and can be
/// negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WageGapRecord {
    pub country_code: CountryCode,
    pub country_name: KString,
    pub indicator_code: KString,
    pub indicator: Indicator,
    pub sex: KString,
    pub age_code: KString,
    pub age_group: KString,
    pub year: i32,
    pub unit_code: KString,
    pub unit_label: KString,
    pub value: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_indicator_labels() {
        assert_eq!(
            Indicator::from_label(FIRST_DECILE_LABEL),
            Indicator::FirstDecileGap
        );
        assert_eq!(
            Indicator::from_label(NINTH_DECILE_LABEL),
            Indicator::NinthDecileGap
        );
        let other = Indicator::from_label("Gender wage gap at median");
        assert_eq!(
            other,
            Indicator::Other("Gender wage gap at median".into())
        );
        assert_eq!(other.label(), "Gender wage gap at median");
        assert_eq!(Decile::First.indicator().label(), FIRST_DECILE_LABEL);
    }
}
