//! The loaded, validated dataset. `RecordStore::load` is the boundary
//! between "rows of strings from somewhere" (CSV file, query result)
//! and the typed records the aggregation works on; it is fail-fast,
//! the first malformed row aborts the whole load since downstream
//! statistics are unreliable with partial data.

use std::str::FromStr;

use kstring::KString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::record::{CountryCode, Indicator, WageGapRecord};

/// A row as handed over by the ingestion side, all fields still
/// strings. The serde field renames are the column headers of the
/// OECD CSV export (after the duplicate and empty columns have been
/// stripped from it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawRecord {
    #[serde(rename = "COU")]
    pub country_code: String,
    #[serde(rename = "Country")]
    pub country_name: String,
    #[serde(rename = "IND")]
    pub indicator_code: String,
    #[serde(rename = "Indicator")]
    pub indicator: String,
    #[serde(rename = "Sex")]
    pub sex: String,
    #[serde(rename = "AGE")]
    pub age_code: String,
    #[serde(rename = "Age Group")]
    pub age_group: String,
    #[serde(rename = "Time")]
    pub year: String,
    #[serde(rename = "PowerCode Code")]
    pub unit_code: String,
    #[serde(rename = "PowerCode")]
    pub unit_label: String,
    #[serde(rename = "Value")]
    pub value: String,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SchemaError {
    #[error("row {row}: required field {field:?} is empty")]
    MissingField { row: usize, field: &'static str },
    #[error("row {row}: cannot parse year {got:?} as an integer")]
    InvalidYear { row: usize, got: String },
    #[error("row {row}: cannot parse value {got:?} as a decimal")]
    InvalidValue { row: usize, got: String },
}

/// Read-only after `load`; the whole pipeline re-reads it from
/// scratch on every run, there is no incremental update.
#[derive(Debug, PartialEq)]
pub struct RecordStore {
    records: Vec<WageGapRecord>,
}

fn required(row: usize, field: &'static str, val: String) -> Result<KString, SchemaError> {
    if val.trim().is_empty() {
        Err(SchemaError::MissingField { row, field })
    } else {
        Ok(val.into())
    }
}

fn parse_record(row: usize, raw: RawRecord) -> Result<WageGapRecord, SchemaError> {
    // Destructure so that added fields can't be forgotten here
    let RawRecord {
        country_code,
        country_name,
        indicator_code,
        indicator,
        sex,
        age_code,
        age_group,
        year,
        unit_code,
        unit_label,
        value,
    } = raw;

    let country_code = CountryCode(required(row, "COU", country_code)?);
    let country_name = required(row, "Country", country_name)?;
    let indicator_code = required(row, "IND", indicator_code)?;
    let indicator = Indicator::from_label(required(row, "Indicator", indicator)?.as_str());
    let sex = required(row, "Sex", sex)?;
    let age_code = required(row, "AGE", age_code)?;
    let age_group = required(row, "Age Group", age_group)?;
    let unit_code = required(row, "PowerCode Code", unit_code)?;
    let unit_label = required(row, "PowerCode", unit_label)?;

    let year = {
        let s = required(row, "Time", year)?;
        match i32::from_str(s.trim()) {
            Ok(year) => year,
            Err(_) => {
                return Err(SchemaError::InvalidYear {
                    row,
                    got: s.as_str().into(),
                })
            }
        }
    };

    let value = {
        let s = required(row, "Value", value)?;
        match Decimal::from_str(s.trim()) {
            Ok(value) => value,
            Err(_) => {
                return Err(SchemaError::InvalidValue {
                    row,
                    got: s.as_str().into(),
                })
            }
        }
    };

    Ok(WageGapRecord {
        country_code,
        country_name,
        indicator_code,
        indicator,
        sex,
        age_code,
        age_group,
        year,
        unit_code,
        unit_label,
        value,
    })
}

impl RecordStore {
    /// Parse and validate `rows`. No defaulting: a missing field or a
    /// `Time`/`Value` that does not parse aborts the load with the
    /// 1-based row number of the offending row.
    pub fn load(rows: impl IntoIterator<Item = RawRecord>) -> Result<Self, SchemaError> {
        let mut records = Vec::new();
        for (i, raw) in rows.into_iter().enumerate() {
            records.push(parse_record(i + 1, raw)?);
        }
        Ok(RecordStore { records })
    }

    pub fn records(&self) -> &[WageGapRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn raw_record(cou: &str, indicator: &str, year: &str, value: &str) -> RawRecord {
    RawRecord {
        country_code: cou.into(),
        country_name: "Testland".into(),
        indicator_code: "EMP9".into(),
        indicator: indicator.into(),
        sex: "Male-Female".into(),
        age_code: "TOTAL".into(),
        age_group: "Total".into(),
        year: year.into(),
        unit_code: "0".into(),
        unit_label: "Units".into(),
        value: value.into(),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::record::FIRST_DECILE_LABEL;

    use super::*;

    #[test]
    fn t_load_ok() {
        let store = RecordStore::load(vec![
            raw_record("AUS", FIRST_DECILE_LABEL, "2000", "14.9"),
            raw_record("AUS", "Gender wage gap at median", "2000", "-1.25"),
        ])
        .unwrap();
        assert_eq!(store.len(), 2);
        let first = &store.records()[0];
        assert_eq!(first.country_code, "AUS".into());
        assert_eq!(first.indicator, Indicator::FirstDecileGap);
        assert_eq!(first.year, 2000);
        assert_eq!(first.value, dec!(14.9));
        let second = &store.records()[1];
        assert_eq!(
            second.indicator,
            Indicator::Other("Gender wage gap at median".into())
        );
        assert_eq!(second.value, dec!(-1.25));
    }

    #[test]
    fn t_load_invalid_value() {
        let err = RecordStore::load(vec![
            raw_record("AUS", FIRST_DECILE_LABEL, "2000", "14.9"),
            raw_record("BEL", FIRST_DECILE_LABEL, "2005", "n/a"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            SchemaError::InvalidValue {
                row: 2,
                got: "n/a".into()
            }
        );
    }

    #[test]
    fn t_load_invalid_year() {
        let err =
            RecordStore::load(vec![raw_record("AUS", FIRST_DECILE_LABEL, "around 2000", "1")])
                .unwrap_err();
        assert_eq!(
            err,
            SchemaError::InvalidYear {
                row: 1,
                got: "around 2000".into()
            }
        );
    }

    #[test]
    fn t_load_missing_field() {
        let err = RecordStore::load(vec![raw_record("", FIRST_DECILE_LABEL, "2000", "1")])
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingField {
                row: 1,
                field: "COU"
            }
        );
    }
}
