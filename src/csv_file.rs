//! Reading the OECD CSV export into a `RecordStore`. This is the
//! ingestion plumbing, not part of the aggregation core: it only has
//! to deliver `RawRecord`s, `RecordStore::load` does the validation.

use std::{fs::File, io::Read, path::Path};

use anyhow::{anyhow, bail, Context, Result};

use crate::record_store::{RawRecord, RecordStore};

/// Parse CSV with a header row from `input`. Rows that do not match
/// the expected column set (missing or unknown headers, wrong field
/// count) fail here; rows whose field *contents* are malformed fail
/// in `RecordStore::load` with a `SchemaError`.
pub fn read_csv(input: impl Read) -> Result<RecordStore> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut rows: Vec<RawRecord> = Vec::new();
    for (i, result) in reader.deserialize().enumerate() {
        let raw: RawRecord = result.with_context(|| anyhow!("parsing CSV row {}", i + 1))?;
        rows.push(raw);
    }

    Ok(RecordStore::load(rows)?)
}

/// Currently not streaming, the whole parsed dataset is kept in
/// memory (it is small). `max_file_size` can be used to avoid
/// unintended loading of overly large files.
pub fn read_csv_file(path: &Path, max_file_size: Option<u64>) -> Result<RecordStore> {
    let input = File::open(path).with_context(|| anyhow!("opening file {path:?}"))?;

    if let Some(max_file_size) = max_file_size {
        let m = input.metadata()?;
        if m.len() > max_file_size {
            bail!("currently assuming that you don't read files larger than {max_file_size}")
        }
    }

    read_csv(input).with_context(|| anyhow!("reading CSV file {path:?}"))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::record::Indicator;
    use crate::record_store::SchemaError;

    use super::*;

    const HEADER: &str = "COU,Country,IND,Indicator,Sex,AGE,Age Group,Time,\
                          PowerCode Code,PowerCode,Value";

    #[test]
    fn t_read_csv() -> Result<()> {
        let csv = format!(
            "{HEADER}\n\
             AUS,Australia,EMP9,Gender wage gap at 1st decile (bottom),\
             Male-Female,TOTAL,Total,2000,0,Units,14.9\n\
             AUS,Australia,EMP9,Gender wage gap at 9th decile (top),\
             Male-Female,TOTAL,Total,2000,0,Units,23.5\n"
        );
        let store = read_csv(csv.as_bytes())?;
        assert_eq!(store.len(), 2);
        let record = &store.records()[1];
        assert_eq!(record.country_name.as_str(), "Australia");
        assert_eq!(record.indicator, Indicator::NinthDecileGap);
        assert_eq!(record.value, dec!(23.5));
        Ok(())
    }

    #[test]
    fn t_read_csv_bad_value_is_schema_error() {
        let csv = format!(
            "{HEADER}\n\
             AUS,Australia,EMP9,Gender wage gap at 1st decile (bottom),\
             Male-Female,TOTAL,Total,2000,0,Units,no data\n"
        );
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SchemaError>(),
            Some(&SchemaError::InvalidValue {
                row: 1,
                got: "no data".into()
            })
        );
    }

    #[test]
    fn t_read_csv_wrong_columns() {
        let csv = "COU,Country\nAUS,Australia\n";
        assert!(read_csv(csv.as_bytes()).is_err());
    }
}
