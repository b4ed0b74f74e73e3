//! Grouping and averaging: the per-(country, decile) means the
//! summary statistics and the joined table are built from.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::{
    record::{CountryCode, Indicator},
    record_store::RecordStore,
};

/// Mean `value` per country over the rows matching `indicator`
/// (sum/count in exact decimal arithmetic; the counts are small, one
/// row per year present in the data). Countries with no matching rows
/// are simply absent from the result, *not* zero-filled: absence
/// means "no data", which is distinct from a computed zero gap. An
/// indicator matching no rows at all yields an empty map, not an
/// error.
///
/// The `BTreeMap` gives iteration in ascending country-code order,
/// which the join stage relies on.
pub fn average_by_country(
    store: &RecordStore,
    indicator: &Indicator,
) -> BTreeMap<CountryCode, Decimal> {
    let mut groups: BTreeMap<CountryCode, (Decimal, u32)> = BTreeMap::new();
    for record in store.records() {
        if record.indicator == *indicator {
            let (sum, count) = groups
                .entry(record.country_code.clone())
                .or_insert((Decimal::ZERO, 0));
            *sum += record.value;
            *count += 1;
        }
    }
    groups
        .into_iter()
        .map(|(country, (sum, count))| (country, sum / Decimal::from(count)))
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::record::{Decile, FIRST_DECILE_LABEL, NINTH_DECILE_LABEL};
    use crate::record_store::raw_record;

    use super::*;

    fn store() -> RecordStore {
        RecordStore::load(vec![
            raw_record("AUS", FIRST_DECILE_LABEL, "2000", "14.9"),
            raw_record("AUS", FIRST_DECILE_LABEL, "2005", "15.7"),
            raw_record("AUS", FIRST_DECILE_LABEL, "2010", "14.1"),
            raw_record("BEL", FIRST_DECILE_LABEL, "2000", "-0.5"),
            raw_record("AUS", NINTH_DECILE_LABEL, "2000", "23.5"),
            raw_record("AUS", "Gender wage gap at median", "2000", "100"),
        ])
        .unwrap()
    }

    #[test]
    fn t_one_entry_per_country_with_exact_mean() {
        let averages = average_by_country(&store(), &Decile::First.indicator());
        assert_eq!(averages.len(), 2);
        // (14.9 + 15.7 + 14.1) / 3, exactly
        assert_eq!(averages[&"AUS".into()], dec!(14.9));
        assert_eq!(averages[&"BEL".into()], dec!(-0.5));
    }

    #[test]
    fn t_absent_is_not_zero_filled() {
        let averages = average_by_country(&store(), &Decile::Ninth.indicator());
        assert_eq!(averages.len(), 1);
        assert_eq!(averages[&"AUS".into()], dec!(23.5));
        assert!(!averages.contains_key(&"BEL".into()));
    }

    #[test]
    fn t_no_matching_rows_yields_empty_map() {
        let averages = average_by_country(
            &store(),
            &Indicator::Other("Gender wage gap at mean".into()),
        );
        assert!(averages.is_empty());
    }

    #[test]
    fn t_no_binary_float_drift() {
        // 0.1 + 0.2 is not 0.3 in f64; in decimal arithmetic the mean
        // comes out exact.
        let store = RecordStore::load(vec![
            raw_record("FIN", FIRST_DECILE_LABEL, "2000", "0.1"),
            raw_record("FIN", FIRST_DECILE_LABEL, "2005", "0.2"),
        ])
        .unwrap();
        let averages = average_by_country(&store, &Decile::First.indicator());
        assert_eq!(averages[&"FIN".into()], dec!(0.15));
    }
}
