//! The full pipeline over a loaded `RecordStore`: aggregate per
//! decile, summarize per decile, join into the per-country table.
//! Pure and deterministic; running it twice over the same store gives
//! identical results, there is no state carried between runs.

use std::borrow::Cow;

use rust_decimal::Decimal;

use crate::{
    aggregate::average_by_country,
    config_file::RunConfig,
    record::Decile,
    record_store::RecordStore,
    report::{joined_report, summary_table, CountryKeyLabel, DecileKeyLabel, DecileRow},
    stats::{Stats, StatsError},
    table::Table,
};

pub struct Evaluation<'s> {
    /// Left join of first-decile onto ninth-decile averages, ordered
    /// by country code
    pub averages: Table<'s, DecileRow, CountryKeyLabel>,
    /// Per decile, the summary over its per-country averages. A
    /// decile with no observed countries carries the error here
    /// instead of poisoning the other decile.
    pub summaries: Vec<(Decile, Result<Stats, StatsError>)>,
    /// The successful entries of `summaries` as a display table
    pub summary: Table<'s, Stats, DecileKeyLabel>,
}

pub fn evaluate<'s>(store: &RecordStore, config: &'s RunConfig) -> Evaluation<'s> {
    let first = average_by_country(store, &Decile::First.indicator());
    let ninth = average_by_country(store, &Decile::Ninth.indicator());

    let summaries: Vec<(Decile, Result<Stats, StatsError>)> = [
        (Decile::First, &first),
        (Decile::Ninth, &ninth),
    ]
    .into_iter()
    .map(|(decile, averages)| {
        let vals: Vec<Decimal> = averages.values().copied().collect();
        (decile, Stats::from_values(&vals))
    })
    .collect();

    let averages = joined_report(
        Cow::Borrowed(config.averages_table_name.as_str()),
        Some(config.key_column_width),
        first,
        ninth,
    );

    let summary = summary_table(Cow::Borrowed(config.summary_table_name.as_str()), &summaries);

    Evaluation {
        averages,
        summaries,
        summary,
    }
}
