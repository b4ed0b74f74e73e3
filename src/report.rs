//! Building the display tables: the joined per-country averages table
//! and the per-decile summary table.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::marker::PhantomData;

use rust_decimal::Decimal;

use crate::{
    join::{keyval_left_join_2, KeyVal},
    record::{CountryCode, Decile},
    stats::{Stats, StatsError},
    table::{Table, TableKeyLabel},
    table_view::{ColumnFormatting, Highlight, TableViewRow, Unit},
};

pub struct CountryKeyLabel;
impl TableKeyLabel for CountryKeyLabel {
    const KEY_LABEL: &'static str = "COU";
}

pub struct DecileKeyLabel;
impl TableKeyLabel for DecileKeyLabel {
    const KEY_LABEL: &'static str = "Decile";
}

/// One row of the joined table: the per-country average gap for both
/// deciles. `None` is the "absent" sentinel, the country has no data
/// for that decile; distinct from a zero gap.
#[derive(Debug, Clone, PartialEq)]
pub struct DecileRow {
    pub first_decile_avg: Option<Decimal>,
    pub ninth_decile_avg: Option<Decimal>,
}

pub fn format_gap(value: Decimal) -> String {
    value.round_dp(4).normalize().to_string()
}

fn push_gap(out: &mut Vec<(Cow<str>, Highlight)>, value: Option<Decimal>) {
    match value {
        Some(value) => out.push((format_gap(value).into(), Highlight::Neutral)),
        // Absent: leave the cell empty; the bar chart then omits the
        // bar instead of drawing one of height zero
        None => out.push(("".into(), Highlight::Neutral)),
    }
}

impl TableViewRow<()> for DecileRow {
    fn table_view_header(_: ()) -> Box<dyn AsRef<[(Cow<'static, str>, Unit, ColumnFormatting)]>> {
        let cols: Vec<(Cow<'static, str>, Unit, ColumnFormatting)> = vec![
            (
                Decile::First.column_label().into(),
                Unit::Percent,
                ColumnFormatting::Number,
            ),
            (
                Decile::Ninth.column_label().into(),
                Unit::Percent,
                ColumnFormatting::Number,
            ),
        ];
        Box::new(cols)
    }

    fn table_view_row(&self, out: &mut Vec<(Cow<str>, Highlight)>) {
        let Self {
            first_decile_avg,
            ninth_decile_avg,
        } = self;
        push_gap(out, *first_decile_avg);
        push_gap(out, *ninth_decile_avg);
    }
}

/// Left join of the first-decile averages onto the ninth-decile
/// averages, ordered ascending by country code. Strictly left: the
/// first decile is the primary key set, countries with
/// ninth-decile-only data get no row here (they still count for the
/// ninth decile summary statistics).
pub fn joined_report<'s>(
    name: Cow<'s, str>,
    key_column_width: Option<f64>,
    first: BTreeMap<CountryCode, Decimal>,
    ninth: BTreeMap<CountryCode, Decimal>,
) -> Table<'s, DecileRow, CountryKeyLabel> {
    let a = first.into_iter().map(|(key, val)| KeyVal { key, val });
    let b = ninth.into_iter().map(|(key, val)| KeyVal { key, val });
    let rows = keyval_left_join_2(a, b)
        .map(
            |KeyVal {
                 key,
                 val: (first_avg, ninth_avg),
             }| KeyVal {
                key: key.to_string().into(),
                val: DecileRow {
                    first_decile_avg: Some(first_avg),
                    ninth_decile_avg: ninth_avg,
                },
            },
        )
        .collect();
    Table {
        key_label: PhantomData,
        key_column_width,
        name,
        rows,
    }
}

/// The two (mean, population SD) pairs as one table, one row per
/// decile. A decile whose summary failed (no observed countries) gets
/// no row; the caller reports that error separately.
pub fn summary_table<'s>(
    name: Cow<'s, str>,
    summaries: &[(Decile, Result<Stats, StatsError>)],
) -> Table<'s, Stats, DecileKeyLabel> {
    let rows = summaries
        .iter()
        .filter_map(|(decile, stats)| {
            let stats = stats.as_ref().ok()?;
            Some(KeyVal {
                key: decile.to_string().into(),
                val: stats.clone(),
            })
        })
        .collect();
    Table {
        key_label: PhantomData,
        key_column_width: Some(20.),
        name,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::table_view::TableView;

    use super::*;

    fn averages(entries: &[(&str, Decimal)]) -> BTreeMap<CountryCode, Decimal> {
        entries
            .iter()
            .map(|(cou, val)| ((*cou).into(), *val))
            .collect()
    }

    #[test]
    fn t_left_join_semantics() {
        // "C" has ninth-decile data only and is excluded; "A" gets
        // the absent sentinel.
        let table = joined_report(
            "Averages".into(),
            None,
            averages(&[("A", dec!(1.0)), ("B", dec!(2.0))]),
            averages(&[("B", dec!(3.0)), ("C", dec!(4.0))]),
        );
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].key, "A");
        assert_eq!(
            table.rows[0].val,
            DecileRow {
                first_decile_avg: Some(dec!(1.0)),
                ninth_decile_avg: None,
            }
        );
        assert_eq!(table.rows[1].key, "B");
        assert_eq!(
            table.rows[1].val,
            DecileRow {
                first_decile_avg: Some(dec!(2.0)),
                ninth_decile_avg: Some(dec!(3.0)),
            }
        );
    }

    #[test]
    fn t_ordered_by_country_code() {
        let table = joined_report(
            "Averages".into(),
            None,
            averages(&[("NOR", dec!(3)), ("AUS", dec!(1)), ("DNK", dec!(2))]),
            BTreeMap::new(),
        );
        let keys: Vec<&str> = table.rows.iter().map(|kv| kv.key.as_ref()).collect();
        assert_eq!(keys, ["AUS", "DNK", "NOR"]);
    }

    #[test]
    fn t_absent_renders_as_empty_cell() {
        let table = joined_report(
            "Averages".into(),
            None,
            averages(&[("A", dec!(1.5))]),
            BTreeMap::new(),
        );
        let body: Vec<Vec<String>> = table
            .table_view_body()
            .map(|row| row.iter().map(|(val, _)| val.to_string()).collect())
            .collect();
        assert_eq!(body, [["A", "1.5", ""]]);
    }

    #[test]
    fn t_summary_table_skips_failed_decile() {
        let summaries = vec![
            (
                Decile::First,
                Stats::from_values(&[dec!(2), dec!(4)]),
            ),
            (Decile::Ninth, Stats::from_values(&[])),
        ];
        let table = summary_table("Summary".into(), &summaries);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].key, "1st decile (bottom)");
        assert_eq!(table.rows[0].val.mean, dec!(3));
    }
}
