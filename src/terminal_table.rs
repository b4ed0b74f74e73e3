//! Print a `TableView` to a terminal in human-readable format (with
//! spaces for padding, and ANSI sequences for the title row), or in
//! TSV format (tabs, no padding, no ANSI codes).

//! Does not escape anything in the fields. That is fine for the data
//! here (country codes, numbers); values containing tabs or newlines
//! would make the output ambiguous.

use std::io::Write;

use anyhow::Result;
use yansi::{Paint, Style};

use crate::table_view::{ColumnFormatting, Highlight, TableView, Unit};

#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalTableOpts {
    /// Print as TSV instead of padded human-readable columns
    pub tsv_mode: bool,
}

fn title_with_unit(label: &str, unit: Unit) -> String {
    match unit {
        Unit::None => label.into(),
        Unit::DimensionLess => label.into(),
        Unit::Count => format!("{label} (count)"),
        Unit::Percent => format!("{label} (%)"),
    }
}

/// Tables here are small (tens of rows), so unlike a streaming
/// printer this collects all rows first and derives the column widths
/// from the actual contents.
pub fn terminal_table_write(
    table: &dyn TableView,
    opts: &TerminalTableOpts,
    out: &mut impl Write,
) -> Result<()> {
    const TITLE_STYLE: Style = Style::new().bold().italic();
    const NAME_STYLE: Style = Style::new().bold();

    let _header = table.table_view_header();
    let header = (*_header).as_ref();

    let titles: Vec<String> = header
        .iter()
        .map(|(label, unit, _formatting)| title_with_unit(label, *unit))
        .collect();

    let rows: Vec<Vec<String>> = table
        .table_view_body()
        .map(|row| row.iter().map(|(val, _highlight)| val.to_string()).collect())
        .collect();

    if opts.tsv_mode {
        writeln!(out, "{}", titles.join("\t"))?;
        for row in rows {
            writeln!(out, "{}", row.join("\t"))?;
        }
        return Ok(());
    }

    let mut widths: Vec<usize> = titles.iter().map(|title| title.chars().count()).collect();
    for row in &rows {
        for (i, val) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(val.chars().count());
            }
        }
    }

    writeln!(out, "{}", table.table_name().paint(NAME_STYLE))?;

    let write_row = |out: &mut dyn Write, row: &[String], style: Option<&Style>| -> Result<()> {
        for (i, val) in row.iter().enumerate() {
            if i > 0 {
                out.write_all(b"  ")?;
            }
            let width = widths[i];
            let padding = " ".repeat(width.saturating_sub(val.chars().count()));
            // Numbers right-adjusted, strings left-adjusted
            let right_adjust = matches!(
                header.get(i).map(|(_, _, f)| f),
                Some(ColumnFormatting::Number)
            );
            let styled: String = if let Some(style) = style {
                val.paint(*style).to_string()
            } else {
                val.clone()
            };
            if right_adjust {
                out.write_all(padding.as_bytes())?;
                out.write_all(styled.as_bytes())?;
            } else {
                out.write_all(styled.as_bytes())?;
                out.write_all(padding.as_bytes())?;
            }
        }
        out.write_all(b"\n")?;
        Ok(())
    };

    write_row(&mut *out, &titles, Some(&TITLE_STYLE))?;
    for row in &rows {
        write_row(&mut *out, row, None)?;
    }
    writeln!(out)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::marker::PhantomData;

    use rust_decimal_macros::dec;

    use crate::join::KeyVal;
    use crate::report::{CountryKeyLabel, DecileRow};
    use crate::table::Table;

    use super::*;

    fn test_table() -> Table<'static, DecileRow, CountryKeyLabel> {
        Table {
            key_label: PhantomData,
            key_column_width: None,
            name: "Averages".into(),
            rows: vec![
                KeyVal {
                    key: Cow::Borrowed("AUS"),
                    val: DecileRow {
                        first_decile_avg: Some(dec!(14.9)),
                        ninth_decile_avg: Some(dec!(23.5)),
                    },
                },
                KeyVal {
                    key: Cow::Borrowed("BEL"),
                    val: DecileRow {
                        first_decile_avg: Some(dec!(-0.5)),
                        ninth_decile_avg: None,
                    },
                },
            ],
        }
    }

    #[test]
    fn t_tsv_output() -> Result<()> {
        let mut out = Vec::new();
        terminal_table_write(
            &test_table(),
            &TerminalTableOpts { tsv_mode: true },
            &mut out,
        )?;
        let s = String::from_utf8(out)?;
        assert_eq!(
            s,
            "COU\tFirst Decile (%)\tNinth Decile (%)\n\
             AUS\t14.9\t23.5\n\
             BEL\t-0.5\t\n"
        );
        Ok(())
    }

    #[test]
    fn t_human_output_contains_values() -> Result<()> {
        let mut out = Vec::new();
        terminal_table_write(&test_table(), &TerminalTableOpts::default(), &mut out)?;
        let s = String::from_utf8(out)?;
        assert!(s.contains("AUS"));
        assert!(s.contains("14.9"));
        assert!(s.contains("23.5"));
        Ok(())
    }
}
