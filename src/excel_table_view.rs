//! Take a sequence of values implementing `TableView` and convert
//! them to an Excel file with a worksheet for each, plus, optionally,
//! a worksheet with a grouped bar chart over one of the data sheets.

use std::{borrow::Cow, ffi::OsString, path::{Path, PathBuf}};

use anyhow::{anyhow, Context, Result};
use rust_xlsxwriter::{Chart, ChartType, Color, Format, FormatAlign, Workbook};

use crate::table_view::{ColumnFormatting, Highlight, TableView, Unit};

/// How many characters to add to the automatic column width
/// calculation to try to avoid setting widths too small to accomodate
/// the strings in the cells.
const WIDTH_SAFETY_MARGIN_CHARS: f64 = 2.0;

/// The grouped bar chart drawn over one of the data worksheets: one
/// bar cluster per key-column entry (country), one series per value
/// column. The zero reference line is the category axis itself, which
/// Excel draws at y = 0 when there are negative values.
pub struct BarChartSpec<'s> {
    /// Name of the worksheet to take categories and values from (must
    /// be one of the tables written to the same file)
    pub data_table_name: &'s str,
    /// 1-based column indices of the value columns, with the series
    /// title to use for each
    pub series: Vec<(u16, &'s str)>,
    /// Number of data rows in the data worksheet (excluding the title
    /// row)
    pub num_rows: u32,
    pub title: &'s str,
    pub x_axis: &'s str,
    pub y_axis: &'s str,
}

fn add_chart_sheet(workbook: &mut Workbook, spec: &BarChartSpec) -> Result<()> {
    let mut chart = Chart::new(ChartType::Column);
    for (colnum, series_name) in &spec.series {
        chart
            .add_series()
            .set_name(*series_name)
            .set_categories((spec.data_table_name, 1, 0, spec.num_rows, 0))
            .set_values((spec.data_table_name, 1, *colnum, spec.num_rows, *colnum));
    }
    chart.title().set_name(spec.title);
    chart.x_axis().set_name(spec.x_axis);
    chart.y_axis().set_name(spec.y_axis);
    // Wide, one cluster per country
    chart.set_width(1280).set_height(420);

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("Chart")
        .context("setting chart worksheet name")?;
    worksheet
        .insert_chart(1, 1, &chart)
        .context("inserting bar chart")?;
    Ok(())
}

pub fn excel_file_write<'t>(
    tables: impl IntoIterator<Item = &'t (dyn TableView + 't)>,
    chart: Option<&BarChartSpec>,
    file: &Path,
) -> Result<()> {
    let mut workbook = Workbook::new();

    for table in tables {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(table.table_name()).with_context(|| {
            anyhow!(
                "trying to use table name as worksheet name: {:?}",
                table.table_name()
            )
        })?;

        let _titles = table.table_view_header();
        let titles = (*_titles).as_ref();

        // Our own max width tracking, in characters
        let mut column_widths: Vec<usize> = titles.iter().map(|_| 1).collect();

        let mut rownum = 0;

        {
            // How many lines do our labels take max?
            let mut num_lines = 1;
            for (i, (label, unit, _column_formatting)) in titles.iter().enumerate() {
                // write cell
                {
                    let colnum =
                        u16::try_from(i).with_context(|| anyhow!("too many columns for excel"))?;
                    let perhaps_unit: Cow<str> = match unit {
                        Unit::None => "".into(),
                        Unit::DimensionLess => "".into(),
                        Unit::Count => "\n(count)".into(),
                        Unit::Percent => "\n(%)".into(),
                    };
                    let val = format!("{label}{perhaps_unit}");
                    {
                        let max_width = val
                            .split('\n')
                            .map(|s| s.chars().count())
                            .max()
                            .unwrap_or(0);
                        column_widths[i] = column_widths[i].max(max_width);
                    }
                    let format = Format::new().set_bold();
                    worksheet
                        .write_with_format(rownum, colnum, &val, &format)
                        .with_context(|| anyhow!("write title value {val:?}"))?;
                }

                // update num_lines
                {
                    let label_linebreaks = label.chars().filter(|c| *c == '\n').count();
                    let unit_lines = match unit {
                        Unit::None => 0,
                        Unit::DimensionLess => 0,
                        Unit::Count => 1,
                        Unit::Percent => 1,
                    };
                    num_lines = num_lines.max(label_linebreaks + 1 + unit_lines);
                }
            }

            let height = (num_lines * 15) as f64;
            worksheet
                .set_row_height(rownum, height)
                .with_context(|| anyhow!("setting height of row {rownum} to height {height}"))?;
        }

        for row in table.table_view_body() {
            rownum += 1;
            for (i, (val, highlight)) in row.iter().enumerate() {
                let column_formatting: ColumnFormatting = titles[i].2;
                let colnum =
                    u16::try_from(i).with_context(|| anyhow!("too many columns for excel"))?;

                // Absent values stay blank cells, so that charts show
                // a gap instead of a zero bar
                if val.is_empty() {
                    continue;
                }

                let mut format = Format::new();
                match highlight {
                    Highlight::Spacer => (),
                    Highlight::Neutral => (),
                    Highlight::Red => {
                        format = format.set_font_color(Color::Red);
                    }
                    Highlight::Green => {
                        format = format.set_background_color(Color::Green);
                    }
                }

                {
                    let max_width = val
                        .split('\n')
                        .map(|s| s.chars().count())
                        .max()
                        .unwrap_or(0);
                    column_widths[i] = column_widths[i].max(max_width);
                }

                // Number columns must be written as numbers, both for
                // right alignment and so that chart series can
                // reference them.
                match column_formatting {
                    ColumnFormatting::Number => {
                        let number: f64 = val.parse().with_context(|| {
                            anyhow!("number column holds unparseable value {val:?}")
                        })?;
                        format = format.set_align(FormatAlign::Right);
                        worksheet
                            .write_number_with_format(rownum, colnum, number, &format)
                            .with_context(|| anyhow!("write value {val:?}"))?;
                    }
                    ColumnFormatting::Spacer | ColumnFormatting::String { .. } => {
                        worksheet
                            .write_with_format(rownum, colnum, val.as_ref(), &format)
                            .with_context(|| anyhow!("write value {val:?}"))?;
                    }
                }
            }
        }

        // Set column widths: autofit works badly for numbers (for
        // LibreOffice, anyway), so use our own character counting.
        {
            for (i, num_chars) in column_widths.iter().enumerate() {
                let colnum =
                    u16::try_from(i).with_context(|| anyhow!("too many columns for excel"))?;
                let width = *num_chars as f64 + WIDTH_SAFETY_MARGIN_CHARS;
                worksheet.set_column_width(colnum, width).with_context(|| {
                    anyhow!("setting column width on column {colnum} to {width}")
                })?;
            }

            for (i, (_label, _unit, column_formatting)) in titles.iter().enumerate() {
                let colnum =
                    u16::try_from(i).with_context(|| anyhow!("too many columns for excel"))?;

                match column_formatting {
                    ColumnFormatting::Spacer => {
                        worksheet
                            .set_column_width(colnum, 3.0)
                            .with_context(|| anyhow!("setting column width on column {colnum}"))?;
                    }
                    ColumnFormatting::Number => {
                        // Alignment already done while writing the
                        // cells, width from the character counting
                        // above.
                    }
                    ColumnFormatting::String { width_chars } => {
                        if let Some(width_chars) = width_chars {
                            worksheet
                                .set_column_width(colnum, *width_chars)
                                .with_context(|| {
                                    anyhow!("setting column width on column {colnum}")
                                })?;
                        }
                    }
                }
            }
        }
    }

    if let Some(spec) = chart {
        add_chart_sheet(&mut workbook, spec)?;
    }

    // Write via a temp file then rename, to never leave a half-written
    // file at the target path
    let file_tmp = {
        let mut s: OsString = file.as_os_str().to_owned();
        s.push(".tmp");
        PathBuf::from(s)
    };
    workbook
        .save(&file_tmp)
        .with_context(|| anyhow!("saving to file {file_tmp:?}"))?;
    std::fs::rename(&file_tmp, file)
        .with_context(|| anyhow!("renaming {file_tmp:?} to {file:?}"))?;

    Ok(())
}
