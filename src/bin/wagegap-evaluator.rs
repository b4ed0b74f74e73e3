use std::io::stdout;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use wagegap_evaluator::config_file::RunConfig;
use wagegap_evaluator::csv_file::read_csv_file;
use wagegap_evaluator::evaluator::evaluate;
use wagegap_evaluator::excel_table_view::{excel_file_write, BarChartSpec};
use wagegap_evaluator::get_terminal_width::get_terminal_width;
use wagegap_evaluator::info;
use wagegap_evaluator::record::Decile;
use wagegap_evaluator::table_view::TableView;
use wagegap_evaluator::terminal_table::{terminal_table_write, TerminalTableOpts};
use wagegap_evaluator::utillib::logging::{set_log_level, LogLevelOpt};

const PROGRAM_NAME: &str = "wagegap-evaluator";

#[derive(clap::Parser, Debug)]
#[clap(next_line_help = true)]
#[clap(term_width = get_terminal_width())]
struct Opts {
    #[clap(flatten)]
    log_level: LogLevelOpt,

    /// The subcommand to run. Use `--help` after the sub-command to
    /// get a list of the allowed options there.
    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Print version
    Version,

    /// Evaluate a wage gap dataset CSV export: print the per-decile
    /// summary statistics to stdout and optionally write the tables
    /// and the bar chart to an Excel file.
    Evaluate {
        /// Path to write Excel output to; no Excel file is written
        /// when not given
        #[clap(short, long)]
        excel: Option<PathBuf>,

        /// Print the tables as TSV instead of padded human-readable
        /// columns
        #[clap(long)]
        tsv: bool,

        /// Also print the joined per-country averages table, not just
        /// the summary
        #[clap(short, long)]
        show_table: bool,

        /// The width of the country code column, in characters (as
        /// per Excel's definition of characters); overrides the
        /// config file setting
        #[clap(short, long)]
        key_width: Option<f64>,

        /// Path to a JSON5 or YAML config file with table and chart
        /// labels; built-in defaults are used when not given
        #[clap(short, long)]
        config: Option<PathBuf>,

        /// Refuse to read input files larger than this many bytes
        #[clap(long)]
        max_file_size: Option<u64>,

        /// The path to the dataset CSV export
        csv: PathBuf,
    },
}

fn main() -> Result<()> {
    let Opts { log_level, command } = Opts::parse();
    set_log_level(log_level.into());

    match command {
        Command::Version => println!("{PROGRAM_NAME} version {}", env!("CARGO_PKG_VERSION")),

        Command::Evaluate {
            excel,
            tsv,
            show_table,
            key_width,
            config,
            max_file_size,
            csv,
        } => {
            let mut config = RunConfig::load(config.as_deref())?;
            if let Some(key_width) = key_width {
                config.key_column_width = key_width;
            }

            info!("reading dataset from {csv:?}");
            let store = read_csv_file(&csv, max_file_size)?;
            info!("loaded {} records", store.len());

            let evaluation = evaluate(&store, &config);

            for (decile, summary) in &evaluation.summaries {
                if let Err(e) = summary {
                    eprintln!("no summary for the {decile}: {e}");
                }
            }

            let opts = TerminalTableOpts { tsv_mode: tsv };
            let mut out = stdout().lock();
            if show_table {
                terminal_table_write(&evaluation.averages, &opts, &mut out)?;
            }
            terminal_table_write(&evaluation.summary, &opts, &mut out)?;

            if let Some(excel) = excel {
                let chart = BarChartSpec {
                    data_table_name: &config.averages_table_name,
                    series: vec![
                        (1, Decile::First.column_label()),
                        (2, Decile::Ninth.column_label()),
                    ],
                    num_rows: evaluation.averages.rows.len() as u32,
                    title: &config.chart_title,
                    x_axis: &config.chart_x_axis,
                    y_axis: &config.chart_y_axis,
                };
                let tables: [&dyn TableView; 2] = [&evaluation.averages, &evaluation.summary];
                excel_file_write(tables, Some(&chart), &excel)?;
                info!("wrote Excel file to {excel:?}");
            }
        }
    }

    Ok(())
}
