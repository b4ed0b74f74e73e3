//! Evaluator for the OECD gender wage gap dataset: per-country
//! average gap values for the 1st and 9th income deciles, the
//! cross-country mean and population standard deviation of those
//! averages, and a joined per-country table rendered to Excel (with a
//! grouped bar chart) and to the terminal.

pub mod aggregate;
pub mod config_file;
pub mod csv_file;
pub mod evaluator;
pub mod excel_table_view;
pub mod get_terminal_width;
pub mod join;
pub mod record;
pub mod record_store;
pub mod report;
pub mod stats;
pub mod table;
pub mod table_view;
pub mod terminal_table;
pub mod utillib;
