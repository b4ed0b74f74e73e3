//! Run configuration: labels and sizes for the generated tables and
//! the chart. Optional; every field has a default matching the OECD
//! dataset. Loadable from a JSON5 or YAML file, decided by the file
//! name extension.

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RunConfig {
    /// Width of the country-code column in Excel character widths
    pub key_column_width: f64,
    /// Worksheet name for the joined per-country averages table
    pub averages_table_name: String,
    /// Worksheet name for the per-decile mean/SD table
    pub summary_table_name: String,
    pub chart_title: String,
    pub chart_x_axis: String,
    pub chart_y_axis: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            key_column_width: 8.,
            averages_table_name: "Averages".into(),
            summary_table_name: "Summary".into(),
            chart_title: "Average Gender Wage Gap Values of Countries Based on Income Decile"
                .into(),
            chart_x_axis: "Country".into(),
            chart_y_axis: "Average Gender Wage Gap Value (%)".into(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ConfigBackend {
    Json5,
    Yaml,
}

const FILE_EXTENSIONS: &[(&str, ConfigBackend)] = &[
    ("json5", ConfigBackend::Json5),
    ("json", ConfigBackend::Json5),
    ("yml", ConfigBackend::Yaml),
    ("yaml", ConfigBackend::Yaml),
];

fn backend_from_path(path: &Path) -> Result<ConfigBackend> {
    if let Some(ext) = path.extension() {
        if let Some(ext) = ext.to_str() {
            if let Some((_, backend)) = FILE_EXTENSIONS.iter().find(|(e, _b)| *e == ext) {
                Ok(*backend)
            } else {
                bail!("given file path does have an unknown extension {ext:?}: {path:?}")
            }
        } else {
            bail!("given file path does have an extension that is not unicode: {path:?}")
        }
    } else {
        bail!(
            "given file path does not have an extension \
             for determining the file type: {path:?}"
        )
    }
}

impl RunConfig {
    /// No path given means the defaults; a given path must exist and
    /// parse.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(RunConfig::default());
        };
        let backend = backend_from_path(path)?;
        let s = std::fs::read_to_string(path)
            .with_context(|| anyhow!("loading config file from {path:?}"))?;
        match backend {
            ConfigBackend::Json5 => json5::from_str(&s)
                .with_context(|| anyhow!("decoding JSON5 from config file {path:?}")),
            ConfigBackend::Yaml => serde_yml::from_str(&s)
                .with_context(|| anyhow!("decoding YAML from config file {path:?}")),
        }
    }
}
