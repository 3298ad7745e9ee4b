use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::chart::{Capability, Chart, PlotError};
use crate::cli::Cli;
use crate::data::loader;
use crate::export::{self, export_path};

// ---------------------------------------------------------------------------
// Run environment and outcome
// ---------------------------------------------------------------------------

/// What the surrounding process provides.
#[derive(Debug, Clone)]
pub struct RunEnv {
    pub capability: Capability,
    /// Directory receiving exported files.
    pub out_dir: PathBuf,
    /// Whether a window may be opened at all.
    pub interactive: bool,
}

impl RunEnv {
    pub fn detect() -> Self {
        Self {
            capability: Capability::detect(),
            out_dir: PathBuf::new(),
            interactive: true,
        }
    }
}

/// Handled failures and produced artefacts of one run.
#[derive(Debug, Default)]
pub struct Report {
    pub exported: Option<PathBuf>,
    pub shown: bool,
    pub failures: Vec<String>,
}

impl Report {
    pub fn succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    fn fail(&mut self, message: String) {
        log::error!("{message}");
        self.failures.push(message);
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Parse the input, then export and/or show it as requested.
///
/// Parse and I/O errors abort with `Err`. Plot problems (no plotting support,
/// wrong number of labels, no window) are recorded in the report; csv export
/// still runs without a chart.
pub fn run(cli: &Cli, env: &RunEnv) -> Result<Report> {
    let selection = cli.selection();
    let mut doc = loader::load_file(&cli.input_file, &selection)?;
    doc.override_title(cli.title.as_deref());

    let mut report = Report::default();

    let image_export = cli.export.is_some_and(|f| f.is_image());
    let chart = if !cli.do_not_plot || image_export {
        match Chart::build(&doc, &selection, &cli.chart_options(), env.capability) {
            Ok(chart) => Some(chart),
            Err(e) => {
                report.fail(format!("Plot generation failed: {e}"));
                None
            }
        }
    } else {
        None
    };

    if let Some(format) = cli.export {
        let path = export_path(&cli.input_file, format, &env.out_dir);
        let result = if format.is_image() {
            match &chart {
                Some(chart) => export::save_chart(chart, format, &path).map_err(anyhow::Error::from),
                None => Err(anyhow!("no chart available")),
            }
        } else {
            export::save_csv(&doc, &selection, &path)
        };

        match result {
            Ok(()) => {
                println!(
                    "Exported {} layer(s) to {}.",
                    selection.apply(&doc).len(),
                    path.display()
                );
                report.exported = Some(path);
            }
            Err(e) => report.fail(format!("Export to {} failed: {e:#}", format.extension())),
        }
    }

    if !cli.do_not_plot && env.interactive {
        if let Some(chart) = chart {
            match show(chart) {
                Ok(()) => report.shown = true,
                Err(e) => report.fail(format!("Plot generation failed: {e}")),
            }
        }
    }

    Ok(report)
}

#[cfg(feature = "plot")]
fn show(chart: Chart) -> Result<(), PlotError> {
    crate::app::show(chart)
}

#[cfg(not(feature = "plot"))]
fn show(_chart: Chart) -> Result<(), PlotError> {
    Err(PlotError::Unavailable)
}
