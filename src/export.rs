use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::chart::{Chart, PlotError};
use crate::data::filter::Selection;
use crate::data::model::Document;

// ---------------------------------------------------------------------------
// Formats and file naming
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Svg,
    Png,
    Jpg,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Svg => "svg",
            ExportFormat::Png => "png",
            ExportFormat::Jpg => "jpg",
        }
    }

    /// Image formats are drawn from the chart; csv comes straight from the data.
    pub fn is_image(self) -> bool {
        self != ExportFormat::Csv
    }
}

/// `<input basename>.<ext>` inside `out_dir`.
pub fn export_path(input: &Path, format: ExportFormat, out_dir: &Path) -> PathBuf {
    let base = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "plot".to_string());
    out_dir.join(format!("{base}.{}", format.extension()))
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Write the selected series as csv.
///
/// Each series owns two columns, `<name>.x` and `<name>.y`. Series are
/// written one after another, one row per point, leaving the other series'
/// columns empty. VMD files usually share x (the frame) across series, so a
/// spreadsheet can line them up again.
pub fn write_csv<W: Write>(doc: &Document, selection: &Selection, out: W) -> Result<(), csv::Error> {
    let chosen = selection.apply(doc);
    let mut writer = csv::Writer::from_writer(out);

    let headers: Vec<String> = chosen
        .iter()
        .flat_map(|s| [format!("{}.x", s.name), format!("{}.y", s.name)])
        .collect();
    writer.write_record(&headers)?;

    let width = headers.len();
    for (i, series) in chosen.iter().enumerate() {
        for (x, y) in series.points() {
            let mut row = vec![String::new(); width];
            row[2 * i] = format!("{x:?}");
            row[2 * i + 1] = format!("{y:?}");
            writer.write_record(&row)?;
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn save_csv(doc: &Document, selection: &Selection, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(doc, selection, file).with_context(|| format!("writing {}", path.display()))
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

/// Draw the chart into an svg/png/jpg file.
#[cfg(feature = "plot")]
pub fn save_chart(chart: &Chart, format: ExportFormat, path: &Path) -> Result<(), PlotError> {
    crate::render::save(chart, format, path)
}

#[cfg(not(feature = "plot"))]
pub fn save_chart(_chart: &Chart, _format: ExportFormat, _path: &Path) -> Result<(), PlotError> {
    Err(PlotError::Unavailable)
}
