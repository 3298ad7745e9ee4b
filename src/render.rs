use std::path::Path;

use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::chart::{legend_origin, Chart, PlotError, EXPORT_SIZE};
use crate::export::ExportFormat;

// ---------------------------------------------------------------------------
// File export of a Chart
// ---------------------------------------------------------------------------

/// Draw `chart` and write it to `path` in the given image format.
pub fn save(chart: &Chart, format: ExportFormat, path: &Path) -> Result<(), PlotError> {
    match format {
        ExportFormat::Svg => std::fs::write(path, render_svg(chart)?)?,
        ExportFormat::Png => encode(render_bitmap(chart)?, path, ImageFormat::Png)?,
        ExportFormat::Jpg => encode(render_bitmap(chart)?, path, ImageFormat::Jpeg)?,
        ExportFormat::Csv => {
            return Err(PlotError::Draw("csv is not an image format".to_string()));
        }
    }
    log::debug!("chart written to {}", path.display());
    Ok(())
}

pub fn render_svg(chart: &Chart) -> Result<String, PlotError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, EXPORT_SIZE).into_drawing_area();
        draw(&root, chart)?;
    }
    Ok(svg)
}

/// Rasterise into an in-memory RGB image.
pub fn render_bitmap(chart: &Chart) -> Result<RgbImage, PlotError> {
    let (w, h) = EXPORT_SIZE;
    let mut buf = vec![0u8; w as usize * h as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, EXPORT_SIZE).into_drawing_area();
        draw(&root, chart)?;
    }
    RgbImage::from_raw(w, h, buf)
        .ok_or_else(|| PlotError::Draw("bitmap buffer does not match image size".to_string()))
}

fn encode(img: RgbImage, path: &Path, format: ImageFormat) -> Result<(), PlotError> {
    img.save_with_format(path, format)
        .map_err(|e| PlotError::Draw(format!("encoding {}: {e}", path.display())))
}

fn draw_err<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Draw(e.to_string())
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

fn draw<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, chart: &Chart) -> Result<(), PlotError> {
    root.fill(&WHITE).map_err(draw_err)?;
    let (x_range, y_range) = chart.bounds();

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70);
    if !chart.title.is_empty() {
        builder.caption(&chart.title, ("sans-serif", 26));
    }
    let mut ctx = builder
        .build_cartesian_2d(x_range, y_range)
        .map_err(draw_err)?;

    let mut mesh = ctx.configure_mesh();
    if let Some(labels) = &chart.axis_labels {
        mesh.x_desc(labels.x.as_str()).y_desc(labels.y.as_str());
    }
    mesh.draw().map_err(draw_err)?;

    for line in &chart.lines {
        let color = RGBColor(line.color[0], line.color[1], line.color[2]);
        ctx.draw_series(LineSeries::new(
            line.points.iter().map(|p| (p[0], p[1])),
            color.stroke_width(2),
        ))
        .map_err(draw_err)?
        .label(line.label.as_str())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    if let (Some(anchor), false) = (chart.legend_anchor, chart.lines.is_empty()) {
        let area = ctx.plotting_area().dim_in_pixel();
        let (x, y) = legend_origin(anchor, area, legend_size(chart));
        ctx.configure_series_labels()
            .position(SeriesLabelPosition::Coordinate(x, y))
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(draw_err)?;
    }

    root.present().map_err(draw_err)?;
    Ok(())
}

/// Rough pixel size of the legend box, used to keep it inside the plot.
fn legend_size(chart: &Chart) -> (u32, u32) {
    let longest = chart
        .lines
        .iter()
        .map(|l| l.label.chars().count())
        .max()
        .unwrap_or(0) as u32;
    (longest * 8 + 45, chart.lines.len() as u32 * 20 + 10)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartLine;

    #[test]
    fn legend_grows_with_labels() {
        let line = |label: &str| ChartLine {
            label: label.to_string(),
            points: Vec::new(),
            color: [0, 0, 0],
        };
        let mut chart = Chart {
            title: String::new(),
            axis_labels: None,
            legend_anchor: None,
            lines: vec![line("a")],
        };
        let small = legend_size(&chart);
        chart.lines.push(line("a much longer label"));
        let large = legend_size(&chart);
        assert!(large.0 > small.0);
        assert!(large.1 > small.1);
    }
}
