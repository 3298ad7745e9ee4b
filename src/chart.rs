use std::ops::Range;

use thiserror::Error;

use crate::color::{generate_palette, Rgb};
use crate::data::filter::Selection;
use crate::data::model::Document;

/// Pixel size of exported images.
pub const EXPORT_SIZE: (u32, u32) = (1024, 768);

// ---------------------------------------------------------------------------
// Plotting capability
// ---------------------------------------------------------------------------

/// Whether this build can draw charts at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Available,
    Missing,
}

impl Capability {
    pub fn detect() -> Self {
        if cfg!(feature = "plot") {
            Capability::Available
        } else {
            Capability::Missing
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum PlotError {
    #[error(
        "plotting support is not available in this build. Use --do_not_plot to run \
         without plot generation; without plotting only export to csv is possible"
    )]
    Unavailable,
    #[error(
        "there should be exactly as many labels given as there are variables chosen \
         ({given} given, {expected} chosen)"
    )]
    LabelCountMismatch { expected: usize, given: usize },
    #[error("drawing chart failed: {0}")]
    Draw(String),
    #[error("cannot open plot window: {0}")]
    Window(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// An (x, y) pair of factors or fractions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pair {
    pub x: f64,
    pub y: f64,
}

impl Pair {
    pub const ONE: Pair = Pair { x: 1.0, y: 1.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Pair { x, y }
    }

    /// Exactly two values, as clap collects them.
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        match values {
            [x, y] => Some(Pair::new(*x, *y)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisLabels {
    pub x: String,
    pub y: String,
}

/// Caller-supplied chart settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    /// Multiplies every x and y before drawing. Never applied to csv.
    pub scale: Pair,
    pub axis_labels: Option<AxisLabels>,
    /// Legend position in axes fractions. `None` hides the legend.
    pub legend_anchor: Option<Pair>,
    /// Legend text replacing the series names, one per selected series.
    pub labels: Option<Vec<String>>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            scale: Pair::ONE,
            axis_labels: None,
            legend_anchor: None,
            labels: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Chart – drawable form of the selected series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ChartLine {
    pub label: String,
    /// Scaled points, in file order.
    pub points: Vec<[f64; 2]>,
    pub color: Rgb,
}

/// The in-memory chart shared by the window and the file renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub axis_labels: Option<AxisLabels>,
    pub legend_anchor: Option<Pair>,
    pub lines: Vec<ChartLine>,
}

impl Chart {
    /// Build a chart of the selected series.
    pub fn build(
        doc: &Document,
        selection: &Selection,
        opts: &ChartOptions,
        capability: Capability,
    ) -> Result<Chart, PlotError> {
        if capability == Capability::Missing {
            return Err(PlotError::Unavailable);
        }

        let chosen = selection.apply(doc);
        if let Some(labels) = &opts.labels {
            if labels.len() != chosen.len() {
                return Err(PlotError::LabelCountMismatch {
                    expected: chosen.len(),
                    given: labels.len(),
                });
            }
        }

        let palette = generate_palette(chosen.len());
        let lines = chosen
            .iter()
            .zip(palette)
            .enumerate()
            .map(|(i, (series, color))| {
                let label = opts
                    .labels
                    .as_ref()
                    .and_then(|l| l.get(i).cloned())
                    .unwrap_or_else(|| series.name.clone());
                let points = series
                    .points()
                    .map(|(x, y)| [opts.scale.x * x, opts.scale.y * y])
                    .collect();
                ChartLine {
                    label,
                    points,
                    color,
                }
            })
            .collect();

        Ok(Chart {
            title: doc.title.clone(),
            axis_labels: opts.axis_labels.clone(),
            legend_anchor: opts.legend_anchor,
            lines,
        })
    }

    /// Padded x and y ranges covering every finite point.
    pub fn bounds(&self) -> (Range<f64>, Range<f64>) {
        let finite = || {
            self.lines
                .iter()
                .flat_map(|l| l.points.iter())
                .filter(|p| p[0].is_finite() && p[1].is_finite())
        };
        let xs = min_max(finite().map(|p| p[0]));
        let ys = min_max(finite().map(|p| p[1]));
        (padded(xs), padded(ys))
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Largest magnitude an axis end may take, so the span stays finite.
const AXIS_LIMIT: f64 = f64::MAX / 4.0;

fn padded(range: Option<(f64, f64)>) -> Range<f64> {
    match range {
        None => 0.0..1.0,
        Some((lo, hi)) => {
            let lo = lo.clamp(-AXIS_LIMIT, AXIS_LIMIT);
            let hi = hi.clamp(-AXIS_LIMIT, AXIS_LIMIT);
            if lo == hi {
                let pad = (lo.abs() * 0.05).max(0.5);
                return (lo - pad)..(hi + pad);
            }
            let pad = (hi - lo) * 0.05;
            (lo - pad)..(hi + pad)
        }
    }
}

/// Top-left pixel of a legend box whose upper-right corner sits at `anchor`
/// (fractions of the plotting area, y pointing up), clamped inside the area.
pub fn legend_origin(anchor: Pair, area: (u32, u32), size: (u32, u32)) -> (i32, i32) {
    let (w, h) = (f64::from(area.0), f64::from(area.1));
    let right = anchor.x * w;
    let top = (1.0 - anchor.y) * h;
    let max_x = (w - f64::from(size.0)).max(0.0);
    let max_y = (h - f64::from(size.1)).max(0.0);
    let x = (right - f64::from(size.0)).clamp(0.0, max_x);
    let y = top.clamp(0.0, max_y);
    (x.round() as i32, y.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Series;

    fn doc() -> Document {
        let mut a = Series::new("A");
        a.insert(4.0, 5.0);
        a.insert(6.0, 1.0);
        let mut b = Series::new("B");
        b.insert(0.0, 0.0);
        let c = Series::new("C");
        Document {
            title: "energy".into(),
            series: vec![a, b, c],
        }
    }

    #[test]
    fn scale_multiplies_coordinates() {
        let opts = ChartOptions {
            scale: Pair::new(2.0, 3.0),
            ..Default::default()
        };
        let chart = Chart::build(&doc(), &Selection::all(), &opts, Capability::Available).unwrap();
        assert_eq!(chart.lines[0].points, vec![[8.0, 15.0], [12.0, 3.0]]);
        assert_eq!(chart.title, "energy");
    }

    #[test]
    fn labels_replace_series_names() {
        let opts = ChartOptions {
            labels: Some(vec!["first".into(), "second".into()]),
            ..Default::default()
        };
        let sel = Selection::restrict_to(["A", "C"]);
        let chart = Chart::build(&doc(), &sel, &opts, Capability::Available).unwrap();
        let labels: Vec<_> = chart.lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, ["first", "second"]);
    }

    #[test]
    fn label_count_mismatch_is_reported() {
        let opts = ChartOptions {
            labels: Some(vec!["x".into(), "y".into()]),
            ..Default::default()
        };
        let err = Chart::build(&doc(), &Selection::all(), &opts, Capability::Available).unwrap_err();
        assert!(matches!(
            err,
            PlotError::LabelCountMismatch {
                expected: 3,
                given: 2
            }
        ));
    }

    #[test]
    fn missing_capability_is_reported() {
        let err = Chart::build(
            &doc(),
            &Selection::all(),
            &ChartOptions::default(),
            Capability::Missing,
        )
        .unwrap_err();
        assert!(matches!(err, PlotError::Unavailable));
        assert!(err.to_string().contains("--do_not_plot"));
    }

    #[test]
    fn bounds_are_padded() {
        let chart = Chart::build(
            &doc(),
            &Selection::all(),
            &ChartOptions::default(),
            Capability::Available,
        )
        .unwrap();
        let (x, y) = chart.bounds();
        assert!(x.start < 0.0 && x.end > 6.0);
        assert!(y.start < 0.0 && y.end > 5.0);

        let empty = Chart::build(
            &doc(),
            &Selection::restrict_to(["C"]),
            &ChartOptions::default(),
            Capability::Available,
        )
        .unwrap();
        assert_eq!(empty.bounds(), (0.0..1.0, 0.0..1.0));
    }

    #[test]
    fn bounds_stay_finite_for_extreme_values() {
        let mut a = Series::new("A");
        a.insert(-1e308, 1.0);
        a.insert(1e308, f64::MAX);
        let mut b = Series::new("B");
        b.insert(f64::MAX, f64::MAX);
        let doc = Document {
            title: String::new(),
            series: vec![a, b],
        };

        for sel in [Selection::restrict_to(["A"]), Selection::restrict_to(["B"])] {
            let chart =
                Chart::build(&doc, &sel, &ChartOptions::default(), Capability::Available).unwrap();
            let (x, y) = chart.bounds();
            for r in [x, y] {
                assert!(r.start.is_finite() && r.end.is_finite(), "{r:?}");
                assert!((r.end - r.start).is_finite(), "{r:?}");
                assert!(r.start < r.end, "{r:?}");
            }
        }
    }

    #[test]
    fn legend_sits_under_the_anchor() {
        assert_eq!(legend_origin(Pair::ONE, (800, 600), (100, 50)), (700, 0));
        assert_eq!(legend_origin(Pair::new(0.5, 0.5), (800, 600), (100, 50)), (300, 300));
        // Clamped inside the plotting area.
        assert_eq!(legend_origin(Pair::new(0.0, 0.0), (800, 600), (100, 50)), (0, 550));
        assert_eq!(legend_origin(Pair::new(2.0, 2.0), (800, 600), (100, 50)), (700, 0));
    }
}
