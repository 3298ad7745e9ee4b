use eframe::egui::{RichText, Ui};

use crate::chart::Chart;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the chart title and a short summary of what is plotted.
pub fn top_bar(ui: &mut Ui, chart: &Chart) {
    ui.horizontal(|ui: &mut Ui| {
        if chart.title.is_empty() {
            ui.label(RichText::new("(untitled)").italics());
        } else {
            ui.heading(chart.title.as_str());
        }

        ui.separator();

        ui.label(summary(chart));
    });
}

fn summary(chart: &Chart) -> String {
    let points: usize = chart.lines.iter().map(|l| l.points.len()).sum();
    format!("{} series, {} points", chart.lines.len(), points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartLine;

    #[test]
    fn summary_counts_series_and_points() {
        let chart = Chart {
            title: "t".into(),
            axis_labels: None,
            legend_anchor: None,
            lines: vec![
                ChartLine {
                    label: "a".into(),
                    points: vec![[0.0, 1.0], [1.0, 2.0]],
                    color: [0, 0, 0],
                },
                ChartLine {
                    label: "b".into(),
                    points: vec![[0.0, 1.0]],
                    color: [0, 0, 0],
                },
            ],
        };
        assert_eq!(summary(&chart), "2 series, 3 points");
    }
}
