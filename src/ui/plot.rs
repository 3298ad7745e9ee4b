use eframe::egui::{Color32, Ui};
use egui_plot::{Corner, Legend, Line, Plot, PlotPoints};

use crate::chart::{Chart, Pair};

// ---------------------------------------------------------------------------
// Chart plot (central panel)
// ---------------------------------------------------------------------------

/// Render every chart line in the central panel.
pub fn chart_plot(ui: &mut Ui, chart: &Chart) {
    let mut plot = Plot::new("agr_plot")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);

    if let Some(labels) = &chart.axis_labels {
        plot = plot
            .x_axis_label(labels.x.clone())
            .y_axis_label(labels.y.clone());
    }
    if let Some(anchor) = chart.legend_anchor {
        plot = plot.legend(Legend::default().position(legend_corner(anchor)));
    }

    plot.show(ui, |plot_ui| {
        for line in &chart.lines {
            let [r, g, b] = line.color;
            let points: PlotPoints = line.points.iter().copied().collect();

            plot_ui.line(
                Line::new(points)
                    .name(&line.label)
                    .color(Color32::from_rgb(r, g, b))
                    .width(1.5),
            );
        }
    });
}

/// egui_plot only docks legends in corners; pick the one nearest the anchor.
pub fn legend_corner(anchor: Pair) -> Corner {
    match (anchor.x >= 0.5, anchor.y >= 0.5) {
        (true, true) => Corner::RightTop,
        (false, true) => Corner::LeftTop,
        (true, false) => Corner::RightBottom,
        (false, false) => Corner::LeftBottom,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_snaps_to_nearest_corner() {
        assert!(matches!(legend_corner(Pair::ONE), Corner::RightTop));
        assert!(matches!(legend_corner(Pair::new(0.1, 0.9)), Corner::LeftTop));
        assert!(matches!(legend_corner(Pair::new(0.9, 0.0)), Corner::RightBottom));
        assert!(matches!(legend_corner(Pair::new(0.0, 0.2)), Corner::LeftBottom));
    }
}
