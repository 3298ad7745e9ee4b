use eframe::egui;

use crate::chart::{Chart, PlotError};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct AgrPlotApp {
    pub chart: Chart,
}

impl AgrPlotApp {
    pub fn new(chart: Chart) -> Self {
        Self { chart }
    }
}

impl eframe::App for AgrPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and summary ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.chart);
        });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::chart_plot(ui, &self.chart);
        });
    }
}

/// Open a window showing `chart` and block until it is closed.
pub fn show(chart: Chart) -> Result<(), PlotError> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };

    let window_title = if chart.title.is_empty() {
        "agr-plot".to_string()
    } else {
        format!("{} – agr-plot", chart.title)
    };

    eframe::run_native(
        &window_title,
        options,
        Box::new(move |_cc| Ok(Box::new(AgrPlotApp::new(chart)))),
    )
    .map_err(|e| PlotError::Window(e.to_string()))
}
