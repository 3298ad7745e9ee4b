use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::chart::{AxisLabels, ChartOptions, Pair};
use crate::data::filter::Selection;
use crate::export::ExportFormat;

/// Simple tool for plotting .agr (Grace) files created with VMD.
///
/// Plots the data in a window, or exports it to csv, svg, png or jpg.
#[derive(Parser, Debug)]
#[command(name = "agr-plot")]
pub struct Cli {
    /// Path to .agr file
    #[arg(value_name = "INPUT_FILE")]
    pub input_file: PathBuf,

    /// Skip plot generation (useful if plotting support is not available)
    #[arg(long = "do_not_plot")]
    pub do_not_plot: bool,

    /// Title to use instead of the one from the file
    #[arg(short = 't', long)]
    pub title: Option<String>,

    /// Text shown below the x axis
    #[arg(short = 'x', long = "axis_x", default_value = "frame")]
    pub axis_x: String,

    /// Text shown beside the y axis
    #[arg(short = 'y', long = "axis_y", default_value = "y")]
    pub axis_y: String,

    /// Only plot or export the named variables
    #[arg(short = 'r', long = "restrict_to", num_args = 1.., value_name = "NAME")]
    pub restrict_to: Option<Vec<String>>,

    /// Export to the given format as `<input file name>.<format>`
    #[arg(short = 'e', long, value_enum)]
    pub export: Option<ExportFormat>,

    /// Scale of the plot (two floats: x, y); not applied to csv
    #[arg(
        short = 's',
        long,
        num_args = 2,
        value_names = ["X", "Y"],
        default_values_t = [1.0, 1.0],
        allow_negative_numbers = true,
        action = ArgAction::Set
    )]
    pub scale: Vec<f64>,

    /// Position of the legend (two floats: x, y, as fractions of the axes)
    #[arg(
        short = 'l',
        long = "legend_position",
        num_args = 2,
        value_names = ["X", "Y"],
        default_values_t = [1.0, 1.0],
        allow_negative_numbers = true,
        action = ArgAction::Set
    )]
    pub legend_position: Vec<f64>,

    /// Text to use on labels instead of variable names
    #[arg(long, num_args = 1.., value_name = "LABEL")]
    pub labels: Option<Vec<String>>,
}

impl Cli {
    pub fn selection(&self) -> Selection {
        Selection::from_option(self.restrict_to.as_deref())
    }

    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            scale: Pair::from_slice(&self.scale).unwrap_or(Pair::ONE),
            axis_labels: Some(AxisLabels {
                x: self.axis_x.clone(),
                y: self.axis_y.clone(),
            }),
            legend_anchor: Some(Pair::from_slice(&self.legend_position).unwrap_or(Pair::ONE)),
            labels: self.labels.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["agr-plot", "rmsd.agr"]).unwrap();
        assert_eq!(cli.input_file, PathBuf::from("rmsd.agr"));
        assert!(!cli.do_not_plot);
        assert_eq!(cli.export, None);

        let opts = cli.chart_options();
        assert_eq!(opts.scale, Pair::ONE);
        assert_eq!(opts.legend_anchor, Some(Pair::ONE));
        assert_eq!(
            opts.axis_labels,
            Some(AxisLabels {
                x: "frame".into(),
                y: "y".into()
            })
        );
        assert_eq!(opts.labels, None);
        assert_eq!(cli.selection(), Selection::all());
    }

    #[test]
    fn full_flag_set() {
        let cli = Cli::try_parse_from([
            "agr-plot",
            "--do_not_plot",
            "-t",
            "My title",
            "-x",
            "time",
            "--axis_y",
            "RMSD",
            "-e",
            "svg",
            "-s",
            "0.5",
            "-2",
            "-l",
            "0.2",
            "0.8",
            "--labels",
            "one",
            "two",
            "-r",
            "A",
            "B",
            "--",
            "in.agr",
        ])
        .unwrap();

        assert!(cli.do_not_plot);
        assert_eq!(cli.title.as_deref(), Some("My title"));
        assert_eq!(cli.export, Some(ExportFormat::Svg));
        assert_eq!(cli.input_file, PathBuf::from("in.agr"));

        let opts = cli.chart_options();
        assert_eq!(opts.scale, Pair::new(0.5, -2.0));
        assert_eq!(opts.legend_anchor, Some(Pair::new(0.2, 0.8)));
        assert_eq!(opts.labels, Some(vec!["one".to_string(), "two".to_string()]));
        assert_eq!(
            opts.axis_labels,
            Some(AxisLabels {
                x: "time".into(),
                y: "RMSD".into()
            })
        );
        assert_eq!(cli.selection(), Selection::restrict_to(["A", "B"]));
    }

    #[test]
    fn rejects_unknown_export_format() {
        assert!(Cli::try_parse_from(["agr-plot", "-e", "pdf", "in.agr"]).is_err());
    }

    #[test]
    fn scale_needs_two_values() {
        assert!(Cli::try_parse_from(["agr-plot", "in.agr", "-s", "2"]).is_err());
    }
}
