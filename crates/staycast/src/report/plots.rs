use itertools_num::linspace;
use plotly::common::{DashType, Line, Marker, Mode};
use plotly::layout::{Axis, Layout};
use plotly::{HeatMap, Histogram, Plot, Scatter};

use crate::stats::residuals;

/// Plot the distribution of observed lengths of stay
pub fn plot_length_of_stay_histogram(length_of_stay: &[f32], title: &str) -> Plot {
    let trace = Histogram::new(length_of_stay.to_vec())
        .name("Length of Stay")
        .marker(Marker::new().color("skyblue"));

    let layout = Layout::new()
        .title(title)
        .x_axis(Axis::new().title("Length of Stay"))
        .y_axis(Axis::new().title("Frequency"));

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);
    plot
}

/// Plot a square correlation matrix as a heatmap
pub fn plot_correlation_heatmap(names: &[String], matrix: Vec<Vec<f64>>, title: &str) -> Plot {
    assert_eq!(names.len(), matrix.len(), "One name is required per matrix row");

    let trace = HeatMap::new(names.to_vec(), names.to_vec(), matrix).name("Correlation");

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(Layout::new().title(title));
    plot
}

fn bounds(values: &[f32]) -> (f64, f64) {
    values.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
        (lo.min(v as f64), hi.max(v as f64))
    })
}

/// Scatter of actual against predicted stays, with the `y = x` diagonal
pub fn plot_actual_vs_predicted(actual: &[f32], predicted: &[f32], title: &str) -> Plot {
    assert_eq!(actual.len(), predicted.len(), "Actual and predicted values must have the same length");

    let scatter = Scatter::new(actual.to_vec(), predicted.to_vec())
        .mode(Mode::Markers)
        .name("Test admissions")
        .marker(Marker::new().color("green").opacity(0.7));

    let mut plot = Plot::new();
    plot.add_trace(scatter);

    let (lo, hi) = bounds(actual);
    if lo.is_finite() && hi.is_finite() {
        let diagonal: Vec<f64> = linspace(lo, hi, 50).collect();
        plot.add_trace(
            Scatter::new(diagonal.clone(), diagonal)
                .mode(Mode::Lines)
                .name("y = x")
                .line(Line::new().color("black").dash(DashType::Dash)),
        );
    }

    plot.set_layout(
        Layout::new()
            .title(title)
            .x_axis(Axis::new().title("Actual Length of Stay"))
            .y_axis(Axis::new().title("Predicted Length of Stay")),
    );
    plot
}

/// Residuals (actual - predicted) against predicted stays, with a zero line
pub fn plot_residuals(actual: &[f32], predicted: &[f32], title: &str) -> Plot {
    let residual_values = residuals(actual, predicted);

    let scatter = Scatter::new(predicted.to_vec(), residual_values)
        .mode(Mode::Markers)
        .name("Residuals")
        .marker(Marker::new().color("red").opacity(0.7));

    let mut plot = Plot::new();
    plot.add_trace(scatter);

    let (lo, hi) = bounds(predicted);
    if lo.is_finite() && hi.is_finite() {
        plot.add_trace(
            Scatter::new(vec![lo, hi], vec![0.0, 0.0])
                .mode(Mode::Lines)
                .name("Zero")
                .line(Line::new().color("black").dash(DashType::Dash)),
        );
    }

    plot.set_layout(
        Layout::new()
            .title(title)
            .x_axis(Axis::new().title("Predicted Length of Stay"))
            .y_axis(Axis::new().title("Residuals")),
    );
    plot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actual_vs_predicted_has_diagonal() {
        let plot = plot_actual_vs_predicted(&[1.0, 4.0, 8.0], &[2.0, 4.5, 7.0], "Actual vs Predicted");
        let json = plot.to_json();
        assert!(json.contains("y = x"));
        assert!(json.contains("Test admissions"));
    }

    #[test]
    fn test_residuals_plot_skips_zero_line_when_empty() {
        let plot = plot_residuals(&[], &[], "Residuals Plot");
        assert!(!plot.to_json().contains("Zero"));
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_actual_vs_predicted_length_mismatch_panics() {
        let _ = plot_actual_vs_predicted(&[1.0], &[], "bad");
    }
}
