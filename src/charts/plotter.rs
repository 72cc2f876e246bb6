//! Chart Plotter Module
//! Time-series line chart for the filtered view using egui_plot.

use crate::data::{date_from_days, days_from_epoch, Metric, Observation};
use egui::Color32;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

/// Color palette for location lines
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219), // Blue
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(255, 87, 34),  // Deep Orange
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

/// One line per location: `[day-offset, metric value]` points in ascending
/// date order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub metric: Metric,
    pub series: Vec<(String, Vec<[f64; 2]>)>,
}

impl ChartData {
    /// Group the filtered view by location, in the order locations were
    /// selected, sorting each series by date. Raw points only: no
    /// aggregation, no interpolation, no smoothing.
    pub fn from_view(view: &[Observation], metric: Metric, fips_order: &[String]) -> Self {
        let mut series = Vec::new();
        for fips in fips_order {
            let mut points: Vec<(i64, f64)> = view
                .iter()
                .filter(|r| &r.fips == fips)
                .map(|r| (days_from_epoch(r.date), r.value(metric)))
                .collect();
            if points.is_empty() {
                continue;
            }
            points.sort_by_key(|&(day, _)| day);
            series.push((
                fips.clone(),
                points
                    .into_iter()
                    .map(|(day, v)| [day as f64, v])
                    .collect(),
            ));
        }
        Self { metric, series }
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Draws the interactive time-series chart.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Color for the location at `index` in selection order.
    pub fn series_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Draw the line chart: x = date, y = metric value, one colored line per
    /// location, legend on.
    pub fn draw_time_series(ui: &mut egui::Ui, chart_data: &ChartData) {
        Plot::new("metric_over_time")
            .height(400.0)
            .x_axis_label("Date")
            .y_axis_label(chart_data.metric.column())
            .allow_scroll(false)
            .legend(Legend::default())
            .x_axis_formatter(|mark, _range| {
                date_from_days(mark.value.round() as i64)
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default()
            })
            .label_formatter(|name, value| {
                let date = date_from_days(value.x.round() as i64)
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                if name.is_empty() {
                    format!("{}\n{:.3}", date, value.y)
                } else {
                    format!("{}\n{}\n{:.3}", name, date, value.y)
                }
            })
            .show(ui, |plot_ui| {
                for (idx, (fips, points)) in chart_data.series.iter().enumerate() {
                    let color = Self::series_color(idx);

                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(points.iter().copied()))
                            .color(color)
                            .width(1.5)
                            .name(fips),
                    );

                    plot_ui.points(
                        Points::new(PlotPoints::from_iter(points.iter().copied()))
                            .radius(2.5)
                            .color(color),
                    );
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn obs(fips: &str, d: NaiveDate, t2m: f64) -> Observation {
        Observation {
            fips: fips.to_string(),
            date: d,
            prectot: 0.0,
            t2m,
            t2m_max: 0.0,
            t2m_min: 0.0,
            ws10m: 0.0,
        }
    }

    #[test]
    fn test_two_point_line_for_single_location() {
        let view = vec![
            obs("A", date(2020, 1, 1), 10.0),
            obs("A", date(2020, 1, 2), 12.0),
        ];
        let chart = ChartData::from_view(&view, Metric::T2m, &["A".to_string()]);
        assert_eq!(chart.series.len(), 1);
        let (fips, points) = &chart.series[0];
        assert_eq!(fips, "A");
        assert_eq!(points.len(), 2);
        assert_eq!(points[0][1], 10.0);
        assert_eq!(points[1][1], 12.0);
        assert_eq!(points[1][0] - points[0][0], 1.0);
    }

    #[test]
    fn test_points_sorted_by_date_within_location() {
        let view = vec![
            obs("A", date(2020, 1, 3), 3.0),
            obs("A", date(2020, 1, 1), 1.0),
            obs("A", date(2020, 1, 2), 2.0),
        ];
        let chart = ChartData::from_view(&view, Metric::T2m, &["A".to_string()]);
        let values: Vec<f64> = chart.series[0].1.iter().map(|p| p[1]).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_series_follow_selection_order() {
        let view = vec![
            obs("B", date(2020, 1, 1), 5.0),
            obs("A", date(2020, 1, 1), 10.0),
        ];
        let order = vec!["A".to_string(), "B".to_string()];
        let chart = ChartData::from_view(&view, Metric::T2m, &order);
        assert_eq!(chart.series[0].0, "A");
        assert_eq!(chart.series[1].0, "B");
    }

    #[test]
    fn test_location_without_rows_is_skipped() {
        let view = vec![obs("A", date(2020, 1, 1), 10.0)];
        let order = vec!["A".to_string(), "Z".to_string()];
        let chart = ChartData::from_view(&view, Metric::T2m, &order);
        assert_eq!(chart.series.len(), 1);
    }

    #[test]
    fn test_empty_view_empty_chart() {
        let chart = ChartData::from_view(&[], Metric::Prectot, &["A".to_string()]);
        assert!(chart.is_empty());
    }

    #[test]
    fn test_series_colors_cycle() {
        assert_eq!(ChartPlotter::series_color(0), PALETTE[0]);
        assert_eq!(ChartPlotter::series_color(10), PALETTE[0]);
        assert_eq!(ChartPlotter::series_color(12), PALETTE[2]);
    }
}
