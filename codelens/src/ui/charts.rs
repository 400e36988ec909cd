//! Chart renderers: maintainability gauge, trend sparkline, comparison bars.
//!
//! All three are derived, stateless encodings of analysis fields. Each
//! renders a defined placeholder when its input is absent rather than
//! failing. The series/bar builders are pure functions so the encodings are
//! unit-testable without a terminal.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Gauge, Paragraph, Sparkline},
};

use codelens_api::{AnalysisReport, ComplexityTrend, MetricsComparison};

use crate::theme::Theme;
use crate::ui::layout::panel_block;

/// Renders the 0–100 maintainability gauge, or a placeholder without a report.
pub fn render_maintainability_gauge(
    frame: &mut Frame,
    area: Rect,
    report: Option<&AnalysisReport>,
    theme: &Theme,
) {
    let block = panel_block(" Maintainability ", false, theme);
    match report {
        Some(report) => {
            let ratio = (report.maintainability / 100.0).clamp(0.0, 1.0);
            let gauge = Gauge::default()
                .block(block)
                .gauge_style(Style::default().fg(theme.gauge_fill))
                .ratio(ratio)
                .label(format!("{:.1} / 100", report.maintainability));
            frame.render_widget(gauge, area);
        }
        None => {
            frame.render_widget(
                Paragraph::new("no analysis yet")
                    .style(Style::default().fg(theme.dim))
                    .block(block),
                area,
            );
        }
    }
}

/// Synthesizes a short series visualizing a complexity trend.
///
/// The backend reports a coarse classification, not a time series, so the
/// sparkline encodes the shape of the trend anchored at the current
/// cyclomatic complexity. Unknown renders flat at zero.
pub fn trend_series(trend: ComplexityTrend, cyclomatic: u32) -> Vec<u64> {
    let base = u64::from(cyclomatic.max(1));
    match trend {
        ComplexityTrend::Stable => vec![base; 6],
        ComplexityTrend::SlightlyIncreasing => {
            (0..6).map(|i| base + i / 2).collect()
        }
        ComplexityTrend::Increasing => (0..6).map(|i| base + i).collect(),
        ComplexityTrend::Unknown => vec![0; 6],
    }
}

/// Renders the complexity-trend sparkline, or a placeholder without a report.
pub fn render_trend(
    frame: &mut Frame,
    area: Rect,
    report: Option<&AnalysisReport>,
    theme: &Theme,
) {
    let Some(report) = report else {
        frame.render_widget(
            Paragraph::new("no analysis yet")
                .style(Style::default().fg(theme.dim))
                .block(panel_block(" Trend ", false, theme)),
            area,
        );
        return;
    };

    let title = format!(" Trend: {:?} ", report.complexity_trend);
    let series = trend_series(report.complexity_trend, report.cyclomatic_complexity);
    let sparkline = Sparkline::default()
        .block(panel_block(&title, false, theme))
        .style(Style::default().fg(theme.trend))
        .data(&series);
    frame.render_widget(sparkline, area);
}

/// Builds the grouped (label, value) pairs for the A/B comparison chart.
///
/// Returns one group per metric with both versions' values, so regressions
/// read as the right bar overtopping the left.
pub fn comparison_pairs(cmp: &MetricsComparison) -> Vec<(String, u64, u64)> {
    vec![
        (
            "cyclo".to_owned(),
            u64::from(cmp.a.cyclomatic_complexity),
            u64::from(cmp.b.cyclomatic_complexity),
        ),
        (
            "maint".to_owned(),
            cmp.a.maintainability.clamp(0.0, 100.0).round() as u64,
            cmp.b.maintainability.clamp(0.0, 100.0).round() as u64,
        ),
        (
            "risk".to_owned(),
            cmp.a.risk_score.max(0) as u64,
            cmp.b.risk_score.max(0) as u64,
        ),
    ]
}

/// Renders the per-metric A/B bar chart, or a placeholder when the compare
/// response carried no metrics comparison.
pub fn render_comparison_bars(
    frame: &mut Frame,
    area: Rect,
    cmp: Option<&MetricsComparison>,
    theme: &Theme,
) {
    let block = panel_block(" Metrics A / B ", false, theme);
    let Some(cmp) = cmp else {
        frame.render_widget(
            Paragraph::new("no metrics in this comparison")
                .style(Style::default().fg(theme.dim))
                .block(block),
            area,
        );
        return;
    };

    let mut chart = BarChart::default().block(block).bar_width(7).group_gap(2);
    for (label, a, b) in comparison_pairs(cmp) {
        let bars = [
            Bar::default()
                .value(a)
                .text_value(format!("A {a}"))
                .style(Style::default().fg(theme.bars_a)),
            Bar::default()
                .value(b)
                .text_value(format!("B {b}"))
                .style(Style::default().fg(theme.bars_b)),
        ];
        chart = chart.data(BarGroup::default().label(Line::from(label)).bars(&bars));
    }
    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use codelens_api::{MetricsDelta, VersionMetrics};

    #[test]
    fn stable_trend_is_flat() {
        let series = trend_series(ComplexityTrend::Stable, 4);
        assert!(series.iter().all(|v| *v == 4));
    }

    #[test]
    fn increasing_trend_is_monotonic() {
        let series = trend_series(ComplexityTrend::Increasing, 3);
        assert!(series.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(series[0], 3);
    }

    #[test]
    fn unknown_trend_renders_flat_zero() {
        assert!(trend_series(ComplexityTrend::Unknown, 10).iter().all(|v| *v == 0));
    }

    #[test]
    fn zero_complexity_does_not_produce_an_empty_series() {
        let series = trend_series(ComplexityTrend::Stable, 0);
        assert_eq!(series.len(), 6);
        assert!(series.iter().all(|v| *v >= 1));
    }

    #[test]
    fn comparison_pairs_cover_each_metric_for_both_versions() {
        let cmp = MetricsComparison {
            a: VersionMetrics {
                cyclomatic_complexity: 2,
                maintainability: 90.4,
                risk_score: 3,
                ..VersionMetrics::default()
            },
            b: VersionMetrics {
                cyclomatic_complexity: 7,
                maintainability: 61.8,
                risk_score: 12,
                ..VersionMetrics::default()
            },
            delta: MetricsDelta::default(),
        };

        let pairs = comparison_pairs(&cmp);
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0], ("cyclo".to_owned(), 2, 7));
        assert_eq!(pairs[1], ("maint".to_owned(), 90, 62));
        assert_eq!(pairs[2], ("risk".to_owned(), 3, 12));
    }

    #[test]
    fn comparison_chart_draws_labelled_groups() {
        use ratatui::backend::TestBackend;
        use ratatui::Terminal;

        let theme = Theme::dark();
        let cmp = MetricsComparison {
            a: VersionMetrics { cyclomatic_complexity: 2, ..VersionMetrics::default() },
            b: VersionMetrics { cyclomatic_complexity: 7, ..VersionMetrics::default() },
            delta: MetricsDelta::default(),
        };

        let mut terminal = Terminal::new(TestBackend::new(60, 14)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_comparison_bars(frame, area, Some(&cmp), &theme);
            })
            .unwrap();

        let rendered: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(rendered.contains("cyclo"), "group label rendered");
        assert!(rendered.contains("Metrics A / B"), "panel title rendered");
    }

    #[test]
    fn comparison_chart_without_metrics_renders_the_placeholder() {
        use ratatui::backend::TestBackend;
        use ratatui::Terminal;

        let theme = Theme::dark();
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_comparison_bars(frame, area, None, &theme);
            })
            .unwrap();

        let rendered: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(rendered.contains("no metrics in this comparison"));
    }

    #[test]
    fn negative_risk_scores_clamp_to_zero() {
        let cmp = MetricsComparison {
            a: VersionMetrics { risk_score: -5, ..VersionMetrics::default() },
            ..MetricsComparison::default()
        };
        let pairs = comparison_pairs(&cmp);
        assert_eq!(pairs[2].1, 0);
    }
}
