use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
};

use crate::insights::PlayerInsight;
use crate::player_stats::PlayerStatRow;
use crate::team_stats::TeamAverage;

pub const SKY_BLUE: Color = Color::Rgb(135, 206, 235);
pub const INSIGHT_COLORS: [Color; 4] = [
    Color::Rgb(0x34, 0x98, 0xdb),
    Color::Rgb(0xe7, 0x4c, 0x3c),
    Color::Rgb(0x2e, 0xcc, 0x71),
    Color::Rgb(0xf3, 0x9c, 0x12),
];

// Bar heights are integers; keep one decimal of resolution.
const BAR_SCALE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub body: FigureBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FigureBody {
    /// Vertical bars, one per label.
    Columns { bars: Vec<(String, f64)>, color: Color },
    /// Horizontal bars with a per-bar annotation.
    LabelledBars { bars: Vec<LabelledBar> },
    Scatter { points: Vec<(f64, f64)>, color: Color },
    /// Line through the points with a marker on each point.
    Trend { points: Vec<(f64, f64)>, color: Color },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelledBar {
    pub label: String,
    pub value: f64,
    pub annotation: String,
    pub color: Color,
}

pub fn team_averages_figure(teams: &[TeamAverage]) -> Figure {
    Figure {
        title: "Average Points per Match for Each Team (2014-2019)".to_string(),
        x_label: "Teams".to_string(),
        y_label: "Average Points per Match".to_string(),
        body: FigureBody::Columns {
            bars: teams
                .iter()
                .map(|t| (t.team.clone(), t.avg_points))
                .collect(),
            color: SKY_BLUE,
        },
    }
}

pub fn player_insights_figure(insights: &[PlayerInsight]) -> Figure {
    Figure {
        title: "Top Player Performances in Pro Kabaddi League (2014-2019)".to_string(),
        x_label: "Performance Metric Value".to_string(),
        y_label: "Category".to_string(),
        body: FigureBody::LabelledBars {
            bars: insights
                .iter()
                .zip(INSIGHT_COLORS.iter().cycle())
                .map(|(insight, color)| LabelledBar {
                    label: insight.category.label().to_string(),
                    value: insight.value,
                    annotation: insight.player.clone(),
                    color: *color,
                })
                .collect(),
        },
    }
}

pub fn raid_vs_tackle_figure(rows: &[PlayerStatRow]) -> Figure {
    Figure {
        title: "Raid Points vs. Tackle Points (Player Performance)".to_string(),
        x_label: "Raid Points per Match".to_string(),
        y_label: "Tackle Points".to_string(),
        body: FigureBody::Scatter {
            points: rows
                .iter()
                .map(|r| (r.raid_points_per_match, r.tackle_points))
                .collect(),
            color: Color::Red,
        },
    }
}

pub fn success_vs_points_figure(rows: &[PlayerStatRow]) -> Figure {
    Figure {
        title: "Success Raid % vs. Total Points (Best Raiders)".to_string(),
        x_label: "Success Raid %".to_string(),
        y_label: "Total Points".to_string(),
        body: FigureBody::Scatter {
            points: rows
                .iter()
                .map(|r| (r.success_raid_percent, r.total_points))
                .collect(),
            color: Color::Green,
        },
    }
}

/// Grouped by matches played; the title still says seasons.
pub fn matches_played_trend_figure(series: &[(f64, f64)]) -> Figure {
    Figure {
        title: "Team Performance Trends Over Seasons".to_string(),
        x_label: "Matches Played".to_string(),
        y_label: "Average Total Points".to_string(),
        body: FigureBody::Trend {
            points: series.to_vec(),
            color: Color::Blue,
        },
    }
}

pub fn draw_figure(frame: &mut Frame, figure: &Figure) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.size());

    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        figure.title.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    let inner = block.inner(chunks[0]);
    frame.render_widget(block, chunks[0]);

    match &figure.body {
        FigureBody::Columns { bars, color } => draw_columns(frame, inner, figure, bars, *color),
        FigureBody::LabelledBars { bars } => draw_labelled_bars(frame, inner, figure, bars),
        FigureBody::Scatter { points, color } => draw_xy(frame, inner, figure, points, *color, false),
        FigureBody::Trend { points, color } => draw_xy(frame, inner, figure, points, *color, true),
    }

    let footer = Paragraph::new("q / Esc / Enter: close chart")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[1]);
}

fn caption_and_body(area: Rect) -> (Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);
    (rows[0], rows[1])
}

fn draw_columns(frame: &mut Frame, area: Rect, figure: &Figure, bars: &[(String, f64)], color: Color) {
    let (caption, body) = caption_and_body(area);
    frame.render_widget(
        Paragraph::new(format!("y: {}   x: {}", figure.y_label, figure.x_label)),
        caption,
    );

    // Labels are cut to the bar width; there is no rotated text in a terminal.
    let n = bars.len().max(1) as u16;
    let bar_width = (body.width / n).saturating_sub(1).clamp(1, 9);
    let data: Vec<Bar> = bars
        .iter()
        .map(|(label, value)| {
            Bar::default()
                .value(scaled(*value))
                .text_value(format!("{value:.1}"))
                .label(Line::from(label.clone()))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&data))
        .bar_width(bar_width)
        .bar_gap(1);
    frame.render_widget(chart, body);
}

fn draw_labelled_bars(frame: &mut Frame, area: Rect, figure: &Figure, bars: &[LabelledBar]) {
    let (caption, body) = caption_and_body(area);
    frame.render_widget(Paragraph::new(format!("x: {}", figure.x_label)), caption);

    let data: Vec<Bar> = bars
        .iter()
        .map(|bar| {
            Bar::default()
                .value(scaled(bar.value))
                .text_value(format!("{:.1}", bar.value))
                .label(Line::from(vec![
                    Span::raw(format!("{} ", bar.label)),
                    Span::styled(
                        bar.annotation.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]))
                .style(Style::default().fg(bar.color))
                .value_style(Style::default().fg(Color::Black).bg(bar.color))
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&data))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(1);
    frame.render_widget(chart, body);
}

fn draw_xy(
    frame: &mut Frame,
    area: Rect,
    figure: &Figure,
    points: &[(f64, f64)],
    color: Color,
    with_line: bool,
) {
    let x_bounds = padded_bounds(points.iter().map(|p| p.0));
    let y_bounds = padded_bounds(points.iter().map(|p| p.1));
    let style = Style::default().fg(color);

    let mut datasets = Vec::new();
    if with_line {
        datasets.push(
            Dataset::default()
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(style)
                .data(points),
        );
    }
    datasets.push(
        Dataset::default()
            .marker(if with_line { Marker::Block } else { Marker::Dot })
            .graph_type(GraphType::Scatter)
            .style(style)
            .data(points),
    );

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title(figure.x_label.as_str())
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds)),
        )
        .y_axis(
            Axis::default()
                .title(figure.y_label.as_str())
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds)),
        );
    frame.render_widget(chart, area);
}

fn scaled(value: f64) -> u64 {
    (value.max(0.0) * BAR_SCALE).round() as u64
}

/// Data range widened by 5% on each side; a flat or empty range gets a unit margin.
pub fn padded_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return [0.0, 1.0];
    }
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 1.0 };
    [lo - pad, hi + pad]
}

fn axis_labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .iter()
        .map(|v| Span::raw(format!("{v:.1}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_pad_range() {
        let b = padded_bounds([0.0, 10.0].into_iter());
        assert!((b[0] + 0.5).abs() < 1e-9);
        assert!((b[1] - 10.5).abs() < 1e-9);
    }

    #[test]
    fn bounds_handle_flat_and_empty() {
        assert_eq!(padded_bounds([3.0].into_iter()), [2.0, 4.0]);
        assert_eq!(padded_bounds(std::iter::empty::<f64>()), [0.0, 1.0]);
    }

    #[test]
    fn scaled_keeps_one_decimal() {
        assert_eq!(scaled(35.0), 350);
        assert_eq!(scaled(8.26), 83);
        assert_eq!(scaled(-2.0), 0);
    }
}
