//! TUI rendering logic using Ratatui.

use super::app::App;
use crate::animation::format_thousands;
use crate::charts::{DepartmentBars, RDBU};
use crate::dashboard::{CAPTION, HEADING};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Map, MapResolution},
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph, Row,
        Table,
    },
    Frame,
};

/// Main draw function
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Length(5),  // KPI cards
            Constraint::Min(10),    // Bar + line charts
            Constraint::Min(12),    // Donut + map
            Constraint::Length(1),  // Footer
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);
    draw_cards(f, app, chunks[1]);
    draw_trends_row(f, app, chunks[2]);
    draw_types_map_row(f, app, chunks[3]);
    draw_footer(f, chunks[4]);
}

fn titled_block(title: &str, color: Color) -> Block<'_> {
    Block::default()
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(color).bold())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let status = match &app.error {
        Some(_) => Span::styled("● DISCONNECTED", Style::default().fg(Color::Red).bold()),
        None => Span::styled("● CONNECTED", Style::default().fg(Color::Green).bold()),
    };

    let updated = app
        .snapshot
        .as_ref()
        .map(|s| s.generated_at.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "N/A".to_string());

    let mut spans = vec![
        Span::styled(
            format!("  {}  ", HEADING),
            Style::default().fg(Color::Cyan).bold(),
        ),
        Span::raw(" │ "),
        status,
        Span::raw(" │ Updated: "),
        Span::styled(updated, Style::default().fg(Color::Yellow)),
    ];
    if let Some(error) = &app.error {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(error.clone(), Style::default().fg(Color::Red)));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

const CARD_COLORS: [Color; 5] = [
    Color::Green,
    Color::Yellow,
    Color::Cyan,
    Color::Magenta,
    Color::Blue,
];

fn draw_cards(f: &mut Frame, app: &App, area: Rect) {
    let Some(snapshot) = app.snapshot.as_ref() else {
        let empty = Paragraph::new("Waiting for dashboard data...")
            .style(Style::default().fg(Color::Gray))
            .block(titled_block("Overview", Color::Gray));
        f.render_widget(empty, area);
        return;
    };

    let count = snapshot.metrics.len().max(1) as u32;
    let constraints: Vec<Constraint> = (0..count).map(|_| Constraint::Ratio(1, count)).collect();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (i, entry) in snapshot.metrics.iter().enumerate() {
        let color = CARD_COLORS[i % CARD_COLORS.len()];
        let display = app.displays.get(i).cloned().unwrap_or_default();
        let card = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                display,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .centered(),
        ])
        .block(titled_block(&entry.label, color));
        f.render_widget(card, chunks[i]);
    }
}

fn draw_trends_row(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    draw_department_chart(f, app, chunks[0]);
    draw_yearly_chart(f, app, chunks[1]);
}

/// Parse a Plotly `rgb(r,g,b)` color, falling back to white
fn plotly_color(rgb: &str) -> Color {
    let parts: Vec<u8> = rgb
        .trim_start_matches("rgb(")
        .trim_end_matches(')')
        .split(',')
        .filter_map(|p| p.trim().parse().ok())
        .collect();
    match parts.as_slice() {
        [r, g, b] => Color::Rgb(*r, *g, *b),
        _ => Color::White,
    }
}

fn draw_department_chart(f: &mut Frame, app: &App, area: Rect) {
    let block = titled_block("Publications per Department", Color::Magenta);
    let Some(snapshot) = app.snapshot.as_ref() else {
        f.render_widget(block, area);
        return;
    };

    let bars: Vec<Bar> = snapshot
        .departments
        .departments
        .iter()
        .zip(&snapshot.departments.publications)
        .enumerate()
        .map(|(i, (dept, pubs))| {
            let color = plotly_color(DepartmentBars::color(i));
            Bar::default()
                .value(*pubs)
                .label(Line::from(dept.clone()))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color))
        })
        .collect();

    let bar_chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(5)
        .bar_gap(1);

    f.render_widget(bar_chart, area);
}

fn draw_yearly_chart(f: &mut Frame, app: &App, area: Rect) {
    let block = titled_block("Publications by Year", Color::Cyan);
    let Some(snapshot) = app.snapshot.as_ref() else {
        f.render_widget(block, area);
        return;
    };

    let points: Vec<(f64, f64)> = snapshot
        .yearly
        .years
        .iter()
        .zip(&snapshot.yearly.publications)
        .map(|(y, p)| (*y as f64, *p as f64))
        .collect();

    let x_min = points.first().map(|p| p.0).unwrap_or(0.0);
    let x_max = points.last().map(|p| p.0).unwrap_or(1.0);
    let y_max = points.iter().map(|p| p.1).fold(0.0_f64, f64::max);

    let datasets = vec![
        Dataset::default()
            .name("Publications")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&points),
        Dataset::default()
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::White))
            .data(&points),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("Year")
                .style(Style::default().fg(Color::Gray))
                .bounds([x_min, x_max])
                .labels(vec![
                    format!("{}", x_min),
                    format!("{}", (x_min + x_max) / 2.0),
                    format!("{}", x_max),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("Publications")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, y_max])
                .labels(vec!["0".to_string(), format!("{:.0}", y_max)]),
        );

    f.render_widget(chart, area);
}

fn draw_types_map_row(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    draw_publication_types(f, app, chunks[0]);
    draw_collaboration_map(f, app, chunks[1]);
}

fn draw_publication_types(f: &mut Frame, app: &App, area: Rect) {
    let block = titled_block("Distribution by Publication Type", Color::Yellow);
    let Some(snapshot) = app.snapshot.as_ref() else {
        f.render_widget(block, area);
        return;
    };

    let types = &snapshot.publication_types;
    let rows: Vec<Row> = types
        .labels
        .iter()
        .zip(&types.counts)
        .zip(types.percentages())
        .enumerate()
        .map(|(i, ((label, count), pct))| {
            let color = plotly_color(RDBU[i % RDBU.len()]);
            let bar = "█".repeat((pct / 5.0).round() as usize);
            Row::new(vec![
                Span::raw(label.clone()),
                Span::styled(format_thousands(*count), Style::default().fg(Color::White)),
                Span::styled(format!("{:.1}%", pct), Style::default().fg(color).bold()),
                Span::styled(bar, Style::default().fg(color)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(14),
            Constraint::Length(6),
            Constraint::Length(7),
            Constraint::Min(5),
        ],
    )
    .block(block);

    f.render_widget(table, area);
}

fn draw_collaboration_map(f: &mut Frame, app: &App, area: Rect) {
    let block = titled_block("Global Collaboration Map", Color::Green);
    let Some(snapshot) = app.snapshot.as_ref() else {
        f.render_widget(block, area);
        return;
    };

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([-180.0, 180.0])
        .y_bounds([-90.0, 90.0])
        .paint(|ctx| {
            ctx.draw(&Map {
                color: Color::DarkGray,
                resolution: MapResolution::High,
            });
            ctx.layer();
            for point in &snapshot.locations {
                ctx.print(
                    point.lon,
                    point.lat,
                    Span::styled(
                        format!("● {}", point.location),
                        Style::default().fg(Color::Yellow),
                    ),
                );
            }
        });

    f.render_widget(canvas, area);
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(vec![
        Span::styled(" q ", Style::default().fg(Color::Black).bg(Color::White)),
        Span::raw(" Quit  "),
        Span::styled(" r ", Style::default().fg(Color::Black).bg(Color::White)),
        Span::raw(" Refresh  "),
        Span::raw(" │ "),
        Span::raw(CAPTION),
    ]))
    .style(Style::default().fg(Color::Gray));

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plotly_color() {
        assert_eq!(plotly_color("rgb(141,211,199)"), Color::Rgb(141, 211, 199));
        assert_eq!(plotly_color("rgb(5, 48, 97)"), Color::Rgb(5, 48, 97));
        assert_eq!(plotly_color("teal"), Color::White);
    }
}
