use crate::app::App;
use crate::map::MapLayers;
use crate::risk::model::RiskArea;
use crate::risk::style::{self, GREEN, RED, YELLOW};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 44;
const LEGEND_WIDTH: u16 = 24;
const LEGEND_HEIGHT: u16 = 5;
const CORRIDOR_WIDTH: u16 = 46;

/// Split the screen into sidebar, map and status bar
fn layout(area: Rect) -> (Rect, Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Sidebar + map
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)])
        .split(rows[0]);

    (cols[0], cols[1], rows[1])
}

fn map_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Global Maritime Risk Map ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
}

/// Cells available to the braille map for a given terminal area
pub fn map_inner(area: Rect) -> Rect {
    let (_, map, _) = layout(area);
    map_block().inner(map)
}

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if let Some(risk) = app.detail_area() {
        render_detail(frame, app, risk, area);
        return;
    }

    let (sidebar, map, status) = layout(area);
    render_sidebar(frame, app, sidebar);
    render_map(frame, app, map);
    render_status_bar(frame, app, status);
}

fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(" Key Risks ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)));

    let focused = app.focused_index();
    let mut lines = Vec::new();

    for (i, risk) in app.risk_areas.iter().enumerate() {
        let is_focused = focused == Some(i);
        let color = style::risk_color(risk.id);
        let name_style = if is_focused {
            Style::default().fg(color).add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(color)
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", i + 1), Style::default().fg(Color::DarkGray)),
            Span::styled("● ", Style::default().fg(color)),
            Span::styled(risk.name, name_style),
        ]));
        lines.push(Line::from(vec![
            Span::raw("     "),
            Span::styled(format!("{} {}/100", risk.level, risk.score), Style::default().fg(color)),
            Span::styled(format!("  {} routes", risk.affected_routes), Style::default().fg(Color::DarkGray)),
        ]));
        if is_focused {
            for detail in risk.details {
                lines.push(Line::from(vec![
                    Span::styled("  • ", Style::default().fg(color)),
                    Span::styled(*detail, Style::default().fg(Color::Gray)),
                ]));
            }
            let hint = if risk.has_detail_page {
                Span::styled("  Enter: detailed analysis", Style::default().fg(Color::Cyan))
            } else {
                Span::styled("  Detailed analysis (coming soon)", Style::default().fg(Color::DarkGray))
            };
            lines.push(Line::from(hint));
        }
        lines.push(Line::default());
    }

    let help = [
        ("1-9/Tab", "focus risk"),
        ("Enter", "details"),
        ("click", "select marker"),
        ("drag/hjkl", "pan"),
        ("+/-", "zoom"),
        ("r", "reset view"),
        ("t/c/L", "routes/coast/labels"),
        ("q", "quit"),
    ];
    for (key, action) in help {
        lines.push(Line::from(vec![
            Span::styled(format!(" {key:>9} "), Style::default().fg(Color::Yellow)),
            Span::styled(action, Style::default().fg(Color::DarkGray)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let block = map_block();
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Braille gives 2x4 resolution per character
    let mut viewport = app.viewport.clone();
    viewport.width = inner.width as usize * 2;
    viewport.height = inner.height as usize * 4;

    let layers = app
        .map_renderer
        .render(inner.width as usize, inner.height as usize, &viewport, app.scene());

    let map_widget = MapWidget {
        layers,
        cursor_pos: app.mouse_cell_in_map(),
    };
    frame.render_widget(map_widget, inner);

    render_legend(frame, inner);
    if let Some(risk) = app.focused_area() {
        render_corridors(frame, app, risk, inner);
    }
}

/// Custom widget that renders the braille map with text labels overlaid
struct MapWidget {
    layers: MapLayers,
    cursor_pos: Option<(u16, u16)>,
}

impl MapWidget {
    /// Copy a canvas into the buffer; empty cells leave what is underneath
    fn render_canvas(canvas: &crate::braille::BrailleCanvas, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            for col in 0..area.width {
                if let Some((ch, color)) = canvas.cell(col as usize, row as usize) {
                    buf[(area.x + col, area.y + row)].set_char(ch).set_fg(color);
                }
            }
        }
    }
}

impl Widget for MapWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Basemap at the back, scene on top
        Self::render_canvas(&self.layers.basemap, area, buf);
        Self::render_canvas(&self.layers.overlay, area, buf);

        for label in &self.layers.labels {
            if label.y >= area.height || label.x >= area.width {
                continue;
            }
            let y = area.y + label.y;
            let max_len = (area.width - label.x) as usize;
            let style = Style::default().fg(label.color).add_modifier(Modifier::BOLD);

            for (i, ch) in label.text.chars().take(max_len).enumerate() {
                buf[(area.x + label.x + i as u16, y)].set_char(ch).set_style(style);
            }
        }

        if let Some((cx, cy)) = self.cursor_pos {
            if cx < area.width && cy < area.height {
                buf[(area.x + cx, area.y + cy)].set_char('╋').set_fg(Color::Red);
            }
        }
    }
}

/// Risk color key in the bottom-right corner of the map
fn render_legend(frame: &mut Frame, map: Rect) {
    if map.width < LEGEND_WIDTH + 2 || map.height < LEGEND_HEIGHT + 2 {
        return;
    }
    let area = Rect::new(
        map.x + map.width - LEGEND_WIDTH - 1,
        map.y + map.height - LEGEND_HEIGHT - 1,
        LEGEND_WIDTH,
        LEGEND_HEIGHT,
    );

    let entry = |color: Color, text: &'static str| {
        Line::from(vec![
            Span::styled(" ● ", Style::default().fg(color)),
            Span::styled(text, Style::default().fg(Color::Gray)),
        ])
    };
    let lines = vec![
        entry(RED, "Critical (80-100)"),
        entry(YELLOW, "Elevated (50-79)"),
        entry(GREEN, "Normal (0-49)"),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(" Risk Level ", Style::default().fg(Color::White)));

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Affected corridors of the focused risk, top-right of the map
fn render_corridors(frame: &mut Frame, app: &App, risk: &RiskArea, map: Rect) {
    let routes = app.active_routes();
    let height = routes.len() as u16 + 4;
    let width = CORRIDOR_WIDTH.min(map.width.saturating_sub(2));
    if width < 20 || map.height < height + LEGEND_HEIGHT + 2 {
        return;
    }
    let area = Rect::new(map.x + map.width - width - 1, map.y + 1, width, height);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Showing {} affected shipping corridors", routes.len()),
            Style::default().fg(Color::Gray),
        )),
        Line::default(),
    ];
    for route in &routes {
        let (red, green, blue) = route.color;
        let color = Color::Rgb(red, green, blue);
        lines.push(Line::from(vec![
            Span::styled("━━ ", Style::default().fg(color)),
            Span::styled(route.name, Style::default().fg(Color::White)),
            Span::styled(format!("  {}", route.affected_volume), Style::default().fg(color)),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(style::risk_color(risk.id)))
        .title(Span::styled(
            format!(" {} Impact ", risk.name),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Full-screen page for a key risk
fn render_detail(frame: &mut Frame, app: &App, risk: &RiskArea, area: Rect) {
    let color = style::risk_color(risk.id);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Level: ", Style::default().fg(Color::DarkGray)),
            Span::styled(risk.level, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::styled("   Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{}/100", risk.score), Style::default().fg(color)),
            Span::styled("   Location: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{:.2}, {:.2}", risk.coordinates.lat, risk.coordinates.lon),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::default(),
        Line::from(Span::styled("Assessment", Style::default().fg(Color::White).add_modifier(Modifier::BOLD))),
    ];
    for detail in risk.details {
        lines.push(Line::from(vec![
            Span::styled("  • ", Style::default().fg(color)),
            Span::raw(*detail),
        ]));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!("Affected corridors ({})", risk.affected_routes),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )));
    for route in crate::risk::catalog::routes_for(risk.id) {
        let (red, green, blue) = route.color;
        lines.push(Line::from(vec![
            Span::styled("  ━━ ", Style::default().fg(Color::Rgb(red, green, blue))),
            Span::raw(route.name),
            Span::styled(format!("  {}", route.affected_volume), Style::default().fg(Color::DarkGray)),
        ]));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Esc/b: back to map", Style::default().fg(Color::DarkGray))));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(" {} Risk Assessment ", risk.name),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Span::styled(format!(" {} ", app.zoom_level()), Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let settings = &app.map_renderer.settings;
    let toggle = |on: bool, on_text: &'static str, off_text: &'static str| {
        Span::styled(
            if on { on_text } else { off_text },
            Style::default().fg(if on { Color::Green } else { Color::DarkGray }),
        )
    };

    let mut spans = vec![
        Span::styled(" Zoom: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.zoom_level(), Style::default().fg(Color::Yellow)),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.center_coords(), Style::default().fg(Color::Cyan)),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        toggle(settings.show_routes, "[T]routes ", "[t]routes "),
        toggle(settings.show_coastlines, "[C]oast ", "[c]oast "),
        toggle(settings.show_labels, "[L]abels ", "[l]abels "),
    ];

    if let Some(click) = &app.last_click {
        let color = if click.risk >= 80 {
            RED
        } else if click.risk >= style::ELEVATED_THRESHOLD {
            YELLOW
        } else {
            GREEN
        };
        spans.push(Span::styled("| ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(click.name.clone(), Style::default().fg(Color::White)));
        spans.push(Span::styled(format!(" risk {}", click.risk), Style::default().fg(color)));
        spans.push(Span::styled(
            format!(" ({:.2}, {:.2})", click.lat, click.lon),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
