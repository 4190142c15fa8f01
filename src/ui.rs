use crate::app::App;
use crate::braille::BrailleCanvas;
use crate::map::{render_layers, MapLayers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Split into map area and status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Map
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_map(frame, app, chunks[0]);
    render_status_bar(frame, app, chunks[1]);
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" Click on: {} ", app.prompt()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layers = render_layers(
        app.engine.regions(),
        inner.width as usize,
        inner.height as usize,
    );

    let widget = MapWidget {
        layers,
        correct_color: app.colors.correct,
        incorrect_color: app.colors.incorrect,
    };
    frame.render_widget(widget, inner);
}

/// Braille map layers with region labels overlaid.
struct MapWidget {
    layers: MapLayers,
    correct_color: Color,
    incorrect_color: Color,
}

impl MapWidget {
    /// Render one Braille canvas layer in a single color.
    fn render_layer(canvas: &BrailleCanvas, color: Color, area: Rect, buf: &mut Buffer) {
        for (row_idx, row_str) in canvas.rows().enumerate() {
            if row_idx >= area.height as usize {
                break;
            }
            let y = area.y + row_idx as u16;

            for (col_idx, ch) in row_str.chars().enumerate() {
                if col_idx >= area.width as usize {
                    break;
                }
                // Skip empty braille characters (U+2800)
                if ch == '\u{2800}' {
                    continue;
                }
                let x = area.x + col_idx as u16;
                buf[(x, y)].set_char(ch).set_fg(color);
            }
        }
    }
}

impl Widget for MapWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Back to front: fills first, outlines on top so borders stay crisp.
        Self::render_layer(&self.layers.correct, self.correct_color, area, buf);
        Self::render_layer(&self.layers.incorrect, self.incorrect_color, area, buf);
        Self::render_layer(&self.layers.outlines, Color::Cyan, area, buf);

        let label_style = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        for (lx, ly, text) in &self.layers.labels {
            if *lx >= area.width || *ly >= area.height {
                continue;
            }

            let x = area.x + *lx;
            let y = area.y + *ly;

            // Truncate to fit the remaining row.
            let max_len = (area.width - *lx) as usize;
            for (i, ch) in text.chars().take(max_len).enumerate() {
                buf[(x + i as u16, y)].set_char(ch).set_style(label_style);
            }
        }
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (resolved, total) = app.engine.progress();

    let status = Line::from(vec![
        Span::styled(
            format!(" {resolved}/{total} "),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled("| ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.status.clone(), Style::default().fg(Color::White)),
        Span::styled(
            " | click:answer r:new round q:quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let paragraph = Paragraph::new(status);
    frame.render_widget(paragraph, area);
}
