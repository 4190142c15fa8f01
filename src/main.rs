use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEventKind,
};
use crossterm::execute;
use map_quiz::app::{App, QuizColors};
use map_quiz::{data, ui};
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use std::time::Duration;

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("africa.geojson"));

    // Load before entering raw mode so loader errors print normally.
    let records = data::load_regions(&path)
        .with_context(|| format!("loading dataset {}", path.display()))?;

    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;

    // Enable mouse capture
    execute!(std::io::stdout(), EnableMouseCapture)?;

    // Run the app
    let result = run(&mut terminal, records);

    // Disable mouse capture and restore terminal
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

fn run(terminal: &mut DefaultTerminal, records: Vec<data::RegionRecord>) -> Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(
        records,
        size.width as usize,
        size.height as usize,
        QuizColors::default(),
    )?;

    loop {
        // Draw
        terminal.draw(|frame| ui::render(frame, &app))?;

        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events (not release)
                    if key.kind == KeyEventKind::Press {
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Esc => app.quit(),
                            KeyCode::Char('r') | KeyCode::Char('R') => app.restart_round(),
                            _ => {}
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                        app.handle_click(mouse.column, mouse.row);
                    }
                }
                Event::Resize(width, height) => {
                    app.resize(width as usize, height as usize)?;
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
