use std::io::{self, Stdout};
use std::path::PathBuf;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tracing::info;

use scrollkit_core::{AppConfig, HeaderMode, RowInput};
use scrollkit_tui::{
    demo::{generate_rows, terminal_config},
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    widgets::{ListViewWidget, StatusBarWidget},
    App,
};

pub struct RunOptions {
    pub rows: usize,
    pub sections: usize,
    pub file: Option<PathBuf>,
    pub header_mode: Option<HeaderMode>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            rows: 10_000,
            sections: 0,
            file: None,
            header_mode: None,
        }
    }
}

pub fn run(config: AppConfig, options: RunOptions) -> Result<()> {
    let mut config = terminal_config(&config);
    if let Some(mode) = options.header_mode {
        config.viewport.header_mode = mode;
    }

    let rows = match &options.file {
        Some(path) => RowInput::load(path)
            .with_context(|| format!("Failed to load rows from {}", path.display()))?,
        None => generate_rows(options.rows, options.sections),
    };

    let event_handler =
        EventHandler::with_animation_fps(config.demo.tick_rate_ms, config.scroll.animation_fps);

    // Build the app before touching the terminal so input errors print normally
    let mut app = App::new(config, rows)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("scrollkit"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app, &event_handler);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("demo closed");
    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    // Checked at the end of each iteration to pick the next poll interval
    let mut needs_fast_update = false;

    loop {
        app.tick();

        terminal.draw(|frame| {
            let size = frame.area();
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(size);

            // Re-measure every frame; the controller ignores unchanged sizes
            app.resize(main_layout[0]);
            ListViewWidget::render(frame, app);
            StatusBarWidget::render(frame, main_layout[1], app);
        })?;

        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app);
                    app.apply_action(action);
                }
                AppEvent::Mouse(mouse) => app.handle_mouse(mouse),
                // The next draw measures the new size
                AppEvent::Resize(_, _) => {}
                AppEvent::Tick => {}
            }
        }

        needs_fast_update = app.needs_fast_update();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
