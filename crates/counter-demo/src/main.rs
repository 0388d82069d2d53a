use anyhow::{Context, Result};
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    Terminal,
};
use std::cell::Cell;
use std::io;
use std::rc::Rc;
use std::time::Duration;
use tiny_redux::{
    create_store_with, ApplyMiddleware, LoggerMiddleware, Props, Provider, Store, ThunkMiddleware,
};
use tiny_redux_config::DemoConfig;

mod actions;
mod controls;
mod logger;
mod reducer;
mod state;
mod views;

use actions::CounterAction;
use controls::Controls;
use reducer::counter_reducer;
use state::AppState;

const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    let config = DemoConfig::load();
    let log_file = logger::init(&config.log_level)?;

    log::info!("Starting counter-demo, logging to {}", log_file.display());
    log::debug!("Config: {:?}", config);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;
    let local = tokio::task::LocalSet::new();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let panic_hook = logger::route_panics(|message| log::error!("{}", message));

    let result = local.block_on(&runtime, run_app(&mut terminal, &config));

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    drop(panic_hook);

    if let Err(err) = &result {
        log::error!("counter-demo failed: {:#}", err);
    }

    log::info!("Exiting counter-demo");
    result
}

/// Store with the logger (when enabled) and thunk middleware
fn build_store(config: &DemoConfig) -> Result<Store<AppState, CounterAction>> {
    let mut middleware = ApplyMiddleware::new();

    if config.logger.enabled {
        let level = config.logger.level.parse().unwrap_or_else(|_| {
            log::warn!("Unknown logger level '{}', using info", config.logger.level);
            log::Level::Info
        });
        middleware = middleware.with(
            LoggerMiddleware::new()
                .with_level(level)
                .with_state(config.logger.log_state),
        );
    }
    middleware = middleware.with(ThunkMiddleware::new());

    create_store_with(counter_reducer(config.initial_count), middleware)
        .context("Failed to create store")
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &DemoConfig,
) -> Result<()> {
    let provider = Provider::new(build_store(config)?);

    let dirty = Rc::new(Cell::new(true));
    let observer = {
        let dirty = Rc::clone(&dirty);
        move || dirty.set(true)
    };

    let count = provider.use_selector(observer.clone(), |state: &AppState| state.count);
    let panel = provider.mount(&views::counter_panel(), observer);
    let own_props = Props::new()
        .with_value("title", "Counter")
        .with_value("step", config.step);

    let controls = Controls::new(provider.use_dispatch(), config.step, config.delay());

    loop {
        if dirty.replace(false) {
            terminal.draw(|frame| {
                views::render(frame, views::header(count.get()), panel.render(&own_props))
            })?;
        }

        if !provider.store().get_state().running {
            break;
        }

        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Err(err) = controls.handle_key(key.code) {
                    log::error!("Dispatch for {:?} failed: {}", key.code, err);
                }
            }
        }

        // Yield so delayed thunks can fire
        tokio::time::sleep(FRAME).await;
    }

    Ok(())
}
