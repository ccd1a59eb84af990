//! City weather TUI

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventKind, EventOutcome,
    RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem};

use cityweather::action::Action;
use cityweather::api::{self, ProviderConfig, WeatherClient};
use cityweather::catalog::PlaceCatalog;
use cityweather::components::{AppView, AppViewProps, Component};
use cityweather::effect::Effect;
use cityweather::logging;
use cityweather::reducer::reducer;
use cityweather::state::{AppState, LOADING_ANIM_TICK_MS, UnitSystem};

/// Current weather for a fixed list of places
#[derive(Parser, Debug)]
#[command(name = "cityweather")]
#[command(about = "Pick a place, see its current weather")]
struct Args {
    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Provider base URL (the `/weather` endpoint is appended)
    #[arg(long, env = "OPENWEATHER_BASE_URL", default_value = api::DEFAULT_BASE_URL)]
    base_url: String,

    /// Units requested from the provider
    #[arg(long, value_enum, default_value_t = UnitSystem::Imperial)]
    units: UnitSystem,

    /// Index of the place shown at startup
    #[arg(long, short, default_value = "0")]
    place: usize,

    /// Append tracing output to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        api_key,
        base_url,
        units,
        place,
        log_file,
        debug: debug_args,
    } = Args::parse();

    logging::init(log_file.as_deref())?;

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let mut state = debug
        .load_state_or_else_async(move || async move {
            let places = PlaceCatalog::builtin();
            let count = places.len();
            AppState::new(places, place, units).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("--place {place} is out of range (0..{count})"),
                )
            })
        })
        .await
        .map_err(debug_error)?;
    state.units = units;
    if state.reconcile_panel() {
        tracing::warn!(
            place = state.selected,
            "loaded state did not match its panel; rebuilt"
        );
    }

    let client = WeatherClient::new(
        ProviderConfig::new(api_key)
            .with_base_url(base_url)
            .with_units(units),
    );
    tracing::info!(
        base_url = %client.config().base_url,
        units = client.config().units.query_value(),
        place = state.selected,
        "starting"
    );

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions, client).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
    client: WeatherClient,
) -> io::Result<DebugRunOutput<AppState>> {
    let client = Arc::new(client);
    let view = Rc::new(RefCell::new(AppView::new()));
    let view_events = Rc::clone(&view);

    debug
        .run_effect_app(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::WeatherFetch),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(LOADING_ANIM_TICK_MS),
                    || Action::Tick,
                );
            },
            move |frame, area, state, render_ctx: RenderContext| {
                let props = AppViewProps {
                    state,
                    is_focused: render_ctx.is_focused(),
                };
                view.borrow_mut().render(frame, area, props);
            },
            move |event, state| -> EventOutcome<Action> {
                if let EventKind::Resize(_, _) = event {
                    return EventOutcome::needs_render();
                }
                let props = AppViewProps {
                    state,
                    is_focused: true,
                };
                let actions: Vec<_> = view_events
                    .borrow_mut()
                    .handle_event(event, props)
                    .into_iter()
                    .collect();
                EventOutcome::actions(actions)
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, Arc::clone(&client)),
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, client: Arc<WeatherClient>) {
    match effect {
        Effect::FetchWeather { panel, code } => {
            // Same key: a newer panel's fetch aborts the previous one
            ctx.tasks().spawn("weather", async move {
                match client.fetch_weather(&code).await {
                    Ok(record) => Action::WeatherDidLoad { panel, record },
                    Err(error) => Action::WeatherDidError { panel, error },
                }
            });
        }
    }
}
