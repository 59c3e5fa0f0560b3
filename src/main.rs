//! Weather card - terminal front end

use std::cell::RefCell;
use std::io::{self, Stdout};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventKind,
    EventRoutingState, HandlerResponse, Keybindings,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{DebugRunOutput, DebugSession, DebugSessionError, ReplayItem};
use weather_card::action::Action;
use weather_card::api::WeatherClient;
use weather_card::components::{Component, Shell, ShellProps};
use weather_card::config::{Cli, Config};
use weather_card::effect::{self, Effect};
use weather_card::geolocation::{self, Geolocator};
use weather_card::logging;
use weather_card::reducer::reducer;
use weather_card::state::{AppState, SPINNER_TICK_MS};

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum WeatherComponentId {
    Panel,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum WeatherContext {
    Main,
}

impl EventRoutingState<WeatherComponentId, WeatherContext> for AppState {
    fn focused(&self) -> Option<WeatherComponentId> {
        Some(WeatherComponentId::Panel)
    }

    fn modal(&self) -> Option<WeatherComponentId> {
        None
    }

    fn binding_context(&self, _id: WeatherComponentId) -> WeatherContext {
        WeatherContext::Main
    }

    fn default_context(&self) -> WeatherContext {
        WeatherContext::Main
    }
}

/// Long-lived clients the effect handler hands to spawned tasks
struct Services {
    weather: WeatherClient,
    geolocator: Option<Arc<dyn Geolocator>>,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let Cli {
        debug: debug_args, ..
    } = cli;

    if let Err(e) = logging::init(&config.log_file) {
        eprintln!(
            "Error: could not open log file {}: {}",
            config.log_file.display(),
            e
        );
        std::process::exit(1);
    }
    tracing::info!(endpoint = %config.endpoint, geolocation = ?config.geolocation, "starting");

    let debug = DebugSession::new(debug_args);

    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let services = Arc::new(Services {
        weather: WeatherClient::new(config.endpoint.clone(), config.api_key.clone()),
        geolocator: geolocation::geolocator_for(&config.geolocation),
    });

    let geolocation_available = services.geolocator.is_some();
    let initial_city = config.initial_city.clone();
    let fresh_state = Arc::new(AtomicBool::new(false));
    let built = Arc::clone(&fresh_state);
    let state = debug
        .load_state_or_else_async(move || async move {
            built.store(true, Ordering::Relaxed);
            let state = AppState::new(geolocation_available);
            Ok::<AppState, io::Error>(match initial_city {
                Some(city) => state.with_query(city),
                None => state,
            })
        })
        .await
        .map_err(debug_error)?;

    let init_action = config.startup_action(fresh_state.load(Ordering::Relaxed));

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let use_alt_screen = debug.use_alt_screen();
    let mut terminal = open_terminal(use_alt_screen)?;

    let result = run_app(
        &mut terminal,
        &debug,
        store,
        services,
        init_action,
        replay_actions,
    )
    .await;

    close_terminal(&mut terminal, use_alt_screen)?;

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    tracing::info!("exiting");
    Ok(())
}

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode and the alternate screen are skipped for headless debug runs.
fn open_terminal(alt_screen: bool) -> io::Result<Tui> {
    let mut stdout = io::stdout();
    if alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    Terminal::new(CrosstermBackend::new(stdout))
}

fn close_terminal(terminal: &mut Tui, alt_screen: bool) -> io::Result<()> {
    if !alt_screen {
        return Ok(());
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()
}

/// Route a terminal event through the shell; unhandled events fall through.
fn shell_event(
    shell: &mut Shell,
    event: &EventKind,
    state: &AppState,
) -> HandlerResponse<Action> {
    let props = ShellProps {
        state,
        is_focused: true,
    };
    let actions: Vec<_> = shell.handle_event(event, props).into_iter().collect();
    if actions.is_empty() {
        return HandlerResponse::ignored();
    }
    HandlerResponse {
        actions,
        consumed: true,
        needs_render: false,
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    services: Arc<Services>,
    init_action: Option<Action>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let shell = Rc::new(RefCell::new(Shell::new()));
    let mut bus: EventBus<AppState, Action, WeatherComponentId, WeatherContext> = EventBus::new();
    let keybindings: Keybindings<WeatherContext> = Keybindings::new();

    let panel_shell = Rc::clone(&shell);
    bus.register(WeatherComponentId::Panel, move |event, state| {
        shell_event(&mut panel_shell.borrow_mut(), &event.kind, state)
    });

    // Resize only needs a redraw
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            init_action,
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(SPINNER_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                event_ctx.set_component_area(WeatherComponentId::Panel, area);
                let props = ShellProps {
                    state,
                    is_focused: render_ctx.is_focused(),
                };
                shell.borrow_mut().render(frame, area, props);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, Arc::clone(&services)),
        )
        .await
}

/// Handle effects by spawning tasks. Re-spawning under the same key aborts
/// the previous task.
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, services: Arc<Services>) {
    match effect {
        Effect::FetchWeather { seq, query } => {
            ctx.tasks().spawn("weather", async move {
                effect::fetch_weather(&services.weather, seq, query).await
            });
        }
        Effect::Locate { seq } => {
            ctx.tasks().spawn("locate", async move {
                effect::locate(services.geolocator.as_deref(), seq).await
            });
        }
    }
}
