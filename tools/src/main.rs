//! grid-runner: headless driver for the EcoGrid dashboard core.
//!
//! Usage:
//!   grid-runner --seed 12345 --ticks 20 --data-dir ./data
//!   grid-runner --live-secs 10 --period-ms 3000
//!   grid-runner --ipc-mode

use anyhow::Result;
use ecogrid_core::{
    clock::TickSpeed,
    config::GridConfig,
    dashboard::{metric_cards, DashboardView},
    engine::GridEngine,
    fixtures::FixtureStore,
    metrics::LiveMetricsSnapshot,
    report::ZoneReport,
    rng::StreamSlot,
    sensors::{ApiKeyGuard, Sensor, SensorRegistry},
    types::Tick,
    zones::{AlertBanner, ZoneDetail},
};
use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on ticks one `tick` command may run.
const MAX_TICKS_PER_COMMAND: u64 = 10_000;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Tick { count: u64 },
    SetSpeed { speed: TickSpeed },
    SelectZone { zone_id: String },
    Report,
    Landing,
    SensorsList { api_key: Option<String> },
    SensorCreate { api_key: Option<String>, sensor: Sensor },
    SensorDelete { api_key: Option<String>, id: String },
    Quit,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct UiState<'a> {
    tick:         Tick,
    paused:       bool,
    speed:        TickSpeed,
    metrics:      &'a LiveMetricsSnapshot,
    banner:       Option<AlertBanner>,
    banner_text:  Option<String>,
    selected:     Option<ZoneDetail>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let data_dir = args
        .windows(2)
        .find(|w| w[0] == "--data-dir")
        .map(|w| w[1].as_str())
        .unwrap_or("./data");

    let mut config = GridConfig::load(data_dir)?;
    config.seed = parse_arg(&args, "--seed", config.seed);
    config.tick_period_ms = parse_arg(&args, "--period-ms", config.tick_period_ms);
    let ticks = parse_arg(&args, "--ticks", 20u64);
    let live_secs = parse_arg(&args, "--live-secs", 0u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");

    let fixtures = match FixtureStore::load(data_dir) {
        Ok(store) => store,
        Err(e) => {
            log::warn!("Falling back to built-in zones: {e}");
            FixtureStore::builtin()
        }
    };
    let fixtures = Arc::new(fixtures);

    if !ipc_mode {
        println!("EcoGrid AI - grid-runner");
        println!("  seed:      {}", config.seed);
        println!("  period:    {:?}", config.tick_period());
        println!("  data_dir:  {data_dir}");
        println!("  zones:     {}", fixtures.zones().len());
        println!();
    }

    if live_secs > 0 {
        return run_live(&config, fixtures, Duration::from_secs(live_secs));
    }

    let run_id = format!("run-{}-{}", config.seed, chrono::Utc::now().timestamp());
    let mut engine = GridEngine::new(run_id, &config, Arc::clone(&fixtures));

    if ipc_mode {
        let mut sensors = SensorRegistry::new(ApiKeyGuard::new(config.api_key.clone()));
        run_ipc_loop(&mut engine, &mut sensors)?;
    } else {
        engine.run_ticks(ticks)?;
        print_summary(&engine, ticks);
    }

    Ok(())
}

/// Mount the dashboard on a real timer, print each snapshot, unmount.
fn run_live(config: &GridConfig, fixtures: Arc<FixtureStore>, duration: Duration) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    runtime.block_on(async {
        let rng = ecogrid_core::rng::RngBank::new(config.seed).for_stream(StreamSlot::Metrics);
        let view = DashboardView::mount(fixtures, config, rng);
        if let Some(banner) = view.alert_banner() {
            println!("[{:?}] {}", banner.severity, banner.message());
        }

        let mut updates = view.subscribe();
        let deadline = tokio::time::sleep(duration);
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                _ = &mut deadline => break,
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    println!("Last updated: {}", view.last_updated_label());
                    for card in view.cards() {
                        println!("  {:<20} {:>12}  [{}]", card.title, card.value, card.badge.text);
                    }
                }
            }
        }

        view.unmount().await;
    });
    Ok(())
}

fn run_ipc_loop(engine: &mut GridEngine, sensors: &mut SensorRegistry) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut input = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = input.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Unparseable IPC command: {e}");
                writeln!(stdout, "{}", error_json(&e))?;
                stdout.flush()?;
                continue;
            }
        };

        let reply = handle(cmd, engine, sensors)?;
        writeln!(stdout, "{}", reply.line)?;
        stdout.flush()?;
        if reply.quit {
            break;
        }
    }
    Ok(())
}

struct Reply {
    line: String,
    quit: bool,
}

impl Reply {
    fn line(line: String) -> Self {
        Self { line, quit: false }
    }
}

fn handle(cmd: IpcCommand, engine: &mut GridEngine, sensors: &mut SensorRegistry) -> Result<Reply> {
    let line = match cmd {
        IpcCommand::Quit => {
            return Ok(Reply { line: serde_json::json!({ "ok": "quit" }).to_string(), quit: true });
        }
        IpcCommand::GetState => state_json(engine)?,
        IpcCommand::Tick { count } => {
            let n = count.saturating_mul(engine.clock.ticks_per_step());
            if n > MAX_TICKS_PER_COMMAND {
                log::warn!("Rejected tick request for {n} ticks");
                error_json(&format!("Tick count {n} exceeds the limit of {MAX_TICKS_PER_COMMAND}"))
            } else {
                engine.run_ticks(n)?;
                state_json(engine)?
            }
        }
        IpcCommand::SetSpeed { speed } => {
            engine.clock.set_speed(speed);
            state_json(engine)?
        }
        IpcCommand::SelectZone { zone_id } => match engine.select_zone(&zone_id) {
            Ok(_) => state_json(engine)?,
            Err(e) => error_json(&e),
        },
        IpcCommand::Report => match engine.zones().selection().selected() {
            Some(zone) => serde_json::to_string(&ZoneReport::derive(zone))?,
            None => error_json(&"No zone selected"),
        },
        IpcCommand::Landing => serde_json::to_string(&engine.landing_series(chrono::Utc::now()))?,
        IpcCommand::SensorsList { api_key } => match sensors.list(api_key.as_deref()) {
            Ok(list) => serde_json::to_string(&list)?,
            Err(e) => error_json(&e),
        },
        IpcCommand::SensorCreate { api_key, sensor } => {
            match sensors.create(api_key.as_deref(), sensor) {
                Ok(created) => serde_json::to_string(&created)?,
                Err(e) => error_json(&e),
            }
        }
        IpcCommand::SensorDelete { api_key, id } => match sensors.delete(api_key.as_deref(), &id) {
            Ok(()) => serde_json::json!({ "deleted": id }).to_string(),
            Err(e) => error_json(&e),
        },
    };
    Ok(Reply::line(line))
}

fn state_json(engine: &GridEngine) -> Result<String> {
    let banner = engine.zones().alert_banner();
    let state = UiState {
        tick:        engine.clock.current_tick,
        paused:      engine.clock.paused,
        speed:       engine.clock.speed,
        metrics:     engine.snapshot(),
        banner,
        banner_text: banner.map(|b| b.message()),
        selected:    engine.zones().detail(),
    };
    Ok(serde_json::to_string(&state)?)
}

fn error_json(e: &dyn std::fmt::Display) -> String {
    serde_json::json!({ "error": e.to_string() }).to_string()
}

fn print_summary(engine: &GridEngine, ticks: u64) {
    let s = engine.snapshot();
    println!("=== RUN SUMMARY ===");
    println!("  run_id:         {}", engine.run_id);
    println!("  ticks run:      {ticks}");
    println!("  final tick:     {}", engine.clock.current_tick);
    println!("  log entries:    {}", engine.event_log().len());
    println!("  peak load:      {} MW", s.peak_load);
    println!();
    println!("=== DASHBOARD ===");
    for card in metric_cards(s) {
        println!("  {:<20} {:>12}  [{}]", card.title, card.value, card.badge.text);
    }
    match engine.zones().alert_banner() {
        Some(banner) => println!("  alert: {} ({:?})", banner.message(), banner.severity),
        None => println!("  alert: none"),
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
