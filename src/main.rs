//! Mushroom Rush entry point
//!
//! The native build runs a headless demo: a simple autopilot plays one run
//! in real time and logs what happens. Window, audio and keyboard hosts
//! drive the same `tick` / `RenderSnapshot` pair.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::env;
    use std::fs;
    use std::thread;
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    use anyhow::{Context, Result, anyhow};
    use mushroom_rush::Settings;
    use mushroom_rush::consts::TICK_RATE;
    use mushroom_rush::sim::{
        FixedTimestep, GameEvent, GamePhase, GameState, Horizontal, RenderSnapshot, SessionState,
        TickInput, tick,
    };

    const SETTINGS_ENV: &str = "MUSHROOM_RUSH_SETTINGS";
    const SEED_ENV: &str = "MUSHROOM_RUSH_SEED";
    const SECONDS_ENV: &str = "MUSHROOM_RUSH_SECONDS";
    const DEFAULT_SECONDS: u64 = 60;
    const FRAME: Duration = Duration::from_millis(16);

    fn load_settings() -> Result<Settings> {
        let Ok(path) = env::var(SETTINGS_ENV) else {
            return Ok(Settings::default());
        };
        let json = fs::read_to_string(&path)
            .with_context(|| format!("failed reading settings from {path}"))?;
        Settings::from_json(&json).with_context(|| format!("invalid settings in {path}"))
    }

    fn seed() -> Result<u64> {
        if let Ok(raw) = env::var(SEED_ENV) {
            return raw
                .parse()
                .map_err(|err| anyhow!("{SEED_ENV}={raw:?} is not a seed: {err}"));
        }
        Ok(SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0))
    }

    fn demo_seconds() -> Result<u64> {
        match env::var(SECONDS_ENV) {
            Ok(raw) => raw
                .parse()
                .map_err(|err| anyhow!("{SECONDS_ENV}={raw:?} is not a duration: {err}")),
            Err(_) => Ok(DEFAULT_SECONDS),
        }
    }

    /// Walk toward the closest enemy, keep shooting, hop when something is overhead
    fn autopilot(session: &SessionState, ticks: u64) -> TickInput {
        let player = &session.player.rect;
        let center = player.x + player.width / 2;
        let target = session
            .enemies
            .iter()
            .chain(session.boss.as_ref())
            .min_by_key(|a| (a.rect.x + a.rect.width / 2 - center).abs());

        let mut input = TickInput::default();
        if let Some(target) = target {
            let dx = target.rect.x + target.rect.width / 2 - center;
            input.horizontal = Horizontal::from_held(dx < -200, dx > 200);
            input.jump = dx.abs() < 150 && target.rect.bottom() <= player.y + player.height / 2;
        }
        input.shoot = ticks % 12 == 0;
        input
    }

    /// The simulated second to log, if one completed since `logged`
    ///
    /// Several ticks run per frame, so `ticks` can step over an exact
    /// multiple of the tick rate.
    fn next_hud_second(ticks: u64, logged: u64) -> Option<u64> {
        let second = ticks / TICK_RATE as u64;
        (second > logged).then_some(second)
    }

    pub fn run() -> Result<()> {
        env_logger::init();

        let settings = load_settings()?;
        let seed = seed()?;
        let max_ticks = demo_seconds()? * TICK_RATE as u64;
        log::info!("Mushroom Rush (headless) starting with seed {}", seed);

        let mut state = GameState::with_settings(seed, settings).context("settings rejected")?;
        // Title -> character select -> playing
        for _ in 0..2 {
            tick(
                &mut state,
                &TickInput {
                    confirm: true,
                    ..TickInput::default()
                },
            );
        }
        if state.phase != GamePhase::Playing {
            return Err(anyhow!("expected a running session, got {:?}", state.phase));
        }

        let mut clock = FixedTimestep::default();
        let mut last = Instant::now();
        let mut ticks = 0u64;
        let mut logged_second = 0u64;

        'run: while ticks < max_ticks {
            thread::sleep(FRAME);
            let now = Instant::now();
            let steps = clock.advance(now.duration_since(last).as_secs_f32());
            last = now;

            for _ in 0..steps {
                let Some(session) = &state.session else {
                    break 'run;
                };
                let input = autopilot(session, ticks);
                ticks += 1;

                for event in tick(&mut state, &input) {
                    match event {
                        GameEvent::WaveAdvanced { wave } => log::info!("Wave {}", wave),
                        GameEvent::BossSpawned { health } => {
                            log::info!("Boss appeared with {} health", health)
                        }
                        GameEvent::PlayerDamaged { lives } => {
                            log::info!("Player hit, {} lives left", lives)
                        }
                        GameEvent::GameOver { .. } => break 'run,
                        other => log::trace!("{:?}", other),
                    }
                }
            }

            if let Some(second) = next_hud_second(ticks, logged_second) {
                logged_second = second;
                if let Some(hud) = RenderSnapshot::capture(&state).hud_line() {
                    log::debug!("[{}s] {}", second, hud);
                }
            }
        }

        let snapshot = RenderSnapshot::capture(&state);
        let hud = snapshot.hud_line().unwrap_or_default();
        log::info!("Demo finished after {} ticks ({:?}): {}", ticks, snapshot.phase, hud);
        println!("{hud}");
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive `mushroom_rush::sim::tick` directly
}
