//! Sky Ladder entry point
//!
//! Runs a headless session on a simulated 60 Hz clock with a simple autopilot
//! and prints the result. Pass a settings JSON path as the first argument to
//! override the defaults.

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use sky_ladder::Settings;
    use sky_ladder::sim::GameState;

    /// How far above the player (in cells) a hazard counts as a threat
    const LOOKAHEAD_CELLS: f32 = 2.5;

    /// Whether a live hazard in `column` is close above the player or level with it
    fn lane_threatened(state: &GameState, column: usize) -> bool {
        let player = &state.player.actor;
        let window = state.settings.cell_size * LOOKAHEAD_CELLS;
        state
            .hazards
            .iter()
            .filter(|h| h.is_live() && h.column == column)
            .any(|h| {
                let bottom = h.actor.pos.y + h.actor.size.y;
                bottom > player.pos.y - window && h.actor.pos.y < player.pos.y + player.size.y
            })
    }

    /// Key to press to step away from a hazard closing in on the player's lane
    pub fn decide(state: &GameState) -> Option<&'static str> {
        if state.player.transition.is_some() {
            return None;
        }
        let column = state.player.column;
        if !lane_threatened(state, column) {
            return None;
        }

        let columns = state.settings.columns;
        let mut options = Vec::with_capacity(2);
        if column > 0 {
            options.push(("ArrowLeft", column - 1));
        }
        if column + 1 < columns {
            options.push(("ArrowRight", column + 1));
        }
        options
            .into_iter()
            .find(|&(_, target)| !lane_threatened(state, target))
            .map(|(key, _)| key)
    }

    pub fn load_settings() -> Result<Settings, sky_ladder::SettingsError> {
        match std::env::args().nth(1) {
            Some(path) => Settings::load(path),
            None => Ok(Settings::default()),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::{SystemTime, UNIX_EPOCH};

    use sky_ladder::Session;
    use sky_ladder::input::from_key;
    use sky_ladder::sim::GameOver;

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Stop after ten simulated minutes
    const MAX_MS: f64 = 10.0 * 60.0 * 1000.0;

    env_logger::init();
    log::info!("Sky Ladder (headless) starting...");

    let settings = match autopilot::load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Invalid settings: {}", e);
            std::process::exit(1);
        }
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(42);

    let mut session = match Session::new(settings, seed) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Invalid settings: {}", e);
            std::process::exit(1);
        }
    };

    let result: Rc<RefCell<Option<GameOver>>> = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&result);
    session.on_game_over(move |over| *sink.borrow_mut() = Some(over.clone()));

    // Keys go through the same mapping a host page would use
    let press = |session: &mut Session, key: &str| {
        if let Some(action) = from_key(key, false) {
            session.apply(action);
        }
    };

    press(&mut session, "Enter");
    let mut now = 0.0;
    let mut snapshot = session.tick(now);
    while !session.is_over() && now < MAX_MS {
        if let Some(key) = autopilot::decide(session.state()) {
            press(&mut session, key);
        }
        now += FRAME_MS;
        snapshot = session.tick(now);
    }

    match result.borrow().as_ref() {
        Some(over) => println!(
            "Game over after {:.1}s: score {} ({}), killed by {}",
            now / 1000.0,
            over.final_score,
            over.final_level,
            over.cause_of_death.as_deref().unwrap_or("nothing")
        ),
        None => println!(
            "Survived {:.0}s: score {} ({}), {} lives left",
            now / 1000.0,
            snapshot.score,
            snapshot.level,
            snapshot.lives
        ),
    }
    log::info!("Seed was {}", seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The engine is embedded by a host page on the web; there is no standalone binary
}
