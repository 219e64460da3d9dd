//! Sky Hopper headless demo
//!
//! Generates a course, then lets a tiny autopilot hop toward the finish
//! at a fixed 60 Hz for a bounded number of simulated seconds. Stands in
//! for the render/input shell, which is not part of this crate.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec3;
use sky_hopper::{CourseConfig, Game};

const DT: f32 = 1.0 / 60.0;
const MAX_SIM_SECONDS: f32 = 120.0;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(0xC0FFEE);
    log::info!("Sky Hopper starting with seed {seed}");

    let mut game = match Game::new(CourseConfig::default(), seed) {
        Ok(game) => game,
        Err(err) => {
            log::error!("invalid course configuration: {err}");
            std::process::exit(1);
        }
    };

    let positions: Vec<[f32; 3]> = game
        .layout()
        .platforms
        .iter()
        .map(|p| p.position.to_array())
        .collect();
    match serde_json::to_string(&positions) {
        Ok(json) => log::info!("platform positions: {json}"),
        Err(err) => log::warn!("layout dump failed: {err}"),
    }

    let falls = Rc::new(Cell::new(0u32));
    let fall_counter = falls.clone();
    game.on_fall_reset(move || fall_counter.set(fall_counter.get() + 1));
    game.on_level_completed(|| log::info!("course cleared!"));

    let mut frames = 0u32;
    while game.time() < MAX_SIM_SECONDS && !game.level_completed() {
        autopilot(&mut game);
        game.update(DT);
        frames += 1;
        if frames % 600 == 0 {
            log::info!(
                "t={:.0}s pos={:?} grounded={} falls={}",
                game.time(),
                game.player_position(),
                game.grounded(),
                falls.get()
            );
        }
    }

    if game.level_completed() {
        log::info!(
            "finished in {:.1} simulated seconds after {} falls",
            game.time(),
            falls.get()
        );
    } else {
        log::info!(
            "time limit reached at {:?} after {} falls",
            game.player_position(),
            falls.get()
        );
    }
}

/// Hop toward whatever comes next: the nearest platform still ahead, or
/// the finish once past the last one.
fn autopilot(game: &mut Game) {
    if !game.grounded() {
        return;
    }

    let position = game.player_position();
    let target = game
        .layout()
        .platforms
        .iter()
        .map(|p| p.position)
        .find(|p| p.z > position.z + 0.2)
        .unwrap_or(game.layout().finish.position);

    let mut heading = target - position;
    heading.y = 0.0;
    let heading = heading.normalize_or_zero();

    if game.can_jump() {
        game.jump(heading * 1.5 + Vec3::new(0.0, 7.0, 0.0));
    } else {
        game.drive(heading * 2.0 * DT);
    }
}
