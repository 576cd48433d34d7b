//! Hoop Court headless runner
//!
//! Plays a scripted session against the simulation core and logs what a
//! renderer would show. Run with `RUST_LOG=info` (or `debug`) to see it.
//!
//! Usage: `hoop-court [tuning.json] [seed]`

use glam::Vec3;

use hoop_court::sim::{Simulation, TickInput};
use hoop_court::{Hud, Tuning};

/// Display refresh the script is played at
const FRAME_DT: f32 = 1.0 / 60.0;
const DEFAULT_SEED: u64 = 0x5eed;

/// One scripted segment: hold `input` for `seconds`
struct Segment {
    label: &'static str,
    seconds: f32,
    input: TickInput,
}

fn script() -> Vec<Segment> {
    let idle = TickInput::default();
    vec![
        Segment {
            label: "drop",
            seconds: 4.0,
            input: idle.clone(),
        },
        Segment {
            label: "dribble toward home hoop",
            seconds: 1.5,
            input: TickInput {
                move_right: true,
                ..Default::default()
            },
        },
        Segment {
            label: "charge",
            seconds: 0.3,
            input: TickInput {
                charge_up: true,
                ..Default::default()
            },
        },
        Segment {
            label: "auto-aim shot",
            seconds: 4.0,
            input: TickInput {
                shoot: true,
                ..Default::default()
            },
        },
        Segment {
            label: "switch to manual aim",
            seconds: 0.5,
            input: TickInput {
                toggle_auto_aim: true,
                ..Default::default()
            },
        },
        Segment {
            label: "manual shot along the camera",
            seconds: 4.0,
            input: TickInput {
                shoot: true,
                camera_forward: Vec3::new(-0.9, -0.4, 0.1),
                ..Default::default()
            },
        },
        Segment {
            label: "reset",
            seconds: 1.0,
            input: TickInput {
                reset: true,
                ..Default::default()
            },
        },
    ]
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => Tuning::load_or_default(&path),
        None => Tuning::default(),
    };
    let seed = match args.next() {
        Some(s) => s.parse().unwrap_or_else(|_| {
            log::warn!("Invalid seed {s:?}, using default");
            DEFAULT_SEED
        }),
        None => DEFAULT_SEED,
    };

    log::info!("Hoop Court (headless) starting, seed {seed:#x}");
    let mut sim = Simulation::new(tuning, seed);
    let mut hud = Hud::new();

    for segment in script() {
        log::info!("-- {} ({:.1}s)", segment.label, segment.seconds);
        let mut input = segment.input;
        let frames = (segment.seconds / FRAME_DT).round() as usize;
        for _ in 0..frames {
            let events = sim.step(&input, FRAME_DT);
            // Edge-triggered commands fire once per segment
            input.clear_one_shots();

            hud.handle_events(&events);
            hud.update(FRAME_DT);
            hud.sync(&sim);
            for event in &events {
                log::debug!("event {event:?}");
            }
        }

        let pose = sim.pose();
        log::info!(
            "ball at {:.2} | score {} | {} | power {:.1}",
            pose.position,
            hud.score_text,
            hud.stats_text,
            sim.power()
        );
    }

    match hud.to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize HUD: {e}"),
    }
}
