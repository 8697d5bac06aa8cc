//! vrig - headless locomotion demo
//!
//! Loads a rig scene, attaches the locomotion script to the player entity
//! and drives it with a constant thumbstick deflection while the simulated
//! headset turns at a fixed yaw rate.

use std::error::Error;

use vrig::config::AppConfig;
use vrig_core::{Scene, ScriptHost, World};
use vrig_input::{InputEvent, InputKeyCode, LocomotionController, PoseStream, SceneAccess};
use vrig_math::{ops, Mat4, Vec3};

/// Simulated tracked devices, relative to the rig origin
struct SimulatedHeadset {
    height: f32,
    yaw: f32,
    yaw_rate: f32,
}

impl SimulatedHeadset {
    fn advance(&mut self, dt: f32) {
        self.yaw += self.yaw_rate * dt;
    }

    fn head(&self) -> Mat4 {
        ops::mul(
            &ops::translation(Vec3::new(0.0, self.height, 0.0)),
            &ops::rotation(Vec3::new(0.0, self.yaw, 0.0)),
        )
    }

    /// Hands held a little in front of and below the head
    fn hand(&self, side: f32) -> Mat4 {
        let offset = ops::translation(Vec3::new(0.25 * side, -0.4, -0.3));
        ops::mul(&self.head(), &offset)
    }
}

fn run(config: &AppConfig) -> Result<(), Box<dyn Error>> {
    let sim = &config.simulation;
    let settings = config.locomotion.to_locomotion_settings();
    let holder_name = settings.names.holder.clone();
    let hmd_name = settings.names.hmd.clone();

    let scene = Scene::load(&sim.scene_path)?;
    log::info!("Loaded scene '{}' ({} entities)", scene.name, scene.entities.len());
    let mut world: World = scene.instantiate();

    let player = world
        .find_entity(&sim.player)
        .ok_or_else(|| format!("player entity '{}' not found", sim.player))?;
    let hmd = world
        .find_entity(&hmd_name)
        .ok_or_else(|| format!("hmd entity '{}' not found", hmd_name))?;

    let mut host = ScriptHost::new();
    host.attach(player, LocomotionController::new(settings), &mut world)?;

    let [stick_x, stick_y] = sim.stick;
    host.dispatch(&InputEvent::Control { code: InputKeyCode::LeftThumbstickX, value: stick_x }, &mut world);
    host.dispatch(&InputEvent::Control { code: InputKeyCode::LeftThumbstickY, value: stick_y }, &mut world);

    let mut headset = SimulatedHeadset {
        height: sim.head_height,
        yaw: 0.0,
        yaw_rate: sim.head_yaw_rate,
    };

    for frame in 1..=sim.frames {
        headset.advance(sim.timestep);
        world.set_local_transform(hmd, headset.head());
        for (stream, side) in [(PoseStream::LeftGrip, -1.0), (PoseStream::RightGrip, 1.0)] {
            host.dispatch(&InputEvent::Pose { stream, transform: headset.hand(side) }, &mut world);
        }

        host.update(sim.timestep, &mut world);

        let every = config.debug.log_every;
        if every > 0 && frame % every == 0 {
            if let Some((_, holder)) = world.get_by_name(&holder_name) {
                log::info!("frame {:>4}: {} at {}", frame, holder_name, holder.local_translation());
            }
        }
        world.clear_all_dirty();
    }

    if let Some((_, holder)) = world.get_by_name(&holder_name) {
        log::info!("Finished {} frames, {} at {}", sim.frames, holder_name, holder.local_translation());
    }
    host.clear(&mut world);
    Ok(())
}

fn main() {
    let config = AppConfig::load();
    let level = config
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    log::info!("Starting vrig");

    let config = config.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    if let Err(e) = run(&config) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
