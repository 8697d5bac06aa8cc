//! End-to-end rig tests: scene file, script host and locomotion together

use std::f32::consts::FRAC_PI_2;

use vrig::config::AppConfig;
use vrig_core::{BodyType, ComponentType, Scene, ScriptHost, World};
use vrig_input::{InputEvent, InputKeyCode, LocomotionController, SceneAccess};
use vrig_math::{ops, Vec3};

const EPSILON: f32 = 0.0001;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn load_rig() -> World {
    Scene::load("scenes/vr_rig.ron").expect("bundled scene should parse").instantiate()
}

fn holder_translation(world: &World) -> Vec3 {
    let holder = world.find_entity("vrHolder").expect("holder");
    world.local_translation(holder).expect("holder transform")
}

fn set_stick(host: &mut ScriptHost, world: &mut World, x: f32, y: f32) {
    host.dispatch(&InputEvent::Control { code: InputKeyCode::LeftThumbstickX, value: x }, world);
    host.dispatch(&InputEvent::Control { code: InputKeyCode::LeftThumbstickY, value: y }, world);
}

#[test]
fn test_bundled_scene_contents() {
    let world = load_rig();
    for name in ["player", "vrHolder", "hmd", "leftAim", "leftGrip", "rightAim", "rightGrip"] {
        assert!(world.find_entity(name).is_some(), "missing {}", name);
    }
    let (_, floor) = world.get_by_name("floor").unwrap();
    assert_eq!(floor.body_type(), Some(BodyType::Static));
    let (_, hmd) = world.get_by_name("hmd").unwrap();
    assert!(hmd.has_component(ComponentType::VrDisplay));
}

#[test]
fn test_walk_forward_for_one_second() {
    let mut world = load_rig();
    let player = world.find_entity("player").unwrap();
    let hmd = world.find_entity("hmd").unwrap();
    let mut host = ScriptHost::new();
    host.attach(player, LocomotionController::default(), &mut world).unwrap();

    // Head looking down -Z with identity orientation
    world.set_local_transform(hmd, ops::translation(Vec3::new(0.0, 1.7, 0.0)));
    set_stick(&mut host, &mut world, 0.0, 1.0);
    for _ in 0..10 {
        assert_eq!(host.update(0.1, &mut world), 1);
    }

    let t = holder_translation(&world);
    assert!(approx_eq(t.x, 0.0));
    assert!(approx_eq(t.y, 0.0));
    assert!(approx_eq(t.z, -1.0), "got {}", t);
}

#[test]
fn test_turned_head_redirects_strafe() {
    let mut world = load_rig();
    let player = world.find_entity("player").unwrap();
    let hmd = world.find_entity("hmd").unwrap();
    let mut host = ScriptHost::new();
    host.attach(player, LocomotionController::default(), &mut world).unwrap();

    // Quarter turn about +Y: head +X now points at -Z
    world.set_local_transform(hmd, ops::rotation(Vec3::new(0.0, FRAC_PI_2, 0.0)));
    set_stick(&mut host, &mut world, 1.0, 0.0);
    host.update(1.0, &mut world);

    let t = holder_translation(&world);
    assert!(approx_eq(t.x, 0.0), "got {}", t);
    assert!(approx_eq(t.z, -1.0), "got {}", t);
}

#[test]
fn test_configured_speed_scales_movement() {
    let mut config = AppConfig::default();
    config.locomotion.speed = 3.0;

    let mut world = load_rig();
    let player = world.find_entity("player").unwrap();
    let mut host = ScriptHost::new();
    let controller = LocomotionController::new(config.locomotion.to_locomotion_settings());
    host.attach(player, controller, &mut world).unwrap();

    set_stick(&mut host, &mut world, 1.0, 0.0);
    host.update(0.5, &mut world);
    assert!(approx_eq(holder_translation(&world).x, 1.5));
}

#[test]
fn test_renamed_rig_entity_fails_attach() {
    let mut config = AppConfig::default();
    config.locomotion.hmd = "headset".to_string();

    let mut world = load_rig();
    let player = world.find_entity("player").unwrap();
    let mut host = ScriptHost::new();
    let controller = LocomotionController::new(config.locomotion.to_locomotion_settings());
    let err = host.attach(player, controller, &mut world).unwrap_err();
    assert!(err.to_string().contains("headset"));
    assert!(host.is_empty());
}
