//! Physics integration tests: swept collision scenarios, grid completeness,
//! thief movement, jumps, switches and the full engine tick.

use heistengine::components::autodoor::AutoDoor;
use heistengine::components::laser::LaserComponent;
use heistengine::components::name::Name;
use heistengine::components::physicsbody::{PhysicsBody, category};
use heistengine::components::sprite::Sprite;
use heistengine::components::switch::Switch;
use heistengine::components::transform::Transform;
use heistengine::ecs::Entity;
use heistengine::events::audio::{AudioCmd, fx};
use heistengine::events::collision::Message;
use heistengine::game::Engine;
use heistengine::math::{Aabb, Circle, Vector2};
use heistengine::resources::audio::AudioSink;
use heistengine::resources::gameconfig::EngineConfig;
use heistengine::resources::gamestate::GameStates;
use heistengine::resources::input::Key;
use heistengine::resources::spatialgrid::SpatialGrid;
use heistengine::scene::SceneDescription;
use heistengine::systems::collision::{SweepMode, circle_circle, rect_rect};
use heistengine::systems::movement::clamp_jump;

const EPSILON: f32 = 1e-3;
const DT: f32 = 1.0 / 60.0;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn engine() -> Engine {
    Engine::new(EngineConfig::default()).unwrap()
}

fn spawn(engine: &mut Engine, cat: &str, center: Vector2, size: Vector2) -> Entity {
    let coord = engine.coordinator_mut();
    let e = coord.create_entity().unwrap();
    let t = Transform::new(center, size);
    coord.add_component(e, PhysicsBody::new(cat, &t)).unwrap();
    coord.add_component(e, t).unwrap();
    e
}

/// Thief standing on the ground line at `x`.
fn spawn_grounded_thief(engine: &mut Engine, x: f32) -> Entity {
    let thief = spawn(engine, category::THIEF, Vector2::new(x, 830.0), Vector2::new(20.0, 40.0));
    engine
        .coordinator_mut()
        .get_component_mut::<PhysicsBody>(thief)
        .unwrap()
        .is_grounded = true;
    thief
}

fn body(engine: &Engine, e: Entity) -> &PhysicsBody {
    engine.coordinator().get_component::<PhysicsBody>(e).unwrap()
}

fn press(engine: &mut Engine, key: Option<Key>) {
    engine.ctx_mut().input.update(|k| Some(k) == key);
}

// =============================================================================
// Collision detector
// =============================================================================

#[test]
fn scenario_a_box_reaches_wall_at_frame_end() {
    let thief = Aabb::new(0.0, 0.0, 10.0, 10.0);
    let wall = Aabb::new(15.0, 0.0, 25.0, 10.0);
    let t = rect_rect(&thief, Vector2::new(5.0, 0.0), &wall, Vector2::zero(), 1.0, SweepMode::Corrected)
        .unwrap();
    assert!((0.0..=1.0).contains(&t));
    assert!(approx_eq(t, 1.0));
}

#[test]
fn scenario_b_circles_touch_at_frame_end() {
    let c1 = Circle::new(Vector2::zero(), 5.0);
    let c2 = Circle::new(Vector2::new(20.0, 0.0), 5.0);
    let t = circle_circle(&c1, Vector2::zero(), &c2, Vector2::new(-10.0, 0.0), 1.0).unwrap();
    assert!(approx_eq(t, 1.0));
}

#[test]
fn static_boxes_collide_only_when_strictly_overlapping() {
    let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
    let cases = [
        (Aabb::new(9.0, 0.0, 20.0, 10.0), true),
        (Aabb::new(10.0, 0.0, 20.0, 10.0), false),
        (Aabb::new(0.0, 10.0, 10.0, 20.0), false),
        (Aabb::new(10.0, 10.0, 20.0, 20.0), false),
        (Aabb::new(2.0, 2.0, 4.0, 4.0), true),
        (Aabb::new(30.0, 30.0, 40.0, 40.0), false),
    ];
    for (b, expected) in cases {
        for mode in [SweepMode::Corrected, SweepMode::Legacy] {
            let hit = rect_rect(&a, Vector2::zero(), &b, Vector2::zero(), 1.0, mode);
            assert_eq!(hit.is_some(), expected, "{:?} vs {:?}", a, b);
        }
    }
}

#[test]
fn grid_returns_every_overlapping_entity() {
    let mut engine = engine();
    let mut grid = SpatialGrid::new(1600.0, 900.0, 50.0);
    let mut rng = fastrand::Rng::with_seed(11);
    let mut placed = Vec::new();
    for _ in 0..200 {
        let e = engine.coordinator_mut().create_entity().unwrap();
        let min = Vector2::new(rng.f32() * 1550.0, rng.f32() * 850.0);
        let size = Vector2::new(1.0 + rng.f32() * 120.0, 1.0 + rng.f32() * 120.0);
        let aabb = Aabb::new(min.x, min.y, min.x + size.x, min.y + size.y);
        grid.add_entity(e, &aabb);
        placed.push((e, aabb));
    }
    for (e, aabb) in &placed {
        assert!(grid.nearby_entities(aabb).contains(e));
        let nudged = Aabb::new(aabb.min.x + 0.5, aabb.min.y + 0.5, aabb.max.x + 0.5, aabb.max.y + 0.5);
        assert!(grid.nearby_entities(&nudged).contains(e));
    }
}

// =============================================================================
// Thief movement
// =============================================================================

#[test]
fn scenario_c_walking_speed_is_clamped() {
    let mut engine = engine();
    let thief = spawn_grounded_thief(&mut engine, 800.0);
    press(&mut engine, Some(Key::A));

    let mut speeds = Vec::new();
    for _ in 0..5 {
        engine.update(DT).unwrap();
        speeds.push(body(&engine, thief).velocity.x);
    }
    assert!(approx_eq(speeds[0], -1000.0 * DT));
    for speed in &speeds[1..] {
        assert!(approx_eq(*speed, -20.0));
    }
    assert!(speeds.iter().all(|v| v.abs() <= 20.0 + EPSILON));
    assert!(body(&engine, thief).is_grounded);
}

#[test]
fn scenario_d_drag_jump_is_clamped_and_reversed() {
    let drag = clamp_jump(Vector2::new(300.0, 0.0), 170.0);
    assert!(approx_eq(drag.x, 170.0));
    assert!(approx_eq(drag.y, 0.0));

    let mut engine = engine();
    let thief = spawn_grounded_thief(&mut engine, 800.0);
    let (sink, rx) = AudioSink::channel();
    engine.ctx_mut().audio = sink;

    engine
        .ctx_mut()
        .input
        .update_mouse(Some(Vector2::new(500.0, 500.0)), true);
    engine.update(DT).unwrap();
    assert!(engine.physics().borrow().drag().is_dragging());

    engine
        .ctx_mut()
        .input
        .update_mouse(Some(Vector2::new(800.0, 500.0)), false);
    engine.update(DT).unwrap();

    let b = body(&engine, thief);
    assert!(approx_eq(b.velocity.x, -170.0));
    assert!(approx_eq(b.velocity.y, 0.0));
    assert!(!b.is_grounded);
    assert!(
        rx.try_iter()
            .any(|cmd| matches!(cmd, AudioCmd::PlayFx { ref id, .. } if id == fx::JUMP))
    );
}

#[test]
fn clamped_drag_never_exceeds_limit() {
    let mut rng = fastrand::Rng::with_seed(3);
    for _ in 0..1000 {
        let drag = Vector2::new(rng.f32() * 800.0 - 400.0, rng.f32() * 800.0 - 400.0);
        let clamped = clamp_jump(drag, 170.0);
        assert!(clamped.length() <= 170.0 + EPSILON);
        if drag.length() <= 170.0 {
            assert_eq!(clamped, drag);
        }
    }
}

#[test]
fn falling_thief_lands_on_wall() {
    let mut engine = engine();
    let wall = spawn(&mut engine, category::WALL, Vector2::new(400.0, 700.0), Vector2::new(200.0, 20.0));
    let thief = spawn(&mut engine, category::THIEF, Vector2::new(400.0, 660.0), Vector2::new(20.0, 40.0));

    for _ in 0..120 {
        engine.update(DT).unwrap();
        let bottom = body(&engine, thief).aabb.max.y;
        assert!(bottom <= 690.0 + EPSILON, "fell through the wall: {}", bottom);
    }
    let b = body(&engine, thief);
    assert!(approx_eq(b.aabb.max.y, 690.0));
    assert!(b.is_grounded);
    assert_eq!(b.velocity.y, 0.0);
    assert!(engine.coordinator().is_alive(wall));

    let t = engine.coordinator().get_component::<Transform>(thief).unwrap();
    assert!(approx_eq(t.translate.y, b.aabb.center().y));
}

#[test]
fn passive_bodies_move_without_gravity() {
    let mut engine = engine();
    let platform = spawn(&mut engine, category::WALL, Vector2::new(400.0, 300.0), Vector2::new(100.0, 20.0));
    engine
        .coordinator_mut()
        .get_component_mut::<PhysicsBody>(platform)
        .unwrap()
        .velocity = Vector2::new(30.0, 0.0);

    engine.update(DT).unwrap();
    let t = engine.coordinator().get_component::<Transform>(platform).unwrap();
    assert!(approx_eq(t.translate.x, 400.0 + 30.0 * DT));
    assert!(approx_eq(t.translate.y, 300.0));
    assert_eq!(body(&engine, platform).velocity, Vector2::new(30.0, 0.0));
}

#[test]
fn thief_stays_inside_the_world() {
    let mut engine = engine();
    let thief = spawn_grounded_thief(&mut engine, 15.0);
    press(&mut engine, Some(Key::A));
    for _ in 0..120 {
        engine.update(DT).unwrap();
    }
    // Bounds are enforced before integration, so one tick of travel past
    // the edge remains until the next frame.
    let min_x = body(&engine, thief).aabb.min.x;
    assert!(min_x >= -20.0 * DT - EPSILON);
    assert!(min_x < 1.0);
}

// =============================================================================
// Interactions
// =============================================================================

#[test]
fn scenario_e_switch_toggles_once_per_press() {
    let mut engine = engine();
    let thief = spawn_grounded_thief(&mut engine, 600.0);
    let switch = spawn(&mut engine, category::SWITCH, Vector2::new(600.0, 835.0), Vector2::new(20.0, 30.0));
    let gate = spawn(&mut engine, category::LOCK_DOOR, Vector2::new(900.0, 780.0), Vector2::new(20.0, 140.0));
    {
        let (coord, ctx) = engine.parts_mut();
        ctx.textures.insert("Switches.png");
        ctx.textures.insert("SwitchesOn.png");
        coord.add_component(switch, Switch::new(vec!["gate".to_string()])).unwrap();
        coord.add_component(switch, Sprite::new("Switches.png", 1)).unwrap();
        coord.add_component(gate, Name::new("gate")).unwrap();
        coord.add_component(gate, AutoDoor::linked_to("switch")).unwrap();
    }
    let (sink, rx) = AudioSink::channel();
    engine.ctx_mut().audio = sink;

    press(&mut engine, Some(Key::E));
    engine.update(DT).unwrap();
    press(&mut engine, Some(Key::E));
    engine.update(DT).unwrap();

    let coord = engine.coordinator();
    assert!(coord.get_component::<Switch>(switch).unwrap().is_on);
    assert!(body(&engine, switch).switch_on);
    assert!(coord.get_component::<AutoDoor>(gate).unwrap().is_open);
    assert_eq!(coord.get_component::<Sprite>(switch).unwrap().texture_name, "SwitchesOn.png");
    let switch_sounds: Vec<String> = rx
        .try_iter()
        .filter_map(|cmd| match cmd {
            AudioCmd::PlayFx { id, .. } if id == fx::SWITCH_ON || id == fx::SWITCH_OFF => Some(id),
            _ => None,
        })
        .collect();
    assert_eq!(switch_sounds, vec![fx::SWITCH_ON.to_string()]);
    assert!(coord.is_alive(thief));

    // Release and press again: switched back off.
    press(&mut engine, None);
    engine.update(DT).unwrap();
    press(&mut engine, Some(Key::E));
    engine.update(DT).unwrap();
    assert!(!engine.coordinator().get_component::<Switch>(switch).unwrap().is_on);
    assert!(!engine.coordinator().get_component::<AutoDoor>(gate).unwrap().is_open);
}

#[test]
fn overlapping_pickups_are_destroyed_once_after_the_pass() {
    let mut engine = engine();
    let thief = spawn_grounded_thief(&mut engine, 300.0);
    let gem_a = spawn(&mut engine, category::OBJECT, Vector2::new(295.0, 840.0), Vector2::new(10.0, 10.0));
    let gem_b = spawn(&mut engine, category::OBJECT, Vector2::new(305.0, 840.0), Vector2::new(10.0, 10.0));
    let messages = engine.ctx_mut().broker.subscribe();

    engine.update(DT).unwrap();

    let coord = engine.coordinator();
    assert!(!coord.is_alive(gem_a));
    assert!(!coord.is_alive(gem_b));
    assert!(coord.is_alive(thief));
    assert_eq!(engine.ctx().objects_picked, 2);

    let received: Vec<Message> = messages.try_iter().collect();
    let destroyed: Vec<Entity> = received
        .iter()
        .filter_map(|m| match m {
            Message::EntityDestroyed(e) => Some(*e),
            _ => None,
        })
        .collect();
    assert_eq!(destroyed, vec![gem_a, gem_b]);
    // Both collisions are reported before either destruction.
    let first_destroy = received
        .iter()
        .position(|m| matches!(m, Message::EntityDestroyed(_)))
        .unwrap();
    assert_eq!(
        received[..first_destroy]
            .iter()
            .filter(|m| matches!(m, Message::CollisionDetected(_)))
            .count(),
        2
    );
}

#[test]
fn laser_hurts_once_per_cooldown() {
    let mut engine = engine();
    spawn_grounded_thief(&mut engine, 500.0);
    let beam = spawn(&mut engine, category::LASER, Vector2::new(505.0, 780.0), Vector2::new(4.0, 140.0));
    engine
        .coordinator_mut()
        .add_component(beam, LaserComponent::new(10.0, 1.0))
        .unwrap();

    engine.update(DT).unwrap();
    assert_eq!(engine.ctx().health, 2);
    engine.update(DT).unwrap();
    assert_eq!(engine.ctx().health, 2);
}

#[test]
fn laser_knockback_survives_the_ground_clamp() {
    let mut engine = engine();
    let thief = spawn_grounded_thief(&mut engine, 500.0);
    spawn(&mut engine, category::LASER, Vector2::new(505.0, 780.0), Vector2::new(4.0, 140.0));

    engine.update(DT).unwrap();
    let b = body(&engine, thief);
    assert_eq!(engine.ctx().health, 2);
    assert!(approx_eq(b.velocity.x, -50.0));
    assert!(approx_eq(b.position.x, 500.0 - 50.0 * DT));
    assert!(b.is_grounded);

    // Back under the walking limit once the knockback tick is over.
    engine.update(DT).unwrap();
    assert!(body(&engine, thief).velocity.x.abs() <= 20.0 + EPSILON);
}

#[test]
fn switch_flips_while_paused() {
    let mut engine = engine();
    let thief = spawn_grounded_thief(&mut engine, 600.0);
    let switch = spawn(&mut engine, category::SWITCH, Vector2::new(600.0, 835.0), Vector2::new(20.0, 30.0));
    engine
        .coordinator_mut()
        .add_component(switch, Switch::new(Vec::new()))
        .unwrap();

    engine.ctx_mut().game_state.request(GameStates::Paused);
    press(&mut engine, Some(Key::E));
    engine.update(DT).unwrap();

    assert!(engine.ctx().game_state.is_paused());
    assert_eq!(engine.ctx().dt, 0.0);
    assert!(engine.coordinator().get_component::<Switch>(switch).unwrap().is_on);
    assert!(approx_eq(body(&engine, thief).position.x, 600.0));
}

#[test]
fn switch_opens_lock_door_loaded_without_door_section() {
    let scene = SceneDescription::from_json(
        r#"{ "objects": [
            { "name": "thief", "category": "Thief",
              "translate": { "x": 600, "y": 830 }, "scale": { "x": 20, "y": 40 } },
            { "name": "switch1", "category": "Switch",
              "translate": { "x": 600, "y": 835 }, "scale": { "x": 20, "y": 30 },
              "switch": { "interactables": ["gate"] } },
            { "name": "gate", "category": "LockDoor",
              "translate": { "x": 900, "y": 780 }, "scale": { "x": 20, "y": 140 } }
        ] }"#,
    )
    .unwrap();
    let mut engine = engine();
    let entities = scene.load_into(&mut engine).unwrap();
    let (thief, gate) = (entities[0], entities[2]);
    assert!(!engine.coordinator().has_component::<AutoDoor>(gate));
    engine
        .coordinator_mut()
        .get_component_mut::<PhysicsBody>(thief)
        .unwrap()
        .is_grounded = true;

    press(&mut engine, Some(Key::E));
    engine.update(DT).unwrap();

    assert!(engine.coordinator().get_component::<AutoDoor>(gate).unwrap().is_open);
}

#[test]
fn turned_off_laser_is_harmless() {
    let mut engine = engine();
    spawn_grounded_thief(&mut engine, 500.0);
    let beam = spawn(&mut engine, category::LASER, Vector2::new(505.0, 780.0), Vector2::new(4.0, 140.0));
    let mut laser = LaserComponent::new(10.0, 1.0);
    laser.toggle();
    engine.coordinator_mut().add_component(beam, laser).unwrap();

    for _ in 0..10 {
        engine.update(DT).unwrap();
    }
    assert_eq!(engine.ctx().health, 3);
}

#[test]
fn door_opens_wider_from_its_left_edge() {
    let mut engine = engine();
    spawn_grounded_thief(&mut engine, 1195.0);
    let door = spawn(&mut engine, category::DOOR, Vector2::new(1200.0, 790.0), Vector2::new(20.0, 120.0));
    press(&mut engine, Some(Key::E));
    engine.update(DT).unwrap();

    let coord = engine.coordinator();
    assert!(coord.get_component::<AutoDoor>(door).unwrap().is_open);
    let t = coord.get_component::<Transform>(door).unwrap();
    assert!(approx_eq(t.scale.x, 40.0));
    assert!(approx_eq(t.aabb().min.x, 1190.0));
    let b = body(&engine, door);
    assert!(approx_eq(b.aabb.min.x, 1190.0));
    assert!(approx_eq(b.aabb.max.x, 1230.0));
}

// =============================================================================
// Engine tick
// =============================================================================

#[test]
fn demo_level_runs_without_errors() {
    let scene = SceneDescription::from_json(include_str!("../demos/level.json")).unwrap();
    let mut engine = engine();
    let entities = scene.load_into(&mut engine).unwrap();
    let thief = entities
        .iter()
        .copied()
        .find(|e| body(&engine, *e).is(category::THIEF))
        .unwrap();

    let mut steps = 0;
    press(&mut engine, Some(Key::D));
    for _ in 0..600 {
        steps += engine.update(DT).unwrap();
    }
    assert_eq!(steps, 600);
    let b = body(&engine, thief);
    assert!(b.aabb.min.x >= -EPSILON && b.aabb.max.x <= 1600.0 + EPSILON);
    assert!(b.aabb.max.y <= 850.0 + EPSILON);
    assert!(engine.ctx().objects_picked >= 1);
}

#[test]
fn legacy_sweep_mode_follows_config() {
    let mut config = EngineConfig::default();
    config.load_from_str("[collision]\nlegacy_vertical_sweep = true\n").unwrap();
    let engine = Engine::new(config).unwrap();
    assert_eq!(engine.physics().borrow().sweep_mode(), SweepMode::Legacy);
}
