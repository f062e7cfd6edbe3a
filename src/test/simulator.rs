use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::capture::{self, ByteOrder, CaptureBuilder, CaptureFile, TcpFlags, build_tcp_frame};
use crate::demo::SyntheticTraffic;
use crate::physics::{ParticleState, Vec2, WorldBounds};
use crate::sim::{
    ElasticParams, ForceModel, NullSink, ParticleSimulator, ParticleSource, SimConfig, SimOptions,
    SphParams,
};

fn still_config() -> SimConfig {
    SimConfig {
        gravity: [0.0, 0.0],
        spawn_jitter: 0.0,
        ..SimConfig::default()
    }
}

fn three_packet_capture() -> CaptureFile {
    let flags = TcpFlags {
        ack: true,
        ..TcpFlags::default()
    };
    let bytes = CaptureBuilder::ethernet(ByteOrder::Little)
        .record(10, 0, &build_tcp_frame(1, 2, flags, &[0u8; 100]))
        .record(10, 1_500, &build_tcp_frame(1, 2, flags, &[0u8; 200]))
        .record(10, 4_000, &build_tcp_frame(1, 2, flags, &[0u8; 300]))
        .finish();
    capture::decode(&bytes).expect("decode")
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn entries_fire_once_when_due() {
    let bounds = WorldBounds::default();
    let mut sim = ParticleSimulator::new(still_config()).expect("sim");
    sim.restart(&bounds).expect("restart");
    sim.load_sources(&three_packet_capture());
    let mut rng = rng();

    sim.tick(0.001, &bounds, &mut rng);
    assert_eq!(sim.particles().len(), 1);
    assert_eq!(sim.particles()[0].payload_bytes, 100);

    sim.tick(0.001, &bounds, &mut rng);
    assert_eq!(sim.particles().len(), 2);

    for _ in 0..20 {
        sim.tick(0.001, &bounds, &mut rng);
    }
    assert_eq!(sim.particles().len(), 3);
    assert_eq!(sim.stats().spawned, 3);
    assert_eq!(sim.sources()[0].pending(), 0);
    assert!(sim.sources()[0].queue().iter().all(|e| e.fired));
}

#[test]
fn restart_rearms_sources_and_is_idempotent() {
    let bounds = WorldBounds::default();
    let mut sim = ParticleSimulator::new(still_config()).expect("sim");
    sim.load_sources(&three_packet_capture());
    let mut rng = rng();
    sim.run_ticks(10, 0.001, &bounds, &mut rng, &mut NullSink);
    assert_eq!(sim.stats().spawned, 3);

    sim.restart(&bounds).expect("restart");
    sim.restart(&bounds).expect("restart again");
    assert!(sim.particles().is_empty());
    assert_eq!(sim.clock_ms(), 0.0);
    assert_eq!(sim.sources()[0].pending(), 3);
    assert_eq!(sim.stats().ticks, 0);

    sim.run_ticks(10, 0.001, &bounds, &mut rng, &mut NullSink);
    assert_eq!(sim.particles().len(), 3);
}

#[test]
fn spawns_beyond_max_particles_are_deferred_not_dropped() {
    let bounds = WorldBounds::default();
    let cfg = SimConfig {
        max_particles: 2,
        ..still_config()
    };
    let mut sim = ParticleSimulator::new(cfg).expect("sim");
    sim.add_source(ParticleSource::new(
        Vec2::new(0.0, 45.0),
        [(0.0, 10), (0.0, 20), (0.0, 30)],
    ));
    let mut rng = rng();
    sim.tick(0.01, &bounds, &mut rng);

    assert_eq!(sim.particles().len(), 2);
    let queue = sim.sources()[0].queue();
    assert!(queue[0].fired && queue[1].fired);
    assert!(!queue[2].fired);
    assert_eq!(sim.stats().deferred_spawns, 1);
    assert!(sim.insert_particle(Vec2::ZERO, Vec2::ZERO, &bounds).is_none());
}

#[test]
fn same_seed_same_trajectory() {
    let traffic = SyntheticTraffic {
        packets: 60,
        gap_us: 5_000,
        ..SyntheticTraffic::default()
    };
    let bytes = traffic.build_capture(ByteOrder::Little, &mut StdRng::seed_from_u64(1));
    let cap = capture::decode(&bytes).expect("decode");
    let bounds = WorldBounds::default();

    let run = || {
        let mut sim = ParticleSimulator::new(SimConfig::default()).expect("sim");
        sim.load_sources(&cap);
        let mut rng = StdRng::seed_from_u64(99);
        sim.run_ticks(120, 1.0 / 60.0, &bounds, &mut rng, &mut NullSink);
        (sim.positions(), sim.stats().clone())
    };
    let (a, sa) = run();
    let (b, sb) = run();
    assert_eq!(a, b);
    assert_eq!(sa, sb);
    assert!(sa.spawned > 0);
}

#[test]
fn spawn_origin_outside_world_is_clamped() {
    let bounds = WorldBounds::default();
    let cfg = SimConfig {
        source_origin: [0.0, 500.0],
        ..still_config()
    };
    let mut sim = ParticleSimulator::new(cfg).expect("sim");
    sim.load_sources(&three_packet_capture());
    sim.run_ticks(10, 0.001, &bounds, &mut rng(), &mut NullSink);
    assert_eq!(sim.particles().len(), 3);
    for p in sim.particles() {
        assert!(bounds.contains(p.pos), "{:?}", p.pos);
        assert_eq!(p.pos.y, 50.0);
    }
}

#[test]
fn particles_stay_inside_a_shrinking_world() {
    let mut sim = ParticleSimulator::new(still_config()).expect("sim");
    let big = WorldBounds::default();
    let mut rng = rng();
    sim.restart(&big).expect("restart");
    sim.insert_particle(Vec2::new(45.0, 45.0), Vec2::ZERO, &big)
        .expect("insert");
    let small = WorldBounds::new(-20.0, 20.0, -20.0, 20.0);
    sim.tick(0.01, &small, &mut rng);
    let p = &sim.particles()[0];
    assert!(small.contains(p.pos), "{:?}", p.pos);
}

#[test]
fn elastic_head_on_collision_conserves_momentum() {
    let bounds = WorldBounds::default();
    let cfg = SimConfig {
        force_model: ForceModel::Elastic(ElasticParams { restitution: 1.0 }),
        ..still_config()
    };
    let mut sim = ParticleSimulator::new(cfg).expect("sim");
    assert_eq!(sim.interaction_name(), "elastic");
    sim.insert_particle(Vec2::new(-0.5, 40.0), Vec2::new(10.0, 0.0), &bounds)
        .expect("insert");
    sim.insert_particle(Vec2::new(0.5, 40.0), Vec2::new(-10.0, 0.0), &bounds)
        .expect("insert");
    sim.tick(0.01, &bounds, &mut rng());

    let v: Vec<Vec2> = sim.particles().iter().map(|p| p.vel).collect();
    assert_eq!(v[0], Vec2::new(-10.0, 0.0));
    assert_eq!(v[1], Vec2::new(10.0, 0.0));
    assert_eq!(v[0].x + v[1].x, 0.0);
}

#[test]
fn sph_pressure_pushes_pair_apart_symmetrically() {
    let bounds = WorldBounds::default();
    let cfg = SimConfig {
        force_model: ForceModel::Sph(SphParams {
            rest_density: 0.0,
            ..SphParams::default()
        }),
        ..still_config()
    };
    let mut sim = ParticleSimulator::new(cfg).expect("sim");
    assert_eq!(sim.interaction_name(), "sph");
    sim.insert_particle(Vec2::new(-1.0, 40.0), Vec2::ZERO, &bounds)
        .expect("insert");
    sim.insert_particle(Vec2::new(1.0, 40.0), Vec2::ZERO, &bounds)
        .expect("insert");
    sim.tick(0.01, &bounds, &mut rng());

    let ps = sim.particles();
    assert!(ps[0].vel.x < 0.0);
    assert!(ps[1].vel.x > 0.0);
    assert!((ps[0].vel.x + ps[1].vel.x).abs() < 1e-9);
    assert!(ps[0].vel.y.abs() < 1e-12 && ps[1].vel.y.abs() < 1e-12);
    assert!(ps[0].density > 0.0 && ps[0].pressure > 0.0);
}

#[test]
fn wall_contact_clamps_to_bound_and_reflects() {
    let bounds = WorldBounds::default();
    let mut sim = ParticleSimulator::new(still_config()).expect("sim");
    sim.insert_particle(Vec2::new(49.0, 30.0), Vec2::new(100.0, 0.0), &bounds)
        .expect("insert");
    sim.tick(0.1, &bounds, &mut rng());

    let p = &sim.particles()[0];
    assert_eq!(p.pos.x, 50.0);
    assert_eq!(p.vel.x, -50.0);
    assert_eq!(p.state, ParticleState::InFlight);
}

#[test]
fn intaken_particle_is_removed_after_latency() {
    let bounds = WorldBounds::default();
    let cfg = SimConfig {
        server_latency_ms: 100.0,
        ..still_config()
    };
    let mut sim = ParticleSimulator::new(cfg).expect("sim");
    sim.insert_particle(Vec2::new(0.0, -30.0), Vec2::ZERO, &bounds)
        .expect("insert");
    let mut rng = rng();

    sim.tick(0.05, &bounds, &mut rng);
    let p = &sim.particles()[0];
    assert_eq!(p.state, ParticleState::Intaken);
    assert_eq!(p.start_processing_ms, sim.clock_ms());

    sim.tick(0.05, &bounds, &mut rng);
    assert_eq!(sim.particles().len(), 1);

    sim.tick(0.05, &bounds, &mut rng);
    sim.tick(0.05, &bounds, &mut rng);
    assert!(sim.particles().is_empty());
    assert_eq!(sim.stats().intaken, 1);
    assert_eq!(sim.stats().processed, 1);
    assert!(sim.is_drained());
}

#[test]
fn removed_ids_are_reported_for_one_tick() {
    let bounds = WorldBounds::default();
    let cfg = SimConfig {
        server_latency_ms: 0.0,
        ..still_config()
    };
    let mut sim = ParticleSimulator::new(cfg).expect("sim");
    let id = sim
        .insert_particle(Vec2::new(1.0, -40.0), Vec2::ZERO, &bounds)
        .expect("insert");
    let mut rng = rng();
    sim.tick(0.01, &bounds, &mut rng);
    assert_eq!(sim.removed(), &[id]);
    sim.tick(0.01, &bounds, &mut rng);
    assert!(sim.removed().is_empty());
}

#[test]
fn set_options_validates_and_applies() {
    let mut sim = ParticleSimulator::new(still_config()).expect("sim");
    assert!(
        sim.set_options(SimOptions {
            particle_radius_scale: 0.0,
            ..SimOptions::default()
        })
        .is_err()
    );
    assert!(
        sim.set_options(SimOptions {
            server_capacity_width: -1.0,
            ..SimOptions::default()
        })
        .is_err()
    );
    assert_eq!(sim.options(), SimOptions::default());

    sim.set_options(SimOptions {
        particle_radius_scale: 2.5,
        server_capacity_width: 4.0,
    })
    .expect("valid options");
    assert_eq!(sim.particle_radius(), 2.5);
    assert_eq!(sim.options().server_capacity_width, 4.0);
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let cfg = SimConfig {
        max_speed: 0.0,
        ..SimConfig::default()
    };
    assert!(ParticleSimulator::new(cfg).is_err());
}

#[test]
fn invalid_bounds_are_rejected_without_touching_state() {
    let bounds = WorldBounds::default();
    let mut sim = ParticleSimulator::new(still_config()).expect("sim");
    sim.insert_particle(Vec2::new(0.0, 40.0), Vec2::new(1.0, 0.0), &bounds)
        .expect("insert");

    let inverted = WorldBounds::new(5.0, -5.0, 5.0, -5.0);
    let nan = WorldBounds::new(f64::NAN, 50.0, -50.0, 50.0);
    assert!(sim.restart(&inverted).is_err());
    assert!(sim.restart(&nan).is_err());
    assert_eq!(sim.particles().len(), 1);
    assert!(sim.insert_particle(Vec2::ZERO, Vec2::ZERO, &inverted).is_none());

    let mut rng = rng();
    sim.tick(0.01, &inverted, &mut rng);
    sim.tick(0.01, &nan, &mut rng);
    assert_eq!(sim.clock_ms(), 0.0);
    assert_eq!(sim.stats().ticks, 0);
    assert_eq!(sim.bounds(), bounds);
    assert_eq!(sim.particles()[0].pos, Vec2::new(0.0, 40.0));

    sim.tick(0.01, &bounds, &mut rng);
    assert_eq!(sim.stats().ticks, 1);
}

#[test]
fn default_sph_pair_does_not_gain_relative_speed() {
    let bounds = WorldBounds::default();
    let mut sim = ParticleSimulator::new(still_config()).expect("sim");
    sim.insert_particle(Vec2::new(-1.0, 40.0), Vec2::new(1.0, 0.0), &bounds)
        .expect("insert");
    sim.insert_particle(Vec2::new(1.0, 40.0), Vec2::ZERO, &bounds)
        .expect("insert");
    let ke_before: f64 = sim.particles().iter().map(|p| 0.5 * p.vel.length_sq()).sum();

    sim.tick(1.0 / 60.0, &bounds, &mut rng());

    let ps = sim.particles();
    let v_rel = ps[0].vel.x - ps[1].vel.x;
    assert!(v_rel >= 0.0, "relative velocity reversed: {v_rel}");
    assert!(v_rel <= 1.0, "relative speed grew: {v_rel}");
    let ke_after: f64 = ps.iter().map(|p| 0.5 * p.vel.length_sq()).sum();
    assert!(ke_after <= ke_before, "kinetic energy grew: {ke_before} -> {ke_after}");
}
