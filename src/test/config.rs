use crate::sim::{ConfigError, ElasticParams, ForceModel, SimConfig, SimOptions};

#[test]
fn empty_json_yields_defaults() {
    let cfg = SimConfig::from_json_str("{}").expect("parse");
    assert_eq!(cfg, SimConfig::default());
    assert!(matches!(cfg.force_model, ForceModel::Sph(_)));
}

#[test]
fn elastic_model_is_selected_by_kind_tag() {
    let cfg = SimConfig::from_json_str(
        r#"{ "max_particles": 64, "force_model": { "kind": "elastic", "restitution": 0.5 } }"#,
    )
    .expect("parse");
    assert_eq!(cfg.max_particles, 64);
    assert_eq!(
        cfg.force_model,
        ForceModel::Elastic(ElasticParams { restitution: 0.5 })
    );
}

#[test]
fn partial_sph_params_keep_remaining_defaults() {
    let cfg = SimConfig::from_json_str(r#"{ "force_model": { "kind": "sph", "viscosity": 3.0 } }"#)
        .expect("parse");
    match cfg.force_model {
        ForceModel::Sph(p) => {
            assert_eq!(p.viscosity, 3.0);
            assert_eq!(p.smoothing_factor, 4.0);
        }
        other => panic!("expected sph, got {other:?}"),
    }
}

#[test]
fn out_of_range_values_are_rejected() {
    for raw in [
        r#"{ "max_particles": 0 }"#,
        r#"{ "wall_damping": 2.0 }"#,
        r#"{ "server_latency_ms": -1.0 }"#,
        r#"{ "quadtree_capacity": 0 }"#,
        r#"{ "options": { "particle_radius_scale": 0.0 } }"#,
        r#"{ "force_model": { "kind": "elastic", "restitution": 1.5 } }"#,
    ] {
        let err = SimConfig::from_json_str(raw).expect_err(raw);
        assert!(matches!(err, ConfigError::InvalidParam(_)), "{raw}: {err}");
    }
}

#[test]
fn unknown_force_model_is_a_parse_error() {
    let err = SimConfig::from_json_str(r#"{ "force_model": { "kind": "mpm" } }"#)
        .expect_err("must fail");
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn options_validation() {
    assert!(SimOptions::default().validate().is_ok());
    let zero_width = SimOptions {
        server_capacity_width: 0.0,
        ..SimOptions::default()
    };
    assert!(zero_width.validate().is_ok());
    let nan_scale = SimOptions {
        particle_radius_scale: f64::NAN,
        ..SimOptions::default()
    };
    assert!(nan_scale.validate().is_err());
}

#[test]
fn switching_to_the_same_kind_keeps_tuned_params() {
    let tuned = ForceModel::Elastic(ElasticParams { restitution: 0.25 });
    assert_eq!(
        tuned.clone().with_kind("elastic").expect("same kind"),
        tuned
    );
    assert_eq!(
        tuned.clone().with_kind(" SPH ").expect("switch"),
        ForceModel::default()
    );
    assert_eq!(
        ForceModel::default().with_kind("elastic").expect("switch"),
        ForceModel::Elastic(ElasticParams::default())
    );
    let err = tuned.with_kind("mpm").expect_err("unknown kind");
    assert!(matches!(err, ConfigError::InvalidParam(_)));
}
