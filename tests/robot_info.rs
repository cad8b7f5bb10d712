// tests/robot_info.rs
use robot_info::{
    EnvSnapshot, Error, HandType, RobotInfo, RuntimeOverrides, Side, VariantRegistry,
    has_all_components, has_any_component, missing_components, validate_component,
    validate_components,
};

fn setup() -> VariantRegistry {
    VariantRegistry::with_builtin_variants().expect("built-in variants register cleanly")
}

#[test]
fn test_explicit_variant() {
    let registry = setup();
    let info = RobotInfo::from_variant(&registry, "vega_1").unwrap();

    assert_eq!(info.robot_model(), "vega_1");
    assert_eq!(info.robot_type(), "vega");
    assert_eq!(info.robot_version(), "1");
    assert_eq!(info.robot_name(), None);
    assert!(info.has_left_arm() && info.has_right_arm());
    assert!(info.has_torso() && info.has_head() && info.has_chassis());
    assert!(!info.has_left_hand() && !info.has_right_hand());
    assert_eq!(info.component_dof("left_arm").unwrap(), 7);
}

#[test]
fn test_variant_from_robot_name() {
    let registry = setup();
    let env = EnvSnapshot::default().with_robot_name("dm/vgabcd123456-1");
    let info = RobotInfo::from_env(&registry, &env).unwrap();

    assert_eq!(info.robot_model(), "vega_1");
    assert_eq!(info.robot_name(), Some("dm/vgabcd123456-1"));

    let pro = EnvSnapshot::default().with_robot_name("dm/vg0123456789-1p");
    assert_eq!(
        RobotInfo::from_env(&registry, &pro).unwrap().robot_model(),
        "vega_1p"
    );
}

#[test]
fn test_robot_config_env_beats_robot_name() {
    let registry = setup();
    let env = EnvSnapshot::default()
        .with_robot_config("vega_1u_f5d6")
        .with_robot_name("dm/vgabcd123456-1");
    let info = RobotInfo::from_env(&registry, &env).unwrap();

    assert_eq!(info.robot_model(), "vega_1u");
    assert!(info.has_left_hand());
}

#[test]
fn test_robot_config_module_file_name() {
    let registry = setup();
    let env = EnvSnapshot::default().with_robot_config("vega_1.py");
    let info = RobotInfo::from_env(&registry, &env).unwrap();

    assert_eq!(info.robot_model(), "vega_1");
    assert!(!info.has_left_hand());
}

#[test]
fn test_explicit_variant_beats_environment() {
    let registry = setup();
    let info = RobotInfo::builder()
        .registry(&registry)
        .variant("vega_1p")
        .env(EnvSnapshot::default().with_robot_config("vega_1u"))
        .build()
        .unwrap();

    assert_eq!(info.robot_model(), "vega_1p");
}

#[test]
fn test_explicit_config_beats_variant() {
    let registry = setup();
    let config = registry.robot_config("vega_1u_gripper").unwrap();
    let info = RobotInfo::builder()
        .registry(&registry)
        .variant("vega_1")
        .config(config)
        .build()
        .unwrap();

    assert_eq!(info.robot_model(), "vega_1u");
    assert!(info.has_right_hand());
    assert!(!info.has_chassis());
}

#[test]
fn test_unresolvable_sources() {
    let registry = setup();

    assert!(matches!(
        RobotInfo::from_env(&registry, &EnvSnapshot::default()),
        Err(Error::VariantResolution(_))
    ));

    let malformed = EnvSnapshot::default().with_robot_name("vega-1");
    assert!(matches!(
        RobotInfo::from_env(&registry, &malformed),
        Err(Error::VariantResolution(_))
    ));

    let unknown_abbr = EnvSnapshot::default().with_robot_name("dm/zzabcd123456-1");
    match RobotInfo::from_env(&registry, &unknown_abbr) {
        Err(Error::VariantResolution(msg)) => assert!(msg.contains("zz"), "{msg}"),
        other => panic!("Expected VariantResolution, got {other:?}"),
    }

    assert!(matches!(
        RobotInfo::from_variant(&registry, "vega_2"),
        Err(Error::UnknownVariant { .. })
    ));

    assert!(matches!(
        RobotInfo::builder().variant("vega_1").build(),
        Err(Error::VariantResolution(_))
    ));
}

#[test]
fn test_component_queries() {
    let registry = setup();
    let info = RobotInfo::from_variant(&registry, "vega_1_f5d6").unwrap();

    assert_eq!(
        info.component_joints("left_hand").unwrap(),
        vec!["L_th_j1", "L_ff_j1", "L_mf_j1", "L_rf_j1", "L_lf_j1", "L_th_j0"]
    );
    assert_eq!(info.component_list().len(), 10);
    assert_eq!(info.pv_components(), vec!["torso", "head"]);
    assert_eq!(info.querable("reboot"), Some("system/reboot"));
    assert_eq!(info.querable("teleport"), None);

    match info.component_dof("tail") {
        Err(Error::ComponentNotFound { component, available }) => {
            assert_eq!(component, "tail");
            assert!(available.contains(&"left_hand".to_owned()));
        }
        other => panic!("Expected ComponentNotFound, got {other:?}"),
    }
}

#[test]
fn test_sensor_enable_respects_model_table() {
    let registry = setup();

    let mut upper = RobotInfo::from_variant(&registry, "vega_1u").unwrap();
    match upper.enable_sensor("chassis_imu", true) {
        Err(Error::SensorNotFound { sensor, model, .. }) => {
            assert_eq!(sensor, "chassis_imu");
            assert_eq!(model, "vega_1u");
        }
        other => panic!("Expected SensorNotFound, got {other:?}"),
    }

    let mut base = RobotInfo::from_variant(&registry, "vega_1").unwrap();
    assert!(!base.has_sensor("chassis_imu"), "Sensors start disabled");
    base.enable_sensor("chassis_imu", true).unwrap();
    assert!(base.has_sensor("chassis_imu"));
    assert_eq!(base.enabled_sensors(), vec!["chassis_imu"]);
}

#[test]
fn test_builder_applies_overrides() {
    let registry = setup();
    let info = RobotInfo::builder()
        .registry(&registry)
        .variant("vega_1")
        .overrides(RuntimeOverrides::new().with_hand_type(Side::Right, HandType::HandF5D6V2))
        .build()
        .unwrap();

    assert!(info.has_right_hand());
    assert!(!info.has_left_hand());
    assert_eq!(info.component_dof("right_hand").unwrap(), 6);
}

#[test]
fn test_environment_switches_reach_components() {
    let registry = setup();
    let env = EnvSnapshot::from_lookup(|key| match key {
        "ROBOT_CONFIG" => Some("vega_1".to_owned()),
        "DISABLE_HEARTBEAT" => Some("1".to_owned()),
        _ => None,
    });
    let info = RobotInfo::from_env(&registry, &env).unwrap();

    assert!(!info.component_config("heartbeat").unwrap().enabled);
    assert!(info.component_config("estop").unwrap().enabled);
}

#[test]
fn test_validators() {
    let registry = setup();
    let info = RobotInfo::from_variant(&registry, "vega_1u").unwrap();

    assert!(validate_component(&info, "head").is_ok());
    assert!(has_all_components(&info, &["left_arm", "right_arm"]));
    assert!(!has_all_components(&info, &["left_arm", "chassis"]));
    assert!(has_any_component(&info, &["chassis", "head"]));
    assert!(!has_any_component(&info, &["chassis", "torso"]));
    assert_eq!(
        missing_components(&info, &["torso", "head", "chassis"]),
        vec!["torso", "chassis"]
    );

    match validate_components(&info, &["head", "chassis"]) {
        Err(Error::MissingComponents {
            robot_type,
            missing,
            available,
        }) => {
            assert_eq!(robot_type, "vega");
            assert_eq!(missing, vec!["chassis"]);
            assert!(available.contains(&"head".to_owned()));
        }
        other => panic!("Expected MissingComponents, got {other:?}"),
    }
}

#[test]
fn test_debug_does_not_bind() {
    let registry = setup();
    let info = RobotInfo::from_variant(&registry, "vega_1").unwrap();

    let text = format!("{info:?}");
    assert!(text.contains("vega_1"), "{text}");
    assert!(text.contains("not loaded"), "{text}");
}
