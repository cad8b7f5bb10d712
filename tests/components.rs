// tests/components.rs
use approx::assert_relative_eq;
use robot_info::{
    ComponentConfig, ComponentKind, Error, HandConfig, HandModel, QueryKind, SensorConfig, Side,
    TopicKind, Transport, VariantRegistry,
};

fn setup() -> VariantRegistry {
    VariantRegistry::with_builtin_variants().expect("built-in variants register cleanly")
}

#[test]
fn test_bilateral_joints_differ_only_by_prefix() {
    let registry = setup();

    for name in registry.available_variants() {
        let config = registry.robot_config(name).unwrap();
        for part in ["arm", "hand"] {
            let (Some(left), Some(right)) = (
                config.components.get(&Side::Left.component_key(part)),
                config.components.get(&Side::Right.component_key(part)),
            ) else {
                continue;
            };

            let left = left.joints();
            let right = right.joints();
            assert_eq!(left.len(), right.len(), "{name}: {part} joint counts differ");
            for (l, r) in left.iter().zip(&right) {
                assert_eq!(
                    l.strip_prefix("L_"),
                    r.strip_prefix("R_"),
                    "{name}: {l} does not mirror {r}"
                );
                assert!(l.starts_with("L_"), "{name}: {l} lacks the left prefix");
            }
        }
    }
}

#[test]
fn test_dof_matches_joint_count_everywhere() {
    let registry = setup();

    for name in registry.available_variants() {
        let config = registry.robot_config(name).unwrap();
        for (key, component) in config.components.iter() {
            assert_eq!(
                component.dof(),
                component.joints().len(),
                "{name}/{key}: dof disagrees with joints"
            );
        }
    }
}

#[test]
fn test_component_tables_per_body() {
    let registry = setup();

    let full = registry.robot_config("vega_1_f5d6").unwrap();
    let keys: Vec<&str> = full.components.keys().collect();
    assert_eq!(
        keys,
        vec![
            "left_arm",
            "right_arm",
            "torso",
            "chassis",
            "head",
            "left_hand",
            "right_hand",
            "battery",
            "estop",
            "heartbeat",
        ]
    );

    let upper = registry.robot_config("vega_1u").unwrap();
    assert!(!upper.has_component("torso"));
    assert!(!upper.has_component("chassis"));
    assert!(!upper.has_component("battery"));
    assert!(!upper.has_component("left_hand"));
    assert!(upper.has_component("head"));
}

#[test]
fn test_joint_names() {
    let arm = ComponentConfig::arm(Side::Right);
    assert_eq!(arm.dof(), 7);
    assert_eq!(arm.joints()[0], "R_arm_j1");
    assert_eq!(arm.joints()[6], "R_arm_j7");

    let hand = ComponentConfig::hand(HandConfig::new(Side::Left, HandModel::F5D6V2));
    assert_eq!(
        hand.joints(),
        vec!["L_th_j1", "L_ff_j1", "L_mf_j1", "L_rf_j1", "L_lf_j1", "L_th_j0"]
    );

    let gripper = ComponentConfig::hand(HandConfig::new(Side::Right, HandModel::DexDGripper));
    assert_eq!(gripper.joints(), vec!["R_gripper_j1"]);

    assert_eq!(ComponentConfig::head().joints(), vec!["head_j1", "head_j2", "head_j3"]);
    assert_eq!(
        ComponentConfig::chassis().joints(),
        vec!["L_wheel_j1", "R_wheel_j1", "L_wheel_j2", "R_wheel_j2"]
    );
    assert_eq!(ComponentConfig::estop().dof(), 0);
}

#[test]
fn test_topic_names() {
    let left_arm = ComponentConfig::arm(Side::Left);
    assert_eq!(left_arm.topic_name(TopicKind::State).unwrap(), "state/arm/left");
    assert_eq!(
        left_arm.topic_name(TopicKind::PassThrough).unwrap(),
        "control/ee_pass_through/left"
    );

    let hand = ComponentConfig::hand(HandConfig::new(Side::Right, HandModel::F5D6V2));
    assert_eq!(hand.topic_name(TopicKind::Control).unwrap(), "control/hand/right");
    assert_eq!(
        hand.topic_name(TopicKind::TouchSensor).unwrap(),
        "state/hand/right/touch"
    );

    let gripper = ComponentConfig::hand(HandConfig::new(Side::Left, HandModel::DexDGripper));
    assert_eq!(gripper.topic_name(TopicKind::State).unwrap(), "state/gripper/left");

    assert_eq!(
        ComponentConfig::chassis()
            .topic_name(TopicKind::DriveControl)
            .unwrap(),
        "control/chassis/drive"
    );
    assert_eq!(
        ComponentConfig::heartbeat()
            .topic_name(TopicKind::Heartbeat)
            .unwrap(),
        "heartbeat"
    );
}

#[test]
fn test_unmapped_names_are_config_errors() {
    let v1_hand = ComponentConfig::hand(HandConfig::new(Side::Left, HandModel::F5D6V1));
    match v1_hand.topic_name(TopicKind::TouchSensor) {
        Err(Error::Config(msg)) => {
            assert!(msg.contains("touch_sensor"), "{msg}");
            assert!(msg.contains("left hand"), "{msg}");
        }
        other => panic!("Expected Config error, got {other:?}"),
    }

    assert!(matches!(
        ComponentConfig::head().topic_name(TopicKind::Wrench),
        Err(Error::Config(_))
    ));
    assert!(matches!(
        ComponentConfig::arm(Side::Left).query_name(QueryKind::Estop),
        Err(Error::Config(_))
    ));
}

#[test]
fn test_query_names() {
    let right_arm = ComponentConfig::arm(Side::Right);
    assert_eq!(right_arm.query_name(QueryKind::Mode).unwrap(), "mode/arm/right");
    assert_eq!(
        right_arm.query_name(QueryKind::BaudRate).unwrap(),
        "system/ee_baud_rate/right"
    );
    assert_eq!(
        ComponentConfig::estop().query_name(QueryKind::Estop).unwrap(),
        "system/estop"
    );
}

#[test]
fn test_arm_pose_pool_mirrors() {
    let left = ComponentConfig::arm(Side::Left).pose_pool();
    let right = ComponentConfig::arm(Side::Right).pose_pool();
    let signs: [f32; 7] = [-1.0, -1.0, -1.0, 1.0, -1.0, -1.0, -1.0];

    assert_eq!(left.key_list(), right.key_list());
    for (name, left_pose) in left.iter() {
        let right_pose = right.get(name).unwrap();
        for ((l, r), sign) in left_pose.iter().zip(right_pose).zip(signs) {
            assert_relative_eq!(*r, l * sign);
        }
    }

    let folded = right.get("folded").unwrap();
    assert_relative_eq!(folded[0], -1.57079);
    assert_relative_eq!(folded[3], -3.1);
}

#[test]
fn test_component_serializes_with_kind_tag() {
    let json = serde_json::to_value(ComponentConfig::estop()).unwrap();
    assert_eq!(json["type"], "estop");
    assert_eq!(json["enabled"], true);

    let hand: ComponentConfig = serde_json::from_value(serde_json::json!({
        "type": "hand",
        "enabled": false,
        "side": "right",
        "pv_mode": true,
        "model": "dex_s_gripper",
    }))
    .unwrap();
    assert!(!hand.enabled);
    assert_eq!(hand.side(), Side::Right);
    assert!(matches!(
        hand.kind,
        ComponentKind::Hand(HandConfig { model: HandModel::DexSGripper, .. })
    ));
}

#[test]
fn test_camera_streams_follow_sensor_switch() {
    let mut head = SensorConfig::zed_x("head_camera");
    assert!(head.streams().iter().all(|s| !s.enabled), "Disabled sensor leaks a stream");

    head.enabled = true;
    let streams = head.streams();
    let names: Vec<&str> = streams.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["left_rgb", "right_rgb", "depth"]);
    assert!(streams.iter().all(|s| s.enabled));
    assert_eq!(streams[2].topic, "sensors/head_camera/depth");
    assert_eq!(streams[2].rtc_channel, None);
    assert_eq!(streams[0].transport, Transport::Zenoh);

    let mut wrist = SensorConfig::zed_x_one(Side::Left);
    wrist.enabled = true;
    assert_eq!(
        wrist.topic().as_deref(),
        Some("sensors/left_wrist_camera/rgb")
    );
    assert_eq!(wrist.streams().len(), 1);

    let mut right = SensorConfig::zed_x_one(Side::Right);
    right.enabled = true;
    assert_eq!(
        wrist.streams()[0].rtc_channel.as_deref(),
        Some("sensors/left_wrist_camera/rgb_rtc")
    );
    assert_eq!(
        right.streams()[0].rtc_channel.as_deref(),
        Some("sensors/right_wrist_camera/rgb_rtc"),
        "Wrist camera channels must not collide across sides"
    );
}

#[test]
fn test_gripper_variants_carry_wrist_cameras() {
    let registry = setup();

    let gripper = registry.robot_config("vega_1_gripper").unwrap();
    assert!(gripper.sensors.contains_key("left_wrist_camera"));
    assert!(gripper.sensors.contains_key("right_wrist_camera"));

    let f5d6 = registry.robot_config("vega_1_f5d6").unwrap();
    assert!(!f5d6.sensors.contains_key("left_wrist_camera"));
}
