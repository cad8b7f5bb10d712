//! Sensor configuration records.

use crate::component::Side;
use serde::{Deserialize, Serialize};

/// Transport used for camera RGB streams. Depth always goes over Zenoh.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Reliable, JPEG compressed.
    #[default]
    Zenoh,
    /// Low latency, hardware accelerated video.
    Rtc,
}

/// One derived camera stream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraStream {
    pub enabled: bool,
    pub name: String,
    pub transport: Transport,
    pub topic: String,
    pub rtc_channel: Option<String>,
}

/// The sensor kinds fitted across the robot family.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SensorKind {
    /// Stereo head camera with left/right RGB and depth.
    ZedXCamera {
        name: String,
        transport: Transport,
        enable_rgb: bool,
        enable_depth: bool,
    },
    /// Mono wrist camera.
    ZedXOneCamera {
        name: String,
        transport: Transport,
        side: Side,
    },
    ChassisImu,
    /// IMU built into a ZED camera.
    ZedImu { camera: String },
    Lidar3d { name: String },
    RpLidar { name: String },
    Ultrasonic,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Sensors are off until explicitly enabled.
    pub enabled: bool,
    #[serde(flatten)]
    pub kind: SensorKind,
}

impl From<SensorKind> for SensorConfig {
    fn from(kind: SensorKind) -> Self {
        Self {
            enabled: false,
            kind,
        }
    }
}

impl SensorConfig {
    pub fn zed_x(name: &str) -> Self {
        SensorKind::ZedXCamera {
            name: name.to_owned(),
            transport: Transport::Zenoh,
            enable_rgb: true,
            enable_depth: true,
        }
        .into()
    }

    pub fn zed_x_one(side: Side) -> Self {
        SensorKind::ZedXOneCamera {
            name: "wrist_camera".to_owned(),
            transport: Transport::Zenoh,
            side,
        }
        .into()
    }

    pub fn chassis_imu() -> Self {
        SensorKind::ChassisImu.into()
    }

    pub fn zed_imu(camera: &str) -> Self {
        SensorKind::ZedImu {
            camera: camera.to_owned(),
        }
        .into()
    }

    pub fn lidar_3d(name: &str) -> Self {
        SensorKind::Lidar3d {
            name: name.to_owned(),
        }
        .into()
    }

    pub fn rplidar(name: &str) -> Self {
        SensorKind::RpLidar {
            name: name.to_owned(),
        }
        .into()
    }

    pub fn ultrasonic() -> Self {
        SensorKind::Ultrasonic.into()
    }

    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            SensorKind::ZedXCamera { .. } => "zed_x_camera",
            SensorKind::ZedXOneCamera { .. } => "zed_x_one_camera",
            SensorKind::ChassisImu => "chassis_imu",
            SensorKind::ZedImu { .. } => "zed_imu",
            SensorKind::Lidar3d { .. } => "lidar_3d",
            SensorKind::RpLidar { .. } => "rplidar",
            SensorKind::Ultrasonic => "ultrasonic",
        }
    }

    /// Primary data topic. Stereo cameras publish per stream, see [`streams`](Self::streams).
    pub fn topic(&self) -> Option<String> {
        match &self.kind {
            SensorKind::ZedXCamera { .. } => None,
            SensorKind::ZedXOneCamera { name, side, .. } => {
                Some(format!("sensors/{side}_{name}/rgb"))
            }
            SensorKind::ChassisImu => Some("state/chassis_imu".to_owned()),
            SensorKind::ZedImu { camera } => Some(format!("sensors/{camera}/imu")),
            SensorKind::Lidar3d { .. } => Some("sensors/lidar_3d/points".to_owned()),
            SensorKind::RpLidar { .. } => Some("sensors/lidar_front/scan".to_owned()),
            SensorKind::Ultrasonic => Some("state/ultrasonic".to_owned()),
        }
    }

    /// Camera streams derived from this sensor. Empty for non-camera sensors.
    ///
    /// A stream is enabled only if both the sensor and that stream are enabled.
    pub fn streams(&self) -> Vec<CameraStream> {
        match &self.kind {
            SensorKind::ZedXCamera {
                name,
                transport,
                enable_rgb,
                enable_depth,
            } => {
                let rgb = |eye: &str| CameraStream {
                    enabled: self.enabled && *enable_rgb,
                    name: format!("{eye}_rgb"),
                    transport: *transport,
                    topic: format!("sensors/{name}/{eye}_rgb"),
                    rtc_channel: Some(format!("sensors/{name}/{eye}_rgb_rtc")),
                };
                vec![
                    rgb("left"),
                    rgb("right"),
                    CameraStream {
                        enabled: self.enabled && *enable_depth,
                        name: "depth".to_owned(),
                        transport: *transport,
                        topic: format!("sensors/{name}/depth"),
                        rtc_channel: None,
                    },
                ]
            }
            SensorKind::ZedXOneCamera {
                name,
                transport,
                side,
            } => vec![CameraStream {
                enabled: self.enabled,
                name: "rgb".to_owned(),
                transport: *transport,
                topic: format!("sensors/{side}_{name}/rgb"),
                rtc_channel: Some(format!("sensors/{side}_{name}/rgb_rtc")),
            }],
            _ => Vec::new(),
        }
    }
}
