use serde::{Deserialize, Serialize};

/// Orientation in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Attitude {
    pub pitch: f32,
    pub roll: f32,
    pub yaw: f32,
}

/// Velocity in m/s, vehicle frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub vx: f32,
    pub vy: f32,
    pub vz: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlightState {
    pub flying: bool,
    pub emergency: bool,
    pub low_battery: bool,
}

/// One decoded navigation data packet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TelemetrySample {
    pub sequence: u32,
    pub attitude: Attitude,
    /// Altitude in meters.
    pub altitude: f32,
    pub velocity: Velocity,
    /// Battery charge in percent.
    pub battery: u8,
    #[serde(default)]
    pub state: FlightState,
}
