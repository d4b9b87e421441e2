use std::fmt::{Display, Formatter};

/// A controllable signal of the unit, identified on the wire by its uid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlPoint {
    PowerOnOff,
    FanLevel,
}

impl ControlPoint {
    /// Control points that must be advertised by the device before anything is written.
    pub const REQUIRED: [ControlPoint; 2] = [ControlPoint::PowerOnOff, ControlPoint::FanLevel];

    pub fn uid(&self) -> u32 {
        match self {
            ControlPoint::PowerOnOff => 1,
            ControlPoint::FanLevel => 4,
        }
    }

    /// The uid as it appears as a key in `signals.uid` of the schema document.
    pub fn key(&self) -> String {
        self.uid().to_string()
    }

    pub fn expected_label(&self) -> &'static str {
        match self {
            ControlPoint::PowerOnOff => "On/Off",
            ControlPoint::FanLevel => "Fan Speed",
        }
    }
}

impl Display for ControlPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ControlPoint::PowerOnOff => write!(f, "PowerOnOff"),
            ControlPoint::FanLevel => write!(f, "FanLevel"),
        }
    }
}

/// A single value to write to a control point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatapointValue {
    pub control_point: ControlPoint,
    pub value: i64,
}

impl DatapointValue {
    pub fn new(control_point: ControlPoint, value: i64) -> Self {
        DatapointValue { control_point, value }
    }
}

impl Display for DatapointValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.control_point, self.value)
    }
}
