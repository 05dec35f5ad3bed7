/// Playback volume, always within `0.0..=1.0`
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Volume(f64);

impl Volume {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 1.0;

    pub fn new(volume: f64) -> Self {
        if volume.is_nan() {
            return Self(Self::MIN);
        }
        Self(volume.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn offset(self, delta: f64) -> Self {
        Self::new(self.0 + delta)
    }
}

impl std::fmt::Display for Volume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}%", self.0 * 100.0)
    }
}

/// Parses the "Max kbps" prompt. Blank input means unbounded (0).
pub fn parse_connection_speed(input: &str) -> Result<u64, std::num::ParseIntError> {
    match input.trim() {
        "" => Ok(0),
        s => s.parse(),
    }
}

pub const CONTROLS: &str = "\
G\t\tGo to channel
+/-\t\tChange volume
D-Click\tToggle full screen
Esc\t\tExit full screen
S\t\tSet bandwidth limit
H\t\tControls info
Q\t\tQuit";
