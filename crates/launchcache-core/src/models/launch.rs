use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Description shown when a mission carries none.
const NO_DESCRIPTION: &str = "No Description available";

fn unknown() -> String {
    "Unknown".to_string()
}

fn no_description() -> String {
    NO_DESCRIPTION.to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaunchResponse {
    #[serde(default)]
    pub launches: Vec<Launch>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Launch {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "windowstart", default)]
    pub window_start: Option<String>,
    #[serde(rename = "wsstamp", default)]
    pub window_start_stamp: i64,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub rocket: Option<Rocket>,
    #[serde(default)]
    pub missions: Vec<Mission>,
}

impl Launch {
    /// Case-insensitive substring match against the display name.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }

    /// Window start as a UTC timestamp, `None` when the API sent no stamp.
    pub fn launch_time(&self) -> Option<DateTime<Utc>> {
        if self.window_start_stamp <= 0 {
            return None;
        }
        DateTime::from_timestamp(self.window_start_stamp, 0)
    }

    /// First pad of the launch site, used for map markers.
    pub fn primary_pad(&self) -> Option<&Pad> {
        self.location.as_ref().and_then(|l| l.pads.first())
    }

    pub fn rocket_name(&self) -> &str {
        self.rocket.as_ref().map(|r| r.name.as_str()).unwrap_or("Unknown")
    }

    pub fn mission_summary(&self) -> &str {
        self.missions
            .first()
            .map(|m| m.description.as_str())
            .unwrap_or(NO_DESCRIPTION)
    }

    /// Window start formatted for display, falling back to the raw string.
    pub fn window_display(&self) -> String {
        match self.launch_time() {
            Some(ts) => ts.format("%b %d, %Y %H:%M UTC").to_string(),
            None => self.window_start.clone().unwrap_or_else(|| "TBD".to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub pads: Vec<Pad>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pad {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rocket {
    #[serde(default)]
    pub id: i64,
    #[serde(default = "unknown")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    #[serde(default)]
    pub id: i64,
    #[serde(default = "unknown")]
    pub name: String,
    #[serde(default = "no_description")]
    pub description: String,
    #[serde(default)]
    pub agencies: Vec<Agency>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agency {
    #[serde(default)]
    pub id: i64,
    #[serde(default = "unknown")]
    pub name: String,
}
