use std::fmt;

use serde::{Deserialize, Serialize};

/// Eight-point compass description of where the wind blows from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CompassPoint {
    #[default]
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CompassPoint {
    const OCTANTS: [CompassPoint; 8] = [
        CompassPoint::N,
        CompassPoint::NE,
        CompassPoint::E,
        CompassPoint::SE,
        CompassPoint::S,
        CompassPoint::SW,
        CompassPoint::W,
        CompassPoint::NW,
    ];

    pub fn from_degrees(degrees: f64) -> Self {
        let normalized = degrees.rem_euclid(360.0);
        let index = ((normalized + 22.5) / 45.0).floor() as usize % 8;
        Self::OCTANTS[index]
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// One weather observation. Temperatures are °C, wind speed is mph,
/// the percentage fields are 0-100 and wind direction is degrees in [0, 360).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSample {
    pub temperature: f64,
    pub humidity: f64,
    pub cloud_cover: f64,
    pub precipitation: f64,
    pub snow: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub wind_description: CompassPoint,
}

impl fmt::Display for WeatherSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.0}°C, humidity {:.0}%, clouds {:.0}%, wind {:.0} mph from {}",
            self.temperature,
            self.humidity,
            self.cloud_cover,
            self.wind_speed,
            self.wind_description
        )?;
        if self.snow > 0.0 {
            write!(f, ", snow")
        } else if self.precipitation > 0.0 {
            write!(f, ", rain")
        } else {
            Ok(())
        }
    }
}
