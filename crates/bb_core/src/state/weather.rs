//! Continuous weather model for a ballpark.
//!
//! A fresh sample is derived from latitude, longitude, day of year and
//! local solar time. Once a prior sample exists every field moves toward
//! the new target no faster than [`MAX_CHANGE_PER_MINUTE`] allows, so
//! conditions drift rather than jump between half-innings.

use std::f64::consts::PI;

use chrono::{DateTime, Datelike, Timelike, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;
use tracing::debug;

use crate::models::{CompassPoint, WeatherSample};

/// Samples younger than this are reused unless a refresh is forced.
const CACHE_SECONDS: i64 = 5 * 60;

/// Below this temperature (°C) precipitation can fall as snow.
const SNOW_TEMPERATURE: f64 = 2.0;

/// Cloud cover floor while it is precipitating.
const PRECIPITATION_MIN_CLOUD: f64 = 75.0;

/// Longitudes west/east of these count as coastal (North American parks).
const WEST_COAST_LONGITUDE: f64 = -117.0;
const EAST_COAST_LONGITUDE: f64 = -81.0;

/// Weight of the planetary wind pattern against the local sea breeze.
const GLOBAL_WIND_WEIGHT: f64 = 0.6;

pub struct RateLimits {
    pub temperature: f64,
    pub humidity: f64,
    pub cloud_cover: f64,
    pub precipitation: f64,
    pub snow: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
}

pub const MAX_CHANGE_PER_MINUTE: RateLimits = RateLimits {
    temperature: 0.05,
    humidity: 0.5,
    cloud_cover: 2.0,
    precipitation: 2.0,
    snow: 1.0,
    wind_speed: 0.5,
    wind_direction: 3.0,
};

/// Weather at one location, sampled against the simulated clock.
#[derive(Debug, Clone)]
pub struct WeatherState {
    latitude: f64,
    longitude: f64,
    rng: ChaCha8Rng,
    last: Option<(DateTime<Utc>, WeatherSample)>,
}

impl WeatherState {
    pub fn new(latitude: f64, longitude: f64, seed: u64) -> Self {
        Self { latitude, longitude, rng: ChaCha8Rng::seed_from_u64(seed), last: None }
    }

    pub fn last_sample_timestamp(&self) -> Option<DateTime<Utc>> {
        self.last.as_ref().map(|(at, _)| *at)
    }

    /// Conditions at `timestamp`.
    ///
    /// Returns the cached sample when the previous one is under five
    /// minutes old, unless `force` is set.
    pub fn get_weather(&mut self, timestamp: DateTime<Utc>, force: bool) -> WeatherSample {
        if let Some((at, sample)) = &self.last {
            let age = (timestamp - *at).num_seconds();
            if !force && (0..CACHE_SECONDS).contains(&age) {
                debug!(age_seconds = age, "Reusing cached weather sample");
                return *sample;
            }
        }

        let target = self.base_sample(timestamp);
        let sample = match self.last {
            Some((at, previous)) => {
                let minutes = (timestamp - at).num_seconds().unsigned_abs() as f64 / 60.0;
                constrain(rate_limit(&previous, &target, minutes), Some(&previous))
            }
            None => constrain(target, None),
        };

        debug!(
            temperature = sample.temperature,
            wind_speed = sample.wind_speed,
            wind_from = %sample.wind_description,
            "Computed weather sample"
        );
        self.last = Some((timestamp, sample));
        sample
    }

    fn is_coastal(&self) -> bool {
        self.longitude <= WEST_COAST_LONGITUDE || self.longitude >= EAST_COAST_LONGITUDE
    }

    /// Unconstrained target conditions for the moment.
    fn base_sample(&mut self, timestamp: DateTime<Utc>) -> WeatherSample {
        let abs_lat = self.latitude.abs();
        let northern = self.latitude >= 0.0;
        let day = timestamp.ordinal() as f64;
        let utc_hour = timestamp.hour() as f64 + timestamp.minute() as f64 / 60.0;
        let local_hour = (utc_hour + self.longitude / 15.0).rem_euclid(24.0);
        // Peaks at 15:00 local solar time.
        let diurnal = (2.0 * PI * (local_hour - 9.0) / 24.0).sin();

        // Coldest in mid-January in the north, mid-July in the south.
        let amplitude = abs_lat / 90.0 * 15.0;
        let season = -(2.0 * PI * (day - 15.0) / 365.0).cos();
        let seasonal = if northern { season * amplitude } else { -season * amplitude };
        let temperature = 30.0 - abs_lat * 0.5 + seasonal + diurnal * 5.0 + self.normal(0.0, 1.0);

        let coastal = self.is_coastal();
        let humidity_base = if coastal { 0.70 } else { 0.50 };
        let precipitation_chance = if coastal { 0.3 } else { 0.2 };
        let humidity = self.bounded_normal(humidity_base, 0.15) * 100.0;
        let cloud_cover = self.bounded_normal(humidity / 100.0 - 0.1, 0.2) * 100.0;
        let precipitation = if self.rng.gen_bool(precipitation_chance) {
            self.bounded_normal(0.3, 0.2) * 100.0
        } else {
            0.0
        };
        let snow = if temperature < SNOW_TEMPERATURE { precipitation } else { 0.0 };

        let band_speed = if abs_lat < 30.0 {
            12.0
        } else if abs_lat < 60.0 {
            15.0
        } else {
            10.0
        };
        let wind_speed = (band_speed + diurnal * 3.0 + self.normal(0.0, 2.0)).max(0.0);

        let global = global_wind_direction(self.latitude);
        let direction = match self.local_breeze(local_hour) {
            Some(local) => blend_directions(global, local, GLOBAL_WIND_WEIGHT),
            None => global,
        };
        let wind_direction = (direction + self.normal(0.0, 15.0)).rem_euclid(360.0);

        WeatherSample {
            temperature,
            humidity,
            cloud_cover,
            precipitation,
            snow,
            wind_speed,
            wind_direction,
            wind_description: CompassPoint::from_degrees(wind_direction),
        }
    }

    /// Onshore by day, offshore by night. Inland parks have none.
    fn local_breeze(&self, local_hour: f64) -> Option<f64> {
        if !self.is_coastal() {
            return None;
        }
        let daytime = (9.0..18.0).contains(&local_hour);
        let sea = if self.longitude <= WEST_COAST_LONGITUDE { 270.0 } else { 90.0 };
        Some(if daytime { sea } else { (sea + 180.0) % 360.0 })
    }

    fn normal(&mut self, mean: f64, sd: f64) -> f64 {
        let z: f64 = self.rng.sample(StandardNormal);
        mean + z * sd
    }

    /// Normal draw resampled until it lands in `[0, 1]`.
    fn bounded_normal(&mut self, mean: f64, sd: f64) -> f64 {
        let mean = mean.clamp(0.0, 1.0);
        loop {
            let value = self.normal(mean, sd);
            if (0.0..=1.0).contains(&value) {
                return value;
            }
        }
    }
}

/// Prevailing wind (direction it blows from) for the latitude band.
fn global_wind_direction(latitude: f64) -> f64 {
    let northern = latitude >= 0.0;
    let abs_lat = latitude.abs();
    if abs_lat < 30.0 {
        if northern { 45.0 } else { 135.0 }
    } else if abs_lat < 60.0 {
        if northern { 240.0 } else { 300.0 }
    } else {
        90.0
    }
}

/// Weighted vector average of two compass bearings.
fn blend_directions(a: f64, b: f64, weight_a: f64) -> f64 {
    let weight_b = 1.0 - weight_a;
    let x = weight_a * a.to_radians().cos() + weight_b * b.to_radians().cos();
    let y = weight_a * a.to_radians().sin() + weight_b * b.to_radians().sin();
    y.atan2(x).to_degrees().rem_euclid(360.0)
}

fn approach(from: f64, to: f64, max_step: f64) -> f64 {
    from + (to - from).clamp(-max_step, max_step)
}

/// Steps around the circle the short way.
fn approach_bearing(from: f64, to: f64, max_step: f64) -> f64 {
    let diff = (to - from + 540.0).rem_euclid(360.0) - 180.0;
    (from + diff.clamp(-max_step, max_step)).rem_euclid(360.0)
}

fn rate_limit(previous: &WeatherSample, target: &WeatherSample, minutes: f64) -> WeatherSample {
    let limits = &MAX_CHANGE_PER_MINUTE;
    let wind_direction =
        approach_bearing(previous.wind_direction, target.wind_direction, limits.wind_direction * minutes);
    WeatherSample {
        temperature: approach(previous.temperature, target.temperature, limits.temperature * minutes),
        humidity: approach(previous.humidity, target.humidity, limits.humidity * minutes),
        cloud_cover: approach(previous.cloud_cover, target.cloud_cover, limits.cloud_cover * minutes),
        precipitation: approach(previous.precipitation, target.precipitation, limits.precipitation * minutes),
        snow: approach(previous.snow, target.snow, limits.snow * minutes),
        wind_speed: approach(previous.wind_speed, target.wind_speed, limits.wind_speed * minutes),
        wind_direction,
        wind_description: CompassPoint::from_degrees(wind_direction),
    }
}

/// Cross-field rules plus range clamping.
fn constrain(mut sample: WeatherSample, previous: Option<&WeatherSample>) -> WeatherSample {
    if sample.temperature >= SNOW_TEMPERATURE {
        sample.snow = 0.0;
    }
    if sample.precipitation > 0.0 {
        let base = previous.map_or(sample.humidity, |p| p.humidity);
        sample.humidity = sample.humidity.max((base + 20.0).min(100.0));
        sample.cloud_cover = sample.cloud_cover.max(PRECIPITATION_MIN_CLOUD);
    }
    sample.humidity = sample.humidity.clamp(0.0, 100.0);
    sample.cloud_cover = sample.cloud_cover.clamp(0.0, 100.0);
    sample.precipitation = sample.precipitation.clamp(0.0, 100.0);
    sample.snow = sample.snow.clamp(0.0, 100.0);
    sample.wind_speed = sample.wind_speed.max(0.0);
    sample.wind_direction = sample.wind_direction.rem_euclid(360.0);
    sample.wind_description = CompassPoint::from_degrees(sample.wind_direction);
    sample
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn july_evening() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 1, 23, 5, 0).unwrap()
    }

    fn assert_in_bounds(sample: &WeatherSample) {
        for value in [sample.humidity, sample.cloud_cover, sample.precipitation, sample.snow] {
            assert!((0.0..=100.0).contains(&value), "{:?}", sample);
        }
        assert!((0.0..360.0).contains(&sample.wind_direction), "{:?}", sample);
        assert!(sample.wind_speed >= 0.0);
    }

    #[test]
    fn test_cached_within_five_minutes() {
        let mut weather = WeatherState::new(39.05, -94.48, 1);
        let first = weather.get_weather(july_evening(), false);
        let second = weather.get_weather(july_evening() + Duration::minutes(4), false);
        assert_eq!(first, second);
        assert_eq!(weather.last_sample_timestamp(), Some(july_evening()));
    }

    #[test]
    fn test_force_bypasses_cache() {
        let mut weather = WeatherState::new(39.05, -94.48, 1);
        weather.get_weather(july_evening(), false);
        let later = july_evening() + Duration::minutes(1);
        weather.get_weather(later, true);
        assert_eq!(weather.last_sample_timestamp(), Some(later));
    }

    #[test]
    fn test_temperature_change_is_rate_limited() {
        let mut weather = WeatherState::new(47.59, -122.33, 9);
        let mut at = july_evening();
        let mut previous = weather.get_weather(at, false);
        for _ in 0..30 {
            at += Duration::minutes(10);
            let next = weather.get_weather(at, false);
            assert!((next.temperature - previous.temperature).abs() <= 0.5 + 1e-9);
            assert!((next.wind_speed - previous.wind_speed).abs() <= 5.0 + 1e-9);
            previous = next;
        }
    }

    #[test]
    fn test_no_snow_in_summer_heat() {
        let mut weather = WeatherState::new(25.78, -80.22, 3);
        let mut at = Utc.with_ymd_and_hms(2024, 7, 15, 19, 0, 0).unwrap();
        for _ in 0..50 {
            let sample = weather.get_weather(at, true);
            assert_eq!(sample.snow, 0.0);
            at += Duration::minutes(30);
        }
    }

    #[test]
    fn test_precipitation_implies_clouds() {
        let mut weather = WeatherState::new(42.35, -71.10, 5);
        let mut at = july_evening();
        for _ in 0..200 {
            let sample = weather.get_weather(at, true);
            if sample.precipitation > 0.0 {
                assert!(sample.cloud_cover >= PRECIPITATION_MIN_CLOUD);
            }
            at += Duration::minutes(20);
        }
    }

    #[test]
    fn test_bearing_takes_short_way_round() {
        assert_eq!(approach_bearing(350.0, 10.0, 5.0), 355.0);
        assert_eq!(approach_bearing(10.0, 350.0, 5.0), 5.0);
        assert_eq!(approach_bearing(10.0, 12.0, 5.0), 12.0);
    }

    #[test]
    fn test_blend_directions() {
        assert!((blend_directions(90.0, 90.0, 0.6) - 90.0).abs() < 1e-9);
        let mid = blend_directions(350.0, 10.0, 0.5);
        assert!(mid < 1e-6 || (360.0 - mid) < 1e-6);
    }

    #[test]
    fn test_same_seed_same_weather() {
        let mut a = WeatherState::new(39.05, -94.48, 77);
        let mut b = WeatherState::new(39.05, -94.48, 77);
        assert_eq!(a.get_weather(july_evening(), false), b.get_weather(july_evening(), false));
    }

    proptest! {
        #[test]
        fn prop_weather_fields_stay_in_bounds(
            seed in any::<u64>(),
            latitude in -70.0f64..70.0,
            longitude in -160.0f64..-60.0,
            steps in proptest::collection::vec(0i64..240, 1..20),
        ) {
            let mut weather = WeatherState::new(latitude, longitude, seed);
            let mut at = july_evening();
            for minutes in steps {
                at += Duration::minutes(minutes);
                let sample = weather.get_weather(at, false);
                assert_in_bounds(&sample);
            }
        }
    }
}
