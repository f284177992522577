//! Edge cost metrics for the location graph

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// A named cost dimension that routing can optimize over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Travel time in seconds
    Time,
    /// Physical distance in kilometers
    Distance,
    /// Elevation gain in meters
    Gain,
    /// Elevation loss in meters
    Loss,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::Time, Metric::Distance, Metric::Gain, Metric::Loss];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Time => "time",
            Metric::Distance => "distance",
            Metric::Gain => "gain",
            Metric::Loss => "loss",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "time" => Ok(Metric::Time),
            "distance" => Ok(Metric::Distance),
            "gain" => Ok(Metric::Gain),
            "loss" => Ok(Metric::Loss),
            other => Err(Error::InvalidData(format!("unknown metric '{other}'"))),
        }
    }
}

/// Per-edge cost vector, one slot per supported metric.
///
/// An absent slot means the edge cannot be routed through for that metric,
/// not that the cost is zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeMetrics {
    pub time: Option<f64>,
    pub distance: Option<f64>,
    pub gain: Option<f64>,
    pub loss: Option<f64>,
}

impl EdgeMetrics {
    #[must_use]
    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Time => self.time,
            Metric::Distance => self.distance,
            Metric::Gain => self.gain,
            Metric::Loss => self.loss,
        }
    }

    pub fn set(&mut self, metric: Metric, value: f64) {
        match metric {
            Metric::Time => self.time = Some(value),
            Metric::Distance => self.distance = Some(value),
            Metric::Gain => self.gain = Some(value),
            Metric::Loss => self.loss = Some(value),
        }
    }

    /// True when no metric carries a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Metric::ALL.iter().all(|&m| self.get(m).is_none())
    }

    /// True when any carried value is negative.
    #[must_use]
    pub fn has_negative(&self) -> bool {
        Metric::ALL
            .iter()
            .filter_map(|&m| self.get(m))
            .any(|v| v < 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_parses_case_insensitively() {
        assert_eq!("time".parse::<Metric>().unwrap(), Metric::Time);
        assert_eq!(" Distance ".parse::<Metric>().unwrap(), Metric::Distance);
        assert!("speed".parse::<Metric>().is_err());
    }

    #[test]
    fn metrics_round_trip_through_slots() {
        let mut metrics = EdgeMetrics::default();
        assert!(metrics.is_empty());

        metrics.set(Metric::Gain, 12.5);
        assert_eq!(metrics.get(Metric::Gain), Some(12.5));
        assert_eq!(metrics.get(Metric::Time), None);
        assert!(!metrics.is_empty());
    }

    #[test]
    fn negative_values_are_detected() {
        let metrics = EdgeMetrics {
            time: Some(30.0),
            loss: Some(-1.0),
            ..EdgeMetrics::default()
        };
        assert!(metrics.has_negative());
    }
}
