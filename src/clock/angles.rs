use std::f64::consts::PI;

use super::DisplayTime;

/// Radians per degree.
pub const RAD_PER_DEGREE: f64 = PI / 180.0;

/// Rotation of each hand in radians, clockwise from twelve o'clock.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HandAngles {
    /// Hour hand, advancing continuously with the minutes.
    pub hour: f64,
    /// Minute hand, stepping once per minute.
    pub minute: f64,
    /// Second hand, stepping once per second.
    pub second: f64,
}

impl HandAngles {
    /// Angles for a displayed time.
    pub fn at(time: DisplayTime) -> Self {
        let hours = (f64::from(time.hour) + f64::from(time.minute) / 60.0) % 12.0;

        Self {
            hour: RAD_PER_DEGREE * 30.0 * hours,
            minute: RAD_PER_DEGREE * 6.0 * f64::from(time.minute),
            second: RAD_PER_DEGREE * 6.0 * f64::from(time.second),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn degrees(radians: f64) -> f64 {
        radians.to_degrees()
    }

    fn assert_degrees(actual: f64, expected: f64) {
        assert!(
            (degrees(actual) - expected).abs() < 1e-9,
            "{} != {expected}",
            degrees(actual)
        );
    }

    #[test]
    fn three_o_clock() {
        let angles = HandAngles::at(DisplayTime::new(3, 0, 0));

        assert_degrees(angles.hour, 90.0);
        assert_degrees(angles.minute, 0.0);
        assert_degrees(angles.second, 0.0);
    }

    #[test]
    fn half_past_six() {
        let angles = HandAngles::at(DisplayTime::new(6, 30, 0));

        assert_degrees(angles.hour, 195.0);
        assert_degrees(angles.minute, 180.0);
    }

    #[test]
    fn afternoon_wraps_to_twelve_hour_dial() {
        let morning = HandAngles::at(DisplayTime::new(3, 15, 20));
        let afternoon = HandAngles::at(DisplayTime::new(15, 15, 20));

        assert_eq!(morning, afternoon);
    }

    #[test]
    fn second_hand_steps_six_degrees() {
        assert_degrees(HandAngles::at(DisplayTime::new(0, 0, 45)).second, 270.0);
    }
}
