//! Handover timing along the highway
//!
//! Converts a call's position, speed and direction into the next station it
//! will enter and the time it takes to get there.

use crate::arrival::Direction;
use crate::error::{Result, SimError};

/// Where a call goes once its current leg is over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hop {
    /// The call crosses into this station with duration left
    Handover(usize),
    /// The call's duration runs out inside the current station
    Complete,
    /// The vehicle drives past the last modeled station
    LeavesHighway,
}

impl Hop {
    /// Whether the call ends after this leg
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Handover(_))
    }
}

/// One leg of a call inside a single station
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leg {
    /// What happens at the end of the leg
    pub hop: Hop,
    /// Time spent in the current station
    pub elapsed: f64,
}

/// Pure geometry of a linear highway of equally spaced stations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    base_diameter: f64,
    base_count: usize,
}

impl Geometry {
    /// Create the geometry for `base_count` stations of `base_diameter` each
    pub fn new(base_diameter: f64, base_count: usize) -> Self {
        Self {
            base_diameter,
            base_count,
        }
    }

    /// Compute the next leg of a call
    ///
    /// `offset` is the position within the station measured from its left
    /// edge; `None` means the call has just crossed into the station and sits
    /// on the edge it entered through, a full diameter away from the exit.
    pub fn next_hop(
        &self,
        station: usize,
        offset: Option<f64>,
        duration: f64,
        velocity: f64,
        direction: Direction,
    ) -> Result<Leg> {
        if !velocity.is_finite() || velocity <= 0.0 {
            return Err(SimError::InvalidVelocity { velocity });
        }

        let (candidate, distance) = match direction {
            Direction::Left => (
                station.checked_sub(1),
                offset.unwrap_or(self.base_diameter),
            ),
            Direction::Right => (
                Some(station + 1).filter(|next| *next < self.base_count),
                offset.map_or(self.base_diameter, |o| self.base_diameter - o),
            ),
        };

        let elapsed = distance / velocity;
        if elapsed >= duration {
            return Ok(Leg {
                hop: Hop::Complete,
                elapsed: duration,
            });
        }

        let hop = candidate.map_or(Hop::LeavesHighway, Hop::Handover);
        Ok(Leg { hop, elapsed })
    }

    /// Station a call vacates when it is handed over into `station`
    ///
    /// `None` when no station lies behind `station` in that direction.
    pub fn previous_station(station: usize, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Left => station.checked_add(1),
            Direction::Right => station.checked_sub(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highway() -> Geometry {
        Geometry::new(10.0, 3)
    }

    #[test]
    fn test_right_handover_from_offset() {
        let leg = highway()
            .next_hop(0, Some(8.0), 100.0, 1.0, Direction::Right)
            .unwrap();
        assert_eq!(leg.hop, Hop::Handover(1));
        assert_eq!(leg.elapsed, 2.0);
    }

    #[test]
    fn test_left_handover_from_offset() {
        let leg = highway()
            .next_hop(2, Some(4.0), 100.0, 2.0, Direction::Left)
            .unwrap();
        assert_eq!(leg.hop, Hop::Handover(1));
        assert_eq!(leg.elapsed, 2.0);
    }

    #[test]
    fn test_boundary_offset_uses_full_diameter() {
        let geo = highway();
        let right = geo.next_hop(1, None, 100.0, 1.0, Direction::Right).unwrap();
        assert_eq!(right, Leg { hop: Hop::Handover(2), elapsed: 10.0 });

        let left = geo.next_hop(1, None, 100.0, 1.0, Direction::Left).unwrap();
        assert_eq!(left, Leg { hop: Hop::Handover(0), elapsed: 10.0 });
    }

    #[test]
    fn test_completes_before_boundary() {
        let geo = Geometry::new(100.0, 1);
        let leg = geo.next_hop(0, Some(0.0), 5.0, 10.0, Direction::Right).unwrap();
        assert_eq!(leg, Leg { hop: Hop::Complete, elapsed: 5.0 });
    }

    #[test]
    fn test_exact_boundary_arrival_completes() {
        // Reaching the edge exactly when the call ends is not a handover
        let leg = highway()
            .next_hop(0, Some(5.0), 5.0, 1.0, Direction::Right)
            .unwrap();
        assert_eq!(leg, Leg { hop: Hop::Complete, elapsed: 5.0 });
    }

    #[test]
    fn test_right_edge_leaves_highway() {
        let leg = highway()
            .next_hop(2, Some(7.0), 100.0, 1.0, Direction::Right)
            .unwrap();
        assert_eq!(leg, Leg { hop: Hop::LeavesHighway, elapsed: 3.0 });
    }

    #[test]
    fn test_left_edge_leaves_highway() {
        let leg = highway()
            .next_hop(0, Some(3.0), 100.0, 1.0, Direction::Left)
            .unwrap();
        assert_eq!(leg, Leg { hop: Hop::LeavesHighway, elapsed: 3.0 });
    }

    #[test]
    fn test_rejects_bad_velocity() {
        let geo = highway();
        for velocity in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = geo.next_hop(0, Some(1.0), 10.0, velocity, Direction::Right);
            assert!(matches!(result, Err(SimError::InvalidVelocity { .. })));
        }
    }

    #[test]
    fn test_previous_station() {
        assert_eq!(Geometry::previous_station(1, Direction::Left), Some(2));
        assert_eq!(Geometry::previous_station(1, Direction::Right), Some(0));
        assert_eq!(Geometry::previous_station(0, Direction::Right), None);
        assert_eq!(Geometry::previous_station(usize::MAX, Direction::Left), None);
    }

    #[test]
    fn test_hop_is_terminal() {
        assert!(Hop::Complete.is_terminal());
        assert!(Hop::LeavesHighway.is_terminal());
        assert!(!Hop::Handover(0).is_terminal());
    }
}
