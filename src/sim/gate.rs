use crate::{SimError, consts::gates};
use arrayvec::ArrayVec;
use glam::Vec2;

/// A pair of posts the car has to drive between
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gate {
    pub left: Vec2,
    pub right: Vec2,
}

impl Gate {
    #[must_use]
    pub const fn new(left: Vec2, right: Vec2) -> Self {
        Self { left, right }
    }

    #[must_use]
    pub fn center(&self) -> Vec2 {
        (self.left + self.right) * 0.5
    }

    #[must_use]
    pub const fn y(&self) -> f32 {
        self.left.y
    }

    #[must_use]
    pub fn width(&self) -> f32 {
        self.right.x - self.left.x
    }

    /// True if `pos` is within `tolerance` of the gate line and between the posts (inclusive)
    #[must_use]
    pub fn is_crossed_by(&self, pos: Vec2, tolerance: f32) -> bool {
        (pos.y - self.y()).abs() <= tolerance && (self.left.x..=self.right.x).contains(&pos.x)
    }
}

pub type GateList = ArrayVec<Gate, { gates::MAX_GATES }>;

/// The ordered, fixed set of gates for one course
#[derive(Clone, Debug, PartialEq)]
pub struct GateCourse {
    gates: GateList,
}

impl Default for GateCourse {
    fn default() -> Self {
        Self {
            gates: gates::DEFAULT_GATES
                .into_iter()
                .map(|(left, right)| Gate::new(left, right))
                .collect(),
        }
    }
}

impl GateCourse {
    /// Builds a course, rejecting empty, oversized or malformed gate lists
    pub fn new<I: IntoIterator<Item = Gate>>(gates: I) -> Result<Self, SimError> {
        let mut list = GateList::new();
        for gate in gates {
            list.try_push(gate)
                .map_err(|_| SimError::InvalidConfig("too many gates for one course"))?;
        }

        let course = Self { gates: list };
        course.validate()?;
        Ok(course)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.gates.is_empty() {
            return Err(SimError::InvalidConfig("a course needs at least one gate"));
        }

        for gate in &self.gates {
            if !(gate.left.is_finite() && gate.right.is_finite()) {
                return Err(SimError::InvalidConfig("gate posts must be finite"));
            }

            if gate.left.y != gate.right.y {
                return Err(SimError::InvalidConfig("gate posts must share the same y"));
            }

            if gate.left.x > gate.right.x {
                return Err(SimError::InvalidConfig("left gate post must not be right of the right post"));
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Gate> {
        self.gates.get(index)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Gate] {
        &self.gates
    }

    /// The point the car should head for while `current` is the next gate
    ///
    /// Past the last gate this is the last gate's center.
    #[must_use]
    pub fn target(&self, current: usize) -> Vec2 {
        self.gates
            .get(current)
            .or_else(|| self.gates.last())
            .map_or(Vec2::ZERO, Gate::center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossing_is_inclusive() {
        let gate = Gate::new(Vec2::new(350.0, 450.0), Vec2::new(450.0, 450.0));
        assert!(gate.is_crossed_by(Vec2::new(350.0, 470.0), 20.0));
        assert!(gate.is_crossed_by(Vec2::new(450.0, 430.0), 20.0));
        assert!(!gate.is_crossed_by(Vec2::new(450.1, 450.0), 20.0));
        assert!(!gate.is_crossed_by(Vec2::new(400.0, 471.0), 20.0));
    }

    #[test]
    fn default_course_is_valid() {
        let course = GateCourse::default();
        assert_eq!(course.len(), gates::DEFAULT_GATE_AMOUNT);
        assert!(course.validate().is_ok());
        assert_eq!(course.target(0), Vec2::new(400.0, 450.0));
    }

    #[test]
    fn target_falls_back_to_last_gate() {
        let course = GateCourse::default();
        let last = course.as_slice()[course.len() - 1].center();
        assert_eq!(course.target(course.len()), last);
        assert_eq!(course.target(usize::MAX), last);
    }

    #[test]
    fn rejects_malformed_courses() {
        assert!(GateCourse::new(Vec::<Gate>::new()).is_err());

        let tilted = Gate::new(Vec2::new(0.0, 10.0), Vec2::new(10.0, 20.0));
        assert!(GateCourse::new([tilted]).is_err());

        let endless = Gate::new(Vec2::new(0.0, 10.0), Vec2::new(f32::INFINITY, 10.0));
        assert!(GateCourse::new([endless]).is_err());

        let reversed = Gate::new(Vec2::new(10.0, 10.0), Vec2::new(0.0, 10.0));
        assert!(GateCourse::new([reversed]).is_err());

        let gate = Gate::new(Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0));
        assert!(GateCourse::new([gate; gates::MAX_GATES + 1]).is_err());
        assert!(GateCourse::new([gate; gates::MAX_GATES]).is_ok());
    }
}
