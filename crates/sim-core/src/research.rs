//! R&D department: researcher headcount and accumulated research points.

use serde::{Deserialize, Serialize};

use crate::sources::{ResearchOutcome, ResearchSource};

/// Research department that awards points once per processed quarter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchLab {
    /// Researchers on payroll.
    pub researchers: u64,
    /// Points accumulated so far.
    #[serde(default)]
    pub points: u64,
    /// Points one researcher produces in a quarter.
    pub points_per_researcher: u64,
}

impl ResearchLab {
    pub fn new(researchers: u64, points_per_researcher: u64) -> Self {
        Self {
            researchers,
            points: 0,
            points_per_researcher,
        }
    }
}

impl ResearchSource for ResearchLab {
    fn process_quarter(&mut self) -> ResearchOutcome {
        let rp_awarded = self.researchers.saturating_mul(self.points_per_researcher);
        self.points = self.points.saturating_add(rp_awarded);
        ResearchOutcome { rp_awarded }
    }

    fn researcher_count(&self) -> u64 {
        self.researchers
    }

    fn current_points(&self) -> u64 {
        self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_awards_per_researcher() {
        let mut lab = ResearchLab::new(4, 10);
        assert_eq!(lab.process_quarter().rp_awarded, 40);
        assert_eq!(lab.process_quarter().rp_awarded, 40);
        assert_eq!(lab.current_points(), 80);
    }

    #[test]
    fn empty_lab_awards_nothing() {
        let mut lab = ResearchLab::default();
        assert_eq!(lab.process_quarter().rp_awarded, 0);
    }
}
