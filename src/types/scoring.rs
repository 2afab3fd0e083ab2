use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_CODE_QUALITY: u32 = 20;
pub const MAX_STRUCTURE: u32 = 15;
pub const MAX_DOCUMENTATION: u32 = 20;
pub const MAX_MAINTAINABILITY: u32 = 15;
pub const MAX_RELEVANCE: u32 = 10;
pub const MAX_CONSISTENCY: u32 = 10;
pub const MAX_GIT_PRACTICES: u32 = 10;

pub const CATEGORY_CODE_QUALITY: &str = "Code Quality & Readability";
pub const CATEGORY_STRUCTURE: &str = "Project Structure & Organization";
pub const CATEGORY_DOCUMENTATION: &str = "Documentation & Clarity";
pub const CATEGORY_MAINTAINABILITY: &str = "Test Coverage & Maintainability";
pub const CATEGORY_RELEVANCE: &str = "Real-world Relevance";
pub const CATEGORY_CONSISTENCY: &str = "Commit Consistency";
pub const CATEGORY_GIT_PRACTICES: &str = "Version Control Practices";

/// One row of the seven-category breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdownItem {
    pub category: String,
    pub score: u32,
    pub max_score: u32,
}

impl ScoreBreakdownItem {
    pub fn new(category: &str, score: u32, max_score: u32) -> Self {
        Self {
            category: category.to_string(),
            score,
            max_score,
        }
    }

    pub fn percentage(&self) -> f64 {
        if self.max_score == 0 {
            return 0.0;
        }
        f64::from(self.score) / f64::from(self.max_score) * 100.0
    }
}

/// Skill tier derived from the total score.
///
/// `Rating` and `Badge` share the 85/65 cutoffs today but stay separate
/// ladders: one labels the author's practice level, the other the display
/// badge, and they are allowed to diverge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Beginner,
    Intermediate,
    Advanced,
}

impl Rating {
    pub fn from_total(total: u32) -> Self {
        if total >= 85 {
            Rating::Advanced
        } else if total >= 65 {
            Rating::Intermediate
        } else {
            Rating::Beginner
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Beginner => write!(f, "Beginner"),
            Rating::Intermediate => write!(f, "Intermediate"),
            Rating::Advanced => write!(f, "Advanced"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Badge {
    Bronze,
    Silver,
    Gold,
}

impl Badge {
    pub fn from_total(total: u32) -> Self {
        if total >= 85 {
            Badge::Gold
        } else if total >= 65 {
            Badge::Silver
        } else {
            Badge::Bronze
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Badge::Bronze => write!(f, "Bronze"),
            Badge::Silver => write!(f, "Silver"),
            Badge::Gold => write!(f, "Gold"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub total_score: u32,
    pub rating: Rating,
    pub badge: Badge,
    pub breakdown: Vec<ScoreBreakdownItem>,
}
