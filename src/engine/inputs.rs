//! The crisp input record and its mapping helpers
//!
//! `StressInputs` is the engine's call contract: one flat record of
//! numeric lifestyle measurements. Sleep, study, and screen time are
//! required; every other field carries a documented default. Values
//! outside a field's documented range are clamped by the engine, never
//! rejected.
//!
//! The word-form mappings (deadline none/upcoming/urgent, activity
//! none/light/moderate/intense, procrastination low/medium/high) and the
//! Likert quiz rescale live here so that front ends agree on the same
//! numeric encoding.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FuzzError, FuzzResult};
use crate::fuzzy::CrispInputs;

// ============================================================================
// Input record
// ============================================================================

/// Crisp inputs for one assessment
///
/// Field names, ranges, and defaults:
///
/// | field | range | default |
/// |---|---|---|
/// | `sleep_hours` | 0..=12 | required |
/// | `study_hours` | 0..=16 | required |
/// | `screen_time_hours` | 0..=24 | required |
/// | `mood` | 1..=10 | 5 |
/// | `deadline_level` | 0..=10 | 0 |
/// | `activity_level` | 0..=10 | 0 |
/// | `social_interaction` | 0..=10 | 5 |
/// | `procrastination_level` | 0..=10 | 5 |
/// | `financial_stress` | 0..=10 | 5 |
/// | `age` | 10..=80 | 30 |
/// | `quiz_score` | 0..=100 | 50 |
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressInputs {
    /// Hours slept last night
    pub sleep_hours: f64,
    /// Hours of study today
    pub study_hours: f64,
    /// Hours of screen time today
    pub screen_time_hours: f64,
    /// Self-rated mood, 1 (sad) to 10 (happy)
    #[serde(default = "default_mood")]
    pub mood: f64,
    /// Deadline pressure, 0 (none) to 10 (urgent)
    #[serde(default)]
    pub deadline_level: f64,
    /// Physical activity, 0 (sedentary) to 10 (intense)
    #[serde(default)]
    pub activity_level: f64,
    /// Social interaction, 0 (isolated) to 10 (very social)
    #[serde(default = "default_midscale")]
    pub social_interaction: f64,
    /// Procrastination tendency, 0 to 10
    #[serde(default = "default_midscale")]
    pub procrastination_level: f64,
    /// Financial pressure, 0 to 10
    #[serde(default = "default_midscale")]
    pub financial_stress: f64,
    /// Age in years
    #[serde(default = "default_age")]
    pub age: f64,
    /// Self-assessment quiz score, 0 to 100
    #[serde(default = "default_quiz")]
    pub quiz_score: f64,
}

fn default_mood() -> f64 {
    5.0
}

fn default_midscale() -> f64 {
    5.0
}

fn default_age() -> f64 {
    30.0
}

fn default_quiz() -> f64 {
    50.0
}

impl StressInputs {
    /// Create an input record from the three required measurements,
    /// leaving every optional field at its documented default
    pub fn new(sleep_hours: f64, study_hours: f64, screen_time_hours: f64) -> Self {
        Self {
            sleep_hours,
            study_hours,
            screen_time_hours,
            mood: default_mood(),
            deadline_level: 0.0,
            activity_level: 0.0,
            social_interaction: default_midscale(),
            procrastination_level: default_midscale(),
            financial_stress: default_midscale(),
            age: default_age(),
            quiz_score: default_quiz(),
        }
    }

    /// Set mood
    pub fn with_mood(mut self, mood: f64) -> Self {
        self.mood = mood;
        self
    }

    /// Set deadline pressure
    pub fn with_deadline(mut self, level: f64) -> Self {
        self.deadline_level = level;
        self
    }

    /// Set activity level
    pub fn with_activity(mut self, level: f64) -> Self {
        self.activity_level = level;
        self
    }

    /// Set social interaction
    pub fn with_social(mut self, level: f64) -> Self {
        self.social_interaction = level;
        self
    }

    /// Set procrastination level
    pub fn with_procrastination(mut self, level: f64) -> Self {
        self.procrastination_level = level;
        self
    }

    /// Set financial pressure
    pub fn with_financial(mut self, level: f64) -> Self {
        self.financial_stress = level;
        self
    }

    /// Set age
    pub fn with_age(mut self, age: f64) -> Self {
        self.age = age;
        self
    }

    /// Set quiz score
    pub fn with_quiz(mut self, score: f64) -> Self {
        self.quiz_score = score;
        self
    }

    /// Reject NaN/infinite fields; range checking is not done here, since
    /// out-of-range values are clamped by the variables themselves
    pub fn validate(&self) -> FuzzResult<()> {
        let fields = [
            ("sleep_hours", self.sleep_hours),
            ("study_hours", self.study_hours),
            ("screen_time_hours", self.screen_time_hours),
            ("mood", self.mood),
            ("deadline_level", self.deadline_level),
            ("activity_level", self.activity_level),
            ("social_interaction", self.social_interaction),
            ("procrastination_level", self.procrastination_level),
            ("financial_stress", self.financial_stress),
            ("age", self.age),
            ("quiz_score", self.quiz_score),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(FuzzError::invalid_value(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Lower the record into the generic engine's name/value map
    pub(crate) fn to_crisp(self) -> CrispInputs {
        CrispInputs::new()
            .with("sleep", self.sleep_hours)
            .with("study", self.study_hours)
            .with("screen_time", self.screen_time_hours)
            .with("mood", self.mood)
            .with("deadline", self.deadline_level)
            .with("activity", self.activity_level)
            .with("social", self.social_interaction)
            .with("procrastination", self.procrastination_level)
            .with("financial", self.financial_stress)
            .with("age", self.age)
            .with("quiz", self.quiz_score)
    }
}

// ============================================================================
// Word-form mappings
// ============================================================================

/// Deadline pressure in word form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeadlineLevel {
    None,
    Upcoming,
    Urgent,
}

impl DeadlineLevel {
    /// Numeric encoding on the deadline variable's 0-10 universe
    pub fn level(&self) -> f64 {
        match self {
            DeadlineLevel::None => 0.0,
            DeadlineLevel::Upcoming => 5.0,
            DeadlineLevel::Urgent => 10.0,
        }
    }
}

impl FromStr for DeadlineLevel {
    type Err = FuzzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(DeadlineLevel::None),
            "upcoming" => Ok(DeadlineLevel::Upcoming),
            "urgent" => Ok(DeadlineLevel::Urgent),
            other => Err(FuzzError::invalid_value(format!(
                "unknown deadline level '{}'",
                other
            ))
            .with_hint("Expected one of: none, upcoming, urgent")),
        }
    }
}

impl fmt::Display for DeadlineLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeadlineLevel::None => "none",
            DeadlineLevel::Upcoming => "upcoming",
            DeadlineLevel::Urgent => "urgent",
        };
        write!(f, "{}", s)
    }
}

/// Physical activity in word form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    None,
    Light,
    Moderate,
    Intense,
}

impl ActivityLevel {
    /// Numeric encoding on the activity variable's 0-10 universe
    pub fn level(&self) -> f64 {
        match self {
            ActivityLevel::None => 0.0,
            ActivityLevel::Light => 3.0,
            ActivityLevel::Moderate => 6.0,
            ActivityLevel::Intense => 10.0,
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = FuzzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(ActivityLevel::None),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "intense" => Ok(ActivityLevel::Intense),
            other => Err(FuzzError::invalid_value(format!(
                "unknown activity level '{}'",
                other
            ))
            .with_hint("Expected one of: none, light, moderate, intense")),
        }
    }
}

/// Procrastination tendency in word form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcrastinationLevel {
    Low,
    Medium,
    High,
}

impl ProcrastinationLevel {
    /// Numeric encoding on the procrastination variable's 0-10 universe
    pub fn level(&self) -> f64 {
        match self {
            ProcrastinationLevel::Low => 2.0,
            ProcrastinationLevel::Medium => 5.0,
            ProcrastinationLevel::High => 8.0,
        }
    }
}

impl FromStr for ProcrastinationLevel {
    type Err = FuzzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(ProcrastinationLevel::Low),
            "medium" => Ok(ProcrastinationLevel::Medium),
            "high" => Ok(ProcrastinationLevel::High),
            other => Err(FuzzError::invalid_value(format!(
                "unknown procrastination level '{}'",
                other
            ))
            .with_hint("Expected one of: low, medium, high")),
        }
    }
}

// ============================================================================
// Quiz helper
// ============================================================================

/// Rescale raw 1-5 Likert answers to the quiz variable's 0-100 universe
///
/// `((avg - 1) / 4) * 100`, so all-1 answers map to 0 and all-5 answers
/// to 100. Items outside 1..=5 indicate a malformed questionnaire and are
/// rejected rather than clamped.
pub fn quiz_score_from_likert(items: &[u8]) -> FuzzResult<f64> {
    if items.is_empty() {
        return Err(FuzzError::invalid_value("quiz needs at least one answer"));
    }
    for (i, &item) in items.iter().enumerate() {
        if !(1..=5).contains(&item) {
            return Err(FuzzError::invalid_value(format!(
                "quiz answer {} is {}, outside the 1-5 Likert scale",
                i + 1,
                item
            )));
        }
    }
    let avg = items.iter().map(|&i| i as f64).sum::<f64>() / items.len() as f64;
    Ok((avg - 1.0) / 4.0 * 100.0)
}

// ============================================================================
// Output banding
// ============================================================================

/// Coarse band of a stress score, with the advice text tied to it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StressBand {
    Low,
    Moderate,
    High,
}

impl StressBand {
    /// Band for a 0-100 stress score: low up to 40, high above 70
    pub fn classify(score: f64) -> Self {
        if score > 70.0 {
            StressBand::High
        } else if score > 40.0 {
            StressBand::Moderate
        } else {
            StressBand::Low
        }
    }

    /// The recommendation line shown for this band
    pub fn recommendation(&self) -> &'static str {
        match self {
            StressBand::High => "High stress detected. Prioritize sleep and breaks.",
            StressBand::Moderate => "Moderate stress. Maintain a balanced schedule.",
            StressBand::Low => "Low stress. Great job maintaining balance!",
        }
    }
}

impl fmt::Display for StressBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StressBand::Low => "low",
            StressBand::Moderate => "moderate",
            StressBand::High => "high",
        };
        write!(f, "{}", s)
    }
}
