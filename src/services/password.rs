//! Credential strength scoring.

use std::fmt;

/// Minimum number of satisfied checks for an acceptable credential.
pub const MIN_ACCEPTED_SCORE: u8 = 3;

const MIN_LENGTH: usize = 8;

/// Count satisfied checks: length, uppercase, digit, symbol. Range 0..=4.
pub fn strength_score(password: &str) -> u8 {
    let checks = [
        password.chars().count() >= MIN_LENGTH,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    checks.iter().filter(|&&ok| ok).count() as u8
}

/// Display label for a strength score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthLabel {
    None,
    Weak,
    Moderate,
    Strong,
    Perfect,
}

impl StrengthLabel {
    pub fn for_password(password: &str) -> Self {
        Self::from_score(strength_score(password))
    }

    pub fn from_score(score: u8) -> Self {
        match score {
            0 => StrengthLabel::None,
            1 => StrengthLabel::Weak,
            2 => StrengthLabel::Moderate,
            3 => StrengthLabel::Strong,
            _ => StrengthLabel::Perfect,
        }
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StrengthLabel::None => "None",
            StrengthLabel::Weak => "Weak",
            StrengthLabel::Moderate => "Moderate",
            StrengthLabel::Strong => "Strong",
            StrengthLabel::Perfect => "Perfect",
        };
        f.write_str(label)
    }
}
