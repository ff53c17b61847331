use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sleep-per-night bracket from the form dropdown. Labels must match the
/// dropdown text exactly; anything else is a caller error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepBracket {
    LessThan4,
    FourToSix,
    SixToSeven,
    SevenToEight,
    MoreThan8,
}

impl SleepBracket {
    pub const ALL: [SleepBracket; 5] = [
        SleepBracket::LessThan4,
        SleepBracket::FourToSix,
        SleepBracket::SixToSeven,
        SleepBracket::SevenToEight,
        SleepBracket::MoreThan8,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SleepBracket::LessThan4 => "Less than 4 Hours",
            SleepBracket::FourToSix => "4-6 Hours",
            SleepBracket::SixToSeven => "6-7 Hours",
            SleepBracket::SevenToEight => "7-8 Hours",
            SleepBracket::MoreThan8 => "More than 8 Hours",
        }
    }

    pub fn points(self) -> i32 {
        match self {
            SleepBracket::LessThan4 => 50,
            SleepBracket::FourToSix => 50,
            SleepBracket::SixToSeven => 40,
            SleepBracket::SevenToEight => 30,
            SleepBracket::MoreThan8 => 10,
        }
    }
}

impl FromStr for SleepBracket {
    type Err = anyhow::Error;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        for bracket in SleepBracket::ALL {
            if bracket.as_str() == label {
                return Ok(bracket);
            }
        }
        bail!("unrecognized sleep bracket: {label:?}");
    }
}

impl fmt::Display for SleepBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Homework-per-night bracket from the form dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkBracket {
    LessThan1,
    OneToTwo,
    TwoToThree,
    ThreeToFour,
    MoreThan4,
}

impl HomeworkBracket {
    pub const ALL: [HomeworkBracket; 5] = [
        HomeworkBracket::LessThan1,
        HomeworkBracket::OneToTwo,
        HomeworkBracket::TwoToThree,
        HomeworkBracket::ThreeToFour,
        HomeworkBracket::MoreThan4,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HomeworkBracket::LessThan1 => "Less than 1 Hour",
            HomeworkBracket::OneToTwo => "1-2 Hours",
            HomeworkBracket::TwoToThree => "2-3 Hours",
            HomeworkBracket::ThreeToFour => "3-4 Hours",
            HomeworkBracket::MoreThan4 => "More than 4 Hours",
        }
    }

    pub fn points(self) -> i32 {
        match self {
            HomeworkBracket::LessThan1 => 10,
            HomeworkBracket::OneToTwo => 20,
            HomeworkBracket::TwoToThree => 25,
            HomeworkBracket::ThreeToFour => 35,
            HomeworkBracket::MoreThan4 => 40,
        }
    }
}

impl FromStr for HomeworkBracket {
    type Err = anyhow::Error;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        for bracket in HomeworkBracket::ALL {
            if bracket.as_str() == label {
                return Ok(bracket);
            }
        }
        bail!("unrecognized homework bracket: {label:?}");
    }
}

impl fmt::Display for HomeworkBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One form submission, validated. Lives for the length of a request.
#[derive(Debug, Clone)]
pub struct Submission {
    pub name: String,
    pub sleep: SleepBracket,
    pub homework: HomeworkBracket,
    pub exams: u32,
    pub freeform: String,
}

/// Advisory tier derived from the score thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Danger,
    Ok,
    Great,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Danger => "danger",
            Tier::Ok => "ok",
            Tier::Great => "great",
        }
    }
}

/// Score plus rendered advisory message for one submission.
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub score: i32,
    pub tier: Tier,
    pub message: String,
}

/// One row of the flat submission log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRow {
    pub recorded_at: DateTime<Utc>,
    pub name: String,
    pub sleep: String,
    pub homework: String,
    pub exams: u32,
    pub freeform: String,
    pub score: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sleep_labels_round_trip() {
        for bracket in SleepBracket::ALL {
            assert_eq!(bracket.as_str().parse::<SleepBracket>().unwrap(), bracket);
        }
    }

    #[test]
    fn homework_labels_round_trip() {
        for bracket in HomeworkBracket::ALL {
            assert_eq!(
                bracket.as_str().parse::<HomeworkBracket>().unwrap(),
                bracket
            );
        }
    }

    #[test]
    fn unknown_labels_are_rejected() {
        assert!("Unknown".parse::<SleepBracket>().is_err());
        assert!("8-9 Hours".parse::<SleepBracket>().is_err());
        assert!("Unknown".parse::<HomeworkBracket>().is_err());
        // Labels are exact; case differences do not match.
        assert!("less than 4 hours".parse::<SleepBracket>().is_err());
    }
}
