use std::collections::HashSet;

use crate::models::{Assessment, Submission, Tier};

/// Words in the freeform answer that indicate stress. Each one present adds a
/// point, counted at most once no matter how often it repeats.
pub const RED_FLAGS: [&str; 9] = [
    "tired",
    "hungry",
    "worried",
    "afraid",
    "angry",
    "frustrated",
    "cranky",
    "mad",
    "sick",
];

/// Words that indicate the opposite. Each one present subtracts a point.
pub const GREEN_FLAGS: [&str; 4] = ["rested", "happy", "peaceful", "calm"];

/// Computes the stress index for one submission: bracket points, two points
/// per upcoming exam, then the keyword scan over the freeform text.
///
/// Keyword matching is exact-token and case-sensitive; "tired," with trailing
/// punctuation does not match "tired". The result is not clamped and can go
/// negative or past 100.
pub fn score_submission(submission: &Submission) -> i32 {
    let words: HashSet<&str> = submission.freeform.split_whitespace().collect();

    let mut score = submission.sleep.points()
        + submission.homework.points()
        + 2 * submission.exams as i32;

    for flag in RED_FLAGS {
        if words.contains(flag) {
            score += 1;
        }
    }
    for flag in GREEN_FLAGS {
        if words.contains(flag) {
            score -= 1;
        }
    }

    score
}

pub fn classify(score: i32) -> Tier {
    if score > 70 {
        Tier::Danger
    } else if score > 40 {
        Tier::Ok
    } else {
        Tier::Great
    }
}

/// Scores a submission and renders the advisory message for its tier.
pub fn assess(submission: &Submission) -> Assessment {
    let score = score_submission(submission);
    let tier = classify(score);
    let message = advisory_message(&submission.name, score, tier);

    Assessment {
        score,
        tier,
        message,
    }
}

fn advisory_message(name: &str, score: i32, tier: Tier) -> String {
    let greeting = format!("Hello, {name}. Your life-stress index score is {score}.");
    match tier {
        Tier::Danger => format!(
            "* * * DANGER * * * {greeting} Your stress index is too high! \
             Take a day off and play video games in your pajammas."
        ),
        Tier::Ok => format!(
            "{greeting} Your stress index is OK. Watch TV to relax after you \
             finish your homework and go to bed by 11 PM."
        ),
        Tier::Great => format!(
            "{greeting} Your stress index is great. You should stay up until \
             midnight studying for final exams instead of watching TV tonight."
        ),
    }
}
