use std::fmt::Write;

use prettytable::{row, Table};

use crate::models::{LogRow, Submission, Tier};
use crate::score;

/// Formats scored submissions the way the results log presents them, one row
/// per submission.
pub fn submission_table(rows: &[(Submission, i32)]) -> Table {
    let mut table = Table::new();
    table.add_row(row![
        "Name",
        "Hrs Sleep/Night",
        "Hrs Homework/Night",
        "Final Exams",
        "Freeform",
        "Stress Index Score"
    ]);
    for (submission, score) in rows {
        table.add_row(row![
            submission.name,
            submission.sleep,
            submission.homework,
            submission.exams,
            submission.freeform,
            score
        ]);
    }
    table
}

pub fn log_table(rows: &[LogRow]) -> Table {
    let mut table = Table::new();
    table.add_row(row![
        "Recorded At",
        "Name",
        "Hrs Sleep/Night",
        "Hrs Homework/Night",
        "Final Exams",
        "Freeform",
        "Stress Index Score"
    ]);
    for entry in rows {
        table.add_row(row![
            entry.recorded_at.format("%Y-%m-%d %H:%M:%S"),
            entry.name,
            entry.sleep,
            entry.homework,
            entry.exams,
            entry.freeform,
            entry.score
        ]);
    }
    table
}

pub fn tier_counts(rows: &[LogRow]) -> [(Tier, usize); 3] {
    let mut counts = [(Tier::Danger, 0), (Tier::Ok, 0), (Tier::Great, 0)];
    for entry in rows {
        let tier = score::classify(entry.score);
        for slot in counts.iter_mut() {
            if slot.0 == tier {
                slot.1 += 1;
            }
        }
    }
    counts
}

/// Builds the full text report for the submission log: the formatted table
/// followed by the tier mix.
pub fn render_log_report(rows: &[LogRow]) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Stress-o-meter submission log");
    let _ = writeln!(output);

    if rows.is_empty() {
        let _ = writeln!(output, "No submissions recorded yet.");
        return output;
    }

    let _ = writeln!(output, "{}", log_table(rows));
    let _ = writeln!(output, "Tier mix:");
    for (tier, count) in tier_counts(rows) {
        let _ = writeln!(output, "- {}: {} submissions", tier.as_str(), count);
    }

    output
}
