use std::fs::OpenOptions;
use std::path::Path;

use anyhow::Context;
use chrono::Utc;

use crate::models::{Assessment, LogRow, Submission};

/// Appends one scored submission to the flat CSV log, writing the header row
/// when the file is new. This is the only persistence in the system.
pub fn append(path: &Path, submission: &Submission, assessment: &Assessment) -> anyhow::Result<()> {
    let write_headers = !path.exists();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open submission log {}", path.display()))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(write_headers)
        .from_writer(file);

    writer.serialize(LogRow {
        recorded_at: Utc::now(),
        name: submission.name.clone(),
        sleep: submission.sleep.as_str().to_string(),
        homework: submission.homework.as_str().to_string(),
        exams: submission.exams,
        freeform: submission.freeform.clone(),
        score: assessment.score,
    })?;
    writer.flush()?;

    Ok(())
}

pub fn read_rows(path: &Path) -> anyhow::Result<Vec<LogRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to read submission log {}", path.display()))?;

    let mut rows = Vec::new();
    for result in reader.deserialize::<LogRow>() {
        rows.push(result?);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HomeworkBracket, SleepBracket, Tier};
    use crate::score;
    use std::path::PathBuf;

    fn temp_log(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("stressometer-{}-{}.csv", name, std::process::id()))
    }

    fn sample_submission() -> Submission {
        Submission {
            name: "Avery".to_string(),
            sleep: SleepBracket::FourToSix,
            homework: HomeworkBracket::TwoToThree,
            exams: 3,
            freeform: "mad".to_string(),
        }
    }

    #[test]
    fn appended_rows_read_back() {
        let path = temp_log("roundtrip");
        let _ = std::fs::remove_file(&path);

        let submission = sample_submission();
        let assessment = score::assess(&submission);
        append(&path, &submission, &assessment).unwrap();
        append(&path, &submission, &assessment).unwrap();

        let rows = read_rows(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Avery");
        assert_eq!(rows[0].sleep, "4-6 Hours");
        assert_eq!(rows[0].exams, 3);
        assert_eq!(rows[0].score, 82);
        assert_eq!(assessment.tier, Tier::Danger);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_log_is_an_error() {
        let path = temp_log("missing");
        let _ = std::fs::remove_file(&path);
        assert!(read_rows(&path).is_err());
    }
}
