use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod models;
mod report;
mod score;
mod submission_log;
mod web;

use models::{HomeworkBracket, SleepBracket, Submission};

#[derive(Parser)]
#[command(name = "stressometer")]
#[command(about = "Stress-o-meter: life-stress scoring for the student check-in form", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web form server
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        bind: SocketAddr,
        /// Flat file the form handler appends scored submissions to
        #[arg(long, default_value = "results.csv")]
        log: PathBuf,
    },
    /// Score a single submission from the command line
    Score {
        #[arg(long)]
        name: String,
        /// Sleep bracket label, e.g. "7-8 Hours"
        #[arg(long)]
        sleep: String,
        /// Homework bracket label, e.g. "1-2 Hours"
        #[arg(long)]
        homework: String,
        #[arg(long, default_value_t = 0)]
        exams: u32,
        #[arg(long, default_value = "")]
        freeform: String,
        /// Emit the assessment as JSON instead of the advisory message
        #[arg(long)]
        json: bool,
    },
    /// Render the submission log as a formatted table
    Report {
        #[arg(long, default_value = "results.csv")]
        log: PathBuf,
        /// Write the report to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Run the built-in beta-tester sweeps and print their result tables
    Demo,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "stressometer=info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind, log } => {
            web::serve(bind, log).await?;
        }
        Commands::Score {
            name,
            sleep,
            homework,
            exams,
            freeform,
            json,
        } => {
            let submission = Submission {
                name,
                sleep: sleep.parse()?,
                homework: homework.parse()?,
                exams,
                freeform,
            };
            let assessment = score::assess(&submission);

            if json {
                println!("{}", serde_json::to_string_pretty(&assessment)?);
            } else {
                println!("{}", assessment.message);
            }
        }
        Commands::Report { log, out } => {
            let rows = submission_log::read_rows(&log)?;
            let rendered = report::render_log_report(&rows);

            match out {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    println!("Report written to {}.", path.display());
                }
                None => print!("{rendered}"),
            }
        }
        Commands::Demo => run_demo(),
    }

    Ok(())
}

/// The original deployment shipped two hardcoded beta-test sweeps that printed
/// result tables on startup; they live on here as a demo command.
fn run_demo() {
    let mut rows = Vec::new();
    for sleep in SleepBracket::ALL {
        for homework in HomeworkBracket::ALL {
            for exams in 1..=6 {
                let submission = Submission {
                    name: "Joe_beta_tester1".to_string(),
                    sleep,
                    homework,
                    exams,
                    freeform: "I feel mad.".to_string(),
                };
                let score = score::score_submission(&submission);
                rows.push((submission, score));
            }
        }
    }
    println!("Local test case results, full bracket sweep:\n");
    report::submission_table(&rows).printstd();

    let mut rows = Vec::new();
    for sleep in SleepBracket::ALL {
        let submission = Submission {
            name: "Julie_beta_tester2".to_string(),
            sleep,
            homework: HomeworkBracket::TwoToThree,
            exams: 3,
            freeform: "I feel mad and hungry. I am also tired and calm.".to_string(),
        };
        let score = score::score_submission(&submission);
        rows.push((submission, score));
    }
    println!("\nLocal test case results, sleep sweep with mixed keywords:\n");
    report::submission_table(&rows).printstd();
}
