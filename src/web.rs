use std::fmt::Write;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;

use crate::models::{HomeworkBracket, SleepBracket, Submission};
use crate::{score, submission_log};

#[derive(Clone)]
pub struct AppState {
    pub log_path: Arc<PathBuf>,
}

/// Raw form fields as posted by the browser. Field names match the original
/// page markup; missing fields arrive empty and fail bracket parsing.
#[derive(Debug, Deserialize)]
pub struct FormInput {
    #[serde(default)]
    pub input_name: String,
    #[serde(default)]
    pub input_sleep_dropdown: String,
    #[serde(default)]
    pub input_homework_dropdown: String,
    #[serde(default)]
    pub input_select: String,
    #[serde(default)]
    pub input_freeform: String,
}

pub fn parse_form(input: FormInput) -> anyhow::Result<Submission> {
    let sleep: SleepBracket = input.input_sleep_dropdown.parse()?;
    let homework: HomeworkBracket = input.input_homework_dropdown.parse()?;
    let exams: u32 = input
        .input_select
        .trim()
        .parse()
        .context("exam count must be a non-negative integer")?;

    Ok(Submission {
        name: input.input_name,
        sleep,
        homework,
        exams,
        freeform: input.input_freeform,
    })
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(form_page))
        .route("/process_inputs", post(process_inputs))
        .with_state(state)
}

pub async fn serve(bind: SocketAddr, log_path: PathBuf) -> anyhow::Result<()> {
    let app = router(AppState {
        log_path: Arc::new(log_path),
    });

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;

    tracing::info!("stress-o-meter listening on http://{bind}");

    axum::serve(listener, app)
        .await
        .context("HTTP server error")?;

    Ok(())
}

async fn form_page() -> Html<String> {
    Html(render_page(None))
}

async fn process_inputs(
    State(state): State<AppState>,
    Form(input): Form<FormInput>,
) -> Result<Html<String>, (StatusCode, String)> {
    let submission =
        parse_form(input).map_err(|err| (StatusCode::UNPROCESSABLE_ENTITY, format!("{err:#}")))?;

    let assessment = score::assess(&submission);

    // The log append is a side effect; a full disk should not eat the response.
    if let Err(err) = submission_log::append(&state.log_path, &submission, &assessment) {
        tracing::warn!("failed to append submission log: {err:#}");
    }

    tracing::info!(
        name = %submission.name,
        score = assessment.score,
        tier = assessment.tier.as_str(),
        "scored submission"
    );

    Ok(Html(render_page(Some(&assessment.message))))
}

/// Renders the single page: the form, plus the advisory message after a POST.
pub fn render_page(output: Option<&str>) -> String {
    let mut page = String::new();

    let _ = writeln!(page, "<!DOCTYPE html>");
    let _ = writeln!(page, "<html><head><title>Stress-o-meter Analyzer</title></head><body>");
    let _ = writeln!(page, "<h1>Stress-o-meter Analyzer</h1>");
    let _ = writeln!(page, "<form action=\"/process_inputs\" method=\"post\">");
    let _ = writeln!(
        page,
        "<label>Name: <input type=\"text\" name=\"input_name\"></label><br>"
    );

    let _ = writeln!(page, "<label>Hours of sleep per night:");
    let _ = writeln!(page, "<select name=\"input_sleep_dropdown\">");
    for bracket in SleepBracket::ALL {
        let _ = writeln!(page, "<option value=\"{0}\">{0}</option>", bracket.as_str());
    }
    let _ = writeln!(page, "</select></label><br>");

    let _ = writeln!(page, "<label>Hours of homework per night:");
    let _ = writeln!(page, "<select name=\"input_homework_dropdown\">");
    for bracket in HomeworkBracket::ALL {
        let _ = writeln!(page, "<option value=\"{0}\">{0}</option>", bracket.as_str());
    }
    let _ = writeln!(page, "</select></label><br>");

    let _ = writeln!(
        page,
        "<label>Final exams next week: <select name=\"input_select\">"
    );
    for count in 0..=6 {
        let _ = writeln!(page, "<option value=\"{0}\">{0}</option>", count);
    }
    let _ = writeln!(page, "</select></label><br>");

    let _ = writeln!(
        page,
        "<label>How do you feel? <input type=\"text\" name=\"input_freeform\"></label><br>"
    );
    let _ = writeln!(page, "<input type=\"submit\" value=\"Submit\">");
    let _ = writeln!(page, "</form>");

    if let Some(message) = output {
        let _ = writeln!(page, "<p>{}</p>", escape_html(message));
    }

    let _ = writeln!(page, "</body></html>");
    page
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tier;

    fn valid_input() -> FormInput {
        FormInput {
            input_name: "Avery".to_string(),
            input_sleep_dropdown: "4-6 Hours".to_string(),
            input_homework_dropdown: "2-3 Hours".to_string(),
            input_select: "3".to_string(),
            input_freeform: "mad".to_string(),
        }
    }

    #[test]
    fn valid_form_parses_and_scores() {
        let submission = parse_form(valid_input()).unwrap();
        let assessment = score::assess(&submission);
        assert_eq!(assessment.score, 82);
        assert_eq!(assessment.tier, Tier::Danger);
    }

    #[test]
    fn unknown_bracket_is_rejected() {
        let mut input = valid_input();
        input.input_sleep_dropdown = "Unknown".to_string();
        assert!(parse_form(input).is_err());
    }

    #[test]
    fn non_numeric_exam_count_is_rejected() {
        let mut input = valid_input();
        input.input_select = "many".to_string();
        assert!(parse_form(input).is_err());
    }

    #[test]
    fn missing_fields_default_empty_and_fail_parsing() {
        let input = FormInput {
            input_name: String::new(),
            input_sleep_dropdown: String::new(),
            input_homework_dropdown: String::new(),
            input_select: String::new(),
            input_freeform: String::new(),
        };
        assert!(parse_form(input).is_err());
    }

    #[test]
    fn page_lists_every_bracket_option() {
        let page = render_page(None);
        for bracket in SleepBracket::ALL {
            assert!(page.contains(bracket.as_str()));
        }
        for bracket in HomeworkBracket::ALL {
            assert!(page.contains(bracket.as_str()));
        }
        assert!(page.contains("input_freeform"));
    }

    #[test]
    fn result_message_is_escaped_into_the_page() {
        let page = render_page(Some("score < 40 & falling"));
        assert!(page.contains("score &lt; 40 &amp; falling"));
    }
}
