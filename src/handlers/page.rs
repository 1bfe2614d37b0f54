//! Dashboard page handlers
//!
//! Server-rendered HTML dashboard plus the content and animation endpoints
//! it draws from.

use crate::content::CONTENT;
use crate::handlers::AppState;
use crate::models::{ContentResponse, ImpactResult, TrainingQuery, UsageQuery};
use crate::services::dashboard::DashboardState;
use crate::utils::format;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::fmt::Write;
use std::sync::Arc;
use tracing::debug;

/// Default prompt count shown in the usage form
pub const DEFAULT_PROMPTS: i64 = 10;
/// Default model count shown in the training form
pub const DEFAULT_MODELS: i64 = 1;

/// Page query parameters, kept as text so bad input can be reported inline
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub prompts: Option<String>,
    pub models: Option<String>,
    pub pledge: Option<String>,
}

/// Outcome of one calculator section
enum Section {
    NotRequested,
    Computed(ImpactResult),
    Invalid(String),
}

/// Only the form's own `pledge=1` counts
fn pledge_requested(query: &PageQuery) -> bool {
    query.pledge.as_deref().map(str::trim) == Some("1")
}

fn parse_count(raw: &str, field: &str) -> Result<i64, String> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| format!("{} must be a whole number, got \"{}\"", field, raw))
}

/// GET /
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let mut dashboard = DashboardState::new();

    let usage = match query.prompts.as_deref() {
        None => Section::NotRequested,
        Some(raw) => match parse_count(raw, "Prompt count")
            .and_then(|prompt_count| {
                dashboard
                    .record_usage(UsageQuery { prompt_count })
                    .map_err(|e| e.to_string())
            }) {
            Ok(result) => Section::Computed(result),
            Err(message) => Section::Invalid(message),
        },
    };

    let training = match query.models.as_deref() {
        None => Section::NotRequested,
        Some(raw) => match parse_count(raw, "Model count")
            .and_then(|model_count| {
                dashboard
                    .record_training(TrainingQuery { model_count })
                    .map_err(|e| e.to_string())
            }) {
            Ok(result) => Section::Computed(result),
            Err(message) => Section::Invalid(message),
        },
    };

    if pledge_requested(&query) {
        dashboard.pledge();
    }

    let has_animation = state.animation.get().await.is_some();
    debug!("Rendering dashboard (animation: {})", has_animation);

    Html(render_page(&query, &dashboard, &usage, &training, has_animation))
}

/// GET /api/content
pub async fn content() -> Json<ContentResponse> {
    Json(ContentResponse {
        content: &*CONTENT,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/animation
///
/// 204 when the animation could not be loaded
pub async fn animation(State(state): State<Arc<AppState>>) -> Response {
    match state.animation.get().await {
        Some(document) => Json(document.as_ref().clone()).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

fn render_page(
    query: &PageQuery,
    dashboard: &DashboardState,
    usage: &Section,
    training: &Section,
    has_animation: bool,
) -> String {
    let mut html = String::with_capacity(8 * 1024);

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>AI Power Meter</title>
<style>{style}</style>
</head>
<body>
<h1>{title}</h1>
<h3>{subtitle}</h3>
"#,
        style = STYLE,
        title = escape_html(CONTENT.title),
        subtitle = escape_html(CONTENT.subtitle),
    );

    if has_animation {
        html.push_str(ANIMATION_PLAYER);
    }
    html.push_str("<hr>\n");

    // Usage calculator
    let prompts_value = query.prompts.as_deref().unwrap_or("");
    let _ = write!(
        html,
        "<h2>{}</h2>\n{}",
        escape_html(CONTENT.usage_heading),
        render_form(
            "prompts",
            CONTENT.usage_prompt,
            prompts_value,
            DEFAULT_PROMPTS,
            "Calculate AI Usage Impact",
            query.models.as_deref().map(|m| ("models", m)),
        ),
    );
    if let Some(body) = render_section(usage, |result| {
        [
            ("⚡ Total Energy Used (kWh)", format::usage_energy(result)),
            ("🌍 CO₂ Emissions (kg)", format::usage_co2(result)),
        ]
    }, ("Electricity Used (kWh)", "CO2 Emissions (kg)"), "Energy & Emissions per AI Usage") {
        html.push_str(&body);
    }
    html.push_str("<hr>\n");

    // Training calculator
    let models_value = query.models.as_deref().unwrap_or("");
    let _ = write!(
        html,
        "<h2>{}</h2>\n{}",
        escape_html(CONTENT.training_heading),
        render_form(
            "models",
            CONTENT.training_prompt,
            models_value,
            DEFAULT_MODELS,
            "Calculate Training Impact",
            query.prompts.as_deref().map(|p| ("prompts", p)),
        ),
    );
    if let Some(body) = render_section(training, |result| {
        [
            ("🔋 Total Training Energy Used (kWh)", format::training_energy(result)),
            ("☁️ Training CO₂ Emissions (kg)", format::training_co2(result)),
        ]
    }, ("Training Electricity Used (kWh)", "Training CO2 Emissions (kg)"), "AI Model Training Energy Impact") {
        html.push_str(&body);
    }
    html.push_str("<hr>\n");

    // Offset from whatever has been recorded, zero otherwise
    let _ = write!(html, "<h2>{}</h2>\n", escape_html(CONTENT.offset_heading));
    match dashboard.offset() {
        Ok(estimate) => {
            let _ = write!(
                html,
                "<div class=\"metric\"><span class=\"label\">🌳 Trees needed for a year</span><span class=\"value\">{}</span></div>\n\
                 <p class=\"note\">Based on {} kg CO₂ from {}.</p>\n",
                format::trees(estimate.trees_per_year),
                format::grouped_decimal(estimate.total_co2_kg),
                describe_components(dashboard),
            );
        }
        Err(e) => {
            let _ = write!(html, "<p class=\"error\">{}</p>\n", escape_html(&e.to_string()));
        }
    }
    html.push_str("<hr>\n");

    // Educational content
    let _ = write!(html, "<h2>{}</h2>\n", escape_html(CONTENT.impact_heading));
    for topic in &CONTENT.impact_topics {
        let _ = write!(
            html,
            "<details><summary>{} {}</summary><p>{}</p></details>\n",
            topic.icon,
            escape_html(topic.title),
            escape_html(topic.body),
        );
    }
    html.push_str("<hr>\n");

    let _ = write!(html, "<h2>{}</h2>\n<ul>\n", escape_html(CONTENT.solutions_heading));
    for solution in &CONTENT.solutions {
        let _ = write!(html, "<li>✔ {}</li>\n", escape_html(solution));
    }
    html.push_str("</ul>\n");

    let _ = write!(
        html,
        "<form method=\"get\" action=\"/\"><input type=\"hidden\" name=\"pledge\" value=\"1\"><button type=\"submit\">{}</button></form>\n",
        escape_html(CONTENT.pledge_button),
    );
    if dashboard.pledged {
        let _ = write!(html, "<p class=\"success\">{}</p>\n", escape_html(CONTENT.pledge_message));
    }

    let _ = write!(html, "<hr>\n<p><em>{}</em></p>\n<hr>\n<footer>\n", escape_html(CONTENT.closing_note));
    for line in &CONTENT.footer {
        let _ = write!(html, "<p><strong>{}</strong></p>\n", escape_html(line));
    }
    html.push_str("</footer>\n</body>\n</html>\n");

    html
}

fn render_form(
    name: &str,
    label: &str,
    value: &str,
    default: i64,
    button: &str,
    carry: Option<(&str, &str)>,
) -> String {
    let value = if value.is_empty() {
        default.to_string()
    } else {
        escape_html(value)
    };
    let hidden = carry
        .map(|(carry_name, carry_value)| {
            format!(
                "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
                carry_name,
                escape_html(carry_value)
            )
        })
        .unwrap_or_default();

    format!(
        "<form method=\"get\" action=\"/\"><label>{label} <input type=\"number\" name=\"{name}\" min=\"0\" step=\"1\" value=\"{value}\"></label>{hidden}<button type=\"submit\">{button}</button></form>\n",
        label = escape_html(label),
        name = name,
        value = value,
        hidden = hidden,
        button = escape_html(button),
    )
}

fn render_section<F>(
    section: &Section,
    metrics: F,
    categories: (&str, &str),
    chart_title: &str,
) -> Option<String>
where
    F: FnOnce(&ImpactResult) -> [(&'static str, String); 2],
{
    match section {
        Section::NotRequested => None,
        Section::Invalid(message) => Some(format!("<p class=\"error\">{}</p>\n", escape_html(message))),
        Section::Computed(result) => {
            let mut body = String::new();
            for (label, value) in metrics(result) {
                let _ = write!(
                    body,
                    "<div class=\"metric\"><span class=\"label\">{}</span><span class=\"value\">{}</span></div>\n",
                    escape_html(label),
                    value,
                );
            }
            body.push_str(&render_bar_chart(
                chart_title,
                &[(categories.0, result.energy_kwh), (categories.1, result.co2_kg)],
            ));
            Some(body)
        }
    }
}

/// Horizontal bars scaled to the largest value
fn render_bar_chart(title: &str, bars: &[(&str, f64)]) -> String {
    let max = bars.iter().map(|(_, value)| *value).fold(0.0_f64, f64::max);

    let mut chart = format!("<figure class=\"chart\"><figcaption>{}</figcaption>\n", escape_html(title));
    for (i, (category, value)) in bars.iter().enumerate() {
        let width = if max > 0.0 { value / max * 100.0 } else { 0.0 };
        let _ = write!(
            chart,
            "<div class=\"bar-row\"><span class=\"bar-label\">{}</span><div class=\"bar bar-{}\" style=\"width: {:.1}%\"></div><span class=\"bar-value\">{}</span></div>\n",
            escape_html(category),
            i,
            width,
            value,
        );
    }
    chart.push_str("</figure>\n");
    chart
}

fn describe_components(dashboard: &DashboardState) -> &'static str {
    match (dashboard.usage_computed, dashboard.training_computed) {
        (true, true) => "prompt usage and model training",
        (true, false) => "prompt usage only",
        (false, true) => "model training only",
        (false, false) => "nothing calculated yet",
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const STYLE: &str = "body{font-family:sans-serif;max-width:960px;margin:0 auto;padding:1rem}\
.metric{display:inline-block;margin:0.5rem 2rem 0.5rem 0}\
.metric .label{display:block;font-size:0.9rem;color:#555}\
.metric .value{font-size:1.8rem}\
.chart{margin:1rem 0}.bar-row{display:flex;align-items:center;margin:0.25rem 0}\
.bar-label{width:16rem}.bar{height:1.2rem;min-width:1px}\
.bar-0{background:#636efa}.bar-1{background:#ef553b}.bar-value{margin-left:0.5rem}\
.error{color:#b00020}.success{color:#1b5e20}.note{color:#555}";

const ANIMATION_PLAYER: &str = "<script src=\"https://unpkg.com/@lottiefiles/lottie-player@2/dist/lottie-player.js\"></script>\n\
<lottie-player src=\"/api/animation\" background=\"transparent\" speed=\"1\" style=\"height: 200px\" loop autoplay></lottie-player>\n";
