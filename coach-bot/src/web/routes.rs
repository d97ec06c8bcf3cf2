//! Route handlers.

use axum::extract::{Path, State};
use axum::response::Html;
use axum::Json;
use coach_core::Plan;
use serde::Serialize;

use super::error::{Result, WebError};
use super::WebState;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: String,
}

pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
    })
}

/// Renders plan `index` of `user_id` as a small HTML page.
pub async fn plan_page(
    State(state): State<WebState>,
    Path((user_id, index)): Path<(String, usize)>,
) -> Result<Html<String>> {
    let profile = state
        .store
        .get(&user_id)
        .await?
        .ok_or_else(|| WebError::UserNotFound(user_id.clone()))?;
    let plan = profile
        .plans
        .get(index)
        .ok_or(WebError::PlanNotFound { user_id, index })?;
    Ok(Html(render_plan(plan)))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn render_plan(plan: &Plan) -> String {
    let name = escape_html(&plan.name);
    let days: String = plan
        .content
        .lines()
        .map(|line| format!("<li>{}</li>", escape_html(line)))
        .collect();
    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{name}</title></head>\
         <body><h1>{name}</h1><ul>{days}</ul></body></html>"
    )
}
