//! HTML projection of an aggregated suite.
//!
//! Pages only display what aggregation computed; no counting happens here.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::Value as JsonValue;

use crate::models::{Embedding, Feature, Scenario, Status, StatusCount, Step, Suite};

/// Stylesheet used when no override is configured.
pub const DEFAULT_STYLE: &str = include_str!("../../assets/style.css");

/// Script shared by all pages.
pub const GENERIC_SCRIPT: &str = include_str!("../../assets/generic.js");

/// Name of the overview page.
pub const INDEX_HTML: &str = "index.html";

/// Folder holding one page per feature.
pub const FEATURE_FOLDER: &str = "features";

const LINE_BREAK: &str = "<br />";

/// Escape text for HTML element and attribute content.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Escape a normalized description, keeping its line breaks.
fn escape_description(text: &str) -> String {
    text.split(LINE_BREAK)
        .map(escape_html)
        .collect::<Vec<_>>()
        .join(LINE_BREAK)
}

/// Relative link from the overview page to a feature page.
pub fn feature_href(feature: &Feature) -> String {
    format!("{}/{}.html", FEATURE_FOLDER, feature.id)
}

fn status_badge(status: Option<Status>) -> String {
    match status {
        Some(status) => format!(
            "<span class=\"badge status-{}\">{}</span>",
            status.as_str(),
            status.label()
        ),
        None => "<span class=\"badge status-none\">Not run</span>".to_string(),
    }
}

fn metadata_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Object(map) => {
            let parts: Vec<String> = ["name", "version"]
                .iter()
                .filter_map(|key| map.get(*key))
                .map(metadata_text)
                .collect();
            if parts.is_empty() {
                value.to_string()
            } else {
                parts.join(" ")
            }
        }
        other => other.to_string(),
    }
}

fn metadata_list(feature: &Feature) -> String {
    if feature.metadata.is_empty() {
        return String::new();
    }

    let mut html = String::from("<dl class=\"metadata\">");
    for (key, value) in &feature.metadata {
        html.push_str(&format!(
            "<dt>{}</dt><dd>{}</dd>",
            escape_html(key),
            escape_html(&metadata_text(value))
        ));
    }
    html.push_str("</dl>");
    html
}

fn tags(tags: &[crate::models::Tag]) -> String {
    if tags.is_empty() {
        return String::new();
    }

    let mut html = String::from("<div class=\"tags\">");
    for tag in tags {
        html.push_str(&format!(
            "<span class=\"tag\">{}</span>",
            escape_html(&tag.name)
        ));
    }
    html.push_str("</div>");
    html
}

fn status_table(title: &str, counts: &StatusCount) -> String {
    let mut html = format!(
        "<table class=\"status-count\"><caption>{}</caption><tr><th>Status</th><th>Count</th><th>%</th></tr>",
        escape_html(title)
    );
    for status in Status::PRIORITY {
        let category = counts.get(status);
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            status_badge(Some(status)),
            category.count,
            category.percentage
        ));
    }
    html.push_str(&format!(
        "<tr><th>Total</th><th>{}</th><th></th></tr></table>",
        counts.total
    ));
    html
}

fn custom_data(data: &JsonValue) -> String {
    let title = data
        .get("title")
        .and_then(JsonValue::as_str)
        .unwrap_or("Custom data");

    let mut html = format!(
        "<section class=\"custom-data\"><h2>{}</h2><table>",
        escape_html(title)
    );
    if let Some(rows) = data.get("data").and_then(JsonValue::as_array) {
        for row in rows {
            let label = row.get("label").map(metadata_text).unwrap_or_default();
            let value = row.get("value").map(metadata_text).unwrap_or_default();
            html.push_str(&format!(
                "<tr><th>{}</th><td>{}</td></tr>",
                escape_html(&label),
                escape_html(&value)
            ));
        }
    }
    html.push_str("</table></section>");
    html
}

fn page(suite: &Suite, title: &str, body: &str) -> String {
    let footer = suite.page_footer.as_deref().unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>\n{style}\n</style>\n</head>\n<body>\n<header>\n<h1>{title}</h1>\n<div class=\"build-info\"><span>Ingress controller: {controller}</span><span>Version: {version}</span><span>Build: {build}</span><span>Generated: {generated}</span></div>\n</header>\n<main>\n{body}\n</main>\n<footer>{footer}</footer>\n<script>\n{script}\n</script>\n</body>\n</html>\n",
        title = escape_html(title),
        style = suite.style,
        controller = escape_html(&suite.ingress.controller),
        version = escape_html(&suite.ingress.version),
        build = escape_html(&suite.build_time),
        generated = suite.generated_at.format("%Y/%m/%d %H:%M:%S"),
        body = body,
        footer = footer,
        script = GENERIC_SCRIPT,
    )
}

/// Render the features overview page.
pub fn render_index(suite: &Suite) -> String {
    let mut body = String::from("<section class=\"summary\">");
    body.push_str(&status_table("Features", &suite.total_features_count));
    body.push_str(&status_table("Scenarios", &suite.total_scenarios_count));
    body.push_str("</section>");

    if let Some(data) = &suite.custom_data {
        body.push_str(&custom_data(data));
    }

    body.push_str(&format!(
        "<section class=\"features\"><h2>Features</h2><p>Total time: {}</p><table><tr><th>Status</th><th>Feature</th>",
        escape_html(&suite.total_time)
    ));
    if suite.custom_metadata {
        body.push_str("<th>Metadata</th>");
    }
    body.push_str("<th>Passed</th><th>Failed</th><th>Ambiguous</th><th>Not defined</th><th>Pending</th><th>Skipped</th><th>Total</th><th>Time</th></tr>");

    for feature in &suite.features {
        let counts = &feature.scenario_counts;
        body.push_str(&format!(
            "<tr><td>{}</td><td><a href=\"{}\">{}</a></td>",
            status_badge(Some(feature.status)),
            escape_html(&feature_href(feature)),
            escape_html(&feature.name)
        ));
        if suite.custom_metadata {
            body.push_str(&format!("<td>{}</td>", metadata_list(feature)));
        }
        body.push_str(&format!(
            "<td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            counts.passed.count,
            counts.failed.count,
            counts.ambiguous.count,
            counts.not_defined.count,
            counts.pending.count,
            counts.skipped.count,
            counts.total,
            escape_html(&feature.time)
        ));
    }
    body.push_str("</table></section>");

    page(suite, "Features overview", &body)
}

fn embedding(embedding: &Embedding) -> String {
    let mime = embedding.mime_type.as_str();
    let decoded = BASE64.decode(embedding.data.trim()).ok();

    if mime.starts_with("image/") {
        if decoded.is_some() {
            return format!(
                "<img class=\"embedding\" alt=\"attachment\" src=\"data:{};base64,{}\">",
                escape_html(mime),
                escape_html(embedding.data.trim())
            );
        }
        return format!("<pre class=\"embedding\">[{} attachment]</pre>", escape_html(mime));
    }

    let text = decoded
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_else(|| embedding.data.clone());
    format!("<pre class=\"embedding\">{}</pre>", escape_html(&text))
}

fn step(step: &Step) -> String {
    let status = step.result.as_ref().map(|r| r.status());
    let class = if step.name == "Hook" && (step.keyword == "Before" || step.keyword == "After") {
        " class=\"hook\""
    } else {
        ""
    };

    let mut html = format!(
        "<li{}><span class=\"keyword\">{}</span> {} {}",
        class,
        escape_html(step.keyword.trim()),
        escape_html(&step.name),
        status_badge(status)
    );
    if let Some(time) = &step.time {
        html.push_str(&format!(" <span class=\"time\">{}</span>", escape_html(time)));
    }
    if let Some(location) = step.step_match.as_ref().and_then(|m| m.location.as_deref()) {
        html.push_str(&format!(
            " <span class=\"location\">{}</span>",
            escape_html(location)
        ));
    }
    if let Some(doc) = &step.doc_string {
        html.push_str(&format!("<pre class=\"doc-string\">{}</pre>", escape_html(&doc.value)));
    }
    if !step.rows.is_empty() {
        html.push_str("<table class=\"data-table\">");
        for row in &step.rows {
            html.push_str("<tr>");
            for cell in &row.cells {
                html.push_str(&format!("<td>{}</td>", escape_html(cell)));
            }
            html.push_str("</tr>");
        }
        html.push_str("</table>");
    }
    if let Some(message) = step.result.as_ref().and_then(|r| r.error_message.as_deref()) {
        html.push_str(&format!("<pre class=\"error\">{}</pre>", escape_html(message)));
    }
    for output in &step.output {
        html.push_str(&format!(
            "<pre class=\"output\">{}</pre>",
            escape_html(&metadata_text(output))
        ));
    }
    for item in &step.embeddings {
        html.push_str(&embedding(item));
    }
    html.push_str("</li>");
    html
}

fn scenario(scenario: &Scenario) -> String {
    let collapsed = if scenario.status == Some(Status::Passed) {
        " collapsed"
    } else {
        ""
    };

    let mut html = format!(
        "<section class=\"scenario{}\"><h3>{} {}: {} <span class=\"time\">{}</span></h3>",
        collapsed,
        status_badge(scenario.status),
        escape_html(scenario.keyword.trim()),
        escape_html(&scenario.name),
        escape_html(&scenario.time)
    );
    html.push_str(&tags(&scenario.tags));
    if let Some(description) = scenario.description.as_deref().filter(|d| !d.is_empty()) {
        html.push_str(&format!(
            "<p class=\"description\">{}</p>",
            escape_description(description)
        ));
    }
    html.push_str("<ul class=\"steps\">");
    for item in &scenario.steps {
        html.push_str(&step(item));
    }
    html.push_str("</ul></section>");
    html
}

/// Render the page of one feature.
pub fn render_feature(suite: &Suite, feature: &Feature) -> String {
    let mut body = format!(
        "<section class=\"feature\"><p><a href=\"../{}\">&larr; Features overview</a></p><h2>{} {}: {}</h2>",
        INDEX_HTML,
        status_badge(Some(feature.status)),
        escape_html(feature.keyword.trim()),
        escape_html(&feature.name)
    );
    body.push_str(&tags(&feature.tags));
    if let Some(description) = feature.description.as_deref().filter(|d| !d.is_empty()) {
        body.push_str(&format!(
            "<p class=\"description\">{}</p>",
            escape_html(description)
        ));
    }
    if let Some(uri) = &feature.uri {
        body.push_str(&format!("<p class=\"uri\">{}</p>", escape_html(uri)));
    }
    body.push_str(&metadata_list(feature));
    body.push_str(&format!(
        "<p>Time: {}</p></section>",
        escape_html(&feature.time)
    ));

    body.push_str("<section class=\"summary\">");
    body.push_str(&status_table("Scenarios", &feature.scenario_counts));
    body.push_str("</section>");

    for item in feature.scenarios() {
        body.push_str(&scenario(item));
    }

    page(suite, &feature.name, &body)
}
