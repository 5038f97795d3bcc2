//! HTML rendering for the dashboard page.
//!
//! The full page is rendered on every `GET /`. The cards, chart and
//! insight fragments are also sent individually over the WebSocket so the
//! page script can swap them in place.

use std::fmt::Write;

use morsel_core::ViewModel;
use morsel_core::insight::{
    Direction, NOT_ENOUGH_DATA, format_metric_currency, format_metric_percent, narrative,
};
use morsel_core::widgets::{WidgetDef, region_filter};

use crate::chart::render_chart;
use crate::error::ServerResult;

/// Page heading.
pub const TITLE: &str = "Pink Morsel Sales Dashboard";

/// Element id of the stat card container.
pub const CARDS_ID: &str = "stat-cards";

/// Element id of the insight paragraph.
pub const INSIGHT_ID: &str = "insight-text";

pub(crate) fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn tone(view: &ViewModel) -> &'static str {
    match view.direction() {
        Some(Direction::Increased) => "positive",
        Some(Direction::Decreased) => "negative",
        Some(Direction::Unchanged) | None => "neutral",
    }
}

fn card(out: &mut String, class: &str, heading: &str, metric_text: &str, caption: &str) {
    let missing = if metric_text == NOT_ENOUGH_DATA {
        " missing"
    } else {
        ""
    };
    let _ = write!(
        out,
        r#"<div class="card {class}"><h3>{}</h3><p class="card-value{missing}">{}</p><p class="card-caption">{}</p></div>"#,
        escape(heading),
        escape(metric_text),
        escape(caption)
    );
}

/// The three summary cards: before, after and change.
pub fn render_cards(view: &ViewModel) -> String {
    let summary = &view.summary;
    let tone = tone(view);
    let mut out = String::new();

    card(
        &mut out,
        "before",
        "Before Price Increase",
        &format_metric_currency(summary.mean_before),
        "Average Daily Sales",
    );
    card(
        &mut out,
        &format!("after {tone}"),
        "After Price Increase",
        &format_metric_currency(summary.mean_after),
        "Average Daily Sales",
    );
    card(
        &mut out,
        &format!("change {tone}"),
        "Change",
        &format_metric_percent(summary.percent_change),
        "Percentage Change",
    );

    out
}

/// The insight sentence, HTML-escaped.
pub fn render_insight(view: &ViewModel) -> String {
    escape(&narrative(view))
}

/// Render a widget definition as form controls.
pub fn render_widget(widget: &WidgetDef) -> String {
    match widget {
        WidgetDef::Radio {
            id,
            label,
            options,
            selected,
        } => {
            let mut out = String::new();
            let _ = write!(
                out,
                r#"<fieldset id="{id}" class="radio-group"><legend>{}</legend>"#,
                escape(label),
                id = escape(id)
            );
            for (i, option) in options.iter().enumerate() {
                let checked = if i == *selected { " checked" } else { "" };
                let _ = write!(
                    out,
                    r#"<label class="radio-option"><input type="radio" name="{id}" value="{}"{checked}> {}</label>"#,
                    escape(&option.value),
                    escape(&option.label),
                    id = escape(id)
                );
            }
            out.push_str("</fieldset>");
            out
        }
    }
}

/// Render the complete dashboard document for `view`.
pub fn render_page(view: &ViewModel) -> ServerResult<String> {
    let filter = render_widget(&region_filter(view.filter));
    let cards = render_cards(view);
    let chart = render_chart(view)?;
    let insight = render_insight(view);
    let subtitle = format!(
        "Analyzing sales trends before and after the {} price increase",
        view.cutoff.format("%B %-d, %Y")
    );

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<header class="banner">
<h1>{title}</h1>
<p class="subtitle">{subtitle}</p>
</header>
<form class="controls" method="get" action="/">{filter}<noscript><button type="submit">Apply</button></noscript></form>
<section id="{CARDS_ID}" class="cards">{cards}</section>
<section class="chart-panel">{chart}</section>
<section class="insight">
<h3>Business Insight</h3>
<p id="{INSIGHT_ID}">{insight}</p>
</section>
<script>{SCRIPT}</script>
</body>
</html>
"#,
        title = escape(TITLE),
        subtitle = escape(&subtitle),
    ))
}

const STYLE: &str = "\
body{font-family:Arial,sans-serif;max-width:1400px;margin:0 auto;padding:20px;color:#333}\
.banner{background:#2E86AB;color:#fff;padding:30px;border-radius:10px;text-align:center}\
.banner h1{margin:0}.subtitle{color:#e8f4f8}\
.controls{margin:20px 0}.radio-group{border:none}.radio-option{margin-right:16px}\
.cards{display:flex;gap:20px;margin-bottom:30px}\
.card{flex:1;text-align:center;padding:20px;border-radius:8px;border:2px solid #2E86AB;background:#f0f7fb}\
.card.positive{border-color:#28a745}.card.negative{border-color:#dc3545}\
.card-value{font-size:28px;font-weight:bold}.card-value.missing{font-size:18px;color:#666}\
.chart svg{width:100%;height:auto;background:#f8f9fa}\
.insight{margin-top:30px;padding:20px;background:#f8f9fa;border-left:4px solid #2E86AB}";

const SCRIPT: &str = r##"
(function () {
  const proto = location.protocol === "https:" ? "wss" : "ws";
  const ws = new WebSocket(proto + "://" + location.host + "/ws");
  document.querySelectorAll("#region-filter input[type=radio]").forEach(function (input) {
    input.addEventListener("change", function () {
      if (ws.readyState !== WebSocket.OPEN) { input.form.submit(); return; }
      ws.send(JSON.stringify({ type: "widget_update", widget_id: "region-filter", value: input.value }));
    });
  });
  ws.onmessage = function (event) {
    const msg = JSON.parse(event.data);
    if (msg.type !== "view_updated") { return; }
    document.getElementById("stat-cards").innerHTML = msg.cards;
    document.getElementById("sales-chart").outerHTML = msg.chart;
    document.getElementById("insight-text").textContent = msg.insight;
    history.replaceState(null, "", "?region=" + msg.region);
  };
})();
"##;
