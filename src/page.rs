// Page Rendering Module
// Renders the dashboard snapshot as a self-contained HTML page.

use crate::animation::CounterState;
use crate::dashboard::{
    DashboardSnapshot, CAPTION, HEADING, MAP_HEADING, PAGE_TITLE, SUBHEADING, TRENDS_HEADING,
    TYPES_HEADING,
};
use crate::metrics::MetricEntry;

/// Plotly bundle loaded by the page
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Route the page subscribes to for card animation frames
pub const STREAM_PATH: &str = "/api/metrics/stream";

const STYLE: &str = r#"
body { font-family: "Source Sans Pro", system-ui, sans-serif; margin: 0 auto; padding: 2rem 3rem; max-width: 1400px; color: #31333f; }
hr { border: none; border-top: 1px solid rgba(49, 51, 63, 0.2); margin: 2rem 0; }
.cards { display: grid; grid-template-columns: repeat(5, 1fr); gap: 1rem; }
.card {
    border-radius: 16px;
    box-shadow: 2px 6px 12px rgba(0,0,0,0.15);
    padding: 20px;
    text-align: center;
    transition: transform 0.3s, box-shadow 0.3s;
    color: #fff;
    position: relative;
    overflow: hidden;
    perspective: 1000px;
    background-size: cover;
    background-position: center;
}
.card:hover {
    transform: rotateY(10deg) rotateX(5deg) scale(1.05);
    box-shadow: 2px 8px 16px rgba(0,0,0,0.25);
}
.card::before {
    content: "";
    position: absolute;
    top: 0; left: 0;
    width: 200%; height: 200%;
    pointer-events: none;
    background: radial-gradient(circle 150px at var(--mouse-x, 50%) var(--mouse-y, 50%), rgba(255,255,255,0.4), transparent 40%);
    transform: translate(-50%, -50%);
    transition: background 0.1s;
}
.metric-title { font-size: 18px; font-weight: 500; margin-bottom: 10px; }
.metric-value { font-size: 36px; font-weight: bold; }
.chart { width: 100%; min-height: 450px; }
.caption { font-size: 14px; color: rgba(49, 51, 63, 0.6); }
"#;

const SCRIPT: &str = r#"
document.querySelectorAll('.card').forEach(card => {
    card.addEventListener('mousemove', e => {
        const rect = card.getBoundingClientRect();
        const x = ((e.clientX - rect.left) / rect.width) * 100;
        const y = ((e.clientY - rect.top) / rect.height) * 100;
        card.style.setProperty('--mouse-x', x + '%');
        card.style.setProperty('--mouse-y', y + '%');
    });
});

for (const [id, fig] of Object.entries(FIGURES)) {
    Plotly.newPlot('chart-' + id, fig.data, fig.layout, { responsive: true });
}

const source = new EventSource(STREAM_PATH);
source.addEventListener('frame', e => {
    const frame = JSON.parse(e.data);
    const el = document.getElementById('card-value-' + frame.card);
    if (el) { el.textContent = frame.display; }
});
source.addEventListener('done', () => source.close());
source.onerror = () => source.close();
"#;

/// Escape text for HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// JSON that is safe to inline inside a `<script>` element
fn script_json(value: &serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}

/// Render one KPI card showing `display`
pub fn render_card(index: usize, entry: &MetricEntry, display: &str) -> String {
    let style = entry
        .image_url
        .as_deref()
        .map(|url| format!(r#" style="background-image: url('{}');""#, escape_html(url)))
        .unwrap_or_default();

    format!(
        r#"<div class="card" id="card-{index}"{style}>
    <div class="metric-title">{title}</div>
    <div class="metric-value" id="card-value-{index}">{value}</div>
</div>"#,
        index = index,
        style = style,
        title = escape_html(&entry.label),
        value = escape_html(display),
    )
}

/// Render the complete page.
///
/// Cards start at their animation baseline; the page script replaces the
/// displayed value as frames arrive from [`STREAM_PATH`].
pub fn render_page(snapshot: &DashboardSnapshot, steps: u64) -> String {
    let mut html = String::with_capacity(16 * 1024);

    html.push_str(&format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="icon" href="data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>📊</text></svg>">
<style>{style}</style>
<script src="{plotly}"></script>
</head>
<body>
<h1>{heading}</h1>
<h3>{subheading}</h3>
<hr>
<div class="cards">
"#,
        title = escape_html(PAGE_TITLE),
        style = STYLE,
        plotly = PLOTLY_CDN,
        heading = escape_html(HEADING),
        subheading = escape_html(SUBHEADING),
    ));

    for (index, entry) in snapshot.metrics.iter().enumerate() {
        let baseline = CounterState::new(&entry.value, steps).display();
        html.push_str(&render_card(index, entry, &baseline));
        html.push('\n');
    }

    html.push_str(&format!(
        r#"</div>
<hr>
<h2>{trends}</h2>
<div class="chart" id="chart-bar"></div>
<div class="chart" id="chart-line"></div>
<hr>
<h2>{types}</h2>
<div class="chart" id="chart-donut"></div>
<hr>
<h2>{map}</h2>
<div class="chart" id="chart-map"></div>
<hr>
<p class="caption">{caption}</p>
<script>
const FIGURES = {figures};
const STREAM_PATH = "{stream}";
{script}
</script>
</body>
</html>
"#,
        trends = escape_html(TRENDS_HEADING),
        types = escape_html(TYPES_HEADING),
        map = escape_html(MAP_HEADING),
        caption = escape_html(CAPTION),
        figures = script_json(&snapshot.figures()),
        stream = STREAM_PATH,
        script = SCRIPT,
    ));

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DepartmentRecord, MetricsTable};

    fn snapshot() -> DashboardSnapshot {
        let table = MetricsTable::from_rows(vec![
            DepartmentRecord::new("CSE", 100, 500, 20.0),
            DepartmentRecord::new("ECE", 50, 300, 15.0),
        ])
        .unwrap();
        DashboardSnapshot::from_table(&table)
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("AI & IoT"), "AI &amp; IoT");
        assert_eq!(escape_html("<b>\"x\"</b>"), "&lt;b&gt;&quot;x&quot;&lt;/b&gt;");
    }

    #[test]
    fn test_card_markup() {
        let snap = snapshot();
        let card = render_card(3, &snap.metrics[3], "AI & IoT");
        assert!(card.contains(r#"id="card-value-3""#));
        assert!(card.contains("AI &amp; IoT"));
        assert!(card.contains("background-image: url('https://"));
    }

    #[test]
    fn test_card_without_background_has_no_style() {
        let entry = MetricEntry::new("Ratio", crate::MetricValue::Float(0.5));
        let card = render_card(0, &entry, "0.00");
        assert!(card.starts_with(r#"<div class="card" id="card-0">"#));
        assert!(!card.contains("url("));
    }

    #[test]
    fn test_page_is_complete_document() {
        let html = render_page(&snapshot(), 50);
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
        assert!(html.ends_with("</body>\n</html>\n"));
        assert_eq!(html.matches(r#"<div class="card""#).count(), 5);
        assert_eq!(html.matches("background-image: url('https://").count(), 5);
    }

    #[test]
    fn test_page_sections_in_order() {
        let html = render_page(&snapshot(), 50);

        let order = [
            "Research Overview Dashboard",
            "card-value-0",
            "card-value-4",
            "Research Trends &amp; Department Insights",
            r#"id="chart-bar""#,
            r#"id="chart-line""#,
            "Distribution by Publication Type",
            r#"id="chart-donut""#,
            "Research Collaborations &amp; Conference Locations",
            r#"id="chart-map""#,
            "© 2025 NIT Jalandhar",
        ];
        let mut cursor = 0;
        for marker in order {
            let pos = html[cursor..]
                .find(marker)
                .unwrap_or_else(|| panic!("missing or out of order: {marker}"));
            cursor += pos + marker.len();
        }
        assert_eq!(html.matches("<hr>").count(), 5);
    }

    #[test]
    fn test_cards_start_at_baseline() {
        let html = render_page(&snapshot(), 50);
        assert!(html.contains(r#"<div class="metric-value" id="card-value-0">0</div>"#));
        assert!(html.contains(r#"<div class="metric-value" id="card-value-2">0.00</div>"#));
        assert!(html.contains(r#"<div class="metric-value" id="card-value-3">AI &amp; IoT</div>"#));
    }

    #[test]
    fn test_figures_embedded() {
        let html = render_page(&snapshot(), 50);
        assert!(html.contains("Publications per Department"));
        assert!(html.contains("natural earth"));
        assert!(html.contains(PLOTLY_CDN));
        assert!(html.contains(STREAM_PATH));
    }

    #[test]
    fn test_script_json_escapes_closing_tags() {
        let value = serde_json::json!({ "t": "</script>" });
        assert_eq!(script_json(&value), r#"{"t":"<\/script>"}"#);
    }
}
