use crate::countries;
use crate::models::comparison::{ComparisonReport, ComparisonTotals, IntervalComparison};

/// Renders a `ComparisonReport` as the ranked country list markup.
///
/// Output is an HTML fragment: a totals header, a column header row and one
/// `<li>` per country in report order.
pub fn render_country_list(report: &ComparisonReport) -> String {
    let mut html = String::new();
    html.push_str(&render_totals(&report.totals));
    html.push_str(
        r#"
<div class="country-list-header">
    <span class="country-name desktopTitle">Country</span>
    <span class="increase desktopTitle">Increase from Yesterday</span>
    <span class="rate-change desktopTitle">Rate Change from Yesterday</span>
    <span class="increase desktopTitle">Increase from Last Week</span>
    <span class="rate-change desktopTitle">Rate Change from Last Week</span>
</div>
<ul>"#,
    );
    for row in &report.rows {
        html.push_str(&render_row(row));
    }
    html.push_str("\n</ul>\n");
    html
}

fn render_totals(totals: &ComparisonTotals) -> String {
    format!(
        r#"<div class="overall-count">
    <p>Total Increase from Yesterday: {day} (<span class="{day_class}">{day_rate}%</span>)</p>
    <p>Total Increase from Last Week: {week} (<span class="{week_class}">{week_rate}%</span>)</p>
</div>"#,
        day = format_signed(totals.increase_from_yesterday),
        day_class = trend_class(totals.rate_change_from_yesterday, "increase", "decrease"),
        day_rate = format_fixed(totals.rate_change_from_yesterday),
        week = format_signed(totals.increase_from_last_week),
        week_class = trend_class(totals.rate_change_from_last_week, "increase", "decrease"),
        week_rate = format_fixed(totals.rate_change_from_last_week),
    )
}

fn render_row(row: &IntervalComparison) -> String {
    let flag = countries::flag(&row.country_code);
    let name = escape_html(&row.country_name);

    format!(
        r#"
<li>
    <span class="country-name">{flag} {name}</span>
    <span class="increase mobileTitle">Increase from Yesterday</span>
    <span class="increase">{day} ({day_pct}%)</span>
    <span class="rate-change mobileTitle">Rate Change from Yesterday</span>
    <span class="{day_class}">{day_rate}%</span>
    <span class="increase mobileTitle">Increase from Last Week</span>
    <span class="increase">{week} ({week_pct}%)</span>
    <span class="rate-change mobileTitle">Rate Change from Last Week</span>
    <span class="{week_class}">{week_rate}%</span>
</li>"#,
        day = format_signed(row.increase_from_yesterday),
        day_pct = format_fixed(row.percentage_increase_from_yesterday),
        day_class = trend_class(row.rate_change_from_yesterday, "faster", "slower"),
        day_rate = format_fixed(row.rate_change_from_yesterday),
        week = format_signed(row.increase_from_last_week),
        week_pct = format_fixed(row.percentage_increase_from_last_week),
        week_class = trend_class(row.rate_change_from_last_week, "faster", "slower"),
        week_rate = format_fixed(row.rate_change_from_last_week),
    )
}

fn trend_class(value: f64, up: &'static str, down: &'static str) -> &'static str {
    if value >= 0.0 {
        up
    } else {
        down
    }
}

// ── Formatting helpers ──────────────────────────────────────────────

/// Integer with comma thousands separators: `1234567` → `"1,234,567"`.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Explicitly signed count: `"+1,234"`, `"-56"`, `"+0"`.
pub fn format_signed(value: i64) -> String {
    if value < 0 {
        format_thousands(value)
    } else {
        format!("+{}", format_thousands(value))
    }
}

/// Two decimals, with negative zero printed as `0.00`.
pub fn format_fixed(value: f64) -> String {
    let s = format!("{value:.2}");
    if s == "-0.00" {
        "0.00".to_string()
    } else {
        s
    }
}

/// Escape the five HTML-significant characters.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
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
