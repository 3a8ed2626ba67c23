//! Server-side HTML for the single dashboard page.
//!
//! The page is one GET form. Changing any dropdown records which field changed
//! in the hidden `changed` input and resubmits, carrying the whole selection
//! back to the server.

use std::fmt::Write;

use crate::model::options::DropdownOption;
use crate::model::selection::{DependentDropdown, RegionChoice};
use crate::session::DashboardView;

pub const PAGE_TITLE: &str = "인구 데이터 대시보드";
pub const SIDO_PLACEHOLDER: &str = "시도를 선택하세요";
pub const SGG_PLACEHOLDER: &str = "시군구를 선택하세요";

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn select_open(out: &mut String, name: &str) {
    let _ = write!(
        out,
        r#"<select id="{name}-dropdown" name="{name}" onchange="this.form.changed.value='{name}';this.form.submit()">"#
    );
}

fn option(out: &mut String, opt: &DropdownOption, selected: bool) {
    let _ = write!(
        out,
        r#"<option value="{}"{}>{}</option>"#,
        escape(&opt.value),
        if selected { " selected" } else { "" },
        escape(&opt.label)
    );
}

fn static_select(out: &mut String, label: &str, name: &str, options: &[DropdownOption], current: &str) {
    let _ = write!(out, "<label>{}</label>", escape(label));
    select_open(out, name);
    for opt in options {
        option(out, opt, opt.value == current);
    }
    out.push_str("</select>");
}

fn dependent_select(out: &mut String, label: &str, name: &str, dropdown: &DependentDropdown, placeholder: &str) {
    let _ = write!(out, "<label>{}</label>", escape(label));
    select_open(out, name);
    if dropdown.value == RegionChoice::Unselected {
        let _ = write!(out, r#"<option value="" selected>{}</option>"#, escape(placeholder));
    }
    if dropdown.stale {
        let value = escape(dropdown.value.wire_value());
        let _ = write!(
            out,
            r#"<option value="{value}" selected class="stale" data-stale="true">{value}</option>"#
        );
    }
    let current = dropdown.value.wire_value();
    for opt in &dropdown.options {
        option(out, opt, !dropdown.stale && opt.value == current);
    }
    out.push_str("</select>");
}

/// Render the whole page. `chart` is the inline SVG, or the message shown in
/// its place when drawing failed.
pub fn render_page(view: &DashboardView, chart: Result<&str, &str>) -> String {
    let sel = &view.selection;
    let mut out = String::with_capacity(16 * 1024);

    let _ = write!(
        out,
        r#"<!doctype html>
<html lang="ko">
<head>
<meta charset="utf-8" />
<title>{title}</title>
<style>
body {{ font-family: sans-serif; }}
form {{ width: 50%; margin: auto; }}
label {{ display: block; margin-top: 8px; }}
select {{ width: 100%; }}
#bar-graph {{ text-align: center; margin-top: 16px; }}
.stale {{ color: #b00; }}
</style>
</head>
<body>
<h1 style="text-align: center">{title}</h1>
<form method="get" action="/">
<input type="hidden" name="changed" value="" />
"#,
        title = escape(PAGE_TITLE)
    );

    static_select(&mut out, "년도 선택:", "year", &view.years, &sel.year.to_string());
    dependent_select(&mut out, "시도 선택:", "sido", &view.sido, SIDO_PLACEHOLDER);
    dependent_select(&mut out, "시군구 선택:", "sgg", &view.sgg, SGG_PLACEHOLDER);
    static_select(&mut out, "유형 선택:", "category", &view.categories, sel.category.column());

    out.push_str("\n</form>\n<div id=\"bar-graph\">");
    match chart {
        Ok(svg) => out.push_str(svg),
        Err(msg) => {
            let _ = write!(out, r#"<p class="chart-error">{}</p>"#, escape(msg));
        }
    }
    out.push_str("</div>\n</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
        assert_eq!(escape("강남구"), "강남구");
    }
}
