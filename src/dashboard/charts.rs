//! Chart generation and rendering for the dashboard.
//!
//! The category breakdown is drawn as an ECharts pie chart. The chart is
//! generated as JSON configuration for ECharts and rendered with a container
//! element and the JavaScript that initializes it.

use charming::{
    Chart,
    component::{Legend, Title},
    element::{Label, Tooltip, Trigger},
    series::Pie,
};
use maud::{Markup, PreEscaped, html};

use crate::{dashboard::aggregation::CategoryTotal, html::HeadElement};

const ECHARTS_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML container for a dashboard chart.
pub(super) fn chart_view(chart: &DashboardChart) -> Markup {
    html!(
        div
            id=(chart.id)
            class="w-full min-h-[380px] rounded dark:bg-gray-100"
        {}
    )
}

/// The scripts needed to draw `charts`: the ECharts library and the code that
/// initializes each chart with dark mode support and responsive resizing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> Vec<HeadElement> {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id,
                escape_script_json(&chart.options)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    vec![
        HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned()),
        HeadElement::ScriptSource(PreEscaped(wrapped_script)),
    ]
}

/// Escape the characters in `json` that could end an inline `<script>` element
/// or start an HTML comment. The result is still valid JSON.
fn escape_script_json(json: &str) -> String {
    let mut escaped = String::with_capacity(json.len());

    for c in json.chars() {
        match c {
            '<' => escaped.push_str("\\u003c"),
            '>' => escaped.push_str("\\u003e"),
            '&' => escaped.push_str("\\u0026"),
            c => escaped.push(c),
        }
    }

    escaped
}

/// A pie chart of the amount spent in each category, with each slice labelled
/// by its share of the total.
pub(super) fn category_pie_chart(by_category: &[CategoryTotal]) -> Chart {
    let data = by_category
        .iter()
        .map(|total| (total.amount, total.category.as_str()))
        .collect::<Vec<_>>();

    Chart::new()
        .title(Title::new().text("Expenses by Category"))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().top("bottom"))
        .series(
            Pie::new()
                .name("Expenses")
                .radius("55%")
                .center(vec!["50%", "50%"])
                .label(Label::new().show(true).formatter("{b}: {d}%"))
                .data(data),
        )
}

#[cfg(test)]
mod tests {
    use crate::{
        dashboard::{
            aggregation::CategoryTotal,
            charts::{DashboardChart, category_pie_chart, charts_script, escape_script_json},
        },
        html::HeadElement,
    };

    #[test]
    fn pie_chart_has_slice_per_category() {
        let chart = category_pie_chart(&[
            CategoryTotal {
                category: "Travel".to_owned(),
                amount: 750.0,
            },
            CategoryTotal {
                category: "Salaries".to_owned(),
                amount: 5000.0,
            },
        ])
        .to_string();

        assert!(chart.contains("\"pie\""), "want a pie series, got {chart}");
        assert!(chart.contains("Travel"));
        assert!(chart.contains("Salaries"));
        assert!(chart.contains("750"));
        assert!(chart.contains("{b}: {d}%"), "want percentage labels, got {chart}");
    }

    #[test]
    fn escape_script_json_hides_html_syntax() {
        assert_eq!(
            escape_script_json(r#"{"name":"</script>&"}"#),
            r#"{"name":"\u003c/script\u003e\u0026"}"#
        );
    }

    #[test]
    fn category_names_cannot_close_the_script() {
        let options = category_pie_chart(&[CategoryTotal {
            category: "</script><script>alert(1)</script>".to_owned(),
            amount: 10.0,
        }])
        .to_string();

        let scripts = charts_script(&[DashboardChart {
            id: "category-chart",
            options,
        }]);

        match &scripts[1] {
            HeadElement::ScriptSource(source) => {
                assert!(!source.0.contains("</script>"), "got {}", source.0);
                assert!(!source.0.contains("<script>"), "got {}", source.0);
                assert!(source.0.contains("\\u003c/script\\u003e"));
            }
            _ => panic!("want a script source"),
        }
    }

    #[test]
    fn script_initializes_each_chart() {
        let scripts = charts_script(&[DashboardChart {
            id: "category-chart",
            options: "{}".to_owned(),
        }]);

        assert_eq!(scripts.len(), 2);
        assert!(matches!(&scripts[0], HeadElement::ScriptLink(url) if url.contains("echarts")));
        match &scripts[1] {
            HeadElement::ScriptSource(source) => {
                assert!(source.0.contains("document.getElementById(\"category-chart\")"))
            }
            _ => panic!("want a script source"),
        }
    }
}
