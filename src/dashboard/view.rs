//! Dashboard view rendering.

use maud::html;

use crate::{
    dashboard::{
        aggregation::summarize_expenses,
        charts::{DashboardChart, category_pie_chart, chart_view, charts_script},
        tables::{category_totals_table, expenses_table},
    },
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, format_currency},
    ledger::Expense,
    workflow::{BusinessDetails, StepContent},
};

/// Renders the dashboard for `details` with the expenses read from the store.
///
/// The pie chart is left out when there are no expenses.
pub fn dashboard_view(details: BusinessDetails<'_>, expenses: &[Expense]) -> StepContent {
    let summary = summarize_expenses(expenses);

    let chart = (!expenses.is_empty()).then(|| DashboardChart {
        id: "category-chart",
        options: category_pie_chart(&summary.by_category).to_string(),
    });

    let body = html!(
        div
            id="dashboard-content"
            class="flex flex-col items-center w-full max-w-screen-xl gap-8"
        {
            div class="text-center"
            {
                h2 class="text-2xl font-bold" {
                    (details.name) " - " (details.tax_year) " Tax Year Dashboard"
                }

                p class="text-gray-600 dark:text-gray-400" { "Cumulative Profit & Loss Summary" }

                p id="total-expenses" class="mt-4 text-xl font-semibold"
                {
                    "Total Expenses: " (format_currency(summary.total))
                }
            }

            @if let Some(chart) = &chart {
                (chart_view(chart))
            }

            (category_totals_table(&summary.by_category))

            (expenses_table(expenses))

            a
                href=(endpoints::EXPENSES_EXPORT)
                download
                class={"text-center " (BUTTON_PRIMARY_STYLE)}
                style="max-width: 20rem;"
            {
                "Download CSV"
            }
        }
    );

    StepContent {
        head: chart
            .as_ref()
            .map(|chart| charts_script(std::slice::from_ref(chart)))
            .unwrap_or_default(),
        body,
    }
}

/// Renders the warning shown instead of the dashboard when the business
/// details have not been entered.
pub fn dashboard_blocked_view() -> StepContent {
    let body = html!(
        div
            role="alert"
            class="w-full max-w-md p-4 text-sm text-yellow-800 rounded-lg bg-yellow-50
                dark:bg-gray-800 dark:text-yellow-300"
        {
            span class="font-medium" { "Business details missing" }
            p { "Please enter your business details first. Go back to add them." }
        }
    );

    StepContent {
        head: Vec::new(),
        body,
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::{
        dashboard::view::dashboard_view,
        endpoints,
        ledger::Expense,
        workflow::{BusinessDetails, TaxYear},
    };

    fn details() -> BusinessDetails<'static> {
        BusinessDetails {
            name: "Acme",
            tax_year: TaxYear::new(2024).unwrap(),
        }
    }

    fn travel_expense(id: i64, description: &str, amount: f64) -> Expense {
        Expense {
            id,
            date: "2024-01-15".to_owned(),
            category: "Travel".to_owned(),
            description: description.to_owned(),
            amount,
            notes: String::new(),
        }
    }

    fn select_text(html: &Html, selector: &str) -> String {
        html.select(&Selector::parse(selector).unwrap())
            .next()
            .unwrap_or_else(|| panic!("no element matches {selector}"))
            .text()
            .collect::<String>()
    }

    #[test]
    fn shows_title_and_total() {
        let expenses = [
            travel_expense(1, "Flight", 450.0),
            travel_expense(2, "Hotel", 300.0),
        ];

        let content = dashboard_view(details(), &expenses);
        let html = Html::parse_fragment(&content.body.into_string());

        assert_eq!(select_text(&html, "h2"), "Acme - 2024 Tax Year Dashboard");
        assert_eq!(
            select_text(&html, "#total-expenses").trim(),
            "Total Expenses: $750.00"
        );
        assert!(html
            .select(&Selector::parse("#category-chart").unwrap())
            .next()
            .is_some());
        assert_eq!(content.head.len(), 2, "want chart scripts");
    }

    #[test]
    fn empty_ledger_has_zero_total_and_no_chart() {
        let content = dashboard_view(details(), &[]);
        let html = Html::parse_fragment(&content.body.into_string());

        assert_eq!(
            select_text(&html, "#total-expenses").trim(),
            "Total Expenses: $0.00"
        );
        assert!(html
            .select(&Selector::parse("#category-chart").unwrap())
            .next()
            .is_none());
        assert!(html
            .select(&Selector::parse("#category-totals").unwrap())
            .next()
            .is_none());
        assert!(content.head.is_empty());
    }

    #[test]
    fn links_to_csv_export() {
        let content = dashboard_view(details(), &[travel_expense(1, "Flight", 450.0)]);
        let html = Html::parse_fragment(&content.body.into_string());

        let link = html
            .select(&Selector::parse("a[download]").unwrap())
            .next()
            .expect("download link missing");

        assert_eq!(link.value().attr("href"), Some(endpoints::EXPENSES_EXPORT));
    }
}
