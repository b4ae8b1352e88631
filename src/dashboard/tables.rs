//! Table views for the dashboard.

use maud::{Markup, html};

use crate::{
    dashboard::aggregation::CategoryTotal,
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
    ledger::Expense,
};

const TABLE_STYLE: &str = "w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400";
const AMOUNT_CELL_STYLE: &str = "px-6 py-4 text-right whitespace-nowrap";

/// Renders the amount spent in each category.
///
/// Renders nothing if there are no categories.
pub(super) fn category_totals_table(by_category: &[CategoryTotal]) -> Markup {
    if by_category.is_empty() {
        return html! {};
    }

    html!(
        div class="w-full"
        {
            h3 class="text-xl font-semibold mb-4" { "Expenses by Category" }

            div class="overflow-x-auto rounded-lg shadow"
            {
                table id="category-totals" class=(TABLE_STYLE)
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(AMOUNT_CELL_STYLE) { "Amount" }
                        }
                    }

                    tbody
                    {
                        @for total in by_category {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                th
                                    scope="row"
                                    class="px-6 py-4 font-medium text-gray-900 dark:text-white"
                                {
                                    (total.category)
                                }
                                td class=(AMOUNT_CELL_STYLE) { (format_currency(total.amount)) }
                            }
                        }
                    }
                }
            }
        }
    )
}

/// Renders every expense as it is stored.
pub(super) fn expenses_table(expenses: &[Expense]) -> Markup {
    html!(
        div class="w-full"
        {
            h3 class="text-xl font-semibold mb-4" { "Expense Records" }

            div class="overflow-x-auto rounded-lg shadow"
            {
                table id="expense-records" class=(TABLE_STYLE)
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                            th scope="col" class=(AMOUNT_CELL_STYLE) { "Amount" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Notes" }
                        }
                    }

                    tbody
                    {
                        @for expense in expenses {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td class="px-6 py-4 whitespace-nowrap" { (expense.date) }
                                td class=(TABLE_CELL_STYLE) { (expense.category) }
                                td class=(TABLE_CELL_STYLE) { (expense.description) }
                                td class=(AMOUNT_CELL_STYLE) { (format_currency(expense.amount)) }
                                td class=(TABLE_CELL_STYLE) { (expense.notes) }
                            }
                        }

                        @if expenses.is_empty() {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td colspan="5" class="px-6 py-4 text-center"
                                {
                                    "No expenses recorded yet."
                                }
                            }
                        }
                    }
                }
            }
        }
    )
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::{
        dashboard::{
            aggregation::CategoryTotal,
            tables::{category_totals_table, expenses_table},
        },
        ledger::Expense,
    };

    fn row_text(html: &Html, table: &str) -> Vec<Vec<String>> {
        html.select(&Selector::parse(&format!("#{table} tbody tr")).unwrap())
            .map(|row| {
                row.select(&Selector::parse("th, td").unwrap())
                    .map(|cell| cell.text().collect::<String>().trim().to_owned())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn expenses_table_shows_each_record() {
        let expenses = [Expense {
            id: 1,
            date: "2024-01-15".to_owned(),
            category: "Travel".to_owned(),
            description: "Flight".to_owned(),
            amount: 450.0,
            notes: "Economy".to_owned(),
        }];

        let html = Html::parse_fragment(&expenses_table(&expenses).into_string());

        assert_eq!(
            row_text(&html, "expense-records"),
            vec![vec!["2024-01-15", "Travel", "Flight", "$450.00", "Economy"]]
        );
    }

    #[test]
    fn empty_expenses_table_has_placeholder_row() {
        let html = Html::parse_fragment(&expenses_table(&[]).into_string());

        assert_eq!(
            row_text(&html, "expense-records"),
            vec![vec!["No expenses recorded yet."]]
        );
    }

    #[test]
    fn category_table_shows_each_total() {
        let html = Html::parse_fragment(
            &category_totals_table(&[CategoryTotal {
                category: "Travel".to_owned(),
                amount: 750.0,
            }])
            .into_string(),
        );

        assert_eq!(
            row_text(&html, "category-totals"),
            vec![vec!["Travel", "$750.00"]]
        );
    }

    #[test]
    fn empty_category_table_renders_nothing() {
        assert_eq!(category_totals_table(&[]).into_string(), "");
    }
}
