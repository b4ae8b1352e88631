use maud::html;
use time::Date;

use crate::{
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        dollar_input_styles,
    },
    ledger::ExpenseCategory,
    workflow::StepContent,
};

/// The expense step: a form for adding one expense at a time.
///
/// The date input starts at `today`.
pub fn expense_form_view(today: Date) -> StepContent {
    let body = html!(
        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(endpoints::EXPENSES_API)
                hx-target="#alert-container"
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                div
                {
                    label for="category" class=(FORM_LABEL_STYLE) { "Expense Category" }

                    select
                        id="category"
                        name="category"
                        required
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for category in ExpenseCategory::ALL {
                            option value=(category.as_str()) { (category.as_str()) }
                        }
                    }
                }

                div
                {
                    label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                    input
                        id="date"
                        type="date"
                        name="date"
                        value=(today)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                    input
                        id="description"
                        type="text"
                        name="description"
                        placeholder="Flight to the conference"
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                    div class="input-wrapper w-full"
                    {
                        input
                            id="amount"
                            type="number"
                            name="amount"
                            min="0"
                            step="0.01"
                            placeholder="0.00"
                            required
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                div
                {
                    label for="notes" class=(FORM_LABEL_STYLE) { "Notes" }

                    textarea
                        id="notes"
                        name="notes"
                        rows="3"
                        class=(FORM_TEXT_INPUT_STYLE)
                    {}
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Expense" }
            }
        }
    );

    StepContent {
        head: vec![dollar_input_styles()],
        body,
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        endpoints,
        expenses::view::expense_form_view,
        test_utils::{
            assert_form_input, assert_form_input_with_value, assert_form_submit_button_with_text,
            assert_hx_endpoint, must_get_form,
        },
    };

    #[test]
    fn renders_expense_form() {
        let content = expense_form_view(date!(2024 - 03 - 01));
        let html = Html::parse_fragment(&content.body.into_string());

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::EXPENSES_API, "hx-post");
        assert_form_input_with_value(&form, "date", "date", "2024-03-01");
        assert_form_input(&form, "amount", "number");
        assert_form_submit_button_with_text(&form, "Add Expense");
        assert_eq!(content.head.len(), 1, "want dollar input styles");
    }

    #[test]
    fn offers_every_category() {
        let content = expense_form_view(date!(2024 - 03 - 01));
        let html = Html::parse_fragment(&content.body.into_string());

        let options = html
            .select(&Selector::parse("select[name='category'] option").unwrap())
            .map(|option| option.value().attr("value").unwrap_or_default().to_owned())
            .collect::<Vec<_>>();

        assert_eq!(
            options,
            vec!["Salaries", "Contractors", "Travel", "Networking", "Other"]
        );
    }
}
