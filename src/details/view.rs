use maud::{Markup, html};

use crate::{
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        loading_spinner,
    },
    workflow::{Jurisdiction, Session, StepContent, TaxYear},
};

/// The element showing the active store's file name, replaced after an upload.
const ACTIVE_STORE_ID: &str = "active-store";

/// The details step: a form for choosing the expense store and a form for the
/// business details.
///
/// The tax year input starts with the session's tax year, or `current_year`
/// if none has been saved.
pub fn details_view(session: &Session, current_year: i32) -> StepContent {
    let tax_year = session
        .tax_year
        .map(TaxYear::as_i32)
        .unwrap_or(current_year);

    let body = html!(
        div class=(FORM_CONTAINER_STYLE)
        {
            div class="w-full space-y-8"
            {
                (store_form_view(&session.store.file_name()))
                (business_details_form_view(&session.business_name, tax_year, session.jurisdiction))
            }
        }
    );

    StepContent {
        head: Vec::new(),
        body,
    }
}

/// The file name of the active store.
///
/// Set `swap_out_of_band` when the element is sent with an upload response so
/// htmx replaces the name shown on the page.
pub(super) fn active_store_view(file_name: &str, swap_out_of_band: bool) -> Markup {
    html!(
        span
            id=(ACTIVE_STORE_ID)
            hx-swap-oob=[swap_out_of_band.then_some("true")]
            class="font-mono"
        {
            (file_name)
        }
    )
}

fn store_form_view(active_store: &str) -> Markup {
    let spinner = loading_spinner();

    html!(
        form
            hx-post=(endpoints::STORE_UPLOAD)
            hx-encoding="multipart/form-data"
            enctype="multipart/form-data"
            hx-target="#alert-container"
            hx-target-error="#alert-container"
            hx-disabled-elt="#store, #store-submit-button"
            hx-indicator="#store-indicator"
            class="space-y-4"
        {
            h2 class="text-lg font-semibold" { "Expense Database" }

            p class="text-sm"
            {
                "Active database: " (active_store_view(active_store, false))
            }

            div
            {
                label for="store" class=(FORM_LABEL_STYLE)
                {
                    "Upload an existing database (optional)"
                }

                input
                    id="store"
                    type="file"
                    name="store"
                    accept=".db,.sqlite,.sqlite3"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button
                type="submit"
                id="store-submit-button"
                class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="store-indicator" { (spinner) }
                " Load Database"
            }
        }
    )
}

/// The ID of the business details form, so the Next button can send it too.
pub const DETAILS_FORM_ID: &str = "details-form";

fn business_details_form_view(
    business_name: &str,
    tax_year: i32,
    jurisdiction: Jurisdiction,
) -> Markup {
    html!(
        form
            id=(DETAILS_FORM_ID)
            hx-post=(endpoints::BUSINESS_DETAILS)
            hx-target="#alert-container"
            hx-target-error="#alert-container"
            class="space-y-4"
        {
            h2 class="text-lg font-semibold" { "Business Details" }

            div
            {
                label for="business_name" class=(FORM_LABEL_STYLE) { "Business Name" }

                input
                    id="business_name"
                    type="text"
                    name="business_name"
                    value=(business_name)
                    placeholder="Acme Inc."
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="tax_year" class=(FORM_LABEL_STYLE) { "Tax Year" }

                input
                    id="tax_year"
                    type="number"
                    name="tax_year"
                    value=(tax_year)
                    min=(TaxYear::MIN)
                    max=(TaxYear::MAX)
                    step="1"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="jurisdiction" class=(FORM_LABEL_STYLE) { "Jurisdiction" }

                select
                    id="jurisdiction"
                    name="jurisdiction"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for option in Jurisdiction::ALL {
                        option
                            value=(option.as_str())
                            selected[option == jurisdiction]
                        {
                            (option.as_str())
                        }
                    }
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save Details" }
        }
    )
}
