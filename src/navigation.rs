//! The progress indicator and Back/Next buttons shown on every step.

use maud::{Markup, html};

use crate::{
    details::DETAILS_FORM_ID,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE},
    workflow::Step,
};

/// An entry in the progress indicator.
///
/// Only one item should be marked as current at any one time.
#[derive(Clone)]
struct StepItem {
    number: usize,
    title: &'static str,
    is_current: bool,
    is_done: bool,
}

impl StepItem {
    fn into_html(self) -> Markup {
        let badge_style = if self.is_current {
            "flex items-center justify-center w-8 h-8 rounded-full shrink-0 \
            bg-blue-600 text-white dark:bg-blue-500"
        } else if self.is_done {
            "flex items-center justify-center w-8 h-8 rounded-full shrink-0 \
            bg-blue-100 text-blue-700 dark:bg-blue-900 dark:text-blue-200"
        } else {
            "flex items-center justify-center w-8 h-8 rounded-full shrink-0 \
            bg-gray-100 text-gray-500 dark:bg-gray-700 dark:text-gray-400"
        };
        let title_style = if self.is_current {
            "font-semibold text-blue-700 dark:text-blue-400"
        } else {
            "text-gray-500 dark:text-gray-400"
        };

        html!(
            li
                class="flex items-center space-x-2.5"
                aria-current=[self.is_current.then_some("step")]
            {
                span class=(badge_style) { (self.number) }
                span class=(title_style) { (self.title) }
            }
        )
    }
}

/// The workflow's progress indicator and step buttons.
pub struct StepNav {
    current: Step,
    items: Vec<StepItem>,
}

impl StepNav {
    /// Get the navigation for the workflow when it is on `current`.
    pub fn new(current: Step) -> Self {
        let items = Step::ALL
            .iter()
            .map(|step| StepItem {
                number: step.ordinal() + 1,
                title: step.title(),
                is_current: *step == current,
                is_done: step.ordinal() < current.ordinal(),
            })
            .collect();

        Self { current, items }
    }

    /// The progress indicator naming every step.
    pub fn progress_html(&self) -> Markup {
        // Template adapted from https://flowbite.com/docs/components/stepper/
        html!(
            ol
                class="flex flex-col sm:flex-row items-start sm:items-center w-full
                    max-w-screen-md gap-4 sm:gap-8 mb-8 text-sm"
                aria-label="Progress"
            {
                @for item in self.items.clone() {
                    (item.into_html())
                }
            }
        )
    }

    /// The Back and Next buttons, each only shown when there is a step to go to.
    ///
    /// On the details step, Next also sends the business details form so that
    /// unsaved details are kept.
    pub fn buttons_html(&self) -> Markup {
        let include = (self.current == Step::Details).then(|| format!("#{DETAILS_FORM_ID}"));

        html!(
            div class="flex w-full max-w-md gap-4 mt-8"
            {
                @if self.current.has_previous() {
                    button
                        type="button"
                        hx-post=(endpoints::PREVIOUS_STEP)
                        hx-target-error="#alert-container"
                        class=(BUTTON_SECONDARY_STYLE)
                    {
                        "Back"
                    }
                }

                @if self.current.has_next() {
                    button
                        type="button"
                        hx-post=(endpoints::NEXT_STEP)
                        hx-include=[include]
                        hx-target-error="#alert-container"
                        class=(BUTTON_PRIMARY_STYLE)
                    {
                        "Next"
                    }
                }
            }
        )
    }
}
