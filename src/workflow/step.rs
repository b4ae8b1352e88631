//! The three steps of the workflow and the events that move between them.

/// A step of the workflow, in the order the user works through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    /// Enter the business details and choose the expense store.
    #[default]
    Details,
    /// Add expenses to the store.
    Expenses,
    /// View the summary of the expenses.
    Dashboard,
}

/// A user action that moves the workflow cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    /// Go to the next step, if there is one.
    Advance,
    /// Go back to the previous step, if there is one.
    Retreat,
}

impl Step {
    /// Every step, in order.
    pub const ALL: [Step; 3] = [Step::Details, Step::Expenses, Step::Dashboard];

    /// The position of the step, starting at zero.
    pub fn ordinal(self) -> usize {
        match self {
            Step::Details => 0,
            Step::Expenses => 1,
            Step::Dashboard => 2,
        }
    }

    /// The step at `ordinal`, clamped to the last step.
    fn from_ordinal(ordinal: usize) -> Self {
        Self::ALL[ordinal.min(Self::ALL.len() - 1)]
    }

    /// The heading shown for the step.
    pub fn title(self) -> &'static str {
        match self {
            Step::Details => "Enter Business Details",
            Step::Expenses => "Add Expenses",
            Step::Dashboard => "View Dashboard",
        }
    }

    /// Whether there is a step before this one.
    pub fn has_previous(self) -> bool {
        self != Step::Details
    }

    /// Whether there is a step after this one.
    pub fn has_next(self) -> bool {
        self != Step::Dashboard
    }

    /// The step the workflow moves to when `event` happens on this step.
    ///
    /// Advancing from the last step or retreating from the first step leaves
    /// the step unchanged.
    pub fn apply(self, event: StepEvent) -> Step {
        match event {
            StepEvent::Advance => Step::from_ordinal(self.ordinal() + 1),
            StepEvent::Retreat => Step::from_ordinal(self.ordinal().saturating_sub(1)),
        }
    }
}
