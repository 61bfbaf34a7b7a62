use crate::models::Field;

/// Number of questionnaire steps.
pub const TOTAL_STEPS: u8 = 4;

/// The questionnaire steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Age,
    MonthlyExpenses,
    TotalAssets,
    Support,
}

impl Step {
    pub fn all() -> &'static [Step] {
        &[
            Step::Age,
            Step::MonthlyExpenses,
            Step::TotalAssets,
            Step::Support,
        ]
    }

    /// 1-based step number.
    pub fn number(self) -> u8 {
        match self {
            Self::Age => 1,
            Self::MonthlyExpenses => 2,
            Self::TotalAssets => 3,
            Self::Support => 4,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::Age),
            2 => Some(Self::MonthlyExpenses),
            3 => Some(Self::TotalAssets),
            4 => Some(Self::Support),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Age => "Your age",
            Self::MonthlyExpenses => "Monthly living expenses",
            Self::TotalAssets => "Available assets",
            Self::Support => "Public support",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Self::Age => "How old are you now?",
            Self::MonthlyExpenses => "How much do you spend in a typical month?",
            Self::TotalAssets => "How much money can you currently use for living?",
            Self::Support => "Do you receive any public support?",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            Self::Age => "Your age is the starting point of the projection (0-120).",
            Self::MonthlyExpenses => {
                "A rough total is fine: food, utilities, phone and so on. \
                 Living alone is typically 100,000-150,000."
            }
            Self::TotalAssets => {
                "Savings and any family assets you can rely on for living costs."
            }
            Self::Support => {
                "Pick the kind of regular support you receive and the monthly amount. \
                 Choose \"none\" if you receive nothing."
            }
        }
    }

    /// Fields gathered by this step.
    pub fn fields(self) -> &'static [Field] {
        match self {
            Self::Age => &[Field::Age],
            Self::MonthlyExpenses => &[Field::MonthlyExpenses],
            Self::TotalAssets => &[Field::TotalAssets],
            Self::Support => &[Field::SupportType, Field::MonthlySupport],
        }
    }

    /// The integer field a bare number typed on this step is written to.
    pub fn amount_field(self) -> Field {
        match self {
            Self::Age => Field::Age,
            Self::MonthlyExpenses => Field::MonthlyExpenses,
            Self::TotalAssets => Field::TotalAssets,
            Self::Support => Field::MonthlySupport,
        }
    }

    pub fn is_optional(self) -> bool {
        matches!(self, Self::Support)
    }
}
