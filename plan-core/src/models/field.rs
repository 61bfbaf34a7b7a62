use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a field name or support type cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldParseError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("unknown support type '{0}'")]
    UnknownSupportType(String),

    #[error("'{value}' is not a whole number for {field}")]
    InvalidInteger { field: Field, value: String },
}

/// The fixed set of questionnaire fields, in step order.
///
/// The snake_case names are the boundary contract with the simulation
/// engine and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Age,
    MonthlyExpenses,
    TotalAssets,
    SupportType,
    MonthlySupport,
}

impl Field {
    pub fn all() -> &'static [Field] {
        &[
            Field::Age,
            Field::MonthlyExpenses,
            Field::TotalAssets,
            Field::SupportType,
            Field::MonthlySupport,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::MonthlyExpenses => "monthly_expenses",
            Self::TotalAssets => "total_assets",
            Self::SupportType => "support_type",
            Self::MonthlySupport => "monthly_support",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "age" => Some(Self::Age),
            "monthly_expenses" => Some(Self::MonthlyExpenses),
            "total_assets" => Some(Self::TotalAssets),
            "support_type" => Some(Self::SupportType),
            "monthly_support" => Some(Self::MonthlySupport),
            _ => None,
        }
    }

    /// The questionnaire step that gathers this field.
    pub fn step(&self) -> u8 {
        match self {
            Self::Age => 1,
            Self::MonthlyExpenses => 2,
            Self::TotalAssets => 3,
            Self::SupportType | Self::MonthlySupport => 4,
        }
    }

    /// Whether the field holds an integer (as opposed to a support type).
    pub fn is_integer(&self) -> bool {
        !matches!(self, Self::SupportType)
    }
}

impl fmt::Display for Field {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.trim()).ok_or_else(|| FieldParseError::UnknownField(s.to_string()))
    }
}

/// Kind of public support the respondent receives.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SupportType {
    #[default]
    None,
    Pension,
    Welfare,
    Other,
}

impl SupportType {
    pub fn all() -> &'static [SupportType] {
        &[
            SupportType::None,
            SupportType::Pension,
            SupportType::Welfare,
            SupportType::Other,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Pension => "pension",
            Self::Welfare => "welfare",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "No support",
            Self::Pension => "Disability pension",
            Self::Welfare => "Public assistance (welfare)",
            Self::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Self::None),
            "pension" => Some(Self::Pension),
            "welfare" => Some(Self::Welfare),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for SupportType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SupportType {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(&s.trim().to_ascii_lowercase())
            .ok_or_else(|| FieldParseError::UnknownSupportType(s.to_string()))
    }
}

/// A single answer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Integer(i64),
    Support(SupportType),
}

impl AnswerValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            Self::Support(_) => None,
        }
    }

    pub fn as_support(&self) -> Option<SupportType> {
        match self {
            Self::Support(s) => Some(*s),
            Self::Integer(_) => None,
        }
    }

    /// Parses raw text into the value type declared for `field`.
    pub fn parse_for(
        field: Field,
        raw: &str,
    ) -> Result<Self, FieldParseError> {
        if field.is_integer() {
            raw.trim()
                .parse::<i64>()
                .map(Self::Integer)
                .map_err(|_| FieldParseError::InvalidInteger {
                    field,
                    value: raw.to_string(),
                })
        } else {
            raw.parse::<SupportType>().map(Self::Support)
        }
    }
}

impl From<i64> for AnswerValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<SupportType> for AnswerValue {
    fn from(s: SupportType) -> Self {
        Self::Support(s)
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Support(s) => write!(f, "{s}"),
        }
    }
}
