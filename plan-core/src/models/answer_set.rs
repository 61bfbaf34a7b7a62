use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::field::{AnswerValue, Field, SupportType};

/// Shown in place of a field that has no answer yet.
pub const NOT_ANSWERED: &str = "(not answered)";

/// The accumulated, possibly partial, answers of one questionnaire session.
///
/// Values are stored as given; a value whose tag does not match the field's
/// declared type is kept but reads back as absent through the typed getters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    values: BTreeMap<Field, AnswerValue>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any existing value for `field`.
    pub fn set(
        &mut self,
        field: Field,
        value: AnswerValue,
    ) {
        self.values.insert(field, value);
    }

    pub fn get(
        &self,
        field: Field,
    ) -> Option<&AnswerValue> {
        self.values.get(&field)
    }

    /// Integer value of `field`, or `None` when absent or not an integer.
    pub fn integer(
        &self,
        field: Field,
    ) -> Option<i64> {
        self.get(field).and_then(AnswerValue::as_integer)
    }

    /// Support type answer, or `None` when absent or not a support type.
    pub fn support_type(&self) -> Option<SupportType> {
        self.get(Field::SupportType).and_then(AnswerValue::as_support)
    }

    pub fn contains(
        &self,
        field: Field,
    ) -> bool {
        self.values.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, AnswerValue)> + '_ {
        self.values.iter().map(|(field, value)| (*field, *value))
    }
}

impl FromIterator<(Field, AnswerValue)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (Field, AnswerValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for AnswerSet {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for field in Field::all() {
            let shown = self
                .get(*field)
                .map(|v| v.to_string())
                .unwrap_or_else(|| NOT_ANSWERED.to_string());
            writeln!(f, "{:<18}{}", format!("{field}:"), shown)?;
        }
        Ok(())
    }
}
