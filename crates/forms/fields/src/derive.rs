//! Reusable derivations for [`DependencyRule::derive`](crate::DependencyRule::derive).

use chrono::{Months, NaiveDate};
use forms_types::FieldValue;

use crate::FieldState;

/// Date format used by date inputs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// `target = lowercase(trigger) + "@" + domain`, or empty when the trigger is
/// the empty string. Used to build the login email from a CIN; the CIN is
/// taken as typed, surrounding whitespace included.
pub fn lowercase_with_domain(
    target: impl Into<String>,
    domain: impl Into<String>,
) -> impl Fn(&FieldValue, &FieldState) -> Vec<(String, FieldValue)> + Send + Sync + 'static {
    let target = target.into();
    let domain = domain.into();
    move |value, _| {
        let raw = value.to_string();
        let derived = if raw.is_empty() {
            String::new()
        } else {
            format!("{}@{}", raw.to_lowercase(), domain)
        };
        vec![(target.clone(), FieldValue::Text(derived))]
    }
}

/// `target = trigger`, unchanged.
pub fn copy_to(
    target: impl Into<String>,
) -> impl Fn(&FieldValue, &FieldState) -> Vec<(String, FieldValue)> + Send + Sync + 'static {
    let target = target.into();
    move |value, _| vec![(target.clone(), value.clone())]
}

/// `target = state[date_field] + state[months_field] months`, formatted as
/// [`DATE_FORMAT`]. Empty when either input is missing or unparsable, so a
/// cleared date also clears the due date.
pub fn due_date(
    target: impl Into<String>,
    date_field: impl Into<String>,
    months_field: impl Into<String>,
) -> impl Fn(&FieldValue, &FieldState) -> Vec<(String, FieldValue)> + Send + Sync + 'static {
    let target = target.into();
    let date_field = date_field.into();
    let months_field = months_field.into();
    move |_, state| {
        let due = add_months(&state.text(&date_field), state.get(&months_field))
            .unwrap_or_default();
        vec![(target.clone(), FieldValue::Text(due))]
    }
}

fn add_months(date: &str, months: Option<&FieldValue>) -> Option<String> {
    let start = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).ok()?;
    let months = u32::try_from(months?.as_integer()?).ok()?;
    start
        .checked_add_months(Months::new(months))
        .map(|d| d.format(DATE_FORMAT).to_string())
}
