use forms_fields::FieldState;
use forms_types::ValidationIssue;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Check {
    Required { field: String },
    Matches { field: String, confirmation: String },
    MinLength { field: String, min: usize },
}

/// A local check derivable purely from form state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationRule {
    check: Check,
    message: String,
    /// Only checked when this field is filled.
    when_filled: Option<String>,
}

impl ValidationRule {
    /// `field` must be present and non-blank.
    pub fn required(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with(Check::Required { field: field.into() }, message)
    }

    /// `confirmation` must equal `field` exactly.
    pub fn matches(
        field: impl Into<String>,
        confirmation: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::with(
            Check::Matches {
                field: field.into(),
                confirmation: confirmation.into(),
            },
            message,
        )
    }

    /// A filled `field` must be at least `min` characters long. Blank values
    /// pass; pair with [`required`](Self::required) when needed.
    pub fn min_length(field: impl Into<String>, min: usize, message: impl Into<String>) -> Self {
        Self::with(
            Check::MinLength {
                field: field.into(),
                min,
            },
            message,
        )
    }

    /// Restrict the rule to states where `field` is filled.
    pub fn when_filled(mut self, field: impl Into<String>) -> Self {
        self.when_filled = Some(field.into());
        self
    }

    fn with(check: Check, message: impl Into<String>) -> Self {
        Self {
            check,
            message: message.into(),
            when_filled: None,
        }
    }

    /// The field an issue from this rule is reported on.
    pub fn field(&self) -> &str {
        match &self.check {
            Check::Required { field } | Check::MinLength { field, .. } => field,
            Check::Matches { confirmation, .. } => confirmation,
        }
    }

    pub fn evaluate(&self, state: &FieldState) -> Option<ValidationIssue> {
        if let Some(condition) = &self.when_filled {
            if state.is_blank(condition) {
                return None;
            }
        }

        let failed = match &self.check {
            Check::Required { field } => state.is_blank(field),
            Check::Matches {
                field,
                confirmation,
            } => state.text(field) != state.text(confirmation),
            Check::MinLength { field, min } => {
                !state.is_blank(field) && state.text(field).chars().count() < *min
            }
        };

        failed.then(|| ValidationIssue::new(self.field(), self.message.clone()))
    }
}

/// Every issue raised by `rules` against `state`, in rule order.
pub(crate) fn collect_issues<'a, I>(rules: I, state: &FieldState) -> Vec<ValidationIssue>
where
    I: IntoIterator<Item = &'a ValidationRule>,
{
    rules
        .into_iter()
        .filter_map(|rule| rule.evaluate(state))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_blank_and_missing() {
        let rule = ValidationRule::required("nom", "Le nom est obligatoire");
        assert!(rule.evaluate(&FieldState::new()).is_some());
        assert!(rule
            .evaluate(&FieldState::from_pairs([("nom", "  ")]))
            .is_some());
        assert!(rule
            .evaluate(&FieldState::from_pairs([("nom", "Ben Ali")]))
            .is_none());
    }

    #[test]
    fn mismatch_is_reported_on_confirmation() {
        let rule = ValidationRule::matches(
            "new_password",
            "confirm_password",
            "Les mots de passe ne correspondent pas",
        );
        let issue = rule
            .evaluate(&FieldState::from_pairs([
                ("new_password", "x"),
                ("confirm_password", "y"),
            ]))
            .unwrap();
        assert_eq!(issue.field, "confirm_password");
    }

    #[test]
    fn conditional_rule_is_skipped_when_condition_blank() {
        let rule = ValidationRule::required("current_password", "Mot de passe actuel requis")
            .when_filled("new_password");
        assert!(rule.evaluate(&FieldState::new()).is_none());
        assert!(rule
            .evaluate(&FieldState::from_pairs([("new_password", "secret")]))
            .is_some());
    }

    #[test]
    fn min_length_ignores_blank() {
        let rule = ValidationRule::min_length("password", 6, "6 caractères minimum");
        assert!(rule.evaluate(&FieldState::new()).is_none());
        assert!(rule
            .evaluate(&FieldState::from_pairs([("password", "abc")]))
            .is_some());
        assert!(rule
            .evaluate(&FieldState::from_pairs([("password", "abcdef")]))
            .is_none());
    }
}
