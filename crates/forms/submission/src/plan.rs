use crate::{SubmissionPhase, ValidationRule};

/// Declarative description of one screen's submission.
#[derive(Clone, Debug)]
pub struct SubmissionPlan {
    name: String,
    success_message: String,
    validation: Vec<ValidationRule>,
    phases: Vec<SubmissionPhase>,
}

impl SubmissionPlan {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            success_message: format!("{} : enregistré", name),
            name,
            validation: Vec::new(),
            phases: Vec::new(),
        }
    }

    pub fn success_message(mut self, message: impl Into<String>) -> Self {
        self.success_message = message.into();
        self
    }

    pub fn validate(mut self, rule: ValidationRule) -> Self {
        self.validation.push(rule);
        self
    }

    /// Add a phase. Phases are kept sorted by `order`; equal orders keep
    /// insertion order.
    pub fn phase(mut self, phase: SubmissionPhase) -> Self {
        self.phases.push(phase);
        self.phases.sort_by_key(SubmissionPhase::order);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message_on_success(&self) -> &str {
        &self.success_message
    }

    pub fn rules(&self) -> &[ValidationRule] {
        &self.validation
    }

    pub fn phases(&self) -> &[SubmissionPhase] {
        &self.phases
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockCall;
    use std::sync::Arc;

    #[test]
    fn phases_sorted_by_order() {
        let plan = SubmissionPlan::new("Profil")
            .phase(SubmissionPhase::new(2, "b", Arc::new(MockCall::succeed())))
            .phase(SubmissionPhase::new(0, "a", Arc::new(MockCall::succeed())))
            .phase(SubmissionPhase::new(2, "c", Arc::new(MockCall::succeed())));

        let labels: Vec<_> = plan.phases().iter().map(|p| p.label()).collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
    }
}
