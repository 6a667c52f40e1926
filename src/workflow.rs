//! Builder page workflow: guard, gate, then assemble.

use thiserror::Error;
use tracing::{debug, info};

use crate::assembler::{assemble, PromptFields};
use crate::gate::{QuotaError, QuotaGate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderState {
    Idle,
    Gating,
    Assembling,
    Blocked(QuotaError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("{0} is required")]
    MissingCoreField(&'static str),
    #[error("{0}")]
    InvalidFields(String),
    #[error(transparent)]
    Blocked(#[from] QuotaError),
}

/// One builder page: the user's fields, the last prompt produced and the
/// state of the current generate attempt.
pub struct Builder<F: PromptFields> {
    pub fields: F,
    state: BuilderState,
    output: Option<String>,
    history: Vec<BuilderState>,
}

impl<F: PromptFields> Builder<F> {
    pub fn new(fields: F) -> Self {
        Self {
            fields,
            state: BuilderState::Idle,
            output: None,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> &BuilderState {
        &self.state
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// States passed through by the last `generate` call, in order
    pub fn transitions(&self) -> &[BuilderState] {
        &self.history
    }

    /// Whether the generate action is available (core field filled in)
    pub fn can_generate(&self) -> bool {
        self.fields.has_core()
    }

    /// Run one generate attempt. The prompt is only produced after the
    /// gate accepts; a refused attempt keeps any earlier output.
    pub async fn generate(&mut self, gate: &QuotaGate) -> Result<&str, GenerateError> {
        self.history.clear();

        if !self.can_generate() {
            return Err(GenerateError::MissingCoreField(core_label::<F>()));
        }
        if let Err(err) = self.fields.check() {
            return Err(GenerateError::InvalidFields(err.to_string()));
        }

        self.enter(BuilderState::Gating);
        if let Err(err) = gate.try_consume(F::CATEGORY).await {
            info!("{} generation blocked: {}", F::CATEGORY, err);
            self.enter(BuilderState::Blocked(err.clone()));
            self.enter(BuilderState::Idle);
            return Err(GenerateError::Blocked(err));
        }

        self.enter(BuilderState::Assembling);
        let prompt = assemble(&self.fields);
        debug!("Assembled {} prompt ({} chars)", F::CATEGORY, prompt.len());
        self.enter(BuilderState::Idle);
        Ok(self.output.insert(prompt).as_str())
    }

    fn enter(&mut self, state: BuilderState) {
        self.history.push(state.clone());
        self.state = state;
    }
}

fn core_label<F: PromptFields>() -> &'static str {
    F::layout().keys().first().copied().unwrap_or("core field")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::{ImageFields, MusicFields};
    use crate::profile::{Identity, Profile, QuotaCounts};
    use crate::session::SessionHandle;
    use crate::store::InMemoryStore;
    use std::sync::Arc;

    fn gate_with(counts: QuotaCounts) -> (Arc<InMemoryStore>, QuotaGate) {
        let identity = Identity::new("user-1", "tok");
        let store = Arc::new(InMemoryStore::with_user("user-1", counts));
        let gate = QuotaGate::with_profile(
            Arc::new(SessionHandle::signed_in(identity.clone())),
            store.clone(),
            identity,
            Profile::new(counts),
        );
        (store, gate)
    }

    #[test]
    fn test_core_label() {
        assert_eq!(core_label::<ImageFields>(), "core_idea");
    }

    #[tokio::test]
    async fn test_missing_core_skips_gate() {
        let (store, gate) = gate_with(QuotaCounts::full());
        let mut builder = Builder::new(ImageFields::default());
        let err = builder.generate(&gate).await.unwrap_err();
        assert_eq!(err, GenerateError::MissingCoreField("core_idea"));
        assert_eq!(store.decrement_calls(), 0);
        assert!(builder.transitions().is_empty());
        assert_eq!(builder.state(), &BuilderState::Idle);
    }

    #[tokio::test]
    async fn test_invalid_fields_skip_gate() {
        let (store, gate) = gate_with(QuotaCounts::full());
        let mut builder = Builder::new(MusicFields {
            core_idea: "rain".into(),
            tempo: 300,
            ..Default::default()
        });
        let err = builder.generate(&gate).await.unwrap_err();
        assert!(matches!(err, GenerateError::InvalidFields(_)));
        assert!(err.to_string().contains("300 BPM"));
        assert_eq!(store.decrement_calls(), 0);
        assert!(builder.output().is_none());
        assert_eq!(gate.remaining_count(crate::category::Category::Music), 5);
    }

    #[tokio::test]
    async fn test_success_path_transitions() {
        let (_store, gate) = gate_with(QuotaCounts::full());
        let mut builder = Builder::new(MusicFields {
            core_idea: "rain".into(),
            ..Default::default()
        });
        let prompt = builder.generate(&gate).await.unwrap().to_string();
        assert_eq!(prompt, "rain, Tempo: 120 BPM");
        assert_eq!(
            builder.transitions(),
            &[
                BuilderState::Gating,
                BuilderState::Assembling,
                BuilderState::Idle
            ]
        );
        assert_eq!(builder.output(), Some("rain, Tempo: 120 BPM"));
    }

    #[tokio::test]
    async fn test_blocked_keeps_previous_output() {
        let mut counts = QuotaCounts::default();
        counts.set(crate::category::Category::Music, 1);
        let (store, gate) = gate_with(counts);
        let mut builder = Builder::new(MusicFields {
            core_idea: "first".into(),
            ..Default::default()
        });
        builder.generate(&gate).await.unwrap();

        builder.fields.core_idea = "second".into();
        let err = builder.generate(&gate).await.unwrap_err();
        assert!(matches!(err, GenerateError::Blocked(QuotaError::LimitReached { .. })));
        assert_eq!(builder.output(), Some("first, Tempo: 120 BPM"));
        assert!(matches!(
            builder.transitions(),
            [BuilderState::Gating, BuilderState::Blocked(_), BuilderState::Idle]
        ));
        assert_eq!(store.decrement_calls(), 1);
    }
}
