//! Interpreter - Execute Effects using a Provider
//!
//! The Interpreter executes Effects contained in a Plan in order,
//! collecting the results. This is where side effects actually occur.

use crate::effect::Effect;
use crate::plan::Plan;
use crate::provider::{Provider, ProviderError, ProviderResult};
use crate::resource::State;

/// Result of executing each Effect
#[derive(Debug)]
pub enum EffectOutcome {
    /// Read succeeded
    Read { state: State },
    /// Create succeeded
    Created { state: State },
    /// Update succeeded
    Updated { state: State },
    /// Delete followed by create succeeded
    Replaced { state: State },
    /// Delete succeeded
    Deleted,
    /// Skipped (e.g., dry-run)
    Skipped { reason: String },
}

/// Result of executing the entire Plan
#[derive(Debug)]
pub struct ApplyResult {
    pub outcomes: Vec<Result<EffectOutcome, ProviderError>>,
    pub success_count: usize,
    pub failure_count: usize,
}

impl ApplyResult {
    pub fn is_success(&self) -> bool {
        self.failure_count == 0
    }
}

/// Interpreter configuration
#[derive(Debug, Clone, Default)]
pub struct InterpreterConfig {
    /// If true, skip actual side effects
    pub dry_run: bool,
    /// Continue on error
    pub continue_on_error: bool,
}

/// Interpreter that executes Effects using a Provider
pub struct Interpreter<P: Provider> {
    provider: P,
    config: InterpreterConfig,
}

impl<P: Provider> Interpreter<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            config: InterpreterConfig::default(),
        }
    }

    pub fn with_config(mut self, config: InterpreterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Execute a Plan, interpreting all Effects and causing side effects
    pub async fn apply(&self, plan: &Plan) -> ApplyResult {
        let mut outcomes = Vec::new();
        let mut success_count = 0;
        let mut failure_count = 0;

        for effect in plan.effects() {
            let result = self.execute_effect(effect).await;

            match &result {
                Ok(_) => success_count += 1,
                Err(e) => {
                    log::debug!("{} failed: {}", effect.resource_id(), e);
                    failure_count += 1;
                    if !self.config.continue_on_error {
                        outcomes.push(result);
                        break;
                    }
                }
            }

            outcomes.push(result);
        }

        ApplyResult {
            outcomes,
            success_count,
            failure_count,
        }
    }

    /// Execute a single Effect
    async fn execute_effect(&self, effect: &Effect) -> ProviderResult<EffectOutcome> {
        if self.config.dry_run {
            return Ok(EffectOutcome::Skipped {
                reason: "dry-run mode".to_string(),
            });
        }

        match effect {
            Effect::Read(resource) => {
                let identifier = self.provider.identifier(resource);
                let state = self.provider.read(resource, identifier.as_deref()).await?;
                Ok(EffectOutcome::Read { state })
            }
            Effect::Create(resource) => {
                let state = self.provider.create(resource).await?;
                Ok(EffectOutcome::Created { state })
            }
            Effect::Update {
                identifier,
                from,
                to,
                ..
            } => {
                let state = self.provider.update(identifier, from, to).await?;
                Ok(EffectOutcome::Updated { state })
            }
            Effect::Replace { identifier, to, .. } => {
                self.provider.delete(to, identifier).await?;
                let state = self.provider.create(to).await?;
                Ok(EffectOutcome::Replaced { state })
            }
            Effect::Delete {
                resource,
                identifier,
            } => {
                self.provider.delete(resource, identifier).await?;
                Ok(EffectOutcome::Deleted)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::provider::{BoxFuture, ResourceType};
    use crate::resource::{Resource, ResourceId};

    #[derive(Default)]
    struct TestProvider {
        calls: Mutex<Vec<String>>,
        fail_create: bool,
    }

    impl TestProvider {
        fn record(&self, call: String) {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(call);
            }
        }
    }

    impl Provider for TestProvider {
        fn name(&self) -> &'static str {
            "test"
        }

        fn resource_types(&self) -> Vec<Box<dyn ResourceType>> {
            vec![]
        }

        fn identifier(&self, resource: &Resource) -> Option<String> {
            Some(resource.id.name.clone())
        }

        fn read(
            &self,
            resource: &Resource,
            _identifier: Option<&str>,
        ) -> BoxFuture<'_, ProviderResult<State>> {
            let id = resource.id.clone();
            Box::pin(async move { Ok(State::not_found(id)) })
        }

        fn import(
            &self,
            resource_type: &str,
            identifier: &str,
        ) -> BoxFuture<'_, ProviderResult<State>> {
            let id = ResourceId::new(resource_type, identifier);
            Box::pin(async move { Ok(State::not_found(id)) })
        }

        fn create(&self, resource: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
            self.record(format!("create {}", resource.id));
            let fail = self.fail_create;
            let state = State::existing(resource.id.clone(), resource.attributes.clone())
                .with_identifier(resource.id.name.clone());
            Box::pin(async move {
                if fail {
                    Err(ProviderError::new("Error creating SystemZone resource: boom"))
                } else {
                    Ok(state)
                }
            })
        }

        fn update(
            &self,
            identifier: &str,
            _from: &State,
            to: &Resource,
        ) -> BoxFuture<'_, ProviderResult<State>> {
            self.record(format!("update {}", identifier));
            let state = State::existing(to.id.clone(), to.attributes.clone());
            Box::pin(async move { Ok(state) })
        }

        fn delete(&self, _resource: &Resource, identifier: &str) -> BoxFuture<'_, ProviderResult<()>> {
            self.record(format!("delete {}", identifier));
            Box::pin(async { Ok(()) })
        }
    }

    #[tokio::test]
    async fn apply_empty_plan() {
        let interpreter = Interpreter::new(TestProvider::default());
        let plan = Plan::new();
        let result = interpreter.apply(&plan).await;

        assert!(result.is_success());
        assert_eq!(result.success_count, 0);
    }

    #[tokio::test]
    async fn apply_create_effect() {
        let interpreter = Interpreter::new(TestProvider::default());
        let mut plan = Plan::new();
        plan.add(Effect::Create(Resource::new("system_zone", "dmz")));

        let result = interpreter.apply(&plan).await;

        assert!(result.is_success());
        assert_eq!(result.success_count, 1);
    }

    #[tokio::test]
    async fn replace_deletes_before_create() {
        let interpreter = Interpreter::new(TestProvider::default());
        let to = Resource::new("system_zone", "dmz");
        let mut plan = Plan::new();
        plan.add(Effect::Replace {
            id: to.id.clone(),
            identifier: "old".to_string(),
            from: State::existing(to.id.clone(), Default::default()).with_identifier("old"),
            to,
        });

        let result = interpreter.apply(&plan).await;
        assert!(result.is_success());
        let calls = interpreter.provider().calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec!["delete old".to_string(), "create system_zone.dmz".to_string()]
        );
    }

    #[tokio::test]
    async fn stops_on_first_error() {
        let provider = TestProvider {
            fail_create: true,
            ..Default::default()
        };
        let interpreter = Interpreter::new(provider);
        let mut plan = Plan::new();
        plan.add(Effect::Create(Resource::new("system_zone", "a")));
        plan.add(Effect::Create(Resource::new("system_zone", "b")));

        let result = interpreter.apply(&plan).await;
        assert!(!result.is_success());
        assert_eq!(result.outcomes.len(), 1);
    }

    #[tokio::test]
    async fn continue_on_error_runs_everything() {
        let provider = TestProvider {
            fail_create: true,
            ..Default::default()
        };
        let config = InterpreterConfig {
            continue_on_error: true,
            ..Default::default()
        };
        let interpreter = Interpreter::new(provider).with_config(config);
        let mut plan = Plan::new();
        plan.add(Effect::Create(Resource::new("system_zone", "a")));
        plan.add(Effect::Create(Resource::new("system_zone", "b")));

        let result = interpreter.apply(&plan).await;
        assert_eq!(result.failure_count, 2);
        assert_eq!(result.outcomes.len(), 2);
    }

    #[tokio::test]
    async fn dry_run_skips_effects() {
        let config = InterpreterConfig {
            dry_run: true,
            ..Default::default()
        };
        let interpreter = Interpreter::new(TestProvider::default()).with_config(config);
        let mut plan = Plan::new();
        plan.add(Effect::Create(Resource::new("system_zone", "dmz")));

        let result = interpreter.apply(&plan).await;

        assert!(result.is_success());
        assert!(matches!(
            result.outcomes[0],
            Ok(EffectOutcome::Skipped { .. })
        ));
    }
}
