//! # Venus Testing
//!
//! Testing utilities for reducers built on `venus-core`.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then builder for reducer unit tests
//! - [`assertions`]: Assertion helpers for returned effects
//! - [`effects`]: Helpers to drive `Effect::Future` values without a Store
//! - [`init_test_tracing`]: Opt-in log output for failing tests
//!
//! ## Example
//!
//! ```ignore
//! use venus_testing::{assertions, ReducerTest};
//!
//! ReducerTest::new(TodoReducer::new())
//!     .with_env(test_environment())
//!     .given_state(TodoState::new())
//!     .when_action(TodoAction::AddItem { text: "Buy milk".to_string() })
//!     .then_state(|state| assert_eq!(state.items.len(), 1))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```


pub use reducer_test::{assertions, ReducerTest};

/// Helpers for executing effect descriptions inside tests
pub mod effects {
    use venus_core::effect::Effect;

    /// Await a single effect and return the action it feeds back
    ///
    /// `Effect::None` resolves to `None` without polling anything.
    pub async fn resolve<A>(effect: Effect<A>) -> Option<A> {
        match effect {
            Effect::None => None,
            Effect::Future(fut) => fut.await,
        }
    }

    /// Await every effect in order and collect the actions they produce
    pub async fn resolve_all<A, I>(effects: I) -> Vec<A>
    where
        I: IntoIterator<Item = Effect<A>>,
    {
        let mut actions = Vec::new();
        for effect in effects {
            if let Some(action) = resolve(effect).await {
                actions.push(action);
            }
        }
        actions
    }
}

/// Install a `tracing` subscriber that writes through the test harness
///
/// Honours `RUST_LOG`. Safe to call from many tests; only the first call wins.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::effects;
    use venus_core::effect::Effect;

    #[tokio::test]
    async fn resolve_none_yields_nothing() {
        assert_eq!(effects::resolve(Effect::<u8>::None).await, None);
    }

    #[tokio::test]
    async fn resolve_all_collects_in_order() {
        let actions = effects::resolve_all(vec![
            Effect::future(async { Some(1_u8) }),
            Effect::None,
            Effect::future(async { None }),
            Effect::future(async { Some(2_u8) }),
        ])
        .await;
        assert_eq!(actions, vec![1, 2]);
    }

    #[test]
    fn init_test_tracing_is_idempotent() {
        super::init_test_tracing();
        super::init_test_tracing();
    }
}
