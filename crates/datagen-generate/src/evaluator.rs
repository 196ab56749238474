use rhai::{Dynamic, Engine, Scope};
use serde_json::Value;

use crate::errors::EvaluationError;
use crate::faker::{self, Faker};

/// Name under which the faker library is visible to expressions.
pub const FAKER_BINDING: &str = "faker";

const MAX_OPERATIONS: u64 = 100_000;
const MAX_EXPR_DEPTH: usize = 64;
const MAX_FUNCTION_EXPR_DEPTH: usize = 32;

/// Evaluates a `@generate` expression into a JSON value.
///
/// Every call is independent: two calls with the same expression may return
/// different values.
pub trait ExpressionEvaluator {
    fn evaluate(&self, expression: &str) -> Result<Value, EvaluationError>;
}

impl<F> ExpressionEvaluator for F
where
    F: Fn(&str) -> Result<Value, EvaluationError>,
{
    fn evaluate(&self, expression: &str) -> Result<Value, EvaluationError> {
        self(expression)
    }
}

/// Rhai-backed sandbox with the `faker` binding.
pub struct RhaiEvaluator {
    engine: Engine,
    faker: Faker,
}

impl RhaiEvaluator {
    pub fn new(faker: Faker) -> Self {
        let mut engine = Engine::new();
        engine.set_max_operations(MAX_OPERATIONS);
        engine.set_max_expr_depths(MAX_EXPR_DEPTH, MAX_FUNCTION_EXPR_DEPTH);
        faker::register(&mut engine);
        Self { engine, faker }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Faker::seeded(seed))
    }
}

impl ExpressionEvaluator for RhaiEvaluator {
    fn evaluate(&self, expression: &str) -> Result<Value, EvaluationError> {
        let mut scope = Scope::new();
        scope.push(FAKER_BINDING, self.faker.clone());

        let result = self
            .engine
            .eval_with_scope::<Dynamic>(&mut scope, expression)
            .map_err(|err| EvaluationError::Script(err.to_string()))?;

        serde_json::to_value(&result).map_err(|err| EvaluationError::Conversion(err.to_string()))
    }
}
