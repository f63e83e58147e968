use std::{collections::HashMap, f64::consts, sync::Arc};

use tracing::debug;

use crate::{
    error::ExprResult,
    interpreter::{
        evaluator::evaluate,
        lexer::tokenize,
        registry::{DivisionPolicy, FunctionDefinition, OperatorDefinition, Registry},
        shunting_yard::to_postfix,
        token::Token,
    },
};

/// The postfix cache.
///
/// Stores postfix sequences by the literal text they were compiled from, with
/// optional oldest-first eviction.
pub mod cache;
/// Executor configuration.
///
/// Defines the serde-loadable settings an executor is built from.
pub mod config;

pub use cache::PostfixCache;
pub use config::ExecutorConfig;

/// Stores everything needed to run expressions repeatedly.
///
/// An executor owns the variable environment, the operator and function
/// registry, and a cache of compiled postfix sequences. The environment starts
/// with the constants `pi` and `e`.
///
/// ## Usage
///
/// `Executor` is created once, configured, and reused. Executing the same
/// text again skips lexing and conversion and evaluates the cached postfix
/// sequence against the current variables.
///
/// # Example
/// ```
/// use rpncalc::Executor;
///
/// let mut executor = Executor::new();
/// executor.set_var("r", 2.0);
///
/// let area = executor.execute("pi * r ^ 2").unwrap();
/// assert!((area - std::f64::consts::PI * 4.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Executor {
    registry:  Registry,
    variables: HashMap<String, f64>,
    cache:     PostfixCache,
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor {
    /// Creates an executor with the default registry, the constants `pi` and
    /// `e`, an unbounded cache, and division by zero raising an error.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ExecutorConfig::default())
    }

    /// Creates an executor from explicit settings.
    #[must_use]
    pub fn with_config(config: ExecutorConfig) -> Self {
        let mut registry = Registry::new();
        registry.set_division_policy(config.division_by_zero);

        let variables = HashMap::from([("pi".to_string(), consts::PI), ("e".to_string(), consts::E)]);

        Self { registry,
               variables,
               cache: PostfixCache::new(config.cache_capacity) }
    }

    /// Evaluates `expression` against the current variables.
    ///
    /// The postfix sequence is taken from the cache when this exact text was
    /// executed before, and built and cached otherwise. Text that fails to
    /// compile is not cached.
    ///
    /// # Errors
    /// Any error of [`tokenize`], [`to_postfix`] or [`evaluate`].
    pub fn execute(&mut self, expression: &str) -> ExprResult<f64> {
        let postfix = match self.cache.get(expression) {
            Some(postfix) => {
                debug!(expression, "postfix cache hit");
                postfix
            },
            None => {
                debug!(expression, "postfix cache miss");
                let postfix: Arc<[Token]> = self.compile(expression)?.into();
                self.cache.insert(expression, Arc::clone(&postfix));
                postfix
            },
        };

        evaluate(&postfix, &self.variables, &self.registry)
    }

    /// Builds the postfix sequence for `expression` without touching the
    /// cache.
    ///
    /// # Errors
    /// Any error of [`tokenize`] or [`to_postfix`].
    pub fn compile(&self, expression: &str) -> ExprResult<Vec<Token>> {
        let infix = tokenize(expression, &self.registry)?;
        to_postfix(infix, &self.registry)
    }

    /// Evaluates an already compiled postfix sequence against the current
    /// variables.
    ///
    /// # Errors
    /// Any error of [`evaluate`].
    pub fn evaluate(&self, postfix: &[Token]) -> ExprResult<f64> {
        evaluate(postfix, &self.variables, &self.registry)
    }

    /// Binds `name` to `value`, replacing any previous binding.
    pub fn set_var(&mut self, name: impl Into<String>, value: f64) {
        self.variables.insert(name.into(), value);
    }

    /// Returns the value bound to `name`.
    #[must_use]
    pub fn get_var(&self, name: &str) -> Option<f64> {
        self.variables.get(name).copied()
    }

    /// Binds every pair in `vars`.
    pub fn set_vars<K: Into<String>>(&mut self, vars: impl IntoIterator<Item = (K, f64)>) {
        self.variables
            .extend(vars.into_iter().map(|(name, value)| (name.into(), value)));
    }

    /// Removes the binding of `name`, returning its value.
    pub fn remove_var(&mut self, name: &str) -> Option<f64> {
        self.variables.remove(name)
    }

    /// Removes the bindings of every name in `names`.
    pub fn remove_vars<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        for name in names {
            self.variables.remove(name);
        }
    }

    /// The current variable bindings.
    #[must_use]
    pub const fn variables(&self) -> &HashMap<String, f64> {
        &self.variables
    }

    /// Registers an operator and drops every cached sequence, since a new
    /// symbol or precedence changes how text converts.
    pub fn add_operator(&mut self, def: OperatorDefinition) {
        self.registry.register_operator(def);
        self.clear_cache();
    }

    /// Registers a function and drops every cached sequence, since a new
    /// arity changes which calls are valid.
    pub fn add_function(&mut self, def: FunctionDefinition) {
        self.registry.register_function(def);
        self.clear_cache();
    }

    /// Chooses between failing on division by zero (`true`) and returning an
    /// infinite sentinel (`false`).
    pub fn set_division_by_zero_error(&mut self, raise: bool) {
        let policy = if raise {
            DivisionPolicy::Raise
        } else {
            DivisionPolicy::Infinity
        };
        self.registry.set_division_policy(policy);
    }

    /// The registry used for compilation and evaluation.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns `true` if `expression` has a cached postfix sequence.
    #[must_use]
    pub fn is_cached(&self, expression: &str) -> bool {
        self.cache.contains(expression)
    }

    /// Returns the cached postfix sequence for `expression`.
    #[must_use]
    pub fn cached(&self, expression: &str) -> Option<Arc<[Token]>> {
        self.cache.get(expression)
    }

    /// Number of cached postfix sequences.
    #[must_use]
    pub fn cached_expressions(&self) -> usize {
        self.cache.len()
    }

    /// Drops every cached postfix sequence.
    pub fn clear_cache(&mut self) {
        debug!(entries = self.cache.len(), "clearing postfix cache");
        self.cache.clear();
    }
}
