//! Wrappable method seams.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Error returned by a wrapped method.
///
/// Carries the error kind and message separately so operational error
/// events can record both fields.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{kind}: {message}")]
pub struct MethodError {
    kind: String,
    message: String,
}

impl MethodError {
    /// Creates an error with an explicit kind and message.
    #[must_use]
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Creates the error returned when a method name is not wrapped.
    #[must_use]
    pub fn unknown_method(name: &str) -> Self {
        Self::new("UnknownMethod", format!("no wrapped method named `{name}`"))
    }

    /// Creates an error from any error value, using its short type name as
    /// the kind.
    #[must_use]
    pub fn from_error<E: std::error::Error>(error: &E) -> Self {
        let name = std::any::type_name::<E>();
        let kind = name.rsplit("::").next().unwrap_or(name);
        Self::new(kind, error.to_string())
    }

    /// Returns the error kind.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// One invocable agent method.
///
/// Implemented automatically by async closures taking a JSON value and
/// returning a JSON result.
#[async_trait]
pub trait AgentMethod: Send + Sync {
    /// Invokes the method with a JSON input.
    ///
    /// # Errors
    ///
    /// Returns [`MethodError`] when the method fails.
    async fn invoke(&self, input: Value) -> Result<Value, MethodError>;
}

#[async_trait]
impl<F, Fut> AgentMethod for F
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, MethodError>> + Send,
{
    async fn invoke(&self, input: Value) -> Result<Value, MethodError> {
        (self)(input).await
    }
}

// Lets shared handlers be rebound, e.g. when rewrapping an already
// instrumented agent.
#[async_trait]
impl AgentMethod for Arc<dyn AgentMethod> {
    async fn invoke(&self, input: Value) -> Result<Value, MethodError> {
        self.as_ref().invoke(input).await
    }
}

struct BlockingMethod<F>(F);

#[async_trait]
impl<F> AgentMethod for BlockingMethod<F>
where
    F: Fn(Value) -> Result<Value, MethodError> + Send + Sync,
{
    async fn invoke(&self, input: Value) -> Result<Value, MethodError> {
        (self.0)(input)
    }
}

/// A named method exposed for instrumentation.
#[derive(Clone)]
pub struct MethodBinding {
    name: String,
    handler: Arc<dyn AgentMethod>,
}

impl MethodBinding {
    /// Binds a name to an async handler.
    #[must_use]
    pub fn new(name: impl Into<String>, handler: impl AgentMethod + 'static) -> Self {
        Self {
            name: name.into(),
            handler: Arc::new(handler),
        }
    }

    /// Binds a name to a synchronous handler.
    #[must_use]
    pub fn blocking<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Value) -> Result<Value, MethodError> + Send + Sync + 'static,
    {
        Self::new(name, BlockingMethod(handler))
    }

    /// Returns the method name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the handler.
    #[must_use]
    pub fn handler(&self) -> Arc<dyn AgentMethod> {
        self.handler.clone()
    }
}

impl std::fmt::Debug for MethodBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodBinding")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Target that exposes methods for wrapping.
pub trait Instrumentable: Send + Sync {
    /// Lists the methods this target exposes.
    fn agent_methods(&self) -> Vec<MethodBinding>;

    /// Reports whether this target already carries instrumentation.
    ///
    /// Wrapping an already-instrumented target must not stack a second
    /// layer of events onto each call.
    fn already_instrumented(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn closures_are_methods() {
        let binding = MethodBinding::new("echo", |input: Value| async move { Ok(input) });
        let result = binding.handler().invoke(json!("hi")).await.unwrap();
        assert_eq!(result, json!("hi"));
    }

    #[tokio::test]
    async fn blocking_handlers_run_inline() {
        let binding = MethodBinding::blocking("double", |input: Value| {
            let n = input.as_i64().ok_or_else(|| {
                MethodError::new("BadInput", "expected an integer")
            })?;
            Ok(json!(n * 2))
        });
        assert_eq!(binding.handler().invoke(json!(21)).await.unwrap(), json!(42));
        let err = binding.handler().invoke(json!("x")).await.unwrap_err();
        assert_eq!(err.kind(), "BadInput");
    }

    #[tokio::test]
    async fn shared_handlers_rebind() {
        let binding = MethodBinding::new("echo", |input: Value| async move { Ok(input) });
        let rebound = MethodBinding::new("echo_again", binding.handler());
        let result = rebound.handler().invoke(json!("hi")).await.unwrap();
        assert_eq!(result, json!("hi"));
    }

    #[test]
    fn from_error_uses_the_short_type_name() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "deadline exceeded");
        let err = MethodError::from_error(&io);
        assert_eq!(err.kind(), "Error");
        assert_eq!(err.message(), "deadline exceeded");
    }

    #[test]
    fn display_joins_kind_and_message() {
        let err = MethodError::unknown_method("plan");
        assert_eq!(err.to_string(), "UnknownMethod: no wrapped method named `plan`");
    }
}
