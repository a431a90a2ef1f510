//!
//! `dynamok` is a dynamic test-double engine: a [Mock] maps method names to
//! ordered queues of behavior closures, dispatches calls to them in FIFO
//! registration order, and verifies at the end of a test that every
//! registered behavior was actually consumed.
//!
//! ```rust
//! use dynamok::{args, Mock};
//!
//! let reader = Mock::new("Reader");
//! reader
//!     .register("Read", |buf: Vec<u8>| (buf.len(), Option::<String>::None))
//!     .register("Read", |_: Vec<u8>| (0_usize, Some("boom".to_string())));
//!
//! let mut results = reader.call("Read", args![vec![1_u8, 2, 3]]).unwrap();
//! assert_eq!(3, results.remove(0).cast::<usize>());
//! assert_eq!(None, results.remove(0).cast::<Option<String>>());
//!
//! let mut results = reader.call("Read", args![Vec::<u8>::new()]).unwrap();
//! assert_eq!(0, results.remove(0).cast::<usize>());
//!
//! // Both registered behaviors were consumed.
//! assert!(reader.check_calls().is_empty());
//!
//! // A third call is a dispatch error, not a behavior result.
//! assert!(reader.call("Read", args![Vec::<u8>::new()]).is_err());
//! ```
//!
//! Behaviors are plain closures taking `Any + Send` parameters and
//! returning a tuple of outputs; arguments and results cross the dispatch
//! boundary as opaque [Value]s. There is no compile-time checking of a
//! behavior against the mocked interface and no code generation: typed
//! per-interface adapters that forward to [Mock::call] are expected to be
//! written by hand next to the test that needs them.
//!
//! Two wrinkles of the erased boundary have explicit support:
//!
//! - An absence for an interface-typed parameter cannot cross the boundary
//!   untyped. Behaviors declare such parameters as `Option<T>` and callers
//!   construct the typed absence with [Value::none].
//! - A wrapper with its own variadic parameters forwards them as a single
//!   sequence value ([Value::seq]); a variadic behavior (see
//!   [Behavior::variadic]) receives the elements spread into its [Rest]
//!   tail, not re-boxed as one argument.

#![forbid(unsafe_code)]

mod behavior;
mod error;
mod method;
mod value;
mod verify;

pub use behavior::{Behavior, IntoBehavior, IntoResults, IntoVariadicBehavior, Invokable, Rest};
pub use error::CallError;
pub use value::Value;
pub use verify::{check_calls, CallsInfo};

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use method::Method;

/// A named test-double instance: the dispatch engine mapping method names
/// to ordered behavior queues.
///
/// All operations take `&self`; a `Mock` is reentrant and may be driven
/// from multiple threads at once. It owns no threads and never blocks
/// except on short internal locks, which are never held across a
/// behavior's execution.
pub struct Mock {
    name: String,
    methods: Mutex<HashMap<String, Arc<Method>>>,
}

impl Mock {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Mutex::new(HashMap::new()),
        }
    }

    /// The mock's name, as it appears in dispatch errors and
    /// [CallsInfo] reports.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers `behavior` as the next expected call of `method_name`.
    ///
    /// Registration is chainable:
    ///
    /// ```rust
    /// use dynamok::Mock;
    ///
    /// let mock = Mock::new("Handler");
    /// mock.register("Handle", || (1_i32,))
    ///     .register("Handle", || (2_i32,));
    /// ```
    pub fn register<Marker>(
        &self,
        method_name: impl Into<String>,
        behavior: impl IntoBehavior<Marker>,
    ) -> &Self {
        let behavior = behavior.into_behavior();
        let method = {
            let mut methods = self.methods.lock();
            methods
                .entry(method_name.into())
                .or_insert_with(|| Arc::new(Method::new()))
                .clone()
        };
        method.add_call(behavior);
        self
    }

    /// Registers the same `behavior` as the next `n` expected calls of
    /// `method_name`.
    pub fn register_n<Marker>(
        &self,
        method_name: impl Into<String>,
        n: usize,
        behavior: impl IntoBehavior<Marker>,
    ) -> &Self {
        let method_name = method_name.into();
        let behavior = behavior.into_behavior();
        for _ in 0..n {
            self.register(method_name.clone(), behavior.clone());
        }
        self
    }

    /// Drops every registration for `method_name`. A subsequent call of
    /// that name fails as unknown, never as unexpected, regardless of what
    /// was registered or consumed before.
    pub fn unregister(&self, method_name: &str) -> &Self {
        self.methods.lock().remove(method_name);
        self
    }

    /// Dispatches a call of `method_name` to the next unconsumed behavior
    /// registered under it, returning that behavior's outputs verbatim.
    ///
    /// Fails with [CallError::UnknownMethod] when nothing was ever
    /// registered under the name, and with [CallError::UnexpectedCall] when
    /// every registered behavior is already consumed.
    pub fn call(&self, method_name: &str, args: Vec<Value>) -> Result<Vec<Value>, CallError> {
        let method = self.methods.lock().get(method_name).cloned();
        let Some(method) = method else {
            return Err(CallError::unknown_method(&self.name, method_name));
        };
        method
            .call(args)
            .map_err(|method::Exhausted| CallError::unexpected_call(&self.name, method_name))
    }

    /// Reports every method name whose registered and consumed counts
    /// differ, in no particular order. An empty report is the success
    /// signal.
    pub fn check_calls(&self) -> Vec<CallsInfo> {
        let methods = self.methods.lock();
        let mut infos = Vec::new();
        for (method_name, method) in methods.iter() {
            if let Some(info) = method.check_calls(&self.name, method_name) {
                infos.push(info);
            }
        }
        infos
    }
}
