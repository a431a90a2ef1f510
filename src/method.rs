use parking_lot::Mutex;

use crate::behavior::Behavior;
use crate::value::Value;
use crate::verify::CallsInfo;

/// Every registered behavior for the method name is already consumed.
///
/// Crate-private: the dispatch layer translates this into
/// [`CallError::UnexpectedCall`](crate::CallError::UnexpectedCall), and
/// because it is the only error kind a registry can produce, that
/// translation is total.
pub(crate) struct Exhausted;

/// The ordered queue of behaviors registered under one method name, plus
/// the count of calls already dispatched against it.
///
/// Invariant: `calls_made <= behaviors.len()` at all times. Behaviors are
/// append-only; the whole registry is dropped when the method name is
/// unregistered.
pub(crate) struct Method {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    behaviors: Vec<Behavior>,
    calls_made: usize,
}

impl Method {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }

    pub fn add_call(&self, behavior: Behavior) {
        self.state.lock().behaviors.push(behavior);
    }

    /// Selects and consumes the next behavior slot, then invokes the
    /// behavior with `args`.
    ///
    /// The lock covers only the select-and-advance step. Invocation happens
    /// after it is released, so concurrent calls on different slots run
    /// their behaviors in parallel while slot assignment stays serialized.
    /// A consumed slot is never handed back, even when the behavior panics.
    pub fn call(&self, args: Vec<Value>) -> Result<Vec<Value>, Exhausted> {
        let behavior = {
            let mut state = self.state.lock();
            if state.calls_made >= state.behaviors.len() {
                return Err(Exhausted);
            }
            let behavior = state.behaviors[state.calls_made].clone();
            state.calls_made += 1;
            behavior
        };
        Ok(behavior.invoke(args))
    }

    /// `None` when every registered behavior has been consumed, otherwise a
    /// snapshot of the mismatch.
    pub fn check_calls(&self, mock_name: &str, method_name: &str) -> Option<CallsInfo> {
        let state = self.state.lock();
        if state.behaviors.len() == state.calls_made {
            None
        } else {
            Some(CallsInfo {
                mock_name: mock_name.to_owned(),
                method_name: method_name.to_owned(),
                expected_calls: state.behaviors.len(),
                actual_calls: state.calls_made,
            })
        }
    }
}
