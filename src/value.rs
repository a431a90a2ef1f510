use core::fmt;
use std::any::{self, Any};

/// An owned, type-erased value crossing the dynamic dispatch boundary,
/// either as a call argument or as a behavior result.
pub struct Value {
    inner: Box<dyn Any + Send>,
    type_name: &'static str,
}

impl Value {
    /// Adapts `value` for dynamic dispatch.
    ///
    /// A value that is already a [`Value`] passes through unchanged instead
    /// of being wrapped a second time, so adapters may forward engine-built
    /// values (e.g. [`Value::none`]) without special-casing them.
    pub fn new<T: Any + Send>(value: T) -> Self {
        let boxed: Box<dyn Any + Send> = Box::new(value);
        match boxed.downcast::<Value>() {
            Ok(adapted) => *adapted,
            Err(inner) => Self {
                inner,
                type_name: any::type_name::<T>(),
            },
        }
    }

    /// A typed absence: `Option::<T>::None` carrying the parameter type it
    /// stands in for.
    ///
    /// An untyped nothing cannot cross the `Any` boundary, so a behavior
    /// parameter that may be absent is declared `Option<T>` and an absent
    /// argument is constructed here.
    pub fn none<T: Any + Send>() -> Self {
        Self::new(Option::<T>::None)
    }

    /// Builds the canonical sequence value (`Vec<Value>`) out of `items`.
    ///
    /// Passed as the sole trailing argument to a variadic behavior, the
    /// sequence is spread into individual variadic arguments.
    pub fn seq<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Any + Send,
    {
        Self::new(items.into_iter().map(Self::new).collect::<Vec<Value>>())
    }

    /// The `type_name` of the adapted value, captured at construction.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Recovers the stored value, handing `self` back on type mismatch.
    pub fn downcast<T: Any>(self) -> Result<T, Value> {
        let type_name = self.type_name;
        match self.inner.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(inner) => Err(Self { inner, type_name }),
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Recovers the stored value.
    ///
    /// # Panics
    ///
    /// Panics when the stored value is not a `T`. A mismatch here means the
    /// test registered a behavior whose signature does not fit the call, or
    /// read a result as the wrong type: a broken test setup, not a runtime
    /// condition.
    #[track_caller]
    pub fn cast<T: Any>(self) -> T {
        match self.downcast::<T>() {
            Ok(value) => value,
            Err(value) => panic!(
                "cannot cast value of type `{}` to `{}`",
                value.type_name,
                any::type_name::<T>()
            ),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value({})", self.type_name)
    }
}

/// Builds a `Vec<Value>` argument list out of heterogeneous expressions.
///
/// Every element goes through [`Value::new`], so expressions that already
/// are [`Value`]s (typed absences, sequences) pass through unchanged.
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::new($arg)),+]
    };
}
