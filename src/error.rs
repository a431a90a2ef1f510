use core::fmt;

/// A dispatch failure returned from [`Mock::call`](crate::Mock::call).
///
/// The two variants are mutually exclusive for a given (mock, method) pair:
/// a method name either never had behaviors registered, or had them all
/// consumed. The structured accessors are the stable contract; the
/// `Display` rendering exists for human debugging only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallError {
    /// No behavior was ever registered under this method name.
    UnknownMethod { mock: String, method: String },
    /// Behaviors were registered under this method name, but every one of
    /// them has already been consumed.
    UnexpectedCall { mock: String, method: String },
}

impl CallError {
    pub(crate) fn unknown_method(mock: &str, method: &str) -> Self {
        Self::UnknownMethod {
            mock: mock.to_owned(),
            method: method.to_owned(),
        }
    }

    pub(crate) fn unexpected_call(mock: &str, method: &str) -> Self {
        Self::UnexpectedCall {
            mock: mock.to_owned(),
            method: method.to_owned(),
        }
    }

    /// Name of the mock the failed call was dispatched on.
    pub fn mock_name(&self) -> &str {
        match self {
            Self::UnknownMethod { mock, .. } | Self::UnexpectedCall { mock, .. } => mock,
        }
    }

    /// Method name the failed call was dispatched under.
    pub fn method_name(&self) -> &str {
        match self {
            Self::UnknownMethod { method, .. } | Self::UnexpectedCall { method, .. } => method,
        }
    }
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownMethod { mock, method } => {
                write!(f, "\"{method}\" call is unknown for \"{mock}\"")
            }
            Self::UnexpectedCall { mock, method } => {
                write!(f, "\"{method}\" call is unexpected for \"{mock}\"")
            }
        }
    }
}

impl std::error::Error for CallError {}
