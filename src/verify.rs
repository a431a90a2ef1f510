use core::fmt;
use std::collections::HashMap;

use crate::Mock;

/// Snapshot of a registered-versus-consumed count mismatch for one method,
/// produced by [`Mock::check_calls`] only when the two counts differ.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallsInfo {
    pub mock_name: String,
    pub method_name: String,
    /// Number of behaviors registered under the method name.
    pub expected_calls: usize,
    /// Number of behaviors actually consumed by calls.
    pub actual_calls: usize,
}

impl fmt::Display for CallsInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{}() calls count: expected {}, actual {}",
            self.mock_name, self.method_name, self.expected_calls, self.actual_calls
        )
    }
}

/// Runs [`Mock::check_calls`] on every mock and keys the non-empty reports
/// by the mock's position in `mocks`. An empty map signals that every
/// registered behavior on every mock was consumed.
pub fn check_calls(mocks: &[&Mock]) -> HashMap<usize, Vec<CallsInfo>> {
    let mut infos = HashMap::new();
    for (index, mock) in mocks.iter().enumerate() {
        let info = mock.check_calls();
        if !info.is_empty() {
            infos.insert(index, info);
        }
    }
    infos
}
