//! The engine's intended consumption pattern: hand-written per-interface
//! adapters exposing typed methods that forward to the generic dispatch
//! surface.

use std::sync::Mutex;

use dynamok::{args, check_calls, Behavior, CallsInfo, Mock, Rest, Value};

type ReadOutcome = (usize, Option<String>);

struct ReaderMock {
    mock: Mock,
}

impl ReaderMock {
    fn new() -> Self {
        Self {
            mock: Mock::new("Reader"),
        }
    }

    fn register_read<F>(&self, behavior: F) -> &Self
    where
        F: Fn(Vec<u8>) -> ReadOutcome + Send + Sync + 'static,
    {
        self.mock.register("Read", behavior);
        self
    }

    fn read(&self, buf: Vec<u8>) -> Result<usize, String> {
        let mut results = self.mock.call("Read", args![buf]).map_err(|e| e.to_string())?;
        let n = results.remove(0).cast::<usize>();
        match results.remove(0).cast::<Option<String>>() {
            Some(err) => Err(err),
            None => Ok(n),
        }
    }
}

struct LoggerMock {
    mock: Mock,
}

impl LoggerMock {
    fn new() -> Self {
        Self {
            mock: Mock::new("Logger"),
        }
    }

    fn register_log(&self, behavior: Behavior) -> &Self {
        self.mock.register("Log", behavior);
        self
    }

    // A variadic typed method forwards its arguments as one sequence value.
    fn log(&self, level: &str, fields: &[i64]) {
        self.mock
            .call("Log", args![level.to_string(), Value::seq(fields.to_vec())])
            .unwrap();
    }
}

#[test]
fn adapter_surfaces_behavior_results_and_dispatch_errors_alike() {
    let reader = ReaderMock::new();
    reader
        .register_read(|buf| {
            if buf != [1, 2, 3] {
                return (0, Some("unexpected param".to_string()));
            }
            (1, None)
        })
        .register_read(|_| (2, None));

    assert_eq!(Ok(1), reader.read(vec![1, 2, 3]));
    assert_eq!(Ok(2), reader.read(vec![4, 5]));

    // The third call fails inside the engine; the adapter reports it the
    // same way a real implementation would report a failure.
    assert_eq!(
        Err("\"Read\" call is unexpected for \"Reader\"".to_string()),
        reader.read(vec![])
    );
}

#[test]
fn variadic_adapter_forwards_without_reboxing() {
    let seen = std::sync::Arc::new(Mutex::new(Vec::new()));
    let logger = LoggerMock::new();
    {
        let seen = seen.clone();
        logger.register_log(Behavior::variadic(move |level: String, fields: Rest| {
            assert_eq!("info", level);
            seen.lock()
                .unwrap()
                .extend(fields.into_iter().map(|v| v.cast::<i64>()));
        }));
    }

    logger.log("info", &[3, 1, 4]);
    assert_eq!(vec![3, 1, 4], *seen.lock().unwrap());
}

#[test]
fn teardown_verification_across_adapters() {
    let reader = ReaderMock::new();
    reader.register_read(|_| (0, None)).register_read(|_| (1, None));
    reader.read(vec![]).unwrap();

    let logger = LoggerMock::new();
    logger.register_log(Behavior::variadic(|_: String, _: Rest| {}));

    let infos = check_calls(&[&reader.mock, &logger.mock]);
    assert_eq!(2, infos.len());
    assert_eq!(
        Some(&vec![CallsInfo {
            mock_name: "Reader".to_string(),
            method_name: "Read".to_string(),
            expected_calls: 2,
            actual_calls: 1,
        }]),
        infos.get(&0)
    );
    assert_eq!(
        Some(&vec![CallsInfo {
            mock_name: "Logger".to_string(),
            method_name: "Log".to_string(),
            expected_calls: 1,
            actual_calls: 0,
        }]),
        infos.get(&1)
    );
}
