use pretty_assertions::assert_eq;

use dynamok::{args, check_calls, CallsInfo, Mock};

#[test]
fn check_calls_is_empty_when_everything_was_consumed() {
    let reader = Mock::new("Reader");
    reader
        .register("Read", |_: Vec<u8>| (0_usize,))
        .register("Read", |_: Vec<u8>| (1_usize,));

    reader.call("Read", args![Vec::<u8>::new()]).unwrap();
    let infos = reader.check_calls();
    assert_eq!(
        vec![CallsInfo {
            mock_name: "Reader".to_string(),
            method_name: "Read".to_string(),
            expected_calls: 2,
            actual_calls: 1,
        }],
        infos
    );

    // Consuming the remaining behavior clears the report.
    reader.call("Read", args![Vec::<u8>::new()]).unwrap();
    assert_eq!(Vec::<CallsInfo>::new(), reader.check_calls());
}

#[test]
fn check_calls_reports_every_underconsumed_method() {
    let store = Mock::new("Store");
    store
        .register("Get", |_: String| (0_usize,))
        .register_n("Put", 2, |_: String, _: String| ());

    store
        .call("Put", args!["k".to_string(), "v".to_string()])
        .unwrap();

    let mut infos = store.check_calls();
    infos.sort_by(|a, b| a.method_name.cmp(&b.method_name));
    assert_eq!(
        vec![
            CallsInfo {
                mock_name: "Store".to_string(),
                method_name: "Get".to_string(),
                expected_calls: 1,
                actual_calls: 0,
            },
            CallsInfo {
                mock_name: "Store".to_string(),
                method_name: "Put".to_string(),
                expected_calls: 2,
                actual_calls: 1,
            },
        ],
        infos
    );
}

#[test]
fn batch_verification_keys_reports_by_mock_position() {
    let reader = Mock::new("Reader");
    reader.register("Read", |_: Vec<u8>| (0_usize,));
    reader.call("Read", args![Vec::<u8>::new()]).unwrap();

    let writer = Mock::new("Writer");
    writer.register("Write", |_: Vec<u8>| (0_usize,));

    let infos = check_calls(&[&reader, &writer]);
    assert_eq!(1, infos.len());
    assert_eq!(
        Some(&vec![CallsInfo {
            mock_name: "Writer".to_string(),
            method_name: "Write".to_string(),
            expected_calls: 1,
            actual_calls: 0,
        }]),
        infos.get(&1)
    );
}

#[test]
fn batch_verification_is_empty_on_total_success() {
    let reader = Mock::new("Reader");
    reader.register("Read", |_: Vec<u8>| (0_usize,));
    reader.call("Read", args![Vec::<u8>::new()]).unwrap();

    // A mock with no registrations at all verifies clean as well.
    let idle = Mock::new("Idle");

    assert!(check_calls(&[&reader, &idle]).is_empty());
}
