//! Tests for the `skip` and `only` filter adapters.

use std::sync::Arc;

use each_case::{EachError, TestBody, config::Config, each, with_parameters};
use each_case_testing::{Kind, RecordingHost, recording_host};
use rstest::rstest;
use serde_json::json;

fn three() -> Vec<serde_json::Value> { vec![json!(1), json!(2), json!(3)] }

#[rstest]
fn skip_registers_every_case_with_the_skip_variant(recording_host: Arc<RecordingHost>) {
    with_parameters(three())
        .host(recording_host.clone())
        .skip("value %d", TestBody::sync(|_| {}))
        .expect("skip variant available");

    assert_eq!(recording_host.skip_count(), 3);
    assert_eq!(recording_host.plain_count(), 0);
    let titles: Vec<_> = recording_host
        .of_kind(Kind::Skip)
        .iter()
        .map(|r| r.title().to_owned())
        .collect();
    assert_eq!(titles, ["value 1", "value 2", "value 3"]);
}

#[rstest]
fn skip_keeps_the_async_adaptation(recording_host: Arc<RecordingHost>) {
    with_parameters(three())
        .host(recording_host.clone())
        .skip("value %d", TestBody::declared(2, |_| {}))
        .expect("skip variant available");

    assert!(
        recording_host
            .of_kind(Kind::Skip)
            .iter()
            .all(|r| r.body().is_async())
    );
}

#[rstest]
fn only_defines_one_exclusive_suite(recording_host: Arc<RecordingHost>) {
    with_parameters(three())
        .host(recording_host.clone())
        .only("value %d", TestBody::sync(|_| {}))
        .expect("suite primitive available");

    assert_eq!(recording_host.suite_titles(), [""]);
    assert_eq!(recording_host.plain_count(), 3);
    assert_eq!(recording_host.skip_count(), 0);
}

#[test]
fn only_registers_cases_when_the_suite_is_built() {
    let host = RecordingHost::new().deferred_suites().shared();
    with_parameters(three())
        .host(host.clone())
        .config(Config::default().with_suite_title("focus"))
        .only("value %d", TestBody::sync(|_| {}))
        .expect("suite primitive available");

    assert_eq!(host.suite_titles(), ["focus"]);
    assert_eq!(host.plain_count(), 0);

    assert_eq!(host.run_pending_suites(), 1);
    assert_eq!(host.titles(), ["value 1", "value 2", "value 3"]);
}

#[test]
fn skip_without_a_skip_variant_fails_fast() {
    let host = RecordingHost::new().without_skip().shared();
    let err = with_parameters(three())
        .host(host.clone())
        .skip("value %d", TestBody::sync(|_| {}))
        .expect_err("skip variant missing");

    assert!(matches!(err, EachError::MissingCapability { capability: "skip" }));
    assert!(host.registrations().is_empty());
}

#[test]
fn only_without_a_suite_primitive_fails_fast() {
    let host = RecordingHost::new().without_suite().shared();
    let err = with_parameters(three())
        .host(host.clone())
        .only("value %d", TestBody::sync(|_| {}))
        .expect_err("suite primitive missing");

    assert!(matches!(err, EachError::MissingCapability { capability: "only" }));
    assert!(host.suite_titles().is_empty());
    assert!(host.registrations().is_empty());
}

#[rstest]
fn one_binding_defines_several_batches(recording_host: Arc<RecordingHost>) {
    let cases = each(three()).host(recording_host.clone());
    cases.it("first %d", TestBody::sync(|_| {})).expect("first batch");
    cases.skip("second %d", TestBody::sync(|_| {})).expect("second batch");

    assert_eq!(recording_host.plain_count(), 3);
    assert_eq!(recording_host.skip_count(), 3);
    assert_eq!(cases.parameters().len(), 3);
}
