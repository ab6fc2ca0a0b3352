//! End-to-end scenarios registering cases with a recording host.
//!
//! Each test defines a batch the way a test suite would, then executes the
//! recorded cases to check titles, argument dispatch and completion.

use std::sync::{Arc, Mutex};

use each_case::{Call, Mode, Slot, TestBody, Title, with_parameters};
use each_case_testing::{RecordingHost, recording_host};
use rstest::rstest;
use serde::Deserialize;
use serde_json::{Value, json};

fn add(a: &Value, b: &Value) -> Option<i64> { Some(a.as_i64()? + b.as_i64()?) }

#[rstest]
fn adds_numbers_with_formatted_titles(recording_host: Arc<RecordingHost>) {
    with_parameters(vec![json!([1, 1, 2]), json!([2, -2, 0]), json!([140, 48, 188])])
        .host(recording_host.clone())
        .it(
            "adds %d and %d then returns %d",
            TestBody::declared(3, |call| {
                let (left, right, expected): (i64, i64, i64) =
                    call.args().parse().expect("three integers");
                assert_eq!(left + right, expected);
            }),
        )
        .expect("cases registered");

    assert_eq!(recording_host.titles(), [
        "adds 1 and 1 then returns 2",
        "adds 2 and -2 then returns 0",
        "adds 140 and 48 then returns 188",
    ]);
    assert!(recording_host.registrations().iter().all(|r| r.body().arity() == 0));
    assert!(recording_host.run_all().iter().all(Result::is_ok));
}

#[rstest]
fn invalid_operands_render_as_json(recording_host: Arc<RecordingHost>) {
    with_parameters(vec![json!([1, "foo"]), json!([null, 10]), json!([{}, []])])
        .host(recording_host.clone())
        .it(
            "adds %j and %j then returns NaN",
            TestBody::declared(2, |call| {
                let values = call.args().values();
                assert_eq!(add(&values[0], &values[1]), None);
            }),
        )
        .expect("cases registered");

    assert_eq!(recording_host.titles(), [
        "adds 1 and \"foo\" then returns NaN",
        "adds null and 10 then returns NaN",
        "adds {} and [] then returns NaN",
    ]);
    assert!(recording_host.run_all().iter().all(Result::is_ok));
}

#[derive(Deserialize)]
struct Cry {
    cry: String,
}

fn let_cry(animal: &str) -> &'static str {
    match animal {
        "dog" => "bowow",
        "cat" => "meow",
        "cow" => "mow",
        _ => "...",
    }
}

#[rstest]
fn function_titles_use_their_return_value(recording_host: Arc<RecordingHost>) {
    let title = Title::function(|args, _| {
        let (animal, data): (String, Cry) = args.parse().expect("animal and cry");
        format!("A {animal} should cry '{}'", data.cry)
    });
    with_parameters(vec![
        json!(["dog", {"cry": "bowow"}]),
        json!(["cat", {"cry": "meow"}]),
        json!(["cow", {"cry": "mow"}]),
        json!(["nothing", {"cry": "..."}]),
    ])
    .host(recording_host.clone())
    .it(
        title,
        TestBody::sync(|call| {
            let (animal, data): (String, Cry) = call.args().parse().expect("animal and cry");
            assert_eq!(data.cry, let_cry(&animal));
        }),
    )
    .expect("cases registered");

    assert_eq!(recording_host.titles(), [
        "A dog should cry 'bowow'",
        "A cat should cry 'meow'",
        "A cow should cry 'mow'",
        "A nothing should cry '...'",
    ]);
    assert!(recording_host.run_all().iter().all(Result::is_ok));
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[rstest]
fn bare_values_become_single_arguments(recording_host: Arc<RecordingHost>) {
    with_parameters(vec![json!("string"), json!(100), json!(true), json!({})])
        .host(recording_host.clone())
        .it(
            "handles %j",
            TestBody::declared(1, |call| {
                assert_eq!(call.args().len(), 1);
                assert!(truthy(&call.args().values()[0]));
            }),
        )
        .expect("cases registered");

    assert_eq!(recording_host.titles(), [
        "handles \"string\"",
        "handles 100",
        "handles true",
        "handles {}",
    ]);
    assert!(recording_host.run_all().iter().all(Result::is_ok));
}

#[rstest]
fn delayed_greetings_complete_through_done(recording_host: Arc<RecordingHost>) {
    let greeted = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&greeted);
    with_parameters(vec![json!("Alis"), json!("Bob"), json!("Caroline")])
        .host(recording_host.clone())
        .it(
            "greets will be delayed",
            TestBody::declared(2, move |mut call: Call<'_>| {
                let name: String = call.args().get(0).expect("a name");
                let done = call.take_done().expect("async cases receive a handle");
                let sink = Arc::clone(&sink);
                std::thread::spawn(move || {
                    std::thread::sleep(std::time::Duration::from_millis(30));
                    sink.lock().expect("greeted lock").push(format!("Hi, {name}!"));
                    done.complete();
                });
            }),
        )
        .expect("cases registered");

    let registrations = recording_host.registrations();
    assert_eq!(registrations.len(), 3);
    assert!(registrations.iter().all(|r| r.body().arity() == 1));
    assert_eq!(recording_host.titles(), [
        "greets will be delayed (case 1)",
        "greets will be delayed (case 2)",
        "greets will be delayed (case 3)",
    ]);
    assert!(recording_host.run_all().iter().all(Result::is_ok));
    assert_eq!(*greeted.lock().expect("greeted lock"), [
        "Hi, Alis!",
        "Hi, Bob!",
        "Hi, Caroline!"
    ]);
}

#[rstest]
fn empty_parameters_register_nothing(recording_host: Arc<RecordingHost>) {
    with_parameters(Vec::<Value>::new())
        .host(recording_host.clone())
        .it("never", TestBody::sync(|_| panic!("no case should run")))
        .expect("empty batches are fine");
    assert!(recording_host.registrations().is_empty());
}

#[rstest]
fn short_tuple_gets_done_then_padding(recording_host: Arc<RecordingHost>) {
    let layouts = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&layouts);
    with_parameters(vec![json!(["a"]), json!(["b", "c"])])
        .host(recording_host.clone())
        .it(
            "layout %s",
            TestBody::declared(3, move |mut call: Call<'_>| {
                let rendered: Vec<String> = call
                    .slots()
                    .iter()
                    .map(|slot| match slot {
                        Slot::Value(value) => value.to_string(),
                        Slot::Done => "done".to_owned(),
                        Slot::Undefined => "undefined".to_owned(),
                    })
                    .collect();
                sink.lock().expect("layouts lock").push(rendered);
                call.take_done().expect("handle").complete();
            }),
        )
        .expect("cases registered");

    assert!(recording_host.run_all().iter().all(Result::is_ok));
    assert_eq!(*layouts.lock().expect("layouts lock"), [
        vec!["\"a\"", "done", "undefined"],
        vec!["\"b\"", "\"c\"", "done"],
    ]);
}

#[rstest]
fn explicit_async_mode_always_supplies_a_handle(recording_host: Arc<RecordingHost>) {
    let body = TestBody::with_mode(Mode::Async, |mut call| {
        assert_eq!(call.done_position(), Some(3));
        call.take_done().expect("handle").fail("deliberate");
    });
    with_parameters(vec![json!([1, 2, 3])])
        .host(recording_host.clone())
        .it("fails %d", body)
        .expect("cases registered");

    let outcomes = recording_host.run_all();
    assert_eq!(outcomes.len(), 1);
    let failure = outcomes[0].clone().expect_err("body reported failure");
    assert_eq!(failure.message(), "deliberate");
}

#[rstest]
fn context_is_forwarded_to_the_body(recording_host: Arc<RecordingHost>) {
    struct Timeout(u64);

    with_parameters(vec![json!(1)])
        .host(recording_host.clone())
        .it(
            "ctx",
            TestBody::sync(|call| {
                assert_eq!(call.context().title(), "ctx (case 1)");
                assert_eq!(call.index().get(), 0);
                assert_eq!(call.context().data::<Timeout>().map(|t| t.0), Some(2000));
            }),
        )
        .expect("cases registered");

    let registration = &recording_host.registrations()[0];
    let context = each_case::CaseContext::new(registration.title()).with_data(Timeout(2000));
    assert_eq!(registration.run_with(&context), Ok(()));
}

#[rstest]
fn context_is_forwarded_to_async_bodies(recording_host: Arc<RecordingHost>) {
    struct Timeout(u64);

    with_parameters(vec![json!("Alis")])
        .host(recording_host.clone())
        .it(
            "greets %s later",
            TestBody::declared(2, |mut call: Call<'_>| {
                assert!(call.is_async());
                assert_eq!(call.context().title(), "greets Alis later");
                assert_eq!(call.context().data::<Timeout>().map(|t| t.0), Some(500));
                call.take_done().expect("async cases receive a handle").complete();
            }),
        )
        .expect("cases registered");

    let registration = &recording_host.registrations()[0];
    assert!(registration.body().is_async());
    let context = each_case::CaseContext::new(registration.title()).with_data(Timeout(500));
    assert_eq!(registration.run_with(&context), Ok(()));
}
