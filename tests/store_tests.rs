//! Integration tests for `ConfigStore`: atomic reloads and concurrent readers.

use std::sync::Arc;
use std::thread;
use termconf::{ConfigEngine, ConfigStore, Directive, Platform, ResolveError};

fn engine() -> Arc<ConfigEngine> {
    Arc::new(ConfigEngine::builder().platform(Platform::Linux).build())
}

fn delay_stream(delay: i64) -> Vec<Directive> {
    vec![
        Directive::set("repaint_delay", &delay.to_string()),
        Directive::set("input_delay", &delay.to_string()),
        Directive::bind_key("ctrl+a", &format!("action_{delay}")),
    ]
}

#[test]
fn initial_failure_is_reported() {
    let err = ConfigStore::new(engine(), [Directive::set("nope", "1")]).unwrap_err();
    assert!(matches!(err, ResolveError::UnknownOption { .. }));
}

#[test]
fn generations_count_successful_reloads() {
    let store = ConfigStore::new(engine(), delay_stream(1)).unwrap();
    store.reload(delay_stream(2)).unwrap();
    assert!(store.reload([Directive::append("repaint_delay", "3")]).is_err());
    store.reload(delay_stream(4)).unwrap();
    assert_eq!(store.generation(), 2);
    assert_eq!(
        store.current().option("repaint_delay").unwrap().as_int(),
        Some(4)
    );
}

#[test]
fn reload_rebuilds_from_scratch() {
    let store = ConfigStore::new(
        engine(),
        [Directive::bind_key("ctrl+b", "only_in_first")],
    )
    .unwrap();
    store.reload(delay_stream(5)).unwrap();
    let current = store.current();
    assert_eq!(current.key_bindings().len(), 1);
    assert_eq!(current.key_bindings()[0].action.spec(), "action_5");
}

#[test]
fn readers_never_see_a_mixed_snapshot() {
    let store = Arc::new(ConfigStore::new(engine(), delay_stream(0)).unwrap());

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..200 {
                    let snapshot = store.current();
                    let repaint = snapshot.option("repaint_delay").unwrap().as_int();
                    let input = snapshot.option("input_delay").unwrap().as_int();
                    assert_eq!(repaint, input);
                    let action = snapshot.key_bindings()[0].action.spec().to_string();
                    assert_eq!(action, format!("action_{}", repaint.unwrap()));
                }
            })
        })
        .collect();

    let writers: Vec<_> = (1..=2)
        .map(|w| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..25 {
                    store.reload(delay_stream(w * 100 + i)).unwrap();
                }
            })
        })
        .collect();

    for handle in readers.into_iter().chain(writers) {
        handle.join().unwrap();
    }
    assert_eq!(store.generation(), 50);
}

#[test]
fn concurrent_resolves_share_one_engine() {
    let engine = engine();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                engine
                    .resolve(delay_stream(i))
                    .unwrap()
                    .option("repaint_delay")
                    .unwrap()
                    .as_int()
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![Some(0), Some(1), Some(2), Some(3)]);
}
