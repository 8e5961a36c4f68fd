//! Middleware declared first always runs first.

use std::sync::Arc;

use checkpoint::{Checker, Handler, Middleware, Mux};
use parking_lot::Mutex;
use proptest::prelude::*;

/// Middleware that logs `id` on the way in and `-id` on the way out.
fn tracing_middleware(id: i32, log: &Arc<Mutex<Vec<i32>>>) -> Middleware {
    let log = Arc::clone(log);
    Middleware::new(move |next: Handler| {
        let log = Arc::clone(&log);
        Handler::new(move |w, r| {
            log.lock().push(id);
            next.call(w, r);
            log.lock().push(-id);
        })
    })
}

fn run_chain(count: usize) -> Vec<i32> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let ids: Vec<i32> = (1..=count).map(|i| i32::try_from(i).unwrap()).collect();

    let terminal = {
        let log = Arc::clone(&log);
        Handler::new(move |w, _| {
            log.lock().push(0);
            w.write(b"done");
        })
    };

    let mut checker = Checker::new(Mux::new());
    checker
        .path("/chain")
        .middlewares(ids.iter().map(|&id| tracing_middleware(id, &log)))
        .handler(terminal);

    let result = checker.run().unwrap();
    assert_eq!(result.text(), "done");

    let entries = log.lock().clone();
    entries
}

#[test]
fn test_three_middlewares_form_an_onion() {
    assert_eq!(run_chain(3), vec![1, 2, 3, 0, -3, -2, -1]);
}

#[test]
fn test_no_middlewares_calls_handler_only() {
    assert_eq!(run_chain(0), vec![0]);
}

proptest! {
    #[test]
    fn prop_entry_order_matches_declaration(count in 0usize..12) {
        let log = run_chain(count);
        let ids: Vec<i32> = (1..=count).map(|i| i32::try_from(i).unwrap()).collect();

        let entered: Vec<i32> = log.iter().copied().take_while(|&id| id != 0).collect();
        prop_assert_eq!(&entered, &ids);

        let exited: Vec<i32> = log
            .iter()
            .copied()
            .skip_while(|&id| id != 0)
            .skip(1)
            .map(|id| -id)
            .collect();
        let mut reversed = ids;
        reversed.reverse();
        prop_assert_eq!(exited, reversed);
    }
}
