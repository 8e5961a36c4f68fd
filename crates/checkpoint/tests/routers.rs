//! The same checks run against every supported engine.

use checkpoint::{
    build_request, path_param, CheckError, Checker, Handler, LinearParams, MatchitParams, Mux,
    Request, ResponseRecorder, Router, RouterAdapter, SharedRouter,
};
use http::{HeaderValue, StatusCode};

type ParamReader = fn(&Request, &str) -> Option<String>;

fn mux_param(r: &Request, name: &str) -> Option<String> {
    path_param(r, name).map(str::to_string)
}

fn matchit_param(r: &Request, name: &str) -> Option<String> {
    MatchitParams::from_request(r, name).map(str::to_string)
}

fn linear_param(r: &Request, name: &str) -> Option<String> {
    LinearParams::from_request(r, name).map(str::to_string)
}

/// Handler that copies the `id` parameter into a response header.
fn echo_id(read: ParamReader) -> Handler {
    Handler::new(move |w, r| {
        let id = read(r, "id").unwrap_or_default();
        w.headers_mut()
            .insert("x-param-id", HeaderValue::from_str(&id).unwrap());
        w.write_header(StatusCode::OK);
    })
}

fn check_path_param<R: Router>(router: R, read: ParamReader) {
    let mut checker = Checker::new(router);
    checker
        .path("/test/123")
        .pattern("/test/{id}")
        .method("GET")
        .handler(echo_id(read));

    let result = checker.run().unwrap();
    assert_eq!(result.status_code(), 200);
    assert_eq!(result.header("X-Param-Id"), Some("123"));
}

#[test]
fn test_path_param_mux() {
    check_path_param(Mux::new(), mux_param);
}

#[test]
fn test_path_param_matchit() {
    check_path_param(RouterAdapter::matchit(), matchit_param);
}

#[test]
fn test_path_param_linear() {
    check_path_param(RouterAdapter::linear(), linear_param);
}

#[test]
fn test_path_param_shared() {
    check_path_param(SharedRouter::new(Mux::new()), mux_param);
}

#[test]
fn test_path_param_borrowed_router() {
    let mut mux = Mux::new();
    check_path_param(&mut mux, mux_param);
    assert_eq!(mux.len(), 1, "registration stays with the borrowed router");
}

#[test]
fn test_unmatched_path_is_404_on_every_engine() {
    let engines: Vec<Box<dyn Router>> = vec![
        Box::new(Mux::new()),
        Box::new(RouterAdapter::matchit()),
        Box::new(RouterAdapter::linear()),
    ];

    for engine in engines {
        let mut checker = Checker::new(engine);
        checker
            .path("/other")
            .pattern("/test/{id}")
            .handler(Handler::new(|w, _| w.write_header(StatusCode::OK)));

        let result = checker.run().unwrap();
        assert_eq!(result.status(), StatusCode::NOT_FOUND);
        assert_eq!(result.text(), "404 page not found\n");
    }
}

#[test]
fn test_detached_adapter() {
    let mut adapter = RouterAdapter::matchit();
    let engine = adapter.take_engine();
    assert_eq!(engine.engine_name(), "matchit");
    assert_eq!(adapter.engine_name(), "detached");

    let mut checker = Checker::new(adapter);
    checker
        .path("/test")
        .handler(Handler::new(|w, _| w.write_header(StatusCode::OK)));

    let err = checker.run().unwrap_err();
    assert!(matches!(err, CheckError::Registration { .. }));
}

#[test]
fn test_detached_dispatch_reports_unsupported() {
    let adapter = RouterAdapter::Detached;
    let mut request = build_request("GET", "/test", "", Vec::<(&str, &str)>::new()).unwrap();
    let mut sink = ResponseRecorder::new();
    adapter.dispatch(&mut request, &mut sink);

    assert_eq!(sink.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(sink.body(), b"Unsupported router type\n");
}

fn write_body(body: &'static str) -> Handler {
    Handler::new(move |w, _| {
        w.write(body.as_bytes());
    })
}

#[test]
fn test_rerun_with_new_handler_per_engine() {
    // Mux replaces.
    let mut checker = Checker::new(Mux::new());
    checker.path("/same").handler(write_body("first"));
    assert_eq!(checker.run().unwrap().text(), "first");
    checker.handler(write_body("second"));
    assert_eq!(checker.run().unwrap().text(), "second");

    // matchit refuses the duplicate.
    let mut checker = Checker::new(RouterAdapter::matchit());
    checker.path("/same").handler(write_body("first"));
    assert_eq!(checker.run().unwrap().text(), "first");
    checker.handler(write_body("second"));
    assert!(matches!(checker.run(), Err(CheckError::Registration { .. })));

    // The linear engine keeps both and the first one matches.
    let mut checker = Checker::new(RouterAdapter::linear());
    checker.path("/same").handler(write_body("first"));
    assert_eq!(checker.run().unwrap().text(), "first");
    checker.handler(write_body("second"));
    assert_eq!(checker.run().unwrap().text(), "first");
}

#[test]
fn test_method_qualified_pattern_on_linear() {
    let mut checker = Checker::new(RouterAdapter::linear());
    checker
        .path("/items/9")
        .pattern("POST /items/{id}")
        .method("GET")
        .handler(echo_id(linear_param));

    let result = checker.run().unwrap();
    assert_eq!(result.status_code(), 404);
}

#[test]
fn test_method_not_allowed_on_mux() {
    let mut checker = Checker::new(Mux::new());
    checker
        .path("/items/9")
        .pattern("POST /items/{id}")
        .method("GET")
        .handler(echo_id(mux_param));

    let result = checker.run().unwrap();
    assert_eq!(result.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(result.header("Allow"), Some("POST"));
}

#[test]
fn test_shared_router_across_checkers() {
    let shared = SharedRouter::new(Mux::new());

    let mut users = Checker::new(shared.clone());
    users
        .path("/users/1")
        .pattern("/users/{id}")
        .handler(echo_id(mux_param));

    let mut orders = Checker::new(shared.clone());
    orders
        .path("/orders/2")
        .pattern("/orders/{id}")
        .handler(echo_id(mux_param));

    assert_eq!(users.run().unwrap().header("X-Param-Id"), Some("1"));
    assert_eq!(orders.run().unwrap().header("X-Param-Id"), Some("2"));
    assert_eq!(shared.lock().len(), 2);
}

#[test]
fn test_query_string_path_without_pattern_on_every_engine() {
    let engines: Vec<Box<dyn Router>> = vec![
        Box::new(Mux::new()),
        Box::new(RouterAdapter::matchit()),
        Box::new(RouterAdapter::linear()),
    ];

    for (index, engine) in engines.into_iter().enumerate() {
        let mut checker = Checker::new(engine);
        checker.path("/search?q=rust").handler(Handler::new(|w, r| {
            let query = r.uri().query().unwrap_or_default().to_string();
            w.write(query.as_bytes());
        }));

        let result = checker.run().unwrap();
        assert_eq!(result.status_code(), 200, "engine {index}");
        assert_eq!(result.text(), "q=rust");
    }
}

#[test]
fn test_method_qualified_pattern_rejected_by_matchit() {
    let mut checker = Checker::new(RouterAdapter::matchit());
    checker
        .path("/test/123")
        .pattern("GET /test/{id}")
        .handler(echo_id(matchit_param));

    let err = checker.run().unwrap_err();
    assert!(matches!(err, CheckError::Registration { .. }));
}

#[test]
fn test_nested_check_on_shared_router() {
    let shared = SharedRouter::new(Mux::new());

    let inner = shared.clone();
    let outer_handler = Handler::new(move |w, _| {
        let mut nested = Checker::new(inner.clone());
        nested.path("/inner").handler(Handler::new(|w, _| {
            w.write(b"inner");
        }));
        let text = nested.run().map(|r| r.text().into_owned()).unwrap_or_default();
        w.write(format!("outer+{text}").as_bytes());
    });

    let mut checker = Checker::new(shared.clone());
    checker.path("/outer").handler(outer_handler);

    assert_eq!(checker.run().unwrap().text(), "outer+inner");
    assert_eq!(shared.lock().len(), 2);
}
