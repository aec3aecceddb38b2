//! Integration tests for loading configuration files and dispatching requests.

use http::header::{CONNECTION, CONTENT_LENGTH, LOCATION, SERVER};
use http::{Request, StatusCode};
use redirector::{Dispatch, Error, LoaderConfig, PatternPolicy, Redirector, RuleKind};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn get(target: &str) -> Request<()> {
    Request::get(target).body(()).unwrap()
}

const BASE: &str = r#"
# Explicit
^/old/(\d+)$ = E:/new/$1
# Implicit
^/api/v1/(.+)$ = I:/api/v2/$1
# Overflow
^/x$ = E:/y/$1
"#;

#[test]
fn test_explicit_scenario() {
    let dir = TempDir::new().unwrap();
    let base = write(&dir, "redirector.conf", BASE);
    let redirector = Redirector::init(&base, &dir.path().join("missing.conf")).unwrap();

    let mut request = get("/old/42");
    match redirector.dispatch(&mut request) {
        Dispatch::Redirect(response) => {
            assert_eq!(response.status(), StatusCode::FOUND);
            assert_eq!(response.headers()[LOCATION], "/new/42");
            assert_eq!(response.headers()[CONNECTION], "close");
            assert_eq!(response.headers()[CONTENT_LENGTH], "0");
            assert!(response.headers().contains_key(SERVER));
        }
        other => panic!("expected redirect, got {:?}", other),
    }
}

#[test]
fn test_implicit_scenario() {
    let dir = TempDir::new().unwrap();
    let base = write(&dir, "redirector.conf", BASE);
    let redirector = Redirector::init(&base, &dir.path().join("missing.conf")).unwrap();

    let mut request = get("/api/v1/users");
    let outcome = redirector.dispatch(&mut request);
    assert!(matches!(outcome, Dispatch::Rewritten { ref to, .. } if to == "/api/v2/users"));
    assert_eq!(request.uri().path(), "/api/v2/users");
}

#[test]
fn test_no_match_scenario() {
    let dir = TempDir::new().unwrap();
    let base = write(&dir, "redirector.conf", BASE);
    let redirector = Redirector::init(&base, &dir.path().join("missing.conf")).unwrap();

    let mut request = get("/new/42");
    assert!(redirector.dispatch(&mut request).is_pass_through());
    assert_eq!(request.uri(), "/new/42");
}

#[test]
fn test_overflow_scenario() {
    let dir = TempDir::new().unwrap();
    let base = write(&dir, "redirector.conf", BASE);
    let redirector = Redirector::init(&base, &dir.path().join("missing.conf")).unwrap();

    let mut request = get("/x");
    assert!(redirector.dispatch(&mut request).is_pass_through());
    assert_eq!(request.uri(), "/x");
}

#[test]
fn test_local_override_appends_after_base() {
    let dir = TempDir::new().unwrap();
    let base = write(&dir, "redirector.conf", "^/a/(\\w+)$ = E:/base/$1\n");
    let local = write(
        &dir,
        "redirector.local.conf",
        "^/a/(\\w+)$ = E:/local/$1\n^/b$ = I:/c\n",
    );
    let redirector = Redirector::init(&base, &local).unwrap();

    assert_eq!(redirector.explicit_handlers().len(), 2);
    assert_eq!(redirector.implicit_handlers().len(), 1);

    // Base rule was registered first and wins
    let mut request = get("/a/z");
    match redirector.dispatch(&mut request) {
        Dispatch::Redirect(response) => assert_eq!(response.headers()[LOCATION], "/base/z"),
        other => panic!("expected redirect, got {:?}", other),
    }

    let mut request = get("/b");
    assert!(matches!(redirector.dispatch(&mut request), Dispatch::Rewritten { .. }));
}

#[test]
fn test_loading_same_file_twice_doubles_rules() {
    let dir = TempDir::new().unwrap();
    let base = write(&dir, "redirector.conf", BASE);
    let redirector = Redirector::init(&base, &base).unwrap();

    let store = redirector.store();
    assert_eq!(store.len(), 6);
    assert_eq!(store.explicit()[0], store.explicit()[2]);
    assert_eq!(store.implicit()[0], store.implicit()[1]);

    let matched = store.find(RuleKind::Explicit, "/old/7").unwrap();
    assert_eq!(matched.position(), 0);
}

#[test]
fn test_missing_base_is_seeded_with_default() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("redirector.conf");
    assert!(!base.exists());

    let redirector = Redirector::init(&base, &dir.path().join("missing.conf")).unwrap();

    assert!(base.exists());
    assert_eq!(
        fs::read_to_string(&base).unwrap(),
        redirector::redirector::DEFAULT_CONFIG
    );
    assert!(redirector.store().is_empty());
}

#[test]
fn test_unwritable_base_is_fatal() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("no-such-dir").join("redirector.conf");

    let err = Redirector::init(&base, Path::new("missing.conf")).unwrap_err();
    assert!(matches!(err, Error::ConfigRead { ref path, .. } if path == &base));
}

#[test]
fn test_unreadable_base_is_fatal() {
    let dir = TempDir::new().unwrap();
    // A directory exists but cannot be read as a file
    let err = Redirector::init(dir.path(), Path::new("missing.conf")).unwrap_err();
    assert!(matches!(err, Error::ConfigRead { .. }));
}

#[test]
fn test_malformed_entries_do_not_abort() {
    let dir = TempDir::new().unwrap();
    let base = write(
        &dir,
        "redirector.conf",
        "^/a$ = X:/foo\n^/b$ = E:\n^/c$\n^/d$ = E:/ok\n",
    );
    let redirector = Redirector::init(&base, &dir.path().join("missing.conf")).unwrap();

    assert_eq!(redirector.store().len(), 1);
    assert_eq!(redirector.explicit_handlers()[0].pattern(), "^/d$");
}

#[test]
fn test_invalid_pattern_policy() {
    let dir = TempDir::new().unwrap();
    let base = write(&dir, "redirector.conf", "^/(a$ = E:/x\n^/b$ = E:/y\n");
    let missing = dir.path().join("missing.conf");

    let err = Redirector::init(&base, &missing).unwrap_err();
    assert!(matches!(err, Error::InvalidPattern { .. }));

    let redirector =
        Redirector::init_with_config(&base, &missing, LoaderConfig::with_policy(PatternPolicy::Skip))
            .unwrap();
    assert_eq!(redirector.store().len(), 1);
}

#[test]
fn test_custom_server_name() {
    let dir = TempDir::new().unwrap();
    let base = write(&dir, "redirector.conf", BASE);
    let config = LoaderConfig::new(PatternPolicy::Fail, "edge-proxy");
    let redirector =
        Redirector::init_with_config(&base, &dir.path().join("missing.conf"), config).unwrap();

    let mut request = get("/old/1");
    match redirector.dispatch(&mut request) {
        Dispatch::Redirect(response) => assert_eq!(response.headers()[SERVER], "edge-proxy"),
        other => panic!("expected redirect, got {:?}", other),
    }
}

#[test]
fn test_absolute_form_proxy_request() {
    let redirector = Redirector::from_reader(
        r"^http://old\.example\.com/(.*)$ = E:http://new.example.com/$1".as_bytes(),
    )
    .unwrap();

    let mut request = get("http://old.example.com/page?id=3");
    match redirector.dispatch(&mut request) {
        Dispatch::Redirect(response) => {
            assert_eq!(response.headers()[LOCATION], "http://new.example.com/page?id=3")
        }
        other => panic!("expected redirect, got {:?}", other),
    }
}

#[test]
fn test_shared_across_threads() {
    let redirector = std::sync::Arc::new(Redirector::from_reader(BASE.as_bytes()).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let redirector = redirector.clone();
            std::thread::spawn(move || {
                let mut request = get(&format!("/api/v1/item{}", i));
                redirector.dispatch(&mut request);
                request.uri().to_string()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("/api/v2/item{}", i));
    }
}
