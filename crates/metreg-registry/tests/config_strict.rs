#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use metreg_registry::config::{self, ReservoirKind};
use metreg_registry::MetricRegistry;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
registry:
  reservoir:
    kind: sliding_window
    sizee: 10 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.registry.namespace, None);
    assert_eq!(cfg.registry.reservoir.kind, ReservoirKind::SlidingWindow);
    assert_eq!(cfg.registry.reservoir.size, 1028);
}

#[test]
fn unknown_version_rejected() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn unknown_reservoir_kind_rejected() {
    let bad = r#"
version: 1
registry:
  reservoir:
    kind: exponentially_decaying
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn reservoir_size_range_checked() {
    let bad = r#"
version: 1
registry:
  reservoir:
    size: 0
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn blank_namespace_rejected() {
    let bad = r#"
version: 1
registry:
  namespace: " . "
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn config_drives_registry() {
    let ok = r#"
version: 1
registry:
  namespace: "svc.edge"
  reservoir:
    kind: sliding_window
    size: 4
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    let registry = MetricRegistry::from_config(&cfg).expect("must build");
    assert_eq!(registry.namespace().map(|n| n.key()), Some("svc.edge"));

    let h = registry.histogram(&"latency".parse().unwrap()).unwrap();
    for v in 0..10 {
        h.update(v);
    }
    assert_eq!(h.snapshot().values(), &[6, 7, 8, 9]);
}
