//! The shipped demo configurations load and validate.

use std::path::Path;

use prefix_proxy::config::load_config;
use prefix_proxy::RouteTable;

fn demo(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

#[test]
fn json_route_file_loads() {
    let config = load_config(&demo("routes.json")).expect("routes.json should load");
    assert_eq!(config.routes.len(), 2);

    let table = RouteTable::from_config(config.routes, config.fallback_target);
    assert_eq!(
        table.match_path("/console/app.js").target_url().as_deref(),
        Some("http://localhost:5173/app.js")
    );
}

#[test]
fn toml_config_loads() {
    let config = load_config(&demo("proxy.toml")).expect("proxy.toml should load");
    assert_eq!(config.routes.len(), 2);
    assert!(!config.routes[1].strip_prefix);
    assert!(config.upstream.preserve_query);
    assert_eq!(config.upstream.timeout_secs, None);
}
