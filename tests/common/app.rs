use std::sync::Arc;

use axum::Router;
use tempfile::TempDir;

use activity_guide_backend::config::Config;
use activity_guide_backend::content::ContentStore;
use activity_guide_backend::routes::build_router;
use activity_guide_backend::state::AppState;
use activity_guide_backend::store::Store;

pub struct TestApp {
    pub app: Router,
    _temp_dir: TempDir,
}

pub fn seed_content_path() -> String {
    format!("{}/seed/content.json", env!("CARGO_MANIFEST_DIR"))
}

pub async fn spawn_test_app() -> TestApp {
    spawn_app(None).await
}

/// Same app, but with the static page bundle enabled and rooted at
/// the given directory.
pub async fn spawn_test_app_with_static(static_dir: &std::path::Path) -> TestApp {
    spawn_app(Some(static_dir.to_string_lossy().to_string())).await
}

async fn spawn_app(static_dir: Option<String>) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let sled_path = temp_dir.path().join("activity-guide-test.sled");

    // 直接构造 Config，避免使用 set_var 造成多线程测试环境变量竞态
    let config = Config {
        host: std::net::IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
        port: 3000,
        log_level: "info".to_string(),
        enable_file_logs: false,
        log_dir: "./logs".to_string(),
        sled_path: sled_path.to_string_lossy().to_string(),
        content_path: seed_content_path(),
        cors_origin: "*".to_string(),
        serve_static: static_dir.is_some(),
        static_dir: static_dir.unwrap_or_else(|| "./public".to_string()),
    };

    let store = Arc::new(Store::open(&config.sled_path).expect("open store"));
    store.run_migrations().expect("run migrations");

    let content = Arc::new(ContentStore::load(&config.content_path).expect("load content"));

    let state = AppState::new(store, content, &config);
    let app = build_router(state);

    TestApp {
        app,
        _temp_dir: temp_dir,
    }
}
