//! CLI smoke entry point.
//!
//! # Responsibility
//! - Wire `lazyroute_core` with an in-memory page and history.
//! - Replay a short navigation session and print the page side effects.
//!
//! Set `LAZYROUTE_LOG_DIR` to an absolute path to also write rolling logs,
//! and `LAZYROUTE_CONFIG` to a JSON runtime config file to override defaults.

use futures::executor::LocalPool;
use lazyroute_core::{
    async_route, default_log_level, init_logging, lwjgl_3_0_0, BuildConfig, HistoryHandle,
    LoadError, MemoryHistory, PageEnvironment, RecordingPage, ResolvedView, RouteProps,
    RouteRuntime, Router, RuntimeConfig, ViewModule,
};
use std::process::ExitCode;
use std::rc::Rc;

struct HomeView;

impl ViewModule for HomeView {
    fn name(&self) -> &str {
        "home"
    }

    fn render(&self, props: &RouteProps) -> String {
        format!("home ({})", props.descriptor.location.pathname)
    }
}

struct DownloadView;

impl ViewModule for DownloadView {
    fn name(&self) -> &str {
        "download"
    }

    fn render(&self, props: &RouteProps) -> String {
        let table = lwjgl_3_0_0();
        let config = BuildConfig::default_for(&table);
        format!(
            "download v{} ({} artifacts available, {} selected)",
            props
                .descriptor
                .route_match
                .param("version")
                .unwrap_or(table.version()),
            table.len(),
            config.artifacts.len()
        )
    }
}

fn load_view(view: ResolvedView) -> Result<ResolvedView, LoadError> {
    Ok(view)
}

fn main() -> ExitCode {
    if let Ok(log_dir) = std::env::var("LAZYROUTE_LOG_DIR") {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }
    println!("lazyroute_core version={}", lazyroute_core::core_version());

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid runtime config: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut pool = LocalPool::new();
    let page = Rc::new(RecordingPage::default());
    let runtime = match RouteRuntime::new(
        PageEnvironment::from_single(page.clone()),
        config,
        pool.spawner(),
    ) {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("invalid runtime config: {err}");
            return ExitCode::FAILURE;
        }
    };

    let router = Router::new(runtime, Rc::new(MemoryHistory::new("/")));
    let routes = [
        router.route("/", async_route("home", || async { load_view(Rc::new(HomeView)) })),
        router.route(
            "/download/:version",
            async_route("download", || async { load_view(Rc::new(DownloadView)) }),
        ),
    ];
    for registered in routes {
        if let Err(err) = registered {
            eprintln!("route registration failed: {err}");
            return ExitCode::FAILURE;
        }
    }

    if let Err(err) = router.start() {
        eprintln!("initial navigation failed: {err}");
        return ExitCode::FAILURE;
    }
    pool.run_until_stalled();
    report(&router, &page, "start /");

    router.history().push("/download/3.0.0");
    pool.run_until_stalled();
    report(&router, &page, "push /download/3.0.0");

    router.history().go_back();
    pool.run_until_stalled();
    report(&router, &page, "back");

    router.history().go_forward();
    pool.run_until_stalled();
    report(&router, &page, "forward");

    ExitCode::SUCCESS
}

fn load_config() -> Result<RuntimeConfig, String> {
    let Ok(path) = std::env::var("LAZYROUTE_CONFIG") else {
        return Ok(RuntimeConfig::default());
    };
    let raw = std::fs::read_to_string(&path).map_err(|err| format!("{path}: {err}"))?;
    RuntimeConfig::from_json_str(&raw).map_err(|err| format!("{path}: {err}"))
}

fn report(router: &Router, page: &RecordingPage, step: &str) {
    let rendered = router
        .render()
        .map(|output| output.to_markup())
        .unwrap_or_else(|| "<nothing>".to_string());
    println!("[{step}] {rendered}");
    for event in page.take_events() {
        println!("  {event:?}");
    }
}
