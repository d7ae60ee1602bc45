//! Page bootstrap performed after the first navigation settles.
//!
//! # Responsibility
//! - Take scroll restoration over from the browser.
//! - Inject the deferred analytics script in production builds.
//!
//! # Invariants
//! - `run_page_bootstrap` is called at most once per runtime; callers
//!   gate it with `BootstrapGate::claim`.
//! - A missing scroll-restoration API is skipped, not reported.

pub mod gate;

use crate::config::RuntimeConfig;
use crate::env::{PageEnvironment, ScrollRestoration};
use log::info;

/// Runs the one-time page bootstrap side effects.
pub fn run_page_bootstrap(env: &PageEnvironment, config: &RuntimeConfig) {
    let restoration = if env.viewport.supports_scroll_restoration() {
        env.viewport.set_scroll_restoration(ScrollRestoration::Manual);
        "manual"
    } else {
        "unsupported"
    };

    let analytics = if config.build_profile.is_production() {
        env.scripts.load_script(&config.analytics_script_url);
        "deferred"
    } else {
        "skipped"
    };

    info!(
        "event=page_bootstrap module=bootstrap status=ok scroll_restoration={} analytics_script={}",
        restoration, analytics
    );
}

#[cfg(test)]
mod tests {
    use super::run_page_bootstrap;
    use crate::config::{BuildProfile, RuntimeConfig};
    use crate::env::recording::{PageEvent, RecordingPage};
    use crate::env::{PageEnvironment, ScrollRestoration};
    use std::rc::Rc;

    fn config(profile: BuildProfile) -> RuntimeConfig {
        RuntimeConfig {
            build_profile: profile,
            ..RuntimeConfig::default()
        }
    }

    #[test]
    fn production_bootstrap_sets_manual_restoration_and_loads_script() {
        let page = Rc::new(RecordingPage::new(true));
        let env = PageEnvironment::from_single(page.clone());
        assert_eq!(page.scroll_restoration(), ScrollRestoration::Auto);
        run_page_bootstrap(&env, &config(BuildProfile::Production));

        assert_eq!(page.scroll_restoration(), ScrollRestoration::Manual);

        assert_eq!(
            page.events(),
            vec![
                PageEvent::ScrollRestoration(ScrollRestoration::Manual),
                PageEvent::ScriptLoad(
                    "https://www.google-analytics.com/analytics.js".to_string()
                ),
            ]
        );
    }

    #[test]
    fn development_bootstrap_skips_script_and_missing_api() {
        let page = Rc::new(RecordingPage::new(false));
        let env = PageEnvironment::from_single(page.clone());
        run_page_bootstrap(&env, &config(BuildProfile::Development));

        assert!(page.events().is_empty());
        assert_eq!(page.scroll_restoration(), ScrollRestoration::Auto);
    }
}
