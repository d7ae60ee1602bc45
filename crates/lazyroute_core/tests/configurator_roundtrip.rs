use lazyroute_core::configurator::toolbar::{ALERT_INVALID_CONFIG, ALERT_SELECT_ONE_FILE};
use lazyroute_core::{
    lwjgl_3_0_0, Alerter, BuildConfig, BuildToolbar, ConfigImportError, NativePlatform,
    SelectedFile,
};
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

#[derive(Default)]
struct Alerts(RefCell<Vec<String>>);

impl Alerter for Alerts {
    fn alert(&self, message: &str) {
        self.0.borrow_mut().push(message.to_string());
    }
}

fn customized_toolbar(alerts: Rc<Alerts>) -> BuildToolbar {
    let mut toolbar = BuildToolbar::new(lwjgl_3_0_0(), alerts);
    toolbar.update(|config| {
        config.artifacts.insert("lwjgl-glfw".to_string());
        config.artifacts.insert("lwjgl-ovr".to_string());
        config.natives.remove(&NativePlatform::Macos);
        config.javadoc = true;
    });
    toolbar
}

#[test]
fn saved_configuration_reloads_identically_through_a_file() {
    let alerts = Rc::new(Alerts::default());
    let source = customized_toolbar(alerts.clone());
    let saved = source.save().expect("config should serialize");

    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(saved.as_bytes()).expect("write saved config");
    let picked = SelectedFile::from_path(file.path()).expect("read saved config");

    let mut target = BuildToolbar::new(lwjgl_3_0_0(), alerts.clone());
    target.toggle_file_ui();
    target
        .handle_files(&[picked])
        .expect("saved config should load");

    assert_eq!(target.config(), source.config());
    assert!(!target.is_file_ui_open());
    assert!(alerts.0.borrow().is_empty());
}

#[test]
fn invalid_json_alerts_and_keeps_previous_configuration() {
    let alerts = Rc::new(Alerts::default());
    let mut toolbar = customized_toolbar(alerts.clone());
    toolbar.toggle_file_ui();
    let before = toolbar.config().clone();

    let err = toolbar
        .handle_files(&[SelectedFile {
            name: "broken.json".to_string(),
            contents: "{\"version\": \"3.0.0\", ".to_string(),
        }])
        .expect_err("truncated JSON must be rejected");

    assert!(matches!(err, ConfigImportError::InvalidJson(_)));
    assert_eq!(toolbar.config(), &before);
    assert!(toolbar.is_file_ui_open());
    assert_eq!(*alerts.0.borrow(), vec![ALERT_INVALID_CONFIG.to_string()]);
}

#[test]
fn semantically_invalid_document_is_rejected_like_bad_json() {
    let alerts = Rc::new(Alerts::default());
    let mut toolbar = BuildToolbar::new(lwjgl_3_0_0(), alerts.clone());
    let before = toolbar.config().clone();

    let err = toolbar
        .handle_files(&[SelectedFile {
            name: "other.json".to_string(),
            contents: r#"{"version":"3.0.0","artifacts":["lwjgl","lwjgl-assimp"],"natives":["linux"]}"#
                .to_string(),
        }])
        .expect_err("unknown artifact must be rejected");

    assert_eq!(
        err,
        ConfigImportError::UnknownArtifact("lwjgl-assimp".to_string())
    );
    assert_eq!(toolbar.config(), &before);
    assert_eq!(*alerts.0.borrow(), vec![ALERT_INVALID_CONFIG.to_string()]);
}

#[test]
fn empty_selection_asks_for_one_file() {
    let alerts = Rc::new(Alerts::default());
    let mut toolbar = BuildToolbar::new(lwjgl_3_0_0(), alerts.clone());
    let err = toolbar.handle_files(&[]).expect_err("empty selection must fail");
    assert_eq!(err, ConfigImportError::FileCount(0));
    assert_eq!(*alerts.0.borrow(), vec![ALERT_SELECT_ONE_FILE.to_string()]);
}

#[test]
fn saved_json_uses_lowercase_platform_names() {
    let table = lwjgl_3_0_0();
    let json = BuildConfig::default_for(&table)
        .to_json()
        .expect("config should serialize");
    let value: serde_json::Value = serde_json::from_str(&json).expect("saved JSON parses");
    assert_eq!(value["version"], "3.0.0");
    assert_eq!(value["natives"], serde_json::json!(["windows", "macos", "linux"]));
}
