//! Trace replay through the `steady` library surface.

use insta::assert_snapshot;
use steady::replay::{self, ReplayError, Script};
use steady_config::SteadyConfig;

use crate::common::{watching, write_temp};

const TRACE: &str = r#"
[[rows]]
name = "x"
handle = 1
entry = 10

[[rows]]
name = "h"
handle = 2
entry = 20

[[rows]]
name = "y"
handle = 3
entry = 30

[[steps]]
op = "wait"
name = "w"
[[steps]]
op = "add"
row = "x"
[[steps]]
op = "query"
row = "x"
[[steps]]
op = "query"
row = "y"
[[steps]]
op = "heads_up"
row = "h"
value = true
[[steps]]
op = "query"
row = "h"
[[steps]]
op = "visible"
row = "h"
value = true
[[steps]]
op = "query"
row = "h"
[[steps]]
op = "pre_update"
row = "y"
ambient = true
[[steps]]
op = "query"
row = "y"
[[steps]]
op = "pulsing"
value = true
[[steps]]
op = "pulsing"
value = false
[[steps]]
op = "finished"
[[steps]]
op = "query"
row = "x"
[[steps]]
op = "query"
row = "y"
[[steps]]
op = "panel_expanded"
value = false
[[steps]]
op = "query"
row = "y"
"#;

#[test]
fn replay_transcript() {
    let script = Script::from_toml_str(TRACE).unwrap();
    let transcript = replay::run(&script, watching()).unwrap();

    assert_snapshot!(transcript, @r"
wait w (pending=1)
add x
can_reorder x = true
can_reorder y = false
heads_up h true
can_reorder h = true
visible h true
can_reorder h = false
pre_update y
can_reorder y = true
pulsing true (allowed=false)
pulsing false (allowed=false)
finished
can_reorder x = false
can_reorder y = false
panel_expanded false (allowed=true)
  fired w
can_reorder y = true
");
}

#[test]
fn script_and_config_load_from_disk() {
    let (_script_dir, script_path) = write_temp("trace.toml", TRACE);
    let (_config_dir, config_path) =
        write_temp("config.toml", "[gate]\nscreen_on = true\npanel_expanded = true\n");

    let config = SteadyConfig::load_from(&config_path).unwrap();
    assert_eq!(config.initial_signals(), watching());

    let script = Script::load(&script_path).unwrap();
    let transcript = replay::run(&script, config.initial_signals()).unwrap();
    assert!(transcript.ends_with("  fired w\ncan_reorder y = true\n"));
}

#[test]
fn missing_script_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Script::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ReplayError::Read { .. }));
}

#[test]
fn malformed_script_is_parse_error() {
    let (_dir, path) = write_temp("bad.toml", "[[steps]]\nop = 3\n");
    let err = Script::load(&path).unwrap_err();
    assert!(matches!(err, ReplayError::Parse { .. }));
}
