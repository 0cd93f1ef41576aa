//! End-to-end tests for the `arcade-state` binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn arcade_state_bin() -> &'static str {
    env!("CARGO_BIN_EXE_arcade-state")
}

fn run(args: &[&str]) -> Output {
    Command::new(arcade_state_bin())
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn assert_success(output: &Output) {
    assert_eq!(
        output.status.code(),
        Some(0),
        "Should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

const CP_STATE: &str = r#"{
    "__version": 2,
    "sCPConfig": {
        "controls": [
            {"id": "c1", "name": "P1 Joy", "type": "joy8way", "numButtons": 0, "isOnOppositeScreenSide": false}
        ],
        "buttonClusters": [
            {"id": "b1", "name": "P1 Buttons", "numButtons": 6, "isOnOppositeScreenSide": false}
        ],
        "controlSets": [{"controlIds": ["c1"], "buttonClusterId": "b1"}]
    }
}"#;

#[test]
fn test_inspect_json() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "cp.json", CP_STATE);

    let output = run(&["inspect", "cp-designer", path_str(&file), "--json"]);
    assert_success(&output);

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["kind"], "cp_designer");
    assert_eq!(summary["controls"][0]["id"], "c1");
    assert_eq!(summary["controls"][0]["control_type"], "JOY_8WAY");
    assert_eq!(summary["control_sets"][0]["button_cluster_id"], "b1");
    assert_eq!(summary["total_buttons"], 6);
}

#[test]
fn test_inspect_large_button_counts() {
    let dir = TempDir::new().unwrap();
    let file = write_file(
        &dir,
        "cp.json",
        &CP_STATE.replace(r#""numButtons": 0"#, r#""numButtons": 4294967295"#),
    );

    let output = run(&["inspect", "cp-designer", path_str(&file), "--json"]);
    assert_success(&output);

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["total_buttons"], 4_294_967_301u64);
}

#[test]
fn test_inspect_reports_decode_path() {
    let dir = TempDir::new().unwrap();
    let file = write_file(
        &dir,
        "cp.json",
        &CP_STATE.replace(r#""controlIds": ["c1"]"#, r#""controlIds": ["c9"]"#),
    );

    let output = run(&["inspect", "cp-designer", path_str(&file)]);
    assert_ne!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("sCPDesignerState(v2).sCPConfig(v1).controlSets[0].controlIds[0]"));
}

#[test]
fn test_migrate_group_state() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "group.json", r#"["m1", "m2"]"#);

    let output = run(&["migrate", "monitor-designer-group", path_str(&file)]);
    assert_success(&output);

    let migrated: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        migrated,
        serde_json::json!({"__version": 3, "designerIds": ["m1", "m2"]})
    );
}

#[test]
fn test_names() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "names.json", r#""mario,pacman, pacman /* old */""#);

    let output = run(&["names", path_str(&file)]);
    assert_success(&output);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "mario\npacman\n");
}

#[test]
fn test_defs_reports_missing_types() {
    let dir = TempDir::new().unwrap();
    let file = write_file(
        &dir,
        "defs.json",
        r#"{"joy-8way": {"type": "joy-8way", "name": "8-Way Joystick", "description": ""}}"#,
    );

    let output = run(&["defs", path_str(&file)]);
    assert_ne!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("1 control definitions"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("JOY_4WAY"));
}

#[test]
fn test_modelines() {
    let dir = TempDir::new().unwrap();
    let modeline: serde_json::Value = [
        "pclock", "hactive", "hbegin", "hend", "htotal", "vactive", "vbegin", "vend", "vtotal",
        "interlace", "doublescan", "hsync", "vsync", "vfreq", "hfreq", "width", "height",
        "refresh", "type", "range",
    ]
    .iter()
    .map(|k| (k.to_string(), serde_json::json!(0)))
    .collect::<serde_json::Map<_, _>>()
    .into();
    let output = serde_json::json!({
        "tempest": {"err": "unsupported display"},
        "galaga": {
            "inRange": false, "description": "224x288", "modelineStr": "\"224x288_60\" 6.70",
            "details": "", "vfreqOff": false, "resStretch": false, "weight": 0,
            "xScale": 1, "yScale": 1, "vScale": 1, "xDiff": 0, "yDiff": 0, "vDiff": 0,
            "xRatio": 1, "yRatio": 1, "vRatio": 1, "rotated": true, "modeline": modeline
        }
    });
    let file = write_file(&dir, "output.json", &output.to_string());

    let result = run(&["modelines", path_str(&file)]);
    assert_success(&result);
    assert_eq!(
        String::from_utf8_lossy(&result.stdout),
        "galaga: \"224x288_60\" 6.70 [out of range]\ntempest: error: unsupported display\n"
    );
}

#[test]
fn test_store_get_migrates_legacy_key() {
    let dir = TempDir::new().unwrap();
    let store = write_file(
        &dir,
        "store.json",
        r#"{"__stateVersionNum": "4", "gameNameListInput": "\"dkong, galaga\""}"#,
    );

    let output = run(&["store", "--path", path_str(&store), "get", "game-name-list"]);
    assert_success(&output);
    let state: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(state, serde_json::json!({"__version": 2, "inputStr": "dkong, galaga"}));

    let output = run(&["store", "--path", path_str(&store), "keys"]);
    assert_success(&output);
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "__stateVersionNum\ngameNameList\n"
    );

    let output = run(&["store", "--path", path_str(&store), "clear", "game-name-list"]);
    assert_success(&output);
    let output = run(&["store", "--path", path_str(&store), "get", "game-name-list"]);
    assert_success(&output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("no saved state"));
}
