use super::*;
use crate::animation::ease::Ease;
use crate::sequence::assemble::CrossfadeSpec;

#[test]
fn defaults_hold_two_seconds_with_twenty_frame_fades() {
    let cfg = FlowConfig::new("shots");
    assert_eq!(cfg.hold_ms, 2000);
    assert_eq!(cfg.normalization, Normalization::ShrinkToMin);
    assert_eq!(
        cfg.transitions,
        Transitions::Crossfade(CrossfadeSpec {
            frames: 20,
            frame_duration_ms: 40,
            ease: Ease::Smoothstep,
        })
    );
    assert_eq!(cfg.output_path(), PathBuf::from("shots").join("user-flow.gif"));
    cfg.validate().unwrap();
}

#[test]
fn json_fields_are_optional() {
    let cfg = FlowConfig::from_json_str(
        r#"{
            "source_dir": "Public/screenshots/Android",
            "files": ["1-splash.png", "2-home.png"],
            "hold_ms": 1500,
            "normalization": "pad_to_max_blur",
            "transitions": { "kind": "crossfade", "frames": 10 }
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.hold_ms, 1500);
    assert_eq!(cfg.normalization, Normalization::PadToMaxBlur);
    assert_eq!(cfg.files.as_ref().map(Vec::len), Some(2));
    match cfg.transitions {
        Transitions::Crossfade(spec) => {
            assert_eq!(spec.frames, 10);
            assert_eq!(spec.frame_duration_ms, 40);
        }
        Transitions::Disabled => panic!("expected crossfade"),
    }
}

#[test]
fn invalid_values_are_rejected() {
    assert!(FlowConfig::from_json_str(r#"{ "hold_ms": 0 }"#).is_err());
    assert!(
        FlowConfig::from_json_str(r#"{ "transitions": { "kind": "crossfade", "frames": 0 } }"#)
            .is_err()
    );
    assert!(FlowConfig::from_json_str(r#"{ "files": [] }"#).is_err());
    assert!(FlowConfig::from_json_str(r#"{ "threading": { "threads": 0 } }"#).is_err());
    assert!(FlowConfig::from_json_str("{ not json").is_err());
}

#[test]
fn relative_paths_resolve_against_config_file() {
    let dir = PathBuf::from("target").join("unit_config");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("flow.json");
    std::fs::write(
        &path,
        r#"{ "source_dir": "shots", "out_path": "out/flow.gif", "transitions": { "kind": "disabled" } }"#,
    )
    .unwrap();

    let cfg = FlowConfig::from_path(&path).unwrap();
    assert_eq!(cfg.source_dir, dir.join("shots"));
    assert_eq!(cfg.output_path(), dir.join("out/flow.gif"));
    assert_eq!(cfg.transitions, Transitions::Disabled);
}
