use std::{
    env, fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

const PARTS: [&str; 17] = [
    "nose",
    "leftEye",
    "rightEye",
    "leftEar",
    "rightEar",
    "leftShoulder",
    "rightShoulder",
    "leftElbow",
    "rightElbow",
    "leftWrist",
    "rightWrist",
    "leftHip",
    "rightHip",
    "leftKnee",
    "rightKnee",
    "leftAnkle",
    "rightAnkle",
];

fn norm_newlines(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "")
}

fn work_dir(name: &str) -> PathBuf {
    let dir = env::temp_dir().join(format!("yoga_cli_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// One full-body frame followed by a frame the camera dropped.
fn write_recording(dir: &Path) -> PathBuf {
    let keypoints: Vec<String> = PARTS
        .iter()
        .enumerate()
        .map(|(i, part)| {
            format!(
                r#"{{"part":"{part}","x":{},"y":{},"score":0.9}}"#,
                100 + i * 10,
                50 + i * 15
            )
        })
        .collect();
    let json = format!(
        r#"{{"meta":{{"title":"warrior","width":640,"height":400}},"frames":[{{"time_ms":0,"keypoints":[{}]}},{{"time_ms":100}}]}}"#,
        keypoints.join(",")
    );
    let path = dir.join("recording.json");
    fs::write(&path, json).unwrap();
    path
}

/// Ignores its input and always answers class 1.
fn write_classifier(dir: &Path) -> PathBuf {
    let row = format!("[{}]", vec!["0.0"; 34].join(","));
    let json = format!(r#"{{"weights":[{row},{row},{row}],"bias":[0.0,1.0,0.0]}}"#);
    let path = dir.join("classifier.json");
    fs::write(&path, json).unwrap();
    path
}

fn yoga(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_yoga")).args(args).output().unwrap()
}

#[test]
fn replay_stop_scores_every_other_frame_and_persists_best() {
    let dir = work_dir("replay_stop");
    let recording = write_recording(&dir);
    let classifier = write_classifier(&dir);
    let store = dir.join("store");

    let output = yoga(&[
        "replay",
        recording.to_str().unwrap(),
        "--classifier",
        classifier.to_str().unwrap(),
        "--pose",
        "1",
        "--store",
        store.to_str().unwrap(),
        "--stop-at",
        "12",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    // 19 samples between 10.1s and 11.9s; every second frame is missing.
    let stdout = norm_newlines(&String::from_utf8_lossy(&output.stdout));
    assert!(stdout.contains("session ended: reason=stopped pose=1"));
    assert!(stdout.contains("scores=[0,10,0]"));
    assert!(stdout.contains("best=[0,10,0]"));

    assert_eq!(fs::read_to_string(store.join("bestScores.json")).unwrap(), "[0,10,0]");

    let output = yoga(&["best", "--store", store.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(norm_newlines(&String::from_utf8_lossy(&output.stdout)), "best=[0,10,0]\n");
}

#[test]
fn replay_wrong_pose_keeps_previous_best() {
    let dir = work_dir("replay_wrong_pose");
    let recording = write_recording(&dir);
    let classifier = write_classifier(&dir);
    let store = dir.join("store");
    fs::create_dir_all(&store).unwrap();
    fs::write(store.join("bestScores.json"), "[3,0,0]").unwrap();

    let output = yoga(&[
        "replay",
        recording.to_str().unwrap(),
        "--classifier",
        classifier.to_str().unwrap(),
        "--pose",
        "0",
        "--store",
        store.to_str().unwrap(),
        "--stop-at",
        "11",
    ]);
    assert!(output.status.success());

    let stdout = norm_newlines(&String::from_utf8_lossy(&output.stdout));
    assert!(stdout.contains("scores=[0,0,0]"));
    assert!(stdout.contains("best=[3,0,0]"));
}

#[test]
fn replay_rejects_unknown_pose() {
    let dir = work_dir("replay_bad_pose");
    let recording = write_recording(&dir);
    let classifier = write_classifier(&dir);

    let output = yoga(&[
        "replay",
        recording.to_str().unwrap(),
        "--classifier",
        classifier.to_str().unwrap(),
        "--pose",
        "3",
        "--store",
        dir.join("store").to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    let stderr = norm_newlines(&String::from_utf8_lossy(&output.stderr));
    assert!(stderr.contains("unknown pose index 3"));
}

#[test]
fn replay_missing_recording_reports_path() {
    let dir = work_dir("replay_missing");
    let classifier = write_classifier(&dir);
    let missing = dir.join("nope.json");

    let output = yoga(&[
        "replay",
        missing.to_str().unwrap(),
        "--classifier",
        classifier.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = norm_newlines(&String::from_utf8_lossy(&output.stderr));
    assert!(stderr.contains("failed to read recording"));
}

#[test]
fn best_without_history_is_zero() {
    let dir = work_dir("best_empty");
    let output = yoga(&["best", "--store", dir.join("store").to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(norm_newlines(&String::from_utf8_lossy(&output.stdout)), "best=[0,0,0]\n");
}

#[test]
fn angle_prints_degrees_or_unavailable() {
    let output = yoga(&["angle", "0", "0", "1", "0", "2", "0"]);
    assert!(output.status.success());
    assert_eq!(norm_newlines(&String::from_utf8_lossy(&output.stdout)), "180\n");

    let output = yoga(&["angle", "1", "0", "0", "0", "0", "-1"]);
    assert!(output.status.success());
    assert_eq!(norm_newlines(&String::from_utf8_lossy(&output.stdout)), "90\n");

    let output = yoga(&["angle", "0", "0", "0", "0", "1", "1"]);
    assert!(output.status.success());
    assert_eq!(norm_newlines(&String::from_utf8_lossy(&output.stdout)), "unavailable\n");
}

#[test]
fn replay_rejects_negative_or_non_finite_stop_time() {
    let dir = work_dir("replay_bad_stop");
    let recording = write_recording(&dir);
    let classifier = write_classifier(&dir);
    let store = dir.join("store");

    for stop_at in ["--stop-at=-1", "--stop-at=NaN", "--stop-at=inf"] {
        let output = yoga(&[
            "replay",
            recording.to_str().unwrap(),
            "--classifier",
            classifier.to_str().unwrap(),
            "--store",
            store.to_str().unwrap(),
            stop_at,
        ]);
        assert_eq!(output.status.code(), Some(1), "{stop_at}");
        let stderr = norm_newlines(&String::from_utf8_lossy(&output.stderr));
        assert!(stderr.contains("invalid --stop-at"), "{stop_at}: {stderr}");
    }
    assert!(!store.join("bestScores.json").exists());
}

#[test]
fn replay_stop_during_pre_roll_is_an_abort() {
    let dir = work_dir("replay_abort");
    let recording = write_recording(&dir);
    let classifier = write_classifier(&dir);
    let store = dir.join("store");
    fs::create_dir_all(&store).unwrap();
    fs::write(store.join("bestScores.json"), "[0,4,0]").unwrap();

    let output = yoga(&[
        "replay",
        recording.to_str().unwrap(),
        "--classifier",
        classifier.to_str().unwrap(),
        "--pose",
        "1",
        "--store",
        store.to_str().unwrap(),
        "--stop-at",
        "5",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        norm_newlines(&String::from_utf8_lossy(&output.stdout)),
        "session aborted before judging\nbest=[0,4,0]\n"
    );
    assert_eq!(fs::read_to_string(store.join("bestScores.json")).unwrap(), "[0,4,0]");
}
