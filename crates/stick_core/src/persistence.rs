//! Save/restore of `GameState` and the best-score progress file.
//!
//! Save files are a versioned JSON record:
//!
//! ```json
//! { "format_version": 1, "checksum": "<sha256 hex>", "state": { ... } }
//! ```
//!
//! The checksum covers the exact bytes of the embedded `state` object, so a
//! hand-edited or truncated save is reported as corrupt instead of loading
//! half a run. Writes go to a sibling `.tmp` file first and are renamed into
//! place, leaving the previous save intact if the write fails.

use crate::config::GameConfig;
use crate::state::GameState;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SAVE_FORMAT_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("No save file at {}", .path.display())]
    NoSave { path: PathBuf },
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Corrupt save {}: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },
    #[error("Save {} has format version {found}, expected {expected}", .path.display())]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        expected: u32,
    },
}

#[derive(Serialize)]
struct SaveRecordOut<'a> {
    format_version: u32,
    checksum: String,
    state: &'a RawValue,
}

#[derive(Deserialize)]
struct SaveRecordIn {
    format_version: u32,
    checksum: String,
    state: Box<RawValue>,
}

/// Best score across runs. Lives in its own file so a restart never loses it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub best_score: u32,
}

pub fn save_state(path: &Path, state: &GameState) -> Result<(), SaveError> {
    let state_json = serde_json::to_string(state).map_err(|e| corrupt(path, e))?;
    let raw = RawValue::from_string(state_json).map_err(|e| corrupt(path, e))?;
    let record = SaveRecordOut {
        format_version: SAVE_FORMAT_VERSION,
        checksum: checksum_hex(raw.get()),
        state: &raw,
    };
    let body = serde_json::to_string(&record).map_err(|e| corrupt(path, e))?;
    write_replacing(path, body.as_bytes())?;
    log::info!(
        "Saved game to {} (score {}, {} platforms)",
        path.display(),
        state.score,
        state.platforms.len()
    );
    Ok(())
}

/// Load and check a save against the rules of `config`. A state that could
/// not have come out of a game played under that config is `Corrupt`.
pub fn load_state(path: &Path, config: &GameConfig) -> Result<GameState, SaveError> {
    let raw = read_existing(path)?;
    let record: SaveRecordIn = serde_json::from_str(&raw).map_err(|e| corrupt(path, e))?;
    if record.format_version != SAVE_FORMAT_VERSION {
        return Err(SaveError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: record.format_version,
            expected: SAVE_FORMAT_VERSION,
        });
    }
    let actual = checksum_hex(record.state.get());
    if !actual.eq_ignore_ascii_case(&record.checksum) {
        return Err(SaveError::Corrupt {
            path: path.to_path_buf(),
            reason: format!("checksum mismatch (stored {}, computed {actual})", record.checksum),
        });
    }
    let state: GameState =
        serde_json::from_str(record.state.get()).map_err(|e| corrupt(path, e))?;
    validate_state(&state, config).map_err(|reason| SaveError::Corrupt {
        path: path.to_path_buf(),
        reason,
    })?;
    log::info!(
        "Loaded game from {} (score {}, {} platforms)",
        path.display(),
        state.score,
        state.platforms.len()
    );
    Ok(state)
}

/// Load the configured save, falling back to a fresh state on any failure.
pub fn load_or_default(config: &GameConfig) -> GameState {
    match load_state(&config.save_path, config) {
        Ok(state) => state,
        Err(SaveError::NoSave { path }) => {
            log::info!("No save at {}, starting fresh", path.display());
            GameState::new(config)
        }
        Err(err) => {
            log::warn!("{err}; starting fresh");
            GameState::new(config)
        }
    }
}

pub fn save_progress(path: &Path, progress: &Progress) -> Result<(), SaveError> {
    let body = serde_json::to_string_pretty(progress).map_err(|e| corrupt(path, e))?;
    write_replacing(path, body.as_bytes())
}

/// Missing progress means nobody has played yet, which is not an error.
pub fn load_progress(path: &Path) -> Result<Progress, SaveError> {
    match read_existing(path) {
        Ok(raw) => serde_json::from_str(&raw).map_err(|e| corrupt(path, e)),
        Err(SaveError::NoSave { .. }) => Ok(Progress::default()),
        Err(err) => Err(err),
    }
}

fn validate_state(state: &GameState, config: &GameConfig) -> Result<(), String> {
    let length = state.stick.length;
    if !length.is_finite() || length < 0.0 || length > config.stick_max_length {
        return Err(format!(
            "stick length {length} outside [0, {}]",
            config.stick_max_length
        ));
    }
    if !state.origin_x.is_finite() || state.origin_x < 0.0 || state.origin_x > config.field_width
    {
        return Err(format!(
            "origin_x {} outside [0, {}]",
            state.origin_x, config.field_width
        ));
    }
    for (i, platform) in state.platforms.iter().enumerate() {
        if !platform.position.is_finite() {
            return Err(format!("platform {i} has a non-finite position"));
        }
        if !(platform.width > 0.0 && platform.height > 0.0) {
            return Err(format!(
                "platform {i} has non-positive size {}x{}",
                platform.width, platform.height
            ));
        }
    }
    Ok(())
}

fn read_existing(path: &Path) -> Result<String, SaveError> {
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            SaveError::NoSave {
                path: path.to_path_buf(),
            }
        } else {
            SaveError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

fn write_replacing(path: &Path, bytes: &[u8]) -> Result<(), SaveError> {
    let io_err = |source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);
    fs::write(&tmp_path, bytes).map_err(io_err)?;
    fs::rename(&tmp_path, path).map_err(|source| {
        let _ = fs::remove_file(&tmp_path);
        io_err(source)
    })
}

fn checksum_hex(payload: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

fn corrupt(path: &Path, err: impl std::fmt::Display) -> SaveError {
    SaveError::Corrupt {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Platform, PlatformKind};
    use crate::stick::Stick;
    use glam::Vec2;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "stick_save_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn defaults() -> GameConfig {
        GameConfig::default()
    }

    fn sample_state() -> GameState {
        GameState {
            score: 250,
            cherries_collected: 6,
            is_revived: true,
            is_falling: false,
            platforms: vec![
                Platform::new(PlatformKind::Pillar, Vec2::new(12.5, 230.0), 73.25, 20.0),
                Platform::new(PlatformKind::Cherry, Vec2::new(301.1, 230.0), 20.0, 20.0),
                Platform::new(PlatformKind::Pillar, Vec2::new(0.1, 230.0), 149.9, 20.0),
            ],
            stick: Stick { length: 46.0 },
            origin_x: 20.0,
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let path = temp_file_path("round_trip");
        let state = sample_state();

        save_state(&path, &state).expect("save should succeed");
        let loaded = load_state(&path, &defaults()).expect("load should succeed");
        assert_eq!(loaded, state);
        assert_eq!(loaded.platforms[1].kind, PlatformKind::Cherry);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn save_overwrites_previous_file() {
        let path = temp_file_path("overwrite");
        let mut state = sample_state();
        save_state(&path, &state).expect("first save");
        state.score = 9000;
        state.platforms.truncate(1);
        save_state(&path, &state).expect("second save");

        let loaded = load_state(&path, &defaults()).expect("load");
        assert_eq!(loaded.score, 9000);
        assert_eq!(loaded.platforms.len(), 1);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_file_reports_no_save() {
        let path = temp_file_path("missing");
        let err = load_state(&path, &defaults()).expect_err("missing file should fail");
        assert!(matches!(err, SaveError::NoSave { .. }));
    }

    #[test]
    fn garbage_reports_corrupt() {
        let path = temp_file_path("garbage");
        fs::write(&path, "not json at all").expect("write temp file");
        let err = load_state(&path, &defaults()).expect_err("garbage should fail");
        assert!(matches!(err, SaveError::Corrupt { .. }));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn tampered_state_fails_checksum() {
        let path = temp_file_path("tampered");
        save_state(&path, &sample_state()).expect("save");
        let body = fs::read_to_string(&path).expect("read back");
        fs::write(&path, body.replace("\"score\":250", "\"score\":999")).expect("rewrite");

        let err = load_state(&path, &defaults()).expect_err("tampered save should fail");
        match err {
            SaveError::Corrupt { reason, .. } => assert!(reason.contains("checksum mismatch")),
            other => panic!("unexpected error: {other}"),
        }
        let _ = fs::remove_file(path);
    }

    #[test]
    fn future_version_is_rejected() {
        let path = temp_file_path("version");
        fs::write(
            &path,
            r#"{ "format_version": 7, "checksum": "00", "state": {} }"#,
        )
        .expect("write temp file");

        let err = load_state(&path, &defaults()).expect_err("unknown version should fail");
        assert!(matches!(
            err,
            SaveError::UnsupportedVersion { found: 7, expected: 1, .. }
        ));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn invalid_platform_in_save_is_corrupt() {
        let path = temp_file_path("bad_platform");
        let mut state = sample_state();
        state.platforms[0].width = -4.0;
        save_state(&path, &state).expect("save writes whatever it is given");

        let err = load_state(&path, &defaults()).expect_err("negative width should fail");
        assert!(err.to_string().contains("non-positive size"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn stick_past_cap_in_save_is_corrupt() {
        let path = temp_file_path("long_stick");
        let mut state = sample_state();
        state.stick.length = 500.0;
        save_state(&path, &state).expect("save");

        let err = load_state(&path, &defaults()).expect_err("stick over cap");
        assert!(matches!(err, SaveError::Corrupt { .. }));
        assert!(err.to_string().contains("stick length 500"));

        // A longer cap accepts the same file.
        let roomy = GameConfig {
            stick_max_length: 600.0,
            ..GameConfig::default()
        };
        assert_eq!(load_state(&path, &roomy).expect("within cap").stick.length, 500.0);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn origin_outside_field_in_save_is_corrupt() {
        let path = temp_file_path("origin");
        for origin_x in [-1.0, 401.0] {
            let mut state = sample_state();
            state.origin_x = origin_x;
            save_state(&path, &state).expect("save");

            let err = load_state(&path, &defaults()).expect_err("origin off field");
            assert!(err.to_string().contains("origin_x"));
        }
        let _ = fs::remove_file(path);
    }

    #[test]
    fn save_onto_directory_is_io_error_and_leaves_state_alone() {
        let dir = temp_file_path("save_dir");
        fs::create_dir_all(&dir).expect("create dir");
        let state = sample_state();

        let err = save_state(&dir, &state).expect_err("a directory is not a save file");
        assert!(matches!(err, SaveError::Io { .. }));
        assert_eq!(state, sample_state());
        assert!(dir.is_dir());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn load_or_default_without_save_starts_fresh() {
        let config = GameConfig {
            save_path: temp_file_path("never_written"),
            start_origin_x: 30.0,
            ..GameConfig::default()
        };
        let state = load_or_default(&config);
        assert_eq!(state, GameState::new(&config));
        assert_eq!(state.origin_x, 30.0);
    }

    #[test]
    fn load_or_default_rejects_save_breaking_config() {
        let path = temp_file_path("fallback_cap");
        let mut state = sample_state();
        state.stick.length = 250.0;
        save_state(&path, &state).expect("save");
        let config = GameConfig {
            save_path: path.clone(),
            ..GameConfig::default()
        };

        assert_eq!(load_or_default(&config), GameState::new(&config));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn garbage_progress_is_corrupt() {
        let path = temp_file_path("bad_progress");
        fs::write(&path, "{ \"best_score\": \"lots\" }").expect("write temp file");
        let err = load_progress(&path).expect_err("garbage progress should fail");
        assert!(matches!(err, SaveError::Corrupt { .. }));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn load_or_default_falls_back_to_fresh_state() {
        let path = temp_file_path("fallback");
        fs::write(&path, "{").expect("write temp file");
        let config = GameConfig {
            save_path: path.clone(),
            ..GameConfig::default()
        };

        let state = load_or_default(&config);
        assert_eq!(state, GameState::new(&config));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn progress_defaults_when_missing_and_round_trips() {
        let path = temp_file_path("progress");
        assert_eq!(load_progress(&path).expect("missing is fine"), Progress::default());

        save_progress(&path, &Progress { best_score: 450 }).expect("save progress");
        assert_eq!(
            load_progress(&path).expect("load progress"),
            Progress { best_score: 450 }
        );
        let _ = fs::remove_file(path);
    }

    #[test]
    fn save_into_missing_directory_creates_it() {
        let dir = temp_file_path("dir");
        let path = dir.join("nested").join("save.json");
        save_state(&path, &sample_state()).expect("save should create parents");
        assert!(load_state(&path, &defaults()).is_ok());
        let _ = fs::remove_dir_all(dir);
    }
}
