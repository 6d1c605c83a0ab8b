/// High score persistence.
///
/// The state machine only sees the `HighScoreStore` trait. Two backings:
///
///   **MemoryStore**: a plain value, for tests and throwaway sessions.
///
///   **FileStore**: `highscore.dat`, one key-value line:
///     high_score=42
///
/// A missing or unreadable file reads as "no score yet" (treated as 0).

use std::path::{Path, PathBuf};

// ══════════════════════════════════════════════════════════════
// Store trait
// ══════════════════════════════════════════════════════════════

pub trait HighScoreStore {
    /// Stored high score, if any.
    fn load(&self) -> Option<u32>;

    /// Persist a new high score.
    fn store(&mut self, score: u32) -> Result<(), String>;
}

// ══════════════════════════════════════════════════════════════
// In-memory
// ══════════════════════════════════════════════════════════════

#[cfg_attr(not(test), allow(dead_code))]
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    value: Option<u32>,
}

#[cfg_attr(not(test), allow(dead_code))]
impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore { value: None }
    }

    #[cfg(test)]
    pub fn with_score(score: u32) -> Self {
        MemoryStore { value: Some(score) }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Option<u32> {
        self.value
    }

    fn store(&mut self, score: u32) -> Result<(), String> {
        self.value = Some(score);
        Ok(())
    }
}

// ══════════════════════════════════════════════════════════════
// File-backed
// ══════════════════════════════════════════════════════════════

const SCORE_FILE: &str = "highscore.dat";

#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    /// `highscore.dat` in the first writable save directory.
    pub fn default_location() -> Self {
        FileStore::new(save_dir().join(SCORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileStore {
    fn load(&self) -> Option<u32> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        parse_score(&content)
    }

    fn store(&mut self, score: u32) -> Result<(), String> {
        std::fs::write(&self.path, serialize(score))
            .map_err(|e| format!("Saving high score to {} failed: {}", self.path.display(), e))
    }
}

// ══════════════════════════════════════════════════════════════
// Paths
// ══════════════════════════════════════════════════════════════

/// Where the high score and log live.
pub fn save_dir() -> PathBuf {
    // 1. Try exe directory (works for local/portable installs)
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            // Check if writable (system installs like /usr/games/ won't be)
            let test_path = parent.join(".write_test_namesnake");
            if std::fs::write(&test_path, "").is_ok() {
                let _ = std::fs::remove_file(&test_path);
                return parent.to_path_buf();
            }
        }
    }

    // 2. XDG data home for system installs
    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/namesnake");
        if std::fs::create_dir_all(&xdg).is_ok() {
            return xdg;
        }
    }

    // 3. Fallback to CWD
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

// ══════════════════════════════════════════════════════════════
// Serialization
// ══════════════════════════════════════════════════════════════

fn serialize(score: u32) -> String {
    format!("high_score={}\n", score)
}

fn parse_score(content: &str) -> Option<u32> {
    content
        .lines()
        .filter_map(|line| line.trim().strip_prefix("high_score="))
        .find_map(|val| val.trim().parse().ok())
}
