/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::cell::Field;
use crate::domain::layout::LayoutParams;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Display name spelled by the obstacles until the player enters another.
    pub name: String,
    pub grid: GridConfig,
    pub speed: SpeedConfig,
    pub gamepad: GamepadConfig,
}

/// Field geometry. Width/height are surface units, always a positive
/// multiple of `cell_size` after loading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridConfig {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
    pub name_row: i32,       // in cells
    pub letter_spacing: i32, // in cells
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpeedConfig {
    pub initial_ms: u64,
    pub decrement_ms: u64,
    pub floor_ms: u64,
    pub ramp_every: u32, // 0 disables the ramp
}

#[derive(Clone, Debug)]
pub struct GamepadConfig {
    pub confirm: Vec<String>,
    pub cancel: Vec<String>,
}

impl GridConfig {
    pub fn field(&self) -> Field {
        Field::new(self.width, self.height, self.cell_size)
    }

    pub fn layout(&self) -> LayoutParams {
        LayoutParams {
            field: self.field(),
            name_row: self.name_row,
            letter_spacing: self.letter_spacing * self.cell_size,
        }
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    general: TomlGeneral,
    #[serde(default)]
    grid: TomlGrid,
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    gamepad: TomlGamepad,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_name")]
    name: String,
}

#[derive(Deserialize, Debug)]
struct TomlGrid {
    #[serde(default = "default_width")]
    width: i32,
    #[serde(default = "default_height")]
    height: i32,
    #[serde(default = "default_cell_size")]
    cell_size: i32,
    #[serde(default = "default_name_row")]
    name_row: i32,
    #[serde(default = "default_letter_spacing")]
    letter_spacing: i32,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_initial")]
    initial_ms: u64,
    #[serde(default = "default_decrement")]
    decrement_ms: u64,
    #[serde(default = "default_floor")]
    floor_ms: u64,
    #[serde(default = "default_ramp_every")]
    ramp_every: u32,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_confirm")]
    confirm: Vec<String>,
    #[serde(default = "default_cancel")]
    cancel: Vec<String>,
}

// ── Defaults ──

fn default_name() -> String { "Jime".into() }

fn default_width() -> i32 { 600 }
fn default_height() -> i32 { 400 }
fn default_cell_size() -> i32 { 20 }
fn default_name_row() -> i32 { 5 }
fn default_letter_spacing() -> i32 { 2 }

fn default_initial() -> u64 { 200 }
fn default_decrement() -> u64 { 10 }
fn default_floor() -> u64 { 50 }
fn default_ramp_every() -> u32 { 5 }

fn default_confirm() -> Vec<String> { vec!["Start".into(), "A".into()] }
fn default_cancel() -> Vec<String> { vec!["Select".into()] }

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral { name: default_name() }
    }
}

impl Default for TomlGrid {
    fn default() -> Self {
        TomlGrid {
            width: default_width(),
            height: default_height(),
            cell_size: default_cell_size(),
            name_row: default_name_row(),
            letter_spacing: default_letter_spacing(),
        }
    }
}

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed {
            initial_ms: default_initial(),
            decrement_ms: default_decrement(),
            floor_ms: default_floor(),
            ramp_every: default_ramp_every(),
        }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad {
            confirm: default_confirm(),
            cancel: default_cancel(),
        }
    }
}

// ── Loading ──

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::from_toml(TomlConfig::default())
    }
}

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory,
    /// (3) ~/.local/share/namesnake, (4) /usr/share/namesnake.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        load_from(&candidate_dirs())
    }

    /// Parse config text directly. Missing keys take their defaults.
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<TomlConfig>(text).map(GameConfig::from_toml)
    }

    fn from_toml(t: TomlConfig) -> Self {
        let cell_size = t.grid.cell_size.max(1);
        let name = {
            let trimmed = t.general.name.trim();
            if trimmed.is_empty() { default_name() } else { trimmed.to_string() }
        };

        GameConfig {
            name,
            grid: GridConfig {
                width: snap_to_cells(t.grid.width, cell_size),
                height: snap_to_cells(t.grid.height, cell_size),
                cell_size,
                name_row: t.grid.name_row.max(0),
                letter_spacing: t.grid.letter_spacing.max(0),
            },
            speed: SpeedConfig {
                initial_ms: t.speed.initial_ms.max(1),
                decrement_ms: t.speed.decrement_ms,
                floor_ms: t.speed.floor_ms.max(1),
                ramp_every: t.speed.ramp_every,
            },
            gamepad: GamepadConfig {
                confirm: t.gamepad.confirm,
                cancel: t.gamepad.cancel,
            },
        }
    }
}

/// Fewest columns and rows a field may have; the start snake sits at (9, 9).
const MIN_CELLS: i32 = 10;

/// Round down to a whole number of cells, at least `MIN_CELLS`.
fn snap_to_cells(len: i32, cell_size: i32) -> i32 {
    (len / cell_size).max(MIN_CELLS) * cell_size
}

/// Candidate directories to search: exe dir + CWD + data paths (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. XDG data home
    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/namesnake");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    // 4. System data directory
    let sys = PathBuf::from("/usr/share/namesnake");
    if sys.is_dir() && !dirs.iter().any(|d| d == &sys) {
        dirs.push(sys);
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories. The first readable file
/// wins; a parse error there means defaults, not the next candidate.
fn load_from(search_dirs: &[PathBuf]) -> GameConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if !path.exists() {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(text) => match GameConfig::parse(&text) {
                Ok(cfg) => {
                    crate::log!("config loaded from {}", path.display());
                    return cfg;
                }
                Err(e) => {
                    crate::log!("config.toml parse error: {e}; using default settings");
                    return GameConfig::default();
                }
            },
            Err(e) => {
                crate::log!("could not read {}: {e}", path.display());
            }
        }
    }
    GameConfig::default()
}
