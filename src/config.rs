//! Runtime configuration from environment variables
//!
//! - `DATA_DIR`: directory holding the semester CSV files (default: `.`)
//! - `SEMESTER1_FILE` / `SEMESTER2_FILE`: file names inside `DATA_DIR`
//! - `PORT`: HTTP port for the dashboard server (default: 3000)

use std::path::{Path, PathBuf};

use crate::model::Semester;

pub const DEFAULT_SEMESTER1_FILE: &str = "school_data_1학기_cleaned.csv";
pub const DEFAULT_SEMESTER2_FILE: &str = "school_data_2학기_cleaned.csv";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    pub semester1_file: String,
    pub semester2_file: String,
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            semester1_file: DEFAULT_SEMESTER1_FILE.to_string(),
            semester2_file: DEFAULT_SEMESTER2_FILE.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let data_dir = std::env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let semester1_file = std::env::var("SEMESTER1_FILE")
            .unwrap_or(defaults.semester1_file);

        let semester2_file = std::env::var("SEMESTER2_FILE")
            .unwrap_or(defaults.semester2_file);

        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        Self { data_dir, semester1_file, semester2_file, port }
    }

    /// Config reading the default file names from `dir`
    pub fn with_data_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn semester_path(&self, semester: Semester) -> PathBuf {
        let file = match semester {
            Semester::First => &self.semester1_file,
            Semester::Second => &self.semester2_file,
        };
        self.data_dir.join(file)
    }
}
