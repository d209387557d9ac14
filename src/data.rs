//! Data Loading and Normalization
//!
//! Loads the two semester CSV files with Polars and produces one normalized
//! survey table:
//! - every row tagged with its semester (`학기`)
//! - the six body-part columns coerced to Float64 (invalid cells → null)
//! - standardized grade (`표준학년`) and school level (`학교급`) derived
//!   from the free-text school and grade columns
//! - header leftovers and stringified nulls in the posture type column dropped

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::DashboardConfig;
use crate::model::{
    BodyPart, Semester, GRADE_COL, POSTURE_TYPE_COL, SCHOOL_COL, SCHOOL_LEVEL_COL,
    SEMESTER_COL, STANDARD_GRADE_COL,
};
use crate::utils::{is_posture_sentinel, parse_score, standardize_grade, CSV_NULL_TOKENS};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data files not found: {}", display_paths(.0))]
    MissingFiles(Vec<PathBuf>),

    #[error("failed to read {path}: {source}", path = .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("{path} is missing required column '{column}'", path = .path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

impl LoadError {
    /// Missing input files are reported as a warning rather than a failure
    pub fn is_missing_files(&self) -> bool {
        matches!(self, LoadError::MissingFiles(_))
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Normalized survey table for both semesters
#[derive(Debug, Clone)]
pub struct SurveyData {
    frame: DataFrame,
    dropped_sentinels: usize,
}

impl SurveyData {
    /// Load and normalize both semester files named by `config`
    pub fn load(config: &DashboardConfig) -> Result<Self, LoadError> {
        let paths: Vec<(Semester, PathBuf)> = Semester::ALL
            .into_iter()
            .map(|s| (s, config.semester_path(s)))
            .collect();

        let missing: Vec<PathBuf> = paths
            .iter()
            .filter(|(_, p)| !p.exists())
            .map(|(_, p)| p.clone())
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::MissingFiles(missing));
        }

        let first = read_semester_csv(&paths[0].1)?;
        let second = read_semester_csv(&paths[1].1)?;

        Self::from_sources(
            (first, paths[0].1.as_path()),
            (second, paths[1].1.as_path()),
        )
    }

    /// Build the normalized table from raw in-memory frames
    ///
    /// Columns of any dtype are accepted; everything is read back as text
    /// before coercion, matching what the CSV path sees.
    pub fn from_frames(first: DataFrame, second: DataFrame) -> Result<Self, LoadError> {
        Self::from_sources(
            (first, Path::new("<semester 1>")),
            (second, Path::new("<semester 2>")),
        )
    }

    fn from_sources(first: (DataFrame, &Path), second: (DataFrame, &Path)) -> Result<Self, LoadError> {
        let (mut frame, dropped_first) = normalize_semester(&first.0, Semester::First, first.1)?;
        let (frame_second, dropped_second) = normalize_semester(&second.0, Semester::Second, second.1)?;
        frame.vstack_mut(&frame_second)?;

        let data = SurveyData {
            frame,
            dropped_sentinels: dropped_first + dropped_second,
        };

        for (semester, rows) in data.semester_counts() {
            tracing::info!("  {}: {} rows", semester, rows);
        }
        tracing::info!(
            "Normalized survey table: {} rows ({} sentinel rows dropped)",
            data.height(),
            data.dropped_sentinels
        );

        Ok(data)
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Rows removed because their posture type was a sentinel
    pub fn dropped_sentinels(&self) -> usize {
        self.dropped_sentinels
    }

    /// Row count per semester, in semester order
    pub fn semester_counts(&self) -> Vec<(Semester, usize)> {
        let Some(labels) = self.frame.column(SEMESTER_COL).ok().and_then(|c| c.str().ok()) else {
            return Vec::new();
        };

        Semester::ALL
            .into_iter()
            .map(|s| {
                let n = labels.into_iter().filter(|l| *l == Some(s.label())).count();
                (s, n)
            })
            .collect()
    }
}

/// Read one semester file with every column as String
fn read_semester_csv(path: &Path) -> Result<DataFrame, LoadError> {
    tracing::info!("Loading {}", path.display());

    let parse_options = CsvParseOptions::default().with_null_values(Some(NullValues::AllColumns(
        CSV_NULL_TOKENS.iter().map(|t| PlSmallStr::from(*t)).collect(),
    )));

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(parse_options)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|source| LoadError::Read { path: path.to_path_buf(), source })?;

    // Spreadsheet exports often prefix the first header with a BOM
    let first_name = df.get_column_names().first().map(|n| n.to_string());
    if let Some(name) = first_name {
        if let Some(stripped) = name.strip_prefix('\u{feff}') {
            df.rename(&name, stripped.into())?;
        }
    }

    Ok(df)
}

/// Text view of a required column
fn text_column(raw: &DataFrame, name: &str, path: &Path) -> Result<StringChunked, LoadError> {
    let column = raw.column(name).map_err(|_| LoadError::MissingColumn {
        path: path.to_path_buf(),
        column: name.to_string(),
    })?;
    let as_text = column.cast(&DataType::String)?;
    Ok(as_text.str()?.clone())
}

/// Normalize one raw semester frame; returns the frame and the number of
/// sentinel rows dropped
fn normalize_semester(
    raw: &DataFrame,
    semester: Semester,
    path: &Path,
) -> Result<(DataFrame, usize), LoadError> {
    let schools = text_column(raw, SCHOOL_COL, path)?;
    let grades = text_column(raw, GRADE_COL, path)?;
    let postures = text_column(raw, POSTURE_TYPE_COL, path)?;
    let part_columns = BodyPart::ALL
        .iter()
        .map(|p| text_column(raw, p.label(), path))
        .collect::<Result<Vec<_>, _>>()?;

    let n = raw.height();
    let mut kept_schools: Vec<Option<String>> = Vec::with_capacity(n);
    let mut kept_grades: Vec<Option<String>> = Vec::with_capacity(n);
    let mut kept_postures: Vec<Option<String>> = Vec::with_capacity(n);
    let mut kept_scores: Vec<Vec<Option<f64>>> = vec![Vec::with_capacity(n); BodyPart::ALL.len()];
    let mut standard_grades: Vec<String> = Vec::with_capacity(n);
    let mut levels: Vec<&'static str> = Vec::with_capacity(n);
    let mut dropped = 0usize;

    for idx in 0..n {
        let posture = postures.get(idx);
        if posture.is_some_and(is_posture_sentinel) {
            dropped += 1;
            continue;
        }

        let school = schools.get(idx);
        let grade = grades.get(idx);
        let (standard, level) = standardize_grade(school.unwrap_or(""), grade.unwrap_or(""));

        kept_schools.push(school.map(str::to_string));
        kept_grades.push(grade.map(str::to_string));
        kept_postures.push(posture.map(str::to_string));
        for (scores, column) in kept_scores.iter_mut().zip(&part_columns) {
            scores.push(column.get(idx).and_then(parse_score));
        }
        standard_grades.push(standard);
        levels.push(level.label());
    }

    let kept = standard_grades.len();
    let mut columns: Vec<Column> = vec![
        Series::new(SEMESTER_COL.into(), vec![semester.label(); kept]).into(),
        Series::new(SCHOOL_COL.into(), kept_schools).into(),
        Series::new(GRADE_COL.into(), kept_grades).into(),
        Series::new(POSTURE_TYPE_COL.into(), kept_postures).into(),
    ];
    for (part, scores) in BodyPart::ALL.iter().zip(kept_scores) {
        columns.push(Series::new(part.label().into(), scores).into());
    }
    columns.push(Series::new(STANDARD_GRADE_COL.into(), standard_grades).into());
    columns.push(Series::new(SCHOOL_LEVEL_COL.into(), levels).into());

    if dropped > 0 {
        tracing::debug!("{}: dropped {} sentinel rows from {}", semester, dropped, path.display());
    }

    Ok((DataFrame::new(columns)?, dropped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{posture_distribution, LONG_TAIL_THRESHOLD};
    use std::fs;

    fn raw_semester(rows: &[(&str, &str, &str, &str)]) -> DataFrame {
        // (school, grade, posture type, neck score); other parts fixed
        let schools: Vec<&str> = rows.iter().map(|r| r.0).collect();
        let grades: Vec<&str> = rows.iter().map(|r| r.1).collect();
        let postures: Vec<&str> = rows.iter().map(|r| r.2).collect();
        let neck: Vec<&str> = rows.iter().map(|r| r.3).collect();
        let fixed: Vec<&str> = vec!["70"; rows.len()];
        df![
            "학교" => schools,
            "학년" => grades,
            "자세 세부 유형" => postures,
            "목" => neck,
            "어깨" => fixed.clone(),
            "허리" => fixed.clone(),
            "엉덩" => fixed.clone(),
            "무릎" => fixed.clone(),
            "발목" => fixed,
        ].unwrap()
    }

    #[test]
    fn test_normalization_tags_and_derives() {
        let first = raw_semester(&[
            ("서울중학교", "2학년", "거북목형", "81"),
            ("한빛초등학교", "5", "정상", "abc"),
        ]);
        let second = raw_semester(&[("부산고등학교", "1", "거북목형", "90.5")]);

        let data = SurveyData::from_frames(first, second).unwrap();
        let df = data.frame();

        assert_eq!(df.height(), 3);
        let semesters: Vec<Option<&str>> = df.column("학기").unwrap().str().unwrap().into_iter().collect();
        assert_eq!(semesters, vec![Some("1학기"), Some("1학기"), Some("2학기")]);

        let grades: Vec<Option<&str>> = df.column("표준학년").unwrap().str().unwrap().into_iter().collect();
        assert_eq!(grades, vec![Some("중등 2학년"), Some("초등 5학년"), Some("고등 1학년")]);

        let levels: Vec<Option<&str>> = df.column("학교급").unwrap().str().unwrap().into_iter().collect();
        assert_eq!(levels, vec![Some("중등"), Some("초등"), Some("고등")]);

        let neck: Vec<Option<f64>> = df.column("목").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(neck, vec![Some(81.0), None, Some(90.5)]);
    }

    #[test]
    fn test_sentinel_rows_dropped() {
        let first = raw_semester(&[
            ("서울중학교", "2", "자세 세부 유형", "0"),
            ("서울중학교", "2", "nan", "0"),
            ("서울중학교", "2", "None", "0"),
            ("서울중학교", "2", "골반틀어짐형", "64"),
        ]);
        let second = raw_semester(&[]);

        let data = SurveyData::from_frames(first, second).unwrap();
        assert_eq!(data.height(), 1);
        assert_eq!(data.dropped_sentinels(), 3);
        assert_eq!(data.semester_counts(), vec![(Semester::First, 1), (Semester::Second, 0)]);
    }

    #[test]
    fn test_null_posture_type_is_kept() {
        let first = df![
            "학교" => &["서울중학교"],
            "학년" => &["1"],
            "자세 세부 유형" => &[None::<&str>],
            "목" => &["50"],
            "어깨" => &["50"],
            "허리" => &["50"],
            "엉덩" => &["50"],
            "무릎" => &["50"],
            "발목" => &["50"],
        ].unwrap();

        let data = SurveyData::from_frames(first, raw_semester(&[])).unwrap();
        assert_eq!(data.height(), 1);
    }

    #[test]
    fn test_numeric_input_columns_are_accepted() {
        let first = df![
            "학교" => &["서울중학교"],
            "학년" => &[3.0],
            "자세 세부 유형" => &["정상"],
            "목" => &[77i64],
            "어깨" => &[70.5],
            "허리" => &[70.0],
            "엉덩" => &[70.0],
            "무릎" => &[70.0],
            "발목" => &[70.0],
        ].unwrap();

        let data = SurveyData::from_frames(first, raw_semester(&[])).unwrap();
        let df = data.frame();
        assert_eq!(df.column("표준학년").unwrap().str().unwrap().get(0), Some("중등 3학년"));
        assert_eq!(df.column("목").unwrap().f64().unwrap().get(0), Some(77.0));
        assert_eq!(df.column("어깨").unwrap().f64().unwrap().get(0), Some(70.5));
    }

    #[test]
    fn test_missing_column_is_reported() {
        let bad = df![
            "학교" => &["서울중학교"],
            "학년" => &["1"],
        ].unwrap();

        let err = SurveyData::from_frames(bad, raw_semester(&[])).unwrap_err();
        match err {
            LoadError::MissingColumn { column, .. } => assert_eq!(column, "자세 세부 유형"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_files() {
        let config = DashboardConfig::with_data_dir("/nonexistent/posture-data");
        let err = SurveyData::load(&config).unwrap_err();
        assert!(err.is_missing_files());
        match err {
            LoadError::MissingFiles(paths) => assert_eq!(paths.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_csv_null_tokens_are_not_categories() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = DashboardConfig::with_data_dir(dir.path());
        let header = "학교,학년,자세 세부 유형,목,어깨,허리,엉덩,무릎,발목";

        let mut first = vec![header.to_string()];
        first.extend((0..10).map(|_| "서울중학교,1,정상,70,70,70,70,70,70".to_string()));
        for token in ["NA", "NaN", "null", "N/A", "nan"] {
            first.push(format!("서울중학교,1,{},60,60,60,60,60,60", token));
        }
        fs::write(config.semester_path(Semester::First), first.join("\n") + "\n").unwrap();
        let second = format!("{}\n서울중학교,1,정상,72,72,72,72,72,72\n", header);
        fs::write(config.semester_path(Semester::Second), second).unwrap();

        let data = SurveyData::load(&config).unwrap();
        // Null-like cells are kept as nulls; only the literal "nan" is dropped
        assert_eq!(data.height(), 15);
        assert_eq!(data.dropped_sentinels(), 1);

        let dist = posture_distribution(data.frame(), Semester::First, LONG_TAIL_THRESHOLD).unwrap();
        assert_eq!(dist.labels(), vec!["정상"]);
        assert_eq!(dist.total, 10);
    }
}
