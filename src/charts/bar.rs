//! Grouped bar chart: mean score per body part, one bar per semester

use serde_json::{json, Value};

use super::{bar_color, ChartPanel};
use crate::metrics::SemesterMeans;
use crate::model::BodyPart;

pub const TITLE: &str = "💪 부위별 균형도 변화";

/// Insight line for the largest improvement between semesters
pub fn improvement_insight(means: &SemesterMeans) -> Option<String> {
    means.most_improved().map(|imp| {
        format!("💡 가장 개선된 부위: {} ({:+.1}점)", imp.part, imp.delta)
    })
}

pub fn build(means: &SemesterMeans) -> ChartPanel {
    let traces: Vec<Value> = means
        .semesters()
        .into_iter()
        .filter_map(|semester| {
            let y = means.series(semester)?;
            Some(json!({
                "type": "bar",
                "name": semester.label(),
                "x": BodyPart::labels(),
                "y": y,
                "marker": { "color": bar_color(semester) },
            }))
        })
        .collect();

    let figure = json!({
        "data": traces,
        "layout": {
            "barmode": "group",
            "margin": { "t": 30, "b": 0, "l": 30, "r": 30 },
        },
    });

    ChartPanel {
        id: "bar",
        title: TITLE,
        figure: Some(figure),
        insight: improvement_insight(means),
        empty_message: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::semester_means;
    use polars::prelude::*;

    fn means() -> SemesterMeans {
        let df = df![
            "학기" => &["1학기", "2학기"],
            "목" => &[60.0, 62.0],
            "어깨" => &[70.0, 69.0],
            "허리" => &[50.0, 58.5],
            "엉덩" => &[40.0, 40.0],
            "무릎" => &[80.0, 81.0],
            "발목" => &[90.0, 90.5],
        ].unwrap();
        semester_means(&df).unwrap()
    }

    #[test]
    fn test_bar_traces() {
        let panel = build(&means());
        let figure = panel.figure.unwrap();

        let data = figure["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["name"], "1학기");
        assert_eq!(data[0]["marker"]["color"], "#A4C3E6");
        assert_eq!(data[1]["marker"]["color"], "#3B82F6");
        assert_eq!(data[1]["x"][2], "허리");
        assert_eq!(data[1]["y"][2], 58.5);
        assert_eq!(figure["layout"]["barmode"], "group");
    }

    #[test]
    fn test_improvement_insight() {
        assert_eq!(
            improvement_insight(&means()).unwrap(),
            "💡 가장 개선된 부위: 허리 (+8.5점)"
        );
    }

    #[test]
    fn test_no_insight_with_single_semester() {
        let panel = build(&SemesterMeans::default());
        assert!(panel.insight.is_none());
        assert_eq!(panel.figure.unwrap()["data"].as_array().unwrap().len(), 0);
    }
}
