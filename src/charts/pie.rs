//! Paired pie charts: posture type distribution per semester

use serde_json::{json, Value};

use super::ChartPanel;
use crate::metrics::PostureDistribution;
use crate::model::Semester;

pub const TITLE: &str = "🚨 학기별 위험군 분포 비교";
pub const INSIGHT: &str = "💡 2% 미만 유형은 '기타'로 통합되었습니다.";

/// Horizontal centre of each subplot domain in a 1×2 grid
fn subplot_center(column: usize) -> f64 {
    if column == 0 { 0.225 } else { 0.775 }
}

/// Distributions in semester order; empty semesters draw nothing
pub fn build(distributions: &[(Semester, PostureDistribution)]) -> ChartPanel {
    let traces: Vec<Value> = distributions
        .iter()
        .enumerate()
        .filter(|(_, (_, dist))| !dist.is_empty())
        .map(|(column, (semester, dist))| {
            json!({
                "type": "pie",
                "name": semester.label(),
                "labels": dist.labels(),
                "values": dist.counts(),
                "hole": 0.4,
                "domain": { "row": 0, "column": column },
            })
        })
        .collect();

    let titles: Vec<Value> = distributions
        .iter()
        .enumerate()
        .map(|(column, (semester, _))| {
            json!({
                "text": semester.label(),
                "x": subplot_center(column),
                "y": 1.0,
                "xref": "paper",
                "yref": "paper",
                "xanchor": "center",
                "yanchor": "bottom",
                "showarrow": false,
            })
        })
        .collect();

    let figure = json!({
        "data": traces,
        "layout": {
            "grid": { "rows": 1, "columns": 2 },
            "annotations": titles,
            "showlegend": false,
            "margin": { "t": 50, "b": 0, "l": 0, "r": 0 },
        },
    });

    ChartPanel {
        id: "pie",
        title: TITLE,
        figure: Some(figure),
        insight: Some(INSIGHT.to_string()),
        empty_message: None,
    }
}
