//! Radar chart: whole-body balance per semester

use serde_json::{json, Value};

use super::{radar_color, ChartPanel};
use crate::metrics::SemesterMeans;
use crate::model::BodyPart;

pub const TITLE: &str = "🕸️ 전신 균형 밸런스";
pub const INSIGHT: &str = "💡 도형의 면적이 넓을수록 전반적인 체형 균형이 우수함을 나타냅니다.";

pub fn build(means: &SemesterMeans) -> ChartPanel {
    let traces: Vec<Value> = means
        .semesters()
        .into_iter()
        .filter_map(|semester| {
            let r = means.series(semester)?;
            let color = radar_color(semester);
            Some(json!({
                "type": "scatterpolar",
                "r": r,
                "theta": BodyPart::labels(),
                "fill": "toself",
                "name": semester.label(),
                "fillcolor": color,
                "line": { "color": color },
            }))
        })
        .collect();

    let figure = json!({
        "data": traces,
        "layout": {
            "polar": { "radialaxis": { "visible": true, "range": [0, 100] } },
            "margin": { "t": 40, "b": 40, "l": 40, "r": 40 },
        },
    });

    ChartPanel {
        id: "radar",
        title: TITLE,
        figure: Some(figure),
        insight: Some(INSIGHT.to_string()),
        empty_message: None,
    }
}
