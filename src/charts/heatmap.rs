//! Correlation heatmap for the second semester

use serde_json::json;

use super::ChartPanel;
use crate::metrics::CorrelationMatrix;

pub const TITLE: &str = "🔗 신체 부위별 연관성 (2학기)";
pub const INSIGHT: &str = "💡 수치가 1에 가까울수록 두 부위의 불균형이 연동될 가능성이 높습니다.";
pub const NO_DATA: &str = "2학기 데이터가 없습니다.";

pub fn build(matrix: Option<&CorrelationMatrix>) -> ChartPanel {
    let Some(matrix) = matrix else {
        return ChartPanel {
            id: "heatmap",
            title: TITLE,
            figure: None,
            insight: None,
            empty_message: Some(NO_DATA.to_string()),
        };
    };

    let figure = json!({
        "data": [{
            "type": "heatmap",
            "z": matrix.values,
            "x": matrix.labels,
            "y": matrix.labels,
            "colorscale": "Blues",
            "texttemplate": "%{z:.2f}",
            "hovertemplate": "%{x} · %{y}: %{z:.2f}<extra></extra>",
        }],
        "layout": {
            "xaxis": { "side": "bottom" },
            "yaxis": { "autorange": "reversed" },
            "margin": { "t": 30, "b": 0, "l": 0, "r": 0 },
        },
    });

    ChartPanel {
        id: "heatmap",
        title: TITLE,
        figure: Some(figure),
        insight: Some(INSIGHT.to_string()),
        empty_message: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heatmap_without_data() {
        let panel = build(None);
        assert!(!panel.has_figure());
        assert_eq!(panel.empty_message.as_deref(), Some(NO_DATA));
        assert!(panel.insight.is_none());
    }

    #[test]
    fn test_heatmap_cells() {
        let matrix = CorrelationMatrix {
            labels: vec!["목".to_string(), "어깨".to_string()],
            values: vec![vec![Some(1.0), Some(0.25)], vec![Some(0.25), None]],
        };
        let figure = build(Some(&matrix)).figure.unwrap();

        assert_eq!(figure["data"][0]["z"][0][1], 0.25);
        assert!(figure["data"][0]["z"][1][1].is_null());
        assert_eq!(figure["data"][0]["colorscale"], "Blues");
        assert_eq!(figure["data"][0]["texttemplate"], "%{z:.2f}");
    }
}
