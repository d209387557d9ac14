// Page rendering for the dashboard with Askama

use askama::Template;
use axum::response::{Html, IntoResponse, Response};

use crate::dashboard::DashboardView;
use crate::data::LoadError;

pub const PAGE_TITLE: &str = "학생 체형 분석 대시보드";
pub const HEADING: &str = "📊 학생 체형 분석 통합 대시보드";
pub const MISSING_DATA_WARNING: &str =
    "데이터 파일을 찾을 수 없습니다. 데이터 디렉터리에 CSV 파일이 있는지 확인해주세요.";

/// Banner shown instead of (or above) the dashboard
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageStatus {
    pub warning: Option<String>,
    pub error: Option<String>,
}

impl PageStatus {
    pub fn missing_data() -> Self {
        Self {
            warning: Some(MISSING_DATA_WARNING.to_string()),
            error: None,
        }
    }

    pub fn load_failed(err: &LoadError) -> Self {
        Self {
            warning: Some(MISSING_DATA_WARNING.to_string()),
            error: Some(format!("데이터 로딩 중 오류 발생: {}", err)),
        }
    }

    pub fn render_failed(message: &str) -> Self {
        Self {
            warning: None,
            error: Some(format!("대시보드 계산 중 오류 발생: {}", message)),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.warning.is_none() && self.error.is_none()
    }
}

// ============================================================================
// Dashboard Page
// ============================================================================

#[derive(Template)]
#[template(path = "pages/dashboard.html")]
pub struct DashboardPageTemplate<'a> {
    pub title: &'a str,
    pub heading: &'a str,
    pub status: PageStatus,
    pub view: Option<&'a DashboardView>,
}

/// Body only, swapped in by htmx when a filter changes
#[derive(Template)]
#[template(path = "partials/dashboard_body.html")]
pub struct DashboardBodyTemplate<'a> {
    pub heading: &'a str,
    pub status: PageStatus,
    pub view: Option<&'a DashboardView>,
}

pub fn render_body(view: Option<&DashboardView>, status: PageStatus, is_htmx: bool) -> Response {
    let rendered = if is_htmx {
        DashboardBodyTemplate { heading: HEADING, status, view }.render()
    } else {
        DashboardPageTemplate { title: PAGE_TITLE, heading: HEADING, status, view }.render()
    };

    Html(rendered.unwrap_or_else(|e| {
        format!("Template error: {}", e)
    })).into_response()
}
