use posture_dashboard::dashboard::DashboardView;
use posture_dashboard::filter::FilterSelection;
use posture_dashboard::{DashboardConfig, SurveyData};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "posture_dashboard=info,warn".into()),
        )
        .init();

    let config = DashboardConfig::from_env();
    let data = SurveyData::load(&config)?;

    println!("\n=== NORMALIZED SURVEY TABLE ===\n");
    println!("Rows: {} ({} sentinel rows dropped)", data.height(), data.dropped_sentinels());
    for (semester, rows) in data.semester_counts() {
        println!("  {}: {}", semester, rows);
    }
    println!("{}", data.frame().head(Some(5)));

    let level = std::env::args().nth(1);
    let grade = std::env::args().nth(2);
    let selection = FilterSelection::resolve(data.frame(), level.as_deref(), grade.as_deref())?;
    let view = DashboardView::build(&data, &selection)?;

    println!("\n=== {} / {} ({} rows) ===\n", view.level, view.grade, view.rows);
    println!("Grade options: {:?}", view.grade_options);

    match view.most_improved {
        Some(imp) => println!("Most improved: {} ({:+.1})", imp.part, imp.delta),
        None => println!("Most improved: n/a (needs both semesters)"),
    }

    for dist in &view.distributions {
        println!("\n{} posture types (n = {}):", dist.semester, dist.distribution.total);
        for category in &dist.distribution.categories {
            println!("  {:<20} {}", category.label, category.count);
        }
    }

    if let Some(corr) = &view.correlation {
        println!("\n2학기 correlation:");
        println!("      {}", corr.labels.join("    "));
        for (label, row) in corr.labels.iter().zip(&corr.values) {
            let cells: Vec<String> = row
                .iter()
                .map(|v| v.map_or("  -  ".to_string(), |r| format!("{:>5.2}", r)))
                .collect();
            println!("{:<4} {}", label, cells.join(" "));
        }
    }

    Ok(())
}
