//! Plain-text rendering of the dashboard view

use application::{CurrentSection, DashboardView, OutlookSection};
use domain::Region;

/// Render one dashboard as terminal text
pub fn dashboard(view: &DashboardView) -> String {
    let mut out = format!("🌍 {}  ·  {}\n\n", view.region, view.local_time);
    out.push_str(&current(&view.current));
    out.push('\n');
    out.push_str(&outlook(&view.outlook));
    out
}

fn current(section: &CurrentSection) -> String {
    match section {
        CurrentSection::Available {
            metrics,
            rainfall_notice,
            condition,
            marker,
        } => {
            let mut out = String::from("Current weather\n");
            for metric in metrics {
                out.push_str(&format!("  {:<12} {}\n", metric.label, metric.value));
            }
            out.push_str(&format!(
                "  {:<12} {} {}\n",
                "Condition", condition.icon, condition.description
            ));
            if let Some(notice) = rainfall_notice {
                out.push_str(&format!("  💧 {notice}\n"));
            }
            out.push_str(&format!(
                "\n📍 Marker ({}) at {:.4}, {:.4}: {}\n",
                marker.color, marker.latitude, marker.longitude, marker.tooltip
            ));
            for line in &marker.popup {
                out.push_str(&format!("   {line}\n"));
            }
            out
        },
        CurrentSection::Unavailable { message, no_data } => {
            if *no_data {
                format!("Current weather: no data available ({message})\n")
            } else {
                format!("❌ Current weather unavailable: {message}\n")
            }
        },
    }
}

fn outlook(section: &OutlookSection) -> String {
    match section {
        OutlookSection::Available { days } if days.is_empty() => {
            "Outlook: no data available\n".to_string()
        },
        OutlookSection::Available { days } => {
            let mut out = format!("{}-day outlook\n", days.len());
            for day in days {
                out.push_str(&format!(
                    "  {} {}  {} {:>7}  {}\n",
                    day.date, day.time, day.icon, day.temperature, day.description
                ));
            }
            out
        },
        OutlookSection::Unavailable { message, no_data } => {
            if *no_data {
                format!("Outlook: no data available ({message})\n")
            } else {
                format!("❌ Forecast unavailable: {message}\n")
            }
        },
    }
}

/// Render the region catalog as a table
pub fn regions(regions: &[Region]) -> String {
    let mut out = format!(
        "{:<6} {:<12} {:>9} {:>10} {:>4} {:>4}\n",
        "Name", "English", "Lat", "Lon", "nx", "ny"
    );
    for region in regions {
        let location = region.location();
        let grid = region.grid();
        out.push_str(&format!(
            "{:<6} {:<12} {:>9.4} {:>10.4} {:>4} {:>4}\n",
            region.name(),
            region.english_name(),
            location.latitude(),
            location.longitude(),
            grid.nx(),
            grid.ny()
        ));
    }
    out
}
