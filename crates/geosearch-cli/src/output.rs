//! Output formatting for search reports.
//!
//! Text output is meant for people; JSON output serialises the library's
//! [`RunReport`]s unchanged so it can be piped into other tools.

use std::io::{self, Write};

use clap::ValueEnum;
use geosearch_lib::RunReport;
use serde::Serialize;

use crate::terminal::ColorPalette;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    /// Render a single search report to stdout.
    pub fn render_report(self, report: &RunReport) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        match self {
            OutputFormat::Text => render_report_text(&mut stdout, report, &ColorPalette::detect()),
            OutputFormat::Json => render_json(&mut stdout, report),
        }
    }

    /// Render a comparison of several reports to stdout.
    pub fn render_comparison(self, reports: &[RunReport]) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        match self {
            OutputFormat::Text => {
                render_comparison_text(&mut stdout, reports, &ColorPalette::detect())
            }
            OutputFormat::Json => render_json(&mut stdout, &reports),
        }
    }

    /// Render the sorted list of location names to stdout.
    pub fn render_locations(self, names: &[&str]) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        match self {
            OutputFormat::Text => {
                for name in names {
                    writeln!(stdout, "{name}")?;
                }
                Ok(())
            }
            OutputFormat::Json => render_json(&mut stdout, &names),
        }
    }
}

/// Pretty-printed JSON followed by a newline.
pub fn render_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(io::Error::other)?;
    out.write_all(b"\n")
}

/// Human-friendly view of one search run.
pub fn render_report_text<W: Write>(
    out: &mut W,
    report: &RunReport,
    palette: &ColorPalette,
) -> io::Result<()> {
    let p = palette;
    match (&report.path, report.hops) {
        (Some(path), Some(hops)) => {
            writeln!(
                out,
                "Route from {}{}{} to {}{}{} ({} hops; algorithm: {}{}{}):",
                p.white_bold,
                report.start,
                p.reset,
                p.white_bold,
                report.goal,
                p.reset,
                hops,
                p.cyan,
                report.algorithm,
                p.reset
            )?;
            for name in path {
                writeln!(out, " - {name}")?;
            }
            writeln!(out)?;
            writeln!(
                out,
                "{}Total distance:{} {:.2} miles",
                p.gray,
                p.reset,
                report.total_distance_miles.unwrap_or_default()
            )?;
        }
        _ => {
            writeln!(
                out,
                "{}No route found{} between {} and {} (algorithm: {}{}{}).",
                p.red, p.reset, report.start, report.goal, p.cyan, report.algorithm, p.reset
            )?;
        }
    }

    writeln!(out, "{}Visited locations:{} {}", p.gray, p.reset, report.visited)?;
    writeln!(out, "{}Time:{} {:.4} s", p.gray, p.reset, report.elapsed_seconds)?;
    writeln!(
        out,
        "{}Memory:{} {:.2} MB",
        p.gray, p.reset, report.memory_delta_mb
    )
}

/// Table with one row per algorithm.
pub fn render_comparison_text<W: Write>(
    out: &mut W,
    reports: &[RunReport],
    palette: &ColorPalette,
) -> io::Result<()> {
    let p = palette;
    if let Some(first) = reports.first() {
        writeln!(
            out,
            "Comparing routes from {}{}{} to {}{}{}:",
            p.white_bold, first.start, p.reset, p.white_bold, first.goal, p.reset
        )?;
    }
    writeln!(
        out,
        "{}{:<8} {:>5} {:>14} {:>8} {:>10} {:>12}  Result{}",
        p.gray, "Algo", "Hops", "Distance (mi)", "Visited", "Time (s)", "Memory (MB)", p.reset
    )?;

    for report in reports {
        let hops = report
            .hops
            .map_or_else(|| "-".to_string(), |hops| hops.to_string());
        let distance = report
            .total_distance_miles
            .map_or_else(|| "-".to_string(), |miles| format!("{miles:.2}"));
        let outcome = match (&report.error, &report.path) {
            (Some(error), _) => format!("{}error: {error}{}", p.red, p.reset),
            (None, Some(path)) => format!("{}{}{}", p.green, path.join(" -> "), p.reset),
            (None, None) => format!("{}no route{}", p.red, p.reset),
        };
        writeln!(
            out,
            "{}{:<8}{} {:>5} {:>14} {:>8} {:>10.4} {:>12.2}  {}",
            p.cyan,
            report.algorithm.to_string(),
            p.reset,
            hops,
            distance,
            report.visited,
            report.elapsed_seconds,
            report.memory_delta_mb,
            outcome
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use geosearch_lib::SearchAlgorithm;

    use super::*;

    fn report(path: Option<&[&str]>) -> RunReport {
        RunReport {
            algorithm: SearchAlgorithm::AStar,
            start: "Salina".to_string(),
            goal: "Wichita".to_string(),
            path: path.map(|names| names.iter().map(|n| n.to_string()).collect()),
            hops: path.map(|names| names.len() - 1),
            visited: 3,
            total_distance_miles: path.map(|_| 85.739),
            elapsed_seconds: 0.000_123_4,
            memory_delta_mb: 0.0,
            error: None,
        }
    }

    fn render(report: &RunReport) -> String {
        let mut buf = Vec::new();
        render_report_text(&mut buf, report, &ColorPalette::plain()).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn text_report_lists_route_and_metrics() {
        let text = render(&report(Some(&["Salina", "McPherson", "Newton", "Wichita"])));
        assert!(text.starts_with("Route from Salina to Wichita (3 hops; algorithm: a-star):"));
        assert!(text.contains(" - McPherson\n"));
        assert!(text.contains("Total distance: 85.74 miles"));
        assert!(text.contains("Visited locations: 3"));
        assert!(text.contains("Time: 0.0001 s"));
        assert!(text.contains("Memory: 0.00 MB"));
    }

    #[test]
    fn text_report_without_route() {
        let text = render(&report(None));
        assert!(text.starts_with("No route found between Salina and Wichita"));
        assert!(!text.contains("Total distance"));
    }

    #[test]
    fn comparison_row_shows_errors() {
        let failed = RunReport::failed(
            SearchAlgorithm::Iddfs,
            "Salina",
            "Wichita",
            "iddfs search exceeded its depth limit of 2".to_string(),
        );
        let reports = vec![report(Some(&["Salina", "Wichita"])), failed];

        let mut buf = Vec::new();
        render_comparison_text(&mut buf, &reports, &ColorPalette::plain()).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Salina -> Wichita"));
        assert!(text.contains("error: iddfs search exceeded its depth limit of 2"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn json_output_is_pretty_and_terminated() {
        let mut buf = Vec::new();
        render_json(&mut buf, &report(None)).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\"algorithm\": \"a-star\""));
    }
}
