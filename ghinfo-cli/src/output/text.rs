//! Text output formatting: rounded box tables with optional colors.

use ghinfo_core::{Report, ReportStatus};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

// ============================================================================
// Box Table
// ============================================================================

/// Cell alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// Minimal rounded-corner table.
struct BoxTable {
    header: Vec<String>,
    align: Vec<Align>,
    rows: Vec<Vec<String>>,
    footer: Vec<String>,
}

impl BoxTable {
    fn new(header: &[&str], align: &[Align]) -> Self {
        Self {
            header: header.iter().map(|h| (*h).to_string()).collect(),
            align: align.to_vec(),
            rows: Vec::new(),
            footer: Vec::new(),
        }
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.header.iter().map(|h| h.chars().count()).collect();
        for row in self.rows.iter().chain(std::iter::once(&self.footer)) {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }

    fn rule(widths: &[usize], left: char, mid: char, right: char) -> String {
        let inner: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{left}{}{right}", inner.join(&mid.to_string()))
    }

    fn line(&self, widths: &[usize], cells: &[String], align_all_left: bool) -> String {
        let cells: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, &width)| {
                let cell = cells.get(i).map_or("", String::as_str);
                let pad = width.saturating_sub(cell.chars().count());
                match self.align[i] {
                    Align::Right if !align_all_left => format!(" {}{cell} ", " ".repeat(pad)),
                    _ => format!(" {cell}{} ", " ".repeat(pad)),
                }
            })
            .collect();
        format!("│{}│", cells.join("│"))
    }

    fn render(&self) -> String {
        let widths = self.widths();
        let mut lines = vec![
            Self::rule(&widths, '╭', '┬', '╮'),
            self.line(&widths, &self.header, true),
            Self::rule(&widths, '├', '┼', '┤'),
        ];
        for row in &self.rows {
            lines.push(self.line(&widths, row, false));
        }
        if !self.footer.is_empty() {
            lines.push(Self::rule(&widths, '├', '┼', '┤'));
            lines.push(self.line(&widths, &self.footer, false));
        }
        lines.push(Self::rule(&widths, '╰', '┴', '╯'));
        lines.join("\n")
    }
}

// ============================================================================
// Text Formatter
// ============================================================================

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
    show_failures: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            show_failures: false,
        }
    }

    /// List each failed lookup instead of a count.
    pub fn with_failures(mut self, show: bool) -> Self {
        self.show_failures = show;
        self
    }

    /// Formats a report.
    pub fn format_report(&self, report: &Report) -> String {
        let mut lines = Vec::new();

        lines.push(self.bold(report.name()));
        lines.push(self.dim(&format!(
            "ids {}, ordered by {} {}",
            report.range(),
            report.sort().key,
            report.sort().direction
        )));
        lines.push(String::new());

        match report.status() {
            ReportStatus::EmptyRange => {
                lines.push(format!("No repositories found in ids {}", report.range()));
            }
            ReportStatus::Incomplete if report.fetched_count() == 0 => {}
            _ => lines.push(self.table(report)),
        }

        if report.is_interrupted() {
            lines.push(String::new());
            let marker = if report.fetched_count() == 0 {
                "Incomplete: interrupted while listing repositories".to_string()
            } else {
                format!(
                    "Incomplete: interrupted after {} of {} repositories",
                    report.total_repo_count() + report.failures().len() as u64,
                    report.fetched_count()
                )
            };
            lines.push(self.yellow(&marker));
        }

        if let Some(summary) = self.failure_summary(report) {
            lines.push(String::new());
            lines.push(summary);
        }

        lines.join("\n")
    }

    fn table(&self, report: &Report) -> String {
        let kind = report.kind();
        let mut table = if kind.has_star_totals() {
            BoxTable::new(
                &[kind.identity_column(), "#repos", "bucket total stars", "avg stars/repo"],
                &[Align::Left, Align::Right, Align::Right, Align::Right],
            )
        } else {
            BoxTable::new(&[kind.identity_column(), "#repos"], &[Align::Left, Align::Right])
        };

        for row in report.rows() {
            let mut cells = vec![row.key.label().to_string(), row.repo_count.to_string()];
            if let Some(stars) = row.star_total {
                cells.push(stars.to_string());
                cells.push(format!("{:.2}", row.average_stars()));
            }
            table.rows.push(cells);
        }

        table.footer = vec!["total".to_string(), report.total_repo_count().to_string()];
        if let Some(stars) = report.total_star_count() {
            table.footer.push(stars.to_string());
            table.footer.push(String::new());
        }

        table.render()
    }

    fn failure_summary(&self, report: &Report) -> Option<String> {
        let failures = report.failures();
        if failures.is_empty() {
            return None;
        }

        let headline = if report.status() == ReportStatus::AllFailed {
            self.red(&format!("All {} lookups failed", failures.len()))
        } else {
            self.yellow(&format!(
                "{} lookup{} failed and {} skipped",
                failures.len(),
                if failures.len() == 1 { "" } else { "s" },
                if failures.len() == 1 { "was" } else { "were" },
            ))
        };

        let mut lines = vec![headline];
        if self.show_failures {
            for failure in failures {
                lines.push(format!("  {}: {}", failure.repository, self.dim(&failure.cause)));
            }
        } else {
            lines.push(self.dim("Use --show-failures to list them"));
        }
        Some(lines.join("\n"))
    }

    // ========================================================================
    // Color Helpers
    // ========================================================================

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }
}
