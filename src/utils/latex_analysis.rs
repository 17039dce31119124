//! LaTeX analysis utilities: capability flags, required packages and basic metrics.
//!
//! Everything here inspects the raw source, never converted HTML.

use indexmap::IndexSet;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref MATH_RE: Regex = Regex::new(
        r"(?:^|[^\\])\$|\\\(|\\\[|\\begin\{(?:equation|align|gather|multline|eqnarray|displaymath|math)\*?\}"
    )
    .unwrap();
    static ref TABLE_RE: Regex =
        Regex::new(r"\\begin\{(?:table|tabular|tabularx|longtable)\*?\}").unwrap();
    static ref FIGURE_RE: Regex =
        Regex::new(r"\\begin\{figure\*?\}|\\includegraphics").unwrap();
    static ref ALGORITHM_RE: Regex =
        Regex::new(r"\\begin\{(?:algorithm|algorithmic|algorithm2e)\*?\}").unwrap();
}

pub const TABLE_PACKAGES: &[&str] = &["booktabs", "array", "multirow"];
pub const FIGURE_PACKAGES: &[&str] = &["graphicx", "float"];
pub const ALGORITHM_PACKAGES: &[&str] = &["algorithm", "algorithmic"];
pub const MATH_PACKAGES: &[&str] = &["amsmath", "amssymb", "amsfonts"];

/// Capability flags derived from a LaTeX source.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysis {
    pub has_math: bool,
    pub has_tables: bool,
    pub has_figures: bool,
    pub has_algorithms: bool,
    /// Ordered, deduplicated package names (tables, figures, algorithms, math).
    pub requires_packages: IndexSet<String>,
}

pub fn analyze_source(source: &str) -> ContentAnalysis {
    let has_math = MATH_RE.is_match(source);
    let has_tables = TABLE_RE.is_match(source);
    let has_figures = FIGURE_RE.is_match(source);
    let has_algorithms = ALGORITHM_RE.is_match(source);

    let mut requires_packages = IndexSet::new();
    let groups = [
        (has_tables, TABLE_PACKAGES),
        (has_figures, FIGURE_PACKAGES),
        (has_algorithms, ALGORITHM_PACKAGES),
        (has_math, MATH_PACKAGES),
    ];
    for (present, packages) in groups {
        if present {
            requires_packages.extend(packages.iter().map(|p| p.to_string()));
        }
    }

    ContentAnalysis {
        has_math,
        has_tables,
        has_figures,
        has_algorithms,
        requires_packages,
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LatexMetrics {
    pub headings: usize,
    pub equations: usize,
    pub figures: usize,
    pub tables: usize,
    pub algorithms: usize,
    pub cites: usize,
    pub refs: usize,
    pub labels: usize,
    pub list_items: usize,
}

pub fn metrics_source(source: &str) -> LatexMetrics {
    LatexMetrics {
        headings: count_any(
            source,
            &["\\section{", "\\subsection{", "\\subsubsection{", "\\section*{"],
        ),
        equations: count_any(
            source,
            &[
                "\\begin{equation}",
                "\\begin{equation*}",
                "\\begin{align}",
                "\\begin{align*}",
                "\\begin{eqnarray}",
                "\\[",
                "$$",
            ],
        ),
        figures: count_any(source, &["\\begin{figure}", "\\begin{figure*}"]),
        tables: count_any(source, &["\\begin{table}", "\\begin{table*}"]),
        algorithms: count_any(source, &["\\begin{algorithm}"]),
        cites: source.matches("\\cite").count(),
        refs: count_any(source, &["\\ref{", "\\eqref{"]),
        labels: count_any(source, &["\\label{"]),
        list_items: count_any(source, &["\\item ", "\\item\n", "\\item["]),
    }
}

fn count_any(haystack: &str, needles: &[&str]) -> usize {
    needles.iter().map(|n| haystack.matches(n).count()).sum()
}
