//! Integration tests for the local preview pipeline: conversion, enhancement, analysis

use std::sync::Arc;


use scholar_preview::utils::{metrics_source, FixedClock};
use scholar_preview::{analyze_latex, enhance_html, latex_to_html, LatexToHtml};

fn converter() -> LatexToHtml {
    LatexToHtml::new(Arc::new(FixedClock::ymd(2026, 10, 18).unwrap()))
}

// ============================================================================
// Conversion
// ============================================================================

mod conversion {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_heading_levels() {
        let cases = [
            ("\\section{A}", "<h2>A</h2>"),
            ("\\subsection{B}", "<h3>B</h3>"),
            ("\\subsubsection{C}", "<h4>C</h4>"),
        ];
        for (latex, expected) in cases {
            let html = latex_to_html(latex);
            assert!(html.contains(expected), "{} -> {}", latex, html);
        }
    }

    #[test]
    fn test_inline_styles() {
        let html = latex_to_html("\\textbf{b} \\textit{i} \\emph{e}");
        assert!(html.contains("<strong>b</strong>"));
        assert!(html.contains("<em>i</em>"));
        assert!(html.contains("<em>e</em>"));
    }

    #[test]
    fn test_nested_inline_styles() {
        let html = latex_to_html("\\textbf{bold \\textit{both}}");
        assert!(html.contains("<strong>bold <em>both</em></strong>"));
    }

    #[test]
    fn test_inline_math_normalized() {
        let html = latex_to_html("Let $x = 1$ hold.");
        assert!(html.contains("\\(x = 1\\)"));
        assert!(!html.contains('$'));
    }

    #[test]
    fn test_comments_dropped() {
        let html = latex_to_html("kept % dropped\nnext");
        assert!(html.contains("kept"));
        assert!(!html.contains("dropped"));
        assert!(html.contains("next"));
    }

    #[test]
    fn test_escaped_percent_is_not_a_comment() {
        let html = latex_to_html("5\\% growth");
        assert_eq!(html, "5% growth");
    }

    #[test]
    fn test_ordered_and_unordered_lists() {
        let html = latex_to_html(
            "\\begin{itemize}\\item a\\end{itemize}\\begin{enumerate}\\item b\\end{enumerate}",
        );
        assert!(html.contains("<ul><li>a</ul>"));
        assert!(html.contains("<ol><li>b</ol>"));
    }

    #[test]
    fn test_figure_with_caption() {
        let html = latex_to_html(
            "\\begin{figure}[t]\\centering\\includegraphics{plot.pdf}\\caption{Results}\\end{figure}",
        );
        assert!(html.contains(r#"<img src="plot.pdf""#));
        assert!(html.contains("<figcaption>Results</figcaption>"));
        assert!(!html.contains("centering"));
    }

    #[test]
    fn test_date_from_injected_clock() {
        let html = converter().convert("\\title{T}\\date{\\today}\\maketitle");
        assert!(html.contains("October 18, 2026"));
        assert!(!html.contains("\\today"));
    }

    #[test]
    fn test_explicit_date_kept() {
        let html = converter().convert("\\date{Spring 2025}");
        assert!(html.contains("Spring 2025"));
    }

    #[test]
    fn test_converter_is_deterministic() {
        let source = "\\section{S}\\begin{itemize}\\item x\\end{itemize}$y$";
        assert_eq!(converter().convert(source), converter().convert(source));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(latex_to_html(""), "");
    }

    #[test]
    fn test_known_limitation_unknown_macros_pass_through() {
        let html = latex_to_html("see \\cite{knuth84}");
        assert!(html.contains("\\cite{knuth84}"));
    }
}

// ============================================================================
// Enhancement
// ============================================================================

mod enhancement {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_converted_fragment_gets_head() {
        let source = "\\section{Intro}$x$";
        let html = enhance_html(&latex_to_html(source), source);
        assert_eq!(html.matches("<head>").count(), 1);
        assert!(html.contains("window.MathJax"));
        assert!(html.contains("<h2>Intro</h2>"));
    }

    #[test]
    fn test_injections_precede_head_close() {
        let html = enhance_html(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"></head><body><p>x</p></body></html>",
            "",
        );
        let close = html.find("</head>").unwrap();
        for marker in [
            "window.MathJax",
            r#"data-preview-style="document""#,
            r#"data-preview-style="smoothing""#,
        ] {
            let at = html.find(marker).unwrap_or_else(|| panic!("missing {}", marker));
            assert!(at < close, "{} injected after </head>", marker);
        }
        assert!(html.contains("<body><p>x</p></body>"));
    }

    #[test]
    fn test_code_language_from_source() {
        let source = "\\begin{lstlisting}[language=Python]\nprint(1)\n\\end{lstlisting}";
        let html = enhance_html("<pre><code>print(1)</code></pre>", source);
        assert!(html.contains(r#"<code class="language-python hljs">"#));
    }

    #[test]
    fn test_code_language_defaults_to_latex() {
        let html = enhance_html("<pre><code>\\alpha</code></pre>", "no listings");
        assert!(html.contains(r#"<code class="language-latex hljs">"#));
    }

    #[test]
    fn test_enhancement_is_idempotent() {
        let once = enhance_html("<html><head></head><body></body></html>", "");
        assert_eq!(enhance_html(&once, ""), once);
    }
}

// ============================================================================
// Analysis
// ============================================================================

mod analysis {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_text_has_no_capabilities() {
        let analysis = analyze_latex("Just words.");
        assert!(!analysis.has_math);
        assert!(!analysis.has_tables);
        assert!(!analysis.has_figures);
        assert!(!analysis.has_algorithms);
        assert!(analysis.requires_packages.is_empty());
    }

    #[test]
    fn test_escaped_dollar_is_not_math() {
        assert!(!analyze_latex("costs \\$5").has_math);
        assert!(analyze_latex("$5$").has_math);
    }

    #[test]
    fn test_package_order_follows_groups() {
        let analysis = analyze_latex(
            "\\begin{equation}x\\end{equation}\\begin{table}\\begin{tabular}{c}y\\end{tabular}\\end{table}",
        );
        let packages: Vec<&str> = analysis.requires_packages.iter().map(String::as_str).collect();
        assert_eq!(
            packages,
            vec!["booktabs", "array", "multirow", "amsmath", "amssymb", "amsfonts"]
        );
    }

    #[test]
    fn test_algorithm_and_figure() {
        let analysis = analyze_latex(
            "\\begin{algorithm}\\end{algorithm}\\begin{figure}\\includegraphics{a}\\end{figure}",
        );
        assert!(analysis.has_algorithms);
        assert!(analysis.has_figures);
        for package in ["graphicx", "float", "algorithm", "algorithmic"] {
            assert!(analysis.requires_packages.contains(package), "missing {}", package);
        }
    }

    #[test]
    fn test_analysis_serializes_camel_case() {
        let json = serde_json::to_value(analyze_latex("$x$")).unwrap();
        assert_eq!(json["hasMath"], true);
        assert_eq!(json["hasTables"], false);
        assert_eq!(json["requiresPackages"][0], "amsmath");
    }

    #[test]
    fn test_metrics_counts() {
        let metrics = metrics_source(
            "\\section{A}\\subsection{B}\\begin{itemize}\\item x\\item y\\end{itemize}\\label{l}\\ref{l}",
        );
        assert_eq!(metrics.headings, 2);
        assert_eq!(metrics.list_items, 2);
        assert_eq!(metrics.labels, 1);
        assert_eq!(metrics.refs, 1);
    }
}
