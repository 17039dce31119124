//! Substitution passes for the LaTeX → HTML converter
//!
//! Each pass is a global search-and-replace over the whole current string.
//! Later passes see the output of earlier ones, so the order in
//! [`super::LatexToHtml::convert`] is significant.

use lazy_static::lazy_static;
use phf::phf_map;
use regex::{Captures, Regex};

/// Braced argument allowing one level of nested braces.
const ARG: &str = r"((?:[^{}]|\{[^{}]*\})*)";

/// Upper bound on innermost-first rewrites of nested inline commands.
const MAX_INLINE_DEPTH: usize = 8;

static HEADING_TAGS: phf::Map<&'static str, &'static str> = phf_map! {
    "section" => "h2",
    "subsection" => "h3",
    "subsubsection" => "h4",
};

static INLINE_TAGS: phf::Map<&'static str, &'static str> = phf_map! {
    "textbf" => "strong",
    "textit" => "em",
    "emph" => "em",
    "texttt" => "code",
    "underline" => "u",
};

lazy_static! {
    static ref COMMENT_RE: Regex = Regex::new(r"(?m)(^|[^\\])%.*$").unwrap();
    static ref PREAMBLE_RE: Regex =
        Regex::new(r"(?s)\\documentclass.*?\\begin\{document\}").unwrap();
    static ref END_DOCUMENT_RE: Regex = Regex::new(r"\\end\{document\}").unwrap();
    static ref USEPACKAGE_RE: Regex =
        Regex::new(r"\\usepackage(?:\[[^\]]*\])?\{[^}]*\}[^\n]*\n?").unwrap();

    static ref TITLE_RE: Regex = Regex::new(&format!(r"\\title\{{{ARG}\}}")).unwrap();
    static ref AUTHOR_RE: Regex = Regex::new(&format!(r"\\author\{{{ARG}\}}")).unwrap();
    static ref DATE_RE: Regex = Regex::new(&format!(r"\\date\{{{ARG}\}}")).unwrap();
    static ref AND_RE: Regex = Regex::new(r"\s*\\and\b\s*").unwrap();
    static ref TODAY_RE: Regex = Regex::new(r"\\today\b").unwrap();
    static ref MAKETITLE_RE: Regex = Regex::new(r"\\maketitle\b").unwrap();

    static ref HEADING_RE: Regex = Regex::new(&format!(
        r"\\(section|subsection|subsubsection)\*?\{{{ARG}\}}"
    ))
    .unwrap();

    static ref ABSTRACT_RE: Regex =
        Regex::new(r"(?s)\\begin\{abstract\}(.*?)\\end\{abstract\}").unwrap();

    static ref INLINE_RE: Regex =
        Regex::new(r"\\(textbf|textit|emph|texttt|underline)\{([^{}]*)\}").unwrap();

    static ref LINE_BREAK_RE: Regex = Regex::new(r"\\\\(?:\[[^\]]*\])?").unwrap();

    static ref LIST_BEGIN_RE: Regex = Regex::new(r"\\begin\{(itemize|enumerate)\}").unwrap();
    static ref LIST_END_RE: Regex = Regex::new(r"\\end\{(itemize|enumerate)\}").unwrap();
    static ref ITEM_RE: Regex = Regex::new(r"\\item\b(?:\[([^\]]*)\])?\s*").unwrap();

    static ref DISPLAY_DOLLAR_RE: Regex = Regex::new(r"(?s)\$\$(.+?)\$\$").unwrap();
    static ref INLINE_DOLLAR_RE: Regex = Regex::new(r"(^|[^\\])\$([^$]+?)\$").unwrap();
    static ref EQUATION_ENV_RE: Regex = Regex::new(
        r"(?s)\\begin\{(?:equation\*?|displaymath)\}(.*?)\\end\{(?:equation\*?|displaymath)\}"
    )
    .unwrap();

    static ref TABLE_BEGIN_RE: Regex =
        Regex::new(r"\\begin\{table\*?\}(?:\[[^\]]*\])?").unwrap();
    static ref TABLE_END_RE: Regex = Regex::new(r"\\end\{table\*?\}").unwrap();
    static ref TABULAR_RE: Regex = Regex::new(
        r"(?s)\\begin\{tabular\}(?:\[[^\]]*\])?\{(?:[^{}]|\{[^{}]*\})*\}(.*?)\\end\{tabular\}"
    )
    .unwrap();
    static ref TABLE_RULE_RE: Regex =
        Regex::new(r"\\(?:hline|toprule|midrule|bottomrule|cline\{[^}]*\})").unwrap();

    static ref FIGURE_BEGIN_RE: Regex =
        Regex::new(r"\\begin\{figure\*?\}(?:\[[^\]]*\])?").unwrap();
    static ref FIGURE_END_RE: Regex = Regex::new(r"\\end\{figure\*?\}").unwrap();
    static ref INCLUDEGRAPHICS_RE: Regex =
        Regex::new(r"\\includegraphics(?:\[[^\]]*\])?\{([^}]*)\}").unwrap();
    static ref CAPTION_RE: Regex = Regex::new(&format!(r"\\caption\{{{ARG}\}}")).unwrap();
    static ref LABEL_RE: Regex = Regex::new(r"\\label\{[^}]*\}").unwrap();
    static ref CENTERING_RE: Regex = Regex::new(r"\\centering\b\s*").unwrap();

    static ref BLANK_LINES_RE: Regex = Regex::new(r"\n[ \t\r]*(?:\n[ \t\r]*)+").unwrap();
}

// =============================================================================
// Pass 1: document scaffolding
// =============================================================================

/// Drop comments, the preamble, the closing document marker and package lines.
pub fn strip_scaffolding(input: &str) -> String {
    let out = COMMENT_RE.replace_all(input, "$1");
    let out = PREAMBLE_RE.replace_all(&out, "");
    let out = END_DOCUMENT_RE.replace_all(&out, "");
    USEPACKAGE_RE.replace_all(&out, "").into_owned()
}

// =============================================================================
// Pass 2: title block
// =============================================================================

pub fn convert_title_block(input: &str, today: &str) -> String {
    let out = TITLE_RE.replace_all(input, r#"<h1 class="title" style="text-align: center;">$1</h1>"#);
    let out = AUTHOR_RE.replace_all(&out, |caps: &Captures| {
        let authors = AND_RE.replace_all(&caps[1], ", ");
        format!(
            r#"<div class="author" style="text-align: center;">{}</div>"#,
            authors
        )
    });
    let out = DATE_RE.replace_all(&out, r#"<div class="date" style="text-align: center;">$1</div>"#);
    let out = TODAY_RE.replace_all(&out, regex::NoExpand(today));
    MAKETITLE_RE.replace_all(&out, "").into_owned()
}

// =============================================================================
// Pass 3-6: headings, abstract, inline styling, line breaks
// =============================================================================

pub fn convert_headings(input: &str) -> String {
    HEADING_RE
        .replace_all(input, |caps: &Captures| {
            let tag = HEADING_TAGS.get(&caps[1]).copied().unwrap_or("h2");
            format!("<{tag}>{}</{tag}>", &caps[2])
        })
        .into_owned()
}

pub fn convert_abstract(input: &str) -> String {
    ABSTRACT_RE
        .replace_all(input, |caps: &Captures| {
            format!(
                r#"<div class="abstract"><strong>Abstract:</strong> {}</div>"#,
                caps[1].trim()
            )
        })
        .into_owned()
}

/// Rewrite inline styling commands, innermost first.
pub fn convert_inline_styles(input: &str) -> String {
    let mut current = input.to_string();
    for _ in 0..MAX_INLINE_DEPTH {
        if !INLINE_RE.is_match(&current) {
            break;
        }
        current = INLINE_RE
            .replace_all(&current, |caps: &Captures| {
                let tag = INLINE_TAGS.get(&caps[1]).copied().unwrap_or("span");
                format!("<{tag}>{}</{tag}>", &caps[2])
            })
            .into_owned();
    }
    current
}

pub fn convert_line_breaks(input: &str) -> String {
    LINE_BREAK_RE.replace_all(input, "<br>").into_owned()
}

// =============================================================================
// Pass 7: lists
// =============================================================================

/// Lists open and close, items only open. `</li>` is never emitted.
pub fn convert_lists(input: &str) -> String {
    let out = LIST_BEGIN_RE.replace_all(input, |caps: &Captures| match &caps[1] {
        "enumerate" => "<ol>",
        _ => "<ul>",
    });
    let out = LIST_END_RE.replace_all(&out, |caps: &Captures| match &caps[1] {
        "enumerate" => "</ol>",
        _ => "</ul>",
    });
    ITEM_RE
        .replace_all(&out, |caps: &Captures| match caps.get(1) {
            Some(label) => format!("<li><strong>{}</strong> ", label.as_str()),
            None => "<li>".to_string(),
        })
        .into_owned()
}

// =============================================================================
// Pass 8: math delimiters
// =============================================================================

/// Normalize math to the `\(..\)` / `\[..\]` forms the renderer bootstrap expects.
pub fn normalize_math_delimiters(input: &str) -> String {
    let out = DISPLAY_DOLLAR_RE.replace_all(input, r"\[$1\]");
    let out = INLINE_DOLLAR_RE.replace_all(&out, r"$1\($2\)");
    EQUATION_ENV_RE
        .replace_all(&out, |caps: &Captures| format!(r"\[{}\]", caps[1].trim()))
        .into_owned()
}

// =============================================================================
// Pass 9: tables
// =============================================================================

pub fn convert_tables(input: &str) -> String {
    let out = TABLE_BEGIN_RE.replace_all(input, r#"<div class="table-container">"#);
    let out = TABLE_END_RE.replace_all(&out, "</div>");
    TABULAR_RE
        .replace_all(&out, |caps: &Captures| {
            format!(
                r#"<table class="latex-table">{}</table>"#,
                convert_tabular_body(&caps[1])
            )
        })
        .into_owned()
}

/// Cells are separated, never opened; the first row has no `<tr><td>`.
fn convert_tabular_body(body: &str) -> String {
    let body = TABLE_RULE_RE.replace_all(body, "");
    let mut out = String::with_capacity(body.len() * 2);
    let mut escaped = false;
    for ch in body.chars() {
        match ch {
            '&' if !escaped => out.push_str("</td><td>"),
            '\n' | '\r' => out.push(' '),
            _ => out.push(ch),
        }
        escaped = ch == '\\' && !escaped;
    }
    let out = out.replace("<br>", "</td></tr><tr><td>");
    LINE_BREAK_RE
        .replace_all(&out, "</td></tr><tr><td>")
        .trim()
        .to_string()
}

// =============================================================================
// Pass 10: figures
// =============================================================================

pub fn convert_figures(input: &str) -> String {
    let out = FIGURE_BEGIN_RE.replace_all(input, "<figure>");
    let out = FIGURE_END_RE.replace_all(&out, "</figure>");
    let out = INCLUDEGRAPHICS_RE.replace_all(
        &out,
        r#"<img src="$1" alt="" style="max-width:100%">"#,
    );
    let out = CAPTION_RE.replace_all(&out, "<figcaption>$1</figcaption>");
    let out = LABEL_RE.replace_all(&out, "");
    CENTERING_RE.replace_all(&out, "").into_owned()
}

// =============================================================================
// Pass 11: special characters and whitespace
// =============================================================================

pub fn unescape_specials(input: &str) -> String {
    input
        .replace("\\&", "&amp;")
        .replace("\\%", "%")
        .replace("\\_", "_")
        .replace("\\#", "#")
}

pub fn convert_whitespace(input: &str) -> String {
    let out = BLANK_LINES_RE.replace_all(input.trim(), "\n\n");
    out.replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_scaffolding() {
        let input = "\\documentclass{article}\n\\usepackage{amsmath}\n\\begin{document}\nBody\n\\end{document}";
        assert_eq!(strip_scaffolding(input).trim(), "Body");
    }

    #[test]
    fn test_usepackage_outside_preamble() {
        let out = strip_scaffolding("\\usepackage[utf8]{inputenc}\nText");
        assert_eq!(out, "Text");
    }

    #[test]
    fn test_comments_stripped_but_escaped_percent_kept() {
        let out = strip_scaffolding("50\\% done % remove me\nnext");
        assert_eq!(out, "50\\% done \nnext");
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(convert_headings("\\section{A}"), "<h2>A</h2>");
        assert_eq!(convert_headings("\\subsection*{B}"), "<h3>B</h3>");
        assert_eq!(convert_headings("\\subsubsection{C}"), "<h4>C</h4>");
    }

    #[test]
    fn test_heading_with_nested_braces() {
        assert_eq!(
            convert_headings("\\section{The \\texttt{x} case}"),
            "<h2>The \\texttt{x} case</h2>"
        );
    }

    #[test]
    fn test_nested_inline_styles() {
        assert_eq!(
            convert_inline_styles("\\textbf{\\emph{deep}}"),
            "<strong><em>deep</em></strong>"
        );
    }

    #[test]
    fn test_author_and() {
        let out = convert_title_block("\\author{Ada \\and Alan}", "today");
        assert!(out.contains(">Ada, Alan</div>"));
    }

    #[test]
    fn test_item_label() {
        assert_eq!(
            convert_lists("\\item[(a)] first"),
            "<li><strong>(a)</strong> first"
        );
    }

    #[test]
    fn test_dollar_math() {
        assert_eq!(normalize_math_delimiters("$$x^2$$"), "\\[x^2\\]");
        assert_eq!(normalize_math_delimiters("a $x$ b"), "a \\(x\\) b");
        assert_eq!(normalize_math_delimiters("cost \\$5"), "cost \\$5");
    }

    #[test]
    fn test_equation_environment() {
        assert_eq!(
            normalize_math_delimiters("\\begin{equation}\n E = mc^2 \n\\end{equation}"),
            "\\[E = mc^2\\]"
        );
    }

    #[test]
    fn test_tabular_escaped_ampersand_kept() {
        let out = convert_tables("\\begin{tabular}{cc}R\\&D & x\\end{tabular}");
        assert!(out.contains("R\\&D </td><td> x"));
    }

    #[test]
    fn test_blank_line_collapse() {
        assert_eq!(convert_whitespace("a\n\n\n\nb\nc"), "a<br><br>b<br>c");
    }
}
