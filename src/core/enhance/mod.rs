//! HTML enhancement for preview rendering
//!
//! Decorates an HTML fragment, whether it came from the remote compiler or
//! from the fallback converter, with what the browser needs to display it
//! like a typeset page: a MathJax bootstrap, a print-like stylesheet,
//! syntax-highlighting classes on code blocks and font smoothing.
//!
//! Every injection inserts before the first `</head>`. When the fragment has
//! no head, the first injection synthesizes one and later steps reuse it.
//! Injections are skipped when their marker is already present, so running
//! the enhancer twice leaves the document unchanged.

pub mod assets;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use assets::{FONT_SMOOTHING, MATHJAX_BOOTSTRAP, MATH_MARKER, PREVIEW_STYLESHEET, STYLE_MARKER};

pub const DEFAULT_CODE_LANGUAGE: &str = "latex";

lazy_static! {
    static ref HEAD_CLOSE_RE: Regex = Regex::new(r"(?i)</head\s*>").unwrap();
    static ref HTML_OPEN_RE: Regex = Regex::new(r"(?i)<html(?:\s[^>]*)?>").unwrap();
    static ref PRE_CODE_RE: Regex = Regex::new(r"(?i)<pre>(\s*)<code>").unwrap();
    static ref BARE_CODE_RE: Regex = Regex::new(r"(?i)<code>").unwrap();
    static ref LSTLISTING_LANG_RE: Regex =
        Regex::new(r"\\begin\{lstlisting\}\[[^\]]*language=\{?([A-Za-z0-9+#]+)").unwrap();
    static ref MINTED_LANG_RE: Regex =
        Regex::new(r"\\begin\{minted\}(?:\[[^\]]*\])?\{\s*([A-Za-z0-9+#-]+)\s*\}").unwrap();
}

/// Post-processor applied to every preview document.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlEnhancer;

impl HtmlEnhancer {
    pub fn new() -> Self {
        HtmlEnhancer
    }

    /// Run all injection steps. `source` is the LaTeX the HTML was made from.
    pub fn enhance(&self, html: &str, source: &str) -> String {
        let out = inject_math_bootstrap(html);
        let out = inject_stylesheet(&out);
        let out = annotate_code_blocks(&out, &detect_code_language(source));
        inject_font_smoothing(&out)
    }
}

/// Enhance with the default enhancer.
pub fn enhance_html(html: &str, source: &str) -> String {
    HtmlEnhancer::new().enhance(html, source)
}

pub fn inject_math_bootstrap(html: &str) -> String {
    if html.contains(MATH_MARKER) {
        return html.to_string();
    }
    inject_into_head(html, MATHJAX_BOOTSTRAP)
}

pub fn inject_stylesheet(html: &str) -> String {
    if has_style_block(html, "document") {
        return html.to_string();
    }
    inject_into_head(html, PREVIEW_STYLESHEET)
}

pub fn inject_font_smoothing(html: &str) -> String {
    if has_style_block(html, "smoothing") {
        return html.to_string();
    }
    inject_into_head(html, FONT_SMOOTHING)
}

/// Tag unclassed code blocks for the highlighter. Regex based, so nested or
/// malformed blocks can end up with the wrong class.
pub fn annotate_code_blocks(html: &str, language: &str) -> String {
    let out = PRE_CODE_RE.replace_all(html, |caps: &Captures| {
        format!(r#"<pre>{}<code class="language-{language} hljs">"#, &caps[1])
    });
    BARE_CODE_RE
        .replace_all(&out, r#"<code class="language-plaintext">"#)
        .into_owned()
}

/// Language of the first `lstlisting`/`minted` block in the source.
pub fn detect_code_language(source: &str) -> String {
    let from_lstlisting = LSTLISTING_LANG_RE
        .captures(source)
        .map(|caps| (caps.get(0).map_or(0, |m| m.start()), caps[1].to_string()));
    let from_minted = MINTED_LANG_RE
        .captures(source)
        .map(|caps| (caps.get(0).map_or(0, |m| m.start()), caps[1].trim().to_string()));

    let first = match (from_lstlisting, from_minted) {
        (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
        (a, b) => a.or(b),
    };
    first
        .map(|(_, lang)| lang.to_ascii_lowercase())
        .filter(|lang| !lang.is_empty())
        .unwrap_or_else(|| DEFAULT_CODE_LANGUAGE.to_string())
}

fn has_style_block(html: &str, name: &str) -> bool {
    html.contains(&format!(r#"{STYLE_MARKER}="{name}""#))
}

fn inject_into_head(html: &str, snippet: &str) -> String {
    if let Some(close) = HEAD_CLOSE_RE.find(html) {
        let mut out = String::with_capacity(html.len() + snippet.len());
        out.push_str(&html[..close.start()]);
        out.push_str(snippet);
        out.push_str(&html[close.start()..]);
        return out;
    }

    let head = format!("<head>\n{snippet}</head>\n");
    if let Some(open) = HTML_OPEN_RE.find(html) {
        let mut out = String::with_capacity(html.len() + head.len());
        out.push_str(&html[..open.end()]);
        out.push_str(&head);
        out.push_str(&html[open.end()..]);
        return out;
    }
    format!("{head}{html}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bootstrap_inserted_before_head_close() {
        let html = "<html><head><title>x</title></head><body></body></html>";
        let out = inject_math_bootstrap(html);
        let script = out.find("window.MathJax").unwrap();
        let close = out.find("</head>").unwrap();
        assert!(script < close);
        assert!(out.contains("<title>x</title>"));
    }

    #[test]
    fn test_bootstrap_skipped_when_marker_present() {
        let html = "<head><script src=\"mathjax/MathJax.js\"></script></head>";
        assert_eq!(inject_math_bootstrap(html), html);
    }

    #[test]
    fn test_headless_fragment_gets_single_head() {
        let out = HtmlEnhancer::new().enhance("<p>hi</p>", "");
        assert_eq!(out.matches("<head>").count(), 1);
        assert_eq!(out.matches("</head>").count(), 1);
        assert!(out.ends_with("<p>hi</p>"));
        assert!(out.contains("window.MathJax"));
        assert!(out.contains(r#"data-preview-style="document""#));
        assert!(out.contains("-webkit-font-smoothing: antialiased"));
    }

    #[test]
    fn test_head_inserted_after_html_tag() {
        let out = inject_stylesheet("<html lang=\"en\"><body>x</body></html>");
        assert!(out.starts_with("<html lang=\"en\"><head>\n<style"));
    }

    #[test]
    fn test_enhance_twice_is_stable() {
        let once = enhance_html("<p><code>x</code></p>", "");
        let twice = enhance_html(&once, "");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_code_annotation() {
        let out = annotate_code_blocks("<pre><code>a</code></pre> and <code>b</code>", "python");
        assert_eq!(
            out,
            r#"<pre><code class="language-python hljs">a</code></pre> and <code class="language-plaintext">b</code>"#
        );
    }

    #[test]
    fn test_classed_code_untouched() {
        let html = r#"<code class="language-rust">fn</code>"#;
        assert_eq!(annotate_code_blocks(html, "latex"), html);
    }

    #[test]
    fn test_detect_language() {
        assert_eq!(detect_code_language("plain"), "latex");
        assert_eq!(
            detect_code_language("\\begin{lstlisting}[language=Python, caption=x]"),
            "python"
        );
        assert_eq!(detect_code_language("\\begin{minted}{rust}\nfn main(){}"), "rust");
        assert_eq!(
            detect_code_language("\\begin{minted}{c}\\end{minted}\\begin{lstlisting}[language=Java]"),
            "c"
        );    }

    #[test]
    fn test_unsafe_language_names_ignored() {
        assert_eq!(detect_code_language("\\begin{minted}{$0\"onload=x}"), "latex");
        let out = annotate_code_blocks(
            "<pre><code>a</code></pre>",
            &detect_code_language("\\begin{minted}{a\"b}"),
        );
        assert_eq!(out, r#"<pre><code class="language-latex hljs">a</code></pre>"#);
        assert_eq!(detect_code_language("\\begin{minted}{objective-c}"), "objective-c");
    }
}
