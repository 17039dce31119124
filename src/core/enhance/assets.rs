//! Static head snippets injected by the enhancer.

/// Token whose presence means a math bootstrap is already in place.
pub const MATH_MARKER: &str = "MathJax";

/// Marker attribute carried by every `<style>` block we inject.
pub const STYLE_MARKER: &str = "data-preview-style";

pub const MATHJAX_BOOTSTRAP: &str = r#"<script>
window.MathJax = {
  tex: {
    inlineMath: [['$', '$'], ['\\(', '\\)']],
    displayMath: [['$$', '$$'], ['\\[', '\\]']],
    processEscapes: true,
    processEnvironments: true
  },
  options: {
    skipHtmlTags: ['script', 'noscript', 'style', 'textarea', 'pre', 'code']
  }
};
</script>
<script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
<script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
"#;

pub const PREVIEW_STYLESHEET: &str = r#"<style data-preview-style="document">
body {
  font-family: 'Latin Modern Roman', 'Computer Modern Serif', 'Times New Roman', Georgia, serif;
  font-size: 12pt;
  line-height: 1.6;
  max-width: 8.5in;
  margin: 0 auto;
  padding: 1in;
  color: #1a1a1a;
  background: #ffffff;
}
h1 { font-size: 1.8em; text-align: center; margin: 0.5em 0; }
h2 { font-size: 1.4em; margin: 1.2em 0 0.6em; }
h3 { font-size: 1.2em; margin: 1em 0 0.5em; }
h4 { font-size: 1.05em; margin: 0.9em 0 0.4em; font-style: italic; }
.title { font-weight: bold; }
.author, .date { text-align: center; margin: 0.3em 0; }
.abstract {
  margin: 1.5em 2em;
  padding: 0.8em 1.2em;
  border-left: 3px solid #4a5568;
  background: #f7fafc;
  font-size: 0.95em;
}
.table-container { margin: 1.2em 0; overflow-x: auto; }
table, .latex-table { border-collapse: collapse; margin: 1em auto; }
td, th { border: 1px solid #cbd5e0; padding: 0.4em 0.8em; }
figure { margin: 1.5em auto; text-align: center; }
figure img { max-width: 100%; height: auto; }
figcaption { font-size: 0.9em; margin-top: 0.5em; color: #4a5568; }
.algorithm {
  border-top: 2px solid #1a1a1a;
  border-bottom: 2px solid #1a1a1a;
  padding: 0.5em 0;
  margin: 1em 0;
  font-family: 'Courier New', monospace;
}
pre { background: #f5f5f5; padding: 0.8em; overflow-x: auto; }
code { font-family: 'Fira Code', 'Courier New', monospace; font-size: 0.9em; }
@media (max-width: 768px) {
  body { padding: 0.5in; font-size: 11pt; }
  .abstract { margin: 1em 0; }
}
</style>
"#;

pub const FONT_SMOOTHING: &str = r#"<style data-preview-style="smoothing">
body {
  -webkit-font-smoothing: antialiased;
  -moz-osx-font-smoothing: grayscale;
  text-rendering: optimizeLegibility;
}
</style>
"#;
