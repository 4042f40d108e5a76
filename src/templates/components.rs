//! Shared HTML building blocks.

use super::styles::STYLE;

// ============================================================================
// Base Template
// ============================================================================

pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{STYLE}</style>
</head>
<body>
    {content}
</body>
</html>"#,
        title = html_escape(title),
        content = content,
        STYLE = STYLE,
    )
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_html_escapes_title() {
        let html = base_html("<b>", "body");
        assert!(html.contains("<title>&lt;b&gt;</title>"));
        assert!(html.contains("body"));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("a & \"b\""), "a &amp; &quot;b&quot;");
    }
}
