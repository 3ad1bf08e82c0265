//! HTML escaping for text content and attribute values.

/// Escape the five HTML-significant characters.
///
/// `&`, `<`, `>`, `"` and `'` are replaced with their entity equivalents in
/// a single pass; every other character is copied unchanged. The output is
/// safe both as element content and inside a double-quoted attribute value.
///
/// # Examples
///
/// ```
/// use wysiwyg_renderer::escape_html;
///
/// assert_eq!(escape_html("<b>\"Tom\" & 'Jerry'</b>"),
///     "&lt;b&gt;&quot;Tom&quot; &amp; &#039;Jerry&#039;&lt;/b&gt;");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#039;"),
            _ => result.push(c),
        }
    }
    result
}
