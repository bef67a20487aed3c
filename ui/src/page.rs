//! Renders the single form page.

const TEMPLATE: &str = include_str!("index.html");
const MESSAGE_SLOT: &str = "{{message}}";

pub fn render(message: &str) -> String {
    TEMPLATE.replace(MESSAGE_SLOT, &escape_html(message))
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
