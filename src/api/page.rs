//! The browser remote control page

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Timer Remote</title>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style>
        body {
            font-family: sans-serif; display: flex; flex-direction: column;
            align-items: center; justify-content: center; height: 100vh;
            margin: 0; background: #111; color: white;
        }
        h1 { margin-bottom: 30px; }
        .btn {
            width: 200px; padding: 20px; margin: 10px; font-size: 1.2rem; font-weight: bold;
            border: none; border-radius: 8px; cursor: pointer; transition: opacity 0.2s;
        }
        .btn-toggle { background-color: #00883A; color: white; }
        .btn-reset { background-color: #444; color: white; }
        .btn:active { opacity: 0.7; }
    </style>
</head>
<body>
    <h1>Timer Remote</h1>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn button_form(action: &str, class: &str, caption: &str, token: Option<&str>) -> String {
    let hidden = token
        .map(|token| format!(
            "        <input type=\"hidden\" name=\"token\" value=\"{}\">\n",
            escape_html(token)
        ))
        .unwrap_or_default();
    format!(
        "    <form action=\"{action}\" method=\"POST\">\n{hidden}        \
         <button type=\"submit\" class=\"btn {class}\">{caption}</button>\n    </form>\n"
    )
}

/// Render the page. `token` is embedded in both forms so the buttons keep
/// working when the service requires one.
pub fn remote_page(token: Option<&str>) -> String {
    let mut page = String::from(PAGE_HEAD);
    page.push_str(&button_form("/toggle", "btn-toggle", "START / PAUSE", token));
    page.push_str(&button_form("/reset", "btn-reset", "RESET", token));
    page.push_str(PAGE_TAIL);
    page
}
