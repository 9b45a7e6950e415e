/// HTML rendering
///
/// Pages are built with `format!` around a shared [`layout`]. Every value
/// that came from a user or the database goes through [`escape`] before it
/// is interpolated.
///
/// - `users`: list, detail and form pages
/// - `errors`: status pages (404 and friends)

pub mod errors;
pub mod users;

const STYLESHEET: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 860px; margin: 2rem auto; padding: 0 1rem; color: #222; }
nav { display: flex; gap: 1rem; padding-bottom: 1rem; border-bottom: 1px solid #ddd; margin-bottom: 1.5rem; }
nav a { color: #0b5cad; text-decoration: none; font-weight: 600; }
table { width: 100%; border-collapse: collapse; }
th, td { text-align: left; padding: 0.5rem; border-bottom: 1px solid #eee; }
dl { display: grid; grid-template-columns: max-content 1fr; gap: 0.4rem 1.5rem; }
dt { font-weight: 600; }
form p { margin: 0 0 1rem; }
label { display: block; font-weight: 600; margin-bottom: 0.25rem; }
input { padding: 0.4rem; width: 100%; max-width: 24rem; box-sizing: border-box; }
.error { color: #b00020; font-size: 0.9rem; }
.actions a { margin-right: 0.75rem; }
.muted { color: #777; }
.pager { margin-top: 1rem; display: flex; gap: 1rem; }
"#;

/// Escapes text for use in HTML content and double-quoted attributes
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

/// Wraps page content in the site chrome
///
/// `body` must already be escaped; `title` is escaped here.
pub fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} · Roster</title>
    <style>{STYLESHEET}</style>
</head>
<body>
    <nav>
        <a href="/">Users</a>
        <a href="/add">Add user</a>
    </nav>
    <main>
        <h1>{title}</h1>
{body}
    </main>
</body>
</html>
"#,
        title = escape(title),
    )
}
