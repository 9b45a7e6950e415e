use super::{escape, layout};
use axum::{http::StatusCode, response::Html};

/// Renders a status page such as "404 Not Found"
pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let title = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Error")
    );

    let body = format!(
        r#"        <p>{}</p>
        <p><a href="/">Back to the user list</a></p>"#,
        escape(message)
    );

    Html(layout(&title, &body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_page() {
        let Html(page) = error_page(StatusCode::NOT_FOUND, "No user with id <9999>");
        assert!(page.contains("404 Not Found"));
        assert!(page.contains("No user with id &lt;9999&gt;"));
    }
}
