//! Browser-facing document pages.
//!
//! Markdown documents are rendered to a standalone HTML page; HTML
//! documents are served as-is. Both come straight out of the index.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::ServiceState;

pub async fn handler(State(state): State<ServiceState>, Path(path): Path<String>) -> Response {
    if !state.guard().is_safe(&path) {
        return (
            StatusCode::BAD_REQUEST,
            format!("Invalid path: {}", path),
        )
            .into_response();
    }

    let found = {
        let index = state.index().read();
        index
            .get(&path)
            .map(|entry| (entry.name.clone(), entry.ext.clone(), entry.content.clone()))
    };
    let Some((name, ext, content)) = found else {
        return (StatusCode::NOT_FOUND, format!("Not found: {}", path)).into_response();
    };

    let page = match ext.as_str() {
        "md" => render_markdown_page(&name, &content),
        // html entries carry their own document structure
        _ => content,
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        page,
    )
        .into_response()
}

/// Converts markdown to HTML and wraps it in a minimal page shell.
fn render_markdown_page(title: &str, markdown: &str) -> String {
    use pulldown_cmark::{html, Options, Parser};

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut body = String::new();
    html::push_html(&mut body, parser);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <style>
        body {{ font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; max-width: 760px; margin: 40px auto; padding: 0 20px; line-height: 1.6; color: #1f2328; }}
        img {{ max-width: 100%; height: auto; }}
        code {{ background: #f6f8fa; padding: 2px 6px; border-radius: 3px; }}
        pre {{ background: #f6f8fa; padding: 12px; border-radius: 6px; overflow-x: auto; }}
        pre code {{ padding: 0; }}
        table {{ border-collapse: collapse; width: 100%; }}
        th, td {{ border: 1px solid #d1d9e0; padding: 8px; text-align: left; }}
        th {{ background-color: #f6f8fa; }}
        blockquote {{ border-left: 4px solid #d1d9e0; margin-left: 0; padding-left: 16px; color: #59636e; }}
    </style>
</head>
<body>
{}
</body>
</html>"#,
        escape_text(title),
        body
    )
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_renders_inside_page_shell() {
        let page = render_markdown_page("notes.md", "# Hello\n\nSome *text*.");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>notes.md</title>"));
        assert!(page.contains("<h1>Hello</h1>"));
        assert!(page.contains("<em>text</em>"));
    }

    #[test]
    fn test_markdown_tables_are_enabled() {
        let page = render_markdown_page("t.md", "| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(page.contains("<table>"));
    }

    #[test]
    fn test_title_is_escaped() {
        let page = render_markdown_page("<script>.md", "body");
        assert!(page.contains("<title>&lt;script&gt;.md</title>"));
    }
}
