//! End-to-end rendering tests.
//!
//! These tests render complete documents through the bundled layout and
//! through layout files on disk.

use std::{fs, path::Path};

use pagekit_render::{Page, PageConfig, TemplateError};

fn count(html: &str, needle: &str) -> usize {
    html.matches(needle).count()
}

fn body_of(html: &str) -> &str {
    let start = html.find("<body").expect("document has a body");
    let end = html.find("</body>").expect("body is closed");
    &html[start..end]
}

fn write_body_template(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("body.html");
    fs::write(&path, "Hello, {{ hello }}!").expect("write body template");
    path
}

#[test]
fn test_render_full_document() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let body = write_body_template(dir.path());

    let mut page = Page::new();
    page.set_template(&body)
        .set("hello", "<b>World</b>")
        .set_domain("http://www.cmsx.ru")
        .set_canonical("/")
        .add_css("file.css", None, None)
        .add_css("ie.css", None, None)
        .add_js("hi.js")
        .add_js("js.js");

    let html = page.render().expect("render page");
    assert!(!html.is_empty());
    assert_eq!(String::try_from(&page).expect("convert page"), html);

    let head_end = html.find("</head>").expect("head is closed");
    let head = &html[..head_end];

    assert_eq!(count(head, "<title>"), 1);
    assert_eq!(count(head, "name=\"keywords\""), 1);
    assert_eq!(count(head, "name=\"description\""), 1);
    assert_eq!(count(head, "rel=\"canonical\""), 1);
    assert!(head.contains("<link href=\"http://www.cmsx.ru/\" rel=\"canonical\" />"));
    assert_eq!(count(head, "rel=\"stylesheet\""), 2);

    assert_eq!(count(&html, "<script "), 2);
    assert_eq!(count(&html, "type=\"text/javascript\""), 2);

    let body = body_of(&html);
    assert!(body.contains("Hello, <b>World</b>!"));
    assert!(body.contains("<!-- JS -->"));
    assert!(html.trim_end().ends_with("</html>"));
}

#[test]
fn test_render_exact_minimal_document() {
    let mut page = Page::new();
    page.set_doctype("html5")
        .expect("known doctype")
        .set_title("Hello")
        .set_text("<p>World</p>");

    let expected = concat!(
        "<!DOCTYPE html>\n",
        "<html>\n",
        "<head>\n",
        "<meta charset=\"utf-8\" />\n",
        "<title>Hello</title>\n",
        "<meta content=\"\" name=\"keywords\" />\n",
        "<meta content=\"\" name=\"description\" />\n",
        "</head>\n",
        "\n",
        "<body>\n",
        "<h1>Hello</h1>\n",
        "<p>World</p>\n",
        "</body>\n",
        "</html>\n",
    );
    assert_eq!(page.render().unwrap(), expected);
}

#[test]
fn test_render_without_template() {
    let mut page = Page::new();
    page.set_title("Hello").set_text("<p>World</p>");

    let html = page.render().expect("render page");
    let body = body_of(&html);

    assert_eq!(count(body, "<h1>Hello</h1>"), 1);
    assert_eq!(count(body, "<p>World</p>"), 1);
    assert!(!html.contains("<!DOCTYPE"));
    assert!(!html.contains("rel=\"stylesheet\""));
    assert!(!html.contains("rel=\"canonical\""));
}

#[test]
fn test_render_meta_and_xhtml() {
    let mut page = Page::new();
    page.set_doctype("xhtml_strict")
        .expect("known doctype")
        .set_meta("<meta name=\"robots\" content=\"noindex\" />\n");

    let html = page.render().expect("render page");
    assert!(html.starts_with("<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Strict//EN\""));
    assert!(html.contains("<html xmlns=\"http://www.w3.org/1999/xhtml\">\n<head>\n"));
    assert!(html.contains(
        "<meta content=\"text/html; charset=utf-8\" http-equiv=\"Content-Type\" />\n"
    ));
    assert!(html.contains("<meta name=\"robots\" content=\"noindex\" />\n</head>"));
}

#[test]
fn test_custom_layout_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let layout = dir.path().join("layout.html");
    fs::write(
        &layout,
        "<html>{{ page.title -}}\n{{ title }}|{{ greeting? }}|{% if page.js %}js{% else %}nojs{% endif %}</html>",
    )
    .expect("write layout");

    let mut page = Page::new();
    page.set_layout(&layout).set_title("T").set("greeting", "hi");

    assert_eq!(page.layout(), Some(layout.as_path()));
    assert_eq!(page.render().unwrap(), "<html><title>T</title>\nT|hi|nojs</html>");

    page.add_js("a.js");
    assert!(page.render().unwrap().ends_with("|js</html>"));
}

#[test]
fn test_missing_layout_file() {
    let mut page = Page::new();
    page.set_layout("/nonexistent/layout.html");

    let err = page.render().unwrap_err();
    assert!(matches!(&err, TemplateError::NotFound(p) if p == Path::new("/nonexistent/layout.html")));
    assert!(err.to_string().contains("template not found"));
}

#[test]
fn test_string_conversion_reports_missing_layout() {
    let mut page = Page::new();
    page.set_title("Hello").set_layout("/nonexistent/layout.html");

    let result = String::try_from(&page);
    assert!(matches!(&result, Err(TemplateError::NotFound(p)) if p == Path::new("/nonexistent/layout.html")));

    let mut page = Page::new();
    page.set_template("/nonexistent/body.html");
    assert!(matches!(String::try_from(&page), Err(TemplateError::NotFound(_))));
}

#[test]
fn test_layout_missing_variable() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let layout = dir.path().join("layout.html");
    fs::write(&layout, "{{ nothing_here }}").expect("write layout");

    let mut page = Page::new();
    page.set_layout(&layout);

    assert!(matches!(
        page.render(),
        Err(TemplateError::MissingVariable(k)) if k == "nothing_here"
    ));
}

#[test]
fn test_render_from_config_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    write_body_template(dir.path());
    let page_path = dir.path().join("page.toml");
    fs::write(
        &page_path,
        r#"
doctype = "html4strict"
title = "From file"
domain = "https://example.com/"
canonical = "/from-file.html"
template = "body.html"
js = ["app.js"]

[[css]]
file = "print.css"
media = "print"

[body_attr]
class = "page"

[vars]
hello = "config"
"#,
    )
    .expect("write page file");

    let config = PageConfig::load(&page_path).expect("load page file");
    let page = Page::from_config(&config).expect("build page");
    let html = page.render().expect("render page");

    assert!(html.starts_with("<!DOCTYPE HTML PUBLIC \"-//W3C//DTD HTML 4.01//EN\""));
    assert!(html.contains("<title>From file</title>"));
    assert!(html.contains(
        "<link href=\"https://example.com/from-file.html\" rel=\"canonical\" />"
    ));
    assert!(html.contains("media=\"print\""));
    assert!(html.contains("<body class=\"page\">\nHello, config!\n<!-- JS -->"));
}
