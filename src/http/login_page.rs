//! Login page template
//!
//! The password form shown for the protected page.

pub const PAGE_TITLE: &str = "Password Required - Agile Software Development";
pub const INCORRECT_PASSWORD: &str = "Incorrect password. Please try again.";

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>"#;

const PAGE_STYLES: &str = r#"</title>
    <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css" rel="stylesheet">
</head>
<body class="bg-light">
    <div class="container">
        <div class="row justify-content-center mt-5">
            <div class="col-md-6 col-lg-4">
                <div class="card shadow-sm">
                    <div class="card-body">
                        <h2 class="card-title text-center mb-4">Password Required</h2>
"#;

const PAGE_FORM: &str = r#"                        <form method="POST">
                            <div class="mb-3">
                                <label for="password" class="form-label">Password</label>
                                <input type="password" class="form-control" id="password" name="password" required autofocus>
                            </div>
                            <button type="submit" class="btn btn-primary w-100">Submit</button>
                        </form>
                    </div>
                </div>
            </div>
        </div>
    </div>
</body>
</html>
"#;

/// Render the login page, optionally with an error banner above the form
pub fn render(error: Option<&str>) -> String {
    let mut html = String::with_capacity(
        PAGE_HEAD.len() + PAGE_TITLE.len() + PAGE_STYLES.len() + PAGE_FORM.len() + 128,
    );
    html.push_str(PAGE_HEAD);
    html.push_str(PAGE_TITLE);
    html.push_str(PAGE_STYLES);
    if let Some(message) = error {
        html.push_str("                        <div class=\"alert alert-danger\">");
        html.push_str(&escape_html(message));
        html.push_str("</div>\n");
    }
    html.push_str(PAGE_FORM);
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
