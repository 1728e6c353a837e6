//! Server-side HTML pages
//!
//! Small rendering functions over the typed models; all user-supplied
//! text goes through [`escape`].

use std::fmt::Write;

use crate::core::models::{PostWithAuthor, RegisterForm};

/// Escape text for interpolation into HTML body or attribute positions.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, nav: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - Microblog</title>
</head>
<body>
<nav>{nav}</nav>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
    )
}

fn nav(viewer: Option<&str>) -> String {
    match viewer {
        Some(name) => format!(
            r#"<a href="/">Home</a> | Signed in as {} | <a href="/logout">Log out</a>"#,
            escape(name)
        ),
        None => r#"<a href="/">Home</a> | <a href="/login">Log in</a> | <a href="/register">Register</a>"#
            .to_string(),
    }
}

fn notice(message: Option<&str>) -> String {
    match message {
        Some(msg) => format!(r#"<p class="notice">{}</p>"#, escape(msg)),
        None => String::new(),
    }
}

pub fn home_page(posts: &[PostWithAuthor], viewer: Option<&str>, message: Option<&str>) -> String {
    let mut body = String::new();
    body.push_str(&notice(message));

    if viewer.is_some() {
        body.push_str(
            r#"<form method="post" action="/post">
<input type="text" name="title" placeholder="Title">
<textarea name="content" placeholder="What's on your mind?"></textarea>
<button type="submit">Publish</button>
</form>
"#,
        );
    }

    if posts.is_empty() {
        body.push_str("<p>No posts yet.</p>\n");
    }
    for post in posts {
        let _ = write!(
            body,
            r#"<article>
<h2>{title}</h2>
<p>{content}</p>
<footer>by {author} on {date}</footer>
</article>
"#,
            title = escape(&post.title),
            content = escape(&post.content),
            author = escape(&post.author_name),
            date = post.created_at.format("%Y-%m-%d %H:%M"),
        );
    }

    layout("Home", &nav(viewer), &body)
}

pub fn login_page(error: Option<&str>, email: &str) -> String {
    let body = format!(
        r#"{notice}<h1>Log in</h1>
<form method="post" action="/login">
<input type="email" name="email" value="{email}" placeholder="Email">
<input type="password" name="password" placeholder="Password">
<button type="submit">Log in</button>
</form>
<p>No account? <a href="/register">Register</a></p>
"#,
        notice = notice(error),
        email = escape(email),
    );

    layout("Log in", &nav(None), &body)
}

pub fn register_page(error: Option<&str>, form: &RegisterForm) -> String {
    let body = format!(
        r#"{notice}<h1>Register</h1>
<form method="post" action="/register">
<input type="text" name="first_name" value="{first_name}" placeholder="First name">
<input type="text" name="last_name" value="{last_name}" placeholder="Last name">
<input type="email" name="email" value="{email}" placeholder="Email">
<input type="password" name="password" placeholder="Password">
<input type="password" name="confirm_password" placeholder="Confirm password">
<button type="submit">Register</button>
</form>
<p>Already registered? <a href="/login">Log in</a></p>
"#,
        notice = notice(error),
        first_name = escape(&form.first_name),
        last_name = escape(&form.last_name),
        email = escape(&form.email),
    );

    layout("Register", &nav(None), &body)
}

pub fn server_error() -> String {
    layout(
        "Server error",
        &nav(None),
        "<h1>Something went wrong</h1>\n<p>Please try again later.</p>\n",
    )
}
