//! HTML views
//!
//! Two pages: Home (user tabs, visited countries, add form) and New User.
//! Every interpolated value goes through [`escape_html`].

use crate::models::user::DEFAULT_USER_COLOR;
use crate::models::User;

/// Colors offered on the new-user form
pub const PALETTE: &[&str] = &[
    "red", "orange", "yellow", "olive", "green", "teal", "blue", "violet", "purple", "pink",
];

/// View-model for the home page
#[derive(Debug, Clone)]
pub struct HomeView {
    pub users: Vec<User>,
    pub active_user: Option<User>,
    pub color: String,
    pub visited_codes: Vec<String>,
    pub count: usize,
}

impl HomeView {
    pub fn new(users: Vec<User>, active_user: Option<User>, visited_codes: Vec<String>) -> Self {
        let color = active_user
            .as_ref()
            .map_or_else(|| DEFAULT_USER_COLOR.to_owned(), |u| u.color.clone());

        Self {
            users,
            active_user,
            color,
            count: visited_codes.len(),
            visited_codes,
        }
    }
}

/// Escape text for HTML element content and quoted attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_html(title),
        body
    )
}

/// Render the home page.
pub fn render_home(view: &HomeView) -> String {
    let mut body = String::new();
    let color = escape_html(&view.color);

    body.push_str("<form class=\"tabs\" action=\"/user\" method=\"post\">\n");
    for user in &view.users {
        let active = view.active_user.as_ref().is_some_and(|a| a.id == user.id);
        body.push_str(&format!(
            "<button type=\"submit\" name=\"user\" value=\"{}\"{} style=\"background-color: {}\">{}</button>\n",
            user.id,
            if active { " class=\"active\"" } else { "" },
            escape_html(&user.color),
            escape_html(&user.name),
        ));
    }
    body.push_str(
        "<button type=\"submit\" name=\"add\" value=\"new\">Add Family Member</button>\n</form>\n",
    );

    body.push_str(&format!(
        "<h2 class=\"total-count\">Total Countries: {}</h2>\n",
        view.count
    ));

    body.push_str(&format!("<ul id=\"visited\" data-color=\"{}\">\n", color));
    for code in &view.visited_codes {
        let code = escape_html(code);
        body.push_str(&format!(
            "<li data-code=\"{}\" style=\"background-color: {}\">{}</li>\n",
            code, color, code
        ));
    }
    body.push_str("</ul>\n");

    match &view.active_user {
        Some(user) => body.push_str(&format!(
            "<form class=\"add\" action=\"/add/{}\" method=\"post\">\n\
             <input type=\"text\" name=\"country\" autofocus placeholder=\"Enter country name\">\n\
             <button type=\"submit\" style=\"background-color: {}\">Add</button>\n</form>\n",
            user.id, color
        )),
        None => body.push_str("<p>No family members yet. Add one to start tracking.</p>\n"),
    }

    page("Travel Tracker", &body)
}

/// Render the new-user form.
pub fn render_new_user() -> String {
    let mut body = String::new();
    body.push_str("<form action=\"/new\" method=\"post\">\n");
    body.push_str("<input type=\"text\" name=\"name\" autofocus placeholder=\"Enter your name\">\n");
    for (i, color) in PALETTE.iter().enumerate() {
        body.push_str(&format!(
            "<input type=\"radio\" name=\"color\" id=\"{color}\" value=\"{color}\"{}>\
             <label for=\"{color}\" style=\"background-color: {color}\"></label>\n",
            if i == 0 { " checked" } else { "" },
        ));
    }
    body.push_str("<button type=\"submit\">Add</button>\n</form>\n");

    page("Add Family Member", &body)
}
