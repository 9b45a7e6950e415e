//! User pages: list, detail and the shared add/update form

use super::{escape, layout};
use crate::forms::{error_for, FieldError, UserForm};
use axum::response::Html;
use roster_shared::models::user::User;

/// Position within the paged user list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based current page
    pub page: u32,

    /// Number of pages (at least 1)
    pub total_pages: u32,

    /// Users across all pages
    pub total_users: i64,
}

impl Pagination {
    /// Clamps `requested` into the valid page range for `total_users`
    pub fn new(requested: u32, page_size: u32, total_users: i64) -> Self {
        let page_size = i64::from(page_size.max(1));
        let total_pages = ((total_users.max(0) + page_size - 1) / page_size).max(1);
        let total_pages = u32::try_from(total_pages).unwrap_or(u32::MAX);

        Self {
            page: requested.clamp(1, total_pages),
            total_pages,
            total_users,
        }
    }

    /// Rows to skip for the current page
    pub fn offset(&self, page_size: u32) -> i64 {
        i64::from(self.page - 1) * i64::from(page_size)
    }
}

/// Which flavour of the user form to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Update(i64),
}

impl FormMode {
    fn action(&self) -> String {
        match self {
            FormMode::Add => "/add".to_string(),
            FormMode::Update(id) => format!("/update/{}", id),
        }
    }

    fn title(&self) -> &'static str {
        match self {
            FormMode::Add => "Add user",
            FormMode::Update(_) => "Update user",
        }
    }

    fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Add => "Add user",
            FormMode::Update(_) => "Save changes",
        }
    }
}

/// Home page: the user table
pub fn list_page(users: &[User], pagination: &Pagination) -> Html<String> {
    let mut body = String::new();

    if users.is_empty() {
        body.push_str(
            r#"        <p class="muted">No users yet. <a href="/add">Add the first one</a>.</p>
"#,
        );
    } else {
        body.push_str(
            r#"        <table>
            <thead>
                <tr><th>Name</th><th>Email</th><th>Age</th><th>City</th><th></th></tr>
            </thead>
            <tbody>
"#,
        );
        for user in users {
            body.push_str(&format!(
                r#"                <tr>
                    <td><a href="/view/{id}">{name}</a></td>
                    <td>{email}</td>
                    <td>{age}</td>
                    <td>{city}</td>
                    <td class="actions"><a href="/update/{id}">Edit</a><a href="/delete/{id}">Delete</a></td>
                </tr>
"#,
                id = user.id,
                name = escape(&user.full_name()),
                email = escape(&user.email),
                age = user.age,
                city = escape(&user.city),
            ));
        }
        body.push_str(
            r#"            </tbody>
        </table>
"#,
        );
    }

    body.push_str(&format!(
        r#"        <p class="muted">{} user{} in total</p>
"#,
        pagination.total_users,
        if pagination.total_users == 1 { "" } else { "s" },
    ));

    if pagination.total_pages > 1 {
        body.push_str(r#"        <div class="pager">"#);
        if pagination.page > 1 {
            body.push_str(&format!(
                r#"<a href="/?page={}">&larr; Previous</a>"#,
                pagination.page - 1
            ));
        }
        body.push_str(&format!(
            "<span>Page {} of {}</span>",
            pagination.page, pagination.total_pages
        ));
        if pagination.page < pagination.total_pages {
            body.push_str(&format!(
                r#"<a href="/?page={}">Next &rarr;</a>"#,
                pagination.page + 1
            ));
        }
        body.push_str("</div>\n");
    }

    Html(layout("Users", &body))
}

/// Detail page for one user
pub fn detail_page(user: &User) -> Html<String> {
    let body = format!(
        r#"        <dl>
            <dt>First name</dt><dd>{first_name}</dd>
            <dt>Last name</dt><dd>{last_name}</dd>
            <dt>Email</dt><dd>{email}</dd>
            <dt>Age</dt><dd>{age}</dd>
            <dt>City</dt><dd>{city}</dd>
            <dt>Created</dt><dd>{created}</dd>
            <dt>Updated</dt><dd>{updated}</dd>
        </dl>
        <p class="actions">
            <a href="/update/{id}">Edit</a>
            <a href="/delete/{id}">Delete</a>
            <a href="/">Back to list</a>
        </p>
"#,
        id = user.id,
        first_name = escape(&user.first_name),
        last_name = escape(&user.last_name),
        email = escape(&user.email),
        age = user.age,
        city = escape(&user.city),
        created = user.created_at.format("%Y-%m-%d %H:%M UTC"),
        updated = user.updated_at.format("%Y-%m-%d %H:%M UTC"),
    );

    Html(layout(&user.full_name(), &body))
}

/// Add or update form, with any field errors next to their inputs
pub fn form_page(mode: FormMode, form: &UserForm, errors: &[FieldError]) -> Html<String> {
    let fields = [
        ("first_name", "First name", "text", form.first_name.as_str()),
        ("last_name", "Last name", "text", form.last_name.as_str()),
        ("email", "Email", "email", form.email.as_str()),
        ("age", "Age", "number", form.age.as_str()),
        ("city", "City", "text", form.city.as_str()),
    ];

    let mut body = format!(
        "        <form method=\"post\" action=\"{}\">\n",
        mode.action()
    );

    for (name, label, kind, value) in fields {
        body.push_str(&format!(
            r#"            <p>
                <label for="{name}">{label}</label>
                <input id="{name}" name="{name}" type="{kind}" value="{value}" required>
"#,
            value = escape(value),
        ));
        if let Some(message) = error_for(errors, name) {
            body.push_str(&format!(
                "                <span class=\"error\">{}</span>\n",
                escape(message)
            ));
        }
        body.push_str("            </p>\n");
    }

    let cancel = match mode {
        FormMode::Add => "/".to_string(),
        FormMode::Update(id) => format!("/view/{}", id),
    };
    body.push_str(&format!(
        r#"            <p class="actions"><button type="submit">{}</button> <a href="{}">Cancel</a></p>
        </form>
"#,
        mode.submit_label(),
        cancel,
    ));

    Html(layout(mode.title(), &body))
}
