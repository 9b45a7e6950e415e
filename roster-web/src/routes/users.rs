/// User CRUD pages
///
/// # Endpoints
///
/// - `GET  /`            - User list (`?page=N`)
/// - `GET  /add`         - Empty add form
/// - `POST /add`         - Create user, redirect to `/`
/// - `GET  /view/:id`    - User details
/// - `GET  /update/:id`  - Pre-filled update form
/// - `POST /update/:id`  - Save changes, redirect to `/view/:id`
/// - `GET  /delete/:id`  - Delete user, redirect to `/`
///
/// # Errors
///
/// - `400 Bad Request`: Form body missing or not form-encoded
/// - `404 Not Found`: Unknown or malformed id
/// - `409 Conflict`: Email already used by another user (form re-rendered)
/// - `422 Unprocessable Entity`: Invalid form input (form re-rendered)

use crate::{
    app::AppState,
    error::{AppError, AppResult},
    forms::{FieldError, UserForm},
    views::users::{self as pages, FormMode, Pagination},
};
use axum::{
    async_trait,
    extract::{
        rejection::{FormRejection, QueryRejection},
        FromRequestParts, Path, Query, State,
    },
    http::{request::Parts, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use roster_shared::{models::user::UpdateUser, store::StoreError};
use serde::Deserialize;
use tracing::info;

/// User id taken from the `:id` path segment
///
/// Anything that is not an integer is an unknown user, so it rejects with
/// 404 instead of axum's default 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound("User not found".to_string()))?;

        raw.parse::<i64>()
            .map(UserId)
            .map_err(|_| AppError::NotFound(format!("No user with id {}", raw)))
    }
}

/// Home page query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// 1-based page number; malformed values fall back to the first page
    pub page: Option<String>,
}

impl ListParams {
    fn page(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1)
    }
}

fn user_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("No user with id {}", id))
}

fn form_response(
    status: StatusCode,
    mode: FormMode,
    form: &UserForm,
    errors: &[FieldError],
) -> Response {
    (status, pages::form_page(mode, form, errors)).into_response()
}

fn duplicate_email_error() -> Vec<FieldError> {
    vec![FieldError::new(
        "email",
        "A user with this email address already exists",
    )]
}

/// `GET /`
pub async fn list_users(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> AppResult<Html<String>> {
    // Repeated or undecodable keys are treated like a missing page
    let params = params.map(|Query(p)| p).unwrap_or_default();
    let page_size = state.config.server.page_size;
    let total = state.store.count().await?;
    let pagination = Pagination::new(params.page(), page_size, total);

    let users = state
        .store
        .list(i64::from(page_size), pagination.offset(page_size))
        .await?;

    Ok(pages::list_page(&users, &pagination))
}

/// `GET /add`
pub async fn add_user_form() -> Html<String> {
    pages::form_page(FormMode::Add, &UserForm::default(), &[])
}

/// `POST /add`
pub async fn add_user(
    State(state): State<AppState>,
    form: Result<Form<UserForm>, FormRejection>,
) -> AppResult<Response> {
    let Form(form) = form?;
    let form = form.normalized();

    let new_user = match form.validate_input() {
        Ok(new_user) => new_user,
        Err(errors) => {
            return Ok(form_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                FormMode::Add,
                &form,
                &errors,
            ))
        }
    };

    match state.store.create(new_user).await {
        Ok(user) => {
            info!(user_id = user.id, "User added");
            Ok(Redirect::to("/").into_response())
        }
        Err(StoreError::DuplicateEmail(_)) => Ok(form_response(
            StatusCode::CONFLICT,
            FormMode::Add,
            &form,
            &duplicate_email_error(),
        )),
        Err(e) => Err(e.into()),
    }
}

/// `GET /view/:id`
pub async fn view_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> AppResult<Html<String>> {
    let user = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| user_not_found(id))?;

    Ok(pages::detail_page(&user))
}

/// `GET /update/:id`
pub async fn update_user_form(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> AppResult<Html<String>> {
    let user = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| user_not_found(id))?;

    Ok(pages::form_page(
        FormMode::Update(id),
        &UserForm::from(&user),
        &[],
    ))
}

/// `POST /update/:id`
pub async fn update_user(
    State(state): State<AppState>,
    UserId(id): UserId,
    form: Result<Form<UserForm>, FormRejection>,
) -> AppResult<Response> {
    // Unknown ids are 404 even when the submitted form is invalid
    if state.store.find_by_id(id).await?.is_none() {
        return Err(user_not_found(id));
    }

    let Form(form) = form?;
    let form = form.normalized();
    let mode = FormMode::Update(id);

    let changes = match form.validate_input() {
        Ok(new_user) => UpdateUser::from(new_user),
        Err(errors) => {
            return Ok(form_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                mode,
                &form,
                &errors,
            ))
        }
    };

    match state.store.update(id, changes).await {
        Ok(Some(user)) => {
            info!(user_id = user.id, "User updated");
            Ok(Redirect::to(&format!("/view/{}", user.id)).into_response())
        }
        Ok(None) => Err(user_not_found(id)),
        Err(StoreError::DuplicateEmail(_)) => Ok(form_response(
            StatusCode::CONFLICT,
            mode,
            &form,
            &duplicate_email_error(),
        )),
        Err(e) => Err(e.into()),
    }
}

/// `GET /delete/:id`
pub async fn delete_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> AppResult<Redirect> {
    if !state.store.delete(id).await? {
        return Err(user_not_found(id));
    }

    info!(user_id = id, "User deleted");
    Ok(Redirect::to("/"))
}
