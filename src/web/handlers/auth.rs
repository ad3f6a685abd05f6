use crate::api::LoginError;
use crate::components::{LoginForm, SubmitError};
use crate::storage::CookieStore;
use crate::web::error::AppResult;
use crate::web::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use std::sync::Arc;

fn render_login(state: &AppState, form: &LoginForm) -> AppResult<String> {
    let mut ctx = state.context();
    form.fill_context(&mut ctx);
    Ok(state.templates.render("pages/login.html", &ctx)?)
}

pub async fn login_page(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let html = render_login(&state, &LoginForm::new())?;
    Ok(Html(html))
}

#[derive(Deserialize)]
pub struct LoginFormData {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(data): Form<LoginFormData>,
) -> AppResult<Response> {
    let mut form = LoginForm::with_credentials(data.username, data.password);
    let mut store = CookieStore::new(jar);

    let status = match form.submit(&state.api, &mut store).await {
        Ok(()) => StatusCode::OK,
        Err(e) => submit_error_status(&e),
    };

    let html = render_login(&state, &form)?;
    Ok((status, store.into_jar(), Html(html)).into_response())
}

fn submit_error_status(err: &SubmitError) -> StatusCode {
    match err {
        SubmitError::Busy => StatusCode::CONFLICT,
        SubmitError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SubmitError::Login(LoginError::Rejected { status, .. }) if status.is_client_error() => *status,
        SubmitError::Login(_) => StatusCode::BAD_GATEWAY,
        SubmitError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
