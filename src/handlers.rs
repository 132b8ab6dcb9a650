use axum::{
    extract::{rejection::FormRejection, FromRequest, Request, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use crate::components::TemplateData;
use crate::errors::WikiError;
use crate::services::match_path;
use crate::types::{Action, AppState, ListEntry, Page};

const LIST_PATH: &str = "/list/";

/// Form submitted by the edit page
#[derive(Debug, Deserialize)]
pub struct SaveForm {
    #[serde(default)]
    pub body: String,
}

/// Handle root path requests
pub async fn handle_root() -> Html<&'static str> {
    Html("<h1>Welcome</h1><p>Browse the <a href=\"/list/\">list of pages</a>.</p>")
}

pub async fn handle_about() -> &'static str {
    "A small wiki: one text file per page, edited from the browser."
}

/// Every path that is not a static page: match it, then run the action.
pub async fn dispatch(State(state): State<AppState>, req: Request) -> Response {
    let Some(route) = match_path(req.uri().path()) else {
        log::warn!("No route for {}", req.uri().path());
        return WikiError::NotFound.into_response();
    };
    log::debug!("Dispatching {} for title {:?}", route.action.as_str(), route.title);

    let result = match route.action {
        Action::View => view(&state, &route.title),
        Action::Edit => edit(&state, &route.title),
        Action::List => list(&state),
        Action::Save => {
            if route.title.is_empty() {
                return found(LIST_PATH.to_string());
            }
            match Form::<SaveForm>::from_request(req, &state).await {
                Ok(Form(form)) => save(&state, &route.title, form.body),
                // No form content type means no form fields, so `body` is empty
                Err(FormRejection::InvalidFormContentType(_)) => {
                    save(&state, &route.title, String::new())
                }
                Err(rejection) => {
                    log::warn!("Rejected save form for {:?}: {}", route.title, rejection);
                    return rejection.into_response();
                }
            }
        }
    };
    result.unwrap_or_else(IntoResponse::into_response)
}

/// Render a stored page; pages that do not exist yet go to the editor
pub fn view(state: &AppState, title: &str) -> Result<Response, WikiError> {
    if title.is_empty() {
        return Ok(found(LIST_PATH.to_string()));
    }
    match state.pages.load(title) {
        Ok(page) => render_page(state, "view", &page),
        Err(WikiError::NotFound) => {
            log::info!("Page {:?} not found, redirecting to editor", title);
            Ok(found(format!("/edit/{}", title)))
        }
        Err(e) => Err(e),
    }
}

pub fn edit(state: &AppState, title: &str) -> Result<Response, WikiError> {
    if title.is_empty() {
        return Ok(found(LIST_PATH.to_string()));
    }
    let page = match state.pages.load(title) {
        Ok(page) => page,
        Err(WikiError::NotFound) => Page::empty(title),
        Err(e) => return Err(e),
    };
    render_page(state, "edit", &page)
}

pub fn save(state: &AppState, title: &str, body: String) -> Result<Response, WikiError> {
    let page = Page::new(title, body);
    state.pages.save(&page)?;
    Ok(found(format!("/view/{}", title)))
}

pub fn list(state: &AppState) -> Result<Response, WikiError> {
    let entries = state.pages.list()?;
    let data = TemplateData::new().with_list("Entries", entries.iter().map(entry_data).collect());
    let html = state.templates.render("list", &data)?;
    Ok(Html(html).into_response())
}

fn render_page(state: &AppState, template: &str, page: &Page) -> Result<Response, WikiError> {
    let data = TemplateData::new()
        .with_text("Title", page.title.as_str())
        .with_text("Body", page.body_text());
    let html = state.templates.render(template, &data)?;
    Ok(Html(html).into_response())
}

fn entry_data(entry: &ListEntry) -> TemplateData {
    TemplateData::new()
        .with_text("Name", entry.name.as_str())
        .with_text("Title", entry.title.as_deref().unwrap_or(""))
}

/// 302 Found
fn found(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}
