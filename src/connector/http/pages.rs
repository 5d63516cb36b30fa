//! Server-rendered list page and its form actions.
//!
//! Successful actions redirect back to the list with a one-shot success
//! message. Validation and business failures re-render the list with the
//! error messages instead.

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use tracing::error;

use super::{AppState, TodoForm, TodoView, SYSTEM_ERROR_MESSAGE};
use crate::connector::{validate_title, validate_todo_id, ValidationError};
use crate::domain::DomainError;

pub const LIST_PATH: &str = "/todo/list";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    fn css_class(&self) -> &'static str {
        match self {
            MessageKind::Success => "alert-success",
            MessageKind::Error => "alert-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl PageMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }
}

/// Outcome of a form action before it is turned into a response.
enum ActionError {
    Invalid(ValidationError),
    Domain(DomainError),
}

impl From<ValidationError> for ActionError {
    fn from(err: ValidationError) -> Self {
        Self::Invalid(err)
    }
}

impl From<DomainError> for ActionError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

/// `GET /todo/list`
pub async fn list(State(state): State<AppState>) -> Response {
    let flash = state.flash.lock().await.take();
    render_list(&state, flash.into_iter().collect(), "").await
}

/// `POST /todo/create`
pub async fn create(State(state): State<AppState>, Form(form): Form<TodoForm>) -> Response {
    let result: Result<(), ActionError> = async {
        let title = validate_title(form.todo_title.as_deref())?;
        state.service().create(title).await?;
        Ok(())
    }
    .await;

    let draft = form.todo_title.as_deref().unwrap_or_default();
    complete(&state, result, "Created successfully!", draft).await
}

/// `POST /todo/finish`
pub async fn finish(State(state): State<AppState>, Form(form): Form<TodoForm>) -> Response {
    let result: Result<(), ActionError> = async {
        let id = validate_todo_id(form.todo_id.as_deref())?;
        state.service().finish(id).await?;
        Ok(())
    }
    .await;

    complete(&state, result, "Finished successfully!", "").await
}

/// `POST /todo/delete`
pub async fn delete(State(state): State<AppState>, Form(form): Form<TodoForm>) -> Response {
    let result: Result<(), ActionError> = async {
        let id = validate_todo_id(form.todo_id.as_deref())?;
        state.service().delete(id).await?;
        Ok(())
    }
    .await;

    complete(&state, result, "Deleted successfully!", "").await
}

/// `draft_title` is put back into the create form when the list is re-rendered.
async fn complete(
    state: &AppState,
    result: Result<(), ActionError>,
    success: &str,
    draft_title: &str,
) -> Response {
    match result {
        Ok(()) => {
            *state.flash.lock().await = Some(PageMessage::success(success));
            Redirect::to(LIST_PATH).into_response()
        }
        Err(ActionError::Invalid(e)) => {
            render_list(state, vec![PageMessage::error(e.to_string())], draft_title).await
        }
        Err(ActionError::Domain(e)) if e.is_not_found() || e.is_business_rule_violation() => {
            render_list(state, vec![PageMessage::error(e.to_string())], draft_title).await
        }
        Err(ActionError::Domain(e)) => {
            error!("Page action failed: {}", e);
            let page = render_page(&[], &[PageMessage::error(SYSTEM_ERROR_MESSAGE)], draft_title);
            (StatusCode::INTERNAL_SERVER_ERROR, Html(page)).into_response()
        }
    }
}

async fn render_list(state: &AppState, messages: Vec<PageMessage>, draft_title: &str) -> Response {
    match state.service().find_all().await {
        Ok(todos) => {
            let views: Vec<TodoView> = todos.iter().map(TodoView::from).collect();
            Html(render_page(&views, &messages, draft_title)).into_response()
        }
        Err(e) => {
            error!("Failed to load todos for list page: {}", e);
            let page = render_page(&[], &[PageMessage::error(SYSTEM_ERROR_MESSAGE)], draft_title);
            (StatusCode::INTERNAL_SERVER_ERROR, Html(page)).into_response()
        }
    }
}

pub fn render_page(todos: &[TodoView], messages: &[PageMessage], draft_title: &str) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Todo List</title>\n\
         <style>.strike{text-decoration:line-through;}.alert-error{color:#c00;}.alert-success{color:#080;}</style>\n\
         </head>\n<body>\n<h1>Todo List</h1>\n",
    );

    for message in messages {
        html.push_str(&format!(
            "<div class=\"{}\">{}</div>\n",
            message.kind.css_class(),
            escape_html(&message.text)
        ));
    }

    html.push_str(&format!(
        "<form action=\"/todo/create\" method=\"post\">\n\
         <input type=\"text\" name=\"todoTitle\" value=\"{}\">\n\
         <button type=\"submit\">Create Todo</button>\n</form>\n<hr>\n<ul>\n",
        escape_html(draft_title)
    ));

    for todo in todos {
        let id = escape_html(&todo.id);
        let title = escape_html(&todo.title);
        html.push_str("<li>");
        if todo.finished {
            html.push_str(&format!("<span class=\"strike\">{}</span>", title));
        } else {
            html.push_str(&format!(
                "{} <form action=\"/todo/finish\" method=\"post\" style=\"display:inline\">\
                 <input type=\"hidden\" name=\"todoId\" value=\"{}\">\
                 <button type=\"submit\">Finish</button></form>",
                title, id
            ));
        }
        html.push_str(&format!(
            " <form action=\"/todo/delete\" method=\"post\" style=\"display:inline\">\
             <input type=\"hidden\" name=\"todoId\" value=\"{}\">\
             <button type=\"submit\">Delete</button></form> <small>{}</small></li>\n",
            id,
            escape_html(&todo.created_at)
        ));
    }

    html.push_str("</ul>\n</body>\n</html>\n");
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
            _ => escaped.push(c),
        }
    }
    escaped
}
