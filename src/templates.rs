use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::error;

use crate::models::Flash;

/// Shared layout context injected into all templates
#[derive(Clone, Debug)]
pub struct LayoutContext {
    pub title: String,
    pub flashes: Vec<Flash>,
    pub show_nav: bool,
}

impl LayoutContext {
    pub fn new(title: impl Into<String>, flashes: Vec<Flash>) -> Self {
        Self {
            title: title.into(),
            flashes,
            show_nav: true,
        }
    }

    /// Hide the navigation bar, for pages shown before login
    pub fn without_nav(mut self) -> Self {
        self.show_nav = false;
        self
    }
}

/// Wrapper that converts Askama templates into Axum responses with logging
pub struct HtmlTemplate<T: Template> {
    template: T,
    status: StatusCode,
}

impl<T: Template> HtmlTemplate<T> {
    pub fn new(template: T) -> Self {
        Self {
            template,
            status: StatusCode::OK,
        }
    }
}

impl<T: Template> From<T> for HtmlTemplate<T> {
    fn from(template: T) -> Self {
        Self::new(template)
    }
}

impl<T: Template> IntoResponse for HtmlTemplate<T> {
    fn into_response(self) -> Response {
        match self.template.render() {
            Ok(html) => (self.status, Html(html)).into_response(),
            Err(err) => {
                error!(target: "templates", error = %err, "failed to render template");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Template rendering error",
                )
                    .into_response()
            }
        }
    }
}

/// One thumbnail tile on the home page; URLs are already percent-encoded
#[derive(Clone, Debug)]
pub struct PhotoView {
    pub filename: String,
    pub image_url: String,
    pub thumbnail_url: String,
    pub delete_url: String,
}

#[derive(Clone, Debug)]
pub struct CategoryView {
    pub name: String,
    pub photos: Vec<PhotoView>,
}

#[derive(Template)]
#[template(path = "home.html", escape = "html")]
pub struct HomeTemplate {
    pub layout: LayoutContext,
    pub username: String,
    pub categories: Vec<CategoryView>,
}

#[derive(Template)]
#[template(path = "login.html", escape = "html")]
pub struct LoginTemplate {
    pub layout: LayoutContext,
    pub error_msg: Option<String>,
}

#[derive(Template)]
#[template(path = "upload.html", escape = "html")]
pub struct UploadTemplate {
    pub layout: LayoutContext,
}

#[derive(Template)]
#[template(path = "about.html", escape = "html")]
pub struct AboutTemplate {
    pub layout: LayoutContext,
}
