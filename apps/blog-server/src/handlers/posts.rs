//! Post handlers: list, show, and the create form.

use actix_web::http::header::{self, ContentType};
use actix_web::{HttpRequest, HttpResponse, web};

use scribe_core::RepoError;
use scribe_core::domain::NewPost;
use scribe_shared::CreatePostForm;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(body)
}

/// GET /
pub async fn index(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_recent().await?;
    Ok(html(state.views.post_list(&posts)?))
}

/// GET /post/{link}
pub async fn show(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let link = path.into_inner();

    match state.posts.find_by_link(&link).await {
        Ok(post) => Ok(html(state.views.post_detail(&post)?)),
        Err(RepoError::NotFound(_)) => {
            tracing::debug!(link = %link, "Post not found");
            Ok(HttpResponse::NotFound()
                .content_type(ContentType::html())
                .body(state.views.not_found(&link)?))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /create
pub async fn create_form(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    Ok(html(state.views.create_form()?))
}

/// POST /create
pub async fn create(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Form<CreatePostForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let post = state
        .posts
        .create(NewPost::new(form.title, form.link, form.body))
        .await?;

    let url = req
        .url_for("post", [&post.link])
        .map_err(|e| AppError::Internal(format!("cannot build post url: {e}")))?;
    let location = match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    };

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish())
}

/// Fallback for every unrouted path.
pub async fn not_found(req: HttpRequest) -> AppResult<HttpResponse> {
    Err(AppError::NotFound(req.path().to_string()))
}
