use crate::AppState;
use axum::{extract::State, response::Html};

/// Landing page
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Links to the product list and the documentation")
    ),
    tag = "Home"
)]
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let base = state.config.public_url.trim_end_matches('/');
    Html(format!(
        "<h1><a href=\"{base}/products\">Products</a></h1><br>\
         <h1><a href=\"{base}/documentation\">Documentation</a></h1>"
    ))
}
