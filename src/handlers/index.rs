use crate::routes;
use crate::state::AppState;
use axum::{extract::State, response::Html};

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");
const PORT_PLACEHOLDER: &str = "{{ port }}";

pub fn render_index(port: u16) -> String {
    INDEX_TEMPLATE.replace(PORT_PLACEHOLDER, &port.to_string())
}

/// GET / handler - Landing page listing the available endpoints
#[utoipa::path(
    get,
    path = routes::INDEX,
    responses(
        (status = 200, description = "HTML landing page", body = String, content_type = "text/html")
    ),
    tag = "index"
)]
pub async fn index_handler(State(state): State<AppState>) -> Html<String> {
    Html(render_index(state.config.port))
}
