//! Site root greeting

use axum::{routing::get, Router};

/// GET /
async fn home() -> &'static str {
    "Hello World!"
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn greets() {
        assert_eq!(home().await, "Hello World!");
    }
}
