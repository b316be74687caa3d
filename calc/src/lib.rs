pub mod arith;

use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
use common::EvalResponse;
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::debug;

pub fn build_router() -> Router {
    Router::new()
        .route("/", get(evaluate))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
}

/* ---------------- handlers HTTP ---------------- */

async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
struct EvalQuery {
    expr: Option<String>,
}

// Los errores de evaluación van con 200 y el texto en "Error";
// sólo la falta de `expr` es un 400.
async fn evaluate(Query(q): Query<EvalQuery>) -> (StatusCode, Json<EvalResponse>) {
    let Some(expr) = q.expr else {
        return (
            StatusCode::BAD_REQUEST,
            Json(EvalResponse::err("missing expr parameter")),
        );
    };

    match arith::evaluate(&expr) {
        Ok(result) => {
            debug!("{} = {}", expr, result);
            (StatusCode::OK, Json(EvalResponse::ok(result)))
        }
        Err(e) => {
            debug!("{} -> error: {}", expr, e);
            (StatusCode::OK, Json(EvalResponse::err(e.to_string())))
        }
    }
}
