use crate::data::{BookingView, SchedulingInput, SchedulingOutput};
use crate::error::ValidationError;
use crate::report;
use crate::solver;
use axum::{Json, Router, http::StatusCode, routing::post};
use log::{info, warn};
use serde_json::Value;
use std::collections::BTreeMap;

type Rejection = (StatusCode, String);

// bodies arrive as plain JSON so that shape errors are validation failures too
fn parse(body: Value) -> Result<SchedulingInput, ValidationError> {
    Ok(serde_json::from_value(body)?)
}

fn reject(e: ValidationError) -> Rejection {
    warn!("Rejected scheduling input: {}", e);
    (StatusCode::BAD_REQUEST, e.to_string())
}

async fn solve_handler(Json(body): Json<Value>) -> Result<Json<SchedulingOutput>, Rejection> {
    let input = parse(body).map_err(reject)?;
    solver::solve(&input).map(Json).map_err(reject)
}

async fn by_student_handler(
    Json(body): Json<Value>,
) -> Result<Json<BTreeMap<String, Vec<BookingView>>>, Rejection> {
    let input = parse(body).map_err(reject)?;
    let timetable = solver::generate(&input).map_err(reject)?;
    Ok(Json(report::by_student_group(&timetable)))
}

pub fn router() -> Router {
    Router::new()
        .route("/v1/timetable/solve", post(solve_handler))
        .route("/v1/timetable/by-student", post(by_student_handler))
}

pub async fn run_server(addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, router()).await
}
