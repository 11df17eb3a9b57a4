use std::convert::Infallible;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use wxbrief_core::{Config, LfvReports, SmhiForecasts, TimeWindow};

pub async fn run(address: std::net::SocketAddr, config: Config) {
    let state = Arc::new(State {
        config,
        forecasts: SmhiForecasts::new(),
        reports: LfvReports::new(),
    });

    let briefing_route = warp::path::end()
        .and(warp::get())
        .and(warp::query::<BriefingQuery>())
        .and(with_state(state))
        .and_then(briefing);

    let health_route = warp::path!("health").map(|| StatusCode::OK);

    let routes = briefing_route.or(health_route).recover(rejection);

    warp::serve(routes).run(address).await
}

#[derive(Debug)]
struct State {
    config: Config,
    forecasts: SmhiForecasts,
    reports: LfvReports,
}

#[derive(Debug, Deserialize)]
struct BriefingQuery {
    from: Option<String>,
    to: Option<String>,
    locations: Option<String>,
}

fn with_state(state: Arc<State>) -> impl Filter<Extract = (Arc<State>,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

async fn briefing(query: BriefingQuery, state: Arc<State>) -> Result<impl Reply, Rejection> {
    let window = TimeWindow::new(query.from.as_deref(), query.to.as_deref())
        .map_err(|e| warp::reject::custom(Error(e.into())))?;

    let briefing = wxbrief_core::assemble(
        &state.config,
        &state.forecasts,
        &state.reports,
        &window,
        query.locations.as_deref(),
    )
    .await
    .map_err(|e| warp::reject::custom(Error(e)))?;

    Ok(warp::reply::json(&briefing))
}

#[derive(Debug)]
struct Error(anyhow::Error);
impl warp::reject::Reject for Error {}

#[derive(Serialize)]
struct ErrorMessage {
    code: u16,
    message: String,
}

async fn rejection(err: warp::Rejection) -> Result<impl Reply, Infallible> {
    let code = StatusCode::INTERNAL_SERVER_ERROR;
    let message = "Internal server error.";

    log::error!("Error: {:?}", err);

    let json = warp::reply::json(&ErrorMessage {
        code: code.as_u16(),
        message: message.into(),
    });

    Ok(warp::reply::with_status(json, code))
}
