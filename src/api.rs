use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::error::{DispatchError, QueryError};
use crate::io::census::parse_year;
use crate::model::census::Dataset;
use crate::model::metric::Metric;
use crate::model::selection::{Event, RegionChoice, Selection, StalePolicy};
use crate::page::render_page;
use crate::session::Dispatcher;

#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub dispatcher: Dispatcher,
    pub chart_size: (u32, u32),
}

impl AppState {
    /// Shares `dataset` with a freshly spawned dispatcher. Needs a tokio runtime.
    pub fn new(dataset: Arc<Dataset>, policy: StalePolicy, queue_depth: usize, chart_size: (u32, u32)) -> Self {
        let dispatcher = Dispatcher::spawn(dataset.clone(), policy, queue_depth);
        Self {
            dataset,
            dispatcher,
            chart_size,
        }
    }
}

/// Form fields as they arrive on `GET /`. Everything is optional; a bare
/// `GET /` is the page mount.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub year: Option<String>,
    pub sido: Option<String>,
    pub sgg: Option<String>,
    pub category: Option<String>,
    pub changed: Option<String>,
}

impl DashboardQuery {
    /// The selection the client currently holds, plus the event for the field
    /// named by `changed` (carrying that field's new value).
    pub fn parse(&self, dataset: &Dataset) -> Result<(Selection, Option<Event>), QueryError> {
        let mut sel = Selection::initial(dataset);

        if let Some(year) = self.year.as_deref().filter(|y| !y.trim().is_empty()) {
            sel.year = parse_year(year).map_err(|_| QueryError::Year(year.to_string()))?;
        }
        if let Some(sido) = &self.sido {
            sel.sido = RegionChoice::from_wire(sido);
        }
        if let Some(sgg) = &self.sgg {
            sel.sgg = RegionChoice::from_wire(sgg);
        }
        if let Some(category) = self.category.as_deref().filter(|c| !c.trim().is_empty()) {
            sel.category = category.parse::<Metric>()?;
        }

        let event = match self.changed.as_deref().map(str::trim) {
            None | Some("") => None,
            Some("year") => Some(Event::YearChanged(sel.year)),
            Some("sido") => Some(Event::SidoChanged(sel.sido.clone())),
            Some("sgg") => Some(Event::SggChanged(sel.sgg.clone())),
            Some("category") => Some(Event::CategoryChanged(sel.category)),
            Some(other) => return Err(QueryError::Changed(other.to_string())),
        };

        Ok((sel, event))
    }
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/", get(index)).with_state(state)
}

async fn index(State(st): State<AppState>, Query(q): Query<DashboardQuery>) -> Response {
    let (selection, event) = match q.parse(&st.dataset) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(error = %e, "rejected dashboard query");
            return e.into_response();
        }
    };

    let view = match st.dispatcher.dispatch(selection, event).await {
        Ok(view) => view,
        Err(e) => return e.into_response(),
    };

    let (w, h) = st.chart_size;
    let svg = view.chart.to_svg(w, h);
    let chart = match &svg {
        Ok(svg) => Ok(svg.as_str()),
        Err(e) => {
            warn!(error = %e, "chart rendering failed");
            Err("차트를 그릴 수 없습니다")
        }
    };

    Html(render_page(&view, chart)).into_response()
}

/// Serve the dashboard until the listener fails.
pub async fn serve(listener: TcpListener, state: AppState) -> anyhow::Result<()> {
    info!(addr = %listener.local_addr()?, "dashboard listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
