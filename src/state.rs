use crate::config::Config;
use crate::services::StatsService;
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub service: StatsService,
    pub config: Config,
}

impl FromRef<AppState> for StatsService {
    fn from_ref(state: &AppState) -> Self {
        state.service.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
