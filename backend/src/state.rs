use std::sync::Arc;

use crate::config::Config;
use crate::db::connection::DbPool;
use crate::repositories::directory::PgLoginDirectory;
use crate::repositories::employee_request::EmployeeRequestRepository;
use crate::repositories::scheduled_deactivation::ScheduledDeactivationRepository;
use crate::services::events::EventBus;
use crate::services::lifecycle::RequestLifecycle;
use crate::validation::RequestValidator;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Config,
    pub lifecycle: Arc<RequestLifecycle>,
    pub events: EventBus,
}

impl AppState {
    pub fn new(pool: DbPool, config: Config) -> Self {
        let events = EventBus::default();
        let directory = Arc::new(PgLoginDirectory::new(pool.clone()));
        let validator = RequestValidator::new(directory, &config);
        let lifecycle = Arc::new(RequestLifecycle::new(
            Arc::new(EmployeeRequestRepository::new()),
            Arc::new(ScheduledDeactivationRepository::new()),
            validator,
            events.clone(),
        ));
        Self {
            pool,
            config,
            lifecycle,
            events,
        }
    }
}
