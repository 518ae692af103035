use crate::session::Session;
use crate::source::PitchSource;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn PitchSource>,
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(source: Arc<dyn PitchSource>, session: Session) -> Self {
        Self {
            source,
            session: Arc::new(Mutex::new(session)),
        }
    }
}
