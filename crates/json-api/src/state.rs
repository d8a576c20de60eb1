//! State

use std::{path::PathBuf, sync::Arc};

use stockroom_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) uploads_dir: PathBuf,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, uploads_dir: PathBuf) -> Self {
        Self { app, uploads_dir }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, uploads_dir: PathBuf) -> Arc<Self> {
        Arc::new(Self::new(app, uploads_dir))
    }
}
