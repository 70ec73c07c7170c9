use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::render::Views;

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub views: Arc<Views>,
}

impl AppState {
    pub fn new(orm: DatabaseConnection, views: Views) -> Self {
        Self {
            orm,
            views: Arc::new(views),
        }
    }
}
