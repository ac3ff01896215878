//! Core library for the studio site backend: the contact form wizard, its
//! persistence and notification clients, and the brief-email HTTP service.

pub mod config;
pub mod database;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod notification;
pub mod persistence;
pub mod wizard;

pub use crate::config::AppConfig;
pub use database::{SubmissionRepository, get_database_pool, run_migrations};
pub use error::{AppError, Result};
pub use handlers::routes::create_routes;
pub use models::{FormPath, InquiryRecord, ProjectCatalog, ServiceRequestRecord, SubmissionRecord, Table};
pub use notification::{Mailer, NotificationClient, Notifier, ResendMailer};
pub use persistence::{PersistenceClient, SubmissionStore};
pub use wizard::{FormWizard, WizardEvent};

use axum::Router;
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub mailer: Option<Arc<dyn Mailer>>,
    pub email_from: String,
    pub projects: Arc<ProjectCatalog>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            app_name: "Studio Site API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            mailer: None,
            email_from: crate::config::EmailConfig::default().from,
            projects: Arc::new(ProjectCatalog::default()),
        }
    }
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let mut state = Self {
            email_from: config.email.from.clone(),
            ..Self::default()
        };

        if let Some(mailer) = ResendMailer::from_config(&config.email)? {
            state = state.with_mailer(mailer);
        }

        Ok(state)
    }

    pub fn with_mailer<M: Mailer + 'static>(mut self, mailer: M) -> Self {
        self.mailer = Some(Arc::new(mailer));
        self
    }

    pub fn with_email_from(mut self, from: impl Into<String>) -> Self {
        self.email_from = from.into();
        self
    }

    pub fn with_projects(mut self, projects: ProjectCatalog) -> Self {
        self.projects = Arc::new(projects);
        self
    }
}

pub fn create_app(state: AppState) -> Router {
    create_app_with_config(state, &AppConfig::default())
}

pub fn create_app_with_config(state: AppState, config: &AppConfig) -> Router {
    let router = Router::new()
        .merge(create_routes())
        .layer(middleware::cors::cors_layer_from_config(&config.cors));

    middleware::logging::with_request_logging(router).with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
