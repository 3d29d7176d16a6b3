//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;

use crate::application::services::{
    CatalogServiceImpl, CourseServiceImpl, CurriculumServiceImpl, ResourceServiceImpl,
};
use crate::config::Settings;
use crate::domain::{CategoryRepository, CourseRepository, ResourceRepository, SectionRepository};
use crate::infrastructure::database;
use crate::infrastructure::repositories::Repositories;
use crate::presentation::http::{handlers, routes};
use crate::presentation::middleware::{cors, logging};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub repositories: Repositories,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(repositories: Repositories, settings: Settings) -> Self {
        Self {
            repositories,
            settings: Arc::new(settings),
        }
    }

    pub fn course_service(
        &self,
    ) -> CourseServiceImpl<dyn CourseRepository, dyn SectionRepository, dyn CategoryRepository> {
        CourseServiceImpl::new(
            self.repositories.courses.clone(),
            self.repositories.sections.clone(),
            self.repositories.catalog.clone(),
        )
    }

    pub fn curriculum_service(
        &self,
    ) -> CurriculumServiceImpl<dyn CourseRepository, dyn SectionRepository> {
        CurriculumServiceImpl::new(
            self.repositories.courses.clone(),
            self.repositories.sections.clone(),
        )
    }

    pub fn resource_service(
        &self,
    ) -> ResourceServiceImpl<dyn CourseRepository, dyn SectionRepository, dyn ResourceRepository> {
        ResourceServiceImpl::new(
            self.repositories.courses.clone(),
            self.repositories.sections.clone(),
            self.repositories.resources.clone(),
        )
    }

    pub fn catalog_service(&self) -> CatalogServiceImpl<dyn CategoryRepository> {
        CatalogServiceImpl::new(self.repositories.catalog.clone())
    }
}

/// Router with the full middleware stack applied
pub fn build_router(state: AppState) -> Router {
    let cors_layer = cors::create_cors_layer(&state.settings.cors);

    routes::create_router(state)
        .layer(logging::create_trace_layer())
        .layer(cors_layer)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        let db = database::create_pool(&settings.database)
            .await
            .context("Failed to connect to database")?;
        tracing::info!("Database connection pool created");

        if settings.database.run_migrations {
            database::run_migrations(&db)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");
        }

        handlers::health::init_server_start();

        let addr = settings.server_addr();
        let state = AppState::new(Repositories::postgres(db), settings);
        let router = build_router(state);

        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind to {}", addr))?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until a shutdown signal arrives
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

/// Resolves on Ctrl+C or SIGTERM
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
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received terminate signal, shutting down"),
    }
}
