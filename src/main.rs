use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

use waste_routing::config::environment::EnvironmentConfig;
use waste_routing::database::{create_pool, run_migrations, seed_demo_data};
use waste_routing::repositories::{
    InMemoryEmployeeStore, InMemoryPointStore, InMemoryRouteStore, InMemoryVehicleStore, PgCollectionPointRepository,
    PgEmployeeRepository, PgRouteRepository, PgVehicleRepository,
};
use waste_routing::routes::create_app;
use waste_routing::state::AppState;
use waste_routing::Stores;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt().with_max_level(config.log_level).init();

    info!("♻️ Waste Collection Route Engine");
    info!("================================================");

    let stores = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url, config.database_max_connections).await?;
            run_migrations(&pool).await?;
            Stores {
                points: Arc::new(PgCollectionPointRepository::new(pool.clone())),
                vehicles: Arc::new(PgVehicleRepository::new(pool.clone())),
                employees: Arc::new(PgEmployeeRepository::new(pool.clone())),
                routes: Arc::new(PgRouteRepository::new(pool)),
            }
        }
        None => {
            warn!("⚠️ DATABASE_URL no definida, usando store en memoria");
            let stores = Stores {
                points: Arc::new(InMemoryPointStore::new()),
                vehicles: Arc::new(InMemoryVehicleStore::new()),
                employees: Arc::new(InMemoryEmployeeStore::new()),
                routes: Arc::new(InMemoryRouteStore::new()),
            };
            if config.seed_demo_data {
                seed_demo_data(&stores).await?;
            }
            stores
        }
    };

    if config.reserve_on_generate {
        info!("🔒 Reserva de recursos al generar rutas activada");
    }

    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_app(AppState::new(config, stores));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("   POST   /api/routes/generate - Generar ruta optimizada");
    info!("   PATCH  /api/routes/:id/status?status= - Cambiar estado");
    info!("   GET    /api/routes - Listar rutas");
    info!("   GET    /api/points/alerts - Alertas de contenedores");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
