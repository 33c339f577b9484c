use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use dotenvy::dotenv;

use fleet_dashboard::config::environment::EnvironmentConfig;
use fleet_dashboard::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🤖 Robot Fleet Manager");
    info!("================================================");

    let config = match EnvironmentConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Configuración inválida: {}", e);
            return Err(anyhow::anyhow!("Error de configuración: {}", e));
        }
    };

    let addr: SocketAddr = config.server_url().parse()?;
    let state = AppState::from_config(config)?;
    let app = create_router(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  / - Dashboard");
    info!("   GET  /units - Listado de unidades");
    info!("   GET  /units/maintenance - Unidades en mantenimiento");
    info!("   GET  /units/:id - Detalle de unidad");
    info!("   POST /units/:id - Actualizar unidad");
    info!("   GET  /api/units - Unidades (JSON)");
    info!("   GET  /api/units/:id - Unidad (JSON)");
    info!("   GET  /api/fleet/health - Salud de la flota");
    info!("   GET  /api/health - Health check");
    info!("   POST /api/auth/login - Login");
    info!("   GET  /api/auth/verify - Verificar token");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
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
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
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
