use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
};

use axum::{http::Method, Router};
use camino::Utf8PathBuf as PathBuf;
use clap::Parser;
use eyre::{eyre, Context, Result};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::MakeRequestUuid,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
    ServiceBuilderExt,
};
use tracing::{info, warn};
use tracing_error::ErrorLayer;
use tracing_subscriber::{prelude::*, EnvFilter};

use clipcheck::{
    app_state::{AppState, SharedState},
    routes,
    upload::UploadSettings,
};
use clipcheck_core::{
    config::{read_config, Config},
    ffprobe::FFProbe,
    startup_self_check,
};

const LOG_ENV_VAR: &str = "CLIPCHECK_LOG";
const DEFAULT_LOG_FILTER: &str = "info,clipcheck=debug,clipcheck_core=debug";

/// Checks uploaded videos against the contest submission rules
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML config file, built-in defaults are used if omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Don't check that ffprobe can be run before starting
    #[arg(long)]
    skip_startup_check: bool,
    /// OTLP collector to export traces to
    #[cfg(feature = "opentelemetry")]
    #[arg(long)]
    otel_endpoint: Option<String>,
}

fn set_env_default(key: &str, value: &str) {
    if std::env::var_os(key).is_none() {
        std::env::set_var(key, value);
    }
}

fn init_tracing(args: &Cli) -> Result<()> {
    set_env_default(LOG_ENV_VAR, DEFAULT_LOG_FILTER);
    let registry = tracing_subscriber::registry()
        .with(EnvFilter::from_env(LOG_ENV_VAR))
        .with(ErrorLayer::default())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    #[cfg(feature = "opentelemetry")]
    {
        let otel_layer = match &args.otel_endpoint {
            None => None,
            Some(endpoint) => Some(otel_tracer(endpoint)?),
        }
        .map(|tracer| tracing_opentelemetry::layer().with_tracer(tracer));
        registry.with(otel_layer).init();
    }
    #[cfg(not(feature = "opentelemetry"))]
    {
        let _ = args;
        registry.init();
    }
    Ok(())
}

#[cfg(feature = "opentelemetry")]
fn otel_tracer(endpoint: &str) -> Result<opentelemetry_sdk::trace::Tracer> {
    use opentelemetry_otlp::WithExportConfig;

    let resource = opentelemetry_sdk::Resource::new([opentelemetry::KeyValue::new(
        opentelemetry_semantic_conventions::resource::SERVICE_NAME,
        "clipcheck",
    )]);
    opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(
            opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint(endpoint),
        )
        .with_trace_config(opentelemetry_sdk::trace::config().with_resource(resource))
        .install_batch(opentelemetry_sdk::runtime::Tokio)
        .wrap_err("error setting up OpenTelemetry exporter")
}

fn listen_addr(config: &Config) -> Result<SocketAddr> {
    let ip = match &config.server.address {
        Some(address) => address
            .parse::<IpAddr>()
            .wrap_err_with(|| format!("invalid listening address '{}'", address))?,
        None => IpAddr::V4(Ipv4Addr::LOCALHOST),
    };
    Ok(SocketAddr::new(ip, config.server.port))
}

fn build_app(config: &Config) -> Router {
    let state: SharedState = Arc::new(AppState {
        prober: Arc::new(FFProbe::from_config(config)),
        criteria: config.criteria.clone(),
        upload: UploadSettings {
            max_size: config.server.max_upload_size,
            dir: config.server.upload_dir.clone(),
        },
    });

    let mut router = Router::new().nest("/api", routes::api_router(config.server.max_upload_size));
    if let Some(static_dir) = &config.server.static_dir {
        router = router.fallback_service(ServeDir::new(static_dir));
    }

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any);
    let http_tracing = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().include_headers(true))
        .on_response(DefaultOnResponse::new().include_headers(true));
    router
        .layer(
            ServiceBuilder::new()
                .set_x_request_id(MakeRequestUuid)
                .layer(http_tracing),
        )
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    set_env_default("RUST_LIB_BACKTRACE", "1");
    set_env_default("RUST_SPANTRACE", "1");
    color_eyre::install()?;
    init_tracing(&args)?;

    let config = match &args.config {
        Some(path) => read_config(path).await?,
        None => {
            info!("no config file given, using defaults");
            Config::default()
        }
    };

    if args.skip_startup_check {
        warn!("skipping startup self check");
    } else {
        startup_self_check::run_self_check(&config.bin_paths)
            .await
            .map_err(|()| eyre!("startup self check failed"))?;
    }

    if let Some(upload_dir) = &config.server.upload_dir {
        tokio::fs::create_dir_all(upload_dir)
            .await
            .wrap_err_with(|| format!("error creating upload directory {}", upload_dir))?;
    }

    let app = build_app(&config);
    let listener = tokio::net::TcpListener::bind(listen_addr(&config)?)
        .await
        .wrap_err("error binding socket")?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("server error")?;
    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        eprintln!("unable to listen for shutdown signal: {}", err);
        std::process::exit(1);
    }
}
