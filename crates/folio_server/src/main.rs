//! Headless API server entrypoint.

use folio_core::DEFAULT_PORT;
use folio_server::{bind_address, config::Config, create_app, db::Database, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct CliFlags {
    help: bool,
    check_gate: bool,
}

fn parse_cli_flags(args: &[String]) -> anyhow::Result<CliFlags> {
    let mut flags = CliFlags::default();
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--help" => flags.help = true,
            "--check-gate" => flags.check_gate = true,
            value if value.starts_with('-') => {
                anyhow::bail!(
                    "Unknown option: '{}'. Use --help to see supported options.",
                    value
                );
            }
            value => {
                anyhow::bail!(
                    "Unexpected positional argument: '{}'. Use --help to see supported options.",
                    value
                );
            }
        }
    }
    Ok(flags)
}

fn runs_maintenance_mode(flags: CliFlags) -> bool {
    flags.check_gate
}

/// Refresh the gate once on a blocking thread and report the resulting state.
async fn warm_gate(state: &AppState) -> anyhow::Result<bool> {
    let gate = state.gate.clone();
    let active = tokio::task::spawn_blocking(move || gate.status()).await?;
    if state.gate.snapshot().refreshed_at.is_none() {
        tracing::warn!(
            "Gate at '{}' unreachable on startup; safe mode stays on until it answers",
            state.config.gate_url
        );
    }
    Ok(active)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let cli_flags = parse_cli_flags(&args)?;

    if cli_flags.help {
        print_help();
        return Ok(());
    }

    let config = Config::from_env();
    let database = Database::new(&config.db_path)?;
    let state = AppState::new(config.clone(), database);

    let active = warm_gate(&state).await?;
    tracing::info!("Safe mode is {}", if active { "on" } else { "off" });

    if runs_maintenance_mode(cli_flags) {
        println!("safe mode: {}", if active { "on" } else { "off" });
        return Ok(());
    }

    let allow_public = folio_server::config::env_flag_enabled("ALLOW_PUBLIC_ACCESS");
    if allow_public {
        tracing::warn!("Public access enabled; listening on all interfaces for any origin");
    }

    let bind_addr = bind_address(&config, allow_public);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("Folio running at http://{}", bind_addr);

    axum::serve(listener, create_app(state, allow_public))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Folio stopped");

    Ok(())
}

fn print_help() {
    println!("Folio Server\n");
    println!("Usage: folio [OPTIONS]\n");
    println!("Options:");
    println!("  --check-gate      Refresh the safe-mode gate once, print it and exit");
    println!("  --help            Show this help message");
    println!("\nEnvironment variables (a .env file is loaded first):");
    println!("  DB_PATH           Database path (default: ~/.cache/folio/db)");
    println!(
        "  PORT              Server port (default: {})",
        DEFAULT_PORT
    );
    println!("  GATE_URL          Endpoint answering true/false for safe mode");
    println!("  GATE_TIMEOUT_SECS Gate request timeout in seconds (default: 10)");
    println!("  MAX_FORM_SIZE     Maximum save form size in bytes (default: 10MB)");
    println!("  DFUNKT_URL        Role directory naming the current chefreds");
    println!("  ALLOW_PUBLIC_ACCESS  Listen on all interfaces and allow CORS from any origin");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_cli_flags, runs_maintenance_mode, CliFlags};

    #[test]
    fn parse_cli_flags_rejects_unknown_and_positional_arguments() {
        let cases = [
            (
                vec!["folio".to_string(), "--check-gat".to_string()],
                "Unknown option",
            ),
            (
                vec!["folio".to_string(), "serve".to_string()],
                "Unexpected positional argument",
            ),
        ];

        for (args, expected_fragment) in cases {
            let err = parse_cli_flags(&args).expect_err("invalid args should be rejected");
            assert!(err.to_string().contains(expected_fragment));
        }
    }

    #[test]
    fn parse_cli_flags_accepts_supported_options() {
        let args = vec![
            "folio".to_string(),
            "--help".to_string(),
            "--check-gate".to_string(),
        ];
        let flags = parse_cli_flags(&args).expect("known options should parse");
        assert_eq!(
            flags,
            CliFlags {
                help: true,
                check_gate: true,
            }
        );
    }

    #[test]
    fn only_check_gate_enables_maintenance_mode() {
        let check = CliFlags {
            check_gate: true,
            ..CliFlags::default()
        };
        assert!(runs_maintenance_mode(check));
        assert!(!runs_maintenance_mode(CliFlags::default()));
    }
}
