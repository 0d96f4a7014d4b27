use logbridge::{BridgeConfiguration, Level, LogDestination, configure_logging, log_info, log_warn};

#[derive(serde::Serialize)]
struct Request {
    request_id: u64,
    route: &'static str,
}

/// Logs a few events with nested scopes to stderr, as JSON lines when run
/// with `--json`.
fn main() {
    let destination = if std::env::args().any(|arg| arg == "--json") {
        LogDestination::json()
    } else {
        LogDestination::console()
    };
    let provider = configure_logging(
        BridgeConfiguration::new(destination).with_minimum_level(Level::Debug),
    );
    let logger = provider.create_logger(Some("Example.Api"));

    log_info!(logger, "Listening on {port}", port = 8080);
    {
        let _request = logger.begin_scope(&Request {
            request_id: 7,
            route: "/tiles/+37-122",
        });
        log_info!(logger, "Handling request");
        {
            let _retry = logger.begin_scope("retry 2");
            log_warn!(logger, "Upstream slow, took {elapsed_ms} ms", elapsed_ms = 1840);
        }
        log_info!(logger, "Served {bytes} bytes", bytes = 65536);
    }
    log_info!(logger, "Shutting down");

    provider.dispose();
}
