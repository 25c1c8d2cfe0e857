use crate::app::cli::args::Args;
use crate::app::replay::replay;
use crate::config::{load_config_file, AnalyticsConfig, SenderCredentials};
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::init_logging;
use crate::hooks::EventHooks;
use crate::sender::{BatchDelivery, EventSink, JsonLinesDelivery, OutboundSender, SenderResult};
use clap::Parser;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, BufReader};

/// Run the application and return the process exit code
pub async fn startup() -> i32 {
    let mut args = Args::parse();

    // The configuration file may set log options, so it is read before the
    // logger starts; a failure is reported once logging is up
    let loaded = load_config_file(args.config_file.as_deref()).await;
    let config = loaded.and_then(|config| {
        let config = config.unwrap_or_default();
        args.apply_toml_values(&config)?;
        Ok(config)
    });

    let logging = args.logging_options();
    if let Err(e) = init_logging(
        logging.level.as_deref(),
        logging.format.as_deref(),
        logging.file.as_deref(),
        logging.color,
    ) {
        eprintln!("Failed to initialise logging: {}", e);
        return 1;
    }

    log::info!("reqevents {} starting", env!("CARGO_PKG_VERSION"));

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            log_error_with_context(&e, "Loading configuration");
            return 1;
        }
    };

    let analytics = match AnalyticsConfig::from_toml(&config) {
        Ok(analytics) => args.analytics_config(analytics),
        Err(e) => {
            log_error_with_context(&e, "Reading analytics settings");
            return 1;
        }
    };
    log::debug!("Analytics settings: {:?}", analytics);

    let delivery: Arc<dyn BatchDelivery> = match args.output.as_deref() {
        Some(path) => match JsonLinesDelivery::append_to(path).await {
            Ok(delivery) => Arc::new(delivery),
            Err(e) => {
                log_error_with_context(&e, &format!("Opening output {}", path.display()));
                return 1;
            }
        },
        None => Arc::new(JsonLinesDelivery::new(tokio::io::stdout())),
    };

    let mut sender: Option<Arc<OutboundSender>> = None;
    let hooks = EventHooks::from_config(&analytics, |credentials| {
        start_sender(credentials, delivery, &analytics, &mut sender)
    });

    let reader: Box<dyn AsyncBufRead + Unpin + Send> = if args.reads_stdin() {
        Box::new(BufReader::new(tokio::io::stdin()))
    } else {
        match tokio::fs::File::open(&args.input).await {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                log::error!("FATAL: Cannot open {}: {}", args.input.display(), e);
                return 1;
            }
        }
    };

    let result = replay(reader, hooks.as_ref()).await;

    // Flush whatever was queued even when the replay failed part way
    if let Some(sender) = sender {
        let stats = sender.shutdown().await;
        log::info!(
            "Delivered {} events in {} batches ({} events failed)",
            stats.events_delivered,
            stats.batches_delivered,
            stats.events_failed
        );
    }

    match result {
        Ok(summary) => {
            log::info!(
                "Replayed {} requests, recorded {} events, skipped {} lines",
                summary.requests,
                summary.events_recorded,
                summary.lines_skipped
            );
            0
        }
        Err(e) => {
            log::error!("FATAL: Reading {} failed: {}", args.input.display(), e);
            1
        }
    }
}

fn start_sender(
    credentials: &SenderCredentials,
    delivery: Arc<dyn BatchDelivery>,
    analytics: &AnalyticsConfig,
    handle: &mut Option<Arc<OutboundSender>>,
) -> SenderResult<Arc<dyn EventSink>> {
    let sender = Arc::new(OutboundSender::spawn(
        credentials,
        delivery,
        analytics.sender_options(),
    )?);
    *handle = Some(sender.clone());
    Ok(sender)
}
