use common::telemetry::{get_tracing_subscriber, init_tracing_subscriber};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use whiteboard_sync::{
    configuration::get_configuration,
    startup::{Application, SyncEvent},
};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let tracing_subscriber =
        get_tracing_subscriber("whiteboard_sync".into(), "info".into(), std::io::stdout);
    init_tracing_subscriber(tracing_subscriber).expect("Failed to set up tracing.");

    // Panics if the configuration can't be read
    let configuration = get_configuration().expect("Failed to read configuration.");

    let application = match Application::build(configuration) {
        Ok(application) => application,
        Err(error) => panic!("Failed to build application: {:?}", error),
    };

    // Stops the poll loop on Ctrl-C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        if let Err(error) = tokio::signal::ctrl_c().await {
            error!(%error, "Failed to listen for the shutdown signal");
            return;
        }
        info!("Shutdown signal received");
        shutdown_token.cancel();
    });

    let (sender, mut receiver) = mpsc::channel(32);
    let event_logger = tokio::spawn(async move {
        while let Some(event) = receiver.recv().await {
            match event {
                SyncEvent::PostItsChanged(post_its) => {
                    info!(count = post_its.len(), "Post-its changed")
                }
                SyncEvent::AnchorsChanged {
                    group_name,
                    anchors,
                } => info!(group_name = %group_name, count = anchors.len(), "Anchors changed"),
                SyncEvent::SwipeReceived(post_it) => {
                    info!(post_it_id = ?post_it.id, title = %post_it.title, "Swipe received")
                }
            }
        }
    });

    if let Err(error) = application.run_until_stopped(cancel_token, sender).await {
        error!(?error, "Sync application stopped with an error");
    }

    // The sender is dropped with the application, the logger drains and stops
    let _ = event_logger.await;
    Ok(())
}
