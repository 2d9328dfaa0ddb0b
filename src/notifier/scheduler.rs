use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{debug, error, info, warn};

use super::push::WebPushSender;
use super::scan::run_scan;
use super::store::PgNotifierStore;

/// Start the per-minute due-window scan. The cadence is fixed; a tick that
/// fires while the previous one is still running is skipped rather than run
/// concurrently.
pub async fn start_notifier(store: PgNotifierStore, push: WebPushSender) -> anyhow::Result<()> {
    let scheduler = JobScheduler::new().await?;

    let store = Arc::new(store);
    let push = Arc::new(push);
    let running = Arc::new(Mutex::new(()));

    let job = Job::new_async("0 * * * * *", move |_uuid, _l| {
        let store = store.clone();
        let push = push.clone();
        let running = running.clone();

        Box::pin(async move {
            let _guard = match running.try_lock() {
                Ok(guard) => guard,
                Err(_) => {
                    warn!("Previous notification scan still in flight, skipping this tick");
                    return;
                }
            };

            match run_scan(store.as_ref(), push.as_ref(), Utc::now()).await {
                Ok(0) => debug!("No notifications to send this minute"),
                Ok(count) => info!(count, "Processed due-window notifications"),
                Err(e) => error!("Notification scan failed: {:?}", e),
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    info!("Notification scheduler started");
    Ok(())
}
