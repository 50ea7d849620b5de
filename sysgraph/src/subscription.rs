use std::time::Duration;

use iced::Subscription;

use crate::collector::SystemSampler;
use crate::config::{SourceConfig, SourceKind};
use crate::demo::DemoSimulator;
use crate::message::Message;

/// Create a subscription that samples the configured source periodically.
pub fn sample_subscription(config: SourceConfig) -> Subscription<Message> {
    Subscription::run_with(config, move |config| {
        let config = config.clone();
        async_stream::stream! {
            let interval = Duration::from_millis(config.poll_interval_ms);
            tracing::info!(
                source = ?config.kind,
                interval_ms = config.poll_interval_ms,
                "Starting sampler"
            );

            match config.kind {
                SourceKind::System => {
                    let mut sampler = SystemSampler::new();
                    // sysinfo needs two refreshes before CPU usage is meaningful.
                    tokio::time::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL).await;
                    loop {
                        yield Message::Sampled(sampler.sample());
                        tokio::time::sleep(interval).await;
                    }
                }
                SourceKind::Demo => {
                    let cores = std::thread::available_parallelism()
                        .map(|n| n.get())
                        .unwrap_or(4);
                    let mut simulator = DemoSimulator::new(cores);
                    loop {
                        let now = chrono::Utc::now().timestamp_millis();
                        yield Message::Sampled(simulator.tick(now));
                        tokio::time::sleep(interval).await;
                    }
                }
            }
        }
    })
}
