use std::time::Duration;

use bon::Builder;
use chrono::Local;
use clap::Parser;
use tokio::{
    signal::ctrl_c,
    time::{MissedTickBehavior, interval},
};

use crate::{
    api::eso,
    cli::{PortalArgs, RefreshArgs},
    core::{Credentials, Refresher, SensorKind, Sensors},
    prelude::*,
    tables::build_sensors_table,
};

#[derive(Parser)]
pub struct WatchArgs {
    #[clap(flatten)]
    pub portal: PortalArgs,

    #[clap(flatten)]
    pub refresh: RefreshArgs,

    /// How often to refresh the sensors.
    #[clap(long, env = "ESO_INTERVAL", default_value = "10m")]
    pub interval: humantime::Duration,
}

pub async fn watch(args: &WatchArgs) -> Result {
    let watcher = Watcher::builder()
        .refresher(args.refresh.refresher(args.portal.api()?))
        .credentials(args.portal.credentials())
        .interval(args.interval)
        .build();
    tokio::select! {
        () = watcher.run() => unreachable!("the watcher never stops"),
        result = ctrl_c() => {
            result.context("failed to listen for Ctrl+C")?;
            info!("interrupted");
        }
    }
    Ok(())
}

#[derive(Builder)]
struct Watcher {
    refresher: Refresher<eso::Api>,
    credentials: Credentials,

    #[builder(into)]
    interval: Duration,
}

impl Watcher {
    async fn run(&self) {
        let mut sensors = Sensors::default();
        let mut interval = interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            let refresh = self.refresher.refresh(&self.credentials).await;
            sensors.update(&refresh, Local::now());
            for kind in SensorKind::ALL {
                info!(
                    sensor = %kind,
                    state = ?sensors.state(kind),
                    status = refresh.status(),
                    "published",
                );
            }
            println!("{}", build_sensors_table(&sensors));
        }
    }
}
