mod burrow;
mod fetch;
mod watch;

use clap::{Parser, Subcommand};
use reqwest::Url;

pub use self::{
    burrow::{BurrowArgs, burrow},
    fetch::fetch,
    watch::{WatchArgs, watch},
};
use crate::{
    api::eso,
    core::{Credentials, Refresher},
    prelude::*,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Refresh once and print today's totals.
    #[clap(name = "fetch")]
    Fetch(Box<FetchArgs>),

    /// Keep refreshing on an interval and publish the sensors.
    #[clap(name = "watch")]
    Watch(Box<WatchArgs>),

    /// Development tools.
    #[clap(name = "burrow")]
    Burrow(Box<BurrowArgs>),
}

#[derive(Parser)]
pub struct PortalArgs {
    #[clap(long, env = "ESO_USERNAME")]
    pub username: String,

    #[clap(long, env = "ESO_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Meter object identifier, as seen in the consumption history form.
    #[clap(long = "object-id", env = "ESO_OBJECT_ID")]
    pub object_id: String,

    #[clap(long = "base-url", env = "ESO_BASE_URL", default_value = eso::DEFAULT_BASE_URL)]
    pub base_url: Url,
}

impl PortalArgs {
    pub fn credentials(&self) -> Credentials {
        Credentials::builder()
            .username(&self.username)
            .password(&self.password)
            .object_id(&self.object_id)
            .build()
    }

    pub fn api(&self) -> Result<eso::Api> {
        eso::Api::try_new(&self.base_url)
            .with_context(|| format!("invalid portal base URL `{}`", self.base_url))
    }
}

#[derive(Parser)]
pub struct RefreshArgs {
    /// Bound on a whole refresh: login, report and aggregation.
    #[clap(long, env = "ESO_TIMEOUT", default_value = "5s")]
    pub timeout: humantime::Duration,
}

impl RefreshArgs {
    pub fn refresher(&self, api: eso::Api) -> Refresher<eso::Api> {
        Refresher::builder().source(api).timeout(self.timeout.into()).build()
    }
}

#[derive(Parser)]
pub struct FetchArgs {
    #[clap(flatten)]
    pub portal: PortalArgs,

    #[clap(flatten)]
    pub refresh: RefreshArgs,
}
