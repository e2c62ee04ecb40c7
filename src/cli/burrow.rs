use chrono::Local;
use clap::{Parser, Subcommand};

use crate::{
    api::eso::Session,
    cli::{PortalArgs, RefreshArgs},
    core::DateWindow,
    prelude::*,
};

#[derive(Parser)]
pub struct BurrowArgs {
    #[command(subcommand)]
    pub command: BurrowCommand,

    #[clap(flatten)]
    pub portal: PortalArgs,

    #[clap(flatten)]
    pub refresh: RefreshArgs,
}

#[derive(Subcommand)]
pub enum BurrowCommand {
    /// Print the tokens scraped from the login form.
    #[clap(name = "login-form")]
    LoginForm,

    /// Log in and print the raw report JSON of today.
    #[clap(name = "report")]
    Report,
}

pub async fn burrow(args: &BurrowArgs) -> Result {
    let api = args.portal.api()?;
    let timeout = args.refresh.timeout.into();

    match args.command {
        BurrowCommand::LoginForm => {
            let session = Session::try_new()?;
            let tokens = tokio::time::timeout(timeout, api.get_login_tokens(&session))
                .await
                .context("timed out while fetching the login form")??;
            let mut tokens = Vec::from_iter(tokens);
            tokens.sort_unstable();
            for (name, value) in tokens {
                println!("{name}: {value}");
            }
        }

        BurrowCommand::Report => {
            let window = DateWindow::around(Local::now().date_naive());
            let report = tokio::time::timeout(
                timeout,
                api.fetch_daily_report_json(&args.portal.credentials(), &window),
            )
            .await
            .context("timed out while fetching the report")??;
            println!("{report}");
        }
    }

    Ok(())
}
