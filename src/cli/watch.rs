use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::sleep,
    time::Duration,
};

use chrono::{Local, NaiveDateTime};
use clap::Parser;
use signal_hook::consts::{SIGINT, SIGTERM};
use solarprognose::{
    error::ProviderError,
    forecast::HourlyForecast,
    plugin::Provider,
    prelude::*,
    setting::Setting,
    value::Variables,
};

use crate::cli::SettingArgs;

#[derive(Parser)]
pub struct WatchArgs {
    /// Also run a tick immediately on start.
    #[clap(long)]
    now: bool,

    /// How often to check for the termination signal while waiting for the next tick.
    #[clap(long, env = "SIGNAL_POLLING_INTERVAL", default_value = "1s")]
    signal_polling_interval: humantime::Duration,

    #[clap(flatten)]
    setting: SettingArgs,
}

impl WatchArgs {
    pub fn run(&self, provider: &dyn Provider) -> Result {
        let setting = self.setting.resolve(provider.default_setting())?;
        let activity = provider.default_activity();

        let should_terminate = Arc::new(AtomicBool::new(false));
        signal_hook::flag::register(SIGTERM, Arc::clone(&should_terminate))?;
        signal_hook::flag::register(SIGINT, Arc::clone(&should_terminate))?;

        if self.now {
            tick(provider, &setting);
        }
        loop {
            let next_tick = activity.next_tick_after(Local::now().naive_local());
            info!(%next_tick, "waiting…");
            match sleep_until(next_tick, *self.signal_polling_interval, &should_terminate) {
                Ok(()) => tick(provider, &setting),
                Err(ProviderError::Interrupted) => {
                    info!("shutting down…");
                    return Ok(());
                }
                Err(error) => return Err(error.into()),
            }
        }
    }
}

/// Run one activity tick. A failed tick does not stop the loop.
fn tick(provider: &dyn Provider, setting: &Setting) {
    let mut variables = Variables::default();
    match provider.do_activity_work(setting, &mut variables) {
        Ok(()) => {
            let forecast = HourlyForecast::collect_from(&variables);
            match HourlyForecast::peak(&forecast) {
                Some(peak) => {
                    info!(
                        n_hours = forecast.len(),
                        power = %peak.power,
                        at = %peak.timestamp,
                        "peak",
                    );
                }
                None => warn!("the forecast is empty"),
            }
        }
        Err(error) if error.is_transient() => {
            warn!("tick failed, retrying on the next tick: {error:#}");
        }
        Err(error) => error!("tick failed: {error:#}"),
    }
}

/// Sleep in slices, checking the termination flag in between.
fn sleep_until(
    deadline: NaiveDateTime,
    slice: Duration,
    should_terminate: &AtomicBool,
) -> Result<(), ProviderError> {
    loop {
        if should_terminate.load(Ordering::Relaxed) {
            return Err(ProviderError::Interrupted);
        }
        let Ok(remaining) = (deadline - Local::now().naive_local()).to_std() else {
            return Ok(());
        };
        if remaining.is_zero() {
            return Ok(());
        }
        sleep(remaining.min(slice));
    }
}
