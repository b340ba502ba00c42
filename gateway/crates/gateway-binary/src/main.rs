#![cfg_attr(test, allow(unused_crate_dependencies))]

use clap::crate_version;
use mimalloc::MiMalloc;
use tokio::runtime;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod args;
mod telemetry;

const THREAD_NAME: &str = "letterboxd-gateway";

fn main() -> anyhow::Result<()> {
    let args = self::args::parse();
    let config = args.config()?;

    let runtime = runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name(THREAD_NAME)
        .build()?;

    runtime.block_on(async move {
        telemetry::init(&args)?;

        let crate_version = crate_version!();
        tracing::info!("Letterboxd Gateway {crate_version}");

        letterboxd_server::serve(args.into_server_config(config)).await?;

        Ok::<(), anyhow::Error>(())
    })?;

    Ok(())
}
