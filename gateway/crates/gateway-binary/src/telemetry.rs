use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::args::Args;

pub(crate) fn init(args: &Args) -> anyhow::Result<()> {
    let filter = EnvFilter::new(args.log_level().filter());

    tracing_subscriber::registry()
        .with(args.log_format())
        .with(filter)
        .try_init()?;

    Ok(())
}
