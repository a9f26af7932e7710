use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::Args;

pub(crate) fn init(args: &Args) {
    let env_filter = EnvFilter::new(args.log_level.as_filter_str());

    // A subscriber may already be set when running in-process.
    let _ = tracing_subscriber::registry()
        .with(args.log_format())
        .with(env_filter)
        .try_init();
}
