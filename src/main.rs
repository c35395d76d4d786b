use clap::Parser;
use parcel_enrich::utils::logger;
use parcel_enrich::{CliArgs, SkipReason};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting parcel-enrich");
    tracing::debug!("CLI args: {:?}", args);

    let settings = match args.into_settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    match parcel_enrich::run(&settings).await {
        Ok(summary) => {
            println!(
                "✅ {} of {} rows enriched, {} skipped (invalid input: {}, no data: {}, transport: {})",
                summary.written,
                summary.total_rows,
                summary.skipped_total(),
                summary.skipped_for(SkipReason::InvalidInput),
                summary.skipped_for(SkipReason::NoData),
                summary.skipped_for(SkipReason::Transport),
            );
            println!("📁 Output saved to: {}", settings.output_csv.display());

            // Transport skips may succeed on a later run; flag them to the caller.
            if summary.skipped_for(SkipReason::Transport) > 0 {
                std::process::exit(2);
            }
        }
        Err(e) => {
            tracing::error!("❌ Run failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }
}
