use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tubescribe::captions::YoutubeCaptionClient;
use tubescribe::punctuate::PunctuationModel;
use tubescribe::{Cli, Commands, Config, CorrectionTable, FetchRequest, TranscriptPipeline, VideoResolver};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tubescribe=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config::load().await?;

    match cli.command {
        Commands::Fetch {
            video,
            playlist,
            output,
            api_key,
        } => {
            let api_key = api_key
                .or_else(|| config.api.key.clone())
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "No API key found. Pass --api-key, set YOUTUBE_API_KEY, or add it to the config file"
                    )
                })?;

            let request = FetchRequest {
                api_key,
                video_id: video,
                playlist_id: playlist,
                output_file: output,
            };
            request.validate()?;

            // Model load is fatal for the whole run; probe it before any
            // transcript work starts.
            let model =
                PunctuationModel::load(&config.model.command, config.model.args.clone()).await?;

            let pipeline = TranscriptPipeline::new(
                VideoResolver::new(request.api_key.clone()),
                YoutubeCaptionClient::new(),
                model,
                CorrectionTable::default(),
            );

            tracing::info!("Starting transcript fetch");

            let message = pipeline.run(&request).await?;
            println!("{}", message);
        }
        Commands::Config { show } => {
            if show {
                config.display();
            } else {
                config.interactive_setup().await?;
            }
        }
        Commands::Corrections => {
            let table = CorrectionTable::default();
            println!(
                "Built-in corrections ({} entries, applied in order):",
                table.len()
            );
            for (pattern, replacement) in table.entries() {
                println!("  {:?} -> {:?}", pattern, replacement);
            }
        }
    }

    Ok(())
}
