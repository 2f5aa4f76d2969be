//! news-narrator-rs: voice-driven news and media narration assistant.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use news_narrator_rs::config::Config;
use news_narrator_rs::feed::HttpFeedSource;
use news_narrator_rs::journal::Journal;
use news_narrator_rs::player::RodioPlayer;
use news_narrator_rs::service::Assistant;
use news_narrator_rs::voice;

#[derive(Parser, Debug)]
#[command(
    name = "news-narrator-rs",
    about = "Voice-driven news and media narration assistant"
)]
struct Args {
    /// Path to config.yaml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Media folder to scan (overrides config)
    #[arg(short, long)]
    media_folder: Option<PathBuf>,

    /// Feed URL to narrate; repeat for multiple (overrides config)
    #[arg(short, long = "feed")]
    feeds: Vec<String>,

    /// Journal file path (overrides config)
    #[arg(short, long)]
    journal: Option<PathBuf>,

    /// Run a single cycle and exit
    #[arg(long)]
    once: bool,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("news-narrator-rs starting");

    let mut config = Config::load(args.config.as_deref());
    if let Some(folder) = args.media_folder {
        config.library.folder = folder;
    }
    if !args.feeds.is_empty() {
        config.feeds.urls = args.feeds;
    }
    if let Some(path) = args.journal {
        config.journal.path = path;
    }
    info!(
        "Narrating {} feed(s), library at {}, journal at {}",
        config.feeds.urls.len(),
        config.library.folder.display(),
        config.journal.path.display()
    );

    // Ctrl-C is the only way out of the loop; the token is honored at
    // every blocking boundary.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Ctrl-C received, shutting down after the current step");
                cancel.cancel();
            }
        });
    }

    let narrator = voice::narrator_from_command(&config.voice.speak_command);
    let listener = voice::listener_from_command(
        &config.voice.listen_command,
        Duration::from_secs_f64(config.voice.listen_window),
    );
    let player = Box::new(RodioPlayer::new(
        Duration::from_secs_f64(config.library.snippet_secs),
        cancel.child_token(),
    ));
    let feeds = Box::new(HttpFeedSource::new(Duration::from_secs_f64(
        config.feeds.fetch_timeout,
    )));
    let journal = Journal::new(config.journal.path.clone());

    let assistant = Assistant::new(config, journal, feeds, narrator, listener, player, cancel);

    if args.once {
        assistant.run_once().await;
    } else {
        assistant.run().await;
    }

    Ok(())
}
