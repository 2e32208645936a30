use std::fs::File;
use std::io;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use threatfeed::api::{Advertisement, HttpTransport, NewsArticle, ThreatScore};
use threatfeed::core::config::{self, CliOverrides, FeedConfig};
use threatfeed::core::{Envelope, FeedController, QueryParameters};

#[derive(Parser)]
#[command(name = "threatfeed", about = "Security news, ads and today's threat level")]
struct Args {
    /// News category to filter by
    #[arg(short, long)]
    category: Option<String>,

    /// First day of the news window (yyyy-mm-dd)
    #[arg(long, requires = "end")]
    start: Option<NaiveDate>,

    /// Last day of the news window (yyyy-mm-dd)
    #[arg(long, requires = "start")]
    end: Option<NaiveDate>,

    /// News API base URL
    #[arg(long)]
    base_url: Option<String>,
}

fn init_logging(level: LevelFilter) {
    // File logger - writes to threatfeed.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("threatfeed.log") {
        let _ = WriteLogger::init(level, log_config, log_file);
    }
}

/// One block per resource, covering the loading, success and error branches.
fn render<T>(title: &str, envelope: &Envelope<T>, body: impl Fn(&T) -> String) -> String {
    match envelope {
        Envelope::Loading => format!("{title}\n  loading..."),
        Envelope::Success(data) => format!("{title}\n{}", body(data)),
        Envelope::Error(message) => format!("{title}\n  error: {message}"),
    }
}

fn render_threat(threat: &ThreatScore) -> String {
    format!(
        "  {} [{}] {:.2}/5",
        threat.phrase,
        threat.severity().label(),
        threat.score
    )
}

fn render_news(articles: &[NewsArticle]) -> String {
    if articles.is_empty() {
        return "  no articles".to_string();
    }
    articles
        .iter()
        .map(|article| {
            let blurb = if article.summary.is_empty() {
                &article.description
            } else {
                &article.summary
            };
            format!("  - {}\n    {}\n    {}", article.title, blurb, article.url)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_ad(ad: &Advertisement) -> String {
    format!("  {}", ad.label())
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = config::load_config().unwrap_or_else(|e| {
        eprintln!("{e}; falling back to defaults");
        FeedConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            base_url: args.base_url.as_deref(),
            category: args.category.as_deref(),
        },
    );

    init_logging(resolved.log_level);
    log::info!("ThreatFeed starting up against {}", resolved.base_url);

    let transport = HttpTransport::new(resolved.base_url.clone(), resolved.timeout)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let params = QueryParameters {
        category: resolved.category,
        start: args.start,
        end: args.end,
    };
    let controller = FeedController::new(Arc::new(transport), params);

    let mut threat = controller.threat_score().subscribe();
    let mut news = controller.news().subscribe();
    let mut ad = controller.ad().subscribe();
    let (threat, news, ad) = tokio::join!(threat.settled(), news.settled(), ad.settled());

    let params = controller.params();
    let news_title = match (params.start, params.end) {
        (Some(start), Some(end)) => format!("{} news, {start} to {end}", params.category),
        _ => format!("{} news", params.category),
    };

    println!(
        "{}",
        render("Today's Threat Level", &threat.unwrap_or(Envelope::Loading), render_threat)
    );
    println!();
    println!("{}", render(&news_title, &news.unwrap_or(Envelope::Loading), |a| render_news(a)));
    println!();
    println!("{}", render("Sponsored", &ad.unwrap_or(Envelope::Loading), render_ad));

    log::info!("ThreatFeed done");
    Ok(())
}
