use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use habitica_badge::{
    BadgeMode, BadgeQuery, BadgeService, Canvas, ImageFormat, ServiceConfig, ThemeName,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "habitica-badge", version)]
struct Cli {
    /// Service config JSON; flags and environment variables override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Habitica user id.
    #[arg(long, global = true, env = "HABITICA_USER_ID")]
    user_id: Option<String>,

    /// Habitica API token.
    #[arg(long, global = true, env = "HABITICA_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    /// Upstream API root.
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Upstream timeout in milliseconds.
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Extra directory of font files.
    #[arg(long, global = true)]
    fonts_dir: Option<PathBuf>,

    /// Honor `userId`/`apiToken` in request URLs.
    #[arg(long, global = true)]
    allow_query_credentials: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one badge or panel to a file.
    Render(RenderArgs),
    /// Dispatch a raw request URL and write the response body.
    Request(RequestArgs),
    /// Fetch stats and print them as JSON.
    Stats,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// What to render.
    #[arg(long, value_enum, default_value_t = ModeChoice::Live)]
    mode: ModeChoice,

    /// Palette.
    #[arg(long, value_enum, default_value_t = ThemeChoice::Default)]
    theme: ThemeChoice,

    /// Output size.
    #[arg(long, value_enum, default_value_t = SizeChoice::Standard)]
    size: SizeChoice,

    /// Output encoding.
    #[arg(long, value_enum, default_value_t = FormatChoice::Png)]
    format: FormatChoice,

    /// Output path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RequestArgs {
    /// Request URL or path with query, e.g. `/?theme=dark&size=compact`.
    #[arg(long)]
    url: String,

    /// Output path for the body.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Live,
    Mock,
    Simple,
    Env,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeChoice {
    Default,
    Dark,
    Light,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SizeChoice {
    Standard,
    Compact,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Png,
    Svg,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let service = BadgeService::from_config(config)?;

    match cli.cmd {
        Command::Render(args) => cmd_render(&service, args),
        Command::Request(args) => cmd_request(&service, args),
        Command::Stats => cmd_stats(&service),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<ServiceConfig> {
    let mut cfg = match &cli.config {
        Some(path) => ServiceConfig::from_json_file(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(v) = &cli.user_id {
        cfg.user_id = Some(v.clone());
    }
    if let Some(v) = &cli.api_token {
        cfg.api_token = Some(v.clone());
    }
    if let Some(v) = &cli.api_base {
        cfg.api_base = v.clone();
    }
    if let Some(v) = cli.timeout_ms {
        cfg.timeout_ms = v;
    }
    if let Some(v) = &cli.fonts_dir {
        cfg.fonts_dir = Some(v.clone());
    }
    if cli.allow_query_credentials {
        cfg.allow_query_credentials = true;
    }
    cfg.validate()?;
    tracing::debug!(config = ?cfg, "configuration loaded");
    Ok(cfg)
}

fn cmd_render(service: &BadgeService, args: RenderArgs) -> anyhow::Result<()> {
    let query = BadgeQuery {
        theme: match args.theme {
            ThemeChoice::Default => ThemeName::Default,
            ThemeChoice::Dark => ThemeName::Dark,
            ThemeChoice::Light => ThemeName::Light,
        },
        mode: match args.mode {
            ModeChoice::Live => BadgeMode::Live,
            ModeChoice::Mock => BadgeMode::Mock,
            ModeChoice::Simple => BadgeMode::Simple,
            ModeChoice::Env => BadgeMode::Env,
        },
        canvas: match args.size {
            SizeChoice::Standard => Canvas::STANDARD,
            SizeChoice::Compact => Canvas::COMPACT,
        },
        format: match args.format {
            FormatChoice::Png => ImageFormat::Png,
            FormatChoice::Svg => ImageFormat::Svg,
        },
        user_id: None,
        api_token: None,
    };

    let resp = service.handle(&query);
    if resp.status != 200 {
        anyhow::bail!("badge service answered {}", resp.status);
    }
    write_body(&args.out, &resp.body)
}

fn cmd_request(service: &BadgeService, args: RequestArgs) -> anyhow::Result<()> {
    let resp = service.handle_url(&args.url);
    eprintln!("status: {}", resp.status);
    for (name, value) in &resp.headers {
        eprintln!("{name}: {value}");
    }
    write_body(&args.out, &resp.body)
}

fn cmd_stats(service: &BadgeService) -> anyhow::Result<()> {
    let record = service.fetch_stats(&BadgeQuery::default())?;
    let json = serde_json::to_string_pretty(&record).context("serialize stats")?;
    println!("{json}");
    Ok(())
}

fn write_body(out: &Path, body: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(out, body).with_context(|| format!("write '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}
