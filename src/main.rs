use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ai_app_suite::cli::{Cli, Commands, PptSource};
use ai_app_suite::config::Config;
use ai_app_suite::documents::{self, Slide};
use ai_app_suite::extractors::local::PlainTextSource;
use ai_app_suite::extractors::{validate_url, youtube, SourceRegistry};
use ai_app_suite::llm::prompts::SummaryStyle;
use ai_app_suite::{output, utils, Session, SummaryPipeline};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "ai_app_suite=debug,ai_suite=debug"
    } else {
        "ai_app_suite=info,ai_suite=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", style("An error occurred:").red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load().await?.with_api_key(cli.api_key.clone());

    match cli.command {
        Commands::About => print_about(),
        Commands::Styles => {
            println!("Summarization styles:");
            for summary_style in SummaryStyle::ALL {
                println!(
                    "  • {} (max {} words)",
                    summary_style.label(),
                    summary_style.word_limit()
                );
            }
        }
        Commands::Config { show } => {
            if show {
                config.display();
            } else {
                println!("Edit the config file to change settings:");
                println!("  {}", Config::config_path()?.display());
            }
        }
        Commands::Youtube {
            url,
            style: summary_style,
            listen,
            output,
            format,
        } => {
            warn_missing_tools(&config).await;
            show_preview(&url);

            let pipeline = SummaryPipeline::from_config(&config)?.quiet(cli.quiet);
            let summary_style = summary_style.unwrap_or(config.app.default_style);
            let mut session = Session::new();

            tracing::info!("Starting summary for URL: {}", url);
            let result = pipeline
                .summarize_video(&url, summary_style, &mut session)
                .await?;

            match output {
                Some(path) => {
                    output::save_to_file(&result, &path, &format).await?;
                    println!("Summary saved to: {}", path.display());
                }
                None => output::print_to_console(&result, &format)?,
            }

            if listen {
                let audio_path = pipeline.listen(&session).await?;
                println!("Audio saved to: {}", audio_path.display());
            }
        }
        Commands::Pdf {
            file,
            show_text,
            extract_only,
            output,
            format,
        } => {
            let input = file.to_string_lossy().to_string();
            let started = std::time::Instant::now();

            if extract_only {
                let sources = SourceRegistry::from_config(&config)?;
                println!("{}", sources.extract_text(&input).await?);
                return Ok(());
            }

            let pipeline = SummaryPipeline::from_config(&config)?.quiet(cli.quiet);
            let text = pipeline.document_text(&input).await?;
            if show_text {
                println!("{}", style("## Extracted Text:").bold().cyan());
                println!("{}", text);
            } else {
                tracing::info!("Extracted text: {}", utils::preview(&text, 120));
            }

            let result = pipeline
                .summarize_document_text(&input, &text, started)
                .await?;
            eprintln!("{}", style("Summary Generated!").green());

            match output {
                Some(path) => {
                    output::save_to_file(&result, &path, &format).await?;
                    println!("Summary saved to: {}", path.display());
                }
                None => output::print_to_console(&result, &format)?,
            }
        }
        Commands::ChatToPdf { text, file, output } => {
            let text = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => PlainTextSource::new().read(&path).await?,
                (None, None) => anyhow::bail!("Please enter text to convert."),
            };

            let bytes = documents::write_text_pdf(&text)?;
            let path = documents::resolve_output(
                output.as_deref(),
                &config.output_dir(),
                documents::DEFAULT_PDF_NAME,
            );
            documents::save_document(&path, &bytes)?;
            println!("PDF saved to: {} ({})", path.display(), documents::PDF_MIME);
        }
        Commands::Ppt { source, output } => {
            let bytes = match source {
                PptSource::Manual { title, content } => {
                    documents::write_pptx(&[Slide::new(title, content)])?
                }
                PptSource::File { file } => {
                    let content = PlainTextSource::new()
                        .read(&file)
                        .await
                        .with_context(|| format!("Could not use {}", file.display()))?;
                    documents::presentation_from_text(&content)?
                }
            };

            let path = documents::resolve_output(
                output.as_deref(),
                &config.output_dir(),
                documents::DEFAULT_PPTX_NAME,
            );
            documents::save_document(&path, &bytes)?;
            println!("Presentation saved to: {} ({})", path.display(), documents::PPTX_MIME);
        }
    }

    Ok(())
}

/// Show the thumbnail link as soon as a link is submitted
fn show_preview(url: &str) {
    if validate_url(url).is_err() {
        return;
    }

    #[allow(deprecated)]
    let video_id = youtube::split_video_id(url);
    if let Ok(video_id) = video_id {
        println!("Thumbnail: {}", youtube::thumbnail_url(&video_id));
    }
}

async fn warn_missing_tools(config: &Config) {
    // Non-fatal; the tools may live outside PATH in containers
    let missing = utils::check_dependencies(config).await;
    if !missing.is_empty() {
        eprintln!("⚠️  Dependency check warnings:");
        for dep in missing {
            eprintln!("   • {}", dep);
        }
        eprintln!("   (Continuing anyway - tools may be available)");
    }
}

fn print_about() {
    println!("{}", style("Welcome to AI App Suite!").bold());
    println!();
    println!("Explore our AI-driven tools:");
    println!("  • youtube      Summarize YouTube videos and listen to the summary");
    println!("  • pdf          Extract and summarize PDF documents");
    println!("  • chat-to-pdf  Turn text into a shareable PDF");
    println!("  • ppt          Build PowerPoint slides from your notes");
    println!();
    println!("Run `ai-suite <command> --help` for details.");
}
