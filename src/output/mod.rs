use anyhow::{Context, Result};
use console::style;
use std::path::Path;

use crate::cli::OutputFormat;
use crate::extractors::SourceKind;
use crate::summarize::SummaryResult;
use crate::utils::format_duration;

fn heading(result: &SummaryResult) -> &'static str {
    match result.source_kind {
        SourceKind::Video => "Detailed Notes:",
        _ => "Summary:",
    }
}

/// Plain summary text
pub fn format_as_text(result: &SummaryResult) -> String {
    result.summary.clone()
}

/// Summary with a source header, ready to paste into notes
pub fn format_as_markdown(result: &SummaryResult) -> String {
    let mut out = format!("## {}\n\n", heading(result));

    match (&result.video_id, &result.thumbnail_url) {
        (Some(video_id), Some(thumbnail)) => {
            out.push_str(&format!("![{}]({})\n\n", video_id, thumbnail));
        }
        _ => out.push_str(&format!("_Source: {}_\n\n", result.source)),
    }

    if let Some(style) = result.style {
        out.push_str(&format!("_Style: {}_\n\n", style));
    }

    out.push_str(result.summary.trim());
    out.push('\n');
    out
}

pub fn format_as_json(result: &SummaryResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize summary")
}

fn render(result: &SummaryResult, format: &OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => format_as_text(result),
        OutputFormat::Markdown => format_as_markdown(result),
        OutputFormat::Json => format_as_json(result)?,
    })
}

/// Save summary result to file
pub async fn save_to_file(result: &SummaryResult, path: &Path, format: &OutputFormat) -> Result<()> {
    let content = render(result, format)?;
    fs_err::write(path, content)?;
    Ok(())
}

/// Print summary result to console
pub fn print_to_console(result: &SummaryResult, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            println!("{}", style(format!("## {}", heading(result))).bold().cyan());
            println!("{}", result.summary);
            println!(
                "{}",
                style(format!(
                    "({} source characters, {})",
                    result.metadata.source_chars,
                    format_duration(result.metadata.processing_duration)
                ))
                .dim()
            );
        }
        other => println!("{}", render(result, other)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::prompts::SummaryStyle;
    use crate::summarize::SummaryMetadata;

    fn video_result() -> SummaryResult {
        SummaryResult {
            summary: "- point one\n- point two\n".to_string(),
            source: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
            source_kind: SourceKind::Video,
            style: Some(SummaryStyle::BulletPoints),
            video_id: Some("dQw4w9WgXcQ".to_string()),
            thumbnail_url: Some("http://img.youtube.com/vi/dQw4w9WgXcQ/0.jpg".to_string()),
            metadata: SummaryMetadata {
                provider: "gemini".to_string(),
                source_chars: 1200,
                processing_duration: 2.5,
                generated_at: chrono::Utc::now(),
            },
        }
    }

    #[test]
    fn markdown_includes_thumbnail_and_style() {
        let md = format_as_markdown(&video_result());
        assert!(md.starts_with("## Detailed Notes:\n\n"));
        assert!(md.contains("![dQw4w9WgXcQ](http://img.youtube.com/vi/dQw4w9WgXcQ/0.jpg)"));
        assert!(md.contains("_Style: Bullet Points_"));
        assert!(md.ends_with("- point two\n"));
    }

    #[test]
    fn markdown_for_documents_names_the_file() {
        let mut result = video_result();
        result.source_kind = SourceKind::Pdf;
        result.source = "report.pdf".to_string();
        result.video_id = None;
        result.thumbnail_url = None;
        result.style = None;

        let md = format_as_markdown(&result);
        assert!(md.starts_with("## Summary:"));
        assert!(md.contains("_Source: report.pdf_"));
        assert!(!md.contains("_Style:"));
    }

    #[test]
    fn json_carries_metadata() {
        let json = format_as_json(&video_result()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["video_id"], "dQw4w9WgXcQ");
        assert_eq!(value["source_kind"], "video");
        assert_eq!(value["style"], "BulletPoints");
        assert_eq!(value["metadata"]["provider"], "gemini");
    }

    #[tokio::test]
    async fn saves_rendered_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        save_to_file(&video_result(), &path, &OutputFormat::Text)
            .await
            .unwrap();
        assert_eq!(fs_err::read_to_string(&path).unwrap(), "- point one\n- point two\n");
    }
}
