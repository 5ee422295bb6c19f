use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use incident_core::{synthesize_analysis, AnalysisResult, IncidentRequest};
use std::path::PathBuf;
use std::time::{Duration, Instant};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Parser)]
#[command(name = "incident-cli")]
#[command(about = "Send incident details to the incident helper and print the analysis")]
#[command(version)]
struct Cli {
    #[arg(long, env = "INCIDENT_HELPER_API_URL", default_value = "http://localhost:8080")]
    server_url: String,

    /// Enable debug mode
    #[arg(long, short, default_value = "false")]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze an incident
    Analyze(AnalyzeArgs),
    /// Check that the server is up
    Health,
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Title / short description
    #[arg(long, default_value = "Lambda 500 errors after new deploy")]
    title: String,

    /// Service / context
    #[arg(long, default_value = "AWS Lambda + API Gateway")]
    service: String,

    /// User-facing symptoms
    #[arg(long, default_value = "")]
    symptoms: String,

    /// Text snippet to analyze (logs, code, config)
    #[arg(long, default_value = "", conflicts_with = "logs_file")]
    logs: String,

    /// Read the logs snippet from a file
    #[arg(long)]
    logs_file: Option<PathBuf>,

    /// Synthesize the analysis locally instead of calling the server
    #[arg(long)]
    offline: bool,

    /// Print the raw JSON response
    #[arg(long)]
    raw: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        eprintln!("{}", "[DEBUG] Debug mode enabled".dimmed());
        eprintln!("{}", format!("[DEBUG] Server URL: {}", cli.server_url).dimmed());
    }

    match cli.command {
        Commands::Analyze(args) => analyze(&cli.server_url, args, cli.debug).await,
        Commands::Health => health(&cli.server_url, cli.debug).await,
    }
}

async fn analyze(server_url: &str, args: AnalyzeArgs, debug: bool) -> anyhow::Result<()> {
    let logs = match &args.logs_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read logs file {}", path.display()))?,
        None => args.logs.clone(),
    };

    let request = build_request(&args, logs)?;

    let analysis = if args.offline {
        synthesize_analysis(&request)
    } else {
        post_analysis(server_url, &request, debug).await?
    };

    if args.raw {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print!("{}", render_analysis(&analysis));
    }

    Ok(())
}

fn build_request(args: &AnalyzeArgs, logs: String) -> anyhow::Result<IncidentRequest> {
    if args.symptoms.trim().is_empty() && logs.trim().is_empty() {
        bail!("Please provide some text (symptoms and/or logs) to analyze.");
    }

    Ok(IncidentRequest::new()
        .with_title(&args.title)
        .with_service(&args.service)
        .with_symptoms(&args.symptoms)
        .with_logs(logs))
}

async fn post_analysis(
    server_url: &str,
    request: &IncidentRequest,
    debug: bool,
) -> anyhow::Result<AnalysisResult> {
    let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
    let url = format!("{}/analyze", server_url.trim_end_matches('/'));

    if debug {
        eprintln!("{}", format!("[DEBUG] POST {}", url).dimmed());
        eprintln!(
            "{}",
            format!("[DEBUG] Request body: {}", serde_json::to_string(request)?).dimmed()
        );
    }

    println!("{}", "🔍 Calling incident helper backend…".cyan());

    let start = Instant::now();
    let response = client
        .post(&url)
        .json(request)
        .send()
        .await
        .with_context(|| format!("error calling backend at {}", url))?;

    if debug {
        eprintln!(
            "{}",
            format!("[DEBUG] Response: {} in {:?}", response.status(), start.elapsed()).dimmed()
        );
    }

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        bail!("backend returned {}: {}", status, text);
    }

    Ok(response.json().await?)
}

async fn health(server_url: &str, debug: bool) -> anyhow::Result<()> {
    let url = format!("{}/health", server_url.trim_end_matches('/'));
    if debug {
        eprintln!("{}", format!("[DEBUG] GET {}", url).dimmed());
    }

    let response = reqwest::get(&url).await?;
    if response.status().is_success() {
        println!("{}", format!("✅ {} is healthy", server_url).green());
        Ok(())
    } else {
        println!("{}", format!("❌ Error: {}", response.status()).red());
        bail!("health check failed")
    }
}

fn render_analysis(analysis: &AnalysisResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", "🧠 AI Analysis".bold()));

    if !analysis.summary.is_empty() {
        out.push_str(&format!("{} {}\n\n", "Summary:".bold(), analysis.summary));
    }

    if !analysis.hypotheses.is_empty() {
        out.push_str(&format!("{}\n", "🧩 Possible Root Causes".yellow().bold()));
        for (i, hypothesis) in analysis.hypotheses.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, hypothesis));
        }
        out.push('\n');
    }

    if !analysis.checks.is_empty() {
        out.push_str(&format!("{}\n", "🔎 What to Check / Do Next".cyan().bold()));
        for check in &analysis.checks {
            out.push_str(&format!("  - {}\n", check));
        }
        out.push('\n');
    }

    if !analysis.fixes.is_empty() {
        out.push_str(&format!("{}\n", "🛠 Suggested Fixes".green().bold()));
        for fix in &analysis.fixes {
            out.push_str(&format!("  - {}\n", fix));
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(symptoms: &str) -> AnalyzeArgs {
        AnalyzeArgs {
            title: "t".to_string(),
            service: "svc".to_string(),
            symptoms: symptoms.to_string(),
            logs: String::new(),
            logs_file: None,
            offline: false,
            raw: false,
        }
    }

    #[test]
    fn test_build_request_requires_some_text() {
        assert!(build_request(&args("  "), "\n".to_string()).is_err());
    }

    #[test]
    fn test_build_request_with_logs_only() {
        let request = build_request(&args(""), "ERROR timeout".to_string()).unwrap();
        assert_eq!(request.title(), "t");
        assert_eq!(request.service(), "svc");
        assert_eq!(request.logs(), "ERROR timeout");
    }

    #[test]
    fn test_render_numbers_root_causes() {
        colored::control::set_override(false);
        let analysis = AnalysisResult {
            summary: "Deploy broke things".to_string(),
            hypotheses: vec!["rc1".to_string(), "rc2".to_string()],
            checks: vec!["check1".to_string()],
            fixes: vec![],
            raw_text: String::new(),
        };

        let out = render_analysis(&analysis);

        assert!(out.contains("Summary: Deploy broke things"));
        assert!(out.contains("  1. rc1\n  2. rc2\n"));
        assert!(out.contains("  - check1\n"));
        assert!(!out.contains("Suggested Fixes"));
    }

    #[test]
    fn test_cli_parses_analyze() {
        let cli = Cli::try_parse_from([
            "incident-cli",
            "--server-url",
            "http://example.test",
            "analyze",
            "--symptoms",
            "slow",
            "--offline",
        ])
        .unwrap();

        assert_eq!(cli.server_url, "http://example.test");
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.symptoms, "slow");
                assert!(args.offline);
            }
            Commands::Health => panic!("expected analyze"),
        }
    }
}
