use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use shopsmoke::config::Config;
use shopsmoke::{report, runner};

#[derive(Parser)]
#[command(name = "shopsmoke")]
#[command(version = "0.1.0")]
#[command(about = "Smoke-test CLI for e-commerce backend HTTP APIs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a test suite against a deployment
    Run {
        /// Base URL of the deployment, e.g. https://staging.example.com
        base_url: String,

        /// Suite to run (full, smoke)
        #[arg(short, long, default_value = "full")]
        suite: String,

        /// Per-request timeout in seconds
        #[arg(long, default_value = "10")]
        timeout: u64,

        /// Write JSON results to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write a JUnit XML report
        #[arg(long, default_value = "false")]
        junit: bool,

        /// Exit non-zero when the success rate drops below this percentage
        #[arg(long, default_value = "100.0")]
        fail_under: f64,

        /// Admin username for the admin login case
        #[arg(long, default_value = "admin")]
        admin_user: String,

        /// Admin password for the admin login case
        #[arg(long, default_value = "admin123")]
        admin_password: String,
    },

    /// Generate report from saved results
    Report {
        /// Path to results JSON
        results: PathBuf,

        /// Output format (json, junit)
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            base_url,
            suite,
            timeout,
            output,
            junit,
            fail_under,
            admin_user,
            admin_password,
        } => {
            let config = Config {
                base_url,
                timeout_secs: timeout,
                admin_username: admin_user,
                admin_password,
            };

            let cases = match suite.as_str() {
                "full" => runner::suites::full_suite(),
                "smoke" => runner::suites::smoke_suite(),
                _ => anyhow::bail!("Unknown suite: {}", suite),
            };

            println!(
                "{} Running {} suite against: {}",
                "▶".green().bold(),
                suite.cyan(),
                config.base_url.cyan()
            );

            let results = runner::run_suite(&config, &cases).await?;

            if let Some(ref path) = output {
                report::json::generate(&results, Some(path)).await?;
            }
            if junit {
                let junit_path = output
                    .as_deref()
                    .map(|p| p.with_extension("xml"))
                    .unwrap_or_else(|| PathBuf::from("junit.xml"));
                report::junit::generate(&results, Some(&junit_path)).await?;
            }

            let rate = results.summary.success_rate;
            if rate < fail_under {
                println!(
                    "{} Success rate {:.1}% is below threshold {:.1}%",
                    "❌".red(),
                    rate,
                    fail_under
                );
                std::process::exit(1);
            }
        }

        Commands::Report {
            results,
            format,
            output,
        } => {
            println!(
                "{} Generating {} report from: {}",
                "📊".to_string().blue(),
                format.cyan(),
                results.display()
            );
            report::generate_report(&results, &format, output.as_deref()).await?;
        }
    }

    Ok(())
}
