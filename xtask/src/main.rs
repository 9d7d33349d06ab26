use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::{exit, Command};

use clap::{Parser, Subcommand, ValueEnum};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const CORE_PACKAGE: &str = "delivery_notifier_core";
const LAMBDA_PACKAGE: &str = "delivery_notifier_lambda";
const LAMBDA_BINARY: &str = "notifier_lambda";
const ARTIFACT_PATH: &str = "infra/lambda_email/dist/notifier.zip";

type TaskResult = Result<(), String>;

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Build and check tasks for the delivery notifier"
)]
struct Cli {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Run CI checks against both notifier crates
    Ci {
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
    /// Build `notifier_lambda` and zip it as the Lambda `bootstrap`
    ServerlessPackage {
        /// Target triple of the Lambda runtime
        #[arg(long, default_value = "x86_64-unknown-linux-gnu")]
        target: String,
        /// Package an unoptimized build
        #[arg(long)]
        debug: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CiJob {
    /// rustfmt, clippy, then tests
    Check,
    /// Tests only
    Test,
}

fn cargo(args: &[&str]) -> TaskResult {
    let command_line = format!("cargo {}", args.join(" "));
    eprintln!("> {command_line}");

    let status = Command::new("cargo")
        .args(args)
        .status()
        .map_err(|error| format!("could not start cargo: {error}"))?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("`{command_line}` exited with {status}"))
    }
}

fn run_ci(job: CiJob) -> TaskResult {
    if let CiJob::Check = job {
        cargo(&["fmt", "--all", "--", "--check"])?;
        cargo(&[
            "clippy",
            "--workspace",
            "--all-targets",
            "--",
            "-D",
            "warnings",
        ])?;
    }

    for package in [CORE_PACKAGE, LAMBDA_PACKAGE] {
        cargo(&["test", "-p", package])?;
    }
    Ok(())
}

fn package_lambda(target: &str, debug: bool) -> TaskResult {
    let mut build = vec!["build", "-p", LAMBDA_PACKAGE, "--bin", LAMBDA_BINARY];
    build.extend(["--target", target]);
    if !debug {
        build.push("--release");
    }
    cargo(&build)?;

    let profile_dir = if debug { "debug" } else { "release" };
    let binary = Path::new("target")
        .join(target)
        .join(profile_dir)
        .join(LAMBDA_BINARY);
    let artifact = Path::new(ARTIFACT_PATH);
    write_bootstrap_zip(&binary, artifact)?;

    eprintln!("packaged {}", artifact.display());
    Ok(())
}

/// Lambda's `provided` runtimes execute a file named `bootstrap` at the
/// archive root, so the binary is stored under that name with exec bits.
fn write_bootstrap_zip(binary: &Path, artifact: &Path) -> TaskResult {
    let executable =
        fs::read(binary).map_err(|error| format!("cannot read {}: {error}", binary.display()))?;

    if let Some(dir) = artifact.parent() {
        fs::create_dir_all(dir)
            .map_err(|error| format!("cannot create {}: {error}", dir.display()))?;
    }
    let file = File::create(artifact)
        .map_err(|error| format!("cannot create {}: {error}", artifact.display()))?;

    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    let mut archive = ZipWriter::new(file);
    archive
        .start_file("bootstrap", options)
        .map_err(|error| format!("cannot add bootstrap entry: {error}"))?;
    archive
        .write_all(&executable)
        .map_err(|error| format!("cannot write bootstrap entry: {error}"))?;
    archive
        .finish()
        .map_err(|error| format!("cannot finish {}: {error}", artifact.display()))?;
    Ok(())
}

fn main() {
    let outcome = match Cli::parse().task {
        Task::Ci { job } => run_ci(job),
        Task::ServerlessPackage { target, debug } => package_lambda(&target, debug),
    };

    if let Err(message) = outcome {
        eprintln!("xtask: {message}");
        exit(1);
    }
}
