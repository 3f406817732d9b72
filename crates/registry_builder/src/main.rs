//! Registry Builder CLI
//!
//! Stats JSONL → highlight registry CSV + checksum metadata.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "registry_builder")]
#[command(about = "Build highlight clip registries from match stats JSONL", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Build a registry CSV from a stats JSONL file
    Build {
        /// Input stats JSONL file path
        #[arg(long)]
        r#in: PathBuf,

        /// Output registry CSV file path
        #[arg(long)]
        out: PathBuf,

        /// Rule configuration JSON path (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Schema version (e.g., "v1")
        #[arg(long, default_value = "v1")]
        schema_version: String,

        /// Verify the artifact after building
        #[arg(long, default_value = "false")]
        verify: bool,

        /// Output metadata JSON file
        #[arg(long)]
        metadata: Option<PathBuf>,
    },

    /// Verify a registry CSV against an expected checksum
    Verify {
        /// Registry CSV file path
        #[arg(long)]
        file: PathBuf,

        /// Expected SHA256 checksum (hex)
        #[arg(long)]
        checksum: String,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            r#in,
            out,
            config,
            schema_version,
            verify,
            metadata,
        } => {
            println!("🔨 Building highlight registry...");
            println!("   Input:  {}", r#in.display());
            println!("   Output: {}", out.display());
            println!("   Schema: {}", schema_version);

            let meta = registry_builder::build_registry_artifact(
                &r#in,
                config.as_deref(),
                &out,
                &schema_version,
            )?;

            print_metadata(&meta);

            if verify {
                verify_registry_integrity(&out, &meta.checksum)?;
            }

            if let Some(metadata_path) = metadata {
                save_metadata(&metadata_path, &meta)?;
            }
        }

        Commands::Verify { file, checksum } => {
            verify_registry_integrity(&file, &checksum)?;
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_metadata(meta: &registry_builder::RegistryMetadata) {
    println!("\n✅ Registry built successfully!");
    println!("   Clip windows:    {}", meta.clip_count);
    println!("   Events:          {}", meta.normalized_events);
    println!("   Skipped records: {}", meta.skipped_records);
    println!("   Ignored keys:    {}", meta.ignored_config_keys);
    println!("   Malformed lines: {}", meta.malformed_lines);
    println!("   Checksum:        {}", meta.checksum);
    println!("   Created:         {}", meta.created_at);
}

#[cfg(feature = "cli")]
fn verify_registry_integrity(registry_path: &std::path::Path, checksum: &str) -> Result<()> {
    println!("\n🔍 Verifying registry integrity...");
    let is_valid = registry_builder::verify_registry(registry_path, checksum)?;

    if is_valid {
        println!("✅ Registry verification passed");
        Ok(())
    } else {
        anyhow::bail!("❌ Registry verification failed - checksum mismatch!")
    }
}

#[cfg(feature = "cli")]
fn save_metadata(path: &PathBuf, meta: &registry_builder::RegistryMetadata) -> Result<()> {
    let metadata_json = serde_json::to_string_pretty(meta)?;
    std::fs::write(path, metadata_json)?;
    println!("\n📄 Metadata saved to: {}", path.display());
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("registry_builder CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
