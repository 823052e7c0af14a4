//! `teamup onboard` — First-time setup.

use std::path::Path;
use teamup_config::AppConfig;

/// Shipped sample roster, written to the configured sample path on onboard.
pub const SAMPLE_PARTICIPANTS: &str = include_str!("../../data/participants_sample.csv");

pub async fn run(config: &AppConfig, config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("👥 TeamUp — First-Time Setup");
    println!("============================\n");

    if let Some(config_dir) = config_path.parent() {
        if !config_dir.exists() {
            std::fs::create_dir_all(config_dir)?;
            println!("✅ Created config directory: {}", config_dir.display());
        } else {
            println!("  Config directory exists: {}", config_dir.display());
        }
    }

    let export_dir = &config.data.export_dir;
    if !export_dir.exists() {
        std::fs::create_dir_all(export_dir)?;
        println!("✅ Created data directory: {}", export_dir.display());
    }

    let sample = &config.data.sample_file;
    if sample.exists() {
        println!("  Sample participants exist: {}", sample.display());
    } else {
        if let Some(parent) = sample.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(sample, SAMPLE_PARTICIPANTS)?;
        println!("✅ Wrote sample participants: {}", sample.display());
    }

    if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
    } else {
        std::fs::write(config_path, AppConfig::default_toml())?;
        println!("✅ Created config.toml at: {}", config_path.display());
        println!("\n📝 Next steps:");
        println!("   1. Run: teamup participants");
        println!("   2. Run: teamup form --size 5");
        println!("   3. Or start the interactive menu: teamup\n");
    }

    println!("🎉 Setup complete!\n");
    Ok(())
}
