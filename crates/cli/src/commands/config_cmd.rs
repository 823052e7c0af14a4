//! `teamup config` — Configuration management commands.

use std::path::Path;
use teamup_config::AppConfig;

pub async fn validate(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    match AppConfig::load_with_env(config_path) {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");

            let mut warnings = Vec::new();
            if !config_path.exists() {
                warnings.push(format!(
                    "No config file at {} (defaults in use; run `teamup onboard`)",
                    config_path.display()
                ));
            }
            if config.data.auto_load
                && !config.data.roster_file.exists()
                && !config.data.sample_file.exists()
            {
                warnings.push("Neither the roster file nor the sample file exists".to_string());
            }

            if warnings.is_empty() {
                println!("   ✅ All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   ⚠️  {w}");
                }
            }

            println!();
            println!("   Team size:  {}", config.formation.default_team_size);
            println!("   Strategy:   {}", config.formation.default_strategy);
            println!("   Grace:      {}s", config.formation.shutdown_grace_secs);
            println!("   Roster:     {}", config.data.roster_file.display());
            println!("   Sample:     {}", config.data.sample_file.display());
            println!("   Exports:    {}", config.data.export_dir.display());
            println!("   Log level:  {}", config.logging.level);
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub async fn show(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}

pub async fn path(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    #[test]
    fn config_path_is_valid() {
        let path = teamup_config::AppConfig::config_path();
        assert!(path.to_str().unwrap().contains(".teamup"));
        assert!(path.to_str().unwrap().ends_with("config.toml"));
    }
}
