use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use std::process::Command as ProcessCommand;

pub fn handle(cmd: &Commands, _cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        if *print_config {
            let config = Config::load();
            let yaml = serde_yaml::to_string(&config).map_err(|_| AppError::ConfigLoad)?;
            println!("📄 Current configuration:");
            println!("{}", yaml);
        }

        if *edit_config {
            let path = Config::config_file();
            if !path.exists() {
                warning("No config file found; run `rponto init` first.");
                return Ok(());
            }

            let chosen = editor.clone().unwrap_or_else(|| {
                std::env::var("EDITOR")
                    .or_else(|_| std::env::var("VISUAL"))
                    .unwrap_or_else(|_| {
                        if cfg!(target_os = "windows") {
                            "notepad".to_string()
                        } else {
                            "nano".to_string()
                        }
                    })
            });

            let status = ProcessCommand::new(&chosen).arg(&path).status()?;
            if !status.success() {
                return Err(AppError::Config(format!("editor '{}' exited with an error", chosen)));
            }
        }
    }

    Ok(())
}
