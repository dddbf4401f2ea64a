use anyhow::{Context, Result};

use nvi_console::console::Console;
use nvi_console::model::BusinessSettings;

use crate::SettingsCommands;

use super::{or_dash, print_json, print_notice};

pub(super) fn handle_settings_command(
    console: &mut Console,
    command: SettingsCommands,
) -> Result<()> {
    console.load_settings_page()?;

    match command {
        SettingsCommands::Show { json } => {
            let settings = console
                .settings
                .settings
                .as_ref()
                .context("settings not loaded")?;
            if json {
                return print_json(settings, "settings json");
            }
            if let Some(b) = &console.settings.business {
                println!("business: {} ({}) {}", b.name, b.id, b.status);
            }
            let locale = &settings.locale_settings;
            println!(
                "locale: language={} currency={} timezone={}",
                or_dash(locale.language.as_deref()),
                or_dash(locale.currency.as_deref()),
                or_dash(locale.timezone.as_deref())
            );
            println!(
                "stock: negative_allowed={} low_threshold={}",
                settings.stock_policy.negative_stock_allowed,
                settings
                    .stock_policy
                    .low_stock_threshold
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "-".into())
            );
            println!(
                "pos: credit={} shifts={}",
                settings.pos_policy.credit_enabled, settings.pos_policy.shift_tracking_enabled
            );
            if !settings.extra.is_empty() {
                let keys: Vec<&str> = settings.extra.keys().map(String::as_str).collect();
                println!("other keys: {}", keys.join(", "));
            }
            println!("units: {}", console.settings.units.len());
            print_notice(console);
        }

        SettingsCommands::Set { file } => {
            let bytes = std::fs::read(&file)
                .with_context(|| format!("read {}", file.display()))?;
            let doc: BusinessSettings = serde_json::from_slice(&bytes)
                .with_context(|| format!("parse {}", file.display()))?;
            console.settings.draft = Some(doc);
            console.save_settings()?;
            println!("Settings saved");
        }

        SettingsCommands::Units { add, json } => {
            if let Some(pair) = add {
                let (code, label) = match pair.as_slice() {
                    [code, label] => (code.as_str(), label.as_str()),
                    _ => anyhow::bail!("--add takes CODE LABEL"),
                };
                let unit = console.add_unit(code, label)?;
                println!("Added unit {} ({})", unit.code, unit.id);
                return Ok(());
            }
            if json {
                return print_json(&console.settings.units, "units json");
            }
            if console.settings.units.is_empty() {
                println!("No units");
            }
            for u in &console.settings.units {
                println!("{} {} {}", u.id, u.code, u.label);
            }
            print_notice(console);
        }

        SettingsCommands::DeleteBusiness {
            business_id,
            password,
            confirm_text,
        } => {
            console.delete_business(&business_id, &password, &confirm_text)?;
            println!("Business {} deleted", business_id);
        }
    }
    Ok(())
}
