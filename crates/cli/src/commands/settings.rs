use std::env;
use std::path::{Path, PathBuf};

use bonbon_core::settings::PosSettings;
use bonbon_store::{SettingsStore, StoreError};

use crate::commands::{money, CommandResult};

/// Precedence: `--data-dir` flag, then `BONBON_DATA_DIR`, then `./.bonbon`.
pub fn resolve_data_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| env::var_os("BONBON_DATA_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(".bonbon"))
}

pub fn show(data_dir: &Path) -> CommandResult {
    let store = match SettingsStore::open(data_dir) {
        Ok(store) => store,
        Err(error) => return store_failure("settings show", error),
    };
    let source = match store.is_initialized() {
        Ok(true) => format!("stored blob under `{}`", data_dir.display()),
        Ok(false) => "built-in defaults, nothing stored".to_string(),
        Err(error) => return store_failure("settings show", error),
    };
    let settings = store.load();

    let mut lines = vec![format!("effective settings (source: {source}):")];
    lines.push(render_line("business.name", &settings.business_name));
    lines.push(render_line("business.address", &settings.business_address));
    lines.push(render_line("business.phone", &settings.business_phone));
    lines.push(render_line("business.email", &settings.business_email));
    lines.push(render_line("tax_rate", &format!("{}%", settings.tax_rate)));
    let currency = if settings.currency.is_empty() { "<none>" } else { settings.currency.as_str() };
    lines.push(render_line("currency", currency));
    lines.push(render_line(
        "notifications",
        &format!(
            "low_stock={}, new_orders={}, customer_updates={}",
            settings.notifications.low_stock,
            settings.notifications.new_orders,
            settings.notifications.customer_updates
        ),
    ));
    for size in &settings.gift_box_settings.sizes {
        lines.push(render_line(
            &format!("gift_box.sizes.{}", size.id),
            &format!(
                "{}, holds {}, {}{}",
                size.name,
                size.capacity,
                money(size.price),
                if size.enabled { "" } else { ", disabled" }
            ),
        ));
    }
    lines.push(render_line(
        "gift_box.extras",
        &format!(
            "{} decorations, {} ribbons, {} cards, {} personalizations",
            settings.gift_box_settings.decorations.len(),
            settings.gift_box_settings.ribbons.len(),
            settings.gift_box_settings.cards.len(),
            settings.gift_box_settings.personalizations.len()
        ),
    ));
    CommandResult::text(lines.join("\n"))
}

pub fn init(data_dir: &Path, force: bool) -> CommandResult {
    let store = match SettingsStore::open(data_dir) {
        Ok(store) => store,
        Err(error) => return store_failure("settings init", error),
    };
    match store.is_initialized() {
        Ok(true) if !force => CommandResult::failure(
            "settings init",
            "already_initialized",
            format!(
                "a settings blob already exists under `{}`; pass --force to overwrite it",
                data_dir.display()
            ),
            2,
        ),
        Ok(_) => match store.save(&PosSettings::default()) {
            Ok(()) => CommandResult::success(
                "settings init",
                format!("default settings written under `{}`", data_dir.display()),
            ),
            Err(error) => store_failure("settings init", error),
        },
        Err(error) => store_failure("settings init", error),
    }
}

fn store_failure(command: &str, error: StoreError) -> CommandResult {
    CommandResult::failure(command, "store_io", error.to_string(), 1)
}

fn render_line(key: &str, value: &str) -> String {
    format!("- {key} = {value}")
}
