use crate::commands::create::{CreateSummary, start_command};
use crate::i18n::Messages;

pub(crate) fn print_create_summary(summary: &CreateSummary, verbose: bool, messages: &Messages) {
    if !verbose {
        println!("{}", messages.create_ok());
        return;
    }

    println!("{}", messages.create_success());
    println!(
        "{}",
        messages.create_start_hint(&start_command(&summary.target))
    );
    println!(
        "{}",
        messages.summary_config_path(&summary.config_path.display().to_string())
    );
    println!("{}", messages.summary_site_id(summary.site_id));
    println!("{}", messages.summary_admin_user(&summary.admin_username));
    println!(
        "{}",
        messages.summary_admin_password(&display_secret(
            &summary.admin_password,
            summary.show_secrets
        ))
    );
    if summary.admin_created {
        println!("{}", messages.summary_admin_created());
    } else {
        println!("{}", messages.summary_admin_existing());
    }
}

pub(crate) fn display_secret(value: &str, show_secrets: bool) -> String {
    if show_secrets {
        value.to_string()
    } else {
        mask_value(value)
    }
}

pub(crate) fn mask_value(value: &str) -> String {
    let trimmed = value.trim();
    match trimmed.char_indices().rev().nth(3) {
        Some((idx, _)) if idx > 0 => format!("****{}", &trimmed[idx..]),
        _ => "****".to_string(),
    }
}
