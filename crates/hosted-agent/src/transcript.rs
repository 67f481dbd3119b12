use hosted_agent_core::RunOutcome;
use hosted_agent_service::MessageRole;
use owo_colors::OwoColorize;

const BAR_CHAR: &str = "▎";

/// Echoes the collected conversation to stdout.
pub fn print_thread_messages(outcome: &RunOutcome) {
    let header = format!(
        "Run {} for agent '{}' (thread {}) finished with status: {}",
        outcome.run_id,
        outcome.agent_name,
        outcome.thread_id,
        outcome.status.as_str()
    );
    println!("{header}");
    println!("{}", "-".repeat(header.len()));

    if let Some(last_error) = &outcome.last_error {
        println!(
            "{}",
            format!("Run failed ({}): {}", last_error.code, last_error.message)
                .bright_red()
        );
    }

    for message in &outcome.messages {
        match message.role {
            MessageRole::Assistant => println!(
                "{}[assistant] {}",
                BAR_CHAR.bright_cyan(),
                message.text.bright_white()
            ),
            _ => println!("[{}] {}", message.role.as_str(), message.text),
        }
        if !message.attachments.is_empty() {
            println!(
                "  ↳ {} image attachment(s) available.",
                message.attachments.len()
            );
        }
    }

    println!();
}
