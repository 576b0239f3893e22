//! `a2a-tasks card` — show the agent card.

use colored::Colorize;

use super::{print_json, Context, OutputFormat};

pub async fn execute(ctx: &Context) -> anyhow::Result<()> {
    let client = ctx.config.client()?;
    let card = client.agent_card().await?;

    if ctx.output == OutputFormat::Json {
        return print_json(&card);
    }

    println!("\n  {} {} {}", "✓".green().bold(), card.name.bold(), card.version.dimmed());
    if let Some(ref description) = card.description {
        println!("  {description}");
    }
    println!();
    println!("  {:<12} {}", "Endpoint:".bold(), card.url.cyan());
    if let Some(ref provider) = card.provider {
        println!("  {:<12} {}", "Provider:".bold(), provider.organization);
    }

    let flag = |on: bool| if on { "yes".green() } else { "no".dimmed() };
    println!("  {:<12} {}", "Streaming:".bold(), flag(card.supports_streaming()));
    println!(
        "  {:<12} {}",
        "Push:".bold(),
        flag(card.supports_push_notifications())
    );
    println!(
        "  {:<12} in: {}  out: {}",
        "Modes:".bold(),
        card.default_input_modes.join(", "),
        card.default_output_modes.join(", ")
    );

    if !card.skills.is_empty() {
        println!("\n  {}", "Skills".bold());
        for skill in &card.skills {
            let description = skill.description.as_deref().unwrap_or("");
            println!("  {} {:<20} {}", "·".dimmed(), skill.id.cyan(), description);
        }
    }
    println!();
    Ok(())
}
