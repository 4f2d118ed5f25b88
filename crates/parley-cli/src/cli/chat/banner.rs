//! Welcome banner display for chat sessions.

use console::style;

/// Print the welcome banner: backend origin, campaign, and a usage hint.
pub fn print_welcome_banner(base_url: &str, campaign: Option<&str>) {
    println!();
    println!("  * {}", style("Parley").cyan().bold());
    println!(
        "  {}",
        style("Tell us a little about yourself to get started.").dim()
    );
    println!();
    println!("  {}   {}", style("Backend:").bold(), style(base_url).dim());
    if let Some(campaign) = campaign {
        println!("  {}  {}", style("Campaign:").bold(), style(campaign).dim());
    }
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
