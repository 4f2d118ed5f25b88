//! Main chat loop orchestration.
//!
//! Coordinates the conversation lifecycle: configuration and launch context,
//! welcome banner, profile submission, the input loop with slash commands,
//! and controller teardown on exit.

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use console::style;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use parley_core::backend::provider::PromptBackend;
use parley_core::chat::controller::{SessionController, SubmitOutcome};
use parley_infra::config::resolve_client_config;
use parley_infra::launch::capture_launch_context;
use parley_infra::prompt::HttpPromptDispatcher;
use parley_types::error::SessionError;

use crate::cli::ChatArgs;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::export::{Transcript, write_transcript};
use super::input::{ChatInput, InputEvent};
use super::profile::collect_profile;
use super::renderer::ChatRenderer;

const ASSISTANT_NAME: &str = "Parley";

/// How a follow-up submission ended from the loop's point of view.
enum Turn {
    Continue,
    Quit,
}

/// Run the interactive chat.
pub async fn run_chat_loop(args: ChatArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = resolve_client_config(config_path, args.base_url.as_deref()).await;
    let launch = capture_launch_context(args.campaign.as_deref(), args.launch_url.as_deref())?;
    let dispatcher = HttpPromptDispatcher::new(&config)?;
    let controller = SessionController::new(dispatcher, launch);
    let renderer = ChatRenderer::new(ASSISTANT_NAME);

    print_welcome_banner(&config.base_url, controller.launch().campaign.as_deref());

    if !open_session(&controller, &renderer, &args).await? {
        controller.dispose();
        return Ok(());
    }

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let event = chat_input.read_line().await;
        match event {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) => {
                if text.is_empty() {
                    continue;
                }

                if let Some(cmd) = commands::parse(&text) {
                    match cmd {
                        ChatCommand::Help => commands::print_help(),
                        ChatCommand::Clear => chat_input.clear(),
                        ChatCommand::History => renderer.print_history(&controller.snapshot()),
                        ChatCommand::Exit => {
                            println!("\n  {}", style("Session ended.").dim());
                            break;
                        }
                        ChatCommand::Retry => {
                            let draft = controller.draft();
                            if draft.trim().is_empty() {
                                println!("\n  {}\n", style("Nothing to retry.").dim());
                                continue;
                            }
                            if let Turn::Quit =
                                send_message(&controller, &mut chat_input, &renderer, &draft)
                                    .await?
                            {
                                break;
                            }
                        }
                        ChatCommand::Export(path) => {
                            let messages = controller.snapshot();
                            let session_id = controller.session_id();
                            let transcript = Transcript {
                                session_id: session_id.as_ref(),
                                campaign: controller.launch().campaign.as_deref(),
                                exported_at: chrono::Utc::now(),
                                messages: &messages,
                            };
                            match write_transcript(&path, &transcript).await {
                                Ok(()) => println!(
                                    "\n  {} Saved {} messages to {}\n",
                                    style("*").cyan().bold(),
                                    messages.len(),
                                    style(path.display()).dim()
                                ),
                                Err(e) => println!("\n  {} {e:#}\n", style("!").red().bold()),
                            }
                        }
                        ChatCommand::Unknown(cmd_name) => {
                            println!(
                                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                                style("?").yellow().bold(),
                                style(cmd_name).dim()
                            );
                        }
                    }
                    continue;
                }

                if let Turn::Quit =
                    send_message(&controller, &mut chat_input, &renderer, &text).await?
                {
                    break;
                }
            }
        }
    }

    controller.dispose();
    info!("chat session closed");
    Ok(())
}

/// Submit the profile until a session opens. Returns `false` if the user
/// gives up or interrupts.
async fn open_session<B: PromptBackend>(
    controller: &SessionController<B>,
    renderer: &ChatRenderer,
    args: &ChatArgs,
) -> anyhow::Result<bool> {
    loop {
        let profile = collect_profile(args.age, args.hobby.as_deref(), args.other.as_deref())?;
        debug!(age = profile.age(), "submitting profile");

        let submission = controller.submit_profile(profile);
        let outcome = with_spinner(async {
            tokio::select! {
                outcome = submission => outcome.map(Some),
                _ = tokio::signal::ctrl_c() => {
                    controller.dispose();
                    Ok(None)
                }
            }
        })
        .await?;

        match outcome {
            Some(SubmitOutcome::Answered) => {
                renderer.print_latest(&controller.snapshot());
                return Ok(true);
            }
            Some(SubmitOutcome::Failed(err)) => {
                renderer.print_latest(&controller.snapshot());
                debug!(error = %err, "profile submission failed");
                let again = Confirm::new()
                    .with_prompt("  Try again?")
                    .default(true)
                    .interact()?;
                if !again {
                    return Ok(false);
                }
            }
            Some(SubmitOutcome::Dropped) | None => return Ok(false),
        }
    }
}

/// Send one follow-up and print the reply.
///
/// Input is read concurrently only to notice Ctrl+C / Ctrl+D; typed lines
/// are refused while the reply is outstanding.
async fn send_message<B: PromptBackend>(
    controller: &SessionController<B>,
    chat_input: &mut ChatInput,
    renderer: &ChatRenderer,
    text: &str,
) -> anyhow::Result<Turn> {
    let spinner = typing_spinner();
    let submission = controller.submit_message(text);
    tokio::pin!(submission);

    let result = loop {
        tokio::select! {
            result = &mut submission => break result,
            event = chat_input.read_line() => match event {
                InputEvent::Eof | InputEvent::Interrupted => {
                    spinner.finish_and_clear();
                    controller.dispose();
                    println!("\n  {}", style("Session ended.").dim());
                    return Ok(Turn::Quit);
                }
                InputEvent::Message(_) => {
                    spinner.println(format!(
                        "  {}",
                        style("Still waiting for the previous reply...").dim()
                    ));
                }
            },
        }
    };
    spinner.finish_and_clear();

    match result {
        Ok(SubmitOutcome::Answered) => renderer.print_latest(&controller.snapshot()),
        Ok(SubmitOutcome::Failed(_)) => {
            renderer.print_latest(&controller.snapshot());
            println!("  {}\n", style("Type /retry to send it again.").dim());
        }
        Ok(SubmitOutcome::Dropped) => return Ok(Turn::Quit),
        Err(SessionError::Validation(reason)) => {
            println!("\n  {} {reason}\n", style("!").yellow().bold());
        }
        Err(err) => return Err(err.into()),
    }
    Ok(Turn::Continue)
}

/// Run `fut` behind a "typing..." spinner.
async fn with_spinner<F: Future>(fut: F) -> F::Output {
    let spinner = typing_spinner();
    let output = fut.await;
    spinner.finish_and_clear();
    output
}

fn typing_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message(format!("{ASSISTANT_NAME} is typing..."));
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
