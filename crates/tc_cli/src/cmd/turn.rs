//! Shared handling of a single assistant response.

use tc_conversation::{Conversation, Message};
use tc_llm::{ChatRequest, TurnEnd, TurnOutcome, run_turn};
use tc_split::StreamSplitter;
use tracing::{debug, info};

use crate::{Result, ctx::Ctx, signals::Interrupt};

#[derive(Debug, clap::Args)]
pub(crate) struct TurnArgs {
    /// The model to use.
    ///
    /// Defaults to the configured `model.name`.
    #[arg(short = 'o', long = "model")]
    model: Option<String>,

    /// The sampling temperature, between 0.0 and 2.0.
    #[arg(short = 't', long = "temperature", value_parser = parse_temperature)]
    temperature: Option<f32>,

    /// Do not display the reasoning content.
    ///
    /// This does not stop the model from reasoning, and the reasoning is still
    /// stored with the conversation.
    #[arg(long = "hide-reasoning")]
    hide_reasoning: bool,
}

fn parse_temperature(s: &str) -> std::result::Result<f32, String> {
    let temperature = s.parse::<f32>().map_err(|error| error.to_string())?;
    tc_config::model::validate_temperature(temperature).map_err(|error| error.to_string())?;

    Ok(temperature)
}

/// Stream the assistant's answer to the messages of `conversation`.
///
/// The answer is appended to the conversation, even when the turn is
/// cancelled or fails midway. Nothing is appended if the turn ended before
/// any text arrived.
pub(crate) async fn respond(
    ctx: &Ctx,
    conversation: &mut Conversation,
    args: &TurnArgs,
) -> Result<TurnEnd> {
    let config = ctx.config();
    let model = args.model.as_deref().unwrap_or(&config.model.name);
    let temperature = args.temperature.unwrap_or(config.model.temperature);

    let request =
        ChatRequest::new(model, conversation.messages.clone()).with_temperature(temperature);
    let splitter = StreamSplitter::new(config.delimiters.delimiters()?);
    let provider = ctx.provider()?;
    let mut renderer = ctx.renderer(ctx.reasoning_policy(args.hide_reasoning));

    debug!(
        model = %request.model,
        messages = request.messages.len(),
        temperature,
        "Sending chat request."
    );

    let stream = provider.chat_stream(&request).await?;

    let interrupt = Interrupt::listen();
    let mut render_error = None;
    let TurnOutcome {
        split,
        end,
        reasoning_truncated,
    } = run_turn(stream, splitter, interrupt.token(), |snapshot| {
        if render_error.is_none() {
            render_error = renderer.render(snapshot).err();
        }
    })
    .await;
    drop(interrupt);

    let message = Message::assistant_from_split(split);
    let finished = renderer.finish(&message, reasoning_truncated);

    if matches!(end, TurnEnd::Completed) || !message.content.is_empty() || message.has_reasoning() {
        info!(
            reasoning = message.has_reasoning(),
            truncated = reasoning_truncated,
            "Adding assistant message to conversation."
        );
        conversation.push(message);
    }

    if let Some(error) = render_error {
        return Err(error.into());
    }
    finished?;

    Ok(end)
}
