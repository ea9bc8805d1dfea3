use anyhow::{Result, anyhow};
use clap::Args;
use todo_protocol::Transport;
use todo_view::{UiEvent, ViewSynchronizer};

use super::OutputContext;

#[derive(Args, Debug)]
pub struct ToggleArgs {
    /// Task id
    pub id: String,
}

pub async fn execute<T: Transport>(
    sync: &mut ViewSynchronizer<T>,
    args: ToggleArgs,
    output: &OutputContext,
) -> Result<()> {
    sync.dispatch(UiEvent::PageLoad).await?;

    let checked = sync
        .state()
        .item(&args.id)
        .map(|item| item.checked)
        .ok_or_else(|| anyhow!("No task with id '{}'", args.id))?;

    sync.dispatch(UiEvent::CheckboxChanged {
        id: args.id.clone(),
        checked: !checked,
    })
    .await?;

    if output.verbose && !output.json && !output.html {
        let state = if checked { "open" } else { "done" };
        output.print_success(&format!("Marked {} as {}", args.id, state));
    }
    output.print_view(sync)
}
