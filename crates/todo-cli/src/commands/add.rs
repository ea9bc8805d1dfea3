use anyhow::Result;
use clap::Args;
use todo_protocol::Transport;
use todo_view::{Patch, UiEvent, ViewSynchronizer};

use super::OutputContext;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Task text
    pub text: String,
}

pub async fn execute<T: Transport>(
    sync: &mut ViewSynchronizer<T>,
    args: AddArgs,
    output: &OutputContext,
) -> Result<()> {
    sync.dispatch(UiEvent::PageLoad).await?;
    let patches = sync.dispatch(UiEvent::Submit(args.text)).await?;

    if !output.json && !output.html {
        if let Some(Patch::Append(item)) = patches.last() {
            output.print_success(&format!("Added task {}", item.id));
        }
    }
    output.print_view(sync)
}
