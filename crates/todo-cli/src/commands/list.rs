use anyhow::Result;
use todo_protocol::Transport;
use todo_view::{UiEvent, ViewSynchronizer};

use super::OutputContext;

pub async fn execute<T: Transport>(
    sync: &mut ViewSynchronizer<T>,
    output: &OutputContext,
) -> Result<()> {
    sync.dispatch(UiEvent::PageLoad).await?;
    output.print_view(sync)
}
