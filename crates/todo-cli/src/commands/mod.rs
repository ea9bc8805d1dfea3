pub mod add;
pub mod list;
pub mod toggle;

use anyhow::Result;
use comfy_table::{Cell, Color, Table, presets::UTF8_FULL};
use todo_protocol::Transport;
use todo_view::{ViewState, ViewSynchronizer, state::EMPTY_PLACEHOLDER};

#[derive(Debug, Clone, Default)]
pub struct OutputContext {
    pub json: bool,
    pub html: bool,
    pub verbose: bool,
}

impl OutputContext {
    /// Print the synchronizer's current view in the selected format
    pub fn print_view<T: Transport>(&self, sync: &ViewSynchronizer<T>) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(sync.state().items())?);
            return Ok(());
        }

        if self.html {
            println!("{}", sync.render());
            return Ok(());
        }

        if sync.state().shows_placeholder() {
            self.print_info(EMPTY_PLACEHOLDER);
            return Ok(());
        }

        println!("{}", build_table(sync.state()));
        Ok(())
    }

    pub fn print_success(&self, message: &str) {
        use colored::Colorize;
        println!("{} {}", "✓".green(), message);
    }

    pub fn print_error(&self, message: &str) {
        use colored::Colorize;
        eprintln!("{} {}", "✗".red(), message);
    }

    pub fn print_info(&self, message: &str) {
        use colored::Colorize;
        println!("{} {}", "ℹ".blue(), message);
    }
}

/// One row per rendered item, in view order
pub fn build_table(state: &ViewState) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ID", "Task", "Status"]);

    for item in state.items() {
        let status = if item.done {
            Cell::new("done").fg(Color::Green)
        } else {
            Cell::new("open").fg(Color::Yellow)
        };
        table.add_row(vec![Cell::new(&item.id), Cell::new(&item.text), status]);
    }

    table
}
