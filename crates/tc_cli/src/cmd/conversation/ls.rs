use chrono::{FixedOffset, Local, Utc};
use comfy_table::{Cell, CellAlignment, Row};
use crossterm::style::{Color, Stylize as _};
use tc_conversation::{ConversationId, ConversationSummary};

use crate::{
    cmd::{Output, Success},
    ctx::Ctx,
};

#[derive(Debug, clap::Args)]
pub(crate) struct Ls {
    /// Limit the number of conversations to display.
    #[arg(long)]
    limit: Option<usize>,

    /// Display full timestamps instead of relative times.
    #[arg(long)]
    full: bool,
}

impl Ls {
    pub(crate) fn run(self, ctx: &mut Ctx) -> Output {
        let active_id = ctx.active_conversation_id();
        let conversations = ctx.storage.list_conversations()?;

        let count = conversations.len();
        let limit = self.limit.unwrap_or(usize::MAX);

        let mut header = Row::new();
        header.add_cell(Cell::new("ID"));
        header.add_cell(Cell::new("#").set_alignment(CellAlignment::Right));
        header.add_cell(Cell::new("Activity").set_alignment(CellAlignment::Right));
        header.add_cell(Cell::new("Name").set_alignment(CellAlignment::Left));

        let mut rows = conversations
            .into_iter()
            .take(limit)
            .map(|summary| self.build_row(active_id, summary))
            .collect::<Vec<_>>();

        if count > limit {
            let mut row = Row::new();
            row.add_cell(Cell::new(
                format!("({} hidden)", count - limit)
                    .italic()
                    .with(Color::AnsiValue(245)),
            ));
            rows.push(row);
        }

        Ok(Success::Table { header, rows })
    }

    fn build_row(&self, active_id: ConversationId, summary: ConversationSummary) -> Row {
        let ConversationSummary {
            id,
            name,
            last_updated,
            message_count,
        } = summary;

        let id_fmt = if id == active_id {
            id.to_string().bold().yellow().to_string()
        } else {
            id.to_string()
        };

        let activity = if self.full {
            let local_offset: FixedOffset = *Local::now().offset();
            last_updated
                .with_timezone(&local_offset)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        } else {
            let ago = (Utc::now() - last_updated).to_std().unwrap_or_default();
            timeago::Formatter::new().convert(ago)
        };

        let mut row = Row::new();
        row.add_cell(Cell::new(id_fmt));
        row.add_cell(Cell::new(message_count).set_alignment(CellAlignment::Right));
        row.add_cell(Cell::new(activity).set_alignment(CellAlignment::Right));
        row.add_cell(Cell::new(name.unwrap_or_default()));
        row
    }
}
