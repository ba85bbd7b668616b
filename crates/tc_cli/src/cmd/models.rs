use comfy_table::{Cell, CellAlignment, Row};
use crossterm::style::Stylize as _;
use tc_llm::available_models;

use super::{Output, Success};
use crate::ctx::Ctx;

#[derive(Debug, clap::Args)]
pub(crate) struct Models {}

impl Models {
    pub(crate) async fn run(self, ctx: &mut Ctx) -> Output {
        let provider = ctx.provider()?;
        let default = &ctx.config().model.name;
        let models = available_models(provider.as_ref(), default).await;

        let mut header = Row::new();
        header.add_cell(Cell::new("Model"));
        header.add_cell(Cell::new("Default").set_alignment(CellAlignment::Center));

        let rows = models
            .into_iter()
            .map(|name| {
                let is_default = &name == default;
                let mut row = Row::new();
                if is_default {
                    row.add_cell(Cell::new(name.bold().yellow()));
                    row.add_cell(Cell::new("Y").set_alignment(CellAlignment::Center));
                } else {
                    row.add_cell(Cell::new(name));
                    row.add_cell(Cell::new("").set_alignment(CellAlignment::Center));
                }
                row
            })
            .collect();

        Ok(Success::Table { header, rows })
    }
}
