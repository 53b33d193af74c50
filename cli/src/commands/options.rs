//! Options command

use crate::output::OutputFormat;
use rickdex_core::{Species, Status};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Debug, Serialize, Tabled)]
pub struct Choice {
    #[tabled(rename = "Field")]
    pub field: &'static str,
    #[tabled(rename = "Value")]
    pub value: &'static str,
    #[tabled(rename = "Label")]
    pub label: &'static str,
}

pub fn choices() -> Vec<Choice> {
    let species = Species::ALL.into_iter().map(|s| Choice {
        field: "species",
        value: s.as_str(),
        label: s.label(),
    });
    let status = Status::ALL.into_iter().map(|s| Choice {
        field: "status",
        value: s.as_str(),
        label: s.label(),
    });
    species.chain(status).collect()
}

pub fn handle(format: OutputFormat) -> Result<(), String> {
    let choices = choices();
    match format {
        OutputFormat::Table => println!("{}", Table::new(&choices).with(Style::rounded())),
        other => other.print(&choices),
    }
    Ok(())
}
