//! Output formatting

use clap::ValueEnum;
use colored::Colorize;
use rickdex_core::{Character, FieldErrors};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

/// One result card: everything the screen shows for a character.
#[derive(Tabled)]
pub struct CharacterCard<'a> {
    #[tabled(rename = "Name")]
    name: &'a str,
    #[tabled(rename = "Status")]
    status: &'a str,
    #[tabled(rename = "Species")]
    species: &'a str,
    #[tabled(rename = "Episodes")]
    episodes: usize,
    #[tabled(rename = "Image")]
    image: &'a str,
}

impl<'a> From<&'a Character> for CharacterCard<'a> {
    fn from(c: &'a Character) -> Self {
        Self {
            name: &c.name,
            status: &c.status,
            species: &c.species,
            episodes: c.episode_count(),
            image: &c.image,
        }
    }
}

impl OutputFormat {
    pub fn render<T: Serialize>(&self, data: &T) -> String {
        match self {
            OutputFormat::Json | OutputFormat::Table => {
                serde_json::to_string_pretty(data).unwrap_or_default()
            }
            OutputFormat::Yaml => serde_yaml::to_string(data).unwrap_or_default(),
        }
    }

    pub fn print<T: Serialize>(&self, data: &T) {
        println!("{}", self.render(data));
    }

    pub fn render_cards(&self, characters: &[Character]) -> String {
        match self {
            OutputFormat::Table => Table::new(characters.iter().map(CharacterCard::from))
                .with(Style::rounded())
                .to_string(),
            other => other.render(&characters),
        }
    }
}

/// Inline field errors, one per line.
pub fn render_field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{}: {}", field.to_string().bold(), message.red()))
        .collect::<Vec<_>>()
        .join("\n")
}
