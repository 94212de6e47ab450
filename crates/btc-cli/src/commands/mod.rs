//! CLI Commands

mod derive;
mod generate;

pub use derive::DeriveCommand;
pub use generate::GenerateCommand;
