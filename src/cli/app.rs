//! CLI module for the notedown application
//!
//! This module handles the command-line interface for interacting with the
//! notes repository.

use std::{fs, path::PathBuf, process::Command};

use chrono::Local;
use log::{debug, info};
use shell_words::split;
use tempfile::Builder;

use crate::{Commands, Config, NoteError, NotesRepository, Result};

/// CLI application handler - processes CLI commands and interfaces with the
/// notes repository.
pub struct App {
    repository: NotesRepository,
    config: Config,
}

impl App {
    pub fn new(repository: NotesRepository, config: Config) -> Self {
        Self { repository, config }
    }

    /// Run the CLI application with the given command
    pub fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Create => {
                let relative_path = self.create_note()?;
                println!("{}", relative_path.display());
            }

            Commands::Update { path } => {
                let new_path = self.repository.update(&path)?;
                println!("{}", new_path.display());
            }

            Commands::Import { source } => {
                let relative_path = self.repository.import_from_markdown(&source)?;
                println!("{}", relative_path.display());
            }

            Commands::List { json } => self.list_notes(json)?,
        }

        Ok(())
    }

    /// Spawns the editor on a front-matter template, then files the result
    /// under the repository. Returns the saved relative path.
    fn create_note(&self) -> Result<PathBuf> {
        // The date here is cosmetic - the real identifier is assigned from
        // the clock when the note is imported below.
        let formatted_date = Local::now().format("%Y-%m-%d %H:%M").to_string();
        let template = format!("---\ntitle: \ndate: {formatted_date}\nkeywords: \n---\n");

        let temp_dir = Builder::new().prefix("notedown").tempdir()?;
        let note_path = temp_dir.path().join(format!("note.{}", self.config.extension));
        fs::write(&note_path, template)?;

        self.open_editor(&note_path)?;

        if !note_path.exists() {
            return Err(NoteError::EditorError {
                message: "editor exited successfully but no file was written".to_string(),
            });
        }

        self.repository.import_from_markdown(&note_path)
    }

    fn open_editor(&self, path: &std::path::Path) -> Result<()> {
        let editor_cmd = self.config.get_editor_command();
        debug!("Opening editor: {} {}", editor_cmd, path.display());

        let parts = split(&editor_cmd).map_err(|e| NoteError::EditorError {
            message: format!("Could not parse editor command '{editor_cmd}': {e}"),
        })?;
        let (program, args) = parts.split_first().ok_or_else(|| NoteError::EditorError {
            message: "Editor command is empty".to_string(),
        })?;

        let status = Command::new(program)
            .args(args)
            .arg(path)
            .status()
            .map_err(|e| NoteError::EditorError {
                message: format!("Could not spawn {program}: {e}"),
            })?;

        if !status.success() {
            return Err(NoteError::EditorError {
                message: format!("Editor exited with status {status}"),
            });
        }

        Ok(())
    }

    fn list_notes(&self, json: bool) -> Result<()> {
        let notes = self.repository.notes()?;
        info!("Listing {} notes", notes.len());

        if json {
            let metadata: Vec<_> = notes.iter().map(|note| &note.metadata).collect();
            println!("{}", serde_json::to_string_pretty(&metadata)?);
        } else {
            for note in &notes {
                println!(
                    "{}  {}  [{}]",
                    note.metadata.id,
                    note.metadata.title,
                    note.metadata.keywords.join(", ")
                );
            }
        }

        Ok(())
    }
}
