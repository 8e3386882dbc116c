//! Filesystem-backed note repository.
//!
//! A repository owns a root directory and keeps every note at the canonical
//! path derived from its current metadata. Renaming a title or keyword set
//! relocates the file on the next save; a stale file is never left behind.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::Local;
use log::{debug, info, warn};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::{front_matter, Identifier, Metadata, Note, NoteError, Result};

/// Manages the storage, retrieval and synchronization of notes under a
/// single root directory.
#[derive(Debug)]
pub struct NotesRepository {
    root: PathBuf,
}

impl NotesRepository {
    /// Binds a repository to `root`.
    ///
    /// Fails if `root` exists and is not a directory. A missing root is
    /// fine: year directories are created lazily on save.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if root.exists() && !root.is_dir() {
            return Err(NoteError::NotADirectory {
                path: root.to_path_buf(),
            });
        }

        debug!("Opened notes repository at {}", root.display());
        Ok(NotesRepository {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes `note` at the canonical path derived from its metadata and
    /// returns that repository-relative path.
    ///
    /// If the identifier already has a file stored under a different name
    /// (saved before a title or keyword edit), the note is written at the
    /// new path first and the stale file removed afterwards, so a failed
    /// save never loses the old copy.
    pub fn save(&self, note: &Note) -> Result<PathBuf> {
        let relative_path = note.metadata.relative_path();
        let full_path = self.root.join(&relative_path);
        info!("Saving note {} to {}", note.metadata.id, relative_path.display());

        let year_dir = full_path
            .parent()
            .expect("canonical path always has a year directory");
        if year_dir.is_file() {
            return Err(NoteError::NotADirectory {
                path: year_dir.to_path_buf(),
            });
        }
        if !year_dir.exists() {
            debug!("Creating year directory: {}", year_dir.display());
            fs::create_dir_all(year_dir)?;
        }

        // Write to a temporary file in the same directory, then move it into
        // place, so readers never observe a half-written note.
        let mut temp_file = NamedTempFile::new_in(year_dir)?;
        temp_file.write_all(note.dump().as_bytes())?;
        temp_file.flush()?;
        temp_file
            .persist(&full_path)
            .map_err(|e| NoteError::Io(e.error))?;

        self.remove_stale_files(note, year_dir)?;

        Ok(relative_path)
    }

    /// Removes files in the year directory that belong to this note's
    /// identifier but sit at an outdated path.
    fn remove_stale_files(&self, note: &Note, year_dir: &Path) -> Result<()> {
        let current_name = note.metadata.filename();
        let id_prefix = format!("{}--", note.metadata.id);

        for entry in fs::read_dir(year_dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();

            if name.starts_with(&id_prefix) && name != current_name {
                info!("Removing stale note file: {}", entry.path().display());
                fs::remove_file(entry.path())?;
            }
        }

        Ok(())
    }

    /// Reads the note stored at `relative_path`.
    ///
    /// The identifier comes from the filename; title and keywords come from
    /// the front matter. The `date:` line is not consulted, so an on-disk
    /// edit can never change a note's identity.
    pub fn load(&self, relative_path: &Path) -> Result<Note> {
        if relative_path.is_absolute() {
            return Err(NoteError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "expected a repository-relative path, got {}",
                    relative_path.display()
                ),
            )));
        }

        let full_path = self.root.join(relative_path);
        debug!("Loading note from {}", full_path.display());
        let contents = fs::read_to_string(&full_path)?;

        let file_name = relative_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        let id = Metadata::identifier_from_filename(&file_name)?;
        let extension = relative_path
            .extension()
            .map(|ext| ext.to_string_lossy().to_string())
            .ok_or_else(|| NoteError::InvalidFilename {
                name: file_name.clone(),
            })?;

        let (fields, body) = front_matter::scan_document(&contents)?;
        let title = fields.title.ok_or_else(|| NoteError::InvalidFrontMatter {
            message: format!("{}: missing 'title:' field", full_path.display()),
        })?;

        let metadata = Metadata::new(id, title, fields.keywords, extension);
        Ok(Note::new(body, metadata))
    }

    /// Reloads the note at `relative_path` and saves it again, relocating
    /// the file if its front matter was edited on disk. Returns the new
    /// relative path.
    pub fn update(&self, relative_path: &Path) -> Result<PathBuf> {
        let note = self.load(relative_path)?;
        let new_path = self.save(&note)?;

        if new_path != relative_path {
            info!(
                "Relocated note: {} -> {}",
                relative_path.display(),
                new_path.display()
            );
        }

        Ok(new_path)
    }

    /// Imports a foreign markdown file, assigning it a fresh identifier
    /// derived from the current time. Any `date:` line in the source is
    /// ignored; title and keywords are taken from its front matter. Returns
    /// the relative path the note was saved at.
    pub fn import_from_markdown(&self, source: impl AsRef<Path>) -> Result<PathBuf> {
        let source = source.as_ref();
        info!("Importing markdown file: {}", source.display());
        let contents = fs::read_to_string(source)?;

        let (fields, body) = front_matter::scan_document(&contents)?;
        let title = fields.title.ok_or_else(|| NoteError::InvalidFrontMatter {
            message: format!("{}: missing 'title:' field", source.display()),
        })?;

        let id = Identifier::from_date(Local::now().naive_local());
        let extension = source
            .extension()
            .map(|ext| ext.to_string_lossy().to_string())
            .unwrap_or_else(|| "md".to_string());

        let metadata = Metadata::new(id, title, fields.keywords, extension);
        self.save(&Note::new(body, metadata))
    }

    /// Walks the repository and loads every file whose name follows the
    /// note naming convention, sorted by identifier. Files that fail to
    /// load are skipped with a warning rather than aborting the walk.
    pub fn notes(&self) -> Result<Vec<Note>> {
        let mut notes = Vec::new();

        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            if Metadata::identifier_from_filename(&file_name).is_err() {
                continue;
            }

            let relative_path = path
                .strip_prefix(&self.root)
                .expect("walked path is always below the root");
            match self.load(relative_path) {
                Ok(note) => notes.push(note),
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
        }

        notes.sort_by(|a, b| a.metadata.id.cmp(&b.metadata.id));
        Ok(notes)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn temp_repository() -> (TempDir, NotesRepository) {
        let dir = tempfile::Builder::new()
            .prefix("test-notedown")
            .tempdir()
            .unwrap();
        let repository = NotesRepository::open(dir.path()).unwrap();
        (dir, repository)
    }

    fn make_note(id: &str, title: &str, keywords: &[&str], text: &str) -> Note {
        let id: Identifier = id.parse().unwrap();
        let keywords = keywords.iter().map(|k| k.to_string()).collect();
        Note::new(text, Metadata::new(id, title, keywords, "md"))
    }

    #[test]
    fn test_cannot_open_a_repository_from_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("plain.txt");
        fs::write(&file_path, "not a directory").unwrap();

        let err = NotesRepository::open(&file_path).unwrap_err();
        assert!(matches!(err, NoteError::NotADirectory { .. }));
    }

    #[test]
    fn test_open_tolerates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("not-yet-created");

        NotesRepository::open(&root).unwrap();
    }

    #[test]
    fn test_saving_and_loading() {
        let (_dir, repository) = temp_repository();
        let note = make_note(
            "20220707T142708",
            "This is a title",
            &["k1", "k2"],
            "this is my note\n",
        );

        let relative_path = repository.save(&note).unwrap();
        assert_eq!(
            relative_path.to_string_lossy(),
            "2022/20220707T142708--this-is-a-title__k1_k2.md"
        );

        let loaded = repository.load(&relative_path).unwrap();
        assert_eq!(loaded, note);
    }

    #[test]
    fn test_load_missing_note_is_an_io_error() {
        let (_dir, repository) = temp_repository();

        let err = repository
            .load(Path::new("2022/20220707T142708--gone__k.md"))
            .unwrap_err();
        assert!(matches!(err, NoteError::Io(_)));
    }

    #[test]
    fn test_load_rejects_absolute_paths() {
        let (_dir, repository) = temp_repository();

        let err = repository
            .load(Path::new("/etc/2022/20220707T142708--x__k.md"))
            .unwrap_err();
        assert!(matches!(err, NoteError::Io(_)));
    }

    #[test]
    fn test_update_note_path_when_title_changes() {
        let (dir, repository) = temp_repository();
        let note = make_note("20220707T142708", "old title", &["k1", "k2"], "body\n");
        assert!(note
            .metadata
            .relative_path()
            .to_string_lossy()
            .contains("--old-title"));

        let relative_path = repository.save(&note).unwrap();

        // Edit the stored title directly, as an editor would.
        let full_path = dir.path().join(&relative_path);
        let contents = fs::read_to_string(&full_path).unwrap();
        fs::write(&full_path, contents.replace("old title", "new title")).unwrap();

        let new_path = repository.update(&relative_path).unwrap();

        assert!(new_path.to_string_lossy().contains("--new-title"));
        assert!(!full_path.exists());
        assert!(dir.path().join(&new_path).exists());
    }

    #[test]
    fn test_update_note_path_when_keywords_change() {
        let (dir, repository) = temp_repository();
        let note = make_note("20220707T142708", "title", &["k1", "k2"], "body\n");

        let relative_path = repository.save(&note).unwrap();
        assert!(relative_path.to_string_lossy().contains("__k1_k2"));

        let full_path = dir.path().join(&relative_path);
        let contents = fs::read_to_string(&full_path).unwrap();
        fs::write(&full_path, contents.replace("k1 k2", "tag1 tag2")).unwrap();

        let new_path = repository.update(&relative_path).unwrap();

        assert!(new_path.to_string_lossy().contains("__tag1_tag2"));
        assert!(!full_path.exists());
    }

    #[test]
    fn test_resave_at_same_path_keeps_the_file() {
        let (dir, repository) = temp_repository();
        let note = make_note("20220707T142708", "title", &["k1"], "body\n");

        let relative_path = repository.save(&note).unwrap();
        let again = repository.save(&note).unwrap();

        assert_eq!(relative_path, again);
        assert!(dir.path().join(&relative_path).exists());
    }

    #[test]
    fn test_notes_are_listed_sorted_by_identifier() {
        let (_dir, repository) = temp_repository();
        let second = make_note("20220708T152912", "Second :(", &["two"], "so sad\n");
        let first = make_note("20220707T142708", "First!", &["one"], "so happy\n");

        repository.save(&second).unwrap();
        repository.save(&first).unwrap();

        let notes = repository.notes().unwrap();
        assert_eq!(notes, vec![first, second]);
    }

    #[test]
    fn test_notes_skips_foreign_files() {
        let (dir, repository) = temp_repository();
        let note = make_note("20220707T142708", "title", &["k1"], "body\n");
        repository.save(&note).unwrap();
        fs::write(dir.path().join("README.md"), "not a note").unwrap();

        let notes = repository.notes().unwrap();
        assert_eq!(notes.len(), 1);
    }

    #[test]
    fn test_markdown_import_regenerates_the_date() {
        let (dir, repository) = temp_repository();
        let source = dir.path().join("foo.md");
        let contents = "---\n\
                        title: This is a title\n\
                        date: 1999-01-01 00:00:00\n\
                        keywords: k1 k2\n\
                        ---\n\
                        this is my note\n";
        fs::write(&source, contents).unwrap();

        let saved_path = repository.import_from_markdown(&source).unwrap();

        let imported = fs::read_to_string(dir.path().join(&saved_path)).unwrap();
        let without_date = |text: &str| {
            text.lines()
                .filter(|line| !line.starts_with("date:"))
                .map(str::to_string)
                .collect::<Vec<_>>()
        };
        assert_eq!(without_date(&imported), without_date(contents));
        // The identifier is freshly generated, not 1999.
        assert!(!saved_path.to_string_lossy().starts_with("1999"));
    }

    #[test]
    fn test_import_tolerates_unparseable_dates() {
        let (dir, repository) = temp_repository();
        let source = dir.path().join("foo.md");
        fs::write(&source, "---\ntitle: ok\ndate: whenever\n---\nbody\n").unwrap();

        let saved_path = repository.import_from_markdown(&source).unwrap();
        assert!(saved_path.to_string_lossy().contains("--ok__"));
    }

    #[test]
    fn test_import_requires_a_title() {
        let (dir, repository) = temp_repository();
        let source = dir.path().join("foo.md");
        fs::write(&source, "---\ndate: 2022-07-07 14:27:08\n---\nbody\n").unwrap();

        let err = repository.import_from_markdown(&source).unwrap_err();
        assert!(err.is_format_error());
    }
}
