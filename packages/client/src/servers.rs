//! The persisted server list.

use std::fs;
use std::path::{Path, PathBuf};

use url::Url;
use wfm_http::types::ENTRY_SEPARATOR;
use wfm_http::ServerEntry;

use crate::error::Error;

/// Servers stored one `name///url` line each, sorted by the full line.
///
/// Every mutation re-sorts the list; [`ServerList::save`] writes it back.
#[derive(Debug)]
pub struct ServerList {
    path: PathBuf,
    entries: Vec<ServerEntry>,
}

impl ServerList {
    /// Read the list at `path`. Blank lines are ignored and malformed lines
    /// are skipped with a warning.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        let contents = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;

        let mut entries = Vec::new();
        for (number, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<ServerEntry>() {
                Ok(entry) => entries.push(entry),
                Err(e) => tracing::warn!(file = %path.display(), line = number + 1, error = %e, "skipping server entry"),
            }
        }

        let mut list = Self { path, entries };
        list.sort();
        Ok(list)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[ServerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ServerEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn add(&mut self, entry: ServerEntry) -> Result<(), Error> {
        validate_name(&entry.name)?;
        validate_url(&entry.url)?;
        if self.get(&entry.name).is_some() {
            return Err(Error::DuplicateServer(entry.name));
        }

        self.entries.push(entry);
        self.sort();
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Result<ServerEntry, Error> {
        let index = self.index_of(name)?;
        Ok(self.entries.remove(index))
    }

    /// Rename and/or re-point the server called `name`.
    pub fn edit(
        &mut self,
        name: &str,
        new_name: Option<String>,
        new_url: Option<String>,
    ) -> Result<&ServerEntry, Error> {
        let index = self.index_of(name)?;

        if let Some(new_name) = &new_name {
            validate_name(new_name)?;
            if new_name != name && self.get(new_name).is_some() {
                return Err(Error::DuplicateServer(new_name.clone()));
            }
        }
        if let Some(new_url) = &new_url {
            validate_url(new_url)?;
        }

        let entry = &mut self.entries[index];
        if let Some(new_name) = new_name {
            entry.name = new_name;
        }
        if let Some(new_url) = new_url {
            entry.url = new_url;
        }
        let edited = entry.name.clone();

        self.sort();
        self.get(&edited)
            .ok_or_else(|| Error::UnknownServer(edited.clone()))
    }

    pub fn save(&self) -> Result<(), Error> {
        fs::write(&self.path, self.render()).map_err(|e| Error::io(&self.path, e))
    }

    /// Whether the file on disk already holds exactly the sorted list.
    pub(crate) fn is_sorted_on_disk(&self) -> Result<bool, Error> {
        let contents = fs::read_to_string(&self.path).map_err(|e| Error::io(&self.path, e))?;
        Ok(contents == self.render())
    }

    fn render(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}\n", e.to_line()))
            .collect()
    }

    fn sort(&mut self) {
        self.entries.sort_by_key(ServerEntry::to_line);
    }

    fn index_of(&self, name: &str) -> Result<usize, Error> {
        self.entries
            .iter()
            .position(|e| e.name == name)
            .ok_or_else(|| Error::UnknownServer(name.to_string()))
    }
}

fn validate_name(name: &str) -> Result<(), Error> {
    let reason = if name.trim().is_empty() {
        "name is empty"
    } else if name.contains(ENTRY_SEPARATOR) {
        "name contains ///"
    } else if name.contains(|c: char| c == '\n' || c == '\r') {
        "name contains a line break"
    } else {
        return Ok(());
    };

    Err(Error::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    })
}

/// A stored URL must survive the `name///url` line format and parse as an
/// absolute URL.
fn validate_url(url: &str) -> Result<(), Error> {
    let invalid = |reason: String| Error::InvalidUrl {
        url: url.to_string(),
        reason,
    };

    if url.trim().is_empty() {
        return Err(invalid("URL is empty".to_string()));
    }
    // `Url::parse` silently drops line breaks, so check the raw text.
    if url.contains(|c: char| c == '\n' || c == '\r') {
        return Err(invalid("URL contains a line break".to_string()));
    }
    Url::parse(url).map_err(|e| invalid(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_in(dir: &tempfile::TempDir, contents: &str) -> ServerList {
        let path = dir.path().join("servers");
        fs::write(&path, contents).unwrap();
        ServerList::load(path).unwrap()
    }

    fn names(list: &ServerList) -> Vec<&str> {
        list.entries().iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn load_sorts_and_skips_bad_lines() {
        let dir = tempfile::tempdir().unwrap();
        let list = list_in(
            &dir,
            "work///https://w.test/\n\nbroken line\nhome///http://h.test/\n",
        );

        assert_eq!(names(&list), vec!["home", "work"]);
    }

    #[test]
    fn add_keeps_order_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut list = list_in(&dir, "b///http://b.test/\n");

        list.add(ServerEntry::new("a", "http://a.test/")).unwrap();
        list.add(ServerEntry::new("c", "http://c.test/")).unwrap();
        list.save().unwrap();

        assert_eq!(names(&list), vec!["a", "b", "c"]);
        assert_eq!(
            fs::read_to_string(list.path()).unwrap(),
            "a///http://a.test/\nb///http://b.test/\nc///http://c.test/\n"
        );
    }

    #[test]
    fn add_rejects_duplicates_and_bad_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut list = list_in(&dir, "home///http://h.test/\n");

        let err = list
            .add(ServerEntry::new("home", "http://other.test/"))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateServer(_)));

        let err = list
            .add(ServerEntry::new("a///b", "http://x.test/"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidName { .. }));

        assert!(list.add(ServerEntry::new("  ", "http://x.test/")).is_err());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn add_rejects_empty_url() {
        let dir = tempfile::tempdir().unwrap();
        let mut list = list_in(&dir, "");

        let err = list.add(ServerEntry::new("empty", "")).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
        assert!(list.is_empty());
    }

    #[test]
    fn add_rejects_url_with_line_break() {
        let dir = tempfile::tempdir().unwrap();
        let mut list = list_in(&dir, "");

        let err = list
            .add(ServerEntry::new(
                "inject",
                "http://a.test/\nevil///http://evil.test/",
            ))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
        list.save().unwrap();

        let reloaded = ServerList::load(list.path()).unwrap();
        assert!(reloaded.is_empty());
    }

    #[test]
    fn add_rejects_relative_url() {
        let dir = tempfile::tempdir().unwrap();
        let mut list = list_in(&dir, "");

        let err = list.add(ServerEntry::new("rel", "wfm/index.php")).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
    }

    #[test]
    fn edit_rejects_bad_url_and_keeps_entry() {
        let dir = tempfile::tempdir().unwrap();
        let mut list = list_in(&dir, "a///http://a.test/\n");

        let err = list
            .edit("a", None, Some("http://a.test/\nb///http://b.test/".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));

        let err = list.edit("a", None, Some(String::new())).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
        assert_eq!(list.entries(), &[ServerEntry::new("a", "http://a.test/")]);
    }

    #[test]
    fn remove_unknown_server() {
        let dir = tempfile::tempdir().unwrap();
        let mut list = list_in(&dir, "");

        let err = list.remove("ghost").unwrap_err();
        assert!(matches!(err, Error::UnknownServer(_)));
    }

    #[test]
    fn remove_then_save() {
        let dir = tempfile::tempdir().unwrap();
        let mut list = list_in(&dir, "a///http://a.test/\nb///http://b.test/\n");

        let removed = list.remove("a").unwrap();
        list.save().unwrap();

        assert_eq!(removed.url, "http://a.test/");
        assert_eq!(
            fs::read_to_string(list.path()).unwrap(),
            "b///http://b.test/\n"
        );
    }

    #[test]
    fn edit_renames_and_resorts() {
        let dir = tempfile::tempdir().unwrap();
        let mut list = list_in(&dir, "a///http://a.test/\nb///http://b.test/\n");

        let edited = list
            .edit("a", Some("z".to_string()), Some("http://z.test/".to_string()))
            .unwrap();
        assert_eq!(edited, &ServerEntry::new("z", "http://z.test/"));
        assert_eq!(names(&list), vec!["b", "z"]);
    }

    #[test]
    fn edit_rejects_taken_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut list = list_in(&dir, "a///http://a.test/\nb///http://b.test/\n");

        let err = list.edit("a", Some("b".to_string()), None).unwrap_err();
        assert!(matches!(err, Error::DuplicateServer(_)));
        assert_eq!(list.get("a").map(|e| e.url.as_str()), Some("http://a.test/"));
    }
}
