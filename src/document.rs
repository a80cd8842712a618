//! The output document: an append-only HTML file built from a head fragment,
//! one fragment per problem, and a foot fragment.
//!
//! Fragments are separated by CRLF and the file is flushed after every write,
//! so a crashed run leaves a readable prefix (head plus the fragments written
//! so far) for a resumed run to extend.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use askama::Template;

use crate::{Difficulty, ProblemDetail};

/// Relative links in problem bodies resolve against this.
const BASE_HREF: &str = "https://leetcode.com";

const LINE_ENDING: &str = "\r\n";

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("render error: {0}")]
    Render(#[from] askama::Error),
}

#[derive(Template)]
#[template(path = "head.html")]
struct HeadFragment<'a> {
    base_href: &'a str,
}

#[derive(Template)]
#[template(path = "problem.html")]
struct ProblemFragment<'a> {
    title: &'a str,
    difficulty: Difficulty,
    content: &'a str,
}

#[derive(Template)]
#[template(path = "foot.html")]
struct FootFragment;

pub struct Document {
    file: File,
    path: PathBuf,
}

impl Document {
    /// Start a brand-new document: truncate whatever is at `path` and write
    /// the head fragment.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, DocumentError> {
        let path = path.into();
        let file = File::create(&path)?;
        let mut doc = Self { file, path };
        let head = HeadFragment {
            base_href: BASE_HREF,
        }
        .render()?;
        doc.write_fragment(&head)?;
        Ok(doc)
    }

    /// Reopen a partial document for append. No head is written; the crashed
    /// run already wrote one.
    pub fn open_append(path: impl Into<PathBuf>) -> Result<Self, DocumentError> {
        let path = path.into();
        let file = OpenOptions::new().append(true).create(true).open(&path)?;
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render one problem and append it.
    pub fn append(&mut self, detail: &ProblemDetail) -> Result<(), DocumentError> {
        let fragment = ProblemFragment {
            title: &detail.title,
            difficulty: detail.difficulty,
            content: &detail.content,
        }
        .render()?;
        self.write_fragment(&fragment)?;
        Ok(())
    }

    /// Close out a fully written document with the foot fragment.
    pub fn finish(mut self) -> Result<(), DocumentError> {
        let foot = FootFragment.render()?;
        self.write_fragment(&foot)?;
        Ok(())
    }

    fn write_fragment(&mut self, html: &str) -> io::Result<()> {
        self.file.write_all(html.as_bytes())?;
        self.file.write_all(LINE_ENDING.as_bytes())?;
        self.file.flush()
    }
}
