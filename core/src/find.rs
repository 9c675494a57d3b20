//! Builder for the `find` expression used to discover source files.

/// Include/exclude pattern lists rendered into a single `find` command line.
///
/// Patterns are glob strings handed to `find` verbatim (single-quoted for the
/// shell); nothing here interprets them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindFilter {
    pub include_files: Vec<String>,
    pub exclude_files: Vec<String>,
    pub include_dirs: Vec<String>,
    pub exclude_dirs: Vec<String>,
}

impl FindFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_files<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_files.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn exclude_files<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_files.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn include_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    pub fn exclude_dirs<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_dirs.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Render the command line.
    ///
    /// Include patterns are alternatives (`-o`); exclusions are negated
    /// conjuncts, so an excluded name never survives even if it is also
    /// included. With no patterns at all this is `find -type f`.
    pub fn build(&self) -> String {
        let mut parts = vec!["find".to_string()];

        parts.extend(self.include_dirs.iter().map(|dir| quote(dir)));
        for pattern in &self.exclude_dirs {
            parts.push(format!("! -path {}", quote(pattern)));
        }

        match self.include_files.as_slice() {
            [] => {}
            [single] => parts.push(format!("-name {}", quote(single))),
            many => {
                let names = many
                    .iter()
                    .map(|pattern| format!("-name {}", quote(pattern)))
                    .collect::<Vec<_>>()
                    .join(" -o ");
                parts.push(format!("\\( {names} \\)"));
            }
        }

        for pattern in &self.exclude_files {
            parts.push(format!("! -name {}", quote(pattern)));
        }
        parts.push("-type f".to_string());

        normalize_whitespace(&parts.join(" "))
    }
}

/// Single-quote a word for a POSIX shell.
pub fn quote(word: &str) -> String {
    format!("'{}'", word.replace('\'', r"'\''"))
}

fn normalize_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}
