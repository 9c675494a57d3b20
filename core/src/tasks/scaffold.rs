//! Project skeleton generation.

use crate::fs::write_if_absent;
use crate::{Error, Result, Workspace};

/// Generate the source package, README, requirements file and pylint
/// resource file. Nothing that already exists is overwritten.
pub fn generate(ws: &Workspace) -> Result<()> {
    let name = ws.project_name();
    let package_dir = ws.path(&name);

    if package_dir.is_dir() {
        tracing::info!("Subdirectory `{name}` already exists");
    } else {
        std::fs::create_dir(&package_dir).map_err(|source| Error::io(&package_dir, source))?;
        tracing::info!("Create successfully subdirectory `{name}`");
    }

    write_if_absent(&package_dir.join("__init__.py"), "", "__init__.py")?;

    let readme = format!("# {}\n\n## Reference", title_case(&name.replace('_', " ")));
    write_if_absent(&ws.path(&ws.config.readme), &readme, "README")?;

    write_if_absent(
        &ws.path(&ws.config.requirements),
        &ws.config.packages.join("\n"),
        "pip requirements",
    )?;

    let pylintrc = format!(
        "[MAIN]\ninit-hook='import sys; sys.path.append(\"{}\")'",
        package_dir.display()
    );
    write_if_absent(
        &ws.path(&ws.config.pylintrc),
        &pylintrc,
        "pylint resource control",
    )?;

    Ok(())
}

/// Upper-case the first letter of every word, lower-case the rest. A word
/// starts after any non-alphabetic character.
pub(crate) fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
        at_word_start = !ch.is_alphabetic();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;
    use std::fs;

    fn scratch_project(name: &str) -> (tempfile::TempDir, Workspace) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join(name);
        fs::create_dir(&root).unwrap();
        let ws = Workspace::new(root, Config::default());
        (dir, ws)
    }

    #[test]
    fn title_case_matches_word_boundaries() {
        assert_eq!(title_case("my project"), "My Project");
        assert_eq!(title_case("HTTP client2go"), "Http Client2Go");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn generates_skeleton() {
        let (_dir, ws) = scratch_project("my_project");
        generate(&ws).unwrap();

        let init = ws.root.join("my_project").join("__init__.py");
        assert_eq!(fs::read_to_string(init).unwrap(), "");

        let readme = fs::read_to_string(ws.root.join("README.md")).unwrap();
        assert!(readme.starts_with("# My Project\n"), "{readme}");
        assert_eq!(readme, "# My Project\n\n## Reference\n");

        let requirements = fs::read_to_string(ws.root.join("requirements.txt")).unwrap();
        let packages: Vec<&str> = requirements.lines().collect();
        assert_eq!(packages, ws.config.packages);

        let pylintrc = fs::read_to_string(ws.root.join(".pylintrc")).unwrap();
        assert!(pylintrc.starts_with("[MAIN]\ninit-hook='import sys; sys.path.append(\""));
        assert!(pylintrc.contains("my_project/my_project"), "{pylintrc}");
    }

    #[test]
    fn second_run_keeps_user_edits() {
        let (_dir, ws) = scratch_project("demo");
        generate(&ws).unwrap();
        fs::write(ws.root.join("README.md"), "# Edited\n").unwrap();

        generate(&ws).unwrap();
        assert_eq!(fs::read_to_string(ws.root.join("README.md")).unwrap(), "# Edited\n");
    }
}
