use crate::definition::RawDefinition;
use crate::prelude::*;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, error, info};
use walkdir::WalkDir;

const DEFINITION_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Loads every definition under `root`, grouped by directory.
///
/// Groups are sorted by name and errors within a group by file name.
/// Deprecated definitions are skipped and groups left empty are dropped.
#[tracing::instrument(skip_all, fields(root = %root.display()))]
pub fn load_error_groups(root: &Path) -> DefinitionResult<Vec<ErrorGroup>> {
    info!("A definitions loading job has begun");

    let mut files_by_group: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.inspect_err(|error| {
            error!(error = %error, "Failed to walk the definitions directory");
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if !is_definition_file(path) {
            debug!(path = %path.display(), "Skipping a non YAML file");
            continue;
        }

        files_by_group
            .entry(group_name(root, path))
            .or_default()
            .push(path.to_path_buf());
    }

    let mut groups = Vec::with_capacity(files_by_group.len());

    for (name, mut paths) in files_by_group {
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        let mut errors = Vec::with_capacity(paths.len());
        for path in &paths {
            if let Some(definition) = load_error_definition(path)? {
                errors.push(definition);
            }
        }

        if errors.is_empty() {
            debug!(group = %name, "Dropping a group without active definitions");
            continue;
        }

        groups.push(ErrorGroup { name, errors });
    }

    info!(groups = groups.len(), "Definitions loaded");

    Ok(groups)
}

/// Loads a single definition file, named after its file stem.
pub fn load_error_definition(path: &Path) -> DefinitionResult<Option<ErrorDefinition>> {
    let contents = std::fs::read_to_string(path).map_err(|source| {
        error!(path = %path.display(), error = %source, "Failed to read the definition");
        DefinitionError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let raw: RawDefinition = serde_yaml::from_str(&contents).map_err(|source| {
        error!(path = %path.display(), error = %source, "Failed to parse the definition");
        DefinitionError::Yaml {
            origin: path.display().to_string(),
            source,
        }
    })?;

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    ErrorDefinition::from_raw(&name, raw)
}

fn is_definition_file(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| DEFINITION_EXTENSIONS.contains(&extension))
}

/// Directory of `path` relative to `root`, `/`-separated, or `.` for `root`.
fn group_name(root: &Path, path: &Path) -> String {
    let relative = path
        .parent()
        .and_then(|parent| parent.strip_prefix(root).ok())
        .unwrap_or_else(|| Path::new(""));

    let components: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if components.is_empty() {
        ".".to_string()
    } else {
        components.join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn definition(id: &str) -> String {
        format!("id: {id}\ndescription: \"{id} happened.\"\nhttp_code: 400\n")
    }

    fn create_definitions_tree(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = tempfile::Builder::new()
            .prefix("errgen-definitions")
            .tempdir()
            .unwrap();

        for (relative_path, contents) in files {
            let path = temp_dir.path().join(relative_path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, contents).unwrap();
        }

        temp_dir
    }

    #[test]
    fn test_groups_are_sorted_by_directory() {
        let temp_dir = create_definitions_tree(&[
            ("posix/posix.yaml", definition("posix").as_str()),
            ("general/not_found.yaml", definition("notFound").as_str()),
            ("general/bad_message.yml", definition("badMessage").as_str()),
            ("atm/nested/task.yaml", definition("task").as_str()),
        ]);

        let groups = load_error_groups(temp_dir.path()).unwrap();

        let names: Vec<_> = groups.iter().map(|group| group.name.as_str()).collect();
        assert_eq!(names, vec!["atm/nested", "general", "posix"]);

        let general: Vec<_> = groups[1]
            .errors
            .iter()
            .map(|error| error.name.as_str())
            .collect();
        assert_eq!(general, vec!["bad_message", "not_found"]);
    }

    #[test]
    fn test_root_level_definitions_use_dot_group() {
        let temp_dir = create_definitions_tree(&[(
            "unauthorized.yaml",
            definition("unauthorized").as_str(),
        )]);

        let groups = load_error_groups(temp_dir.path()).unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, ".");
        assert_eq!(groups[0].errors[0].type_name, "od_error_unauthorized");
    }

    #[test]
    fn test_non_yaml_and_deprecated_files_are_skipped() {
        let deprecated = format!("{}deprecated: true\n", definition("old"));
        let temp_dir = create_definitions_tree(&[
            ("general/README.md", "# Errors"),
            ("general/not_found.yaml", definition("notFound").as_str()),
            ("general/old.yaml", deprecated.as_str()),
            ("legacy/old.yaml", deprecated.as_str()),
        ]);

        let groups = load_error_groups(temp_dir.path()).unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].errors.len(), 1);
        assert_eq!(groups[0].errors[0].id, "notFound");
    }

    #[test]
    fn test_invalid_errno_aborts_loading() {
        let invalid = format!("{}errno: ENOPE\n", definition("nope"));
        let temp_dir = create_definitions_tree(&[("general/nope.yaml", invalid.as_str())]);

        let result = load_error_groups(temp_dir.path());

        assert!(matches!(result, Err(DefinitionError::InvalidErrno { .. })));
    }

    #[test]
    fn test_malformed_yaml() {
        let temp_dir = create_definitions_tree(&[("general/broken.yaml", "id: [unclosed")]);

        let result = load_error_groups(temp_dir.path());

        assert!(matches!(result, Err(DefinitionError::Yaml { .. })));
    }
}
