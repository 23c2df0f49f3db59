#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    const SRC_DIR: &str = "src";
    const UNIT_DIR: &str = "tests/unit";

    // Crate roots and module files carry no logic of their own
    fn is_module_glue(relative_path: &str) -> bool {
        relative_path == "main.rs" || relative_path == "lib.rs" || relative_path.ends_with("mod.rs")
    }

    #[test]
    fn test_every_source_file_has_a_unit_test_file() {
        let src_paths = collect_relative_paths(Path::new(SRC_DIR)).unwrap_or_default();
        let test_paths = collect_relative_paths(Path::new(UNIT_DIR)).unwrap_or_default();
        assert!(!src_paths.is_empty(), "No sources found under {SRC_DIR}");

        let mut missing: Vec<_> = src_paths
            .iter()
            .filter(|path| !is_module_glue(path) && !test_paths.contains(*path))
            .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
            .collect();
        missing.sort();

        assert!(
            missing.is_empty(),
            "Source files without unit test counterparts:\n{}",
            missing.join("\n")
        );
    }

    #[test]
    fn test_every_unit_test_file_has_a_source_file() {
        let src_paths = collect_relative_paths(Path::new(SRC_DIR)).unwrap_or_default();
        let test_paths = collect_relative_paths(Path::new(UNIT_DIR)).unwrap_or_default();

        let mut orphaned: Vec<_> = test_paths
            .iter()
            .filter(|path| !is_module_glue(path) && !src_paths.contains(*path))
            .map(|path| format!("  - tests/unit/{path} (no src/{path})"))
            .collect();
        orphaned.sort();

        assert!(
            orphaned.is_empty(),
            "Unit test files without source counterparts:\n{}",
            orphaned.join("\n")
        );
    }

    // A unit test file that no mod.rs declares is silently never compiled
    #[test]
    fn test_every_unit_test_file_is_declared() {
        let test_paths = collect_relative_paths(Path::new(UNIT_DIR)).unwrap_or_default();
        let mut undeclared = Vec::new();

        for path in test_paths.iter().filter(|path| path.ends_with(".rs")) {
            let relative = Path::new(path);
            let Some(stem) = relative.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if stem == "main" || stem == "mod" {
                continue;
            }
            let parent = relative.parent().unwrap_or_else(|| Path::new(""));
            let declaring_file = if parent.as_os_str().is_empty() {
                Path::new(UNIT_DIR).join("main.rs")
            } else {
                Path::new(UNIT_DIR).join(parent).join("mod.rs")
            };
            let declared = fs::read_to_string(&declaring_file)
                .is_ok_and(|content| content.lines().any(|line| line.trim() == format!("mod {stem};")));
            if !declared {
                undeclared.push(format!("  - tests/unit/{path} (add `mod {stem};` to {})", declaring_file.display()));
            }
        }
        undeclared.sort();

        assert!(
            undeclared.is_empty(),
            "Unit test files not reachable from tests/unit/main.rs:\n{}",
            undeclared.join("\n")
        );
    }

    #[test]
    fn test_all_test_files_contain_tests() {
        let mut files_without_tests = Vec::new();
        let result = check_test_files(Path::new("tests"), &mut files_without_tests);
        assert!(result.is_ok(), "Failed to scan tests directory: {result:?}");

        assert!(
            files_without_tests.is_empty(),
            "The following test files don't contain any #[test] functions:\n{}",
            files_without_tests.join("\n")
        );
    }

    fn collect_relative_paths(base: &Path) -> Result<HashSet<String>, io::Error> {
        let mut paths = HashSet::new();
        collect_into(base, base, &mut paths)?;
        Ok(paths)
    }

    fn collect_into(dir: &Path, base: &Path, paths: &mut HashSet<String>) -> Result<(), io::Error> {
        if !dir.is_dir() {
            return Ok(());
        }
        for entry_result in fs::read_dir(dir)? {
            let path = entry_result?.path();
            let relative_path = path
                .strip_prefix(base)
                .map_err(|_prefix_error| io::Error::other("Failed to strip prefix"))?
                .to_string_lossy()
                .to_string();

            if path.is_dir() {
                paths.insert(relative_path);
                collect_into(&path, base, paths)?;
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                paths.insert(relative_path);
            }
        }
        Ok(())
    }

    fn check_test_files(dir: &Path, files_without_tests: &mut Vec<String>) -> Result<(), io::Error> {
        for entry_result in fs::read_dir(dir)? {
            let path = entry_result?.path();

            if path.is_dir() {
                check_test_files(&path, files_without_tests)?;
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
                continue;
            }

            // Test target roots and module files only declare modules
            let file_name = path.file_name().and_then(|name| name.to_str());
            if matches!(file_name, Some("main.rs" | "mod.rs")) {
                continue;
            }

            let content = fs::read_to_string(&path)?;
            if !content.contains("#[test]") {
                files_without_tests.push(format!("  - {}", path.display()));
            }
        }
        Ok(())
    }
}
