use std::fs;
use std::path::{Path, PathBuf};

/// Name the launcher needs for `file`: `package.Stem` when the source declares
/// a package on its own line, the bare stem otherwise.
pub fn qualified_name(file: &Path, content: &str) -> String {
    let stem = file
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();
    let package = content.lines().map(str::trim).find_map(|line| {
        line.strip_prefix("package ")
            .and_then(|rest| rest.strip_suffix(';'))
            .map(str::trim)
    });
    match package {
        Some(package) if !package.is_empty() => format!("{package}.{stem}"),
        _ => stem,
    }
}

/// First file, in discovery order, whose text contains `marker`. Unreadable
/// files are skipped.
pub fn find_entry_point(files: &[PathBuf], marker: &str) -> Option<String> {
    files.iter().find_map(|file| {
        let content = fs::read(file).ok()?;
        let content = String::from_utf8_lossy(&content);
        content
            .contains(marker)
            .then(|| qualified_name(file, &content))
    })
}

/// Compiler argv: class path and output directory fixed to the base, then
/// each file relative to the base when it lives under it.
pub fn compile_arguments(base: &Path, files: &[PathBuf]) -> Vec<String> {
    let mut args: Vec<String> = ["-cp", ".", "-d", "."]
        .iter()
        .map(|arg| arg.to_string())
        .collect();
    args.extend(files.iter().map(|file| {
        file.strip_prefix(base)
            .unwrap_or(file)
            .display()
            .to_string()
    }));
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn package_declaration_prefixes_class_name() {
        let content = "// header\npackage com.example.app;\n\npublic class Main {}\n";
        assert_eq!(
            qualified_name(Path::new("/x/Main.java"), content),
            "com.example.app.Main"
        );
        assert_eq!(qualified_name(Path::new("/x/Solo.java"), "class Solo {}"), "Solo");
    }

    #[test]
    fn first_file_with_marker_wins() {
        let dir = tempdir().expect("tempdir");
        let helper = dir.path().join("Helper.java");
        let first = dir.path().join("First.java");
        let second = dir.path().join("Second.java");
        fs::write(&helper, "class Helper {}").expect("write");
        fs::write(&first, "class First { public static void main(String[] a) {} }")
            .expect("write");
        fs::write(&second, "class Second { public static void main(String[] a) {} }")
            .expect("write");

        let files = vec![helper, dir.path().join("Missing.java"), first, second];
        assert_eq!(
            find_entry_point(&files, "public static void main"),
            Some("First".to_string())
        );
        assert_eq!(find_entry_point(&files[..1], "public static void main"), None);
    }

    #[test]
    fn files_outside_base_stay_absolute() {
        let base = Path::new("/p/src");
        let args = compile_arguments(
            base,
            &[PathBuf::from("/p/src/app/Main.java"), PathBuf::from("/p/Tool.java")],
        );
        assert_eq!(
            args,
            vec!["-cp", ".", "-d", ".", "app/Main.java", "/p/Tool.java"]
        );
    }
}
