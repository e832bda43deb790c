use launchdeck::classify::{
    classify, scan, scan_roots, CandidateCatalog, ClassificationResult, Classifier, GameKind,
    ProjectKind,
};
use launchdeck::config::{ClassifySettings, ScanSettings};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, "").expect("touch");
}

fn kind_of(dir: &Path) -> Option<ProjectKind> {
    classify(dir, &ClassifySettings::default()).kind()
}

#[test]
fn descriptor_outranks_loose_python_entry() {
    let dir = tempdir().expect("tempdir");
    touch(&dir.path().join("pom.xml"));
    touch(&dir.path().join("main.py"));
    assert_eq!(
        classify(dir.path(), &ClassifySettings::default()),
        ClassificationResult::Project {
            kind: ProjectKind::Maven,
            root: dir.path().to_path_buf(),
        }
    );
}

#[test]
fn each_manifest_maps_to_its_kind() {
    let cases = [
        ("build.gradle", ProjectKind::Gradle),
        ("build.gradle.kts", ProjectKind::Gradle),
        ("package.json", ProjectKind::Node),
        ("requirements.txt", ProjectKind::Python),
        ("manage.py", ProjectKind::Python),
        ("Cargo.toml", ProjectKind::Rust),
        ("go.mod", ProjectKind::Go),
        ("makefile", ProjectKind::Make),
    ];
    for (file, expected) in cases {
        let dir = tempdir().expect("tempdir");
        touch(&dir.path().join(file));
        assert_eq!(kind_of(dir.path()), Some(expected), "{file}");
    }
}

#[test]
fn node_outranks_python_and_rust() {
    let dir = tempdir().expect("tempdir");
    touch(&dir.path().join("Cargo.toml"));
    touch(&dir.path().join("app.py"));
    touch(&dir.path().join("package.json"));
    assert_eq!(kind_of(dir.path()), Some(ProjectKind::Node));
}

#[test]
fn loose_java_sources_are_detected_at_configured_depths() {
    let dir = tempdir().expect("tempdir");
    touch(&dir.path().join("src/main/java/com/example/app/Main.java"));
    assert_eq!(kind_of(dir.path()), Some(ProjectKind::JavaSource));

    let shallow = tempdir().expect("tempdir");
    touch(&shallow.path().join("Hello.JAVA"));
    assert_eq!(kind_of(shallow.path()), Some(ProjectKind::JavaSource));
}

#[test]
fn custom_source_roots_change_detection() {
    let dir = tempdir().expect("tempdir");
    touch(&dir.path().join("lib/a/Main.java"));
    assert_eq!(kind_of(dir.path()), None);

    let mut settings = ClassifySettings::default();
    settings
        .source_roots
        .push(launchdeck::config::SourceRootRule::new("lib", 2));
    assert_eq!(
        classify(dir.path(), &settings).kind(),
        Some(ProjectKind::JavaSource)
    );
}

#[test]
fn nested_source_directory_is_reported_as_root() {
    let dir = tempdir().expect("tempdir");
    touch(&dir.path().join("src/package.json"));
    let result = classify(dir.path(), &ClassifySettings::default());
    assert_eq!(result.kind(), Some(ProjectKind::Node));
    assert_eq!(result.root(), Some(dir.path().join("src").as_path()));
}

#[test]
fn empty_or_unrelated_directory_is_no_match() {
    let dir = tempdir().expect("tempdir");
    touch(&dir.path().join("README.md"));
    assert!(!classify(dir.path(), &ClassifySettings::default()).is_match());
}

#[test]
fn selected_subdirectory_is_tried_after_current() {
    let dir = tempdir().expect("tempdir");
    let child = dir.path().join("service");
    touch(&child.join("go.mod"));

    let classifier = Classifier::new(&ClassifySettings::default());
    assert_eq!(
        classifier.resolve_project(dir.path(), Some(&child)).kind(),
        Some(ProjectKind::Go)
    );
    assert!(!classifier.resolve_project(dir.path(), None).is_match());

    touch(&dir.path().join("Makefile"));
    assert_eq!(
        classifier.resolve_project(dir.path(), Some(&child)).kind(),
        Some(ProjectKind::Make)
    );
}

fn seed_games(root: &Path) {
    touch(&root.join("tetris.jar"));
    touch(&root.join("notes.txt"));
    touch(&root.join("arcade/launcher"));
    touch(&root.join("web/pong.html"));
    touch(&root.join("chess/pom.xml"));
    touch(&root.join("chess/src/Board.java"));
    touch(&root.join("tools/cleanup.sh"));
    touch(&root.join("a/b/c/d/deep_game.py"));
}

#[test]
fn scan_finds_files_and_project_directories() {
    let dir = tempdir().expect("tempdir");
    seed_games(dir.path());

    let found = scan(
        dir.path(),
        &ScanSettings::default(),
        &ClassifySettings::default(),
    );
    let names: Vec<(&str, GameKind)> = found.iter().map(|g| (g.name.as_str(), g.kind)).collect();

    assert!(names.contains(&("Tetris", GameKind::JavaArchive)));
    assert!(names.contains(&("Launcher", GameKind::NativeExecutable)));
    assert!(names.contains(&("Pong", GameKind::WebPage)));
    assert!(names.contains(&("Chess", GameKind::Project(Some(ProjectKind::Maven)))));
    assert!(!names.iter().any(|(name, _)| *name == "Notes"));
    assert!(!names.iter().any(|(name, _)| *name == "Cleanup"));
    assert!(!names.iter().any(|(name, _)| *name == "Deep Game"));
}

#[test]
fn scanning_unchanged_tree_twice_is_identical() {
    let dir = tempdir().expect("tempdir");
    seed_games(dir.path());
    let scan_settings = ScanSettings::default();
    let classify_settings = ClassifySettings::default();

    let first = scan(dir.path(), &scan_settings, &classify_settings);
    let second = scan(dir.path(), &scan_settings, &classify_settings);
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn scan_roots_skip_missing_roots() {
    let dir = tempdir().expect("tempdir");
    touch(&dir.path().join("games/snake.py"));
    let roots = vec![dir.path().join("missing"), dir.path().join("games")];
    let found = scan_roots(
        &roots,
        &ScanSettings::default(),
        &ClassifySettings::default(),
        &[],
    );
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, GameKind::PythonScript);
}

#[test]
fn catalog_verify_reflects_file_removal() {
    let dir = tempdir().expect("tempdir");
    touch(&dir.path().join("snake.py"));
    let found = scan(
        dir.path(),
        &ScanSettings::default(),
        &ClassifySettings::default(),
    );
    let catalog = CandidateCatalog::new();
    let snapshot = catalog.publish(found);
    let path = snapshot.candidates[0].source_path.clone();

    fs::remove_file(&path).expect("remove");
    assert_eq!(
        catalog.verify(&path),
        Some(launchdeck::classify::WorkingState::Broken)
    );
    assert_eq!(snapshot.generation + 1, catalog.snapshot().generation);
}
