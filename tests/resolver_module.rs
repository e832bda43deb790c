use launchdeck::classify::ProjectKind;
use launchdeck::resolver::{commands_for, CommandOption, ResolverError, Selection};

#[test]
fn maven_menu_lists_commands_in_order() {
    let menu = commands_for(Some(ProjectKind::Maven));
    assert_eq!(
        menu.labels(),
        vec![
            "mvn spring-boot:run",
            "mvn exec:java",
            "mvn compile exec:java",
            "Custom command...",
            "Cancel",
        ]
    );
}

#[test]
fn java_source_menu_offers_pipeline_actions() {
    let menu = commands_for(Some(ProjectKind::JavaSource));
    assert_eq!(
        menu.select(0, || None).expect("select"),
        Selection::BuildPipeline {
            run_after_build: true
        }
    );
    assert_eq!(
        menu.select(1, || None).expect("select"),
        Selection::BuildPipeline {
            run_after_build: false
        }
    );
    assert!(matches!(
        menu.options[0],
        CommandOption::BuildPipeline {
            label: "Compile & Run Main",
            ..
        }
    ));
}

#[test]
fn custom_entry_uses_prompt_text() {
    let menu = commands_for(Some(ProjectKind::Node));
    let custom = menu.options.len() - 2;
    assert_eq!(
        menu.select(custom, || Some("  npm test -- --watch ".to_string()))
            .expect("select"),
        Selection::Shell("npm test -- --watch".to_string())
    );
}

#[test]
fn blank_or_missing_custom_text_cancels() {
    let menu = commands_for(None);
    assert_eq!(
        menu.select(0, || Some("   ".to_string())).expect("select"),
        Selection::Cancelled
    );
    assert_eq!(menu.select(0, || None).expect("select"), Selection::Cancelled);
    assert_eq!(menu.select(1, || None).expect("select"), Selection::Cancelled);
}

#[test]
fn out_of_range_index_is_rejected() {
    let menu = commands_for(Some(ProjectKind::Make));
    assert_eq!(
        menu.select(9, || None),
        Err(ResolverError::IndexOutOfRange { index: 9, len: 4 })
    );
}
