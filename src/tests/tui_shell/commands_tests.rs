use super::*;

#[test]
fn split_args_groups_quoted_words() {
    assert_eq!(
        split_args(r#"mv "root/My Docs" root/archive"#),
        vec!["mv", "root/My Docs", "root/archive"]
    );
    assert_eq!(split_args("  ask   what is x  "), vec!["ask", "what", "is", "x"]);
    assert_eq!(split_args(r#"mkdir """#), vec!["mkdir", ""]);
    assert!(split_args("   ").is_empty());
}

#[test]
fn resolve_accepts_aliases_and_leading_slash() {
    assert_eq!(resolve("rename"), Some("mv"));
    assert_eq!(resolve("/open"), Some("open"));
    assert_eq!(resolve("?"), Some("help"));
    assert_eq!(resolve("nope"), None);
}

#[test]
fn command_names_are_unique() {
    let defs = command_defs();
    let mut names: Vec<&str> = defs
        .iter()
        .flat_map(|d| std::iter::once(d.name).chain(d.aliases.iter().copied()))
        .collect();
    let total = names.len();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), total);
}
