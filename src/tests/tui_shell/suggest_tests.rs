use super::*;

fn def(name: &'static str, aliases: &'static [&'static str]) -> CommandDef {
    CommandDef {
        name,
        aliases,
        usage: "",
        help: "",
    }
}

#[test]
fn exact_beats_prefix_beats_substring() {
    assert_eq!(score_match("open", "open"), 100);
    assert!(score_match("op", "open") > score_match("pe", "open"));
    assert_eq!(score_match("zz", "open"), 0);
}

#[test]
fn aliases_count_toward_command_score() {
    assert_eq!(score_command("rename", &def("mv", &["rename"])), 100);
    assert_eq!(score_command("x", &def("mv", &["rename"])), 0);
}

#[test]
fn suggestions_sort_by_score_then_name() {
    let mut scored = vec![
        (10, def("beta", &[])),
        (20, def("gamma", &[])),
        (10, def("alpha", &[])),
    ];
    sort_scored_suggestions(&mut scored);
    let names: Vec<&str> = scored.iter().map(|(_, d)| d.name).collect();
    assert_eq!(names, vec!["gamma", "alpha", "beta"]);
}
