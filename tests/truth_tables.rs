use truthtable::driver::{self, Mode, Options};
use truthtable::normalize::normalize;
use truthtable::parse::{Parser, ParseError};
use truthtable::table::DEFAULT_MAX_VARIABLES;
use truthtable::{Formula, TruthTable};

fn table_of(input: &str) -> Vec<(Vec<bool>, bool)> {
    let normalized = normalize(input);
    let formula = Parser::new(Some("test"), &normalized)
        .parse()
        .unwrap_or_else(|e| panic!("`{input}` failed to parse: {e:?}"));
    let table = TruthTable::build(&formula, DEFAULT_MAX_VARIABLES)
        .unwrap_or_else(|e| panic!("`{input}` failed to evaluate: {e:?}"));
    table
        .rows
        .into_iter()
        .map(|row| (row.values, row.result))
        .collect()
}

fn results_of(input: &str) -> Vec<bool> {
    table_of(input).into_iter().map(|(_, result)| result).collect()
}

const F: bool = false;
const T: bool = true;

#[test]
fn conjunction_table() {
    assert_eq!(
        table_of("A and B"),
        vec![
            (vec![F, F], F),
            (vec![F, T], F),
            (vec![T, F], F),
            (vec![T, T], T),
        ]
    );
}

#[test]
fn negation_table() {
    assert_eq!(table_of("not A"), vec![(vec![F], T), (vec![T], F)]);
}

#[test]
fn implication_table() {
    assert_eq!(
        table_of("A imply B"),
        vec![
            (vec![F, F], T),
            (vec![F, T], T),
            (vec![T, F], F),
            (vec![T, T], T),
        ]
    );
    assert_eq!(results_of("A implies B"), results_of("A→B"));
}

#[test]
fn matches_direct_boolean_algebra() {
    let cases: &[(&str, fn(bool, bool, bool) -> bool)] = &[
        ("A or B and C", |a, b, c| a || (b && c)),
        ("(A or B) and C", |a, b, c| (a || b) && c),
        ("not A and B xor C", |a, b, c| (!a && b) != c),
        ("A equals B implies C", |a, b, c| a == (!b || c)),
        ("A notequals not (B or C)", |a, b, c| a != !(b || c)),
        ("((A)) and ((B)) or not C", |a, b, c| (a && b) || !c),
        ("A imply B imply C", |a, b, c| !a || (!b || c)),
    ];

    for (input, reference) in cases {
        let expected: Vec<bool> = (0..8u8)
            .map(|row| reference(row & 4 != 0, row & 2 != 0, row & 1 != 0))
            .collect();
        assert_eq!(results_of(input), expected, "{input}");
    }
}

#[test]
fn constants_and_repeated_variables() {
    assert_eq!(results_of("A or not A"), vec![T, T]);
    assert_eq!(results_of("A and A"), vec![F, T]);
    assert_eq!(results_of("true xor false"), vec![T]);
}

#[test]
fn quoted_names_are_single_variables() {
    let normalized = normalize("`is raining` implies `wet street`");
    let formula = truthtable::parse(&normalized).unwrap();
    assert_eq!(formula.free_variables(), vec!["`is raining`", "`wet street`"]);
}

#[test]
fn stripping_groups_does_not_change_the_tree() {
    let wrapped = truthtable::parse("(((A∧B)))").unwrap();
    let bare = truthtable::parse("A∧B").unwrap();
    assert_eq!(wrapped, bare);
    assert!(matches!(wrapped, Formula::Binary(..)));
}

#[test]
fn thousands_of_parentheses_do_not_crash() {
    let deep = format!("{}A{}", "(".repeat(20_000), ")".repeat(20_000));
    assert!(matches!(
        Parser::new(None, &deep).with_max_depth(200).parse(),
        Err(ParseError::NestingTooDeep { .. })
    ));

    let negations = format!("{}A", "¬".repeat(20_000));
    assert!(matches!(
        Parser::new(None, &negations).with_max_depth(200).parse(),
        Err(ParseError::NestingTooDeep { .. })
    ));
}

#[test]
fn long_chains_without_parentheses_are_fine() {
    let input = (0..300)
        .map(|i| format!("A{}", i % 4))
        .collect::<Vec<_>>()
        .join(" or ");
    assert_eq!(results_of(&input).len(), 16);
    assert!(results_of(&input)[1..].iter().all(|&result| result));
}

#[test]
fn driver_reports_and_continues() {
    let input = "A and B\nA and\nnot A\n";
    let options = Options {
        mode: Mode::Table,
        color: false,
        ..Options::default()
    };
    let mut out = Vec::new();
    let mut err = Vec::new();
    let summary = driver::run(input.as_bytes(), &mut out, &mut err, &options).unwrap();

    assert_eq!(summary.processed, 3);
    assert_eq!(summary.failed, 1);

    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("| A | B | A ∧ B |"));
    assert!(out.contains("| A | ¬ A |"));
    assert!(String::from_utf8(err).unwrap().contains("[line 2]"));
}
