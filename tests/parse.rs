// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::path::PathBuf;

use cress::{scenario::Keyword, Feature, ParseError, Scenario, Step, Table};

fn eating() -> (PathBuf, Feature) {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/features/eating.feature");
    let feature = Feature::from_file(&path).unwrap();
    (path, feature)
}

#[test]
fn feature_header_and_description() {
    let (path, feature) = eating();

    assert_eq!(feature.name, "Eating apples");
    assert_eq!(
        feature.description(),
        "In order to stay healthy\nAs a hungry person",
    );
    assert_eq!(feature.described_at().file.as_ref(), Some(&path));
    assert_eq!(feature.described_at().line, Some(1));
    assert_eq!(feature.described_at().description_at, [2, 3]);
}

#[test]
fn outline_expands_row_major() {
    let (_, feature) = eating();
    let outline = &feature.scenarios()[0];

    assert_eq!(outline.keyword(), Keyword::Outline);
    assert_eq!(outline.keys(), ["start", "eat", "left"]);
    assert_eq!(
        outline
            .solved_steps()
            .iter()
            .map(|s| s.sentence.as_str())
            .collect::<Vec<_>>(),
        [
            "Given I have 12 apples",
            "When I eat 5 apples",
            "Then I have 7 apples left",
            "Given I have 20 apples",
            "When I eat 5 apples",
            "Then I have 15 apples left",
        ],
    );
    assert_eq!(outline.steps()[0].sentence, "Given I have <start> apples");
}

#[test]
fn step_tables_and_locations() {
    let (path, feature) = eating();
    let basket = &feature.scenarios()[1];

    assert_eq!(basket.keyword(), Keyword::Scenario);
    assert!(basket.outlines().is_empty());

    let step = &basket.steps()[0];
    assert_eq!(step.keys(), ["fruit", "count"]);
    assert_eq!(step.rows()[1]["fruit"], "pear");
    assert_eq!(
        step.described_at().comment(),
        Some(format!("{}:16", path.display())),
    );
    assert_eq!(basket.described_at().line, Some(15));
    assert_eq!(basket.steps()[1].described_at().line, Some(20));
}

#[test]
fn outline_tables_are_inherited_verbatim() {
    let scenario = Scenario::from_string(
        "Scenario Outline: tables
         Given rows for <who>
           | name  |
           | <who> |
         Examples:
           | who |
           | Ann |",
    )
    .unwrap();

    let solved = &scenario.solved_steps()[0];
    assert_eq!(solved.sentence, "Given rows for Ann");
    assert_eq!(solved.rows()[0]["name"], "<who>");
    assert_eq!(solved.table_lines(), scenario.steps()[0].table_lines());
}

#[test]
fn orphan_table_is_rejected() {
    let err = Feature::from_string(
        "Feature: broken\n  Scenario: oops\n    | a | b |\n    Given x",
    )
    .unwrap_err();

    assert!(matches!(err, ParseError::OrphanTable { line: 3, .. }), "{err}");
}

#[test]
fn table_and_step_from_text() {
    let table = Table::parse(["a|b", "1|2", "3|4"]);
    assert_eq!(table.keys(), ["a", "b"]);
    assert_eq!(table.rows()[0]["b"], "2");
    assert_eq!(table.rows()[1]["a"], "3");

    let step = Step::from_string("Then the sum is\n| a | b |\n| 1 | 2 |");
    assert_eq!(step.sentence, "Then the sum is");
    assert_eq!(step.table(), &Table::parse(["| a | b |", "| 1 | 2 |"]));
}
