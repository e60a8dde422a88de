#![allow(dead_code)]

use vc_check::{ContractReport, Finding, FindingKind, Rule};
use vc_core::SampleSet;
use vc_fixtures::{Color, ColorPoint, Decimal, Figure, Person, Student, TaggedPoint, Text};

pub fn decimals(literals: &[&str]) -> SampleSet<Decimal> {
    literals
        .iter()
        .enumerate()
        .fold(SampleSet::new(), |set, (group, literal)| {
            set.with(literal.parse().unwrap(), group as u32)
        })
}

pub fn one_way_text() -> SampleSet<Text> {
    SampleSet::new()
        .with(Text::folded("Polish"), 0)
        .with(Text::plain("polish"), 0)
}

pub fn bridged_points() -> SampleSet<TaggedPoint> {
    SampleSet::new()
        .with(TaggedPoint::colored(1, 2, Color::Red), 0)
        .with(TaggedPoint::plain(1, 2), 1)
        .with(TaggedPoint::colored(1, 2, Color::Blue), 2)
}

pub fn color_points() -> SampleSet<ColorPoint> {
    SampleSet::new()
        .with(ColorPoint::new(1, 2, Color::Red), 0)
        .with(ColorPoint::new(1, 2, Color::Red), 0)
        .with(ColorPoint::new(1, 2, Color::Blue), 1)
        .with(ColorPoint::new(3, 4, Color::Green), 2)
}

pub fn twin_people() -> SampleSet<Person> {
    SampleSet::new()
        .with(Person::new(1, "Ann"), 0)
        .with(Person::new(1, "Ann"), 0)
        .with(Person::new(2, "Bob"), 1)
}

pub fn spaced_students() -> SampleSet<Student> {
    SampleSet::new()
        .with(Student::new("Alice", 20), 0)
        .with(Student::new(" alice ", 21), 0)
        .with(Student::new("Bob", 20), 1)
}

pub fn signed_zeros() -> SampleSet<Figure> {
    SampleSet::new()
        .with(Figure::Square { side: 0.0 }, 0)
        .with(Figure::Square { side: -0.0 }, 0)
}

pub fn kinds_for(report: &ContractReport, rule: Rule) -> Vec<FindingKind> {
    report
        .for_rule(rule)
        .map(|finding: &Finding| finding.kind.clone())
        .collect()
}
