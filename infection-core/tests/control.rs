use infection_core::{partition, Algorithm, InfectionControl, SelectionConfig, SelectionError, Tagger};
use std::{cell::Cell, collections::HashMap};

fn links(edges: &[(usize, usize)]) -> impl Fn(&usize) -> Vec<usize> {
    let mut adjacency: HashMap<usize, Vec<usize>> = HashMap::new();
    for &(a, b) in edges {
        adjacency.entry(a).or_default().push(b);
    }
    move |entity| adjacency.get(entity).cloned().unwrap_or_default()
}

#[test]
fn test_get_infector_is_idempotent() {
    let mut control = InfectionControl::<usize>::new();
    let first = control.get_infector("super-learning");
    let second = control.get_infector("super-learning");
    assert_eq!(first, second);
    assert_eq!(first.name(), "super-learning");
    control.get_infector("other");
    assert_eq!(control.infectors().count(), 2);
}

#[test]
fn test_total_infection_marks_group() {
    let mut control = InfectionControl::new();
    let feature = control.get_infector("test");
    let plan = feature
        .total_infection(&mut control, &[0, 1, 2], links(&[(0, 1)]), &0)
        .unwrap();
    assert_eq!(plan.len(), 2);
    assert!(feature.is_infected(&control, &0));
    assert!(feature.is_infected(&control, &1));
    assert!(!feature.is_infected(&control, &2));
}

#[test]
fn test_only_current_feature_infecting() {
    let mut control = InfectionControl::new();
    let feature = control.get_infector("test");
    let separate = control.get_infector("separate");
    feature
        .total_infection(&mut control, &[0], links(&[]), &0)
        .unwrap();
    assert!(feature.is_infected(&control, &0));
    assert!(!separate.is_infected(&control, &0));
}

#[test]
fn test_limited_infection_single_network() {
    let mut control = InfectionControl::new();
    let feature = control.get_infector("test");
    feature
        .limited_infection(&mut control, &[0, 1], links(&[(0, 1)]), 2, &SelectionConfig::default())
        .unwrap();
    assert!(feature.is_infected(&control, &0));
    assert!(feature.is_infected(&control, &1));
}

#[test]
fn test_limited_infection_single_large_network() {
    let mut control = InfectionControl::new();
    let feature = control.get_infector("test");
    let plan = feature
        .limited_infection(&mut control, &[0, 1], links(&[(0, 1)]), 1, &SelectionConfig::default())
        .unwrap();
    assert!(plan.is_empty());
    assert!(!feature.is_infected(&control, &0));
    assert!(!feature.is_infected(&control, &1));
    assert_eq!(control.num_infected(), 0);
}

#[test]
fn test_limited_infection_multiple_non_exact() {
    let mut control = InfectionControl::new();
    let feature = control.get_infector("test");
    feature
        .limited_infection(
            &mut control,
            &[0, 1, 2, 3],
            links(&[(1, 2), (1, 3)]),
            2,
            &SelectionConfig::with_algorithm(Algorithm::Exact),
        )
        .unwrap();
    assert!(feature.is_infected(&control, &0));
    assert!(!feature.is_infected(&control, &1));
}

#[test]
fn test_failed_selection_tags_nothing() {
    let mut control = InfectionControl::new();
    let feature = control.get_infector("test");
    assert!(feature
        .total_infection(&mut control, &[0, 1], links(&[]), &9)
        .is_err());
    assert_eq!(control.num_infected(), 0);
}

#[test]
fn test_tags_accumulate_without_duplicates() {
    let mut control = InfectionControl::new();
    control.infect("a", &[1, 2]);
    control.infect("b", &[2]);
    control.infect("a", &[2]);
    assert_eq!(control.tags(&1), ["a".to_string()]);
    assert_eq!(control.tags(&2), ["a".to_string(), "b".to_string()]);
    assert!(control.tags(&3).is_empty());
    assert!(control.has_tag(&2, "b"));
    assert!(!control.has_infection(&1, "b"));
}

#[test]
fn test_grouped_infection_reuses_one_partition() {
    let population = [0, 1, 2, 3, 4];
    let edges = links(&[(0, 1), (2, 3), (3, 4)]);
    let calls = Cell::new(0);
    let groups = partition(&population, |entity| {
        calls.set(calls.get() + 1);
        edges(entity)
    })
    .unwrap();
    assert_eq!(groups.len(), 2);

    let mut control = InfectionControl::new();
    let feature = control.get_infector("test");
    let plan = feature
        .limited_infection_grouped(&mut control, groups.clone(), 2, &SelectionConfig::default())
        .unwrap();
    assert_eq!(plan.len(), 2);
    assert!(feature.is_infected(&control, &0));
    assert!(!feature.is_infected(&control, &2));

    let other = control.get_infector("other");
    let plan = other.total_infection_grouped(&mut control, &groups, &4).unwrap();
    assert_eq!(plan.len(), 3);
    assert!(other.is_infected(&control, &2));
    assert!(!other.is_infected(&control, &0));

    assert_eq!(calls.get(), population.len());
}

#[test]
fn test_grouped_infection_errors() {
    let groups = partition(&[0, 1], links(&[])).unwrap();
    let mut control = InfectionControl::new();
    let feature = control.get_infector("test");
    assert!(matches!(
        feature.total_infection_grouped(&mut control, &groups, &7),
        Err(SelectionError::NotFound(_))
    ));
    assert!(matches!(
        feature.limited_infection_grouped(&mut control, groups, -1, &SelectionConfig::default()),
        Err(SelectionError::InvalidArgument(_))
    ));
    assert!(feature
        .total_infection_grouped(&mut control, &[], &7)
        .unwrap()
        .is_empty());
    assert_eq!(control.num_infected(), 0);
}
