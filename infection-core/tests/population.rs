use infection_core::population::component_stats;
use infection_core::{select_bounded, Population, SelectionConfig};
use infection_structs::core::{PopulationModel, PopulationSettings, User};

fn classroom(size: usize) -> PopulationSettings {
    PopulationSettings {
        seed_phrase: "classroom".to_string(),
        size,
        model: PopulationModel::default(),
    }
}

#[test]
fn test_generation_is_deterministic() {
    let settings = classroom(200);
    let a = Population::generate(&settings, 0).unwrap();
    let b = Population::generate(&settings, 0).unwrap();
    let c = Population::generate(&settings, 1).unwrap();
    assert_eq!(a.users(), b.users());
    assert_ne!(a.users(), c.users());
    assert_eq!(a.len(), 200);
}

#[test]
fn test_classroom_links_stay_inside_population() {
    let population = Population::generate(&classroom(300), 3).unwrap();
    for (position, user) in population.users().iter().enumerate() {
        assert_eq!(user.id, position);
        assert!(user.connections.iter().all(|&c| population.contains(c)));
    }
    let (num_groups, largest) = population.component_stats().unwrap();
    assert!(num_groups >= 1);
    assert!(largest <= 300);
}

#[test]
fn test_random_model_has_no_self_links() {
    let settings = PopulationSettings {
        seed_phrase: "random".to_string(),
        size: 50,
        model: PopulationModel::Random { density: 3 },
    };
    let population = Population::generate(&settings, 0).unwrap();
    for user in population.users() {
        assert!(user.connections.len() <= 3);
        assert!(!user.connections.contains(&user.id));
    }
}

#[test]
fn test_zero_coaches_rejected() {
    let settings = PopulationSettings {
        seed_phrase: "x".to_string(),
        size: 10,
        model: PopulationModel::Classroom {
            p_teacher: 0.4,
            num_coach: 0,
            p_student_coach: 0.3,
        },
    };
    assert!(Population::generate(&settings, 0).is_err());
}

#[test]
fn test_duplicate_ids_rejected() {
    let users = vec![
        User { id: 1, connections: vec![] },
        User { id: 1, connections: vec![] },
    ];
    assert!(Population::new(users).is_err());
}

#[test]
fn test_adjacency_by_id() {
    let users = vec![
        User { id: 10, connections: vec![20] },
        User { id: 20, connections: vec![] },
        User { id: 30, connections: vec![] },
    ];
    let population = Population::new(users).unwrap();
    assert_eq!(population.adjacency(&10), vec![20]);
    assert!(population.adjacency(&99).is_empty());
    assert_eq!(population.component_stats().unwrap(), (2, 2));
}

#[test]
fn test_bounded_selection_on_generated_population() {
    let population = Population::generate(&classroom(500), 0).unwrap();
    let ids = population.ids();
    let target = 50;
    let selected = select_bounded(&ids, |id| population.adjacency(id), target, &SelectionConfig::default()).unwrap();
    assert!(selected.len() as i64 <= target);
}

#[test]
fn test_component_stats_average() {
    let stats = component_stats(&classroom(100), 4).unwrap();
    assert_eq!(stats.trials, 4);
    assert!(stats.mean_num_groups >= 1.0);
    assert!(stats.mean_largest_group <= 100.0);
    assert!(component_stats(&classroom(100), 0).is_err());
}

fn classroom_with(size: usize, p_teacher: f64, num_coach: usize, p_student_coach: f64) -> PopulationSettings {
    PopulationSettings {
        seed_phrase: "bounds".to_string(),
        size,
        model: PopulationModel::Classroom {
            p_teacher,
            num_coach,
            p_student_coach,
        },
    }
}

#[test]
fn test_oversized_coach_count_rejected() {
    let settings = classroom_with(10, 0.0, usize::MAX / 2 + 1, 0.5);
    assert!(Population::generate(&settings, 0).is_err());
    let settings = classroom_with(usize::MAX, 0.0, usize::MAX / 2 + 1, 0.5);
    assert!(Population::generate(&settings, 0).is_err());
    assert!(Population::generate(&classroom_with(10, 0.4, 11, 0.3), 0).is_err());
    assert!(Population::generate(&classroom_with(10, 0.4, 10, 0.3), 0).is_ok());
}

#[test]
fn test_probabilities_outside_unit_interval_rejected() {
    assert!(Population::generate(&classroom_with(10, -0.1, 1, 0.3), 0).is_err());
    assert!(Population::generate(&classroom_with(10, 1.5, 1, 0.3), 0).is_err());
    assert!(Population::generate(&classroom_with(10, 0.4, 1, f64::NAN), 0).is_err());
    assert!(Population::generate(&classroom_with(10, 0.4, 1, 2.0), 0).is_err());
    assert!(Population::generate(&classroom_with(10, 1.0, 1, 0.0), 0).is_ok());
}

#[test]
fn test_density_above_size_rejected() {
    let settings = |density| PopulationSettings {
        seed_phrase: "random".to_string(),
        size: 5,
        model: PopulationModel::Random { density },
    };
    assert!(Population::generate(&settings(usize::MAX), 0).is_err());
    assert!(Population::generate(&settings(6), 0).is_err());
    assert_eq!(Population::generate(&settings(5), 0).unwrap().len(), 5);
}
