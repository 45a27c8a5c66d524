use crate::{partition, HashMap};
use ahash::RandomState;
use anyhow::{anyhow, Result};
use infection_structs::core::{ComponentStats, PopulationModel, PopulationSettings, User};
use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Users addressed by id, with their declared coaching links.
#[derive(Debug, Clone)]
pub struct Population {
    users: Vec<User>,
    by_id: HashMap<usize, usize>,
}

impl Population {
    pub fn new(users: Vec<User>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity_and_hasher(users.len(), RandomState::new());
        for (position, user) in users.iter().enumerate() {
            if by_id.insert(user.id, position).is_some() {
                return Err(anyhow!("Duplicate user id {}", user.id));
            }
        }
        Ok(Self { users, by_id })
    }

    pub fn generate(settings: &PopulationSettings, round: u64) -> Result<Self> {
        let seed = settings.calc_seed(round)?;
        let mut rng = SmallRng::from_seed(seed);
        let users = match settings.model {
            PopulationModel::Random { density } => {
                if density > settings.size {
                    return Err(anyhow!(
                        "density {} exceeds population size {}",
                        density,
                        settings.size
                    ));
                }
                random_users(&mut rng, settings.size, density)
            }
            PopulationModel::Classroom {
                p_teacher,
                num_coach,
                p_student_coach,
            } => {
                if num_coach == 0 {
                    return Err(anyhow!("num_coach must be at least 1"));
                }
                if num_coach > settings.size.max(1) {
                    return Err(anyhow!(
                        "num_coach {} exceeds population size {}",
                        num_coach,
                        settings.size
                    ));
                }
                let max_coaches = num_coach
                    .checked_mul(2)
                    .ok_or_else(|| anyhow!("num_coach {} is too large", num_coach))?;
                probability(p_teacher, "p_teacher")?;
                probability(p_student_coach, "p_student_coach")?;
                classroom_users(&mut rng, settings.size, p_teacher, max_coaches, p_student_coach)
            }
        };
        Self::new(users)
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn ids(&self) -> Vec<usize> {
        self.users.iter().map(|user| user.id).collect()
    }

    pub fn contains(&self, id: usize) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Declared links of the user with `id`; unknown ids have none.
    pub fn adjacency(&self, id: &usize) -> Vec<usize> {
        self.by_id
            .get(id)
            .map(|&position| self.users[position].connections.clone())
            .unwrap_or_default()
    }

    /// Number of connected groups and the size of the largest one.
    pub fn component_stats(&self) -> Result<(usize, usize)> {
        let groups = partition(&self.ids(), |id| self.adjacency(id))?;
        let largest = groups.iter().map(Vec::len).max().unwrap_or(0);
        Ok((groups.len(), largest))
    }
}

/// Averages [`Population::component_stats`] over `trials` generated populations.
pub fn component_stats(settings: &PopulationSettings, trials: usize) -> Result<ComponentStats> {
    if trials == 0 {
        return Err(anyhow!("trials must be at least 1"));
    }
    let mut total_groups = 0usize;
    let mut total_largest = 0usize;
    for round in 0..trials {
        let (num_groups, largest) = Population::generate(settings, round as u64)?.component_stats()?;
        total_groups += num_groups;
        total_largest += largest;
    }
    Ok(ComponentStats {
        trials,
        mean_num_groups: total_groups as f64 / trials as f64,
        mean_largest_group: total_largest as f64 / trials as f64,
    })
}

fn probability(p: f64, name: &str) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(anyhow!("{} must be within [0, 1], got {}", name, p))
    }
}

fn random_users(rng: &mut SmallRng, size: usize, density: usize) -> Vec<User> {
    let mut users: Vec<User> = (0..size)
        .map(|id| User {
            id,
            connections: Vec::new(),
        })
        .collect();
    for id in 0..size {
        for _ in 0..rng.gen_range(0..=density) {
            let other = rng.gen_range(0..size);
            if other != id {
                users[id].connections.push(other);
            }
        }
    }
    users
}

/// Teachers get the lowest ids, students follow. Each student is coached by
/// between 1 and `max_coaches` users, a peer with probability
/// `p_student_coach` and otherwise a teacher.
fn classroom_users(
    rng: &mut SmallRng,
    size: usize,
    p_teacher: f64,
    max_coaches: usize,
    p_student_coach: f64,
) -> Vec<User> {
    let is_student: Vec<bool> = (0..size).map(|_| rng.gen::<f64>() > p_teacher).collect();
    let num_teachers = is_student.iter().filter(|&&student| !student).count();
    let num_students = size - num_teachers;

    let mut users: Vec<User> = (0..size)
        .map(|id| User {
            id,
            connections: Vec::new(),
        })
        .collect();
    for student in num_teachers..size {
        for _ in 0..rng.gen_range(1..=max_coaches) {
            let peer_coach = rng.gen::<f64>() <= p_student_coach;
            if peer_coach && num_students > 0 {
                let coach = num_teachers + rng.gen_range(0..num_students);
                users[student].connections.push(coach);
            } else if num_teachers > 0 {
                let coach = rng.gen_range(0..num_teachers);
                users[student].connections.push(coach);
            }
        }
    }
    users
}
