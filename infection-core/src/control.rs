use crate::{
    partition::Group, select_all, select_bounded, select_group_of, select_groups, HashMap, Result,
    SelectionConfig,
};
use ahash::RandomState;
use std::{collections::HashSet, fmt::Debug, hash::Hash};
use tracing::info;

/// Bookkeeping that remembers which entities carry which feature tags.
pub trait Tagger<T> {
    fn tag<'a, I>(&mut self, tag: &str, entities: I)
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a;

    fn has_tag(&self, entity: &T, tag: &str) -> bool;
}

/// In-memory scope for feature tags ("infections") on entities.
#[derive(Debug, Clone)]
pub struct InfectionControl<T> {
    infectors: HashMap<String, Infector>,
    infections: HashMap<T, Vec<String>>,
}

impl<T> Default for InfectionControl<T> {
    fn default() -> Self {
        Self {
            infectors: HashMap::with_hasher(RandomState::new()),
            infections: HashMap::with_hasher(RandomState::new()),
        }
    }
}

impl<T> InfectionControl<T>
where
    T: Eq + Hash + Clone + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the infector registered under `name`, creating it on first use.
    pub fn get_infector(&mut self, name: &str) -> Infector {
        self.infectors
            .entry(name.to_string())
            .or_insert_with(|| Infector::new(name))
            .clone()
    }

    pub fn infectors(&self) -> impl Iterator<Item = &Infector> {
        self.infectors.values()
    }

    pub fn infect<'a, I>(&mut self, tag: &str, entities: I)
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        for entity in entities {
            let tags = self.infections.entry(entity.clone()).or_default();
            if !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
            info!(entity = ?entity, feature = tag, "entity infected with feature");
        }
    }

    pub fn has_infection(&self, entity: &T, tag: &str) -> bool {
        self.tags(entity).iter().any(|t| t == tag)
    }

    pub fn tags(&self, entity: &T) -> &[String] {
        self.infections.get(entity).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn num_infected(&self) -> usize {
        self.infections.len()
    }
}

impl<T> Tagger<T> for InfectionControl<T>
where
    T: Eq + Hash + Clone + Debug,
{
    fn tag<'a, I>(&mut self, tag: &str, entities: I)
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        self.infect(tag, entities);
    }

    fn has_tag(&self, entity: &T, tag: &str) -> bool {
        self.has_infection(entity, tag)
    }
}

/// A named feature that can be rolled out to groups of entities.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Infector {
    name: String,
}

impl Infector {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tags every entity connected to `anchor` and returns them.
    pub fn total_infection<T, F, I, R>(
        &self,
        tagger: &mut R,
        population: &[T],
        adjacency: F,
        anchor: &T,
    ) -> Result<HashSet<T>>
    where
        T: Eq + Hash + Clone,
        F: Fn(&T) -> I,
        I: IntoIterator<Item = T>,
        R: Tagger<T>,
    {
        let plan = select_all(population, adjacency, anchor)?;
        tagger.tag(&self.name, &plan);
        Ok(plan)
    }

    /// Tags a set of whole groups of at most `target_size` entities and returns them.
    pub fn limited_infection<T, F, I, R>(
        &self,
        tagger: &mut R,
        population: &[T],
        adjacency: F,
        target_size: i64,
        config: &SelectionConfig,
    ) -> Result<HashSet<T>>
    where
        T: Eq + Hash + Clone,
        F: Fn(&T) -> I,
        I: IntoIterator<Item = T>,
        R: Tagger<T>,
    {
        let plan = select_bounded(population, adjacency, target_size, config)?;
        tagger.tag(&self.name, &plan);
        Ok(plan)
    }

    /// Same as [`Infector::total_infection`] over an existing partition.
    pub fn total_infection_grouped<T, R>(
        &self,
        tagger: &mut R,
        groups: &[Group<T>],
        anchor: &T,
    ) -> Result<HashSet<T>>
    where
        T: Eq + Hash + Clone,
        R: Tagger<T>,
    {
        let plan = select_group_of(groups, anchor)?;
        tagger.tag(&self.name, &plan);
        Ok(plan)
    }

    /// Same as [`Infector::limited_infection`] over an existing partition.
    pub fn limited_infection_grouped<T, R>(
        &self,
        tagger: &mut R,
        groups: Vec<Group<T>>,
        target_size: i64,
        config: &SelectionConfig,
    ) -> Result<HashSet<T>>
    where
        T: Eq + Hash + Clone,
        R: Tagger<T>,
    {
        let plan = select_groups(groups, target_size, config)?;
        tagger.tag(&self.name, &plan);
        Ok(plan)
    }

    pub fn is_infected<T, R>(&self, tagger: &R, entity: &T) -> bool
    where
        R: Tagger<T>,
    {
        tagger.has_tag(entity, &self.name)
    }
}
