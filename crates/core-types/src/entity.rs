use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Classification of a reporting entity (e.g. "region", "health center").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityType {
    pub slug: String,
    pub name: String,
}

impl EntityType {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
        }
    }
}

/// A node of the reporting hierarchy.
///
/// The tree itself is stored elsewhere; an `Entity` only carries its own
/// identity and the chain of parents above it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub entity_type: EntityType,
    pub parent: Option<Box<Entity>>,
}

impl Entity {
    pub fn new(slug: impl Into<String>, name: impl Into<String>, entity_type: EntityType) -> Self {
        Self {
            id: Uuid::new_v4(),
            slug: slug.into(),
            name: name.into(),
            entity_type,
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: Entity) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    /// Name with every word capitalized.
    pub fn display_name(&self) -> String {
        title_case(&self.name)
    }

    /// `name/parent` when the entity has a parent, the bare name otherwise.
    pub fn display_full_name(&self) -> String {
        match &self.parent {
            Some(parent) => format!("{}/{}", self.display_name(), parent.display_name()),
            None => self.display_name(),
        }
    }

    pub fn display_code_name(&self) -> String {
        format!("{}/{}", self.slug, self.display_name())
    }

    /// Type of the parent entity, if any.
    pub fn parent_level(&self) -> Option<&EntityType> {
        self.parent.as_deref().map(|parent| &parent.entity_type)
    }

    /// Parents, closest first.
    pub fn ancestors(&self) -> impl Iterator<Item = &Entity> {
        std::iter::successors(self.parent.as_deref(), |entity| entity.parent.as_deref())
    }

    /// Length of the parent chain; a root entity has depth 0.
    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }
}

fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for c in value.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
