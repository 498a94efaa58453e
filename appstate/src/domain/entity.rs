//! Identity-based domain objects.
//!
//! An entity is compared by its identifier alone: two entities carrying the
//! same identifier are equal even when every other attribute differs. The
//! identifier is fixed at construction and there is no way to replace it.

use std::hash::{Hash, Hasher};

/// Capability for domain types that carry their own stable identifier.
///
/// Implementors should derive equality from [`Identified::id`] so that
/// `a == b` agrees with [`Identified::same_identity`].
///
/// # Examples
/// ```
/// use appstate::domain::Identified;
///
/// struct Device {
///     serial: u32,
///     label: &'static str,
/// }
///
/// impl Identified for Device {
///     type Id = u32;
///
///     fn id(&self) -> &u32 {
///         &self.serial
///     }
/// }
///
/// let a = Device { serial: 7, label: "kitchen" };
/// let b = Device { serial: 7, label: "hallway" };
/// assert!(a.same_identity(&b));
/// ```
pub trait Identified {
    /// Identifier type, compared by value.
    type Id: Eq;

    /// Stable identifier assigned at construction.
    fn id(&self) -> &Self::Id;

    /// Returns `true` when `other` carries an equal identifier.
    fn same_identity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

/// Generic entity wrapper pairing an immutable identifier with attributes.
///
/// ## Invariants
/// - `id` is set once in [`Entity::new`] and never mutated.
/// - Equality and hashing consider `id` only.
///
/// # Examples
/// ```
/// use appstate::domain::Entity;
///
/// let before = Entity::new(42_u64, "draft");
/// let after = Entity::new(42_u64, "published");
/// assert_eq!(before, after);
/// assert!(before.equals(&Entity::new(42_u64, 3.5_f32)));
/// ```
#[derive(Debug, Clone)]
pub struct Entity<Id, A = ()> {
    id: Id,
    attributes: A,
}

impl<Id, A> Entity<Id, A> {
    /// Build an entity from its identifier and attributes.
    pub const fn new(id: Id, attributes: A) -> Self {
        Self { id, attributes }
    }

    /// Identifier owned by this entity.
    pub const fn id(&self) -> &Id {
        &self.id
    }

    /// Non-identifying attributes.
    pub const fn attributes(&self) -> &A {
        &self.attributes
    }

    /// Mutable access to the attributes; the identifier stays fixed.
    pub fn attributes_mut(&mut self) -> &mut A {
        &mut self.attributes
    }

    /// Swap the attributes while keeping the identifier.
    #[must_use]
    pub fn with_attributes<B>(self, attributes: B) -> Entity<Id, B> {
        Entity {
            id: self.id,
            attributes,
        }
    }

    /// Split the entity into identifier and attributes.
    pub fn into_parts(self) -> (Id, A) {
        (self.id, self.attributes)
    }
}

impl<Id: PartialEq, A> Entity<Id, A> {
    /// Identity comparison against any entity sharing the identifier type.
    ///
    /// Attribute types may differ; only identifiers are compared.
    pub fn equals<B>(&self, other: &Entity<Id, B>) -> bool {
        self.id == other.id
    }
}

impl<Id: PartialEq, A> PartialEq for Entity<Id, A> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<Id: Eq, A> Eq for Entity<Id, A> {}

impl<Id: Hash, A> Hash for Entity<Id, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<Id: Eq, A> Identified for Entity<Id, A> {
    type Id = Id;

    fn id(&self) -> &Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    //! Identity laws for the entity wrapper.
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[derive(Debug, Clone, PartialEq)]
    struct Profile {
        nickname: String,
        score: u32,
    }

    fn profile(nickname: &str, score: u32) -> Profile {
        Profile {
            nickname: nickname.to_owned(),
            score,
        }
    }

    #[rstest]
    #[case(1, 1, true)]
    #[case(1, 2, false)]
    #[case(0, 0, true)]
    #[case(u64::MAX, 0, false)]
    fn equality_follows_identifier(#[case] left: u64, #[case] right: u64, #[case] expected: bool) {
        let a = Entity::new(left, profile("ada", 10));
        let b = Entity::new(right, profile("grace", 99));

        assert_eq!(a.equals(&b), expected);
        assert_eq!(a == b, expected);
    }

    #[rstest]
    fn attribute_changes_do_not_affect_identity() {
        let mut entity = Entity::new("user-1".to_owned(), profile("ada", 1));
        let snapshot = entity.clone();
        entity.attributes_mut().score = 500;

        assert_eq!(entity, snapshot);
        assert_ne!(entity.attributes(), snapshot.attributes());
    }

    #[rstest]
    fn equals_accepts_different_attribute_types() {
        let with_profile = Entity::new(9_u32, profile("ada", 1));
        let bare = Entity::new(9_u32, ());

        assert!(with_profile.equals(&bare));
        assert!(!with_profile.equals(&Entity::new(10_u32, ())));
    }

    #[rstest]
    fn hash_set_deduplicates_by_identifier() {
        let set: HashSet<_> = [
            Entity::new(1_u8, "first"),
            Entity::new(1_u8, "second"),
            Entity::new(2_u8, "third"),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.len(), 2);
    }

    #[rstest]
    fn with_attributes_preserves_identifier() {
        let entity = Entity::new(5_i32, "old").with_attributes(profile("new", 3));
        let (id, attributes) = entity.into_parts();

        assert_eq!(id, 5);
        assert_eq!(attributes.nickname, "new");
    }

    #[rstest]
    fn identified_trait_matches_inherent_equality() {
        let a = Entity::new('x', 1);
        let b = Entity::new('x', 2);

        assert!(a.same_identity(&b));
        assert_eq!(Identified::id(&a), &'x');
    }
}
