//! Mutable builders for immutable components
//!
//! A builder mirrors a component's fields with plain public data. Committing
//! runs the component's full validation. An empty builder commits to
//! `None` rather than failing.

use crate::error::Result;
use crate::versions::Context;

/// A mutable staging object that commits to an immutable component
pub trait ComponentBuilder: Default + Clone {
    /// The component produced on commit
    type Target;

    /// True if every field is blank and every child builder is empty
    fn is_empty(&self) -> bool;

    /// Validate and build the component, or `None` when empty
    fn commit(&self, ctx: &Context) -> Result<Option<Self::Target>>;
}

/// Ordered list of child builders
///
/// Reading never grows the list: [`placeholder`](Self::placeholder) hands
/// back an empty builder for an out-of-range index. Growing is explicit via
/// [`ensure_size`](Self::ensure_size) or [`slot`](Self::slot).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderList<B> {
    items: Vec<B>,
}

impl<B> Default for BuilderList<B> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<B: ComponentBuilder> BuilderList<B> {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the builder at `index`, if it exists
    pub fn get(&self, index: usize) -> Option<&B> {
        self.items.get(index)
    }

    /// The builder at `index`, or an empty placeholder; never grows the list
    pub fn placeholder(&self, index: usize) -> B {
        self.items.get(index).cloned().unwrap_or_default()
    }

    /// Grow the list with empty builders until it holds at least `size`
    pub fn ensure_size(&mut self, size: usize) {
        if self.items.len() < size {
            self.items.resize_with(size, B::default);
        }
    }

    /// Mutable access to the builder at `index`, growing the list if needed
    pub fn slot(&mut self, index: usize) -> &mut B {
        self.ensure_size(index + 1);
        &mut self.items[index]
    }

    /// Append a builder
    pub fn push(&mut self, builder: B) {
        self.items.push(builder);
    }

    /// Number of builders, including empty placeholders
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the list holds no builders at all
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True if every builder in the list is empty
    pub fn all_empty(&self) -> bool {
        self.items.iter().all(ComponentBuilder::is_empty)
    }

    /// Iterate over the builders
    pub fn iter(&self) -> std::slice::Iter<'_, B> {
        self.items.iter()
    }

    /// Commit every non-empty builder, preserving order
    pub fn commit_all(&self, ctx: &Context) -> Result<Vec<B::Target>> {
        let mut committed = Vec::new();
        for builder in &self.items {
            if let Some(component) = builder.commit(ctx)? {
                committed.push(component);
            }
        }
        Ok(committed)
    }
}

impl<B> FromIterator<B> for BuilderList<B> {
    fn from_iter<I: IntoIterator<Item = B>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// True if a string field is blank
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// True if every string in a list field is blank
pub(crate) fn all_blank(values: &[String]) -> bool {
    values.iter().all(|v| is_blank(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    struct NameBuilder {
        value: String,
    }

    impl ComponentBuilder for NameBuilder {
        type Target = String;

        fn is_empty(&self) -> bool {
            is_blank(&self.value)
        }

        fn commit(&self, _ctx: &Context) -> Result<Option<String>> {
            Ok((!self.is_empty()).then(|| self.value.clone()))
        }
    }

    #[test]
    fn test_placeholder_does_not_grow() {
        let list: BuilderList<NameBuilder> = BuilderList::new();
        let placeholder = list.placeholder(1);
        assert!(placeholder.is_empty());
        assert_eq!(list.len(), 0);
        assert!(list.get(1).is_none());
    }

    #[test]
    fn test_slot_grows_explicitly() {
        let mut list: BuilderList<NameBuilder> = BuilderList::new();
        list.slot(1).value = "sub2".to_string();

        assert_eq!(list.len(), 2);
        assert!(list.get(0).unwrap().is_empty());
        assert!(!list.all_empty());

        let ctx = Context::default();
        assert_eq!(list.commit_all(&ctx).unwrap(), vec!["sub2".to_string()]);
    }

    #[test]
    fn test_ensure_size_never_shrinks() {
        let mut list: BuilderList<NameBuilder> = BuilderList::new();
        list.ensure_size(3);
        list.ensure_size(1);
        assert_eq!(list.len(), 3);
        assert!(list.all_empty());
    }

    #[test]
    fn test_blank_helpers() {
        let values = vec!["a".to_string(), " ".to_string(), String::new()];
        assert!(!all_blank(&values));
        assert!(is_blank(&values[1]));
        assert!(all_blank(&values[1..]));
    }
}
