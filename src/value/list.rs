use crate::{
    error::{Error, Result},
    Tag,
};

use super::Value;

/// The payload of a List tag. Every element has the same tag, which the list
/// remembers even when empty so that it can be written back out. An empty
/// list with no known element tag uses [`Tag::End`], as the game does.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    element: Tag,
    items: Vec<Value>,
}

impl Default for List {
    fn default() -> Self {
        Self::new(Tag::End)
    }
}

impl List {
    /// An empty list that will hold elements of `element`.
    pub fn new(element: Tag) -> Self {
        Self {
            element,
            items: Vec::new(),
        }
    }

    /// Build a list taking the element tag from the first item. Fails if the
    /// items do not all share that tag.
    pub fn from_values(items: Vec<Value>) -> Result<Self> {
        let element = items.first().map_or(Tag::End, Value::tag);
        Self::with_values(element, items)
    }

    /// Build a list of `element` tags. Fails if any item has another tag.
    pub fn with_values(element: Tag, items: Vec<Value>) -> Result<Self> {
        let list = Self {
            element,
            items: Vec::new(),
        };
        for item in &items {
            list.check(item)?;
        }

        Ok(Self { items, ..list })
    }

    pub fn element_tag(&self) -> Tag {
        self.element
    }

    /// Append a value. An empty list typed as End takes on the tag of the
    /// first value pushed.
    pub fn push(&mut self, value: Value) -> Result<()> {
        if self.items.is_empty() && self.element == Tag::End {
            self.element = value.tag();
        }
        self.check(&value)?;
        self.items.push(value);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.items.get_mut(index)
    }

    /// Replace the element at `index`, returning the old one. The index must
    /// already exist and the value must match the element tag.
    pub fn set(&mut self, index: usize, value: Value) -> Result<Value> {
        self.check(&value)?;
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or_else(|| Error::index_out_of_bounds(index as i64, len))?;

        Ok(std::mem::replace(slot, value))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    fn check(&self, value: &Value) -> Result<()> {
        if value.tag() == Tag::End {
            Err(Error::bespoke("End tags cannot be list elements"))
        } else if value.tag() == self.element {
            Ok(())
        } else {
            Err(Error::list_mismatch(self.element, value.tag()))
        }
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
