//! Growable container with O(1) removal that does not preserve element order.

/// Contiguous storage plus a logical length.
///
/// Removing an element moves the last live element into the vacated slot, so an index
/// observed before a removal at or below it must be re-read afterwards. Slots past the
/// logical length are kept allocated until [`DisorderedArray::garbage_collection`] runs.
#[derive(Debug, Clone)]
pub struct DisorderedArray<T> {
    elements: Vec<Option<T>>,
    length: usize,
}

impl<T> Default for DisorderedArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DisorderedArray<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
            length: 0,
        }
    }

    /// Appends an element at the logical end.
    pub fn add(&mut self, element: T) {
        if self.length == self.elements.len() {
            self.elements.push(Some(element));
        } else {
            self.elements[self.length] = Some(element);
        }
        self.length += 1;
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.length {
            self.elements[index].as_ref()
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.length {
            self.elements[index].as_mut()
        } else {
            None
        }
    }

    /// Removes the element at `index`, filling the hole with the last live element.
    pub fn delete_by_index(&mut self, index: usize) -> Option<T> {
        if index >= self.length {
            return None;
        }
        let last = self.length - 1;
        self.elements.swap(index, last);
        self.length = last;
        self.elements[last].take()
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Number of allocated slots, live or not.
    pub fn capacity(&self) -> usize {
        self.elements.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.elements[..self.length].iter().flatten()
    }

    pub fn clear(&mut self) {
        for slot in &mut self.elements[..self.length] {
            *slot = None;
        }
        self.length = 0;
    }

    /// Releases slots beyond the logical length.
    pub fn garbage_collection(&mut self) {
        self.elements.truncate(self.length);
        self.elements.shrink_to_fit();
    }
}

impl<T: PartialEq> DisorderedArray<T> {
    /// Removes the first element equal to `element`. Returns whether one was found.
    pub fn delete(&mut self, element: &T) -> bool {
        match self.index_of(element) {
            Some(index) => {
                self.delete_by_index(index);
                true
            }
            None => false,
        }
    }

    pub fn index_of(&self, element: &T) -> Option<usize> {
        self.elements[..self.length]
            .iter()
            .position(|slot| slot.as_ref() == Some(element))
    }
}
