/// In-memory lookup table of element label -> classification
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Store shared between the classifier and the refresh controller
pub type SharedStore = Rc<RefCell<ClassificationStore>>;

/// Whether an element is known to be reachable from the base elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Proven,
    Disproven,
}

/// Normalize a label the way every key in the store is written
pub fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassificationStore {
    entries: HashMap<String, Classification>,
}

impl ClassificationStore {
    pub fn new() -> Self {
        ClassificationStore {
            entries: HashMap::new(),
        }
    }

    /// Build a store from the two remote lists (disproven applied last)
    pub fn from_lists<S: AsRef<str>>(proven: &[S], disproven: &[S]) -> Self {
        let mut store = ClassificationStore::new();
        store.load_bulk(proven, disproven);
        store
    }

    pub fn shared(self) -> SharedStore {
        Rc::new(RefCell::new(self))
    }

    /// Insert or overwrite a single entry
    pub fn put(&mut self, label: &str, classification: Classification) {
        self.entries.insert(normalize(label), classification);
    }

    pub fn get(&self, label: &str) -> Option<Classification> {
        self.entries.get(&normalize(label)).copied()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Apply the proven list, then the disproven list, so that a label
    /// present in both ends up disproven.
    pub fn load_bulk<S: AsRef<str>>(&mut self, proven: &[S], disproven: &[S]) {
        for label in proven {
            self.put(label.as_ref(), Classification::Proven);
        }
        for label in disproven {
            self.put(label.as_ref(), Classification::Disproven);
        }
    }

    /// Discard every entry and load the new lists in one synchronous step.
    ///
    /// The replacement is built off to the side and swapped in, so a reader
    /// never sees an empty store between the old and new contents.
    pub fn replace<S: AsRef<str>>(&mut self, proven: &[S], disproven: &[S]) {
        *self = ClassificationStore::from_lists(proven, disproven);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
