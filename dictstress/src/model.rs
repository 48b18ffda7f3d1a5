use super::*;

/// Returned by [`Model::get`] and [`Model::delete`] when the key is absent.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("key not found")]
pub struct NotFound;

/// A key/value store under test.
pub trait Model<K, V> {
    fn get(&self, key: &K) -> std::result::Result<&V, NotFound>;

    /// Insert or overwrite.
    fn set(&mut self, key: K, value: V);

    fn delete(&mut self, key: &K) -> std::result::Result<(), NotFound>;

    /// Live keys in the order the table stores them.
    fn keys(&self) -> Vec<K>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, key: &K) -> bool {
        self.get(key).is_ok()
    }

    /// Tables keeping a side index for membership return it here.
    fn as_fast_contains(&self) -> Option<&dyn FastContains<K>> {
        None
    }
}

/// Optional membership index a [`Model`] may expose.
pub trait FastContains<K> {
    fn fast_contains(&self, key: &K) -> bool;
}

impl<K, V, M: Model<K, V> + ?Sized> Model<K, V> for Box<M> {
    fn get(&self, key: &K) -> std::result::Result<&V, NotFound> {
        (**self).get(key)
    }

    fn set(&mut self, key: K, value: V) {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &K) -> std::result::Result<(), NotFound> {
        (**self).delete(key)
    }

    fn keys(&self) -> Vec<K> {
        (**self).keys()
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn contains(&self, key: &K) -> bool {
        (**self).contains(key)
    }

    fn as_fast_contains(&self) -> Option<&dyn FastContains<K>> {
        (**self).as_fast_contains()
    }
}

/// Source of keys and values to insert.
pub trait KeyValueFactory<K, V> {
    fn generate_key<R: Rng + ?Sized>(&mut self, rng: &mut R) -> K;
    fn generate_value<R: Rng + ?Sized>(&mut self, rng: &mut R) -> V;
}

/// A registered table: how to build it and how to dump its layout.
pub struct Implementation<K, V, M> {
    pub name: &'static str,
    /// An empty slice builds an empty table.
    pub factory: fn(&[(K, V)]) -> M,
    pub dumper: fn(&M) -> Snapshot<K, V>,
}

impl<K, V, M> Clone for Implementation<K, V, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, M> Copy for Implementation<K, V, M> {}

impl<K, V, M> Implementation<K, V, M> {
    pub fn build(&self, initial_state: &[(K, V)]) -> M {
        (self.factory)(initial_state)
    }

    pub fn dump(&self, model: &M) -> Snapshot<K, V> {
        (self.dumper)(model)
    }
}
