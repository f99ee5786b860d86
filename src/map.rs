mod node;
mod preorder;
mod inorder;

pub use node::{Node, Color};
pub use preorder::*;
pub use inorder::*;

use std::fmt;
use std::cmp::Ordering;
use std::borrow::Borrow;
use std::iter::FromIterator;

use crate::error::{Error, Result};

use node::Link;

/// An ordered map backed by a left-leaning red-black binary search tree (LLRB)
///
/// BST properties: For each node with key `k`:
/// - The key of each node in the left subtree is less than `k`
/// - The key of each node in the right subtree is greater than `k`
///
/// Balance properties:
/// - Red links lean left: no node has a red right child
/// - No path has two red links in a row
/// - Every path from the root to an empty subtree has the same number of black links
/// - The root is black
///
/// Together these bound the height of the tree by `2 * log2(n + 1)`, so lookups, insertions and
/// removals are all `O(log n)` in the worst case.
#[derive(Clone)]
pub struct OrderedMap<K, V> {
    root: Link<K, V>,
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self {
            root: None,
        }
    }
}

impl<K, V> fmt::Debug for OrderedMap<K, V>
    where K: fmt::Debug,
          V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(IterInorder::new(self.root.as_deref()))
            .finish()
    }
}

impl<K: Ord + PartialEq, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        // Two maps with the same entries may have differently shaped trees depending on the order
        // of insertions and removals. The in-order traversal is always sorted, so comparing those
        // is enough.

        if self.len() != other.len() {
            return false;
        }

        self.iter().zip(other.iter()).all(|((k1, v1), (k2, v2))| {
            k1.eq(k2) && v1.eq(v2)
        })
    }
}

impl<K: Ord + Eq, V: Eq> Eq for OrderedMap<K, V> {}

impl<K: Ord, V> OrderedMap<K, V> {
    /// Creates an empty `OrderedMap`
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb::OrderedMap;
    /// let mut map: OrderedMap<&str, i32> = OrderedMap::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries in the map (i.e. the number of nodes in the tree)
    ///
    /// Time complexity: `O(1)`
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.len(), 0);
    /// map.insert(1, "a");
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        node::size(&self.root)
    }

    /// Returns true if the map is empty
    ///
    /// Time complexity: `O(1)`
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert!(map.is_empty());
    /// map.insert(1, "a");
    /// assert!(!map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering on the borrowed
    /// form must match the ordering on the key type.
    ///
    /// Time complexity: `O(log n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "a");
    /// assert!(map.contains_key(&1));
    /// assert!(!map.contains_key(&2));
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Returns a reference to the value corresponding to the given key, or `None` if no such key
    /// exists in the map
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering on the borrowed
    /// form must match the ordering on the key type.
    ///
    /// Time complexity: `O(log n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        self.find(key).map(Node::value)
    }

    /// Returns a reference to the value corresponding to the given key
    ///
    /// Same as `get`, except that a missing key is reported as `Error::KeyNotFound`.
    ///
    /// Time complexity: `O(log n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb::{OrderedMap, Error};
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("hello".to_string(), 1);
    /// assert_eq!(map.try_get("hello"), Ok(&1));
    /// assert_eq!(map.try_get("x"), Err(Error::KeyNotFound));
    /// ```
    pub fn try_get<Q>(&self, key: &Q) -> Result<&V>
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value corresponding to the given key, or `None` if no
    /// such key exists in the map
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering on the borrowed
    /// form must match the ordering on the key type.
    ///
    /// Time complexity: `O(log n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map.get(&1), Some(&"b"));
    ///
    /// assert_eq!(map.get_mut(&2), None);
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        let mut current = self.root_mut();
        while let Some(node) = current.take() {
            match key.cmp(node.key().borrow()) {
                Ordering::Less => current = node.left_mut(),
                Ordering::Greater => current = node.right_mut(),
                Ordering::Equal => return Some(node.value_mut()),
            }
        }

        None
    }

    /// Returns the key-value pair corresponding to the given key, or `None` if no such key exists
    /// in the map
    ///
    /// Time complexity: `O(log n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get_key_value(&1), Some((&1, &"a")));
    /// assert_eq!(map.get_key_value(&2), None);
    /// ```
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        self.find(key).map(|node| (node.key(), node.value()))
    }

    fn find<Q>(&self, key: &Q) -> Option<&Node<K, V>>
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        let mut current = self.root();
        while let Some(node) = current {
            match key.cmp(node.key().borrow()) {
                Ordering::Less => current = node.left(),
                Ordering::Greater => current = node.right(),
                Ordering::Equal => return Some(node),
            }
        }

        None
    }

    /// Inserts a key-value pair into the map
    ///
    /// Returns the previous value if the key was already present or `None` if a new node was
    /// inserted. Overwriting a value keeps the original key and does not change the structure of
    /// the tree.
    ///
    /// Time complexity: `O(log n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// # assert!(map.is_empty());
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert!(!map.is_empty());
    ///
    /// map.insert(37, "b");
    /// assert_eq!(map.insert(37, "c"), Some("b"));
    /// assert_eq!(map.get(&37), Some(&"c"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let (root, prev_value) = node::insert(self.root.take(), key, value);
        self.root = Some(node::blacken(root));
        prev_value
    }

    /// Removes a key from the map, returning the value at the key if the key was previously in the
    /// map
    ///
    /// Removing a key that is not in the map is a no-op that returns `Ok(None)` and leaves the
    /// tree untouched. Calling this on an empty map is a contract violation and returns
    /// `Error::InvalidState`.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering on the borrowed
    /// form must match the ordering on the key type.
    ///
    /// Time complexity: `O(log n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb::{OrderedMap, Error};
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// assert_eq!(map.remove(&1), Ok(Some("a")));
    /// assert_eq!(map.remove(&1), Ok(None));
    /// assert_eq!(map.remove(&2), Ok(Some("b")));
    /// assert_eq!(map.remove(&2), Err(Error::InvalidState("remove")));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Result<Option<V>>
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        if self.is_empty() {
            log::trace!("remove called on an empty map");
            return Err(Error::InvalidState("remove"));
        }

        // The top-down pass recolors nodes on the way down, so it must only start once we know it
        // will find the key
        if !self.contains_key(key) {
            log::trace!("remove of a missing key, map left unchanged");
            return Ok(None);
        }

        let root = self.root.take().map(node::redden_for_removal);
        let (root, removed) = node::remove(root, key);
        self.root = root.map(node::blacken);

        Ok(Some(removed))
    }

    /// Removes the entry with the smallest key from the map and returns it
    ///
    /// Returns `Error::InvalidState` if the map is empty.
    ///
    /// Time complexity: `O(log n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// assert_eq!(map.remove_min(), Ok((1, "a")));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn remove_min(&mut self) -> Result<(K, V)> {
        let root = self.root.take().map(node::redden_for_removal);
        let (root, min) = node::remove_min(root);
        self.root = root.map(node::blacken);

        min.map(|node| node.into_entry()).ok_or(Error::InvalidState("remove_min"))
    }

    /// Removes the entry with the largest key from the map and returns it
    ///
    /// Returns `Error::InvalidState` if the map is empty.
    ///
    /// Time complexity: `O(log n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// assert_eq!(map.remove_max(), Ok((2, "b")));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn remove_max(&mut self) -> Result<(K, V)> {
        let root = self.root.take().map(node::redden_for_removal);
        let (root, max) = node::remove_max(root);
        self.root = root.map(node::blacken);

        max.map(|node| node.into_entry()).ok_or(Error::InvalidState("remove_max"))
    }

    /// Returns the smallest key in the map
    ///
    /// Returns `Error::InvalidState` if the map is empty.
    ///
    /// Time complexity: `O(log n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb::OrderedMap;
    ///
    /// let map: OrderedMap<_, _> = vec![(3, "c"), (1, "a"), (2, "b")].into_iter().collect();
    /// assert_eq!(map.min_key(), Ok(&1));
    /// ```
    pub fn min_key(&self) -> Result<&K> {
        self.min_key_value().map(|(key, _)| key).ok_or(Error::InvalidState("min_key"))
    }

    /// Returns the largest key in the map
    ///
    /// Returns `Error::InvalidState` if the map is empty.
    ///
    /// Time complexity: `O(log n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb::OrderedMap;
    ///
    /// let map: OrderedMap<_, _> = vec![(3, "c"), (1, "a"), (2, "b")].into_iter().collect();
    /// assert_eq!(map.max_key(), Ok(&3));
    /// ```
    pub fn max_key(&self) -> Result<&K> {
        self.max_key_value().map(|(key, _)| key).ok_or(Error::InvalidState("max_key"))
    }

    /// Returns the entry with the smallest key, or `None` if the map is empty
    pub fn min_key_value(&self) -> Option<(&K, &V)> {
        let mut current = self.root()?;
        while let Some(left) = current.left() {
            current = left;
        }

        Some((current.key(), current.value()))
    }

    /// Returns the entry with the largest key, or `None` if the map is empty
    pub fn max_key_value(&self) -> Option<(&K, &V)> {
        let mut current = self.root()?;
        while let Some(right) = current.right() {
            current = right;
        }

        Some((current.key(), current.value()))
    }

    /// Clears the map, removing all entries
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "a");
    /// assert!(!map.is_empty());
    /// map.clear();
    /// assert!(map.is_empty());
    /// ```
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Returns an iterator over the keys of the map, in ascending order
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb::OrderedMap;
    ///
    /// let map: OrderedMap<_, _> = vec![(5, ()), (3, ()), (8, ())].into_iter().collect();
    /// let keys: Vec<_> = map.keys().copied().collect();
    /// assert_eq!(keys, &[3, 5, 8]);
    /// ```
    pub fn keys(&self) -> Keys<K, V> {
        Keys::new(self.root())
    }

    /// Returns an iterator over the values of the map, in ascending order of their keys
    pub fn values(&self) -> Values<K, V> {
        Values::new(self.root())
    }

    /// Returns an iterator over the entries of the map, in ascending order of their keys
    ///
    /// Same as `iter_inorder`.
    pub fn iter(&self) -> IterInorder<K, V> {
        self.iter_inorder()
    }

    /// Performs a pre-order traversal of the tree
    pub fn iter_preorder(&self) -> IterPreorder<K, V> {
        IterPreorder::new(self.root())
    }

    /// Performs an in-order traversal of the tree
    pub fn iter_inorder(&self) -> IterInorder<K, V> {
        IterInorder::new(self.root())
    }

    /// Returns the root node of the tree, or `None` if the tree is empty
    ///
    /// Note that the root can be **any** node inserted into the tree. It changes as the tree
    /// rebalances itself. For a guaranteed ordering, use the various iteration methods.
    ///
    /// This is a low-level API meant to be used for implementing traversals and for inspecting the
    /// colors and subtree sizes of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb::{OrderedMap, map::Node};
    ///
    /// // The number of black links between the node and any empty subtree below it
    /// fn black_height<K, V>(node: Option<&Node<K, V>>) -> usize {
    ///     match node {
    ///         Some(node) => black_height(node.left()) + if node.is_red() { 0 } else { 1 },
    ///         None => 0,
    ///     }
    /// }
    ///
    /// let map: OrderedMap<_, _> = (0..100).map(|i| (i, i)).collect();
    /// let root = map.root().unwrap();
    /// assert!(!root.is_red());
    /// assert_eq!(root.size(), 100);
    /// assert_eq!(black_height(root.left()), black_height(root.right()));
    /// ```
    pub fn root(&self) -> Option<&Node<K, V>> {
        self.root.as_deref()
    }

    /// Returns the root node of the tree, or `None` if the tree is empty
    ///
    /// Only the values of the nodes can be modified through this API.
    pub fn root_mut(&mut self) -> Option<&mut Node<K, V>> {
        self.root.as_deref_mut()
    }
}

impl<'a, K: Ord, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = IterInorder<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord, V> Extend<(K, V)> for OrderedMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}
