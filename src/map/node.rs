use std::mem;
use std::borrow::Borrow;
use std::cmp::Ordering;

/// The color of the link from a node's parent to the node
///
/// An absent child (an empty subtree) is always considered black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    fn flip(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

/// A single node of the red-black tree
///
/// Each node exclusively owns its left and right subtrees. Only the value is ever exposed mutably
/// since modifying the key or the color could invalidate the ordering and balance properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<K, V> {
    key: K,
    value: V,
    color: Color,
    /// The number of nodes in the subtree rooted at this node (including this node)
    size: usize,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    /// New nodes are always red leaves
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            size: 1,
            left: None,
            right: None,
        }
    }

    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }

    /// Returns the key of this node
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the value of this node
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns the value of this node
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Returns the color of the link pointing to this node
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns true if the link pointing to this node is red
    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    /// Returns the number of nodes in the subtree rooted at this node
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns true if this node has a left subtree
    pub fn has_left(&self) -> bool {
        self.left.is_some()
    }

    /// Returns true if this node has a right subtree
    pub fn has_right(&self) -> bool {
        self.right.is_some()
    }

    /// Returns the left child node (subtree) of this node, if any
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// Returns the right child node (subtree) of this node, if any
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Returns the left child node (subtree) of this node, if any
    pub fn left_mut(&mut self) -> Option<&mut Self> {
        self.left.as_deref_mut()
    }

    /// Returns the right child node (subtree) of this node, if any
    pub fn right_mut(&mut self) -> Option<&mut Self> {
        self.right.as_deref_mut()
    }

    fn left_left_is_red(&self) -> bool {
        self.left.as_ref().map_or(false, |left| is_red(&left.left))
    }

    fn right_left_is_red(&self) -> bool {
        self.right.as_ref().map_or(false, |right| is_red(&right.left))
    }

    fn update_size(&mut self) {
        self.size = 1 + size(&self.left) + size(&self.right);
    }
}

pub(crate) fn is_red<K, V>(link: &Link<K, V>) -> bool {
    link.as_ref().map_or(false, |node| node.is_red())
}

pub(crate) fn size<K, V>(link: &Link<K, V>) -> usize {
    link.as_ref().map_or(0, |node| node.size)
}

/// Forces a (new) root to be black
pub(crate) fn blacken<K, V>(mut root: Box<Node<K, V>>) -> Box<Node<K, V>> {
    root.color = Color::Black;
    root
}

/// A top-down removal needs either the root or one of its children to be red so that the red link
/// can be pushed down the search path
pub(crate) fn redden_for_removal<K, V>(mut root: Box<Node<K, V>>) -> Box<Node<K, V>> {
    if !is_red(&root.left) && !is_red(&root.right) {
        root.color = Color::Red;
    }
    root
}

/// Turns a right-leaning red link into a left-leaning one
///
/// The new subtree root takes over the color and size of the old one.
fn rotate_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let mut x = match node.right.take() {
        Some(x) => x,
        None => unreachable!("rotate_left requires a right child"),
    };
    node.right = x.left.take();
    x.color = node.color;
    node.color = Color::Red;
    x.size = node.size;
    node.update_size();
    x.left = Some(node);
    x
}

/// Turns a left-leaning red link into a right-leaning one
fn rotate_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let mut x = match node.left.take() {
        Some(x) => x,
        None => unreachable!("rotate_right requires a left child"),
    };
    node.left = x.right.take();
    x.color = node.color;
    node.color = Color::Red;
    x.size = node.size;
    node.update_size();
    x.right = Some(node);
    x
}

/// Toggles the color of a node and both of its children
///
/// On insertion this splits a temporary 4-node by passing the red link up to the parent. On
/// removal it does the opposite and combines the node with its children.
fn flip_colors<K, V>(node: &mut Node<K, V>) {
    node.color = node.color.flip();
    if let Some(left) = node.left.as_deref_mut() {
        left.color = left.color.flip();
    }
    if let Some(right) = node.right.as_deref_mut() {
        right.color = right.color.flip();
    }
}

/// Assuming `node` is red and both `node.left` and `node.left.left` are black, makes `node.left`
/// or one of its children red
fn move_red_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    flip_colors(&mut node);
    if node.right_left_is_red() {
        node.right = node.right.take().map(rotate_right);
        node = rotate_left(node);
        flip_colors(&mut node);
    }
    node
}

/// Assuming `node` is red and both `node.right` and `node.right.left` are black, makes
/// `node.right` or one of its children red
fn move_red_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    flip_colors(&mut node);
    if node.left_left_is_red() {
        node = rotate_right(node);
        flip_colors(&mut node);
    }
    node
}

/// Restores the invariants on the way back up an insertion
fn fix_up<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    if is_red(&node.right) && !is_red(&node.left) {
        node = rotate_left(node);
    }
    if is_red(&node.left) && node.left_left_is_red() {
        node = rotate_right(node);
    }
    if is_red(&node.left) && is_red(&node.right) {
        flip_colors(&mut node);
    }
    node.update_size();
    node
}

/// Restores the invariants on the way back up a removal
///
/// Unlike `fix_up`, a red right link is rotated even if the left link is also red. The rotation
/// produces a red-red left chain which the next step turns into a flippable 4-node.
fn balance<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    if is_red(&node.right) {
        node = rotate_left(node);
    }
    if is_red(&node.left) && node.left_left_is_red() {
        node = rotate_right(node);
    }
    if is_red(&node.left) && is_red(&node.right) {
        flip_colors(&mut node);
    }
    node.update_size();
    node
}

/// Inserts the key and value into the given subtree, returning the new root of that subtree and
/// the previous value if the key was already present
///
/// Overwriting an existing key leaves the structure of the tree untouched.
pub(crate) fn insert<K: Ord, V>(link: Link<K, V>, key: K, value: V) -> (Box<Node<K, V>>, Option<V>) {
    let mut node = match link {
        Some(node) => node,
        None => return (Box::new(Node::new(key, value)), None),
    };

    let prev_value = match key.cmp(&node.key) {
        Ordering::Less => {
            let (left, prev_value) = insert(node.left.take(), key, value);
            node.left = Some(left);
            prev_value
        },

        Ordering::Greater => {
            let (right, prev_value) = insert(node.right.take(), key, value);
            node.right = Some(right);
            prev_value
        },

        Ordering::Equal => {
            let prev_value = mem::replace(&mut node.value, value);
            return (node, Some(prev_value));
        },
    };

    (fix_up(node), prev_value)
}

/// Removes the key from the given subtree, returning the new root of that subtree and the removed
/// value
///
/// The subtree root must be red or have a red left child, see `redden_for_removal`.
///
/// # Panics
///
/// The key must be present in the subtree. Nodes are recolored on the way down, so there is no
/// way to back out once the search runs off the bottom of the tree. Check with `contains_key`
/// first.
pub(crate) fn remove<K, V, Q>(link: Link<K, V>, key: &Q) -> (Link<K, V>, V)
    where K: Borrow<Q>,
          Q: Ord + ?Sized,
{
    let mut node = match link {
        Some(node) => node,
        None => unreachable!("remove requires the key to be present in the tree"),
    };

    let removed = if key.cmp(node.key.borrow()) == Ordering::Less {
        if !is_red(&node.left) && !node.left_left_is_red() {
            node = move_red_left(node);
        }
        let (left, removed) = remove(node.left.take(), key);
        node.left = left;
        removed

    } else {
        if is_red(&node.left) {
            node = rotate_right(node);
        }
        if key.cmp(node.key.borrow()) == Ordering::Equal && node.right.is_none() {
            // A node without a right child has no left child either (black balance)
            debug_assert!(node.left.is_none());
            let Node {value, ..} = *node;
            return (None, value);
        }
        if !is_red(&node.right) && !node.right_left_is_red() {
            node = move_red_right(node);
        }

        if key.cmp(node.key.borrow()) == Ordering::Equal {
            // Replace this node's entry with its successor, then remove the successor instead
            let (right, successor) = remove_min(node.right.take());
            node.right = right;
            let (successor_key, successor_value) = match successor {
                Some(successor) => successor.into_entry(),
                None => unreachable!("a non-empty right subtree always has a minimum"),
            };
            node.key = successor_key;
            mem::replace(&mut node.value, successor_value)

        } else {
            let (right, removed) = remove(node.right.take(), key);
            node.right = right;
            removed
        }
    };

    (Some(balance(node)), removed)
}

/// Removes the node with the smallest key from the given subtree, returning the new root of that
/// subtree and the detached node
pub(crate) fn remove_min<K, V>(link: Link<K, V>) -> (Link<K, V>, Option<Box<Node<K, V>>>) {
    let mut node = match link {
        Some(node) => node,
        None => return (None, None),
    };

    if node.left.is_none() {
        debug_assert!(node.right.is_none());
        let right = node.right.take();
        return (right, Some(node));
    }

    if !is_red(&node.left) && !node.left_left_is_red() {
        node = move_red_left(node);
    }

    let (left, min) = remove_min(node.left.take());
    node.left = left;

    (Some(balance(node)), min)
}

/// Removes the node with the largest key from the given subtree, returning the new root of that
/// subtree and the detached node
pub(crate) fn remove_max<K, V>(link: Link<K, V>) -> (Link<K, V>, Option<Box<Node<K, V>>>) {
    let mut node = match link {
        Some(node) => node,
        None => return (None, None),
    };

    if is_red(&node.left) {
        node = rotate_right(node);
    }

    if node.right.is_none() {
        debug_assert!(node.left.is_none());
        let left = node.left.take();
        return (left, Some(node));
    }

    if !is_red(&node.right) && !node.right_left_is_red() {
        node = move_red_right(node);
    }

    let (right, max) = remove_max(node.right.take());
    node.right = right;

    (Some(balance(node)), max)
}

#[cfg(test)]
mod tests {
    use super::*;

    use static_assertions::const_assert_eq;

    // Colors are stored in every node, so they should stay as small as a `bool`
    const_assert_eq!(mem::size_of::<Color>(), 1);
    // The niche in `Box` means an empty link costs nothing extra
    const_assert_eq!(mem::size_of::<Link<u64, u64>>(), mem::size_of::<usize>());

    fn leaf(key: i32, color: Color) -> Box<Node<i32, ()>> {
        let mut node = Box::new(Node::new(key, ()));
        node.color = color;
        node
    }

    fn keys_inorder(node: Option<&Node<i32, ()>>, keys: &mut Vec<i32>) {
        if let Some(node) = node {
            keys_inorder(node.left(), keys);
            keys.push(*node.key());
            keys_inorder(node.right(), keys);
        }
    }

    #[test]
    fn rotations_preserve_order_and_size() {
        //   2
        // 1   3 (red)
        let mut root = leaf(2, Color::Black);
        root.left = Some(leaf(1, Color::Black));
        root.right = Some(leaf(3, Color::Red));
        root.update_size();
        assert_eq!(root.size(), 3);

        let root = rotate_left(root);
        assert_eq!(*root.key(), 3);
        assert_eq!(root.color(), Color::Black);
        assert_eq!(root.size(), 3);
        let left = root.left().unwrap();
        assert_eq!(*left.key(), 2);
        assert!(left.is_red());
        assert_eq!(left.size(), 2);

        let mut keys = Vec::new();
        keys_inorder(Some(&*root), &mut keys);
        assert_eq!(keys, &[1, 2, 3]);

        let root = rotate_right(root);
        assert_eq!(*root.key(), 2);
        assert_eq!(root.color(), Color::Black);
        assert_eq!(root.size(), 3);
        assert!(root.right().unwrap().is_red());
        assert_eq!(root.right().unwrap().size(), 1);

        let mut keys = Vec::new();
        keys_inorder(Some(&*root), &mut keys);
        assert_eq!(keys, &[1, 2, 3]);
    }

    #[test]
    fn flip_colors_toggles() {
        let mut root = leaf(2, Color::Black);
        root.left = Some(leaf(1, Color::Red));
        root.right = Some(leaf(3, Color::Red));

        flip_colors(&mut root);
        assert!(root.is_red());
        assert!(!root.left().unwrap().is_red());
        assert!(!root.right().unwrap().is_red());

        // Flipping again restores the original colors
        flip_colors(&mut root);
        assert!(!root.is_red());
        assert!(root.left().unwrap().is_red());
        assert!(root.right().unwrap().is_red());
    }

    #[test]
    fn insert_splits_four_node() {
        let (mut root, _) = insert(None, 1, ());
        root = blacken(root);
        let (mut root, _) = insert(Some(root), 2, ());
        root = blacken(root);
        // 2 was inserted as a red right child and rotated to lean left
        assert_eq!(*root.key(), 2);
        assert!(root.left().unwrap().is_red());

        let (root, prev) = insert(Some(root), 3, ());
        let root = blacken(root);
        assert_eq!(prev, None);
        assert_eq!(*root.key(), 2);
        assert_eq!(root.size(), 3);
        // Both children were red, so the colors were flipped up
        assert!(!root.left().unwrap().is_red());
        assert!(!root.right().unwrap().is_red());
    }

    #[test]
    fn remove_present_keys() {
        let mut root = None;
        for key in 1..=15 {
            let (new_root, _) = insert(root, key, ());
            root = Some(blacken(new_root));
        }

        for &key in &[8, 1, 15, 4, 12] {
            let (new_root, ()) = remove(root.map(redden_for_removal), &key);
            root = new_root.map(blacken);
        }
        assert_eq!(size(&root), 10);

        let mut keys = Vec::new();
        keys_inorder(root.as_deref(), &mut keys);
        assert_eq!(keys, &[2, 3, 5, 6, 7, 9, 10, 11, 13, 14]);
    }

    #[test]
    #[should_panic(expected = "remove requires the key to be present")]
    fn remove_missing_key_panics() {
        let mut root = None;
        for key in &[2, 4, 6] {
            let (new_root, _) = insert(root, *key, ());
            root = Some(blacken(new_root));
        }

        remove(root.map(redden_for_removal), &5);
    }

    #[test]
    fn remove_min_and_max_detach_extremes() {
        let mut root = None;
        for key in 1..=7 {
            let (new_root, _) = insert(root, key, ());
            root = Some(blacken(new_root));
        }

        let (new_root, min) = remove_min(root.map(redden_for_removal));
        assert_eq!(min.map(|node| node.into_entry().0), Some(1));
        let root = new_root.map(blacken);
        assert_eq!(size(&root), 6);

        let (new_root, max) = remove_max(root.map(redden_for_removal));
        assert_eq!(max.map(|node| node.into_entry().0), Some(7));
        let root = new_root.map(blacken);
        assert_eq!(size(&root), 5);

        let mut keys = Vec::new();
        keys_inorder(root.as_deref(), &mut keys);
        assert_eq!(keys, &[2, 3, 4, 5, 6]);
    }
}
