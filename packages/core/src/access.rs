//! Path-driven accessors over [`Value`] trees.
//!
//! Every accessor compiles its raw path first (see [`ToPath`]) and then walks
//! the tree one segment at a time. A missing link is never an error: readers
//! report `None` or `false`, writers create what is missing.
//!
//! The mutating accessors (`set`, `update`, `unset`) change the caller's tree
//! in place. `set` and `update` hand back the same root they were given so
//! calls can be chained; clone first if you need the original.

use crate::{Path, Segment, ToPath, Value};

/// The child addressed by `segment`, if `container` owns one.
fn child<'a>(container: &'a Value, segment: &Segment) -> Option<&'a Value> {
    match container {
        Value::Map(map) => map.get(segment.as_key().as_ref()),
        Value::Array(arr) => arr.get(segment.as_index()?),
        _ => None,
    }
}

fn child_mut<'a>(container: &'a mut Value, segment: &Segment) -> Option<&'a mut Value> {
    match container {
        Value::Map(map) => map.get_mut(segment.as_key().as_ref()),
        Value::Array(arr) => arr.get_mut(segment.as_index()?),
        _ => None,
    }
}

/// How far past its end a sequence may be padded to reach an index.
const MAX_PADDING: usize = 1 << 16;

/// Whether `arr` can hold `segment` as an element, padding if needed.
fn can_index(arr: &[Value], segment: &Segment) -> bool {
    segment
        .as_index()
        .is_some_and(|index| index < arr.len() || index - arr.len() <= MAX_PADDING)
}

/// Turn an array into a map keyed by decimal indices. Every element stays
/// reachable through the same segments.
fn rekey_array(slot: &mut Value) {
    match std::mem::take(slot) {
        Value::Array(items) => {
            *slot = Value::Map(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| (i.to_string(), item))
                    .collect(),
            );
        }
        other => *slot = other,
    }
}

/// Like [`child_mut`], but creates the slot (as `Null`) when absent.
///
/// Sequences grow to reach the index, padding with `Null`. A sequence that
/// cannot hold `segment` is re-keyed into a map first.
fn slot_mut<'a>(container: &'a mut Value, segment: &Segment) -> Option<&'a mut Value> {
    if matches!(&*container, Value::Array(arr) if !can_index(arr, segment)) {
        log::debug!("re-keying array into a map to reach {:?}", segment.as_key());
        rekey_array(container);
    }

    match container {
        Value::Map(map) => Some(
            map.entry(segment.as_key().into_owned())
                .or_insert(Value::Null),
        ),
        Value::Array(arr) => {
            let index = segment.as_index()?;
            if index >= arr.len() {
                arr.resize(index + 1, Value::Null);
            }
            Some(&mut arr[index])
        }
        _ => None,
    }
}

/// The empty container that `next` can address.
fn container_for(next: &Segment) -> Value {
    if can_index(&[], next) {
        Value::array()
    } else {
        Value::map()
    }
}

/// Make `slot` a container that `next` can address.
///
/// Existing containers are kept; scalars are replaced.
fn make_addressable(slot: &mut Value, next: &Segment) {
    match *slot {
        Value::Map(_) | Value::Array(_) => {}
        Value::Null => *slot = container_for(next),
        _ => {
            log::debug!(
                "replacing {} with a container to reach {:?}",
                slot.type_name(),
                next.as_key()
            );
            *slot = container_for(next);
        }
    }
}

/// Walk to the container owning the final segment, materializing missing
/// intermediates. The shape of each created container is chosen by the
/// segment that will address it (the next one), never the current one.
fn owner_for_write<'a, 'p>(
    root: &'a mut Value,
    path: &'p Path,
) -> Option<(&'a mut Value, &'p Segment)> {
    let (last, prefix) = path.split_last()?;
    let segments = path.segments();

    make_addressable(root, &segments[0]);
    let mut current = root;
    for (i, segment) in prefix.iter().enumerate() {
        let slot = slot_mut(current, segment)?;
        make_addressable(slot, &segments[i + 1]);
        current = slot;
    }
    Some((current, last))
}

/// Read the value at `path`.
///
/// Returns `None` as soon as a link is missing or a non-container is in the
/// way. The empty path returns the root.
///
/// ```rust
/// use keypath_core::{get, Value};
///
/// let mut tree = Value::map();
/// keypath_core::set(&mut tree, "a.b[1]", Value::from("x"));
/// assert_eq!(get(&tree, "a.b[1]"), Some(&Value::from("x")));
/// assert_eq!(get(&tree, "a.b[1].c"), None);
/// ```
pub fn get<'a>(root: &'a Value, path: impl ToPath) -> Option<&'a Value> {
    let path = path.to_path();
    path.iter().try_fold(root, child)
}

/// Read the value at `path`, falling back to `default` when it is unreachable.
///
/// A stored `Null` is a value and is returned as-is.
pub fn get_or<'a>(root: &'a Value, path: impl ToPath, default: &'a Value) -> &'a Value {
    get(root, path).unwrap_or(default)
}

/// Mutable access to the value at `path`. Never creates anything.
pub fn get_mut<'a>(root: &'a mut Value, path: impl ToPath) -> Option<&'a mut Value> {
    let path = path.to_path();
    let mut current = root;
    for segment in path.iter() {
        current = child_mut(current, segment)?;
    }
    Some(current)
}

/// Read several paths at once.
pub fn at<'a, I>(root: &'a Value, paths: I) -> Vec<Option<&'a Value>>
where
    I: IntoIterator,
    I::Item: ToPath,
{
    paths.into_iter().map(|path| get(root, path)).collect()
}

fn walk(root: &Value, path: &Path, link: impl Fn(&Value) -> bool) -> bool {
    let mut current = root;
    for segment in path {
        match child(current, segment) {
            Some(next) if link(next) => current = next,
            _ => return false,
        }
    }
    true
}

/// Check that every link of `path` exists.
///
/// A link exists when the container directly owns the key or index, whatever
/// is stored there (including `Null`, `0` or `false`).
pub fn has(root: &Value, path: impl ToPath) -> bool {
    walk(root, &path.to_path(), |_| true)
}

/// Check that every link of `path` resolves to a truthy value.
///
/// Stricter than [`has`] for falsy-but-present values: with `{a: 0}`,
/// `has(.., "a")` is `true` and `has_in(.., "a")` is `false`. See
/// [`Value::is_truthy`] for what counts as falsy.
pub fn has_in(root: &Value, path: impl ToPath) -> bool {
    walk(root, &path.to_path(), Value::is_truthy)
}

/// Assign `value` at `path`, creating intermediate containers as needed.
///
/// Missing or scalar intermediates are replaced by a map, or by an array when
/// the segment that follows is an index (`"a.b.0"` makes `b` an array).
/// Existing containers are descended into. Writing past the end of an array
/// pads it with `Null`.
///
/// An array addressed by a non-numeric key, or by an index far past its end,
/// becomes a map keyed by its decimal indices, so the write always lands.
/// An empty path is a no-op.
///
/// Mutates `root` in place and returns it.
pub fn set(root: &mut Value, path: impl ToPath, value: Value) -> &mut Value {
    let path = path.to_path();
    if let Some((owner, last)) = owner_for_write(root, &path) {
        if let Some(slot) = slot_mut(owner, last) {
            *slot = value;
        }
    }
    root
}

/// Replace the value at `path` with `updater(current)`.
///
/// `updater` receives `None` when nothing is stored there yet. Intermediate
/// containers are created exactly as in [`set`]. Mutates `root` in place and
/// returns it.
pub fn update<F>(root: &mut Value, path: impl ToPath, updater: F) -> &mut Value
where
    F: FnOnce(Option<&Value>) -> Value,
{
    let path = path.to_path();
    if let Some((owner, last)) = owner_for_write(root, &path) {
        let value = updater(child(owner, last));
        if let Some(slot) = slot_mut(owner, last) {
            *slot = value;
        }
    }
    root
}

/// Remove the value at `path`.
///
/// Every intermediate value must exist and be truthy. Returns `false` if the
/// container owning the final segment could not be reached (or the path is
/// empty). Returns `true` once it was reached, even when there was no leaf to
/// remove: the result reports reachability, not whether anything was deleted.
/// Removing an array element shifts the elements after it.
pub fn unset(root: &mut Value, path: impl ToPath) -> bool {
    let path = path.to_path();
    let Some((last, prefix)) = path.split_last() else {
        return false;
    };

    let mut current = root;
    for segment in prefix {
        match child_mut(current, segment) {
            Some(next) if next.is_truthy() => current = next,
            _ => {
                log::debug!("unset {}: unreachable at {}", path, segment);
                return false;
            }
        }
    }

    match current {
        Value::Map(map) => {
            map.remove(last.as_key().as_ref());
            true
        }
        Value::Array(arr) => {
            if let Some(index) = last.as_index().filter(|i| *i < arr.len()) {
                arr.remove(index);
            }
            true
        }
        _ => false,
    }
}
