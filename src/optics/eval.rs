//! Step-by-step evaluation of optics against a [`Structure`].
//!
//! Reads collect every focus in structural order. Writes rebuild only the
//! ancestors of the foci; all other nodes are returned as-is. In strict mode
//! (Lens optics) any step that does not resolve is an error, otherwise it
//! yields no focus and leaves the node untouched.

use super::{Predicate, Step, Structure};
use crate::error::AccessError;
use crate::path::Path;
use crate::value::{Key, Kind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    Strict,
    Lenient,
}

pub(crate) enum Update<'f, S> {
    Set(&'f S),
    Modify(&'f dyn Fn(S) -> S),
    Remove { selector: &'f Step, filters: &'f [Step] },
}

fn passes<S: Structure>(node: &S, filters: &[Step]) -> bool {
    filters.iter().all(|filter| match filter {
        Step::Optional => !node.is_null(),
        Step::When(predicate) => node.matches(predicate),
        _ => true,
    })
}

fn find_child<S: Structure>(node: &S, predicate: &Predicate) -> Option<(Key, S)> {
    node.children()
        .into_iter()
        .find(|(_, child)| child.matches(predicate))
}

pub(crate) fn collect<S: Structure>(
    steps: &[Step],
    node: &S,
    mode: Mode,
    path: &mut Path,
    out: &mut Vec<S>,
) -> Result<(), AccessError> {
    let Some((step, rest)) = steps.split_first() else {
        out.push(node.clone());
        return Ok(());
    };

    match step {
        Step::Prop(key) | Step::At(key) => match node.child(key) {
            Ok(child) => descend_collect(rest, &child, key, mode, path, out),
            Err(failure) if mode == Mode::Strict => Err(failure.at(path, key)),
            Err(_) => Ok(()),
        },
        Step::Optional => {
            if node.is_null() {
                Ok(())
            } else {
                collect(rest, node, mode, path, out)
            }
        }
        Step::When(predicate) => {
            if node.matches(predicate) {
                collect(rest, node, mode, path, out)
            } else {
                Ok(())
            }
        }
        Step::Find(predicate) => match find_child(node, predicate) {
            Some((key, child)) => descend_collect(rest, &child, &key, mode, path, out),
            None => Ok(()),
        },
        Step::Elems => {
            for (key, child) in node.children() {
                descend_collect(rest, &child, &key, mode, path, out)?;
            }
            Ok(())
        }
    }
}

fn descend_collect<S: Structure>(
    steps: &[Step],
    child: &S,
    key: &Key,
    mode: Mode,
    path: &mut Path,
    out: &mut Vec<S>,
) -> Result<(), AccessError> {
    path.push(key.clone());
    let result = collect(steps, child, mode, path, out);
    path.pop();
    result
}

pub(crate) fn update<S: Structure>(
    steps: &[Step],
    node: &S,
    mode: Mode,
    path: &mut Path,
    change: &Update<'_, S>,
) -> Result<S, AccessError> {
    let Some((step, rest)) = steps.split_first() else {
        return match change {
            Update::Set(value) => Ok((*value).clone()),
            Update::Modify(function) => Ok(function(node.clone())),
            Update::Remove { selector, filters } => remove_children(node, selector, filters, mode, path),
        };
    };

    match step {
        Step::Prop(key) | Step::At(key) => {
            if mode == Mode::Strict && rest.is_empty() {
                if let Update::Set(value) = change {
                    return node
                        .with_child(key, (*value).clone())
                        .map_err(|failure| failure.at(path, key));
                }
            }
            match node.child(key) {
                Ok(child) => descend_update(rest, node, &child, key, mode, path, change),
                Err(failure) if mode == Mode::Strict => Err(failure.at(path, key)),
                Err(_) => Ok(node.clone()),
            }
        }
        Step::Optional => {
            if node.is_null() {
                Ok(node.clone())
            } else {
                update(rest, node, mode, path, change)
            }
        }
        Step::When(predicate) => {
            if node.matches(predicate) {
                update(rest, node, mode, path, change)
            } else {
                Ok(node.clone())
            }
        }
        Step::Find(predicate) => match find_child(node, predicate) {
            Some((key, child)) => descend_update(rest, node, &child, &key, mode, path, change),
            None => Ok(node.clone()),
        },
        Step::Elems => node
            .children()
            .into_iter()
            .try_fold(node.clone(), |parent, (key, child)| {
                descend_update(rest, &parent, &child, &key, mode, path, change)
            }),
    }
}

fn descend_update<S: Structure>(
    steps: &[Step],
    parent: &S,
    child: &S,
    key: &Key,
    mode: Mode,
    path: &mut Path,
    change: &Update<'_, S>,
) -> Result<S, AccessError> {
    path.push(key.clone());
    let updated = update(steps, child, mode, path, change);
    path.pop();
    let updated = updated?;
    if updated.shares_with(child) {
        return Ok(parent.clone());
    }
    parent
        .with_child(key, updated)
        .map_err(|failure| failure.at(path, key))
}

fn remove_children<S: Structure>(
    node: &S,
    selector: &Step,
    filters: &[Step],
    mode: Mode,
    path: &Path,
) -> Result<S, AccessError> {
    match node.kind() {
        Kind::List => {}
        Kind::Record => {
            return Err(AccessError::RemoveUnsupported {
                path: path.clone(),
                found: Kind::Record,
            });
        }
        found if mode == Mode::Strict => {
            return Err(AccessError::RemoveUnsupported {
                path: path.clone(),
                found,
            });
        }
        _ => return Ok(node.clone()),
    }

    let indices: Vec<usize> = match selector {
        Step::Prop(key) | Step::At(key) => match node.child(key) {
            Ok(child) if passes(&child, filters) => key.as_index().into_iter().collect(),
            Ok(_) => Vec::new(),
            Err(failure) if mode == Mode::Strict => return Err(failure.at(path, key)),
            Err(_) => Vec::new(),
        },
        Step::Find(predicate) => find_child(node, predicate)
            .filter(|(_, child)| passes(child, filters))
            .and_then(|(key, _)| key.as_index())
            .into_iter()
            .collect(),
        Step::Elems => node
            .children()
            .into_iter()
            .filter(|(_, child)| passes(child, filters))
            .filter_map(|(key, _)| key.as_index())
            .collect(),
        Step::Optional | Step::When(_) => Vec::new(),
    };

    if indices.is_empty() {
        return Ok(node.clone());
    }
    node.remove_elements(&indices)
        .map_err(|failure| AccessError::RemoveUnsupported {
            path: path.clone(),
            found: match failure {
                super::StepFailure::NotAContainer(found) => found,
                _ => node.kind(),
            },
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use crate::{list, record};
    use rstest::rstest;

    fn run_collect(steps: &[Step], node: &Value, mode: Mode) -> Result<Vec<Value>, AccessError> {
        let mut out = Vec::new();
        collect(steps, node, mode, &mut Path::root(), &mut out)?;
        Ok(out)
    }

    #[rstest]
    fn test_strict_collect_reports_full_path() {
        let root = record! { "a" => record! { "b" => Value::Null } };
        let steps = [
            Step::Prop(Key::from("a")),
            Step::Prop(Key::from("b")),
            Step::Prop(Key::from("c")),
        ];

        let error = run_collect(&steps, &root, Mode::Strict).unwrap_err();

        assert_eq!(
            error,
            AccessError::NotAContainer {
                path: Path::root().key("a").key("b"),
                key: Key::from("c"),
                found: Kind::Null,
            }
        );
    }

    #[rstest]
    fn test_lenient_collect_skips_missing() {
        let root = list![record! { "a" => 1 }, record! {}, record! { "a" => 3 }];
        let steps = [Step::Elems, Step::Prop(Key::from("a"))];

        let foci = run_collect(&steps, &root, Mode::Lenient).unwrap();

        assert_eq!(foci, vec![Value::from(1), Value::from(3)]);
    }

    #[rstest]
    fn test_strict_set_inserts_final_key() {
        let root = record! { "a" => record! {} };
        let steps = [Step::Prop(Key::from("a")), Step::Prop(Key::from("b"))];
        let value = Value::from(1);

        let updated = update(&steps, &root, Mode::Strict, &mut Path::root(), &Update::Set(&value)).unwrap();

        assert_eq!(updated, record! { "a" => record! { "b" => 1 } });
    }

    #[rstest]
    fn test_strict_modify_requires_final_key() {
        let root = record! { "a" => record! {} };
        let steps = [Step::Prop(Key::from("a")), Step::Prop(Key::from("b"))];
        let increment = |value: Value| value;

        let error = update(
            &steps,
            &root,
            Mode::Strict,
            &mut Path::root(),
            &Update::Modify(&increment),
        )
        .unwrap_err();

        assert_eq!(
            error,
            AccessError::MissingKey {
                path: Path::root().key("a"),
                key: Key::from("b"),
            }
        );
    }
}
