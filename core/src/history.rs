//! Walks commit history by following parent links.

use std::collections::HashSet;

use tracing::trace;

use crate::object::{Commit, Id, Object};
use crate::repo::{Error, Repo, Result};

/// Depth-first traversal of the commit graph starting at `start`.
///
/// `visit(commit, parent)` is called once for each parent link of each
/// reachable commit, in the order the parents appear in the commit's header;
/// the walk descends into a parent immediately after visiting the link to it.
/// Each commit is loaded at most once, so merges that share ancestors are not
/// revisited and a (malformed) cyclic history still terminates.
///
/// Errors loading any reachable commit are returned as-is: a missing parent
/// is reported rather than silently ending that line of history.
pub fn walk<R, F>(repo: &R, start: &Id, mut visit: F) -> Result<()>
where
    R: Repo + ?Sized,
    F: FnMut(&Id, &Id),
{
    let mut visited: HashSet<Id> = HashSet::new();
    let mut pending: Vec<(Id, Id)> = Vec::new();

    visited.insert(*start);
    push_parent_links(&mut pending, start, &load_commit(repo, start)?);

    while let Some((commit, parent)) = pending.pop() {
        trace!(%commit, %parent, "visiting parent link");
        visit(&commit, &parent);

        if visited.insert(parent) {
            let parent_commit = load_commit(repo, &parent)?;
            push_parent_links(&mut pending, &parent, &parent_commit);
        }
    }

    Ok(())
}

/// Every commit reachable from `start` (including `start` itself),
/// each listed once, in the order `walk` first reaches it.
pub fn ancestors<R: Repo + ?Sized>(repo: &R, start: &Id) -> Result<Vec<Id>> {
    let mut seen: HashSet<Id> = HashSet::new();
    let mut ids = vec![*start];
    seen.insert(*start);

    walk(repo, start, |_, parent| {
        if seen.insert(*parent) {
            ids.push(*parent);
        }
    })?;

    Ok(ids)
}

// Pushed in reverse so that the first parent is popped (and explored) first.
fn push_parent_links(pending: &mut Vec<(Id, Id)>, id: &Id, commit: &Commit) {
    for parent in commit.parents().iter().rev() {
        pending.push((*id, *parent));
    }
}

fn load_commit<R: Repo + ?Sized>(repo: &R, id: &Id) -> Result<Commit> {
    match repo.get_object(id)? {
        Object::Commit(commit) => Ok(commit),
        other => Err(Error::CorruptObject {
            id: *id,
            reason: format!("expected a commit, found a {}", other.kind()),
        }),
    }
}
