use crate::Comment;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// A comment with its reply subtree attached, ready for serialization.
#[derive(Debug, Clone, Serialize)]
pub struct CommentNode {
    #[serde(flatten)]
    pub comment: Comment,
    pub can_reply: bool,
    pub has_replies: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_liked: Option<bool>,
    pub replies: Vec<CommentNode>,
}

/// Reassembles a nested thread from one page of root comments plus the flat
/// batch of their descendants. Children are always attached in chronological
/// order regardless of how the roots themselves were sorted. Descendants whose
/// root is not in the page are ignored.
///
/// `liked` is the set of comment ids the viewer has liked; `None` leaves the
/// enrichment off entirely (anonymous listing).
pub fn assemble(
    roots: Vec<Comment>,
    descendants: Vec<Comment>,
    liked: Option<&HashSet<String>>,
) -> Vec<CommentNode> {
    let mut by_parent: HashMap<String, Vec<Comment>> = HashMap::new();
    for c in descendants {
        if let Some(parent) = c.parent_id.clone() {
            by_parent.entry(parent).or_default().push(c);
        }
    }
    for children in by_parent.values_mut() {
        children.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    }

    roots
        .into_iter()
        .map(|root| attach(root, &mut by_parent, liked))
        .collect()
}

fn attach(
    comment: Comment,
    by_parent: &mut HashMap<String, Vec<Comment>>,
    liked: Option<&HashSet<String>>,
) -> CommentNode {
    // remove() hands each child list out exactly once, so the recursion
    // terminates even on a corrupt parent chain.
    let children = by_parent.remove(&comment.id).unwrap_or_default();
    let replies: Vec<CommentNode> = children
        .into_iter()
        .map(|c| attach(c, by_parent, liked))
        .collect();

    CommentNode {
        can_reply: comment.can_reply(),
        has_replies: !replies.is_empty(),
        is_liked: liked.map(|set| set.contains(&comment.id)),
        replies,
        comment,
    }
}
