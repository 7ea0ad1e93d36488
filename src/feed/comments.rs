use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::{debug, warn};

use crate::model::{Comment, CommentNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    OnPath(usize),
    Done,
}

/// Nest a flat list of comments into a reply forest.
///
/// Roots keep their input order, as do the replies under each parent. A
/// comment whose parent is missing, is itself, or sits on a reply cycle is
/// promoted to a root, so every input comment appears exactly once.
pub fn build_comment_tree(comments: Vec<Comment>) -> Vec<CommentNode> {
    if comments.is_empty() {
        return Vec::new();
    }

    let mut parents = resolve_parents(&comments);
    break_cycles(&comments, &mut parents);

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); comments.len()];
    let mut roots = Vec::new();
    for (idx, parent) in parents.iter().enumerate() {
        match parent {
            Some(parent) => children[*parent].push(idx),
            None => roots.push(idx),
        }
    }

    let order = post_order(&roots, &children);
    let mut slots: Vec<Option<CommentNode>> = comments
        .into_iter()
        .map(|c| Some(CommentNode::new(c)))
        .collect();
    for idx in order {
        let replies = children[idx]
            .iter()
            .filter_map(|&child| slots[child].take())
            .collect();
        if let Some(node) = slots[idx].as_mut() {
            node.replies = replies;
        }
    }

    let forest: Vec<CommentNode> = roots
        .iter()
        .filter_map(|&root| slots[root].take())
        .collect();
    debug!(
        roots = forest.len(),
        total = parents.len(),
        "built comment tree"
    );
    forest
}

fn resolve_parents(comments: &[Comment]) -> Vec<Option<usize>> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(comments.len());
    for (idx, comment) in comments.iter().enumerate() {
        match index.entry(comment.id.as_str()) {
            Entry::Vacant(slot) => {
                slot.insert(idx);
            }
            Entry::Occupied(_) => {
                warn!(comment_id = %comment.id, "duplicate comment id, replies attach to the first");
            }
        }
    }

    comments
        .iter()
        .enumerate()
        .map(|(idx, comment)| {
            let parent_id = comment.parent_id.as_deref().filter(|p| !p.is_empty())?;
            match index.get(parent_id) {
                Some(&parent) if parent == idx => {
                    warn!(comment_id = %comment.id, "comment replies to itself, treating as root");
                    None
                }
                Some(&parent) => Some(parent),
                None => {
                    warn!(comment_id = %comment.id, parent_id, "dangling parent, treating as root");
                    None
                }
            }
        })
        .collect()
}

/// Cut every reply cycle by promoting its earliest member to a root.
fn break_cycles(comments: &[Comment], parents: &mut [Option<usize>]) {
    let mut state = vec![Visit::New; parents.len()];
    for start in 0..parents.len() {
        if state[start] != Visit::New {
            continue;
        }
        let mut path = Vec::new();
        let mut current = Some(start);
        while let Some(node) = current {
            match state[node] {
                Visit::New => {
                    state[node] = Visit::OnPath(start);
                    path.push(node);
                    current = parents[node];
                }
                Visit::OnPath(owner) if owner == start => {
                    let cycle_start = path.iter().position(|&n| n == node).unwrap_or(0);
                    if let Some(&promoted) = path[cycle_start..].iter().min() {
                        warn!(
                            comment_id = %comments[promoted].id,
                            cycle_len = path.len() - cycle_start,
                            "reply cycle detected, treating as root"
                        );
                        parents[promoted] = None;
                    }
                    break;
                }
                _ => break,
            }
        }
        for node in path {
            state[node] = Visit::Done;
        }
    }
}

/// Children come before their parent in the returned order.
fn post_order(roots: &[usize], children: &[Vec<usize>]) -> Vec<usize> {
    let mut order = Vec::with_capacity(children.len());
    let mut stack: Vec<(usize, bool)> = roots.iter().rev().map(|&r| (r, false)).collect();
    while let Some((node, expanded)) = stack.pop() {
        if expanded {
            order.push(node);
        } else {
            stack.push((node, true));
            stack.extend(children[node].iter().rev().map(|&c| (c, false)));
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::model::count_comments;

    fn comment(id: &str, parent: Option<&str>) -> Comment {
        Comment {
            id: id.to_string(),
            author_id: "u1".to_string(),
            author_name: None,
            body: format!("body of {id}"),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            parent_id: parent.map(str::to_string),
        }
    }

    fn ids(nodes: &[CommentNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.comment.id.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(build_comment_tree(Vec::new()).is_empty());
    }

    #[test]
    fn test_flat_comments_stay_roots() {
        let forest = build_comment_tree(vec![
            comment("a", None),
            comment("b", None),
            comment("c", None),
        ]);
        assert_eq!(ids(&forest), ["a", "b", "c"]);
        assert!(forest.iter().all(|n| n.replies.is_empty()));
    }

    #[test]
    fn test_chain_nests() {
        let forest = build_comment_tree(vec![
            comment("a", None),
            comment("b", Some("a")),
            comment("c", Some("b")),
        ]);
        assert_eq!(ids(&forest), ["a"]);
        assert_eq!(ids(&forest[0].replies), ["b"]);
        assert_eq!(ids(&forest[0].replies[0].replies), ["c"]);
        assert!(forest[0].replies[0].replies[0].replies.is_empty());
    }

    #[test]
    fn test_children_before_parent_in_input() {
        let forest = build_comment_tree(vec![
            comment("c", Some("b")),
            comment("b", Some("a")),
            comment("a", None),
        ]);
        assert_eq!(ids(&forest), ["a"]);
        assert_eq!(forest[0].reply_count(), 2);
    }

    #[test]
    fn test_reply_order_follows_input() {
        let forest = build_comment_tree(vec![
            comment("r2", Some("root")),
            comment("root", None),
            comment("r1", Some("root")),
            comment("r3", Some("root")),
        ]);
        assert_eq!(ids(&forest[0].replies), ["r2", "r1", "r3"]);
    }

    #[test]
    fn test_dangling_parent_becomes_root() {
        let forest = build_comment_tree(vec![
            comment("a", None),
            comment("d", Some("nonexistent-id")),
        ]);
        assert_eq!(ids(&forest), ["a", "d"]);
    }

    #[test]
    fn test_empty_parent_id_is_root() {
        let forest = build_comment_tree(vec![comment("a", Some(""))]);
        assert_eq!(ids(&forest), ["a"]);
    }

    #[test]
    fn test_self_reference_becomes_root() {
        let forest = build_comment_tree(vec![comment("a", Some("a")), comment("b", Some("a"))]);
        assert_eq!(ids(&forest), ["a"]);
        assert_eq!(ids(&forest[0].replies), ["b"]);
    }

    #[test]
    fn test_cycle_is_broken_at_earliest_member() {
        let forest = build_comment_tree(vec![
            comment("x", None),
            comment("a", Some("c")),
            comment("b", Some("a")),
            comment("c", Some("b")),
            comment("d", Some("c")),
        ]);
        assert_eq!(ids(&forest), ["x", "a"]);
        assert_eq!(count_comments(&forest), 5);
        let b = &forest[1].replies[0];
        assert_eq!(b.comment.id, "b");
        assert_eq!(ids(&b.replies), ["c"]);
        assert_eq!(ids(&b.replies[0].replies), ["d"]);
    }

    #[test]
    fn test_duplicate_ids_are_kept() {
        let forest = build_comment_tree(vec![
            comment("a", None),
            comment("a", None),
            comment("b", Some("a")),
        ]);
        assert_eq!(ids(&forest), ["a", "a"]);
        assert_eq!(ids(&forest[0].replies), ["b"]);
        assert!(forest[1].replies.is_empty());
        assert_eq!(count_comments(&forest), 3);
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let mut comments = vec![comment("0", None)];
        for i in 1..100_000 {
            comments.push(comment(&i.to_string(), Some(&(i - 1).to_string())));
        }
        let forest = build_comment_tree(comments);
        assert_eq!(forest.len(), 1);
        assert_eq!(count_comments(&forest), 100_000);
        drop(forest);
    }

    #[test]
    fn test_count_is_preserved() {
        let comments = vec![
            comment("a", None),
            comment("b", Some("a")),
            comment("c", Some("missing")),
            comment("d", Some("d")),
            comment("e", Some("b")),
            comment("f", Some("a")),
        ];
        let total = comments.len();
        assert_eq!(count_comments(&build_comment_tree(comments)), total);
    }

    #[test]
    fn test_deserialize_wire_comment() {
        let comment: Comment = serde_json::from_value(serde_json::json!({
            "_id": "c1",
            "authorId": "u9",
            "authorName": "Ana",
            "content": "great match",
            "createdAt": "2024-05-01T12:00:00Z",
            "parentId": null
        }))
        .unwrap();
        assert_eq!(comment.id, "c1");
        assert_eq!(comment.body, "great match");
        assert!(comment.parent_id.is_none());
    }
}
