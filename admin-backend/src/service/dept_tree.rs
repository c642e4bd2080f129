// src/service/dept_tree.rs
//! フラットな部門リストから木構造を組み立てる

use crate::api::dto::dept_dto::{DeptDto, TreeNode};
use std::collections::{HashMap, HashSet};

/// 部門リストを入れ子の一覧に変換する。
///
/// リスト内に親が存在しない部門がルートになり、他の部門の子である部門は
/// ルートとして重複して現れない。子の並びは入力順を保つ。
/// 循環したデータでも、祖先に既に現れた部門は再度ぶら下げない。
pub fn build_list_tree(list: Vec<DeptDto>) -> Vec<DeptDto> {
    if list.is_empty() {
        return Vec::new();
    }

    let ids: HashSet<i64> = list.iter().map(|d| d.dept_id).collect();
    let mut by_parent: HashMap<i64, Vec<DeptDto>> = HashMap::new();
    let mut roots = Vec::new();

    for dept in list {
        if ids.contains(&dept.parent_id) {
            by_parent.entry(dept.parent_id).or_default().push(dept);
        } else {
            roots.push(dept);
        }
    }

    let mut path = HashSet::new();
    roots
        .into_iter()
        .map(|root| attach_children(root, &by_parent, &mut path))
        .collect()
}

fn attach_children(
    mut dept: DeptDto,
    by_parent: &HashMap<i64, Vec<DeptDto>>,
    path: &mut HashSet<i64>,
) -> DeptDto {
    path.insert(dept.dept_id);

    let mut children = Vec::new();
    if let Some(candidates) = by_parent.get(&dept.dept_id) {
        for child in candidates {
            if path.contains(&child.dept_id) {
                continue;
            }
            children.push(attach_children(child.clone(), by_parent, path));
        }
    }
    dept.children = children;

    path.remove(&dept.dept_id);
    dept
}

/// 選択用ツリー。`build_list_tree` と同じ森を、兄弟を weight → key の順に並べて返す。
pub fn build_tree(list: Vec<DeptDto>) -> Vec<TreeNode> {
    to_tree_nodes(build_list_tree(list))
}

fn to_tree_nodes(depts: Vec<DeptDto>) -> Vec<TreeNode> {
    let mut nodes: Vec<TreeNode> = depts
        .into_iter()
        .map(|dept| TreeNode {
            key: dept.dept_id,
            title: dept.dept_name,
            parent_id: dept.parent_id,
            weight: dept.dept_sort,
            children: to_tree_nodes(dept.children),
        })
        .collect();
    nodes.sort_by_key(|node| (node.weight, node.key));
    nodes
}

/// 指定部門の全子孫ID（自身は含まない）
pub fn descendant_ids(edges: &[(i64, i64)], dept_id: i64) -> HashSet<i64> {
    let mut by_parent: HashMap<i64, Vec<i64>> = HashMap::new();
    for (id, parent_id) in edges {
        by_parent.entry(*parent_id).or_default().push(*id);
    }

    let mut found = HashSet::new();
    let mut stack = vec![dept_id];
    while let Some(current) = stack.pop() {
        if let Some(children) = by_parent.get(&current) {
            for child in children {
                if *child != dept_id && found.insert(*child) {
                    stack.push(*child);
                }
            }
        }
    }
    found
}
