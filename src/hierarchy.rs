//! Parent → children index over export items

use crate::export::Member;
use std::collections::HashMap;

/// Direct children of each parent `marshallId`, in input order
#[derive(Debug)]
pub struct HierarchyIndex<'a, T> {
    children: HashMap<&'a str, Vec<&'a T>>,
}

impl<'a, T: Member> HierarchyIndex<'a, T> {
    /// Index `items` by their first `marshallMemberOf` entry.
    ///
    /// Items without a parent reference are left out; a parent that is not
    /// itself among the items still gets a bucket.
    pub fn build(items: &'a [T]) -> Self {
        let mut children: HashMap<&'a str, Vec<&'a T>> = HashMap::new();

        for item in items {
            if let Some(parent) = item.parent_id() {
                children.entry(parent).or_default().push(item);
            }
        }

        Self { children }
    }

    /// Children of `parent_id`; empty when it has none
    pub fn children_of(&self, parent_id: &str) -> &[&'a T] {
        self.children
            .get(parent_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
