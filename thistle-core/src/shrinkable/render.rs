//! Rendering the first levels of a shrink tree, for debugging generators.
//!
//! Trees are lazy and may be infinite, so every renderer takes a depth and a
//! per-node width limit.

use std::fmt::Debug;

use super::Shrinkable;

impl<T> Shrinkable<T>
where
    T: Debug + 'static,
{
    /// Render the tree structure as a string for debugging.
    pub fn render(&self, depth: usize, width: usize) -> String {
        let mut result = String::new();
        self.render_recursive(&mut result, "", true, depth, width);
        result
    }

    fn render_recursive(
        &self,
        result: &mut String,
        prefix: &str,
        is_last: bool,
        depth: usize,
        width: usize,
    ) {
        result.push_str(prefix);
        result.push_str(if is_last { "└── " } else { "├── " });
        result.push_str(&format!("{:?}\n", self.value));

        if depth == 0 {
            return;
        }

        let child_prefix = if is_last {
            format!("{prefix}    ")
        } else {
            format!("{prefix}│   ")
        };

        let children: Vec<Shrinkable<T>> = self.shrink().take(width).collect();
        for (i, child) in children.iter().enumerate() {
            let child_is_last = i == children.len() - 1;
            child.render_recursive(result, &child_prefix, child_is_last, depth - 1, width);
        }
    }

    /// Render the tree compactly, showing only values.
    pub fn render_compact(&self, depth: usize, width: usize) -> String {
        let children: Vec<String> = if depth == 0 {
            Vec::new()
        } else {
            self.shrink()
                .take(width)
                .map(|child| child.render_compact(depth - 1, width))
                .collect()
        };

        if children.is_empty() {
            format!("{:?}", self.value)
        } else {
            format!("{:?}[{}]", self.value, children.join(", "))
        }
    }
}
