//! Tree rendering functionality for debugging and visualization.

use super::Tree;
use std::fmt::Debug;

impl<T> Tree<T>
where
    T: Debug + 'static,
{
    /// Render the value and its immediate shrinks.
    pub fn render(&self) -> String {
        self.render_depth(1)
    }

    /// Render the tree structure down to `max_depth` levels of shrinks.
    pub fn render_depth(&self, max_depth: usize) -> String {
        let mut result = format!("{:?}\n", self.value);
        self.render_children(&mut result, "", max_depth);
        result
    }

    fn render_children(&self, result: &mut String, prefix: &str, depth: usize) {
        if depth == 0 {
            return;
        }
        let mut children = self.children().peekable();
        while let Some(child) = children.next() {
            let is_last = children.peek().is_none();
            result.push_str(prefix);
            result.push_str(if is_last { "└── " } else { "├── " });
            result.push_str(&format!("{:?}\n", child.value));

            let child_prefix = if is_last {
                format!("{prefix}    ")
            } else {
                format!("{prefix}│   ")
            };
            child.render_children(result, &child_prefix, depth - 1);
        }
    }

    /// Render the tree compactly, e.g. `10[5[2], 0]`.
    pub fn render_compact(&self, max_depth: usize) -> String {
        let children: Vec<String> = if max_depth == 0 {
            Vec::new()
        } else {
            self.children()
                .map(|child| child.render_compact(max_depth - 1))
                .collect()
        };
        if children.is_empty() {
            format!("{:?}", self.value)
        } else {
            format!("{:?}[{}]", self.value, children.join(", "))
        }
    }
}
